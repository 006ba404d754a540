use crate::error::Error;

/// Represents an operation with one input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sin,
    Cos,
}

/// Represents an operation with two inputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
}

impl BinaryOp {
    /// The infix symbol of this operator, as it appears in rendered
    /// expressions and in parser input.
    pub fn symbol(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Pow => "**",
        }
    }
}

use {BinaryOp::*, UnaryOp::*};

/// Represents a node in an abstract syntax `Tree`.
///
/// Nodes are stored in a flat buffer in topological order, so the inputs of
/// `Unary` and `Binary` nodes are indices of nodes that appear earlier in the
/// buffer.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Node {
    Constant(f64),
    Symbol(char),
    Unary(UnaryOp, usize),
    Binary(BinaryOp, usize, usize),
}

use Node::*;

pub(crate) fn is_topological_order(nodes: &[Node]) -> bool {
    nodes.iter().enumerate().all(|(i, node)| match node {
        Constant(_) | Symbol(_) => true,
        Unary(_, input) => *input < i,
        Binary(_, l, r) => *l < i && *r < i,
    })
}

/// Represents an abstract syntax tree.
///
/// The nodes are in topological order, with the root as the last node. A tree
/// is immutable once constructed; the combinators and `derivative` always
/// allocate new nodes rather than modify existing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

pub type MaybeTree = Result<Tree, Error>;

impl Tree {
    /// Build a tree from raw nodes, after checking the invariants: the buffer
    /// must not be empty, constants must be finite, and the nodes must be in
    /// topological order. This is the checked gate for anything that produces
    /// node buffers directly instead of going through the combinators.
    pub fn from_nodes(nodes: Vec<Node>) -> MaybeTree {
        let t = Tree { nodes };
        return t.validated();
    }

    /// Create a tree representing a constant value.
    pub fn constant(val: f64) -> Tree {
        Tree {
            nodes: vec![Constant(val)],
        }
    }

    /// Create a tree representing a symbol with the given `label`.
    pub fn symbol(label: char) -> Tree {
        Tree {
            nodes: vec![Symbol(label)],
        }
    }

    /// The number of nodes in this tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. Valid trees never do.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the root node. The root is always the last node of the tree.
    pub fn root_index(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Get a reference to the root of the tree.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    /// Get a reference to the node at `index`.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Reference to the nodes of this tree.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The nodes of the tree. This drops the tree and gives the ownership of
    /// the data to the caller. Anyone modifying the nodes is expected to
    /// construct a new tree via `from_nodes`, which checks the invariants.
    pub fn take(self) -> Vec<Node> {
        self.nodes
    }

    /// Get a unique list of all symbols in this tree, in the order of their
    /// first appearance.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols = Vec::new();
        for node in self.nodes.iter() {
            if let Symbol(label) = node {
                if !symbols.contains(label) {
                    symbols.push(*label);
                }
            }
        }
        return symbols;
    }

    /// Check the tree for errors and return a Result that contains the tree
    /// if no errors were found, or the first error encountered.
    fn validated(self) -> MaybeTree {
        if self.nodes.is_empty() {
            return Err(Error::EmptyTree);
        }
        // Check for non-finite constants.
        for node in self.nodes.iter() {
            if let Constant(val) = node {
                if !val.is_finite() {
                    return Err(Error::NonFiniteConstant(*val));
                }
            }
        }
        /* We make sure the inputs of every node appear before that node
         * itself. This is important when traversing the tree, but also
         * ensures there are no cycles. */
        if !is_topological_order(&self.nodes) {
            return Err(Error::WrongNodeOrder);
        }
        return Ok(self);
    }

    fn unary_op(mut self, op: UnaryOp) -> MaybeTree {
        let root = self.root_index();
        self.nodes.push(Unary(op, root));
        return Ok(self);
    }

    fn binary_op(self, other: Tree, op: BinaryOp) -> MaybeTree {
        Ok(self.merged(other, op))
    }

    /// Join two trees under a new binary root. The nodes of `other` are
    /// appended with their inputs offset, then the new root is pushed last.
    fn merged(mut self, other: Tree, op: BinaryOp) -> Tree {
        self.nodes.reserve(other.nodes.len() + 1);
        let lhs = self.root_index();
        self.push_nodes(&other);
        let rhs = self.root_index();
        self.nodes.push(Binary(op, lhs, rhs));
        return self;
    }

    fn push_nodes(&mut self, other: &Tree) -> usize {
        let offset: usize = self.nodes.len();
        self.nodes.extend(other.nodes.iter().map(|node| match node {
            Constant(val) => Constant(*val),
            Symbol(label) => Symbol(*label),
            Unary(op, input) => Unary(*op, *input + offset),
            Binary(op, lhs, rhs) => Binary(*op, *lhs + offset, *rhs + offset),
        }));
        return offset;
    }
}

/// Extract the subtree rooted at `root` as a fresh tree. The reachable nodes
/// are copied in their original relative order with their inputs remapped, so
/// the result is valid by construction.
pub(crate) fn subtree(nodes: &[Node], root: usize) -> Tree {
    let mut keep = vec![false; root + 1];
    keep[root] = true;
    for i in (0..=root).rev() {
        if keep[i] {
            match &nodes[i] {
                Constant(_) | Symbol(_) => {}
                Unary(_, input) => keep[*input] = true,
                Binary(_, lhs, rhs) => {
                    keep[*lhs] = true;
                    keep[*rhs] = true;
                }
            }
        }
    }
    let mut index_map = vec![0usize; root + 1];
    let mut copied = Vec::new();
    for i in 0..=root {
        if !keep[i] {
            continue;
        }
        index_map[i] = copied.len();
        copied.push(match &nodes[i] {
            Constant(val) => Constant(*val),
            Symbol(label) => Symbol(*label),
            Unary(op, input) => Unary(*op, index_map[*input]),
            Binary(op, lhs, rhs) => Binary(*op, index_map[*lhs], index_map[*rhs]),
        });
    }
    return Tree { nodes: copied };
}

macro_rules! unary_func {
    ($name:ident, $op:ident) => {
        pub fn $name(tree: MaybeTree) -> MaybeTree {
            tree?.unary_op($op)
        }
    };
}

unary_func!(sin, Sin);
unary_func!(cos, Cos);

macro_rules! binary_func {
    ($name:ident, $op:ident) => {
        pub fn $name(lhs: MaybeTree, rhs: MaybeTree) -> MaybeTree {
            lhs?.binary_op(rhs?, $op)
        }
    };
}

binary_func!(add, Add);
binary_func!(sub, Subtract);
binary_func!(mul, Multiply);
binary_func!(div, Divide);
binary_func!(pow, Pow);

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<i32> for Tree {
    fn from(value: i32) -> Self {
        Self::constant(value as f64)
    }
}

impl From<char> for Tree {
    fn from(c: char) -> Self {
        return Self::symbol(c);
    }
}

/* The std ops are a thin convenience layer over the combinators; they carry
 * no semantics of their own. Numeric operands are promoted to constant
 * nodes. */
macro_rules! binary_op_impl {
    ($trait:ident, $method:ident, $op:ident) => {
        impl<T: Into<Tree>> std::ops::$trait<T> for Tree {
            type Output = Tree;
            fn $method(self, rhs: T) -> Tree {
                self.merged(rhs.into(), $op)
            }
        }

        impl std::ops::$trait<Tree> for f64 {
            type Output = Tree;
            fn $method(self, rhs: Tree) -> Tree {
                Tree::constant(self).merged(rhs, $op)
            }
        }

        impl std::ops::$trait<Tree> for i32 {
            type Output = Tree;
            fn $method(self, rhs: Tree) -> Tree {
                Tree::constant(self as f64).merged(rhs, $op)
            }
        }
    };
}

binary_op_impl!(Add, add, Add);
binary_op_impl!(Sub, sub, Subtract);
binary_op_impl!(Mul, mul, Multiply);
binary_op_impl!(Div, div, Divide);

impl Tree {
    /// Raise this tree to `exponent`. There is no `**` operator to overload
    /// in Rust, so powers get a method instead.
    pub fn pow(self, exponent: impl Into<Tree>) -> Tree {
        self.merged(exponent.into(), Pow)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::deftree;

    #[test]
    fn t_leaf_construction() {
        let tree = Tree::symbol('x');
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), &Symbol('x'));
        let tree = Tree::constant(2.5);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), &Constant(2.5));
    }

    #[test]
    fn t_binary_node_layout() {
        let tree = deftree!(+ x 1).unwrap();
        assert_eq!(
            tree.nodes(),
            &[Symbol('x'), Constant(1.), Binary(Add, 0, 1)]
        );
        let tree = deftree!(* (+ x 1) (- x 1)).unwrap();
        assert_eq!(
            tree.nodes(),
            &[
                Symbol('x'),
                Constant(1.),
                Binary(Add, 0, 1),
                Symbol('x'),
                Constant(1.),
                Binary(Subtract, 3, 4),
                Binary(Multiply, 2, 5)
            ]
        );
    }

    #[test]
    fn t_unary_node_layout() {
        let tree = deftree!(sin (pow x 2)).unwrap();
        assert_eq!(
            tree.nodes(),
            &[
                Symbol('x'),
                Constant(2.),
                Binary(Pow, 0, 1),
                Unary(Sin, 2)
            ]
        );
    }

    #[test]
    fn t_construction_is_idempotent() {
        // Building the same expression twice yields structurally equal trees.
        let a = deftree!(+ (pow x 2) (sin x)).unwrap();
        let b = deftree!(+ (pow x 2) (sin x)).unwrap();
        assert_eq!(a, b);
        let a = mul(cos(Ok(Tree::symbol('x'))), Ok(Tree::constant(3.))).unwrap();
        let b = mul(cos(Ok(Tree::symbol('x'))), Ok(Tree::constant(3.))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn t_ops_sugar_matches_combinators() {
        let sugar = Tree::symbol('x') + 1.0;
        let explicit = deftree!(+ x 1).unwrap();
        assert_eq!(sugar, explicit);
        let sugar = 2.0 * Tree::symbol('x');
        assert_eq!(sugar, deftree!(* 2 x).unwrap());
        let sugar = 1.0 / Tree::symbol('x');
        assert_eq!(sugar, deftree!(/ 1 x).unwrap());
        let sugar = Tree::symbol('x').pow(3.0) - Tree::symbol('x');
        assert_eq!(sugar, deftree!(- (pow x 3) x).unwrap());
        let sugar = 2 + Tree::symbol('x');
        assert_eq!(sugar, deftree!(+ 2 x).unwrap());
    }

    #[test]
    fn t_zero_denominator_is_constructible() {
        // Division by a constant zero is not a construction error.
        let tree = div(Ok(Tree::symbol('x')), Ok(Tree::constant(0.)));
        assert!(tree.is_ok());
    }

    #[test]
    fn t_from_nodes_validation() {
        assert_eq!(Tree::from_nodes(vec![]), Err(Error::EmptyTree));
        assert!(matches!(
            Tree::from_nodes(vec![Constant(f64::NAN)]),
            Err(Error::NonFiniteConstant(val)) if val.is_nan()
        ));
        assert_eq!(
            Tree::from_nodes(vec![Constant(f64::INFINITY)]),
            Err(Error::NonFiniteConstant(f64::INFINITY))
        );
        assert_eq!(
            Tree::from_nodes(vec![Binary(Add, 0, 1), Symbol('x'), Constant(1.)]),
            Err(Error::WrongNodeOrder)
        );
        let tree =
            Tree::from_nodes(vec![Symbol('x'), Constant(1.), Binary(Add, 0, 1)]).unwrap();
        assert_eq!(tree, deftree!(+ x 1).unwrap());
    }

    #[test]
    fn t_subtree_extraction() {
        let tree = deftree!(* (+ x 1) (sin y)).unwrap();
        let Binary(Multiply, lhs, rhs) = *tree.root() else {
            panic!("Unexpected root");
        };
        assert_eq!(subtree(tree.nodes(), lhs), deftree!(+ x 1).unwrap());
        assert_eq!(subtree(tree.nodes(), rhs), deftree!(sin y).unwrap());
    }

    #[test]
    fn t_symbols() {
        let tree = deftree!(* (+ x y) (pow x 2)).unwrap();
        assert_eq!(tree.symbols(), vec!['x', 'y']);
    }
}
