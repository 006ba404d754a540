use crate::tree::{Node, Node::*, Tree, UnaryOp::*};

impl Tree {
    /// Render the tree as a fully parenthesized infix expression.
    ///
    /// Every binary node renders as `(<left> <op> <right>)`, unary function
    /// nodes render as `sin(<operand>)` / `cos(<operand>)`, and leaves render
    /// as their label or value. Constants use Rust's default float
    /// formatting, so integral values carry no trailing ".0": the tree for
    /// `3 * x` renders as `(3 * x)`. Rendering cannot fail for a valid tree.
    pub fn to_infix(&self) -> String {
        to_infix(self.root_index(), self.nodes())
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_infix())
    }
}

/// Produce the infix expression for the subtree of a single node in a tree.
fn to_infix(index: usize, nodes: &[Node]) -> String {
    match &nodes[index] {
        Constant(val) => val.to_string(),
        Symbol(label) => label.to_string(),
        Unary(op, input) => {
            let ix = to_infix(*input, nodes);
            match op {
                Sin => format!("sin({ix})"),
                Cos => format!("cos({ix})"),
            }
        }
        Binary(op, lhs, rhs) => format!(
            "({} {} {})",
            to_infix(*lhs, nodes),
            op.symbol(),
            to_infix(*rhs, nodes)
        ),
    }
}

#[cfg(test)]
mod test {
    use crate::{deftree, tree::Tree};

    #[test]
    fn t_render_leaves() {
        assert_eq!(Tree::symbol('x').to_infix(), "x");
        assert_eq!(Tree::constant(0.).to_infix(), "0");
        assert_eq!(Tree::constant(1.).to_infix(), "1");
    }

    #[test]
    fn t_numeric_formatting() {
        // The numeric convention: integral values render without a trailing
        // ".0", everything else renders with its shortest round-trip form.
        assert_eq!(Tree::constant(3.).to_infix(), "3");
        assert_eq!(Tree::constant(2.5).to_infix(), "2.5");
        assert_eq!(Tree::constant(-1.).to_infix(), "-1");
        assert_eq!(Tree::constant(0.25).to_infix(), "0.25");
        assert_eq!(Tree::constant(1e6).to_infix(), "1000000");
    }

    #[test]
    fn t_render_binary_nodes() {
        assert_eq!(deftree!(+ x 1).unwrap().to_infix(), "(x + 1)");
        assert_eq!(deftree!(- x 1).unwrap().to_infix(), "(x - 1)");
        assert_eq!(deftree!(* 2 x).unwrap().to_infix(), "(2 * x)");
        assert_eq!(deftree!(/ 1 x).unwrap().to_infix(), "(1 / x)");
        assert_eq!(deftree!(pow x 2).unwrap().to_infix(), "(x ** 2)");
    }

    #[test]
    fn t_render_functions() {
        assert_eq!(deftree!(sin x).unwrap().to_infix(), "sin(x)");
        assert_eq!(
            deftree!(cos (+ x 1)).unwrap().to_infix(),
            "cos((x + 1))"
        );
    }

    #[test]
    fn t_render_is_fully_parenthesized() {
        // Parentheses reflect the structure exactly, not precedence.
        assert_eq!(
            deftree!(+ (+ (pow x 2) (* 2 x)) 1).unwrap().to_infix(),
            "(((x ** 2) + (2 * x)) + 1)"
        );
        assert_eq!(
            deftree!(* (sin (pow x 2)) (/ x 3)).unwrap().to_infix(),
            "(sin((x ** 2)) * (x / 3))"
        );
    }

    #[test]
    fn t_display_matches_to_infix() {
        let tree = deftree!(/ (sin x) (+ x 2.5)).unwrap();
        assert_eq!(format!("{tree}"), tree.to_infix());
        assert_eq!(format!("{tree}"), "(sin(x) / (x + 2.5))");
    }
}
