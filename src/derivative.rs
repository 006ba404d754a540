use crate::{
    error::Error,
    tree::{
        BinaryOp::*, MaybeTree, Node, Node::*, Tree, UnaryOp, add, cos, div, mul, pow, sin, sub,
        subtree,
    },
};

/// Compute the formal derivative of `tree` with respect to the variable
/// labeled `param`.
pub fn derivative(tree: MaybeTree, param: char) -> MaybeTree {
    tree?.derivative(param)
}

impl Tree {
    /// Compute the formal derivative of this tree with respect to the
    /// variable labeled `param`, by recursively applying one closed-form rule
    /// per node kind.
    ///
    /// The result is a freshly allocated tree; this tree is never
    /// modified. No simplification is performed, so the output says exactly
    /// what the rules produced: differentiating `x * x` gives
    /// `1 * x + x * 1`, not `2 * x`. Powers are only differentiable when the
    /// exponent is a constant; any other exponent shape yields
    /// `Error::NonConstantExponent`.
    pub fn derivative(&self, param: char) -> MaybeTree {
        deriv_node(self.nodes(), self.root_index(), param)
    }
}

fn constant(val: f64) -> MaybeTree {
    Ok(Tree::constant(val))
}

fn deriv_node(nodes: &[Node], index: usize, param: char) -> MaybeTree {
    match &nodes[index] {
        Constant(_val) => constant(0.),
        Symbol(label) => constant(if *label == param { 1. } else { 0. }),
        Unary(op, input) => {
            let u = Ok(subtree(nodes, *input));
            let du = deriv_node(nodes, *input, param);
            match op {
                UnaryOp::Sin => mul(cos(u), du), // Chain rule.
                UnaryOp::Cos => mul(mul(constant(-1.), sin(u)), du),
            }
        }
        Binary(op, lhs, rhs) => match op {
            Add => add(
                deriv_node(nodes, *lhs, param),
                deriv_node(nodes, *rhs, param),
            ),
            Subtract => sub(
                deriv_node(nodes, *lhs, param),
                deriv_node(nodes, *rhs, param),
            ),
            Multiply => {
                // Product rule.
                let (l, r) = (subtree(nodes, *lhs), subtree(nodes, *rhs));
                let dl = deriv_node(nodes, *lhs, param);
                let dr = deriv_node(nodes, *rhs, param);
                add(mul(dl, Ok(r)), mul(Ok(l), dr))
            }
            Divide => {
                // Quotient rule. The denominator is not checked against zero;
                // differentiation is structural and does not evaluate.
                let (l, r) = (subtree(nodes, *lhs), subtree(nodes, *rhs));
                let dl = deriv_node(nodes, *lhs, param);
                let dr = deriv_node(nodes, *rhs, param);
                div(
                    sub(mul(dl, Ok(r.clone())), mul(Ok(l), dr)),
                    mul(Ok(r.clone()), Ok(r)),
                )
            }
            Pow => match &nodes[*rhs] {
                // Generalized power rule, with the chain rule applied to the
                // base.
                Constant(n) => {
                    let base = subtree(nodes, *lhs);
                    let dbase = deriv_node(nodes, *lhs, param);
                    mul(
                        mul(constant(*n), pow(Ok(base), constant(*n - 1.))),
                        dbase,
                    )
                }
                Symbol(_) | Unary(..) | Binary(..) => Err(Error::NonConstantExponent),
            },
        },
    }
}
