pub mod derivative;
pub mod error;
pub mod parse;
pub mod tree;

mod infix;
mod macros;


pub use derivative::derivative;
pub use error::Error;
pub use tree::{BinaryOp, MaybeTree, Node, Tree, UnaryOp, add, cos, div, mul, pow, sin, sub};
