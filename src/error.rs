use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub enum Error {
    /// Nodes are not in a valid topological order.
    WrongNodeOrder,
    /// Tree contains no nodes.
    EmptyTree,
    /// A constant node holds a NaN or infinite value.
    NonFiniteConstant(f64),

    // Derivatives.
    /// The power rule only applies when the exponent is a constant at the
    /// time of differentiation. This is a structural limitation, not a bug in
    /// the input, so callers are expected to match on it explicitly.
    NonConstantExponent,

    // Parsing.
    /// A character the tokenizer does not recognize, with its byte offset.
    UnexpectedChar(char, usize),
    /// A numeric literal that does not parse as a finite number.
    InvalidNumber(String),
    /// A token in a position where it is not allowed.
    UnexpectedToken(String),
    /// Input ended where an operand or a closing parenthesis was expected.
    UnexpectedEndOfInput,
    /// A function name other than the supported ones.
    UnknownFunction(String),
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            WrongNodeOrder => write!(f, "WrongNodeOrder"),
            EmptyTree => write!(f, "EmptyTree"),
            NonFiniteConstant(val) => f.debug_tuple("NonFiniteConstant").field(val).finish(),
            NonConstantExponent => write!(f, "NonConstantExponent"),
            UnexpectedChar(c, offset) => {
                f.debug_tuple("UnexpectedChar").field(c).field(offset).finish()
            }
            InvalidNumber(text) => f.debug_tuple("InvalidNumber").field(text).finish(),
            UnexpectedToken(text) => f.debug_tuple("UnexpectedToken").field(text).finish(),
            UnexpectedEndOfInput => write!(f, "UnexpectedEndOfInput"),
            UnknownFunction(name) => f.debug_tuple("UnknownFunction").field(name).finish(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            WrongNodeOrder => write!(f, "tree nodes are not in topological order"),
            EmptyTree => write!(f, "tree contains no nodes"),
            NonFiniteConstant(val) => write!(f, "constant {val} is not a finite number"),
            NonConstantExponent => {
                write!(f, "symbolic exponent differentiation not supported")
            }
            UnexpectedChar(c, offset) => {
                write!(f, "unexpected character '{c}' at offset {offset}")
            }
            InvalidNumber(text) => write!(f, "invalid numeric literal '{text}'"),
            UnexpectedToken(text) => write!(f, "unexpected '{text}'"),
            UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            UnknownFunction(name) => write!(f, "unknown function '{name}'"),
        }
    }
}

impl std::error::Error for Error {}
