use crate::{
    error::Error,
    tree::{BinaryOp, BinaryOp::*, MaybeTree, Tree, add, cos, div, mul, pow, sin, sub},
};

/// Parse `text` as an infix expression and return the tree it denotes.
///
/// The grammar covers the binary operators `+ - * / **` with conventional
/// precedence (`**` binds tightest and associates to the right), unary minus,
/// the functions `sin` and `cos`, parenthesized groups, decimal literals and
/// single character variables. The input is either translated into a
/// well-formed tree in full, or rejected with a structured error; a partially
/// built tree is never returned.
pub fn parse(text: &str) -> MaybeTree {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
    };
    let tree = parser.expression(0)?;
    match parser.next() {
        None => Ok(tree),
        Some(token) => Err(Error::UnexpectedToken(describe(&token))),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Operator(BinaryOp),
    OpenParen,
    CloseParen,
}

fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut end = offset;
            while let Some(&(j, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    end = j + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let slice = &text[offset..end];
            match slice.parse::<f64>() {
                Ok(val) if val.is_finite() => tokens.push(Token::Number(val)),
                // A literal with too many digits overflows to infinity.
                Ok(val) => return Err(Error::NonFiniteConstant(val)),
                Err(_) => return Err(Error::InvalidNumber(slice.to_string())),
            }
        } else if c.is_alphabetic() {
            let mut end = offset;
            while let Some(&(j, d)) = chars.peek() {
                if d.is_alphanumeric() {
                    end = j + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(text[offset..end].to_string()));
        } else {
            chars.next();
            match c {
                '+' => tokens.push(Token::Operator(Add)),
                '-' => tokens.push(Token::Operator(Subtract)),
                '*' => {
                    if let Some(&(_, '*')) = chars.peek() {
                        chars.next();
                        tokens.push(Token::Operator(Pow));
                    } else {
                        tokens.push(Token::Operator(Multiply));
                    }
                }
                '/' => tokens.push(Token::Operator(Divide)),
                '(' => tokens.push(Token::OpenParen),
                ')' => tokens.push(Token::CloseParen),
                _ => return Err(Error::UnexpectedChar(c, offset)),
            }
        }
    }
    return Ok(tokens);
}

/// Left and right binding powers for precedence climbing. A gap is left
/// between multiplication and `**` for unary minus, which binds tighter than
/// a product but looser than a power.
fn binding_power(op: BinaryOp) -> (u8, u8) {
    match op {
        Add | Subtract => (1, 2),
        Multiply | Divide => (3, 4),
        Pow => (8, 7), // Right associative.
    }
}

const UNARY_MINUS_PRECEDENCE: u8 = 5;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        return token;
    }

    fn expression(&mut self, min_bp: u8) -> MaybeTree {
        let mut lhs = self.primary()?;
        while let Some(Token::Operator(op)) = self.peek() {
            let op = *op;
            let (lbp, rbp) = binding_power(op);
            if lbp < min_bp {
                break;
            }
            self.pos += 1;
            let rhs = self.expression(rbp);
            lhs = match op {
                Add => add(Ok(lhs), rhs),
                Subtract => sub(Ok(lhs), rhs),
                Multiply => mul(Ok(lhs), rhs),
                Divide => div(Ok(lhs), rhs),
                Pow => pow(Ok(lhs), rhs),
            }?;
        }
        return Ok(lhs);
    }

    fn primary(&mut self) -> MaybeTree {
        match self.next() {
            Some(Token::Number(val)) => Ok(Tree::constant(val)),
            Some(Token::Ident(name)) => {
                if let Some(Token::OpenParen) = self.peek() {
                    self.pos += 1;
                    let arg = self.expression(0);
                    let call = match name.as_str() {
                        "sin" => sin(arg),
                        "cos" => cos(arg),
                        _ => Err(Error::UnknownFunction(name)),
                    };
                    self.expect_close()?;
                    call
                } else {
                    let mut labels = name.chars();
                    match (labels.next(), labels.next()) {
                        (Some(label), None) => Ok(Tree::symbol(label)),
                        _ => Err(Error::UnexpectedToken(name)),
                    }
                }
            }
            Some(Token::Operator(Subtract)) => {
                // Unary minus. A negated literal stays a single constant
                // node; anything else becomes a multiplication by -1.
                match self.peek() {
                    Some(Token::Number(val)) => {
                        let val = *val;
                        self.pos += 1;
                        Ok(Tree::constant(-val))
                    }
                    _ => mul(
                        Ok(Tree::constant(-1.)),
                        self.expression(UNARY_MINUS_PRECEDENCE),
                    ),
                }
            }
            Some(Token::OpenParen) => {
                let inner = self.expression(0)?;
                self.expect_close()?;
                Ok(inner)
            }
            Some(token) => Err(Error::UnexpectedToken(describe(&token))),
            None => Err(Error::UnexpectedEndOfInput),
        }
    }

    fn expect_close(&mut self) -> Result<(), Error> {
        match self.next() {
            Some(Token::CloseParen) => Ok(()),
            Some(token) => Err(Error::UnexpectedToken(describe(&token))),
            None => Err(Error::UnexpectedEndOfInput),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(val) => val.to_string(),
        Token::Ident(name) => name.clone(),
        Token::Operator(op) => op.symbol().to_string(),
        Token::OpenParen => "(".to_string(),
        Token::CloseParen => ")".to_string(),
    }
}
