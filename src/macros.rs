/// Construct a tree from the lisp expression.
#[macro_export]
macro_rules! deftree {
    () => {}; // empty;
    (($($a:tt)*)) => { // Unwrap redundant parens.
        $crate::deftree!($($a)*)
    };
    ($a:block) => { // Block expressions.
        $a
    };
    // Derivatives.
    (deriv $tree:tt $param:ident) => {{
        const LABEL: &str = {stringify!($param)};
        const {assert!(LABEL.len() == 1, "Symbols can only have a single character as an identifier.")};
        $crate::derivative::derivative($crate::deftree!($tree), LABEL.chars().next().unwrap())
    }};
    // Constants.
    (const $tt:expr) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok(({$tt}).into());
        out
    }};
    // Unary ops with function names.
    ($unary_op:ident $a:tt) => {
        $crate::$unary_op($crate::deftree!($a))
    };
    // Binary ops with function names.
    ($binary_op:ident $a:tt $b:tt) => {
        $crate::$binary_op($crate::deftree!($a), $crate::deftree!($b))
    };
    // Operators.
    (- $a:tt $b:tt) => {
        $crate::sub($crate::deftree!($a), $crate::deftree!($b))
    };
    (+ $a:tt $b:tt) => {
        $crate::add($crate::deftree!($a), $crate::deftree!($b))
    };
    (/ $a:tt $b:tt) => {
        $crate::div($crate::deftree!($a), $crate::deftree!($b))
    };
    (* $a:tt $b:tt) => {
        $crate::mul($crate::deftree!($a), $crate::deftree!($b))
    };
    // Constants
    ($a:literal) => {{
        let out: Result<$crate::Tree, $crate::Error> = Ok(($a).into());
        out
    }};
    // Symbols
    ($a:ident) => {{
        const LABEL: &str = {stringify!($a)};
        const {assert!(LABEL.len() == 1, "Symbols can only have a single character as an identifier.")};
        let out: Result<$crate::Tree, $crate::Error> = Ok($crate::Tree::symbol(LABEL.chars().next().unwrap()));
        out
    }};
}
