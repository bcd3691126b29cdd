//! The expression translator: the equation notation, its tokenizer, the two
//! line grammars, and the [`Formula`] they produce.

pub mod expr;
pub mod formula;
pub mod lexer;
pub mod translator;

pub use expr::Expr;
pub use formula::{Equation, Formula};
pub use translator::{Grammar, Translator};
