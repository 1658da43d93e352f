//! Front end for a small Pascal-like language
//!
//! A character-state-machine scanner feeding a recursive-descent parser
//! that checks programs against the grammar, tracks declared variables and
//! reports diagnostics.

pub mod lexer;
pub mod parser;
pub mod symbol;

pub use lexer::*;
pub use parser::*;
pub use symbol::*;
