pub mod ast;
pub mod declarations;
pub mod diagnostics;
pub mod errors;
pub mod expressions;
pub mod statements;

pub use ast::*;
pub use diagnostics::*;
pub use errors::*;
pub use expressions::{ParseResult, Parser};

use crate::symbol::SymbolTable;

/// Nesting limit applied when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest statement/parenthesis nesting accepted before reporting an
    /// error instead of recursing further
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Everything a parse run produces
#[derive(Debug)]
pub struct ParseOutcome {
    /// Present when the whole program was accepted
    pub program: Option<Program>,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

impl ParseOutcome {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.program.is_some() && self.diagnostics.is_empty()
    }
}

/// Parse one compilation unit with default options
pub fn parse(source: &str) -> ParseOutcome {
    parse_with(source, ParserOptions::default())
}

/// Parse one compilation unit. Each call starts from a fresh symbol table
/// and diagnostics list.
pub fn parse_with(source: &str, options: ParserOptions) -> ParseOutcome {
    let mut parser = Parser::new(source, options);
    let program = parser.parse_program().ok();
    let (symbols, diagnostics) = parser.into_parts();
    ParseOutcome {
        program,
        symbols,
        diagnostics,
    }
}
