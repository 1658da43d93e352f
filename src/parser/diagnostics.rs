use crate::parser::ParseError;
use std::fmt;
use std::io::{self, Write};

/// A reported problem and the zero-based line the scanner was on
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub error: ParseError,
}

/// Printed as `line: message`, one-based, with the raw lexeme of a
/// malformed token on the following line in parentheses.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.line + 1, self.error)?;
        if let Some(lexeme) = self.error.offending_lexeme() {
            write!(f, "\n({lexeme})")?;
        }
        Ok(())
    }
}

/// Diagnostics of a single parse run, in the order they were reported
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, error: ParseError) {
        log::debug!("diagnostic on line {}: {}", line + 1, error);
        self.reported.push(Diagnostic { line, error });
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.reported.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.reported.iter()
    }

    /// Write every diagnostic, one per line
    /// # Errors
    /// If writing to `out` fails
    pub fn emit(&self, out: &mut impl Write) -> io::Result<()> {
        for diagnostic in &self.reported {
            writeln!(out, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexError;

    #[test]
    fn test_display_is_one_based() {
        let diagnostic = Diagnostic {
            line: 4,
            error: ParseError::missing("Right Parenthesis", ";"),
        };
        assert_eq!(diagnostic.to_string(), "5: Missing Right Parenthesis.");
    }

    #[test]
    fn test_display_appends_lexeme() {
        let diagnostic = Diagnostic {
            line: 0,
            error: ParseError::UnrecognizedInput {
                lexeme: "1.2.".to_string(),
                cause: Some(LexError::MalformedReal),
            },
        };
        assert_eq!(diagnostic.to_string(), "1: Unrecognized Input Pattern\n(1.2.)");
    }

    #[test]
    fn test_count_and_emit() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.report(0, ParseError::UndeclaredVariable("y".to_string()));
        diagnostics.report(2, ParseError::Context("Incorrect Statement."));
        assert_eq!(diagnostics.error_count(), 2);

        let mut out = Vec::new();
        diagnostics.emit(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1: Undeclared Variable: y\n3: Incorrect Statement.\n"
        );
    }
}
