use crate::lexer::{Scanner, Token};

/// One-token pushback slot
#[derive(Debug, Default)]
enum Pushback {
    #[default]
    Empty,
    Holding(Token),
}

/// Scanner wrapper that gives the parser one token of lookahead
pub struct TokenStream {
    scanner: Scanner,
    pending: Pushback,
}

impl TokenStream {
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            pending: Pushback::Empty,
        }
    }

    /// Take the pushed-back token if there is one, otherwise scan a new one
    pub fn get(&mut self) -> Token {
        match std::mem::take(&mut self.pending) {
            Pushback::Holding(token) => token,
            Pushback::Empty => self.scanner.next_token(),
        }
    }

    /// Return a token to be delivered by the next `get`.
    ///
    /// # Panics
    /// If a token is already pending. The grammar must consume between
    /// two lookaheads, so this is a parser bug rather than a source error.
    pub fn push_back(&mut self, token: Token) {
        if let Pushback::Holding(held) = &self.pending {
            panic!(
                "token pushback while '{}' (line {}) is already pending",
                held.lexeme,
                held.line + 1
            );
        }
        self.pending = Pushback::Holding(token);
    }

    /// Current line of the underlying scanner
    #[must_use]
    pub fn line(&self) -> usize {
        self.scanner.line()
    }
}
