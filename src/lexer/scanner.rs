use crate::lexer::{classify, LexError, Token, TokenKind};
use log::trace;

/// Position of the scanner's character machine within the current lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    InIdentifier,
    InInteger,
    InReal,
    InString,
    InComment,
}

/// Character-driven scanner producing one token per call.
///
/// The line counter is zero-based and counts every newline consumed,
/// including those inside comments and unterminated strings.
pub struct Scanner {
    input: String,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            current: 0,
            line: 0,
        }
    }

    /// Newlines consumed so far
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next token. Once input is exhausted every call returns
    /// the end-of-input token.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        trace!("line {}: {} {:?}", token.line + 1, token.kind, token.lexeme);
        token
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.current..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn scan_token(&mut self) -> Token {
        let mut state = ScanState::Start;
        let mut lexeme = String::new();
        let mut start_line = self.line;

        // Terminators of identifier and number states are peeked, never
        // consumed, so they are seen again by the next call.
        while let Some(ch) = self.peek() {
            match state {
                ScanState::Start => {
                    self.advance();
                    if ch.is_whitespace() {
                        continue;
                    }
                    start_line = self.line;
                    match ch {
                        c if c.is_ascii_digit() => {
                            lexeme.push(c);
                            state = ScanState::InInteger;
                        }
                        c if is_identifier_start(c) => {
                            lexeme.push(c);
                            state = ScanState::InIdentifier;
                        }
                        '\'' => state = ScanState::InString,
                        '{' => state = ScanState::InComment,
                        c => return self.scan_symbol(c, start_line),
                    }
                }
                ScanState::InIdentifier => {
                    if !is_identifier_char(ch) {
                        return classify(&lexeme, start_line);
                    }
                    self.advance();
                    lexeme.push(ch);
                }
                ScanState::InInteger => match ch {
                    '0'..='9' => {
                        self.advance();
                        lexeme.push(ch);
                    }
                    '.' => {
                        self.advance();
                        lexeme.push(ch);
                        state = ScanState::InReal;
                    }
                    _ => return Token::new(TokenKind::IntConst, lexeme, start_line),
                },
                ScanState::InReal => match ch {
                    '0'..='9' => {
                        self.advance();
                        lexeme.push(ch);
                    }
                    '.' => {
                        self.advance();
                        lexeme.push(ch);
                        return Token::new(TokenKind::Error(LexError::MalformedReal), lexeme, start_line);
                    }
                    _ => return Token::new(TokenKind::RealConst, lexeme, start_line),
                },
                ScanState::InString => {
                    self.advance();
                    match ch {
                        '\'' => return Token::new(TokenKind::StringConst, lexeme, start_line),
                        '\n' => {
                            return Token::new(
                                TokenKind::Error(LexError::UnterminatedString),
                                format!("'{lexeme}"),
                                start_line,
                            )
                        }
                        c => lexeme.push(c),
                    }
                }
                ScanState::InComment => {
                    self.advance();
                    if ch == '}' {
                        state = ScanState::Start;
                    }
                }
            }
        }

        debug_assert!(self.is_at_end());
        match state {
            ScanState::Start => Token::eof(self.line),
            ScanState::InIdentifier => classify(&lexeme, start_line),
            ScanState::InInteger => Token::new(TokenKind::IntConst, lexeme, start_line),
            ScanState::InReal => Token::new(TokenKind::RealConst, lexeme, start_line),
            ScanState::InString => Token::new(
                TokenKind::Error(LexError::UnterminatedString),
                format!("'{lexeme}"),
                start_line,
            ),
            ScanState::InComment => {
                Token::new(TokenKind::Error(LexError::UnterminatedComment), "{", start_line)
            }
        }
    }

    /// Operators and delimiters; `:` is the only one that looks ahead.
    fn scan_symbol(&mut self, ch: char, line: usize) -> Token {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Mult,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equal,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' => {
                if self.match_char('=') {
                    return Token::new(TokenKind::Assign, ":=", line);
                }
                TokenKind::Colon
            }
            other => TokenKind::Error(LexError::UnrecognizedChar(other)),
        };
        Token::new(kind, ch.to_string(), line)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

/// Scan the whole input, ending with (and including) the end-of-input token
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
