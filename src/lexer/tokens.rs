use crate::lexer::LexError;
use std::fmt;

/// Reserved words that introduce or structure program sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Program,
    Var,
    Begin,
    End,
    If,
    Then,
    Else,
    Write,
    Writeln,
    Integer,
    Real,
    Boolean,
    String,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Keyword::Program => "PROGRAM",
            Keyword::Var => "VAR",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::Write => "WRITE",
            Keyword::Writeln => "WRITELN",
            Keyword::Integer => "INTEGER",
            Keyword::Real => "REAL",
            Keyword::Boolean => "BOOLEAN",
            Keyword::String => "STRING",
        };
        write!(f, "{s}")
    }
}

/// Declarable variable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Integer,
    Real,
    Boolean,
    String,
}

impl VarType {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Integer => Some(VarType::Integer),
            Keyword::Real => Some(VarType::Real),
            Keyword::Boolean => Some(VarType::Boolean),
            Keyword::String => Some(VarType::String),
            _ => None,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            VarType::Integer => "integer",
            VarType::Real => "real",
            VarType::Boolean => "boolean",
            VarType::String => "string",
        };
        write!(f, "{s}")
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,

    // Constants; the value lives in the lexeme
    IntConst,
    RealConst,
    StringConst,
    BoolConst,

    Keyword(Keyword),

    // Arithmetic operators
    Plus,               // +
    Minus,              // -
    Mult,               // *
    Slash,              // /
    IntDiv,             // div
    Mod,                // mod

    Assign,             // :=

    // Relational operators
    Equal,              // =
    Greater,            // >
    Less,               // <

    // Logical operators
    And,
    Or,
    Not,

    // Delimiters
    Comma,              // ,
    Semicolon,          // ;
    OpenParen,          // (
    CloseParen,         // )
    Dot,                // .
    Colon,              // :

    Error(LexError),
    Eof,
}

impl TokenKind {
    /// Kinds whose lexeme is shown in token listings
    #[must_use]
    pub fn shows_lexeme(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntConst
                | TokenKind::RealConst
                | TokenKind::StringConst
                | TokenKind::BoolConst
        )
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "IDENT"),
            TokenKind::IntConst => write!(f, "ICONST"),
            TokenKind::RealConst => write!(f, "RCONST"),
            TokenKind::StringConst => write!(f, "SCONST"),
            TokenKind::BoolConst => write!(f, "BCONST"),
            TokenKind::Keyword(kw) => write!(f, "{kw}"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Mult => write!(f, "MULT"),
            TokenKind::Slash => write!(f, "DIV"),
            TokenKind::IntDiv => write!(f, "IDIV"),
            TokenKind::Mod => write!(f, "MOD"),
            TokenKind::Assign => write!(f, "ASSOP"),
            TokenKind::Equal => write!(f, "EQ"),
            TokenKind::Greater => write!(f, "GTHAN"),
            TokenKind::Less => write!(f, "LTHAN"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Semicolon => write!(f, "SEMICOL"),
            TokenKind::OpenParen => write!(f, "LPAREN"),
            TokenKind::CloseParen => write!(f, "RPAREN"),
            TokenKind::Dot => write!(f, "DOT"),
            TokenKind::Colon => write!(f, "COLON"),
            TokenKind::Error(_) => write!(f, "ERR"),
            TokenKind::Eof => write!(f, "DONE"),
        }
    }
}

/// A lexical item: kind, raw lexeme and the zero-based line it was read on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }

    #[must_use]
    pub fn is(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Listing form used by the `lex` command
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            TokenKind::Error(_) => write!(
                f,
                "Error in line {}: Unrecognized Lexeme {{{}}}",
                self.line + 1,
                self.lexeme
            ),
            kind if kind.shows_lexeme() => write!(f, "{kind}: \"{}\"", self.lexeme),
            kind => write!(f, "{kind}"),
        }
    }
}
