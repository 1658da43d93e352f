use crate::lexer::{Keyword, Token, TokenKind};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Reserved words keyed by their upper-case spelling. `TRUE` and `FALSE`
/// share the table but classify as boolean constants, not keywords.
fn keyword_table() -> &'static HashMap<&'static str, TokenKind> {
    static TABLE: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("PROGRAM", TokenKind::Keyword(Keyword::Program)),
            ("VAR", TokenKind::Keyword(Keyword::Var)),
            ("BEGIN", TokenKind::Keyword(Keyword::Begin)),
            ("END", TokenKind::Keyword(Keyword::End)),
            ("IF", TokenKind::Keyword(Keyword::If)),
            ("THEN", TokenKind::Keyword(Keyword::Then)),
            ("ELSE", TokenKind::Keyword(Keyword::Else)),
            ("WRITE", TokenKind::Keyword(Keyword::Write)),
            ("WRITELN", TokenKind::Keyword(Keyword::Writeln)),
            ("INTEGER", TokenKind::Keyword(Keyword::Integer)),
            ("REAL", TokenKind::Keyword(Keyword::Real)),
            ("BOOLEAN", TokenKind::Keyword(Keyword::Boolean)),
            ("STRING", TokenKind::Keyword(Keyword::String)),
            ("DIV", TokenKind::IntDiv),
            ("MOD", TokenKind::Mod),
            ("AND", TokenKind::And),
            ("OR", TokenKind::Or),
            ("NOT", TokenKind::Not),
            ("TRUE", TokenKind::BoolConst),
            ("FALSE", TokenKind::BoolConst),
        ])
    })
}

/// Resolve identifier-shaped text to a keyword, operator word, boolean
/// constant or plain identifier. Matching ignores case; the returned token
/// keeps the lexeme exactly as written.
pub fn classify(lexeme: &str, line: usize) -> Token {
    let kind = keyword_table()
        .get(lexeme.to_ascii_uppercase().as_str())
        .cloned()
        .unwrap_or(TokenKind::Identifier);
    Token::new(kind, lexeme, line)
}
