use crate::lexer::{Scanner, Token, TokenKind, TokenStream};
use crate::parser::{
    BinaryOp, ComparisonOp, Diagnostics, ExprKind, Expression, LiteralValue, ParseError, ParserOptions, UnaryOp,
};
use crate::symbol::SymbolTable;
use log::debug;

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser state for one compilation unit
pub struct Parser {
    tokens: TokenStream,
    pub(crate) symbols: SymbolTable,
    diagnostics: Diagnostics,
    options: ParserOptions,
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(source: &str, options: ParserOptions) -> Self {
        Self {
            tokens: TokenStream::new(Scanner::new(source)),
            symbols: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            options,
            depth: 0,
        }
    }

    #[must_use]
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn into_parts(self) -> (SymbolTable, Diagnostics) {
        (self.symbols, self.diagnostics)
    }

    pub(crate) fn next(&mut self) -> Token {
        self.tokens.get()
    }

    pub(crate) fn push_back(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    /// Record `error` against the current line and fail with it
    pub(crate) fn fail<T>(&mut self, error: ParseError) -> ParseResult<T> {
        self.diagnostics.report(self.tokens.line(), error.clone());
        Err(error)
    }

    /// Add a coarse diagnostic on top of a nested failure. The error
    /// passed up stays the nested (primary) one.
    pub(crate) fn context<T>(&mut self, result: ParseResult<T>, message: &'static str) -> ParseResult<T> {
        if result.is_err() {
            self.diagnostics.report(self.tokens.line(), ParseError::Context(message));
        }
        result
    }

    pub(crate) fn unrecognized<T>(&mut self, token: Token) -> ParseResult<T> {
        let cause = match token.kind {
            TokenKind::Error(cause) => {
                debug!("scanner error on line {}: {}", token.line + 1, cause);
                Some(cause)
            }
            _ => None,
        };
        self.fail(ParseError::UnrecognizedInput {
            lexeme: token.lexeme,
            cause,
        })
    }

    /// Consume a token of `kind` or report what was expected
    pub(crate) fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> ParseResult<Token> {
        let token = self.next();
        if token.is(kind) {
            Ok(token)
        } else if token.kind.is_error() {
            self.unrecognized(token)
        } else {
            self.fail(ParseError::missing(expected, &token.lexeme))
        }
    }

    /// Run a rule one nesting level deeper
    pub(crate) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.options.max_depth {
            return self.fail(ParseError::NestingTooDeep(self.options.max_depth));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Expr ::= LogAndExpr {"or" LogAndExpr}
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_and_expression, &[(TokenKind::Or, BinaryOp::Or)])
    }

    /// LogAndExpr ::= RelExpr {"and" RelExpr}
    fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(Self::parse_relational, &[(TokenKind::And, BinaryOp::And)])
    }

    /// RelExpr ::= SimpleExpr [("=" | "<" | ">") SimpleExpr]
    fn parse_relational(&mut self) -> ParseResult<Expression> {
        let left = self.parse_simple_expression()?;

        let token = self.next();
        let op = match token.kind {
            TokenKind::Equal => ComparisonOp::Equal,
            TokenKind::Less => ComparisonOp::Less,
            TokenKind::Greater => ComparisonOp::Greater,
            TokenKind::Error(_) => return self.unrecognized(token),
            _ => {
                self.push_back(token);
                return Ok(left);
            }
        };

        let right = self.parse_simple_expression()?;
        let line = left.line;
        Ok(Expression::new(
            ExprKind::Comparison {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            line,
        ))
    }

    /// SimpleExpr ::= Term {("+" | "-") Term}
    fn parse_simple_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(
            Self::parse_term,
            &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
        )
    }

    /// Term ::= SFactor {("*" | "/" | "div" | "mod") SFactor}
    fn parse_term(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(
            Self::parse_signed_factor,
            &[
                (TokenKind::Mult, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::IntDiv, BinaryOp::IntDiv),
                (TokenKind::Mod, BinaryOp::Mod),
            ],
        )
    }

    /// Left-associative operand loop shared by every binary level. The
    /// first token that is not one of `operators` is pushed back.
    fn parse_binary_level<F>(&mut self, next_level: F, operators: &[(TokenKind, BinaryOp)]) -> ParseResult<Expression>
    where
        F: Fn(&mut Self) -> ParseResult<Expression>,
    {
        let mut left = next_level(self)?;

        loop {
            let token = self.next();
            if token.kind.is_error() {
                return self.unrecognized(token);
            }
            let Some(op) = operators
                .iter()
                .find(|(kind, _)| *kind == token.kind)
                .map(|(_, op)| *op)
            else {
                self.push_back(token);
                return Ok(left);
            };

            let right = next_level(self)?;
            let line = left.line;
            left = Expression::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                line,
            );
        }
    }

    /// SFactor ::= ["+" | "-" | "not"] Factor
    fn parse_signed_factor(&mut self) -> ParseResult<Expression> {
        let token = self.next();
        let sign = match token.kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => {
                self.push_back(token);
                None
            }
        };
        self.parse_factor(sign)
    }

    /// Factor ::= IDENT | ICONST | RCONST | SCONST | BCONST | "(" Expr ")"
    ///
    /// Identifiers and strings take no sign, numbers take `+`/`-` only
    /// and booleans take `not` only.
    fn parse_factor(&mut self, sign: Option<UnaryOp>) -> ParseResult<Expression> {
        let token = self.next();
        let line = token.line;

        let operand = match token.kind {
            TokenKind::Identifier => {
                if let Some(op) = sign {
                    return self.fail(ParseError::SignedIdentifier { op, name: token.lexeme });
                }
                if !self.symbols.is_declared(&token.lexeme) {
                    return self.fail(ParseError::UndeclaredVariable(token.lexeme));
                }
                ExprKind::Variable(token.lexeme)
            }
            TokenKind::IntConst | TokenKind::RealConst => {
                if sign == Some(UnaryOp::Not) {
                    return self.fail(ParseError::NotOnNumber);
                }
                let value = if token.kind == TokenKind::IntConst {
                    token.lexeme.parse().map(LiteralValue::Integer).ok()
                } else {
                    token.lexeme.parse().map(LiteralValue::Real).ok()
                };
                match value {
                    Some(value) => ExprKind::Literal(value),
                    None => return self.unrecognized(token),
                }
            }
            TokenKind::StringConst => {
                if let Some(op) = sign {
                    return self.fail(ParseError::SignedString(op));
                }
                ExprKind::Literal(LiteralValue::String(token.lexeme))
            }
            TokenKind::BoolConst => {
                if let Some(op @ (UnaryOp::Plus | UnaryOp::Minus)) = sign {
                    return self.fail(ParseError::SignedBoolean(op));
                }
                ExprKind::Literal(LiteralValue::Boolean(token.lexeme.eq_ignore_ascii_case("true")))
            }
            TokenKind::OpenParen => {
                let inner = self.nested(Self::parse_expression)?;
                self.expect(&TokenKind::CloseParen, "right parenthesis after expression")?;
                inner.kind
            }
            TokenKind::Error(_) => return self.unrecognized(token),
            _ => return self.fail(ParseError::missing("operand", &token.lexeme)),
        };

        let factor = Expression::new(operand, line);
        Ok(match sign {
            Some(op) => Expression::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(factor),
                },
                line,
            ),
            None => factor,
        })
    }
}
