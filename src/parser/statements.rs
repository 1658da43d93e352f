use crate::lexer::{Keyword, TokenKind};
use crate::parser::expressions::{ParseResult, Parser};
use crate::parser::{Block, Expression, ParseError, Statement, StatementKind};
use log::debug;

impl Parser {
    /// CompoundStmt ::= "begin" Stmt {";" Stmt} "end"
    pub(crate) fn parse_compound_statement(&mut self) -> ParseResult<Block> {
        let begin = self.expect(&TokenKind::Keyword(Keyword::Begin), "begin keyword")?;
        debug!("compound statement on line {}", begin.line + 1);

        let mut statements = vec![self.parse_statement()?];

        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Semicolon => statements.push(self.parse_statement()?),
                TokenKind::Keyword(Keyword::End) => {
                    return Ok(Block {
                        statements,
                        line: begin.line,
                    })
                }
                TokenKind::Error(_) => return self.unrecognized(token),
                _ => return self.fail(ParseError::missing("end of compound statement", &token.lexeme)),
            }
        }
    }

    /// Stmt ::= SimpleStmt | StructuredStmt
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(|parser| {
            let token = parser.next();
            let structured = token.is_keyword(Keyword::Begin) || token.is_keyword(Keyword::If);
            parser.push_back(token);

            if structured {
                let statement = parser.parse_structured_statement();
                parser.context(statement, "Incorrect Structured Statement.")
            } else {
                let statement = parser.parse_simple_statement();
                parser.context(statement, "Incorrect Simple Statement.")
            }
        })
    }

    /// StructuredStmt ::= IfStmt | CompoundStmt
    fn parse_structured_statement(&mut self) -> ParseResult<Statement> {
        let token = self.next();
        let line = token.line;

        if token.is_keyword(Keyword::If) {
            return self.parse_if_statement(line);
        }
        self.push_back(token);
        let block = self.parse_compound_statement()?;
        Ok(Statement::new(StatementKind::Compound(block), line))
    }

    /// SimpleStmt ::= AssignStmt | "write" "(" ExprList ")" | "writeln" "(" ExprList ")"
    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        let token = self.next();
        let line = token.line;

        match token.kind {
            TokenKind::Identifier => {
                self.push_back(token);
                self.parse_assignment_statement(line)
            }
            TokenKind::Keyword(Keyword::Write) => self.parse_write_statement(false, line),
            TokenKind::Keyword(Keyword::Writeln) => self.parse_write_statement(true, line),
            TokenKind::Error(_) => self.unrecognized(token),
            _ => self.fail(ParseError::missing("statement", &token.lexeme)),
        }
    }

    /// IfStmt ::= "if" Expr "then" Stmt ["else" Stmt], with `if` consumed
    fn parse_if_statement(&mut self, line: usize) -> ParseResult<Statement> {
        let condition = self.parse_expression();
        let condition = self.context(condition, "Missing if statement condition.")?;

        self.expect(&TokenKind::Keyword(Keyword::Then), "then keyword in if statement")?;
        let then_branch = self.parse_statement()?;

        let token = self.next();
        let else_branch = if token.is_keyword(Keyword::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            self.push_back(token);
            None
        };

        Ok(Statement::new(
            StatementKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch,
            },
            line,
        ))
    }

    /// AssignStmt ::= Var ":=" Expr
    fn parse_assignment_statement(&mut self, line: usize) -> ParseResult<Statement> {
        let target = self.parse_variable()?;
        self.expect(&TokenKind::Assign, "assignment operator")?;

        let value = self.parse_expression();
        let value = self.context(value, "Missing Expression in Assignment Statement.")?;

        Ok(Statement::new(StatementKind::Assign { target, value }, line))
    }

    /// Var ::= IDENT, which must already be declared
    fn parse_variable(&mut self) -> ParseResult<String> {
        let token = self.next();
        match token.kind {
            TokenKind::Identifier if self.symbols.is_declared(&token.lexeme) => Ok(token.lexeme),
            TokenKind::Identifier => self.fail(ParseError::UndeclaredVariable(token.lexeme)),
            TokenKind::Error(_) => self.unrecognized(token),
            _ => self.fail(ParseError::missing("variable name", &token.lexeme)),
        }
    }

    /// "write" / "writeln" "(" ExprList ")", with the keyword consumed
    fn parse_write_statement(&mut self, newline: bool, line: usize) -> ParseResult<Statement> {
        self.expect(&TokenKind::OpenParen, "Left Parenthesis")?;

        let args = self.parse_expression_list();
        let args = self.context(
            args,
            if newline {
                "Missing expression list for WriteLn statement."
            } else {
                "Missing expression list for Write statement."
            },
        )?;

        self.expect(&TokenKind::CloseParen, "Right Parenthesis")?;

        Ok(Statement::new(StatementKind::Write { newline, args }, line))
    }

    /// ExprList ::= Expr {"," Expr}
    pub(crate) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut list = vec![self.parse_expression()?];

        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Comma => list.push(self.parse_expression()?),
                TokenKind::Error(_) => return self.unrecognized(token),
                _ => {
                    self.push_back(token);
                    return Ok(list);
                }
            }
        }
    }
}
