use crate::lexer::{Keyword, Token, TokenKind, VarType};
use crate::parser::expressions::{ParseResult, Parser};
use crate::parser::{Declaration, ParseError, Program};
use log::{debug, info};

impl Parser {
    /// Program ::= "program" IDENT ";" DeclPart CompoundStmt
    ///
    /// A `.` after the body is consumed if present; nothing after the body
    /// is inspected otherwise.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        info!("beginning parse");

        self.expect(&TokenKind::Keyword(Keyword::Program), "Program Keyword")?;
        let name = self.expect(&TokenKind::Identifier, "Program Name")?.lexeme;
        self.expect(&TokenKind::Semicolon, "semicolon after program name")?;

        let declarations = self.parse_declaration_part();
        let declarations = self.context(declarations, "Incorrect Declaration Section.")?;

        let body = self.parse_compound_statement();
        let body = self.context(body, "Incorrect Program Body.")?;

        let token = self.next();
        if token.kind != TokenKind::Dot {
            self.push_back(token);
        }

        info!(
            "parsed program '{}': {} declarations, {} statements",
            name,
            declarations.len(),
            body.statements.len()
        );
        Ok(Program {
            name,
            declarations,
            body,
        })
    }

    /// DeclPart ::= "var" DeclStmt ";" { DeclStmt ";" }
    pub(crate) fn parse_declaration_part(&mut self) -> ParseResult<Vec<Declaration>> {
        self.expect(&TokenKind::Keyword(Keyword::Var), "Var keyword")?;

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_declaration()?);
            self.expect(&TokenKind::Semicolon, "semicolon at end of declaration")?;

            let token = self.next();
            match token.kind {
                TokenKind::Identifier => self.push_back(token),
                TokenKind::Error(_) => return self.unrecognized(token),
                _ => {
                    self.push_back(token);
                    return Ok(declarations);
                }
            }
        }
    }

    /// DeclStmt ::= IDENT {"," IDENT} ":" Type [":=" Expr]
    ///
    /// Each name is entered into the symbol table as soon as it is read, so
    /// a repeat within one list is reported as a redeclaration.
    fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let mut names = Vec::new();
        let mut line = None;

        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Identifier => {
                    line.get_or_insert(token.line);
                    self.declare_name(&token)?;
                    names.push(token.lexeme);
                }
                TokenKind::Error(_) => return self.unrecognized(token),
                _ => return self.fail(ParseError::missing("identifier in declaration statement", &token.lexeme)),
            }

            let token = self.next();
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::Colon => break,
                TokenKind::Error(_) => return self.unrecognized(token),
                _ => return self.fail(ParseError::missing("comma in declaration statement", &token.lexeme)),
            }
        }

        let var_type = self.parse_type()?;
        for name in &names {
            self.symbols.set_type(name, var_type);
        }
        debug!("declared {} as {}", names.join(", "), var_type);

        let token = self.next();
        let initializer = if token.kind == TokenKind::Assign {
            let value = self.parse_expression();
            Some(self.context(value, "Incorrect initialization expression.")?)
        } else {
            self.push_back(token);
            None
        };

        Ok(Declaration {
            names,
            var_type,
            initializer,
            line: line.unwrap_or_default(),
        })
    }

    fn declare_name(&mut self, token: &Token) -> ParseResult<()> {
        match self.symbols.reserve(&token.lexeme, token.line) {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!("{err}");
                self.fail(ParseError::Redeclared(err.name))
            }
        }
    }

    /// Type ::= "integer" | "real" | "boolean" | "string"
    fn parse_type(&mut self) -> ParseResult<VarType> {
        let token = self.next();
        match token.kind {
            TokenKind::Keyword(keyword) => match VarType::from_keyword(keyword) {
                Some(var_type) => Ok(var_type),
                None => self.fail(ParseError::missing("declaration type", &token.lexeme)),
            },
            TokenKind::Error(_) => self.unrecognized(token),
            _ => self.fail(ParseError::missing("declaration type", &token.lexeme)),
        }
    }
}
