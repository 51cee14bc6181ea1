//! Recursive-descent parser producing the APBL syntax tree.
//!
//! Precedence, lowest first: comparisons (non-associative), `+ -`, `* /`.
//! After a syntax error the parser skips to the next statement boundary and
//! carries on, so a single pass can report several errors.
//!
//! Nesting (parentheses, calls, blocks and operator chains) is capped at
//! [`MAX_NESTING`] levels so the tree stays shallow enough to walk and drop.

use thiserror::Error;

use super::ast::{BinOp, Call, Expr, Param, Program, Stmt, TypeName};
use super::token::{Token, TokenKind};

pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}, token={kind}, value={value}")]
    UnexpectedToken {
        line: usize,
        kind: TokenKind,
        value: String,
    },
    #[error("Syntax error at EOF")]
    UnexpectedEof,
    #[error("Syntax error at line {line}, nesting too deep")]
    TooDeep { line: usize },
}

impl ParseError {
    /// Line of the offending token; `None` at end of input.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { line, .. } | ParseError::TooDeep { line } => {
                Some(*line)
            }
            ParseError::UnexpectedEof => None,
        }
    }
}

pub fn parse(tokens: &[Token]) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(tokens);
    let statements = parser.statements_until(None);
    if statements.is_empty() && parser.errors.is_empty() {
        parser.errors.push(ParseError::UnexpectedEof);
    }
    if parser.errors.is_empty() {
        Ok(Program { statements })
    } else {
        Err(parser.errors)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    errors: Vec<ParseError>,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::UnexpectedToken {
                line: t.line,
                kind: t.kind,
                value: t.text(),
            },
            None => ParseError::UnexpectedEof,
        }
    }

    /// Enters one nesting level, failing once [`MAX_NESTING`] is reached.
    fn descend(&mut self) -> PResult<()> {
        if self.depth >= MAX_NESTING {
            let line = self
                .peek()
                .or_else(|| self.tokens.last())
                .map_or(1, |t| t.line);
            return Err(ParseError::TooDeep { line });
        }
        self.depth += 1;
        Ok(())
    }

    /// End of input is recorded once, however many open constructs it cuts off.
    fn record(&mut self, error: ParseError) {
        let repeated_eof = error == ParseError::UnexpectedEof
            && self.errors.last() == Some(&ParseError::UnexpectedEof);
        if !repeated_eof {
            self.errors.push(error);
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<&'a Token> {
        match self.peek() {
            Some(t) if t.kind == kind => {
                self.pos += 1;
                Ok(t)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parses statements until `end` (not consumed) or end of input,
    /// recording errors and resynchronising after each failure.
    fn statements_until(&mut self, end: Option<TokenKind>) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if Some(kind) == end {
                break;
            }
            let start = self.pos;
            let depth = self.depth;
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    tracing::debug!(error = %e, "recovering from syntax error");
                    self.record(e);
                    self.depth = depth;
                    self.synchronize(start);
                }
            }
        }
        statements
    }

    fn synchronize(&mut self, start: usize) {
        if self.pos == start {
            self.advance();
        }
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Eol => {
                    self.advance();
                    return;
                }
                TokenKind::RBracket => return,
                k if starts_statement(k) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn statement(&mut self) -> PResult<Stmt> {
        match self.peek_kind() {
            Some(k) if k.is_type() => self.declaration(),
            Some(TokenKind::Function) => self.function_def(),
            Some(TokenKind::If) => self.if_stmt(),
            Some(TokenKind::While) => self.while_stmt(),
            Some(TokenKind::Return) => self.return_stmt(),
            Some(TokenKind::Identifier) if self.peek_kind_at(1) == Some(TokenKind::Equals) => {
                self.assignment()
            }
            Some(k) if k.is_callable() => {
                let call = self.call()?;
                self.expect(TokenKind::Eol)?;
                Ok(Stmt::Call(call))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn type_name(&mut self) -> PResult<(TypeName, usize)> {
        let ty = match self.peek_kind() {
            Some(TokenKind::IntType) => TypeName::Int,
            Some(TokenKind::FloatType) => TypeName::Float,
            Some(TokenKind::StringType) => TypeName::String,
            Some(TokenKind::BoolType) => TypeName::Bool,
            Some(TokenKind::DateType) => TypeName::Date,
            Some(TokenKind::TimeType) => TypeName::Time,
            Some(TokenKind::Void) => TypeName::Void,
            _ => return Err(self.unexpected()),
        };
        let token = self.advance().ok_or(ParseError::UnexpectedEof)?;
        Ok((ty, token.line))
    }

    fn identifier(&mut self) -> PResult<String> {
        self.expect(TokenKind::Identifier).map(Token::text)
    }

    fn declaration(&mut self) -> PResult<Stmt> {
        let (var_type, line) = self.type_name()?;
        let name = self.identifier()?;
        self.expect(TokenKind::Equals)?;
        let value = self.expression()?;
        self.expect(TokenKind::Eol)?;
        Ok(Stmt::Declaration {
            var_type,
            name,
            value,
            line,
        })
    }

    fn assignment(&mut self) -> PResult<Stmt> {
        let target = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Equals)?;
        let value = self.expression()?;
        self.expect(TokenKind::Eol)?;
        Ok(Stmt::Assignment {
            target: target.text(),
            value,
            line: target.line,
        })
    }

    fn function_def(&mut self) -> PResult<Stmt> {
        let line = self.expect(TokenKind::Function)?.line;
        let (return_type, _) = self.type_name()?;
        let name = self.identifier()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.peek_kind() != Some(TokenKind::RParen) {
            loop {
                let (param_type, param_line) = self.type_name()?;
                let name = self.identifier()?;
                params.push(Param {
                    param_type,
                    name,
                    line: param_line,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        let body = self.block()?;
        Ok(Stmt::FunctionDef {
            return_type,
            name,
            params,
            body,
            line,
        })
    }

    fn block(&mut self) -> PResult<Vec<Stmt>> {
        self.expect(TokenKind::LBracket)?;
        self.descend()?;
        let statements = self.statements_until(Some(TokenKind::RBracket));
        self.expect(TokenKind::RBracket)?;
        self.depth -= 1;
        Ok(statements)
    }

    fn condition(&mut self) -> PResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let line = self.expect(TokenKind::If)?.line;
        let condition = self.condition()?;
        let then_block = self.block()?;
        let else_block = if self.eat(TokenKind::Else) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
            line,
        })
    }

    fn while_stmt(&mut self) -> PResult<Stmt> {
        let line = self.expect(TokenKind::While)?.line;
        let condition = self.condition()?;
        let body = self.block()?;
        Ok(Stmt::While {
            condition,
            body,
            line,
        })
    }

    fn return_stmt(&mut self) -> PResult<Stmt> {
        let line = self.expect(TokenKind::Return)?.line;
        let value = self.expression()?;
        self.expect(TokenKind::Eol)?;
        Ok(Stmt::Return { value, line })
    }

    fn call(&mut self) -> PResult<Call> {
        let callee = match self.peek() {
            Some(t) if t.kind.is_callable() => t,
            _ => return Err(self.unexpected()),
        };
        self.pos += 1;
        self.expect(TokenKind::LParen)?;
        self.descend()?;
        let mut arguments = Vec::new();
        if self.peek_kind() != Some(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        self.depth -= 1;
        Ok(Call {
            name: callee.text(),
            arguments,
            line: callee.line,
        })
    }

    fn expression(&mut self) -> PResult<Expr> {
        let left = self.additive()?;
        let Some(op) = self.peek_kind().and_then(comparison_op) else {
            return Ok(left);
        };
        let line = self.advance().map_or(left.line(), |t| t.line);
        let right = self.additive()?;
        if self.peek_kind().and_then(comparison_op).is_some() {
            return Err(self.unexpected());
        }
        Ok(Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        })
    }

    fn additive(&mut self) -> PResult<Expr> {
        let mut left = self.term()?;
        let depth = self.depth;
        while let Some(op) = self.peek_kind().and_then(additive_op) {
            self.descend()?;
            let line = self.advance().map_or(left.line(), |t| t.line);
            let right = self.term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }
        self.depth = depth;
        Ok(left)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut left = self.primary()?;
        let depth = self.depth;
        while let Some(op) = self.peek_kind().and_then(multiplicative_op) {
            self.descend()?;
            let line = self.advance().map_or(left.line(), |t| t.line);
            let right = self.primary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            };
        }
        self.depth = depth;
        Ok(left)
    }

    fn primary(&mut self) -> PResult<Expr> {
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedEof);
        };
        match token.kind {
            TokenKind::Number
            | TokenKind::FloatNum
            | TokenKind::StringLiteral
            | TokenKind::BooleanVal
            | TokenKind::DateVal
            | TokenKind::TimeVal => {
                self.pos += 1;
                Ok(Expr::Literal {
                    value: token.value.clone(),
                    line: token.line,
                })
            }
            TokenKind::Identifier if self.peek_kind_at(1) != Some(TokenKind::LParen) => {
                self.pos += 1;
                Ok(Expr::Identifier {
                    name: token.text(),
                    line: token.line,
                })
            }
            k if k.is_callable() => Ok(Expr::Call(self.call()?)),
            TokenKind::LParen => {
                self.descend()?;
                self.pos += 1;
                let inner = self.expression()?;
                self.expect(TokenKind::RParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => Err(self.unexpected()),
        }
    }
}

fn starts_statement(kind: TokenKind) -> bool {
    kind.is_type()
        || matches!(
            kind,
            TokenKind::Function | TokenKind::If | TokenKind::While | TokenKind::Return
        )
}

fn comparison_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Ge => Some(BinOp::Ge),
        TokenKind::Eq => Some(BinOp::Eq),
        TokenKind::Neq => Some(BinOp::Neq),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Times => Some(BinOp::Mul),
        TokenKind::Divide => Some(BinOp::Div),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apbl::lexer::tokenize;
    use crate::apbl::token::TokenValue;

    fn parse_src(source: &str) -> Result<Program, Vec<ParseError>> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn declaration_and_assignment() {
        let program = parse_src("int seats = 4.\nseats = seats - 1.").unwrap();
        assert_eq!(program.statements.len(), 2);
        match &program.statements[0] {
            Stmt::Declaration { var_type, name, value, line } => {
                assert_eq!(*var_type, TypeName::Int);
                assert_eq!(name, "seats");
                assert_eq!(*line, 1);
                assert!(matches!(value, Expr::Literal { value: TokenValue::Int(4), .. }));
            }
            other => panic!("unexpected statement {other:?}"),
        }
        assert!(matches!(&program.statements[1], Stmt::Assignment { target, line: 2, .. } if target == "seats"));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse_src("int x = 1 + 2 * 3.").unwrap();
        let Stmt::Declaration { value, .. } = &program.statements[0] else {
            panic!("expected declaration");
        };
        let Expr::BinaryOp { op, right, .. } = value else {
            panic!("expected binary op");
        };
        assert_eq!(*op, BinOp::Add);
        assert!(matches!(**right, Expr::BinaryOp { op: BinOp::Mul, .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let program = parse_src("int x = 10 - 4 - 3.").unwrap();
        let Stmt::Declaration { value: Expr::BinaryOp { op, left, .. }, .. } = &program.statements[0] else {
            panic!("expected binary declaration");
        };
        assert_eq!(*op, BinOp::Sub);
        assert!(matches!(**left, Expr::BinaryOp { op: BinOp::Sub, .. }));
    }

    #[test]
    fn chained_comparison_is_rejected() {
        let errors = parse_src("bool b = 1 < 2 < 3.").unwrap_err();
        assert_eq!(
            errors[0],
            ParseError::UnexpectedToken { line: 1, kind: TokenKind::Lt, value: "<".into() }
        );
    }

    #[test]
    fn function_definition_with_params_and_return() {
        let source = "function int total(int a, int b) [\n  return a + b.\n]";
        let program = parse_src(source).unwrap();
        let Stmt::FunctionDef { return_type, name, params, body, .. } = &program.statements[0] else {
            panic!("expected function");
        };
        assert_eq!(*return_type, TypeName::Int);
        assert_eq!(name, "total");
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].name, "b");
        assert!(matches!(&body[0], Stmt::Return { line: 2, .. }));
    }

    #[test]
    fn builtin_calls_as_statements_and_expressions() {
        let source = "string id = gen(\"alice\").\nbook(id, \"2024-06-01\", \"10:00:00\").";
        let program = parse_src(source).unwrap();
        let Stmt::Declaration { value: Expr::Call(call), .. } = &program.statements[0] else {
            panic!("expected call in declaration");
        };
        assert_eq!(call.name, "gen");
        let Stmt::Call(book) = &program.statements[1] else {
            panic!("expected call statement");
        };
        assert_eq!(book.arguments.len(), 3);
    }

    #[test]
    fn if_else_and_while() {
        let source = "if (x > 1) [ display(x). ] else [ x = 1. ]\nwhile (x < 10) [ x = x + 1. ]";
        let program = parse_src(source).unwrap();
        assert!(matches!(&program.statements[0], Stmt::If { else_block: Some(b), .. } if b.len() == 1));
        assert!(matches!(&program.statements[1], Stmt::While { line: 2, .. }));
    }

    #[test]
    fn empty_input_is_an_eof_error() {
        assert_eq!(parse(&[]).unwrap_err(), vec![ParseError::UnexpectedEof]);
    }

    #[test]
    fn missing_terminator_reports_eof() {
        let errors = parse_src("int x = 3").unwrap_err();
        assert_eq!(errors, vec![ParseError::UnexpectedEof]);
    }

    #[test]
    fn recovery_reports_multiple_errors() {
        let source = "int = 3.\nint ok = 1.\nfloat y 2.5.";
        let errors = parse_src(source).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line(), Some(1));
        assert_eq!(errors[1].line(), Some(3));
        assert_eq!(errors[1].to_string(), "Syntax error at line 3, token=FLOAT_NUM, value=2.5");
    }

    #[test]
    fn eof_inside_block_is_reported_once() {
        let errors = parse_src("while (x) [ foo").unwrap_err();
        assert_eq!(errors, vec![ParseError::UnexpectedEof]);

        let errors = parse_src("while (x) [ if (y) [ display(").unwrap_err();
        assert_eq!(errors, vec![ParseError::UnexpectedEof]);
    }

    #[test]
    fn deep_parentheses_are_rejected_not_recursed() {
        let depth = 20_000;
        let source = format!("int x = {}1{}.\nint ok = 2.", "(".repeat(depth), ")".repeat(depth));
        let errors = parse_src(&source).unwrap_err();
        assert_eq!(errors, vec![ParseError::TooDeep { line: 1 }]);
        assert_eq!(errors[0].to_string(), "Syntax error at line 1, nesting too deep");
    }

    #[test]
    fn long_operator_chain_is_capped() {
        let source = format!("int x = 1{}.", "+1".repeat(100_000));
        let errors = parse_src(&source).unwrap_err();
        assert!(matches!(errors[0], ParseError::TooDeep { line: 1 }));
    }

    #[test]
    fn nesting_below_the_cap_parses() {
        let depth = MAX_NESTING - 8;
        let source = format!("int x = {}1{}.", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_src(&source).is_ok());
        let chain = format!("int y = 1{}.", "+1".repeat(MAX_NESTING - 8));
        assert!(parse_src(&chain).is_ok());
    }

    #[test]
    fn reserved_words_outside_grammar_are_errors() {
        let errors = parse_src("foreach (x) [ ]").unwrap_err();
        assert!(matches!(&errors[0], ParseError::UnexpectedToken { kind: TokenKind::Foreach, .. }));
    }
}
