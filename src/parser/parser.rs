use log::trace;

use super::error::*;
use super::parser_base::Parser;
use crate::{ast::*, lexer::tokens::*};

type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete CPL program: a list of declarations followed by a block.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);

    let program = parser.program()?;
    trace!(
        "parsed {} declaration(s) and {} top-level statement(s)",
        program.declarations.len(),
        program.body.statements.len()
    );
    Ok(program)
}

impl<'a> Parser<'a> {
    fn program(&mut self) -> ParseResult<Program> {
        let declarations = self.declarations()?;
        let body = self.block()?;

        match self.peek() {
            Some(tok) => failure(Stage::ProgramEnd, Reason::UnexpectedToken(tok.clone())),
            None => Ok(Program { declarations, body }),
        }
    }

    fn declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut declarations = vec![];
        while !self.next_is_symbol(Symbol::OpenBrace) {
            declarations.push(self.declaration()?);
        }
        Ok(declarations)
    }

    fn declaration(&mut self) -> ParseResult<Declaration> {
        let mut ids = vec![self.expect_identifier().add_stage(Stage::Declaration)?];
        while self.recognise_symbol(Symbol::Comma) {
            ids.push(self.expect_identifier().add_stage(Stage::Declaration)?);
        }
        self.expect_symbol(Symbol::Colon)
            .add_stage(Stage::Declaration)?;

        let scalar = self.type_spec()?;
        self.statement_end()?;

        Ok(Declaration { ids, scalar })
    }

    fn type_spec(&mut self) -> ParseResult<Scalar> {
        let tok = self.next().add_stage(Stage::TypeSpec)?;
        match tok.kind {
            TokenKind::Keyword(Keyword::Int) => Ok(Scalar::Int),
            TokenKind::Keyword(Keyword::Float) => Ok(Scalar::Float),
            _ => failure(Stage::TypeSpec, Reason::UnexpectedToken(tok.clone())),
        }
    }

    fn block(&mut self) -> ParseResult<Block> {
        self.expect_symbol(Symbol::OpenBrace)
            .add_stage(Stage::Block)?;

        let mut statements = vec![];
        while !self.recognise_symbol(Symbol::CloseBrace) {
            // Running out of tokens here means the block was never closed.
            self.peek_required().add_stage(Stage::Block)?;
            statements.push(self.statement()?);
        }
        Ok(Block::new(statements))
    }

    fn statement(&mut self) -> ParseResult<Statement> {
        let tok = self.peek_required().add_stage(Stage::Statement)?;

        match &tok.kind {
            TokenKind::Identifier(_) => self.assignment().map(Statement::Assign),
            TokenKind::Keyword(Keyword::Input) => self.input(),
            TokenKind::Keyword(Keyword::Output) => self.output(),
            TokenKind::Keyword(Keyword::If) => self.if_stmt(),
            TokenKind::Keyword(Keyword::While) => self.while_stmt(),
            TokenKind::Symbol(Symbol::OpenBrace) => self.block().map(Statement::Block),
            _ => failure(Stage::Statement, Reason::UnexpectedToken(tok.clone())),
        }
    }

    fn assignment(&mut self) -> ParseResult<Assign> {
        let target = self.expect_identifier().add_stage(Stage::Assignment)?;
        self.expect_symbol(Symbol::Assign)
            .add_stage(Stage::Assignment)?;
        let value = self.expression()?;
        self.statement_end()?;

        Ok(Assign { target, value })
    }

    fn input(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Input)
            .add_stage(Stage::Statement)?;
        self.expect_symbol(Symbol::OpenParen)
            .add_stage(Stage::IoArgument)?;
        let target = self.expect_identifier().add_stage(Stage::IoArgument)?;
        self.expect_symbol(Symbol::CloseParen)
            .add_stage(Stage::IoArgument)?;
        self.statement_end()?;

        Ok(Statement::Input(target))
    }

    fn output(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Output)
            .add_stage(Stage::Statement)?;
        self.expect_symbol(Symbol::OpenParen)
            .add_stage(Stage::IoArgument)?;
        let value = self.expression()?;
        self.expect_symbol(Symbol::CloseParen)
            .add_stage(Stage::IoArgument)?;
        self.statement_end()?;

        Ok(Statement::Output(value))
    }

    fn if_stmt(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::If)
            .add_stage(Stage::Statement)?;
        let condition = self.condition()?;
        let then_branch = self.statement()?;
        self.expect_keyword(Keyword::Else)
            .add_stage(Stage::IfElse)?;
        let else_branch = self.statement()?;

        Ok(Statement::If(Box::new(If {
            condition,
            then_branch,
            else_branch,
        })))
    }

    fn while_stmt(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::While)
            .add_stage(Stage::Statement)?;
        let condition = self.condition()?;
        let body = self.statement()?;

        Ok(Statement::While(Box::new(While { condition, body })))
    }

    /// `( boolexpr )`, as used by `if` and `while`.
    fn condition(&mut self) -> ParseResult<BoolExpr> {
        self.expect_symbol(Symbol::OpenParen)
            .add_stage(Stage::Condition)?;
        let condition = self.bool_expr()?;
        self.expect_symbol(Symbol::CloseParen)
            .add_stage(Stage::Condition)?;
        Ok(condition)
    }

    fn statement_end(&mut self) -> ParseResult<()> {
        self.expect_symbol(Symbol::Semicolon)
            .add_stage(Stage::StatementEnd)
            .map(|_| ())
    }

    fn bool_expr(&mut self) -> ParseResult<BoolExpr> {
        let mut lhs = self.bool_term()?;
        while self.recognise_symbol(Symbol::Or) {
            let rhs = self.bool_term()?;
            lhs = BoolExpr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn bool_term(&mut self) -> ParseResult<BoolExpr> {
        let mut lhs = self.bool_factor()?;
        while self.recognise_symbol(Symbol::And) {
            let rhs = self.bool_factor()?;
            lhs = BoolExpr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn bool_factor(&mut self) -> ParseResult<BoolExpr> {
        if self.recognise_symbol(Symbol::Not) {
            self.expect_symbol(Symbol::OpenParen)
                .add_stage(Stage::Negation)?;
            let inner = self.bool_expr()?;
            self.expect_symbol(Symbol::CloseParen)
                .add_stage(Stage::Negation)?;
            return Ok(BoolExpr::Not(Box::new(inner)));
        }

        let lhs = self.expression()?;
        let op = self.rel_op()?;
        let rhs = self.expression()?;
        Ok(BoolExpr::Rel(Box::new(RelExpr { lhs, op, rhs })))
    }

    fn rel_op(&mut self) -> ParseResult<RelOp> {
        let tok = self.next().add_stage(Stage::RelOp)?;
        let op = match tok.kind {
            TokenKind::Symbol(Symbol::Eq) => RelOp::Equal,
            TokenKind::Symbol(Symbol::Neq) => RelOp::NotEqual,
            TokenKind::Symbol(Symbol::Lt) => RelOp::LessThan,
            TokenKind::Symbol(Symbol::Gt) => RelOp::GreaterThan,
            TokenKind::Symbol(Symbol::Lte) => RelOp::LessThanEqual,
            TokenKind::Symbol(Symbol::Gte) => RelOp::GreaterThanEqual,
            _ => return failure(Stage::RelOp, Reason::UnexpectedToken(tok.clone())),
        };
        Ok(op)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.recognise_symbol(Symbol::Plus) {
                ArithOp::Add
            } else if self.recognise_symbol(Symbol::Minus) {
                ArithOp::Subtract
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Expr::Binary(Box::new(BinExpr { lhs, op, rhs }));
        }
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.factor()?;
        loop {
            let op = if self.recognise_symbol(Symbol::Asterisk) {
                ArithOp::Multiply
            } else if self.recognise_symbol(Symbol::Slash) {
                ArithOp::Divide
            } else {
                return Ok(lhs);
            };
            let rhs = self.factor()?;
            lhs = Expr::Binary(Box::new(BinExpr { lhs, op, rhs }));
        }
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let tok = self.next().add_stage(Stage::Expr)?;

        match &tok.kind {
            TokenKind::Identifier(name) => Ok(Expr::Identifier(Ident::new(
                name.as_str(),
                tok.source,
            ))),
            TokenKind::Literal(lit) => Ok(Expr::Literal(*lit)),
            TokenKind::Symbol(Symbol::OpenParen) => {
                let inner = self.expression()?;
                self.expect_symbol(Symbol::CloseParen)
                    .add_stage(Stage::ParenExprEnd)?;
                Ok(inner)
            }
            TokenKind::Keyword(Keyword::StaticCastInt) => self.cast(Scalar::Int),
            TokenKind::Keyword(Keyword::StaticCastFloat) => self.cast(Scalar::Float),
            _ => failure(Stage::Expr, Reason::UnexpectedToken(tok.clone())),
        }
    }

    fn cast(&mut self, target: Scalar) -> ParseResult<Expr> {
        self.expect_symbol(Symbol::OpenParen)
            .add_stage(Stage::Cast)?;
        let expr = self.expression()?;
        self.expect_symbol(Symbol::CloseParen)
            .add_stage(Stage::Cast)?;
        Ok(Expr::Cast(Box::new(CastExpr { target, expr })))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        lexer::lex,
        span::Bytes,
    };

    use super::*;

    fn parse_source(source: &str) -> Program {
        let tokens = lex(source).unwrap();
        match parse(&tokens) {
            Ok(program) => program,
            Err(err) => {
                panic!(
                    "\n\nEncountered error:\n{:#?}\nWhen parsing:\n    {}\n\n",
                    err, source,
                );
            }
        }
    }

    macro_rules! assert_parses {
        ($source:expr, $expected:expr) => {{
            let program = parse_source($source);
            let pretty = program
                .body
                .statements
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ");

            assert_eq!(
                $expected, pretty,
                "\n\nWhen parsing:\n    {}\nExpected to find:\n    {}\nBut found:\n    {}\n\n",
                $source, $expected, pretty
            );
        }};
    }

    fn parse_error(source: &str) -> ParseError {
        let tokens = lex(source).unwrap();
        match parse(&tokens) {
            Ok(program) => panic!("Expected a parse error, but got: {}", program.body),
            Err(err) => err,
        }
    }

    #[test]
    fn parses_declarations() {
        let program = parse_source("a, b: int; c: float; { }");

        let rendered: Vec<_> = program
            .declarations
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(vec!["a, b: int;", "c: float;"], rendered);
    }

    #[test]
    fn parses_empty_program() {
        let program = parse_source("{}");
        assert!(program.declarations.is_empty());
        assert!(program.body.statements.is_empty());
    }

    #[test]
    fn parses_simple_statements() {
        assert_parses!("{ x = 1; }", "x = 1;");
        assert_parses!("{ input(x); }", "input(x);");
        assert_parses!("{ output(x); }", "output(x);");
        assert_parses!("{ { x = 1; y = 2; } }", "{ x = 1; y = 2; }");
        assert_parses!("{ {} }", "{ }");
    }

    #[test]
    fn respects_arithmetic_precedence() {
        assert_parses!("{ output(a + b * c); }", "output((a + (b * c)));");
        assert_parses!("{ output(a * b + c); }", "output(((a * b) + c));");
        assert_parses!("{ output((a + b) * c); }", "output(((a + b) * c));");
    }

    #[test]
    fn arithmetic_is_left_associative() {
        assert_parses!("{ x = a - b - c; }", "x = ((a - b) - c);");
        assert_parses!("{ x = a / b * c; }", "x = ((a / b) * c);");
    }

    #[test]
    fn parses_casts_and_literals() {
        assert_parses!("{ x = staticcastint(f * 2.5); }", "x = staticcastint((f * 2.5));");
        assert_parses!("{ y = staticcastfloat(3) + 1.0; }", "y = (staticcastfloat(3) + 1.0);");
    }

    #[test]
    fn parses_if_and_while() {
        assert_parses!(
            "{ if (a < b) x = 1; else x = 2; }",
            "if ((a < b)) x = 1; else x = 2;"
        );
        assert_parses!(
            "{ while (a <= b) { a = a + 1; } }",
            "while ((a <= b)) { a = (a + 1); }"
        );
    }

    #[test]
    fn boolean_operators_nest_by_precedence() {
        assert_parses!(
            "{ while (a == 1 || b != 2 && c > 3) x = 0; }",
            "while (((a == 1) || ((b != 2) && (c > 3)))) x = 0;"
        );
        assert_parses!(
            "{ while (!(a >= b) && c < d) x = 0; }",
            "while ((!((a >= b)) && (c < d))) x = 0;"
        );
    }

    #[test]
    fn if_requires_else() {
        let err = parse_error("{ if (a < b) x = 1; }");
        assert_eq!(Stage::IfElse, err.stage());
    }

    #[test]
    fn reports_missing_semicolon() {
        let err = parse_error("x: int; { x = 1 }");
        assert_eq!(Stage::StatementEnd, err.stage());
        assert!(matches!(err.reason(), Reason::UnexpectedToken(_)));
    }

    #[test]
    fn reports_unexpected_end_of_input() {
        let err = parse_error("x: int; { x = 1;");
        assert_eq!(Stage::Block, err.stage());
        assert!(matches!(err.reason(), Reason::UnexpectedEndOfInput(pos) if *pos == Bytes::new(16)));
    }

    #[test]
    fn rejects_trailing_tokens() {
        let err = parse_error("{ } x");
        assert_eq!(Stage::ProgramEnd, err.stage());
    }

    #[test]
    fn rejects_bad_type() {
        let err = parse_error("x: bool; { }");
        assert_eq!(Stage::TypeSpec, err.stage());
    }

    #[test]
    fn rejects_missing_relational_operator() {
        let err = parse_error("{ while (a) x = 1; }");
        assert_eq!(Stage::RelOp, err.stage());
    }
}
