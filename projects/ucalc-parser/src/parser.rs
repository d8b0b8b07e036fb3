use crate::cursor::TokenCursor;
use indexmap::IndexSet;
use tracing::debug;
use ucalc_ast::*;
use ucalc_types::{Result, UcalcError};

/// Tokens that may not open a statement.
const LEADING_OPERATORS: [TokenKind; 4] = [TokenKind::Eq, TokenKind::Plus, TokenKind::Slash, TokenKind::Star];

/// Recursive descent parser over a token stream.
///
/// The parser only holds its configuration, the set of measurement units a
/// number may be labelled with. Each call to [Parser::parse] runs on its own
/// cursor, so one parser can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    measurements: IndexSet<String>,
}

/// Statements and diagnostics collected by [Parser::parse_recovering].
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub statements: Vec<Stmt>,
    pub errors: Vec<UcalcError>,
}

impl ParseReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The statements, or every collected diagnostic bundled into one error.
    pub fn into_result(self) -> Result<Vec<Stmt>> {
        if self.errors.is_empty() {
            return Ok(self.statements);
        }
        Err(UcalcError::diagnostics(self.errors))
    }
}

impl Parser {
    pub fn new<I, S>(measurements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { measurements: measurements.into_iter().map(Into::into).collect() }
    }

    pub fn measurements(&self) -> &IndexSet<String> {
        &self.measurements
    }

    /// Parses every statement in `tokens`, stopping at the first error.
    pub fn parse(&self, tokens: &[Token]) -> Result<Vec<Stmt>> {
        let mut cursor = TokenCursor::new(tokens);
        let mut statements = Vec::new();

        while !cursor.is_eof() {
            statements.push(self.parse_statement(&mut cursor)?);
        }

        debug!(statements = statements.len(), "parsed program");
        Ok(statements)
    }

    /// Parses every statement in `tokens`, skipping to the next statement
    /// boundary after each error instead of stopping.
    pub fn parse_recovering(&self, tokens: &[Token]) -> ParseReport {
        let mut cursor = TokenCursor::new(tokens);
        let mut report = ParseReport::default();

        while !cursor.is_eof() {
            match self.parse_statement(&mut cursor) {
                Ok(stmt) => report.statements.push(stmt),
                Err(error) => {
                    debug!(%error, position = cursor.position(), "recovering from parse error");
                    report.errors.push(error);
                    cursor.synchronize();
                }
            }
        }

        debug!(statements = report.statements.len(), errors = report.errors.len(), "parsed program with recovery");
        report
    }

    // --- Statements ---

    fn parse_statement(&self, cursor: &mut TokenCursor<'_>) -> Result<Stmt> {
        let next = cursor.peek();
        if LEADING_OPERATORS.contains(&next.kind) {
            return Err(UcalcError::parse(
                cursor.span_of(next),
                format!("cannot start a statement with operator {}", next.kind),
            ));
        }
        if next.kind == TokenKind::Semicolon {
            return Err(UcalcError::parse(
                cursor.span_of(next),
                "empty statement: expected an expression before ';'",
            ));
        }

        let expr = self.parse_expression(cursor)?;
        let end = cursor.expect(TokenKind::Semicolon, |found| format!("expected ';' after expression, found {}", found))?;
        let span = expr.span().to(end.span);
        Ok(Stmt::Print(PrintStmt { expr, span }))
    }

    // --- Expressions ---

    fn parse_expression(&self, cursor: &mut TokenCursor<'_>) -> Result<Expr> {
        self.parse_unary(cursor)
    }

    fn parse_unary(&self, cursor: &mut TokenCursor<'_>) -> Result<Expr> {
        if let Some(op) = cursor.match_any(&[TokenKind::Minus]) {
            let expr = self.parse_primary(cursor)?;
            let span = op.span.to(expr.span());
            return Ok(Expr::Unary(UnaryExpr { op: op.clone(), expr: Box::new(expr), span }));
        }
        self.parse_primary(cursor)
    }

    fn parse_primary(&self, cursor: &mut TokenCursor<'_>) -> Result<Expr> {
        if let Some(number) = cursor.match_any(&[TokenKind::Number]) {
            return self.parse_literal(cursor, number);
        }

        if let Some(open) = cursor.match_any(&[TokenKind::LParen, TokenKind::Bar]) {
            let expr = self.parse_expression(cursor)?;
            let close = match open.kind {
                TokenKind::LParen => TokenKind::RParen,
                _ => TokenKind::Bar,
            };
            let end = cursor.expect(close, |found| format!("expected {} after expression, found {}", close, found))?;
            let span = open.span.to(end.span);
            return Ok(Expr::Grouping(GroupingExpr { delimiter: open.clone(), expr: Box::new(expr), span }));
        }

        let found = cursor.peek();
        Err(UcalcError::parse(cursor.span_of(found), format!("expected an expression, found {}", found)))
    }

    fn parse_literal(&self, cursor: &mut TokenCursor<'_>, number: &Token) -> Result<Expr> {
        let value = number
            .literal
            .ok_or_else(|| UcalcError::parse(number.span, format!("number token '{}' carries no value", number.lexeme)))?;

        let mut span = number.span;
        let mut label = String::new();
        if let Some(unit) = cursor.match_any(&[TokenKind::Ident]) {
            if !unit.lexeme.is_empty() && !self.measurements.contains(unit.lexeme.as_str()) {
                return Err(UcalcError::parse(unit.span, format!("unknown measurement '{}'", unit.lexeme)));
            }
            span = span.to(unit.span);
            label = unit.lexeme.clone();
        }

        Ok(Expr::Literal(LiteralExpr { value, label, span }))
    }
}
