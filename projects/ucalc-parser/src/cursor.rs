use ucalc_ast::{Token, TokenKind};
use ucalc_types::{Result, Span, UcalcError};

/// Returned for every read past the end of the token slice.
static EOF_SENTINEL: Token = Token {
    kind: TokenKind::EOF,
    lexeme: String::new(),
    literal: None,
    span: Span { start: 0, end: 0 },
};

/// A read position over a token slice, owned by a single parse call.
///
/// Reads never go past the end: once the slice is exhausted, or an
/// [TokenKind::EOF] token is reached, every lookahead yields the end-of-input
/// sentinel.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    current: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }

    pub fn peek(&self) -> &'t Token {
        self.tokens.get(self.current).unwrap_or(&EOF_SENTINEL)
    }

    pub fn peek_next(&self) -> &'t Token {
        if self.is_eof() {
            return self.peek();
        }
        self.tokens.get(self.current + 1).unwrap_or(&EOF_SENTINEL)
    }

    /// The most recently consumed token, or the sentinel before the first advance.
    pub fn previous(&self) -> &'t Token {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&EOF_SENTINEL)
    }

    pub fn advance(&mut self) -> &'t Token {
        if !self.is_eof() {
            self.current += 1;
        }
        self.previous()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        if self.is_eof() {
            return false;
        }
        self.peek().kind == kind
    }

    /// Consumes the next token if it is any of `kinds`.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'t Token> {
        if kinds.iter().any(|kind| self.check(*kind)) {
            return Some(self.advance());
        }
        None
    }

    pub fn expect(&mut self, kind: TokenKind, message: impl FnOnce(&Token) -> String) -> Result<&'t Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let found = self.peek();
        Err(UcalcError::parse(self.span_of(found), message(found)))
    }

    /// Skips tokens until a statement boundary: just past a `;`, or in front of
    /// an identifier.
    pub fn synchronize(&mut self) {
        self.advance();
        while !self.is_eof() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind == TokenKind::Ident {
                return;
            }
            self.advance();
        }
    }

    /// The span of `token`, with the sentinel placed after the last real token.
    pub fn span_of(&self, token: &Token) -> Span {
        if std::ptr::eq(token, &EOF_SENTINEL) {
            let end = self.tokens.last().map_or(0, |last| last.span.end);
            return Span::point(end);
        }
        token.span
    }
}
