use tracing::{debug, trace};
use ucalc_ast::{Token, TokenKind};
use ucalc_types::{Result, Span, UcalcError};

/// Scans `source` into tokens, terminated by an [TokenKind::EOF] sentinel.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

/// Single pass scanner over ASCII source text.
///
/// Characters outside the language's character classes are skipped without
/// producing a token or an error.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    start: usize,
    cursor: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            start: 0,
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.cursor;
            self.scan_token()?;
        }
        self.tokens.push(Token::eof(self.source.len()));
        debug!(tokens = self.tokens.len(), bytes = self.source.len(), "tokenized source");
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => {}
            c if c.is_ascii_digit() => self.number()?,
            c if is_alpha(c) => self.identifier(),
            c => match TokenKind::from_symbol(c) {
                Some(kind) => self.add_token(kind),
                None => trace!(offset = self.start, byte = c, "skipping unrecognized character"),
            },
        }
        Ok(())
    }

    fn number(&mut self) -> Result<()> {
        self.consume_while(|c| c.is_ascii_digit());

        // A trailing '.' only belongs to the number when a digit follows it.
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }

        let text = self.lexeme();
        let value = text
            .parse::<f64>()
            .map_err(|e| UcalcError::lexical(self.span(), format!("failed to parse number '{}': {}", text, e)))?;
        self.push(Token::number(text, value, self.span()));
        Ok(())
    }

    fn identifier(&mut self) {
        self.consume_while(|c| is_alpha(c) || c.is_ascii_digit());
        let kind = TokenKind::from_keyword(self.lexeme()).unwrap_or(TokenKind::Ident);
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push(Token::new(kind, self.lexeme(), self.span()));
    }

    fn push(&mut self, token: Token) {
        trace!(kind = ?token.kind, lexeme = %token.lexeme, span = %token.span, "scanned token");
        self.tokens.push(token);
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.cursor]
    }

    fn span(&self) -> Span {
        Span { start: self.start, end: self.cursor }
    }

    fn is_at_end(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.cursor + 1).copied()
    }

    fn advance(&mut self) -> u8 {
        let c = self.bytes[self.cursor];
        self.cursor += 1;
        c
    }

    fn consume_while<F>(&mut self, mut f: F)
    where
        F: FnMut(u8) -> bool,
    {
        while let Some(c) = self.peek() {
            if f(c) {
                self.advance();
            }
            else {
                break;
            }
        }
    }
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}
