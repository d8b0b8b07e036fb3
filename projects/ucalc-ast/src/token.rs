use std::fmt::{Display, Formatter};
use ucalc_types::Span;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Symbols
    LParen,    // (
    RParen,    // )
    Dot,       // .
    Minus,     // -
    Plus,      // +
    Slash,     // /
    Star,      // *
    Caret,     // ^
    Bang,      // !
    Bar,       // |
    Semicolon, // ;
    Comma,     // ,
    Eq,        // =

    // Literals
    Number,
    Ident,

    // Keywords
    Print, // p
    Root,  // root

    // Special
    EOF,
}

impl TokenKind {
    /// Maps a single source character to its token kind.
    pub fn from_symbol(c: u8) -> Option<TokenKind> {
        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'.' => TokenKind::Dot,
            b'-' => TokenKind::Minus,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b';' => TokenKind::Semicolon,
            b'=' => TokenKind::Eq,
            b',' => TokenKind::Comma,
            b'^' => TokenKind::Caret,
            b'!' => TokenKind::Bang,
            b'|' => TokenKind::Bar,
            _ => return None,
        };
        Some(kind)
    }

    /// Looks up a scanned identifier in the keyword table.
    pub fn from_keyword(text: &str) -> Option<TokenKind> {
        match text {
            "p" => Some(TokenKind::Print),
            "root" => Some(TokenKind::Root),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Dot => "'.'",
            TokenKind::Minus => "'-'",
            TokenKind::Plus => "'+'",
            TokenKind::Slash => "'/'",
            TokenKind::Star => "'*'",
            TokenKind::Caret => "'^'",
            TokenKind::Bang => "'!'",
            TokenKind::Bar => "'|'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eq => "'='",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::Print => "'p'",
            TokenKind::Root => "'root'",
            TokenKind::EOF => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified slice of source text.
///
/// `lexeme` is always the verbatim source text the token was scanned from.
/// `literal` is only set for [TokenKind::Number].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<f64>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), literal: None, span }
    }

    pub fn number(lexeme: impl Into<String>, value: f64, span: Span) -> Self {
        Self { kind: TokenKind::Number, lexeme: lexeme.into(), literal: Some(value), span }
    }

    /// The end-of-input sentinel, positioned at `offset`.
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::EOF, String::new(), Span::point(offset))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Number | TokenKind::Ident => write!(f, "{} '{}'", self.kind, self.lexeme),
            _ => Display::fmt(&self.kind, f),
        }
    }
}
