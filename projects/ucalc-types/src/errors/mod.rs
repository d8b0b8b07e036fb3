use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::Span;

mod convert;
mod display;

/// The result type of this crate.
pub type Result<T> = std::result::Result<T, UcalcError>;

/// A boxed error kind, wrapping an [UcalcErrorKind].
#[derive(Clone, PartialEq, Eq)]
pub struct UcalcError {
    kind: Box<UcalcErrorKind>,
}

/// The kind of [UcalcError].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UcalcErrorKind {
    /// A numeric lexeme that could not be converted to a float.
    #[error("Lexical error at {span}: {message}")]
    LexicalError { span: Span, message: String },

    /// The token stream does not form a valid program.
    #[error("Parse error at {span}: {message}")]
    ParseError { span: Span, message: String },

    /// A configuration document that could not be read as one.
    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    /// Several errors reported by one call, in source order.
    #[error("{message}")]
    Diagnostics { message: String, errors: Vec<UcalcError> },
}

impl UcalcError {
    pub fn new(kind: UcalcErrorKind) -> Self {
        Self { kind: Box::new(kind) }
    }

    pub fn lexical(span: Span, message: impl Into<String>) -> Self {
        Self::new(UcalcErrorKind::LexicalError { span, message: message.into() })
    }

    pub fn parse(span: Span, message: impl Into<String>) -> Self {
        Self::new(UcalcErrorKind::ParseError { span, message: message.into() })
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(UcalcErrorKind::ConfigError { message: message.into() })
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(UcalcErrorKind::IoError { message: message.into() })
    }

    /// Bundles the errors of one call. A single error is returned unwrapped.
    pub fn diagnostics(mut errors: Vec<UcalcError>) -> Self {
        if errors.len() == 1 {
            return errors.remove(0);
        }
        let message = match errors.first() {
            Some(first) => format!("{} errors, first: {}", errors.len(), first),
            None => "no errors".to_string(),
        };
        Self::new(UcalcErrorKind::Diagnostics { message, errors })
    }

    pub fn kind(&self) -> &UcalcErrorKind {
        &self.kind
    }

    /// Where in the source the error was raised, if it came from source text.
    pub fn span(&self) -> Option<Span> {
        match self.kind.as_ref() {
            UcalcErrorKind::LexicalError { span, .. } | UcalcErrorKind::ParseError { span, .. } => Some(*span),
            UcalcErrorKind::ConfigError { .. } | UcalcErrorKind::IoError { .. } => None,
            UcalcErrorKind::Diagnostics { errors, .. } => errors.first().and_then(UcalcError::span),
        }
    }

    pub fn message(&self) -> &str {
        match self.kind.as_ref() {
            UcalcErrorKind::LexicalError { message, .. }
            | UcalcErrorKind::ParseError { message, .. }
            | UcalcErrorKind::ConfigError { message }
            | UcalcErrorKind::IoError { message }
            | UcalcErrorKind::Diagnostics { message, .. } => message,
        }
    }

    /// Every individual error this value stands for.
    pub fn errors(&self) -> &[UcalcError] {
        match self.kind.as_ref() {
            UcalcErrorKind::Diagnostics { errors, .. } => errors,
            _ => std::slice::from_ref(self),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.kind.as_ref(), UcalcErrorKind::ParseError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = UcalcError::parse(Span::new(3, 4), "expected '|' after expression, found ')'");
        assert!(error.is_parse());
        assert_eq!(error.span(), Some(Span::new(3, 4)));
        assert_eq!(error.to_string(), "Parse error at 3..4: expected '|' after expression, found ')'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "ucalc.toml missing");
        let error = UcalcError::from(io);
        assert_eq!(error.span(), None);
        assert_eq!(error.message(), "ucalc.toml missing");
        assert_eq!(error.errors().len(), 1);
    }

    #[test]
    fn test_diagnostics_bundle() {
        let first = UcalcError::parse(Span::new(0, 1), "cannot start a statement with operator '='");
        let second = UcalcError::parse(Span::new(7, 8), "unknown measurement 'kg'");

        let single = UcalcError::diagnostics(vec![first.clone()]);
        assert_eq!(single, first);

        let error = UcalcError::diagnostics(vec![first.clone(), second.clone()]);
        assert!(!error.is_parse());
        assert_eq!(error.errors(), &[first, second]);
        assert_eq!(error.span(), Some(Span::new(0, 1)));
        assert_eq!(
            error.to_string(),
            "2 errors, first: Parse error at 0..1: cannot start a statement with operator '='"
        );
    }
}
