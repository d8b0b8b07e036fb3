use super::*;

impl From<UcalcErrorKind> for UcalcError {
    fn from(value: UcalcErrorKind) -> Self {
        Self { kind: Box::new(value) }
    }
}

impl From<std::io::Error> for UcalcError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}
