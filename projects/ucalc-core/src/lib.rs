use tracing::debug;
use ucalc_ast::Stmt;
use ucalc_parser::{ParseReport, Parser};
use ucalc_types::Result;

pub mod config;

pub use config::{MeasurementConfig, ParserConfig, UcalcConfig};
pub use ucalc_parser::tokenize;

/// Runs source text through the lexer and the parser, configured from a
/// [UcalcConfig].
pub struct Frontend {
    parser: Parser,
    recover: bool,
}

impl Frontend {
    pub fn new(config: &UcalcConfig) -> Self {
        Self {
            parser: Parser::new(config.measurements.units.iter().cloned()),
            recover: config.parser.recover,
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Tokenizes and parses `source`.
    ///
    /// Stops at the first error, unless the config enabled `recover`: then
    /// every statement is attempted and all errors come back together as one
    /// [ucalc_types::UcalcErrorKind::Diagnostics].
    pub fn parse(&self, source: &str) -> Result<Vec<Stmt>> {
        let tokens = tokenize(source)?;
        debug!(tokens = tokens.len(), recover = self.recover, "parsing source");
        if self.recover {
            return self.parser.parse_recovering(&tokens).into_result();
        }
        self.parser.parse(&tokens)
    }

    /// Collects every diagnostic in `source`, regardless of the `recover` setting.
    pub fn check(&self, source: &str) -> ParseReport {
        match tokenize(source) {
            Ok(tokens) => self.parser.parse_recovering(&tokens),
            Err(error) => ParseReport { statements: Vec::new(), errors: vec![error] },
        }
    }
}

impl Default for Frontend {
    fn default() -> Self {
        Self::new(&UcalcConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_basic() {
        let frontend = Frontend::new(&UcalcConfig::with_units(["kg"]));
        let statements = frontend.parse("-40; 40 kg; |(2)|;").unwrap();
        let rendered: Vec<String> = statements.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["(print (- 40))", "(print 40 kg)", "(print (abs (group 2)))"]);
    }

    #[test]
    fn test_frontend_default_has_no_units() {
        let frontend = Frontend::default();
        assert!(frontend.parser().measurements().is_empty());
        let error = frontend.parse("40 kg;").unwrap_err();
        assert_eq!(error.message(), "unknown measurement 'kg'");
    }

    #[test]
    fn test_frontend_recover_reports_every_error() {
        let source = "=1; 2; *3; 4 kg;";
        let fail_fast = Frontend::new(&UcalcConfig::with_units(["m"]));
        let error = fail_fast.parse(source).unwrap_err();
        assert_eq!(error.errors().len(), 1);
        assert_eq!(error.message(), "cannot start a statement with operator '='");

        let mut config = UcalcConfig::with_units(["m"]);
        config.parser.recover = true;
        let recovering = Frontend::new(&config);

        let error = recovering.parse(source).unwrap_err();
        let messages: Vec<&str> = error.errors().iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "cannot start a statement with operator '='",
                "cannot start a statement with operator '*'",
                "unknown measurement 'kg'",
            ]
        );
        assert!(matches!(error.kind(), ucalc_types::UcalcErrorKind::Diagnostics { .. }));
        assert_ne!(error, fail_fast.parse(source).unwrap_err());

        assert_eq!(recovering.parse("1 m; 2;").unwrap().len(), 2);
    }

    #[test]
    fn test_frontend_check_collects_all() {
        let frontend = Frontend::default();
        let report = frontend.check("; 1; *2; 3");
        let messages: Vec<&str> = report.errors.iter().map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "empty statement: expected an expression before ';'",
                "cannot start a statement with operator '*'",
                "expected ';' after expression, found end of input",
            ]
        );
        assert_eq!(report.statements.len(), 1);
    }

    #[test]
    fn test_frontend_tokenize() {
        let tokens = tokenize("root2;").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].lexeme, "root2");
    }
}
