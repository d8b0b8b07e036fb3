use serde::{Deserialize, Serialize};
use std::path::Path;
use toml_edit::DocumentMut;
use tracing::debug;
use ucalc_types::{Result, UcalcError};

/// Contents of a `ucalc.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UcalcConfig {
    #[serde(default)]
    pub measurements: MeasurementConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// The measurement units a number literal may be labelled with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    #[serde(default)]
    pub units: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Keep parsing after an error and report every diagnostic.
    #[serde(default)]
    pub recover: bool,
}

impl UcalcConfig {
    pub fn with_units<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            measurements: MeasurementConfig { units: units.into_iter().map(Into::into).collect() },
            parser: ParserConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| UcalcError::config(format!("Failed to parse ucalc.toml: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), units = config.measurements.units.len(), "loaded config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| UcalcError::config(format!("Failed to serialize config: {}", e)))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Update an existing toml file while preserving comments/formatting
    pub fn update_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = if path.as_ref().exists() {
            std::fs::read_to_string(&path)?
        }
        else {
            String::new()
        };

        let mut doc = content
            .parse::<DocumentMut>()
            .map_err(|e| UcalcError::config(format!("Failed to parse existing ucalc.toml: {}", e)))?;

        let units = self.measurements.units.iter().map(String::as_str).collect::<toml_edit::Array>();
        doc["measurements"]["units"] = toml_edit::value(units);
        doc["parser"]["recover"] = toml_edit::value(self.parser.recover);

        std::fs::write(path, doc.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_tables_missing() {
        let config = UcalcConfig::from_toml_str("").unwrap();
        assert_eq!(config, UcalcConfig::default());
        assert!(config.measurements.units.is_empty());
        assert!(!config.parser.recover);
    }

    #[test]
    fn test_parse_full_document() {
        let config = UcalcConfig::from_toml_str(
            r#"
            [measurements]
            units = ["kg", "m", "s"]

            [parser]
            recover = true
            "#,
        )
        .unwrap();
        assert_eq!(config.measurements.units, vec!["kg", "m", "s"]);
        assert!(config.parser.recover);
    }

    #[test]
    fn test_malformed_document() {
        let error = UcalcConfig::from_toml_str("[measurements]\nunits = 3").unwrap_err();
        assert!(error.message().starts_with("Failed to parse ucalc.toml"));
        assert_eq!(error.span(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucalc.toml");

        let config = UcalcConfig::with_units(["kg", "lb"]);
        config.save(&path).unwrap();
        assert_eq!(UcalcConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = UcalcConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(error.kind(), ucalc_types::UcalcErrorKind::IoError { .. }));
    }

    #[test]
    fn test_update_file_keeps_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucalc.toml");
        std::fs::write(&path, "# project units\n[measurements]\nunits = [\"kg\"]\n\n[owner]\nname = \"lab\"\n").unwrap();

        let mut config = UcalcConfig::from_file(&path).unwrap();
        config.measurements.units.push("m".to_string());
        config.parser.recover = true;
        config.update_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# project units"));
        assert!(content.contains("name = \"lab\""));

        let reloaded = UcalcConfig::from_file(&path).unwrap();
        assert_eq!(reloaded.measurements.units, vec!["kg", "m"]);
        assert!(reloaded.parser.recover);
    }

    #[test]
    fn test_update_file_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucalc.toml");
        UcalcConfig::with_units(["s"]).update_file(&path).unwrap();
        assert_eq!(UcalcConfig::from_file(&path).unwrap().measurements.units, vec!["s"]);
    }
}
