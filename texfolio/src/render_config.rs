//! Renderer configuration from texfolio.toml

use crate::slug::HeadingIds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the configuration file looked up next to the input
pub const CONFIG_FILE_NAME: &str = "texfolio.toml";

/// Main renderer configuration from texfolio.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// How repeated heading labels are disambiguated
    pub heading_ids: HeadingIds,

    /// Recognized remark environments, in matching order
    pub remarks: Vec<RemarkStyle>,

    /// Math typesetting options
    pub math: MathConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading_ids: HeadingIds::default(),
            remarks: vec![
                RemarkStyle::new("remark", "Remark"),
                RemarkStyle::new("Remark", "Remark"),
                RemarkStyle::new("remarque", "Remarque"),
                RemarkStyle::new("Remarque", "Remarque"),
            ],
            math: MathConfig::default(),
        }
    }
}

/// A remark environment keyword and the title shown on its callout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkStyle {
    /// Environment name between the braces of `\begin{...}`
    pub keyword: String,

    /// Title rendered in the callout header
    pub label: String,
}

impl RemarkStyle {
    pub fn new(keyword: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            label: label.into(),
        }
    }
}

/// Output flavor of typeset math
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MathOutput {
    /// Visual HTML only
    Html,
    /// MathML only
    Mathml,
    /// Visual HTML with a hidden MathML copy for assistive technology
    #[default]
    HtmlAndMathml,
}

/// Math typesetting options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Output flavor handed to the typesetter
    pub output: MathOutput,

    /// When false, unparseable math renders as an inline error marker
    /// instead of failing the span
    pub throw_on_error: bool,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            output: MathOutput::HtmlAndMathml,
            throw_on_error: false,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a texfolio.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the texfolio.toml configuration file
    ///
    /// # Returns
    /// * `Ok(RenderConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: RenderConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a texfolio.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Keywords recognized as remark environments
    pub fn remark_keywords(&self) -> Vec<&str> {
        self.remarks.iter().map(|r| r.keyword.as_str()).collect()
    }

    /// Callout title for a keyword; falls back to the keyword itself
    pub fn remark_label<'a>(&'a self, keyword: &'a str) -> &'a str {
        self.remarks
            .iter()
            .find(|r| r.keyword == keyword)
            .map_or(keyword, |r| r.label.as_str())
    }
}

/// Errors that can occur when loading or saving renderer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_roundtrip() {
        let config = RenderConfig {
            heading_ids: HeadingIds::Numbered,
            remarks: vec![RemarkStyle::new("note", "Note")],
            math: MathConfig {
                output: MathOutput::Mathml,
                throw_on_error: true,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RenderConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_example_toml() {
        let toml_content = r#"
heading_ids = "numbered"

[[remarks]]
keyword = "remarque"
label = "Remarque"

[math]
output = "html"
"#;

        let config: RenderConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.heading_ids, HeadingIds::Numbered);
        assert_eq!(config.remark_keywords(), vec!["remarque"]);
        assert_eq!(config.math.output, MathOutput::Html);
        assert!(!config.math.throw_on_error);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RenderConfig = toml::from_str("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(
            config.remark_keywords(),
            vec!["remark", "Remark", "remarque", "Remarque"]
        );
    }

    #[test]
    fn test_remark_label_lookup() {
        let config = RenderConfig::default();
        assert_eq!(config.remark_label("remarque"), "Remarque");
        assert_eq!(config.remark_label("unknown"), "unknown");
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = RenderConfig::default();
        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RenderConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
