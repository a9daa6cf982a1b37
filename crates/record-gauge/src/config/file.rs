//! File-based configuration loading.

use std::path::Path;

use crate::config::GaugeConfig;
use crate::error::Result;

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Parse config content.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<GaugeConfig> {
    let config: GaugeConfig = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;

    #[test]
    fn parse_toml_basic() {
        let content = r#"
            namespace = "jon"
            labels = ["worker", "pool"]

            [const_labels]
            site = "lab"
        "#;

        let config = parse_config(content, ConfigFormat::Toml).unwrap();
        assert_eq!(config.namespace, "jon");
        assert_eq!(config.labels, ["worker", "pool"]);
        assert_eq!(config.const_labels.get("site").map(String::as_str), Some("lab"));
        assert_eq!(config.version, None);
    }

    #[test]
    fn parse_json_basic() {
        let content = r#"{"namespace": "jon", "version": "1.0.0"}"#;

        let config = parse_config(content, ConfigFormat::Json).unwrap();
        assert_eq!(config.namespace, "jon");
        assert_eq!(config.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn parse_errors_keep_their_source() {
        assert!(matches!(
            parse_config("namespace = ", ConfigFormat::Toml),
            Err(GaugeError::Toml(_))
        ));
        assert!(matches!(
            parse_config("{", ConfigFormat::Json),
            Err(GaugeError::Json(_))
        ));
    }

    #[test]
    fn config_format_detection() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("JSON"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
        assert_eq!(
            ConfigFormat::from_path(Path::new("/etc/gauges.toml")),
            Some(ConfigFormat::Toml)
        );
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("record-gauge-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"namespace": "disk"}"#).unwrap();

        let config = GaugeConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().namespace, "disk");
    }
}
