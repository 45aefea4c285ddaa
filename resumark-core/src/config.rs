//! Configuration parsing and management.

use crate::catalog::Catalog;
use resumark_types::{DEFAULT_COLUMN_WIDTHS, MIN_COLUMN_WIDTHS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Main configuration struct matching the resumark.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Extra or replacement icons: name -> inline SVG
    #[serde(default)]
    pub icons: HashMap<String, String>,

    /// Extra or replacement company logos: name -> image URL
    #[serde(default)]
    pub companies: HashMap<String, String>,
}

/// Page geometry and the constants of the text-width heuristic, in CSS pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_height: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub padding_x: u32,
    /// Width of the text area (page width minus horizontal padding)
    pub content_width: u32,
    pub line_height: u32,

    pub narrow_char_width: u32,
    pub wide_char_width: u32,
    /// Padding, border and margin of one decorated tag
    pub tag_overhead: u32,
    /// Logo plus gap of a company badge
    pub badge_overhead: u32,
    pub cell_padding: u32,

    pub min_column_widths: [u32; 4],
    pub default_column_widths: [u32; 4],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_height: 1123,
            padding_top: 30,
            padding_bottom: 30,
            padding_x: 40,
            content_width: 714,
            line_height: 22,
            narrow_char_width: 8,
            wide_char_width: 14,
            tag_overhead: 18,
            badge_overhead: 26,
            cell_padding: 20,
            min_column_widths: MIN_COLUMN_WIDTHS,
            default_column_widths: DEFAULT_COLUMN_WIDTHS,
        }
    }
}

impl LayoutConfig {
    /// Usable height of one page
    pub fn page_capacity(&self) -> u32 {
        self.page_height
            .saturating_sub(self.padding_top)
            .saturating_sub(self.padding_bottom)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_capacity() == 0 {
            return Err(ConfigError::InvalidLayout(format!(
                "padding ({} + {}) leaves no room on a {}px page",
                self.padding_top, self.padding_bottom, self.page_height
            )));
        }
        if self.content_width == 0 {
            return Err(ConfigError::InvalidLayout(
                "content_width must be positive".into(),
            ));
        }
        let min_total: u32 = self.min_column_widths.iter().sum();
        if min_total > 100 {
            return Err(ConfigError::InvalidLayout(format!(
                "minimum column widths sum to {min_total}%"
            )));
        }
        let default_total: u32 = self.default_column_widths.iter().sum();
        let below_min = self
            .default_column_widths
            .iter()
            .zip(self.min_column_widths.iter())
            .any(|(w, min)| w < min);
        if default_total != 100 || below_min {
            return Err(ConfigError::InvalidLayout(format!(
                "default column widths {:?} must sum to 100 and respect the minimums",
                self.default_column_widths
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Built-in tables extended with the configured icons and companies
    pub fn catalog(&self) -> Catalog {
        let mut catalog = Catalog::default();
        catalog.extend_icons(self.icons.iter().map(|(k, v)| (k, v.clone())));
        catalog.extend_companies(self.companies.iter().map(|(k, v)| (k, v.clone())));
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.layout.page_height, 1123);
        assert_eq!(config.layout.content_width, 714);
        assert_eq!(config.layout.page_capacity(), 1063);
        assert!(config.layout.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
layout:
  line_height: 24
companies:
  Acme: https://acme.test/logo.png
"#,
        )
        .unwrap();

        assert_eq!(config.layout.line_height, 24);
        assert_eq!(config.layout.padding_x, 40);
        assert_eq!(
            config.catalog().company_logo("Acme"),
            Some("https://acme.test/logo.png")
        );
        assert!(config.catalog().company_logo("美团").is_some());
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let err = Config::from_yaml("layout:\n  page_height: 50\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLayout(_)));

        let err =
            Config::from_yaml("layout:\n  min_column_widths: [40, 40, 10, 14]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLayout(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("resumark.yml")).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_from_file_extends_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resumark.yml");
        std::fs::write(&path, "icons:\n  rocket: \"<svg></svg>\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.catalog().icon("Rocket"), Some("<svg></svg>"));
    }
}
