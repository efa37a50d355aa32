//! Configuration for the pagination engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pagination::policy::{ForcedSplit, OversizedGroupPolicy, VisibleOverflow};

/// How a new page picks its template when the content has no preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateSequencing {
    /// Page `n` uses the `n`th declared template; the last one repeats
    #[default]
    Declared,
    /// Keep the template of the page being closed
    RepeatCurrent,
}

/// Built-in handling for unsplittable groups taller than a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OversizedGroupMode {
    /// Split the group anyway
    #[default]
    ForceSplit,
    /// Keep the group whole on a fresh page and let it overflow
    Overflow,
}

impl OversizedGroupMode {
    pub fn policy(&self) -> &'static dyn OversizedGroupPolicy {
        match self {
            OversizedGroupMode::ForceSplit => &ForcedSplit,
            OversizedGroupMode::Overflow => &VisibleOverflow,
        }
    }
}

/// Configuration options for page composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    pub sequencing: TemplateSequencing,

    pub oversized_groups: OversizedGroupMode,

    /// Slack allowed when comparing measured heights with remaining space
    pub fit_tolerance: f64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            sequencing: TemplateSequencing::Declared,
            oversized_groups: OversizedGroupMode::ForceSplit,
            fit_tolerance: 0.01,
        }
    }
}

impl PaginationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; omitted keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PaginationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fit_tolerance.is_finite() || self.fit_tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "fit_tolerance",
                format!("must be a non-negative number, got {}", self.fit_tolerance),
            ));
        }
        Ok(())
    }

    pub fn with_sequencing(mut self, sequencing: TemplateSequencing) -> Self {
        self.sequencing = sequencing;
        self
    }

    pub fn with_oversized_groups(mut self, mode: OversizedGroupMode) -> Self {
        self.oversized_groups = mode;
        self
    }

    pub fn with_fit_tolerance(mut self, tolerance: f64) -> Self {
        self.fit_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PaginationConfig::default();
        assert_eq!(config.sequencing, TemplateSequencing::Declared);
        assert_eq!(config.oversized_groups, OversizedGroupMode::ForceSplit);
        assert_eq!(config.fit_tolerance, 0.01);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PaginationConfig::new()
            .with_sequencing(TemplateSequencing::RepeatCurrent)
            .with_oversized_groups(OversizedGroupMode::Overflow)
            .with_fit_tolerance(0.5);

        assert_eq!(config.sequencing, TemplateSequencing::RepeatCurrent);
        assert_eq!(config.oversized_groups, OversizedGroupMode::Overflow);
        assert_eq!(config.fit_tolerance, 0.5);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = PaginationConfig::from_toml(r#"oversized_groups = "overflow""#)
            .expect("Should parse");
        assert_eq!(config.oversized_groups, OversizedGroupMode::Overflow);
        assert_eq!(config.sequencing, TemplateSequencing::Declared);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
sequencing = "repeat-current"
oversized_groups = "force-split"
fit_tolerance = 0.25
"#;
        let config = PaginationConfig::from_toml(toml_str).expect("Should parse");
        assert_eq!(config.sequencing, TemplateSequencing::RepeatCurrent);
        assert_eq!(config.fit_tolerance, 0.25);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = PaginationConfig::from_toml("fit_tolerance = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = PaginationConfig::from_toml("columns = 2");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
