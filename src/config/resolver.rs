//! Precedence resolution for preferences.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. config.kdl
//! 3. Built-in defaults

use super::schema::{DosieConfig, OutputFormat};
use super::store::ConfigFile;
use crate::Result;
use serde::Serialize;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from config.kdl
    ConfigFile,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved preferences with source tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub output_format: Resolved<OutputFormat>,
    pub dark_mode: Resolved<bool>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            dark_mode: Resolved::new(false, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Resolve preferences: CLI flags, then config.kdl, then defaults.
pub fn resolve_config(file: &ConfigFile, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    Ok(resolve(&file.load()?, overrides))
}

/// Resolve against an already loaded config.
pub fn resolve(stored: &DosieConfig, overrides: &ConfigOverrides) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = stored.output_format {
        result.output_format = Resolved::new(format, ValueSource::ConfigFile);
    }

    if let Some(dark) = stored.dark_mode {
        result.dark_mode = Resolved::new(dark, ValueSource::ConfigFile);
    }

    tracing::debug!(
        "Resolved output-format={} ({}), dark-mode={} ({})",
        result.output_format.value,
        result.output_format.source,
        result.dark_mode.value,
        result.dark_mode.source
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file() -> (TempDir, ConfigFile) {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        (dir, file)
    }

    #[test]
    fn test_resolve_defaults() {
        let (_dir, file) = config_file();
        let config = resolve_config(&file, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, ResolvedConfig::default());
        assert_eq!(config.output_format.source, ValueSource::Default);
        assert!(!config.dark_mode());
    }

    #[test]
    fn test_resolve_from_file() {
        let (_dir, file) = config_file();
        file.save(&DosieConfig {
            output_format: Some(OutputFormat::Human),
            dark_mode: Some(true),
        })
        .unwrap();

        let config = resolve_config(&file, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Human);
        assert_eq!(config.output_format.source, ValueSource::ConfigFile);
        assert!(config.dark_mode());
        assert_eq!(config.dark_mode.source, ValueSource::ConfigFile);
    }

    #[test]
    fn test_cli_overrides_file() {
        let (_dir, file) = config_file();
        file.save(&DosieConfig {
            output_format: Some(OutputFormat::Json),
            dark_mode: None,
        })
        .unwrap();

        let overrides = ConfigOverrides::new().with_output_format(OutputFormat::Human);
        let config = resolve_config(&file, &overrides).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Human);
        assert_eq!(config.output_format.source, ValueSource::CliFlag);
        assert_eq!(config.dark_mode.source, ValueSource::Default);
    }

    #[test]
    fn test_value_source_display() {
        assert_eq!(ValueSource::CliFlag.to_string(), "cli");
        assert_eq!(ValueSource::ConfigFile.to_string(), "config");
        assert_eq!(ValueSource::Default.to_string(), "default");
    }
}
