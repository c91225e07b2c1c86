//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the preferences file
//! - Serialization/deserialization to/from KDL format
//! - Key-based access for `dosie config get|set`

use crate::{Error, Result};
use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};

/// Key of the persisted dark-mode flag.
pub const DARK_MODE_KEY: &str = "dark-mode";

/// Key of the output format preference.
pub const OUTPUT_FORMAT_KEY: &str = "output-format";

/// Every key `config get|set` accepts.
pub const CONFIG_KEYS: &[&str] = &[OUTPUT_FORMAT_KEY, DARK_MODE_KEY];

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }

    pub fn is_human(&self) -> bool {
        *self == OutputFormat::Human
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// dark-mode #true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DosieConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Dark theme preference
    pub dark_mode: Option<bool>,
}

impl DosieConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from a KDL document.
    ///
    /// Values of the wrong type are skipped with a warning.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(value) = first_value(doc, OUTPUT_FORMAT_KEY) {
            match value.as_string().and_then(OutputFormat::parse) {
                Some(format) => config.output_format = Some(format),
                None => tracing::warn!("Ignoring invalid {} value: {}", OUTPUT_FORMAT_KEY, value),
            }
        }

        if let Some(value) = first_value(doc, DARK_MODE_KEY) {
            match value.as_bool() {
                Some(dark) => config.dark_mode = Some(dark),
                None => tracing::warn!("Ignoring invalid {} value: {}", DARK_MODE_KEY, value),
            }
        }

        config
    }

    /// Convert config to a KDL document.
    pub fn to_kdl(&self) -> KdlDocument {
        let mut doc = KdlDocument::new();

        if let Some(format) = self.output_format {
            let mut node = KdlNode::new(OUTPUT_FORMAT_KEY);
            node.push(KdlEntry::new(KdlValue::String(format.as_str().to_string())));
            doc.nodes_mut().push(node);
        }

        if let Some(dark) = self.dark_mode {
            let mut node = KdlNode::new(DARK_MODE_KEY);
            node.push(KdlEntry::new(KdlValue::Bool(dark)));
            doc.nodes_mut().push(node);
        }

        doc.autoformat();
        doc
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &DosieConfig) {
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.dark_mode.is_some() {
            self.dark_mode = other.dark_mode;
        }
    }

    /// The stored value for `key`, as text.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            OUTPUT_FORMAT_KEY => Ok(self.output_format.map(|f| f.as_str().to_string())),
            DARK_MODE_KEY => Ok(self.dark_mode.map(|d| d.to_string())),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set `key` from its text form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            OUTPUT_FORMAT_KEY => {
                let format = OutputFormat::parse(value).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "{} must be \"json\" or \"human\", got {}",
                        OUTPUT_FORMAT_KEY, value
                    ))
                })?;
                self.output_format = Some(format);
            }
            DARK_MODE_KEY => {
                let dark = parse_bool(value).ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "{} must be true or false, got {}",
                        DARK_MODE_KEY, value
                    ))
                })?;
                self.dark_mode = Some(dark);
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn first_value<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
    doc.get(name)
        .and_then(|node| node.entries().first())
        .map(|entry| entry.value())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "#true" | "on" | "yes" | "1" => Some(true),
        "false" | "#false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn unknown_key(key: &str) -> Error {
    Error::InvalidInput(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
