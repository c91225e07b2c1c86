//! Command implementations for the dosie CLI.
//!
//! Commands are organized by concern:
//! - [`entities`] - CRUD for the five modules
//! - [`links`] - related links, browsing and link health
//! - [`shell`] - the interactive session
//!
//! Theme and config commands live here because they touch only config.kdl.

pub mod entities;
pub mod links;
pub mod shell;

use crate::app::AppState;
use crate::cli::{SessionCommands, ThemeChange};
use crate::config::{
    ConfigFile, ConfigOverrides, DARK_MODE_KEY, OUTPUT_FORMAT_KEY, OutputFormat, Resolved,
    ValueSource, resolve_config,
};
use crate::models::LinkKey;
use crate::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

pub(crate) fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Print a result in the requested format.
pub fn render(result: &dyn Output, human: bool) -> String {
    if human {
        result.to_human()
    } else {
        result.to_json()
    }
}

/// Run one session command against `state`.
pub fn execute(state: &mut AppState, command: SessionCommands) -> Result<Box<dyn Output>> {
    match command {
        SessionCommands::Snippet { command } => entities::snippet(state, command),
        SessionCommands::Bug { command } => entities::bug(state, command),
        SessionCommands::Decision { command } => entities::decision(state, command),
        SessionCommands::Git { command } => entities::git(state, command),
        SessionCommands::Template { command } => entities::template(state, command),
        SessionCommands::Link { command } => links::link(state, command),
        SessionCommands::Items { kind } => Ok(Box::new(links::items(state, kind))),
        SessionCommands::Browse {
            kind,
            id,
            category,
            search,
        } => Ok(Box::new(links::browse(
            state,
            LinkKey::new(kind, id),
            category,
            search.as_deref(),
        )?)),
        SessionCommands::Doctor => Ok(Box::new(links::doctor(state))),
        SessionCommands::Clusters => Ok(Box::new(links::clusters(state))),
    }
}

/// Outcome of a mutation. Unknown identifiers are reported as `changed: false`.
#[derive(Serialize)]
pub struct Changed {
    pub action: &'static str,
    #[serde(flatten)]
    pub key: LinkKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkKey>,
    pub changed: bool,
}

impl Changed {
    pub fn new(action: &'static str, key: LinkKey, changed: bool) -> Self {
        Self {
            action,
            key,
            target: None,
            changed,
        }
    }

    pub fn with_target(mut self, target: LinkKey) -> Self {
        self.target = Some(target);
        self
    }
}

impl Output for Changed {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let subject = match self.target {
            Some(target) => format!("{} -> {}", self.key, target),
            None => self.key.to_string(),
        };
        if self.changed {
            format!("{}: {}", self.action, subject)
        } else {
            format!("{}: {} (no change)", self.action, subject)
        }
    }
}

/// The persisted theme.
#[derive(Serialize)]
pub struct ThemeResult {
    pub dark_mode: bool,
    pub theme: &'static str,
    pub changed: bool,
}

impl Output for ThemeResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.changed {
            format!("Theme set to {}", self.theme)
        } else {
            format!("Theme: {}", self.theme)
        }
    }
}

/// Show or change the persisted dark-mode flag.
pub fn theme(file: &ConfigFile, change: Option<ThemeChange>) -> Result<ThemeResult> {
    let current = file.load_or_default().dark_mode.unwrap_or(false);
    let dark_mode = match change {
        None => current,
        Some(ThemeChange::Toggle) => !current,
        Some(ThemeChange::Set(dark)) => dark,
    };
    let changed = change.is_some() && dark_mode != current;
    if change.is_some() {
        file.update(|config| {
            config.dark_mode = Some(dark_mode);
            Ok(())
        })?;
    }
    tracing::debug!("Theme dark-mode={} changed={}", dark_mode, changed);
    Ok(ThemeResult {
        dark_mode,
        theme: if dark_mode { "dark" } else { "light" },
        changed,
    })
}

/// One configuration value.
#[derive(Serialize)]
pub struct ConfigValue {
    pub key: String,
    pub value: String,
    pub source: ValueSource,
}

impl Output for ConfigValue {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("{} = {} ({})", self.key, self.value, self.source)
    }
}

pub fn config_get(file: &ConfigFile, key: &str) -> Result<ConfigValue> {
    let resolved = resolve_config(file, &ConfigOverrides::default())?;
    let (value, source) = match key {
        OUTPUT_FORMAT_KEY => (
            resolved.output_format.value.to_string(),
            resolved.output_format.source,
        ),
        DARK_MODE_KEY => (
            resolved.dark_mode.value.to_string(),
            resolved.dark_mode.source,
        ),
        _ => return Err(crate::config::schema::unknown_key(key)),
    };
    Ok(ConfigValue {
        key: key.to_string(),
        value,
        source,
    })
}

pub fn config_set(file: &ConfigFile, key: &str, value: &str) -> Result<ConfigValue> {
    let config = file.update(|config| config.set(key, value))?;
    let value = config
        .get(key)?
        .ok_or_else(|| Error::Other(format!("{} was not stored", key)))?;
    Ok(ConfigValue {
        key: key.to_string(),
        value,
        source: ValueSource::ConfigFile,
    })
}

/// Every configuration value with its source.
#[derive(Serialize)]
pub struct ConfigListing {
    pub path: PathBuf,
    pub output_format: Resolved<OutputFormat>,
    pub dark_mode: Resolved<bool>,
}

impl Output for ConfigListing {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Config: {}\n  {} = {} ({})\n  {} = {} ({})",
            self.path.display(),
            OUTPUT_FORMAT_KEY,
            self.output_format.value,
            self.output_format.source,
            DARK_MODE_KEY,
            self.dark_mode.value,
            self.dark_mode.source
        )
    }
}

pub fn config_list(file: &ConfigFile) -> Result<ConfigListing> {
    let resolved = resolve_config(file, &ConfigOverrides::default())?;
    Ok(ConfigListing {
        path: file.path().to_path_buf(),
        output_format: resolved.output_format,
        dark_mode: resolved.dark_mode,
    })
}
