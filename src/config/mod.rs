//! Preferences for dosie.
//!
//! ## config.kdl
//!
//! Located at `$DOSIE_CONFIG_DIR/config.kdl`, or `~/.config/dosie/config.kdl`.
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `dark-mode` - the persisted theme flag
//!
//! Entity data is never written here; it lives in memory only.
//!
//! ## Precedence
//!
//! CLI flag > config.kdl > defaults. Use the [`resolver`] module.

pub mod resolver;
pub mod schema;
pub mod store;

pub use resolver::{
    ConfigOverrides, Resolved, ResolvedConfig, ValueSource, resolve, resolve_config,
};
pub use schema::{CONFIG_KEYS, DARK_MODE_KEY, DosieConfig, OUTPUT_FORMAT_KEY, OutputFormat};
pub use store::{CONFIG_DIR_ENV, ConfigFile};
