//! Locating, reading and writing config.kdl.

use super::schema::DosieConfig;
use crate::{Error, Result};
use kdl::KdlDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "DOSIE_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.kdl";

/// The preferences file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Use `config.kdl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    /// Find the config file.
    ///
    /// Precedence: explicit directory > `DOSIE_CONFIG_DIR` > `~/.config/dosie`.
    pub fn locate(dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = dir {
            return Ok(Self::in_dir(dir));
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::in_dir(dir));
        }
        dirs::config_dir()
            .map(|d| Self::in_dir(d.join("dosie")))
            .ok_or_else(|| Error::Other("Could not determine config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the config. A missing file yields the defaults.
    pub fn load(&self) -> Result<DosieConfig> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return Ok(DosieConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let doc = content.parse::<KdlDocument>().map_err(|source| Error::InvalidConfig {
            path: self.path.clone(),
            source,
        })?;
        Ok(DosieConfig::from_kdl(&doc))
    }

    /// Read the config, using the defaults if it cannot be read.
    pub fn load_or_default(&self) -> DosieConfig {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring config: {}", e);
            DosieConfig::default()
        })
    }

    /// Write the config, creating the directory if needed.
    pub fn save(&self, config: &DosieConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, config.to_kdl().to_string())?;
        tracing::debug!("Wrote config to {}", self.path.display());
        Ok(())
    }

    /// Load, apply `change`, and save.
    ///
    /// A file that does not parse is replaced.
    pub fn update<F>(&self, change: F) -> Result<DosieConfig>
    where
        F: FnOnce(&mut DosieConfig) -> Result<()>,
    {
        let mut config = match self.load() {
            Ok(config) => config,
            Err(Error::InvalidConfig { path, source }) => {
                tracing::warn!("Replacing unparseable config {}: {}", path.display(), source);
                DosieConfig::default()
            }
            Err(e) => return Err(e),
        };
        change(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        assert!(!file.exists());
        assert_eq!(file.load().unwrap(), DosieConfig::default());
    }

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path().join("nested").join("dosie"));
        let config = DosieConfig {
            output_format: Some(OutputFormat::Human),
            dark_mode: Some(true),
        };
        file.save(&config).unwrap();
        assert!(file.exists());
        assert_eq!(file.load().unwrap(), config);

        let text = fs::read_to_string(file.path()).unwrap();
        assert!(text.contains("dark-mode #true"));
    }

    #[test]
    fn test_update_applies_change() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        file.update(|c| {
            c.dark_mode = Some(false);
            Ok(())
        })
        .unwrap();
        let updated = file
            .update(|c| c.set("output-format", "human"))
            .unwrap();
        assert_eq!(updated.dark_mode, Some(false));
        assert_eq!(updated.output_format, Some(OutputFormat::Human));
    }

    #[test]
    fn test_failed_update_does_not_write() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        assert!(file.update(|c| c.set("dark-mode", "maybe")).is_err());
        assert!(!file.exists());
    }

    #[test]
    fn test_invalid_kdl_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        fs::write(file.path(), "dark-mode {").unwrap();
        let err = file.load().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref path, .. } if path == file.path()));
        assert!(err.to_string().contains("config.kdl"));
        assert_eq!(file.load_or_default(), DosieConfig::default());
    }

    #[test]
    fn test_update_replaces_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::in_dir(dir.path());
        fs::write(file.path(), "dark-mode {").unwrap();
        let updated = file
            .update(|c| {
                c.dark_mode = Some(true);
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.dark_mode, Some(true));
        assert_eq!(file.load().unwrap(), updated);
    }

    #[test]
    #[serial]
    fn test_locate_precedence() {
        let explicit = TempDir::new().unwrap();
        let from_env = TempDir::new().unwrap();

        // SAFETY: serialized with other env-touching tests
        unsafe { std::env::set_var(CONFIG_DIR_ENV, from_env.path()) };
        let located = ConfigFile::locate(Some(explicit.path())).unwrap();
        assert_eq!(located.path(), explicit.path().join("config.kdl"));

        let located = ConfigFile::locate(None).unwrap();
        assert_eq!(located.path(), from_env.path().join("config.kdl"));

        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    }
}
