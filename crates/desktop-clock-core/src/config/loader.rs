use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Config;

/// Returns the config directory: `~/.config/desktop-clock/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("desktop-clock"))
}

/// Returns the config file path: `~/.config/desktop-clock/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Why a config file could not be used.
#[derive(Debug)]
pub(crate) enum LoadError {
    /// No config file exists; defaults apply silently.
    Missing,
    /// The file exists but could not be read or parsed.
    Invalid(String),
}

/// Reads and parses the config file at `path`.
pub(crate) fn read(path: &Path) -> Result<Config, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::Missing,
        _ => LoadError::Invalid(format!("{}: {e}", path.display())),
    })?;
    parse(&content).map_err(|e| LoadError::Invalid(format!("{}: {e}", path.display())))
}

/// Parses config TOML and clamps the result.
pub(crate) fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// A missing file silently returns defaults; other errors are reported
/// on stderr.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        eprintln!("Warning: could not determine config path");
        return Config::default();
    };
    match read(&path) {
        Ok(config) => config,
        Err(LoadError::Missing) => Config::default(),
        Err(LoadError::Invalid(e)) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
