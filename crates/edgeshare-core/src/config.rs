//! Locating and loading TOML configuration files.
//!
//! Each role keeps its own file in the platform config directory:
//! - Windows:  `%APPDATA%\EdgeShare\<role>.toml`
//! - Linux:    `$XDG_CONFIG_HOME/edgeshare/<role>.toml` (or `~/.config/edgeshare/`)
//! - macOS:    `~/Library/Application Support/EdgeShare/<role>.toml`
//!
//! The schemas themselves live in the master and slave crates; this module
//! only knows how to find a file and run it through `toml` + `serde`.  A
//! missing default file is not an error: the role starts with its built-in
//! defaults.  A missing file that the user named explicitly *is* an error.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Determines the platform-appropriate directory for config files.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the base directory cannot
/// be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the default path of `file_name` inside [`config_dir`].
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn default_config_path(file_name: &str) -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(file_name))
}

/// Loads a config of type `T`.
///
/// With `explicit = Some(path)` the file must exist.  With `None` the default
/// path for `file_name` is tried and `T::default()` is returned when the file
/// (or the whole platform directory) is absent.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors (including a missing
/// explicit file) and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_toml<T>(explicit: Option<&Path>, file_name: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path(file_name) {
            Ok(path) => path,
            Err(ConfigError::NoPlatformConfigDir) => return Ok(T::default()),
            Err(e) => return Err(e),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            Ok(T::default())
        }
        Err(source) => Err(ConfigError::Io { path, source }),
    }
}

/// Resolves the platform config directory including the `EdgeShare` component.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("EdgeShare"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("EdgeShare")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("edgeshare"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
