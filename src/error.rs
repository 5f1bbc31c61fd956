//! Errors of the surrounding shell: configuration and terminal I/O.
//!
//! Gameplay itself never fails: invalid intents are ignored and losing is
//! a phase, so the engine API returns no `Result`.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ShooterError {
    /// Reading a file or driving the terminal failed.
    Io(std::io::Error),

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A configuration value is outside its usable range.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for ShooterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShooterError::Io(e) => write!(f, "I/O error: {e}"),
            ShooterError::ConfigParse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            ShooterError::InvalidConfig { field, reason } => {
                write!(f, "invalid config value '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for ShooterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShooterError::Io(e) => Some(e),
            ShooterError::ConfigParse { source, .. } => Some(source),
            ShooterError::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for ShooterError {
    fn from(e: std::io::Error) -> Self {
        ShooterError::Io(e)
    }
}

pub type ShooterResult<T> = Result<T, ShooterError>;
