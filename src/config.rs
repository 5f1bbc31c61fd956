//! Runtime configuration loaded from `space_shooter.toml`.
//!
//! Every field has a compiled default, so a minimal TOML file can override
//! just the values you care about:
//!
//! ```toml
//! width = 480
//! frame_ms = 20
//!
//! [glyphs]
//! boss = "@"
//! ```
//!
//! Gameplay thresholds (spawn cadence, boss score, boost windows) are fixed
//! in [`crate::catalog`] and deliberately not exposed here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::catalog::BOSS;
use crate::error::{ShooterError, ShooterResult};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SPACE_SHOOTER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "space_shooter.toml";

/// Smallest playfield height that leaves room between the boss and the
/// player's line.
pub const MIN_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
    pub star_count: usize,
    /// Target frame time of the driver loop.
    pub frame_ms: u64,
    /// Where the front-end writes its log.  Defaults to the system temp dir.
    pub log_file: Option<PathBuf>,
    /// Visual-key name → terminal glyph overrides.
    pub glyphs: HashMap<String, String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            star_count: 150,
            frame_ms: 16,
            log_file: None,
            glyphs: HashMap::new(),
        }
    }
}

impl GameConfig {
    /// The config file to read: `$SPACE_SHOOTER_CONFIG` if set, otherwise
    /// `space_shooter.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load and validate `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> ShooterResult<GameConfig> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file found; using defaults");
                return Ok(GameConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = GameConfig::from_toml(&contents).map_err(|source| {
            ShooterError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<GameConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> ShooterResult<()> {
        if !(self.width.is_finite() && self.width >= BOSS.size) {
            return Err(ShooterError::InvalidConfig {
                field: "width",
                reason: format!("{} is narrower than the boss ({})", self.width, BOSS.size),
            });
        }
        if !(self.height.is_finite() && self.height >= MIN_HEIGHT) {
            return Err(ShooterError::InvalidConfig {
                field: "height",
                reason: format!("{} is below the minimum of {MIN_HEIGHT}", self.height),
            });
        }
        if self.frame_ms == 0 || self.frame_ms > 1000 {
            return Err(ShooterError::InvalidConfig {
                field: "frame_ms",
                reason: format!("{} is outside 1..=1000", self.frame_ms),
            });
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("space_shooter.log"))
    }
}
