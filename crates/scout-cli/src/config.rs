//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use scout_core::{Board, DEFAULT_TIMER_LIMIT};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Operator name used when a session does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Board used when a session does not name one.
    pub board: Board,

    /// Last recordable tick of a match.
    pub timer_limit: u8,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("operator", &self.operator)
            .field("board", &self.board.name())
            .field("timer_limit", &self.timer_limit)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operator: None,
            board: Board::R1,
            timer_limit: DEFAULT_TIMER_LIMIT,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // SCOUT_OPERATOR, SCOUT_BOARD, SCOUT_TIMER_LIMIT
        figment = figment.merge(Env::prefixed("SCOUT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for scout.
///
/// On Linux: `~/.config/scout`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("scout"))
}
