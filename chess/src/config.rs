//! Game settings

use crate::movegen::KingSafety;
use crate::types::Color;

use std::path::PathBuf;
use std::time::Duration;

/// Settings of a [`Game`](crate::game::Game)
///
/// # Example
///
/// ```
/// # use chesstrack::{Color, config::Config, movegen::KingSafety};
/// # use std::time::Duration;
/// #
/// let config = Config::default()
///     .with_player_color(Color::White)
///     .with_king_safety(KingSafety::Guarded);
/// assert_eq!(config.player_color, Color::White);
/// assert_eq!(config.redraw_interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory with piece images
    pub asset_dir: PathBuf,
    /// Color of the pieces of [`Side::Player`](crate::types::Side::Player)
    pub player_color: Color,
    pub king_safety: KingSafety,
    /// Interval between redraw requests, see [`Ticker`](crate::ticker::Ticker)
    pub redraw_interval: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            asset_dir: PathBuf::from("assets/pieces"),
            player_color: Color::Black,
            king_safety: KingSafety::Geometric,
            redraw_interval: Duration::from_millis(100),
        }
    }
}

impl Config {
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Config {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_player_color(mut self, color: Color) -> Config {
        self.player_color = color;
        self
    }

    pub fn with_king_safety(mut self, safety: KingSafety) -> Config {
        self.king_safety = safety;
        self
    }

    pub fn with_redraw_interval(mut self, interval: Duration) -> Config {
        self.redraw_interval = interval;
        self
    }
}
