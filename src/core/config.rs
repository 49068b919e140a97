//! Engine configuration.
//!
//! The rules themselves are fixed; configuration covers where snapshots are
//! written and the two tunable constants of the turn cycle:
//! - `transform_period`: half-moves between Time/Plus transformations
//! - `low_material_threshold`: piece count below which a Sun with no moves
//!   is a draw

use std::path::{Path, PathBuf};

/// Default snapshot file, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "TalabiaSave.txt";

/// Half-moves per transform cycle.
pub const DEFAULT_TRANSFORM_PERIOD: u8 = 4;

/// Fewer pieces than this on the board counts as insufficient material.
pub const DEFAULT_LOW_MATERIAL_THRESHOLD: usize = 3;

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use talabia::core::EngineConfig;
///
/// let config = EngineConfig::new().with_save_path("/tmp/game.txt");
/// assert_eq!(config.transform_period, 4);
/// assert_eq!(config.save_path.to_str(), Some("/tmp/game.txt"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// File used by `Engine::save` and `Engine::load`.
    pub save_path: PathBuf,

    /// Every `transform_period` half-moves, Time and Plus pieces swap kinds.
    pub transform_period: u8,

    /// Boards with fewer pieces than this are drawn when the opponent's Sun
    /// has no move and is not in check.
    pub low_material_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            transform_period: DEFAULT_TRANSFORM_PERIOD,
            low_material_threshold: DEFAULT_LOW_MATERIAL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot file.
    #[must_use]
    pub fn with_save_path(mut self, path: impl AsRef<Path>) -> Self {
        self.save_path = path.as_ref().to_path_buf();
        self
    }

    /// Set the transform period.
    #[must_use]
    pub fn with_transform_period(mut self, period: u8) -> Self {
        assert!(period > 0, "Transform period must be at least 1");
        self.transform_period = period;
        self
    }

    /// Set the low-material draw threshold.
    #[must_use]
    pub fn with_low_material_threshold(mut self, threshold: usize) -> Self {
        self.low_material_threshold = threshold;
        self
    }
}
