//! Player identification.
//!
//! Talabia is strictly two-player. Players are numbered 1 and 2, matching
//! the numbering used by the snapshot format and the winner flag.

use serde::{Deserialize, Serialize};

/// Player identifier. Only 1 and 2 are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first.
    pub const ONE: PlayerId = PlayerId(1);

    /// The second player.
    pub const TWO: PlayerId = PlayerId(2);

    /// Both players, in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::ONE, PlayerId::TWO];

    /// Build a player from its number, or `None` unless it is 1 or 2.
    ///
    /// ```
    /// use talabia::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::from_raw(2), Some(PlayerId::TWO));
    /// assert_eq!(PlayerId::from_raw(0), None);
    /// ```
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 | 2 => Some(Self(raw)),
            _ => None,
        }
    }

    /// The player number (1 or 2).
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(3 - self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        PlayerId::from_raw(raw).ok_or_else(|| format!("invalid player number {raw}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
