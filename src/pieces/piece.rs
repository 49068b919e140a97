//! Piece kinds and piece values.
//!
//! A `Piece` has no identity beyond its square: the engine finds pieces by
//! position, and the Time/Plus transformation replaces a piece with a fresh
//! one of the other kind on the same square.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{PlayerId, Square, BOARD_HEIGHT};

/// The five piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    /// Moves 1 or 2 squares along its facing.
    Point,
    /// Jumps to the eight (2, 1) offsets.
    Hourglass,
    /// Diagonal slider. Becomes a Plus on the transform cycle.
    Time,
    /// Orthogonal slider. Becomes a Time on the transform cycle.
    Plus,
    /// One per player; moves a single step and must never step into a threat.
    Sun,
}

impl PieceKind {
    /// Every kind, in snapshot naming order.
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Point,
        PieceKind::Hourglass,
        PieceKind::Time,
        PieceKind::Plus,
        PieceKind::Sun,
    ];

    /// Canonical name, as written to snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Point => "Point",
            PieceKind::Hourglass => "Hourglass",
            PieceKind::Time => "Time",
            PieceKind::Plus => "Plus",
            PieceKind::Sun => "Sun",
        }
    }

    /// The kind this one turns into on the transform cycle, if any.
    #[must_use]
    pub const fn transformed(self) -> Option<PieceKind> {
        match self {
            PieceKind::Time => Some(PieceKind::Plus),
            PieceKind::Plus => Some(PieceKind::Time),
            _ => None,
        }
    }

    /// Single-letter symbol used by the board diagram (lowercase).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Point => 'p',
            PieceKind::Hourglass => 'h',
            PieceKind::Time => 't',
            PieceKind::Plus => 'x',
            PieceKind::Sun => 's',
        }
    }
}

impl FromStr for PieceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of travel for a Point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Towards increasing `y`.
    Up,
    /// Towards decreasing `y`.
    Down,
}

impl Facing {
    /// Rank delta of one step.
    #[must_use]
    pub const fn dy(self) -> i8 {
        match self {
            Facing::Up => 1,
            Facing::Down => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Facing::Up => Facing::Down,
            Facing::Down => Facing::Up,
        }
    }

    /// The rank a Point facing this way turns around on.
    #[must_use]
    pub const fn far_rank(self) -> i32 {
        match self {
            Facing::Up => BOARD_HEIGHT as i32 - 1,
            Facing::Down => 0,
        }
    }

    /// Snapshot spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
        }
    }

    /// Initial facing of a player's Points: player 1 up, player 2 down.
    #[must_use]
    pub const fn initial(owner: PlayerId) -> Self {
        if owner.raw() == 1 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}

impl FromStr for Facing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Facing::Up),
            "down" => Ok(Facing::Down),
            other => Err(other.to_string()),
        }
    }
}

/// A piece on the board.
///
/// `facing` is `Some` exactly when `kind` is `Point`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    owner: PlayerId,
    square: Square,
    facing: Option<Facing>,
}

impl Piece {
    /// Create a piece. Points get their owner's initial facing.
    ///
    /// ```
    /// use talabia::core::{PlayerId, Square};
    /// use talabia::pieces::{Facing, Piece, PieceKind};
    ///
    /// let sq = Square::new(0, 4).unwrap();
    /// let point = Piece::new(PieceKind::Point, PlayerId::TWO, sq);
    /// assert_eq!(point.facing(), Some(Facing::Down));
    ///
    /// let sun = Piece::new(PieceKind::Sun, PlayerId::TWO, sq);
    /// assert_eq!(sun.facing(), None);
    /// ```
    #[must_use]
    pub const fn new(kind: PieceKind, owner: PlayerId, square: Square) -> Self {
        let facing = match kind {
            PieceKind::Point => Some(Facing::initial(owner)),
            _ => None,
        };
        Self {
            kind,
            owner,
            square,
            facing,
        }
    }

    /// Create a Point with an explicit facing.
    #[must_use]
    pub const fn point(owner: PlayerId, square: Square, facing: Facing) -> Self {
        Self {
            kind: PieceKind::Point,
            owner,
            square,
            facing: Some(facing),
        }
    }

    /// Override the facing of a Point. No effect on other kinds.
    #[must_use]
    pub const fn with_facing(mut self, facing: Facing) -> Self {
        if let PieceKind::Point = self.kind {
            self.facing = Some(facing);
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Direction of travel. `None` for everything but Points.
    #[must_use]
    pub const fn facing(&self) -> Option<Facing> {
        self.facing
    }

    #[must_use]
    pub fn is_sun(&self) -> bool {
        self.kind == PieceKind::Sun
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    /// Reverse a Point that stands on its far rank. Returns true if it turned.
    pub(crate) fn turn_around_at_far_rank(&mut self) -> bool {
        match self.facing {
            Some(facing) if self.square.y() == facing.far_rank() => {
                self.facing = Some(facing.reversed());
                true
            }
            _ => false,
        }
    }

    /// Rotate with the board: square flips and a Point's facing reverses.
    pub(crate) fn flip(&mut self) {
        self.square = self.square.flipped();
        self.facing = self.facing.map(Facing::reversed);
    }

    /// The Time/Plus counterpart of this piece, same owner and square.
    #[must_use]
    pub fn transformed(&self) -> Option<Piece> {
        self.kind
            .transformed()
            .map(|kind| Piece::new(kind, self.owner, self.square))
    }

    /// Diagram symbol: uppercase for player 1, lowercase for player 2.
    #[must_use]
    pub fn symbol(&self) -> char {
        let c = self.kind.symbol();
        if self.owner == PlayerId::ONE {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}
