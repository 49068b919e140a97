//! Board squares and square sets.
//!
//! The board is 7 files wide (`x` in `0..7`) and 6 ranks tall (`y` in `0..6`).
//! Player 1 always views the board from `y = 0`; after every non-terminal
//! move the whole board is rotated 180°, so the player to move is always
//! "at the bottom".
//!
//! ## Square
//!
//! A `Square` can only be built for an on-grid coordinate, so off-grid
//! positions are never stored anywhere in the engine.
//!
//! ## SquareSet
//!
//! A 42-bit set backed by a `u64`, used for threat maps.

use serde::{Deserialize, Serialize};

/// Number of files (columns).
pub const BOARD_WIDTH: i8 = 7;

/// Number of ranks (rows).
pub const BOARD_HEIGHT: i8 = 6;

/// Total number of squares.
pub const SQUARE_COUNT: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The 8 single steps around a square, row by row from `dy = -1`.
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A square on the 7×6 grid.
///
/// Serializes as an `(x, y)` pair; deserializing an off-grid pair fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Square {
    x: i8,
    y: i8,
}

impl Square {
    /// Create a square, or `None` if the coordinate is off the grid.
    ///
    /// ```
    /// use talabia::core::Square;
    ///
    /// assert!(Square::new(6, 5).is_some());
    /// assert!(Square::new(7, 0).is_none());
    /// assert!(Square::new(0, -1).is_none());
    /// ```
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Option<Self> {
        if x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32 {
            Some(Self { x: x as i8, y: y as i8 })
        } else {
            None
        }
    }

    /// File (column), `0..7`.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.x as i32
    }

    /// Rank (row), `0..6`.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.y as i32
    }

    /// The square `(dx, dy)` away, clipped to the grid.
    #[must_use]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Self::new(self.x as i32 + dx as i32, self.y as i32 + dy as i32)
    }

    /// The square after a 180° rotation of the board: `(6 - x, 5 - y)`.
    ///
    /// ```
    /// use talabia::core::Square;
    ///
    /// let sq = Square::new(0, 1).unwrap();
    /// assert_eq!(sq.flipped(), Square::new(6, 4).unwrap());
    /// assert_eq!(sq.flipped().flipped(), sq);
    /// ```
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self {
            x: BOARD_WIDTH - 1 - self.x,
            y: BOARD_HEIGHT - 1 - self.y,
        }
    }

    /// Dense index `y * 7 + x`, in `0..42`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_WIDTH as usize + self.x as usize
    }

    /// Inverse of `index`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Self {
                x: (index % BOARD_WIDTH as usize) as i8,
                y: (index / BOARD_WIDTH as usize) as i8,
            })
        } else {
            None
        }
    }

    /// Iterate over every square, rank by rank from `y = 0`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).filter_map(Square::from_index)
    }

    /// The grid-clipped squares adjacent to this one.
    pub fn neighbours(self) -> impl Iterator<Item = Square> {
        KING_STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = String;

    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Square::new(x, y).ok_or_else(|| format!("square ({x}, {y}) is off the board"))
    }
}

impl From<Square> for (i32, i32) {
    fn from(sq: Square) -> Self {
        (sq.x(), sq.y())
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A set of squares backed by a 42-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Add a square.
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Remove a square.
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 == 1
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate squares in index order.
    pub fn iter(self) -> impl Iterator<Item = Square> {
        Square::all().filter(move |sq| self.contains(*sq))
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        set.extend(iter);
        set
    }
}
