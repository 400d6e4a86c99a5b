use serde::{Deserialize, Serialize};

/// State of a single board position.
///
/// `has_mine` and `adjacent_mines` are fixed when the board is built. `opened` only ever goes from `false` to `true`,
/// and `flagged` is only toggled while the cell is closed (the end-of-game reveal being the exception).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) adjacent_mines: u8,
    pub(crate) has_mine: bool,
    pub(crate) opened: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    /// Number of mines among the cell's in-board neighbours.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Neither opened nor flagged.
    pub const fn is_hidden(&self) -> bool {
        !self.opened && !self.flagged
    }

    /// A safe cell with no adjacent mines, the seed of a flood fill.
    pub const fn is_safe_zero(&self) -> bool {
        !self.has_mine && self.adjacent_mines == 0
    }
}
