//! Minesweeper game core: the board model, mine placement, flood-fill reveal, chording and win/loss evaluation.
//!
//! Nothing here knows about rendering or input. A presentation layer owns a [`GameSession`], feeds it discrete
//! [`Action`]s and reads the board back through [`Board::field`].

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine count for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// The field the game starts with when nothing else is chosen.
    pub const fn classic() -> Self {
        Self::new_unchecked(10, 10, 20)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    /// Rejects non-positive dimensions and more mines than cells; every board is built through this check.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Result of [`Board::try_mark_neighbours`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChordOutcome {
    /// Neighbours that were flagged by this chord.
    pub flagged: CellCount,
    /// Cells opened by this chord, flood fill included.
    pub opened: CellCount,
    /// `false` when one of the opened neighbours held a mine.
    pub survived: bool,
}

impl ChordOutcome {
    pub const NO_OP: Self = Self {
        flagged: 0,
        opened: 0,
        survived: true,
    };

    pub const fn has_update(&self) -> bool {
        self.flagged > 0 || self.opened > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_more_mines_than_cells() {
        assert_eq!(GameConfig::new(2, 2, 5), Err(GameError::TooManyMines));
        assert!(GameConfig::new(2, 2, 4).is_ok());
    }

    #[test]
    fn config_rejects_empty_boards() {
        assert_eq!(GameConfig::new(0, 5, 0), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new(5, -1, 0), Err(GameError::InvalidSize));
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::classic(),
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::default(), GameConfig::classic());
        assert_eq!(GameConfig::expert().safe_cells(), 381);
    }

    #[test]
    fn config_serializes_as_flat_json() {
        let json = serde_json::to_string(&GameConfig::beginner()).unwrap();
        assert_eq!(json, r#"{"width":9,"height":9,"mines":10}"#);

        let parsed: GameConfig = serde_json::from_str(r#"{"width":3,"height":4,"mines":2}"#).unwrap();
        assert_eq!(parsed, GameConfig::new_unchecked(3, 4, 2));
    }
}
