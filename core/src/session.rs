use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    Unknown,
    Won,
    Lost,
}

impl GameResult {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A discrete player move on one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Open a closed, unflagged cell.
    Reveal(Coord2),
    /// Flag or unflag a closed cell.
    ToggleFlag(Coord2),
    /// Chord on an opened number.
    Chord(Coord2),
    /// Single-button play: chord when the cell is opened, toggle its flag otherwise.
    Primary(Coord2),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    Changed,
    Lost,
    Won,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

/// One round of play: the board plus the result, the done flag and the running flag count.
///
/// Every action is applied to the board and then judged before the next one is accepted. Once a result is reached
/// the whole board is revealed and further actions are refused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    board: Board,
    result: GameResult,
    done: bool,
    flagged: CellCount,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = Board::with_generator(config, RandomMinefieldGenerator::new(seed))?;
        Ok(Self::with_board(config, seed, board))
    }

    /// Session over an already built board, e.g. one made by [`Board::from_mines`].
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::new_unchecked(board.width(), board.height(), board.mine_count());
        Self::with_board(config, 0, board)
    }

    fn with_board(config: GameConfig, seed: u64, board: Board) -> Self {
        let flagged = board.count_flagged();
        let mut session = Self {
            config,
            seed,
            board,
            result: GameResult::Unknown,
            done: false,
            flagged,
        };
        // a board can be decided before any move, e.g. one without mines
        session.settle();
        session
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Flags placed by the player, including those placed by chords.
    pub fn flagged(&self) -> CellCount {
        self.flagged
    }

    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.flagged)
    }

    pub fn act(&mut self, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::Reveal(coords) => self.reveal(coords),
            Action::ToggleFlag(coords) => self.toggle_flag(coords),
            Action::Chord(coords) => self.chord(coords),
            Action::Primary(coords) => self.primary(coords),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        self.check_active()?;
        log::trace!("reveal {coords:?}");

        let hidden = self.board.at(coords).is_some_and(|cell| cell.is_hidden());
        let opened = if hidden {
            self.board.recursive_open(coords)
        } else {
            0
        };
        Ok(self.judge(opened > 0))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        self.check_active()?;
        log::trace!("toggle flag {coords:?}");

        let outcome = self.board.toggle_flag(coords);
        match outcome {
            FlagOutcome::Flagged => self.flagged += 1,
            FlagOutcome::Unflagged => self.flagged -= 1,
            FlagOutcome::NoChange => {}
        }
        Ok(self.judge(outcome.has_update()))
    }

    pub fn chord(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        self.check_active()?;
        log::trace!("chord {coords:?}");

        let outcome = self.board.try_mark_neighbours(coords);
        self.flagged += outcome.flagged;
        if !outcome.survived {
            log::debug!("Chord at {coords:?} opened a mine");
        }
        Ok(self.judge(outcome.has_update()))
    }

    fn primary(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        if self.board.at(coords).is_some_and(|cell| cell.is_opened()) {
            self.chord(coords)
        } else {
            self.toggle_flag(coords)
        }
    }

    /// Ends the round without a result, the board stays as it is.
    pub fn abandon(&mut self) {
        if !self.done {
            log::debug!("Round abandoned");
            self.done = true;
        }
    }

    /// Starts a new round on the same config with the next seed.
    pub fn reset(&mut self) -> Result<()> {
        self.reset_with_seed(self.seed.wrapping_add(1))
    }

    /// Starts a new round on the same config, replacing the board.
    pub fn reset_with_seed(&mut self, seed: u64) -> Result<()> {
        let board = Board::with_generator(self.config, RandomMinefieldGenerator::new(seed))?;
        log::debug!("New round with seed {seed}");
        *self = Self::with_board(self.config, seed, board);
        Ok(())
    }

    fn judge(&mut self, changed: bool) -> ActionOutcome {
        match self.settle() {
            GameResult::Won => ActionOutcome::Won,
            GameResult::Lost => ActionOutcome::Lost,
            GameResult::Unknown if changed => ActionOutcome::Changed,
            GameResult::Unknown => ActionOutcome::NoChange,
        }
    }

    fn settle(&mut self) -> GameResult {
        if self.done {
            return self.result;
        }

        let result = if self.board.has_exploded() {
            GameResult::Lost
        } else if self.board.is_won() {
            GameResult::Won
        } else {
            return GameResult::Unknown;
        };

        self.end_game(result);
        result
    }

    fn end_game(&mut self, result: GameResult) {
        log::debug!("Game over: {result:?}");
        self.result = result;
        self.done = true;
        self.board.show_all();
    }

    fn check_active(&self) -> Result<()> {
        if self.done {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
