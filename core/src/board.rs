use alloc::vec;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// The minefield: one [`Cell`] for every position in `[0, width) x [0, height)`.
///
/// The set of mines is fixed at construction. Positions outside the rectangle are never an error, every lookup or
/// action on them is a no-op.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board with uniformly random mines drawn from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    /// Builds a board with exactly the given mines.
    pub fn from_mines((width, height): Coord2, mines: &[Coord2]) -> Result<Self> {
        let config = GameConfig::new(width, height, 0)?;
        Self::from_layout(FixedMinefieldGenerator::new(mines).generate(&config))
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(&config);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        if layout.size() != config.size() {
            return Err(GameError::InvalidSize);
        }

        Self::from_layout(layout)
    }

    /// Places the layout's mines, derives neighbour counts, then opens the layout's start cell if it has one.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let (width, height) = layout.size();
        GameConfig::new(width, height, layout.mine_count())?;

        let mut board = Self {
            cells: Array2::default(layout.size().to_nd_index()),
            mine_count: 0,
        };

        for coords in layout.mines() {
            board.place_mine(coords);
        }

        match layout.start() {
            Some(start) => {
                let opened = board.recursive_open(start);
                log::debug!(
                    "New {width}x{height} board with {} mines, opened {opened} cells from {start:?}",
                    board.mine_count
                );
            }
            None => {
                log::debug!(
                    "New {width}x{height} board with {} mines, no safe zero cell to open",
                    board.mine_count
                );
            }
        }

        Ok(board)
    }

    /// [`Board::from_mines`] with every cell closed again.
    #[cfg(test)]
    pub(crate) fn from_mines_closed(size: Coord2, mines: &[Coord2]) -> Self {
        let mut board = Self::from_mines(size, mines).unwrap();
        for cell in board.cells.iter_mut() {
            cell.opened = false;
        }
        board
    }

    fn place_mine(&mut self, coords: Coord2) {
        let size = self.size();
        self.cells[coords.to_nd_index()].has_mine = true;
        self.mine_count += 1;

        for pos in neighbours(coords, size) {
            self.cells[pos.to_nd_index()].adjacent_mines += 1;
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    /// The cell at `coords`, `None` outside the board.
    pub fn at(&self, coords: Coord2) -> Option<&Cell> {
        if self.contains(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    fn at_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// In-board neighbours of `coords`.
    pub fn neighbours(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbours(coords, self.size())
    }

    /// Every `(coords, cell)` pair, `x` outermost.
    pub fn field(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    /// Read-only grid view indexed by `[x, y]`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn count_opened(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.opened).count() as CellCount
    }

    pub fn count_flagged(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.flagged).count() as CellCount
    }

    /// Flips the flag on a closed cell.
    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(cell) = self.at_mut(coords) else {
            return FlagOutcome::NoChange;
        };
        if cell.opened {
            return FlagOutcome::NoChange;
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    /// Opens `coords` and, while the opened cells are safe zeros, everything reachable through them.
    ///
    /// The fill stops one layer past the zero region, at numbered cells or mines, which are opened but not expanded.
    /// Flagged cells are left closed. Opening a mine is allowed here, deciding that the game is lost is up to the
    /// caller. Returns how many cells were opened.
    pub fn recursive_open(&mut self, coords: Coord2) -> CellCount {
        let size = self.size();
        let mut opened = 0;
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let Some(cell) = self.at_mut(visit_coords) else {
                continue;
            };
            if cell.opened || cell.flagged {
                continue;
            }

            cell.opened = true;
            opened += 1;

            if cell.is_safe_zero() {
                to_visit.extend(
                    neighbours(visit_coords, size)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        opened
    }

    /// Chord on an opened number: flags the closed neighbours when they must all be mines, or opens them when the
    /// flags around it already account for every mine.
    ///
    /// Anything else (absent, closed, mined or zero cell, or a count that matches neither case) is a no-op that
    /// reports survival.
    pub fn try_mark_neighbours(&mut self, coords: Coord2) -> ChordOutcome {
        let Some(&cell) = self.at(coords) else {
            return ChordOutcome::NO_OP;
        };
        if !cell.opened || cell.has_mine || cell.adjacent_mines == 0 {
            return ChordOutcome::NO_OP;
        }

        let mut flagged_neighbours = 0usize;
        let mut candidates: SmallVec<[Coord2; 8]> = SmallVec::new();
        for pos in self.neighbours(coords) {
            let neighbour = &self.cells[pos.to_nd_index()];
            if neighbour.opened {
                continue;
            }
            if neighbour.flagged {
                flagged_neighbours += 1;
            } else {
                candidates.push(pos);
            }
        }

        let expected = usize::from(cell.adjacent_mines);
        let flag_rest = flagged_neighbours + candidates.len() == expected;
        let open_rest = flagged_neighbours == expected;

        let mut outcome = ChordOutcome::NO_OP;
        for pos in candidates {
            if flag_rest {
                let candidate = &mut self.cells[pos.to_nd_index()];
                if !candidate.opened && !candidate.flagged {
                    candidate.flagged = true;
                    outcome.flagged += 1;
                }
            }
            if open_rest {
                outcome.opened += self.recursive_open(pos);
                if self.cells[pos.to_nd_index()].has_mine {
                    outcome.survived = false;
                    return outcome;
                }
            }
        }

        outcome
    }

    /// Whether an opened cell holds a mine.
    pub fn has_exploded(&self) -> bool {
        self.cells.iter().any(|cell| cell.opened && cell.has_mine)
    }

    /// The board is won once no hidden (closed, unflagged) mine sits alongside a hidden safe cell: either no hidden
    /// mines remain, or every hidden cell is a mine. Flagging the last mines is not required.
    ///
    /// An opened mine or a flag on a safe cell means not won.
    pub fn is_won(&self) -> bool {
        let mut hidden = 0;
        let mut hidden_mines = 0;

        for cell in self.cells.iter() {
            if cell.opened && cell.has_mine {
                return false;
            }
            if cell.flagged && !cell.has_mine {
                return false;
            }
            if cell.is_hidden() {
                hidden += 1;
                if cell.has_mine {
                    hidden_mines += 1;
                }
            }
        }

        hidden_mines == 0 || hidden_mines == hidden
    }

    /// End-of-game reveal: every safe cell is opened and every mine flagged.
    pub fn show_all(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.has_mine {
                cell.flagged = true;
            } else {
                cell.opened = true;
            }
        }
    }
}
