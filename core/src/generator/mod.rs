use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine positions for a new [`Board`].
///
/// This is the only place randomness enters the core, so a board is fully determined by its config and generator.
pub trait MinefieldGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout;
}

/// Where the mines are, plus the safe zero cell to open before the first move.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
    start: Option<Coord2>,
}

impl MineLayout {
    /// Layout of the given mines on a `size` board; repeated coordinates count once and ones outside the board are
    /// dropped. `size` must be positive in both axes.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Self {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mine_count = 0;

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                log::warn!("Dropping mine at {coords:?}, outside of {size:?} board");
                continue;
            }
            let slot = &mut mine_mask[coords.to_nd_index()];
            if !*slot {
                *slot = true;
                mine_count += 1;
            }
        }

        Self {
            mine_mask,
            mine_count,
            start: None,
        }
    }

    /// Sets the preferred start cell, kept only when it is a safe zero cell.
    pub fn with_start(mut self, start: Option<Coord2>) -> Self {
        self.start = start.filter(|&coords| self.is_safe_zero(coords));
        if let (Some(coords), None) = (start, self.start) {
            log::warn!("Ignoring start cell {coords:?}, it is not a safe zero cell");
        }
        self
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mine_mask.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn start(&self) -> Option<Coord2> {
        self.start
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        neighbours(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    fn is_safe_zero(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && !self[coords] && self.adjacent_mine_count(coords) == 0
    }

    /// Mine positions, `x` outermost.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    /// Safe cells without adjacent mines, `x` outermost: the candidates for the start cell.
    pub fn safe_zero_cells(&self) -> Vec<Coord2> {
        self.mine_mask
            .indexed_iter()
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .filter(|&coords| self.is_safe_zero(coords))
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_counts_each_in_range_mine_once() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (5, 1), (0, 0), (2, 2), (-1, 0)]);

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.mines().collect::<Vec<_>>(), [(0, 0), (2, 2)]);
        assert!(layout.contains_mine((2, 2)));
        assert!(!layout.contains_mine((3, 3)));
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
    }

    #[test]
    fn start_must_be_a_safe_zero_cell() {
        let layout = MineLayout::from_mine_coords((4, 1), &[(0, 0)]);
        assert_eq!(layout.safe_zero_cells(), [(2, 0), (3, 0)]);

        assert_eq!(layout.clone().with_start(Some((3, 0))).start(), Some((3, 0)));
        assert_eq!(layout.clone().with_start(Some((1, 0))).start(), None);
        assert_eq!(layout.with_start(Some((0, 0))).start(), None);
    }
}
