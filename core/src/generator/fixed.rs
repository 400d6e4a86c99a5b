use alloc::vec::Vec;

use super::*;

/// Replays a known mine layout, for tests and for re-creating a board someone already played.
///
/// The config's mine count is not consulted, the layout has exactly the listed mines.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout {
        let layout = MineLayout::from_mine_coords(config.size(), &self.mines);
        let start = layout.safe_zero_cells().first().copied();
        layout.with_start(start)
    }
}
