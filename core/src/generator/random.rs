use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: a coordinate that already holds a mine is re-rolled, not counted.
///
/// The start cell is drawn from the same generator, so the whole layout is a function of the config and the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: &GameConfig) -> MineLayout {
        let total_cells = config.total_cells();
        let size = config.size();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            let everywhere: Vec<Coord2> = (0..config.width)
                .flat_map(|x| (0..config.height).map(move |y| (x, y)))
                .collect();
            return MineLayout::from_mine_coords(size, &everywhere);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut taken: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mines = Vec::with_capacity(config.mines as usize);
        while (mines.len() as CellCount) < config.mines {
            let coords = (
                rng.random_range(0..config.width),
                rng.random_range(0..config.height),
            );
            let slot = &mut taken[coords.to_nd_index()];
            if *slot {
                continue;
            }
            *slot = true;
            mines.push(coords);
        }

        let layout = MineLayout::from_mine_coords(size, &mines);
        let candidates = layout.safe_zero_cells();
        let start = if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.random_range(0..candidates.len())])
        };
        layout.with_start(start)
    }
}
