use rand::Rng;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection: pick any tile, skip it if it already holds a mine.
///
/// The generator is owned by the placer rather than shared process-wide, so a seeded placer
/// always produces the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R = SmallRng> {
    rng: R,
}

impl RandomPlacer<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinePlacer for RandomPlacer<R> {
    fn place(&mut self, config: BoardConfig) -> Result<Array2<bool>> {
        let size = config.size();
        let mut mines: Array2<bool> = Array2::default((size, size).to_nd_index());

        // BoardConfig keeps at least one safe tile, so this always terminates
        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < config.mines() {
            let coords = (
                self.rng.random_range(0..size),
                self.rng.random_range(0..size),
            );
            draws += 1;
            let tile = &mut mines[coords.to_nd_index()];
            if !*tile {
                *tile = true;
                placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on {}x{} board in {} draws",
            placed,
            size,
            size,
            draws
        );

        Ok(mines)
    }
}
