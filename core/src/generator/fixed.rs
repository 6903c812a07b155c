use super::*;

/// Places mines on a predetermined set of tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    config: BoardConfig,
    mines: Array2<bool>,
}

impl FixedPlacer {
    pub fn new(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            let (row, col) = coords;
            if row >= size || col >= size {
                return Err(GameError::InvalidCoords);
            }
            let tile = &mut mines[coords.to_nd_index()];
            if *tile {
                return Err(GameError::DuplicateMine);
            }
            *tile = true;
        }

        let count = mine_coords
            .len()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        let config = BoardConfig::new(size, count)?;
        Ok(Self { config, mines })
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, config: BoardConfig) -> Result<Array2<bool>> {
        if config != self.config {
            log::warn!(
                "Fixed layout is {} but board asked for {}",
                self.config,
                config
            );
            return Err(GameError::LayoutMismatch);
        }
        Ok(self.mines.clone())
    }
}
