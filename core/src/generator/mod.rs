use ndarray::Array2;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy deciding which tiles of a fresh board hold mines.
pub trait MinePlacer {
    /// Returns a `size x size` mask with exactly `config.mines()` tiles set.
    fn place(&mut self, config: BoardConfig) -> Result<Array2<bool>>;
}

impl<P: MinePlacer + ?Sized> MinePlacer for &mut P {
    fn place(&mut self, config: BoardConfig) -> Result<Array2<bool>> {
        (**self).place(config)
    }
}
