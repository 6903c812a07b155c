use serde::{Deserialize, Serialize};

use crate::*;

/// The three pointer actions the board understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Usually the left button: reveal.
    Primary,
    /// Usually the right button: toggle flag.
    Secondary,
    /// Usually the middle button: chord reveal.
    Tertiary,
}

impl PointerButton {
    pub const fn action(self, coords: Coord2) -> Action {
        match self {
            Self::Primary => Action::Reveal(coords),
            Self::Secondary => Action::Flag(coords),
            Self::Tertiary => Action::Chord(coords),
        }
    }
}

impl Layout {
    /// Maps a pointer position relative to the board origin onto a tile.
    ///
    /// Positions left of or above the board, past its last row or column, or not finite are
    /// rejected, so the result is always safe to pass to [`Game::handle`].
    pub fn tile_at(&self, px: f64, py: f64) -> Option<Coord2> {
        if self.tile_size() == 0 || !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return None;
        }

        let tile_size = f64::from(self.tile_size());
        let row = floor_index(py / tile_size)?;
        let col = floor_index(px / tile_size)?;
        if row < self.size() && col < self.size() {
            Some((row, col))
        } else {
            None
        }
    }

    pub fn action_at(&self, button: PointerButton, px: f64, py: f64) -> Option<Action> {
        self.tile_at(px, py).map(|coords| button.action(coords))
    }
}

/// Truncation of a non-negative value, which equals its floor.
fn floor_index(value: f64) -> Option<Coord> {
    if value >= f64::from(Coord::MAX) + 1.0 {
        None
    } else {
        Some(value as Coord)
    }
}
