use serde::{Deserialize, Serialize};

use crate::*;

/// One cell of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Coord2,
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
}

impl Tile {
    pub const fn new(pos: Coord2, is_mine: bool) -> Self {
        Self {
            pos,
            is_mine,
            adjacent_mines: 0,
            revealed: false,
            flagged: false,
        }
    }

    /// Safe tile with no mined neighbors. Only these keep a cascade going.
    pub const fn is_blank(&self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }

    /// Hidden tiles can be revealed unless a flag guards them.
    pub const fn is_revealable(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// What a renderer should draw for this tile.
    pub const fn view(&self) -> TileView {
        match (self.revealed, self.is_mine) {
            (false, _) if self.flagged => TileView::Flagged,
            (false, _) => TileView::Hidden,
            (true, true) => TileView::Mine,
            (true, false) => TileView::Number(self.adjacent_mines),
        }
    }
}
