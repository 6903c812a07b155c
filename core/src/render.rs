use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to know about one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Mine,
    Number(u8),
}

impl TileView {
    /// Digit to draw, if any. Revealed tiles without mined neighbors stay blank.
    pub const fn label(self) -> Option<u8> {
        match self {
            Self::Number(count) if count > 0 => Some(count),
            _ => None,
        }
    }
}

/// Banner drawn over a finished board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    Won,
    Lost,
}

impl Overlay {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => "You Win!",
            Self::Lost => "You Lose.",
        }
    }
}

/// Pixel rectangle of a tile, origin at the top-left of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Uniform square tiles filling a viewport of the given width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    size: Coord,
    tile_size: u32,
}

impl Layout {
    pub fn new(viewport_width: u32, size: Coord) -> Self {
        let tile_size = viewport_width.checked_div(size.into()).unwrap_or(0);
        log::debug!(
            "Layout for {}x{} board in {}px: {}px tiles",
            size,
            size,
            viewport_width,
            tile_size
        );
        Self { size, tile_size }
    }

    pub fn for_board(viewport_width: u32, board: &Board) -> Self {
        Self::new(viewport_width, board.size())
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Side of the drawn board, which can be a few pixels short of the viewport.
    pub const fn board_pixels(&self) -> u32 {
        self.tile_size * self.size as u32
    }

    pub fn rect(&self, (row, col): Coord2) -> TileRect {
        TileRect {
            x: u32::from(col) * self.tile_size,
            y: u32::from(row) * self.tile_size,
            width: self.tile_size,
            height: self.tile_size,
        }
    }
}

impl Board {
    pub fn view_at(&self, coords: Coord2) -> Option<TileView> {
        self.tile(coords).map(Tile::view)
    }

    /// Every tile with its view and rectangle, row by row.
    pub fn draw_list<'a>(
        &'a self,
        layout: &'a Layout,
    ) -> impl Iterator<Item = (Coord2, TileView, TileRect)> + 'a {
        self.iter_tiles()
            .map(move |tile| (tile.pos, tile.view(), layout.rect(tile.pos)))
    }

    /// Banner for a finished board. A board that ended on a mine still counts as won when
    /// [`Board::check_win`] holds.
    pub fn overlay(&self) -> Option<Overlay> {
        self.is_game_over().then(|| {
            if self.check_win() {
                Overlay::Won
            } else {
                Overlay::Lost
            }
        })
    }
}
