#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::BitOr;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use difficulty::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use input::*;
pub use render::*;
pub use tile::*;
pub use types::*;

mod board;
mod difficulty;
mod error;
mod game;
mod generator;
mod input;
mod render;
mod tile;
mod types;

/// Side length and mine count of a square board.
///
/// Always describes a board that has at least one tile and at least one safe tile, so mine
/// placement is guaranteed to terminate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    size: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawBoardConfig {
    size: Coord,
    mines: CellCount,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = GameError;

    fn try_from(raw: RawBoardConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl BoardConfig {
    pub(crate) const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 {
            log::warn!("Rejected board config with no tiles");
            return Err(GameError::EmptyBoard);
        }
        if mines >= square(size) {
            log::warn!(
                "Rejected board config, requested {} mines but a {}x{} board fits at most {}",
                mines,
                size,
                size,
                square(size) - 1
            );
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    /// Mine count derived from a percentage of the tiles, rounded down.
    pub fn from_percentage(size: Coord, percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(GameError::InvalidPercentage);
        }
        let total = u32::from(square(size));
        let mines = total * u32::from(percent) / 100;
        Self::new(size, mines.try_into().map_err(|_| GameError::TooManyMines)?)
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_tiles(&self) -> CellCount {
        square(self.size)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles() - self.mines
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size && col < self.size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

/// Parses the `<size>_<mines>` command form, e.g. `20_40`.
impl FromStr for BoardConfig {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let (size, mines) = s.trim().split_once('_').ok_or(GameError::InvalidFormat)?;
        let size = size.parse().map_err(|_| GameError::InvalidFormat)?;
        let mines = mines.parse().map_err(|_| GameError::InvalidFormat)?;
        Self::new(size, mines)
    }
}

impl fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.size, self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of revealing one or more tiles. Revealing a mine does not end the game by itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
