use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tiles plus the terminal `game_over` flag.
///
/// Tiles are created in bulk by [`Board::generate`] and never recreated afterwards. Reveal and
/// flag operations only flip per-tile bits; deciding what a revealed mine means is left to the
/// caller (see [`Game`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    tiles: Array2<Tile>,
    game_over: bool,
}

impl Board {
    pub fn generate<P: MinePlacer + ?Sized>(config: BoardConfig, placer: &mut P) -> Result<Self> {
        let mines = placer.place(config)?;
        let side = usize::from(config.size());
        if mines.dim() != (side, side) {
            log::warn!(
                "Mine mask has shape {:?}, expected {}x{}",
                mines.dim(),
                side,
                side
            );
            return Err(GameError::LayoutMismatch);
        }

        let count = mines.iter().filter(|&&mine| mine).count();
        if count != usize::from(config.mines()) {
            log::warn!(
                "Generated mine count mismatch, actual: {}, requested: {}",
                count,
                config.mines()
            );
            return Err(GameError::LayoutMismatch);
        }

        // indices are bounded by config.size(), which is a Coord
        let tiles = Array2::from_shape_fn((side, side), |(row, col)| {
            let pos = (row as Coord, col as Coord);
            let mut tile = Tile::new(pos, mines[[row, col]]);
            tile.adjacent_mines = mines
                .iter_neighbors(pos)
                .filter(|&neighbor| mines[neighbor.to_nd_index()])
                .count() as u8;
            tile
        });

        log::debug!("Generated board {}", config);
        Ok(Self {
            config,
            tiles,
            game_over: false,
        })
    }

    /// Board with mines on exactly the given tiles.
    pub fn with_mines(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut placer = FixedPlacer::new(size, mine_coords)?;
        Self::generate(placer.config(), &mut placer)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tile(&self, coords: Coord2) -> Option<&Tile> {
        self.tiles.get(coords.to_nd_index())
    }

    /// Tiles in row-major order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.revealed)
    }

    /// Mines not yet covered by a flag. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.flagged_count() as isize)
    }

    /// Reveals a hidden, unflagged tile, cascading through blank tiles.
    pub fn reveal_tile(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.reveal_single_tile(coords))
    }

    /// Chord reveal: reveals every hidden, unflagged neighbor of an already revealed tile.
    pub fn reveal_adjacent(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if !self.tiles[coords.to_nd_index()].revealed {
            return Ok(RevealOutcome::NoChange);
        }

        log::debug!("Chord reveal around {:?}", coords);
        Ok(self
            .neighbors(coords)
            .map(|neighbor| self.reveal_single_tile(neighbor))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];

        if tile.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        tile.flagged = !tile.flagged;
        log::debug!("Flag at {:?}: {}", coords, tile.flagged);
        Ok(MarkOutcome::Changed)
    }

    /// Won when every mine is flagged, or when every safe tile is revealed.
    pub fn check_win(&self) -> bool {
        let flagged_mines = self.count_tiles(|tile| tile.is_mine && tile.flagged);
        if flagged_mines == self.mine_count() {
            return true;
        }

        let revealed_safe = self.count_tiles(|tile| !tile.is_mine && tile.revealed);
        revealed_safe == self.config.safe_tiles()
    }

    /// Ends the game and uncovers every mine. Safe tiles keep their state.
    pub fn trigger_loss(&mut self) {
        self.game_over = true;
        for tile in self.tiles.iter_mut().filter(|tile| tile.is_mine) {
            tile.revealed = true;
        }
        log::debug!("Game lost");
    }

    /// Ends the game if [`Board::check_win`] holds. Returns whether it did.
    pub fn finish_if_won(&mut self) -> bool {
        if self.game_over || !self.check_win() {
            return false;
        }
        self.game_over = true;
        log::debug!("Game won");
        true
    }

    fn reveal_single_tile(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = &mut self.tiles[coords.to_nd_index()];

        if !tile.is_revealable() {
            return RevealOutcome::NoChange;
        }

        tile.revealed = true;
        log::debug!(
            "Reveal tile at {:?}, mine: {}, count: {}",
            coords,
            tile.is_mine,
            tile.adjacent_mines
        );

        if tile.is_mine {
            return RevealOutcome::HitMine;
        }
        if tile.is_blank() {
            self.cascade_from(coords);
        }
        RevealOutcome::Revealed
    }

    /// Flood fill from a revealed blank tile using an explicit stack.
    ///
    /// Only blank tiles expand, and a blank tile has no mined neighbors, so the fill never
    /// uncovers a mine. Flagged tiles are left alone.
    fn cascade_from(&mut self, start: Coord2) {
        let mut pending: Vec<Coord2> = self.revealable_neighbors(start).collect();
        log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", start, pending);

        while let Some(coords) = pending.pop() {
            let tile = &mut self.tiles[coords.to_nd_index()];
            if !tile.is_revealable() {
                continue;
            }

            tile.revealed = true;
            let blank = tile.is_blank();
            log::trace!("Flood revealed tile at {:?}, count: {}", coords, tile.adjacent_mines);

            if blank {
                let next: Vec<Coord2> = self.revealable_neighbors(coords).collect();
                pending.extend(next);
            }
        }
    }

    fn revealable_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.neighbors(coords)
            .filter(|&pos| self.tiles[pos.to_nd_index()].is_revealable())
    }

    fn count_tiles(&self, predicate: impl Fn(&Tile) -> bool) -> CellCount {
        // bounded by the tile total, which is a CellCount
        self.tiles.iter().filter(|&tile| predicate(tile)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::with_mines(size, mines).unwrap()
    }

    fn revealed(board: &Board) -> Vec<Coord2> {
        board
            .iter_tiles()
            .filter(|tile| tile.revealed)
            .map(|tile| tile.pos)
            .collect()
    }

    #[test]
    fn generated_boards_have_exact_mines_and_counts() {
        for seed in 0..20 {
            let mut placer = RandomPlacer::from_seed(seed);
            let board = Board::generate(Difficulty::Easy.config(), &mut placer).unwrap();

            assert_eq!(board.iter_tiles().filter(|tile| tile.is_mine).count(), 10);
            for tile in board.iter_tiles() {
                let literal = board
                    .neighbors(tile.pos)
                    .filter(|&pos| board[pos].is_mine)
                    .count();
                assert_eq!(usize::from(tile.adjacent_mines), literal, "at {:?}", tile.pos);
            }
            assert!(!board.is_game_over());
        }
    }

    #[test]
    fn tiles_know_their_position() {
        let board = board(3, &[]);

        assert_eq!(board[(2, 1)].pos, (2, 1));
        assert_eq!(board.tile((3, 0)), None);
    }

    #[test]
    fn corner_mines_count_only_in_bounds_neighbors() {
        let board = board(4, &[(0, 0), (3, 3)]);

        assert_eq!(board[(0, 1)].adjacent_mines, 1);
        assert_eq!(board[(1, 1)].adjacent_mines, 1);
        assert_eq!(board[(2, 2)].adjacent_mines, 1);
        assert_eq!(board[(0, 3)].adjacent_mines, 0);
        assert_eq!(board[(3, 0)].adjacent_mines, 0);
    }

    #[test]
    fn cascade_stops_at_numbered_boundary() {
        let mut board = board(4, &[(0, 0), (3, 3)]);

        assert_eq!(board.reveal_tile((2, 0)), Ok(RevealOutcome::Revealed));

        assert!(!board[(0, 0)].revealed);
        assert!(!board[(3, 3)].revealed);
        assert_eq!(board.revealed_count(), 14);
        assert!(board.check_win());
    }

    #[test]
    fn cascade_region_is_bounded_by_numbers() {
        // column of mines splits the board into two regions
        let mut board = board(5, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);

        board.reveal_tile((2, 0)).unwrap();

        for tile in board.iter_tiles() {
            let expected = tile.pos.1 < 2;
            assert_eq!(tile.revealed, expected, "at {:?}", tile.pos);
        }
        assert_eq!(board[(2, 1)].adjacent_mines, 3);
    }

    #[test]
    fn numbered_tile_does_not_cascade() {
        let mut board = board(3, &[(0, 0)]);

        board.reveal_tile((1, 1)).unwrap();

        assert_eq!(revealed(&board), vec![(1, 1)]);
    }

    #[test]
    fn cascade_skips_flagged_and_revealed_tiles() {
        let mut board = board(3, &[]);
        board.toggle_flag((1, 1)).unwrap();

        board.reveal_tile((0, 0)).unwrap();

        assert!(board[(1, 1)].flagged);
        assert!(!board[(1, 1)].revealed);
        assert_eq!(board.revealed_count(), 8);
    }

    #[test]
    fn flag_guards_direct_reveal() {
        let mut board = board(3, &[(2, 2)]);
        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.reveal_tile((0, 0)), Ok(RevealOutcome::NoChange));
        assert!(!board[(0, 0)].revealed);
    }

    #[test]
    fn repeated_reveal_is_a_no_op() {
        let mut board = board(3, &[(2, 2)]);

        assert_eq!(board.reveal_tile((1, 1)), Ok(RevealOutcome::Revealed));
        assert_eq!(board.reveal_tile((1, 1)), Ok(RevealOutcome::NoChange));
    }

    #[test]
    fn revealing_a_mine_only_flips_the_bit() {
        let mut board = board(2, &[(0, 0)]);

        assert_eq!(board.reveal_tile((0, 0)), Ok(RevealOutcome::HitMine));
        assert!(board[(0, 0)].revealed);
        assert!(!board.is_game_over());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut board = board(2, &[]);

        assert_eq!(board.reveal_tile((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.reveal_adjacent((0, 5)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn toggling_flag_twice_restores_tile() {
        let mut board = board(3, &[(1, 1)]);

        assert_eq!(board.toggle_flag((0, 2)), Ok(MarkOutcome::Changed));
        assert!(board[(0, 2)].flagged);
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.toggle_flag((0, 2)), Ok(MarkOutcome::Changed));
        assert!(!board[(0, 2)].flagged);
        assert_eq!(board.mines_left(), 1);
    }

    #[test]
    fn revealed_tiles_cannot_be_flagged() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal_tile((1, 1)).unwrap();

        assert_eq!(board.toggle_flag((1, 1)), Ok(MarkOutcome::NoChange));
        assert!(!board[(1, 1)].flagged);
    }

    #[test]
    fn chord_reveals_unflagged_neighbors() {
        let mut board = board(3, &[(0, 1), (2, 1)]);
        board.reveal_tile((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        board.toggle_flag((2, 1)).unwrap();

        assert_eq!(board.reveal_adjacent((1, 1)), Ok(RevealOutcome::Revealed));

        assert_eq!(board[(1, 0)].adjacent_mines, 2);
        assert!(board[(1, 0)].revealed);
        assert!(board[(0, 0)].revealed);
        assert!(!board[(0, 1)].revealed);
        assert!(!board[(2, 1)].revealed);
    }

    #[test]
    fn chord_reports_unflagged_mine() {
        let mut board = board(3, &[(0, 1), (2, 1)]);
        board.reveal_tile((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();

        assert_eq!(board.reveal_adjacent((1, 1)), Ok(RevealOutcome::HitMine));
        assert!(board[(2, 1)].revealed);
        assert!(!board[(0, 1)].revealed);
    }

    #[test]
    fn chord_cascades_through_blank_neighbors() {
        let mut board = board(5, &[(0, 0)]);
        board.reveal_tile((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        board.reveal_adjacent((1, 1)).unwrap();

        assert_eq!(board.revealed_count(), 24);
        assert!(!board[(0, 0)].revealed);
    }

    #[test]
    fn chord_on_hidden_tile_does_nothing() {
        let mut board = board(3, &[]);

        assert_eq!(board.reveal_adjacent((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn win_by_flagging_every_mine() {
        let mut board = board(3, &[(0, 0), (2, 2)]);
        board.toggle_flag((0, 0)).unwrap();
        assert!(!board.check_win());

        board.toggle_flag((2, 2)).unwrap();
        assert!(board.check_win());
    }

    #[test]
    fn win_by_revealing_every_safe_tile() {
        let mut board = board(2, &[(0, 0)]);
        board.reveal_tile((0, 1)).unwrap();
        board.reveal_tile((1, 0)).unwrap();
        assert!(!board.check_win());

        board.reveal_tile((1, 1)).unwrap();
        assert!(board.check_win());
        assert!(board.finish_if_won());
        assert!(board.is_game_over());
        assert!(!board.finish_if_won());
    }

    #[test]
    fn partial_progress_is_not_a_win() {
        let mut board = board(3, &[(0, 0), (2, 2)]);
        board.toggle_flag((0, 0)).unwrap();
        board.toggle_flag((1, 1)).unwrap();
        board.reveal_tile((0, 2)).unwrap();

        assert!(!board.check_win());
        assert!(!board.finish_if_won());
        assert!(!board.is_game_over());
    }

    #[test]
    fn loss_reveals_mines_and_keeps_safe_tiles() {
        let mut board = board(4, &[(0, 0), (3, 3), (0, 3)]);
        board.reveal_tile((1, 1)).unwrap();
        board.toggle_flag((0, 3)).unwrap();
        let before: Vec<_> = board
            .iter_tiles()
            .filter(|tile| !tile.is_mine)
            .map(|tile| (tile.pos, tile.revealed))
            .collect();

        board.trigger_loss();

        assert!(board.is_game_over());
        assert!(board.iter_tiles().filter(|tile| tile.is_mine).all(|tile| tile.revealed));
        let after: Vec<_> = board
            .iter_tiles()
            .filter(|tile| !tile.is_mine)
            .map(|tile| (tile.pos, tile.revealed))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_board_opens_in_one_reveal() {
        let mut board = board(6, &[]);

        assert!(board.iter_tiles().all(|tile| tile.adjacent_mines == 0));
        board.reveal_tile((4, 1)).unwrap();

        assert_eq!(board.revealed_count(), 36);
        assert!(board.check_win());
    }

    #[test]
    fn largest_board_cascade_does_not_recurse() {
        let config = BoardConfig::new(Coord::MAX, 0).unwrap();
        let mut board = Board::generate(config, &mut RandomPlacer::from_seed(0)).unwrap();

        board.reveal_tile((0, 0)).unwrap();

        assert_eq!(board.revealed_count(), config.total_tiles());
    }

    #[test]
    fn generate_rejects_mismatched_placer() {
        let mut placer = FixedPlacer::new(3, &[(0, 0)]).unwrap();

        assert_eq!(
            Board::generate(BoardConfig::new(3, 2).unwrap(), &mut placer),
            Err(GameError::LayoutMismatch)
        );
    }
}
