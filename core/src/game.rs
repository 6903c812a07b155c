use serde::{Deserialize, Serialize};

use crate::*;

/// Player input, already translated to tile coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    SelectDifficulty(Difficulty),
}

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
/// - Won | Lost -> Playing, only through a new difficulty selection
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl From<Option<Overlay>> for GameStatus {
    fn from(overlay: Option<Overlay>) -> Self {
        match overlay {
            None => Self::Playing,
            Some(Overlay::Won) => Self::Won,
            Some(Overlay::Lost) => Self::Lost,
        }
    }
}

/// What one gameplay action did to the board, before win/loss is settled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Effect {
    Unchanged,
    Changed,
    HitMine,
}

impl From<RevealOutcome> for Effect {
    fn from(outcome: RevealOutcome) -> Self {
        match outcome {
            RevealOutcome::HitMine => Self::HitMine,
            outcome if outcome.has_update() => Self::Changed,
            _ => Self::Unchanged,
        }
    }
}

impl From<MarkOutcome> for Effect {
    fn from(outcome: MarkOutcome) -> Self {
        if outcome.has_update() {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing changed: stale input on a finished board, a guarded tile, or a no-op toggle.
    Ignored,
    Updated,
    Regenerated,
    Won,
    Lost,
}

impl ActionOutcome {
    /// Whether the board should be redrawn
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One game session: the current board, the difficulty it was built from, and the placer used
/// to build the next one.
#[derive(Clone, Debug)]
pub struct Game<P = RandomPlacer> {
    board: Board,
    difficulty: Difficulty,
    status: GameStatus,
    placer: P,
}

impl<P: MinePlacer> Game<P> {
    pub fn new(difficulty: Difficulty, mut placer: P) -> Result<Self> {
        let board = Board::generate(difficulty.config(), &mut placer)?;
        Ok(Self {
            board,
            difficulty,
            status: GameStatus::Playing,
            placer,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.board.overlay()
    }

    /// Applies one player action.
    ///
    /// Gameplay actions on a finished board are ignored. Coordinates outside the board are
    /// rejected with [`GameError::InvalidCoords`] and leave the game untouched.
    pub fn handle(&mut self, action: Action) -> Result<ActionOutcome> {
        use Action::*;

        match action {
            SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            Reveal(coords) => self.play(coords, |board, coords| {
                if board[coords].flagged {
                    Ok(Effect::Unchanged)
                } else {
                    board.reveal_tile(coords).map(Effect::from)
                }
            }),
            Flag(coords) => self.play(coords, |board, coords| {
                board.toggle_flag(coords).map(Effect::from)
            }),
            Chord(coords) => self.play(coords, |board, coords| {
                if board[coords].revealed {
                    board.reveal_adjacent(coords).map(Effect::from)
                } else {
                    Ok(Effect::Unchanged)
                }
            }),
        }
    }

    fn play(
        &mut self,
        coords: Coord2,
        op: impl FnOnce(&mut Board, Coord2) -> Result<Effect>,
    ) -> Result<ActionOutcome> {
        let coords = self.board.config().validate_coords(coords)?;

        if self.status.is_finished() {
            log::debug!("Ignoring input at {:?} on finished game", coords);
            return Ok(ActionOutcome::Ignored);
        }

        let effect = op(&mut self.board, coords)?;
        Ok(self.settle(effect))
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<ActionOutcome> {
        self.board = Board::generate(difficulty.config(), &mut self.placer)?;
        self.difficulty = difficulty;
        self.status = GameStatus::Playing;
        log::debug!("New game: {}", difficulty);
        Ok(ActionOutcome::Regenerated)
    }

    /// Turns a board-level effect into a game transition. Revealing a mine ends the game; whether
    /// it ends as a win is still decided by [`Board::check_win`].
    fn settle(&mut self, effect: Effect) -> ActionOutcome {
        if effect == Effect::HitMine {
            self.board.trigger_loss();
        } else {
            self.board.finish_if_won();
        }

        self.status = GameStatus::from(self.board.overlay());
        match self.status {
            GameStatus::Won => ActionOutcome::Won,
            GameStatus::Lost => ActionOutcome::Lost,
            GameStatus::Playing if effect == Effect::Changed => ActionOutcome::Updated,
            GameStatus::Playing => ActionOutcome::Ignored,
        }
    }
}
