//! Sliding Puzzle Solver Library
//!
//! Searches the space of tile slides for a path between two arrangements of
//! an N x N sliding-tile puzzle, using uninformed or heuristic-guided search.

pub mod board;
pub mod error;
pub mod heuristic;
pub mod search;
pub mod stats;

use rand::rngs::StdRng;
use rand::SeedableRng;

use board::{format_state, Action, Board, State};
use error::PuzzleError;
use search::Algorithm;
use stats::SearchReport;

/// Trait that erases the compile-time board parameters for dynamic dispatch.
///
/// The const generics (`N`, `CELLS`) are hidden behind the vtable, so callers
/// can pick a board width at runtime and pass plain tile lists.
pub trait SolverOps {
    fn width(&self) -> usize;
    /// Tiles of the canonical goal.
    fn goal(&self) -> Vec<u8>;
    /// Validates both states and runs `algorithm` between them.
    fn solve(
        &self,
        algorithm: &Algorithm,
        initial: &[u8],
        goal: &[u8],
    ) -> Result<SearchReport, PuzzleError>;
    fn is_solvable(&self, initial: &[u8], goal: &[u8]) -> Result<bool, PuzzleError>;
    /// A state `moves` random slides away from the canonical goal.
    fn scramble(&self, moves: usize, seed: Option<u64>) -> Vec<u8>;
    /// Applies `actions` one by one, returning every state including the first.
    fn replay(&self, initial: &[u8], actions: &[Action]) -> Result<Vec<Vec<u8>>, PuzzleError>;
    fn format_tiles(&self, tiles: &[u8]) -> Result<String, PuzzleError>;
}

impl<const N: usize, const CELLS: usize> SolverOps for Board<N, CELLS> {
    fn width(&self) -> usize {
        N
    }

    fn goal(&self) -> Vec<u8> {
        State::<CELLS>::goal().tiles().to_vec()
    }

    fn solve(
        &self,
        algorithm: &Algorithm,
        initial: &[u8],
        goal: &[u8],
    ) -> Result<SearchReport, PuzzleError> {
        let initial = State::<CELLS>::from_tiles(initial)?;
        let goal = State::<CELLS>::from_tiles(goal)?;
        Ok(search::solve(*self, algorithm, &initial, &goal))
    }

    fn is_solvable(&self, initial: &[u8], goal: &[u8]) -> Result<bool, PuzzleError> {
        let initial = State::<CELLS>::from_tiles(initial)?;
        let goal = State::<CELLS>::from_tiles(goal)?;
        Ok(self.is_reachable(&initial, &goal))
    }

    fn scramble(&self, moves: usize, seed: Option<u64>) -> Vec<u8> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Board::scramble(self, &State::goal(), moves, &mut rng)
            .tiles()
            .to_vec()
    }

    fn replay(&self, initial: &[u8], actions: &[Action]) -> Result<Vec<Vec<u8>>, PuzzleError> {
        let mut state = State::<CELLS>::from_tiles(initial)?;
        let mut states = Vec::with_capacity(actions.len() + 1);
        states.push(state.tiles().to_vec());

        for &action in actions {
            state = self.try_apply(&state, action)?;
            states.push(state.tiles().to_vec());
        }

        Ok(states)
    }

    fn format_tiles(&self, tiles: &[u8]) -> Result<String, PuzzleError> {
        let state = State::<CELLS>::from_tiles(tiles)?;
        Ok(format_state::<N, CELLS>(&state))
    }
}

pub static BOARD_2: Board<2, 4> = Board::new();
pub static BOARD_3: Board<3, 9> = Board::new();
pub static BOARD_4: Board<4, 16> = Board::new();
pub static BOARD_5: Board<5, 25> = Board::new();

/// Resolves a runtime grid width to its board definition.
pub fn board_for_width(width: usize) -> Result<&'static dyn SolverOps, PuzzleError> {
    match width {
        2 => Ok(&BOARD_2),
        3 => Ok(&BOARD_3),
        4 => Ok(&BOARD_4),
        5 => Ok(&BOARD_5),
        _ => Err(PuzzleError::UnsupportedWidth(width)),
    }
}
