//! Board geometry and the state/action model for sliding-tile puzzles.
//!
//! Generic over grid width (`N`) and total cell count (`CELLS = N^2`).
//! A state is a flat row-major array where each cell holds a tile number
//! (1-based) or 0 for the blank. An action is the flat index of the tile
//! that slides into the blank.

use std::fmt;

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PuzzleError;

/// Flat index of the tile that swaps places with the blank.
pub type Action = usize;

/// Legal actions for a single state (a cell has at most four neighbours).
pub type Actions = ArrayVec<Action, 4>;

/// Tile number of the blank.
pub const BLANK: u8 = 0;

/// Largest supported board: tiles must fit in a `u8`.
const MAX_CELLS: usize = u8::MAX as usize + 1;

/// Converts a linear cell index to (row, col) coordinates.
#[inline(always)]
pub const fn idx_to_coord<const N: usize>(cell_index: usize) -> (usize, usize) {
    (cell_index / N, cell_index % N)
}

/// Converts (row, col) coordinates to a linear cell index.
///
/// Index order is row-major: `idx = row * N + col`.
#[inline(always)]
pub const fn coord_to_idx<const N: usize>(row: usize, col: usize) -> usize {
    row * N + col
}

/// Grid distance between two cells, `|drow| + |dcol|`.
#[inline]
pub fn cell_distance<const N: usize>(from: usize, to: usize) -> usize {
    let (from_row, from_col) = idx_to_coord::<N>(from);
    let (to_row, to_col) = idx_to_coord::<N>(to);
    from_row.abs_diff(to_row) + from_col.abs_diff(to_col)
}

/// An arrangement of tiles on the board.
///
/// Equality and hashing are structural, which is what cycle detection relies on.
/// Ordering is lexicographic over the tiles (the cached blank index never
/// decides a comparison since it is determined by the tiles).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct State<const CELLS: usize> {
    tiles: [u8; CELLS],
    blank: usize,
}

impl<const CELLS: usize> State<CELLS> {
    /// Builds a state from a tile list, checking that it is a permutation of `0..CELLS`.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, PuzzleError> {
        if tiles.len() != CELLS {
            return Err(PuzzleError::WrongLength {
                expected: CELLS,
                found: tiles.len(),
            });
        }

        let mut seen = [false; CELLS];
        let mut board = [BLANK; CELLS];
        let mut blank = 0;
        for (cell, &tile) in tiles.iter().enumerate() {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(PuzzleError::TileOutOfRange(tile))?;
            if *slot {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            *slot = true;
            board[cell] = tile;
            if tile == BLANK {
                blank = cell;
            }
        }

        // length matches and every tile is unique and in range, so the blank is present
        Ok(Self {
            tiles: board,
            blank,
        })
    }

    /// The canonical goal: tiles `1..CELLS` in order, blank in the last cell.
    pub const fn goal() -> Self {
        let mut tiles = [BLANK; CELLS];
        let mut cell = 0;
        while cell + 1 < CELLS {
            tiles[cell] = (cell + 1) as u8;
            cell += 1;
        }
        Self {
            tiles,
            blank: CELLS - 1,
        }
    }

    #[inline]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    #[inline]
    pub fn blank_index(&self) -> usize {
        self.blank
    }

    /// Swaps the blank with the tile at `cell` without checking adjacency.
    ///
    /// The swap is its own inverse: calling it again with the old blank index
    /// restores the original state.
    #[inline]
    pub fn swap_blank(&self, cell: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(self.blank, cell);
        Self { tiles, blank: cell }
    }
}

/// Grid geometry with compile-time parameters.
///
/// - `N`: grid width (and height)
/// - `CELLS`: total cells on the board (must equal N^2)
#[derive(Clone, Copy, Debug, Default)]
pub struct Board<const N: usize, const CELLS: usize>;

impl<const N: usize, const CELLS: usize> Board<N, CELLS> {
    /// Creates a board definition with compile-time validation.
    pub const fn new() -> Self {
        assert!(N * N == CELLS, "CELLS must equal N^2");
        assert!(N >= 2, "a board needs at least two columns");
        assert!(CELLS <= MAX_CELLS, "tile numbers must fit in a u8");
        Self
    }

    /// Grid width.
    pub const fn width(&self) -> usize {
        N
    }

    /// Returns the tiles that may slide into the blank.
    ///
    /// Order: up, right, down, left. Up and down must stay on the board,
    /// right is dropped when the blank sits in the last column and left
    /// when it sits in the first column.
    pub fn legal_actions(&self, state: &State<CELLS>) -> Actions {
        let blank = state.blank_index();
        let mut actions = Actions::new();

        if blank >= N {
            actions.push(blank - N);
        }
        if (blank + 1) % N != 0 {
            actions.push(blank + 1);
        }
        if blank + N < CELLS {
            actions.push(blank + N);
        }
        if blank % N != 0 {
            actions.push(blank - 1);
        }

        actions
    }

    /// Applies `action` after checking that it is legal for `state`.
    pub fn try_apply(&self, state: &State<CELLS>, action: Action) -> Result<State<CELLS>, PuzzleError> {
        if !self.legal_actions(state).contains(&action) {
            return Err(PuzzleError::IllegalAction {
                action,
                blank: state.blank_index(),
            });
        }
        Ok(state.swap_blank(action))
    }

    /// Whether `to` can be reached from `from` by sliding tiles.
    ///
    /// Every move is a transposition that also shifts the blank by one cell,
    /// so the permutation parity and the blank's grid distance change
    /// together. Two states are connected exactly when those parities agree.
    pub fn is_reachable(&self, from: &State<CELLS>, to: &State<CELLS>) -> bool {
        let mut target_cell = [0usize; CELLS];
        for (cell, &tile) in to.tiles().iter().enumerate() {
            target_cell[tile as usize] = cell;
        }

        // permutation sending each cell of `from` to where its tile lives in `to`
        let mut visited = [false; CELLS];
        let mut cycles = 0;
        for start in 0..CELLS {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut cell = start;
            while !visited[cell] {
                visited[cell] = true;
                cell = target_cell[from.tiles()[cell] as usize];
            }
        }

        let permutation_parity = (CELLS - cycles) % 2;
        let blank_parity = cell_distance::<N>(from.blank_index(), to.blank_index()) % 2;
        permutation_parity == blank_parity
    }

    /// Walks `moves` random legal actions away from `start`, never undoing
    /// the previous move immediately.
    pub fn scramble(&self, start: &State<CELLS>, moves: usize, rng: &mut impl Rng) -> State<CELLS> {
        let mut state = *start;
        let mut previous_blank = None;

        for _ in 0..moves {
            let candidates: Actions = self
                .legal_actions(&state)
                .into_iter()
                .filter(|&action| Some(action) != previous_blank)
                .collect();
            let Some(&action) = candidates.choose(rng) else {
                break;
            };
            previous_blank = Some(state.blank_index());
            state = state.swap_blank(action);
        }

        state
    }
}

/// Parses a tile list such as `"1,2,3,4,0,6,7,5,8"` or `"1 2 3 4 0 6 7 5 8"`.
pub fn parse_tiles(text: &str) -> Result<Vec<u8>, PuzzleError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| PuzzleError::Parse(format!("'{token}' is not a tile number")))
        })
        .collect()
}

/// Formats a state as a human-readable grid.
///
/// Tiles are right-aligned to the widest tile number; the blank shows as '.'.
pub fn format_state<const N: usize, const CELLS: usize>(state: &State<CELLS>) -> String {
    let width = (CELLS - 1).to_string().len();
    let mut output = String::new();

    for row in 0..N {
        for col in 0..N {
            if col > 0 {
                output.push(' ');
            }
            let tile = state.tiles()[coord_to_idx::<N>(row, col)];
            if tile == BLANK {
                output.push_str(&format!("{:>width$}", '.', width = width));
            } else {
                output.push_str(&format!("{:>width$}", tile, width = width));
            }
        }
        output.push('\n');
    }

    output
}

impl<const CELLS: usize> fmt::Display for State<CELLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles: Vec<String> = self.tiles.iter().map(|tile| tile.to_string()).collect();
        write!(f, "({})", tiles.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOARD: Board<3, 9> = Board::new();

    fn state(tiles: &[u8]) -> State<9> {
        State::from_tiles(tiles).unwrap()
    }

    #[test]
    fn test_goal_layout() {
        assert_eq!(State::<9>::goal().tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(State::<9>::goal().blank_index(), 8);
        assert_eq!(State::<4>::goal().tiles(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_from_tiles_rejects_malformed_input() {
        assert_eq!(
            State::<9>::from_tiles(&[1, 2, 3, 0]),
            Err(PuzzleError::WrongLength { expected: 9, found: 4 })
        );
        assert_eq!(
            State::<4>::from_tiles(&[1, 2, 4, 0]),
            Err(PuzzleError::TileOutOfRange(4))
        );
        assert_eq!(
            State::<4>::from_tiles(&[1, 1, 2, 0]),
            Err(PuzzleError::DuplicateTile(1))
        );
    }

    #[test]
    fn test_blank_in_top_right_cannot_move_right() {
        // blank at (0, 2): cell 3 is the start of the next row, not a neighbour
        let start = state(&[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let actions = BOARD.legal_actions(&start);
        assert_eq!(actions.as_slice(), &[5, 1]);
        assert!(!actions.contains(&3));
    }

    #[test]
    fn test_legal_actions_by_position() {
        // corners have two neighbours, edges three, the centre four
        let expected: [&[Action]; 9] = [
            &[1, 3],
            &[2, 4, 0],
            &[5, 1],
            &[0, 4, 6],
            &[1, 5, 7, 3],
            &[2, 8, 4],
            &[3, 7],
            &[4, 8, 6],
            &[5, 7],
        ];
        for (blank, want) in expected.iter().enumerate() {
            let start = State::<9>::goal().swap_blank(blank);
            assert_eq!(start.blank_index(), blank);
            assert_eq!(BOARD.legal_actions(&start).as_slice(), *want, "blank at {blank}");
        }
    }

    #[test]
    fn test_legal_actions_stay_on_board() {
        let board = Board::<4, 16>::new();
        for blank in 0..16 {
            let start = State::<16>::goal().swap_blank(blank);
            for action in board.legal_actions(&start) {
                assert!(action < 16);
                assert_eq!(cell_distance::<4>(blank, action), 1, "blank {blank} -> {action}");
            }
        }
    }

    #[test]
    fn test_sliding_back_restores_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut current = State::<9>::goal();
        for _ in 0..50 {
            for action in BOARD.legal_actions(&current) {
                let moved = BOARD.try_apply(&current, action).unwrap();
                let restored = BOARD.try_apply(&moved, current.blank_index()).unwrap();
                assert_eq!(restored, current);
            }
            current = BOARD.scramble(&current, 1, &mut rng);
        }
    }

    #[test]
    fn test_swap_does_not_mutate_input() {
        let start = state(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        let moved = start.swap_blank(7);
        assert_eq!(start.tiles(), &[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        assert_eq!(moved.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(moved.blank_index(), 7);
    }

    #[test]
    fn test_try_apply_rejects_illegal_action() {
        let start = state(&[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            BOARD.try_apply(&start, 3),
            Err(PuzzleError::IllegalAction { action: 3, blank: 2 })
        );
        // sliding the blank onto itself is not a move
        assert!(BOARD.try_apply(&start, 2).is_err());
    }

    #[test]
    fn test_ordering_is_lexicographic_over_tiles() {
        let a = state(&[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let b = state(&[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(a < b);
        assert!(state(&[0, 8, 7, 6, 5, 4, 3, 2, 1]) < a);
    }

    #[test]
    fn test_reachability_parity() {
        let goal = State::<9>::goal();
        assert!(BOARD.is_reachable(&state(&[1, 2, 3, 4, 0, 6, 7, 5, 8]), &goal));
        // classic unsolvable instance: swap two tiles of the goal
        let swapped = state(&[2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!BOARD.is_reachable(&swapped, &goal));

        let small = Board::<2, 4>::new();
        assert!(!small.is_reachable(&State::from_tiles(&[2, 1, 3, 0]).unwrap(), &State::goal()));
        assert!(small.is_reachable(&State::from_tiles(&[0, 1, 3, 2]).unwrap(), &State::goal()));
    }

    #[test]
    fn test_scramble_stays_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let goal = State::<9>::goal();
        for moves in [0, 1, 5, 30] {
            let scrambled = BOARD.scramble(&goal, moves, &mut rng);
            assert!(BOARD.is_reachable(&scrambled, &goal));
        }
        assert_eq!(BOARD.scramble(&goal, 0, &mut rng), goal);
    }

    #[test]
    fn test_parse_tiles() {
        assert_eq!(parse_tiles("1,2,3, 0").unwrap(), vec![1, 2, 3, 0]);
        assert_eq!(parse_tiles("4 0\t1 2").unwrap(), vec![4, 0, 1, 2]);
        assert!(matches!(parse_tiles("1,x,3"), Err(PuzzleError::Parse(_))));
    }

    #[test]
    fn test_format_state() {
        let start = state(&[1, 2, 3, 4, 0, 6, 7, 5, 8]);
        assert_eq!(format_state::<3, 9>(&start), "1 2 3\n4 . 6\n7 5 8\n");

        let wide = State::<16>::goal();
        assert_eq!(
            format_state::<4, 16>(&wide),
            " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  .\n"
        );
        assert_eq!(start.to_string(), "(1,2,3,4,0,6,7,5,8)");
    }
}
