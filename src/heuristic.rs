//! Heuristic evaluators for informed search.
//!
//! All evaluators score a state against the canonical goal, where tile `k`
//! belongs at flat index `k - 1` and the last cell holds the blank.

use crate::board::{cell_distance, State, BLANK};

/// Estimate of the remaining work from a state to the canonical goal.
pub trait HeuristicFn {
    /// Returns a non-negative estimate; must be 0 on the canonical goal.
    fn estimate<const N: usize, const CELLS: usize>(&self, state: &State<CELLS>) -> u32;
}

/// The built-in heuristics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Heuristic {
    /// Always 0; informed search degrades to ordering by path cost and state order.
    Zero,
    /// Number of tiles not on their goal cell.
    Misplaced,
    /// Sum of grid distances from each tile to its goal cell.
    #[default]
    Manhattan,
    /// Sum of flat-index distances `|cell - (tile - 1)|`. Not admissible.
    FlatDistance,
}

/// Goal cell of a non-blank tile.
#[inline(always)]
fn goal_cell(tile: u8) -> usize {
    tile as usize - 1
}

/// Iterates over `(cell, tile)` for every non-blank tile.
#[inline]
fn placed_tiles<const CELLS: usize>(state: &State<CELLS>) -> impl Iterator<Item = (usize, u8)> + '_ {
    state
        .tiles()
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, tile)| tile != BLANK)
}

pub fn misplaced_tiles<const CELLS: usize>(state: &State<CELLS>) -> u32 {
    placed_tiles(state)
        .filter(|&(cell, tile)| cell != goal_cell(tile))
        .count() as u32
}

pub fn manhattan_distance<const N: usize, const CELLS: usize>(state: &State<CELLS>) -> u32 {
    placed_tiles(state)
        .map(|(cell, tile)| cell_distance::<N>(cell, goal_cell(tile)) as u32)
        .sum()
}

pub fn flat_distance<const CELLS: usize>(state: &State<CELLS>) -> u32 {
    placed_tiles(state)
        .map(|(cell, tile)| cell.abs_diff(goal_cell(tile)) as u32)
        .sum()
}

impl HeuristicFn for Heuristic {
    fn estimate<const N: usize, const CELLS: usize>(&self, state: &State<CELLS>) -> u32 {
        match self {
            Heuristic::Zero => 0,
            Heuristic::Misplaced => misplaced_tiles(state),
            Heuristic::Manhattan => manhattan_distance::<N, CELLS>(state),
            Heuristic::FlatDistance => flat_distance(state),
        }
    }
}
