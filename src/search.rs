//! Search strategies over the sliding-tile state space.
//!
//! Every strategy expands states exclusively through an [`Expander`], which
//! owns the per-run node counters. Visited states map to the path that first
//! reached them and are never revised, so:
//! - breadth-first search returns a shortest path,
//! - best-first search is greedy on the heuristic and may return a long path,
//! - A* needs an admissible heuristic to be optimal, and even then a state
//!   keeps its first-found path, so the result can overshoot the optimum.
//!
//! Frontier and path map grow with the explored space; nothing is evicted.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::time::Instant;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use crate::board::{Action, Actions, Board, State};
use crate::heuristic::{Heuristic, HeuristicFn};
use crate::stats::{NodeCounts, SearchReport, SearchStats};

/// Per-run expansion context.
///
/// The only place node counters are touched: one "evaluated" per legal-action
/// query and one "generated" per successor.
pub struct Expander<const N: usize, const CELLS: usize> {
    board: Board<N, CELLS>,
    counts: NodeCounts,
}

impl<const N: usize, const CELLS: usize> Expander<N, CELLS> {
    pub fn new(board: Board<N, CELLS>) -> Self {
        Self {
            board,
            counts: NodeCounts::default(),
        }
    }

    #[inline]
    pub fn legal_actions(&mut self, state: &State<CELLS>) -> Actions {
        self.counts.evaluated += 1;
        self.board.legal_actions(state)
    }

    /// Slides the tile at `action` into the blank.
    ///
    /// `action` must come from [`Expander::legal_actions`] for the same state.
    #[inline]
    pub fn apply_action(&mut self, state: &State<CELLS>, action: Action) -> State<CELLS> {
        self.counts.generated += 1;
        state.swap_blank(action)
    }

    pub fn counts(&self) -> NodeCounts {
        self.counts
    }
}

/// How a state was first reached.
#[derive(Clone, Copy)]
struct Visit {
    /// Blank cell of the parent state; `None` for the initial state.
    parent_blank: Option<u8>,
    /// Number of actions from the initial state.
    depth: u32,
}

/// Visited states and the paths that first reached them.
///
/// The action into a state is the state's own blank cell, and sliding the
/// blank back to `parent_blank` recovers the parent, so a path is rebuilt by
/// walking those links instead of storing one vector per state.
struct PathMap<const CELLS: usize> {
    visits: FxHashMap<State<CELLS>, Visit>,
}

impl<const CELLS: usize> PathMap<CELLS> {
    fn rooted(initial: State<CELLS>) -> Self {
        let mut visits = FxHashMap::default();
        visits.insert(
            initial,
            Visit {
                parent_blank: None,
                depth: 0,
            },
        );
        Self { visits }
    }

    /// Records `state` as reached from `parent`. Returns `false` if it was
    /// already known; the earlier path is kept.
    fn record(&mut self, state: State<CELLS>, parent: &State<CELLS>) -> bool {
        if self.visits.contains_key(&state) {
            return false;
        }
        let depth = self.depth(parent) + 1;
        self.visits.insert(
            state,
            Visit {
                parent_blank: Some(parent.blank_index() as u8),
                depth,
            },
        );
        true
    }

    fn depth(&self, state: &State<CELLS>) -> u32 {
        self.visits.get(state).map_or(0, |visit| visit.depth)
    }

    fn len(&self) -> usize {
        self.visits.len()
    }

    /// Rebuilds the action sequence from the initial state to `state`.
    fn path_to(&self, state: &State<CELLS>) -> Option<Vec<Action>> {
        let mut current = *state;
        let mut path = Vec::with_capacity(self.visits.get(state)?.depth as usize);

        while let Some(parent_blank) = self.visits.get(&current)?.parent_blank {
            path.push(current.blank_index());
            current = current.swap_blank(parent_blank as usize);
        }

        path.reverse();
        Some(path)
    }
}

/// A strategy that searches for an action sequence from `initial` to `goal`.
pub trait SearchStrategy {
    /// Returns the actions leading to `goal`, or `None` if it was not found.
    fn search<const N: usize, const CELLS: usize>(
        &mut self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>>;
}

/// Picks uniformly random legal actions until the goal shows up.
///
/// Without a step limit this may never return.
pub struct RandomWalk {
    rng: StdRng,
    step_limit: Option<usize>,
}

impl RandomWalk {
    pub fn new(seed: Option<u64>, step_limit: Option<usize>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, step_limit }
    }
}

impl SearchStrategy for RandomWalk {
    fn search<const N: usize, const CELLS: usize>(
        &mut self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>> {
        let mut state = *initial;
        let mut path = Vec::new();

        while state != *goal {
            if self.step_limit.is_some_and(|limit| path.len() >= limit) {
                debug!("random walk gave up after {} steps", path.len());
                return None;
            }
            let actions = expander.legal_actions(&state);
            let &action = actions.choose(&mut self.rng)?;
            path.push(action);
            state = expander.apply_action(&state, action);
        }

        Some(path)
    }
}

/// Breadth-first search with a FIFO frontier.
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn search<const N: usize, const CELLS: usize>(
        &mut self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>> {
        let mut frontier = VecDeque::from([*initial]);
        let mut paths = PathMap::rooted(*initial);

        while let Some(state) = frontier.pop_front() {
            if state == *goal {
                return paths.path_to(&state);
            }

            for action in expander.legal_actions(&state) {
                let successor = expander.apply_action(&state, action);
                if paths.record(successor, &state) {
                    frontier.push_back(successor);
                }
            }
        }

        debug!("frontier exhausted after reaching {} states", paths.len());
        None
    }
}

/// Pops states in ascending `(score, tiles)` order until the goal is popped.
///
/// `score` receives the state and its path length. Each state enters the
/// frontier once, so the score computed on insertion never goes stale.
fn ordered_search<const N: usize, const CELLS: usize>(
    expander: &mut Expander<N, CELLS>,
    initial: &State<CELLS>,
    goal: &State<CELLS>,
    score: impl Fn(&State<CELLS>, u32) -> u32,
) -> Option<Vec<Action>> {
    let mut frontier = BinaryHeap::new();
    let mut paths = PathMap::rooted(*initial);
    frontier.push(Reverse((score(initial, 0), *initial)));

    while let Some(Reverse((state_score, state))) = frontier.pop() {
        if state == *goal {
            return paths.path_to(&state);
        }
        trace!("expanding {state} with score {state_score}");

        for action in expander.legal_actions(&state) {
            let successor = expander.apply_action(&state, action);
            if paths.record(successor, &state) {
                let successor_score = score(&successor, paths.depth(&successor));
                frontier.push(Reverse((successor_score, successor)));
            }
        }
    }

    debug!("frontier exhausted after reaching {} states", paths.len());
    None
}

/// Greedy best-first search ordered by the heuristic alone.
pub struct BestFirst<H> {
    heuristic: H,
}

impl<H: HeuristicFn> BestFirst<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: HeuristicFn> SearchStrategy for BestFirst<H> {
    fn search<const N: usize, const CELLS: usize>(
        &mut self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>> {
        let heuristic = &self.heuristic;
        ordered_search(expander, initial, goal, |state, _| {
            heuristic.estimate::<N, CELLS>(state)
        })
    }
}

/// A* ordered by path length plus heuristic.
pub struct AStar<H> {
    heuristic: H,
}

impl<H: HeuristicFn> AStar<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: HeuristicFn> SearchStrategy for AStar<H> {
    fn search<const N: usize, const CELLS: usize>(
        &mut self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>> {
        let heuristic = &self.heuristic;
        ordered_search(expander, initial, goal, |state, depth| {
            heuristic.estimate::<N, CELLS>(state) + depth
        })
    }
}

/// Search strategy selection, resolved before a run starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    RandomWalk {
        seed: Option<u64>,
        step_limit: Option<usize>,
    },
    BreadthFirst,
    BestFirst(Heuristic),
    AStar(Heuristic),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::RandomWalk { .. } => "random walk",
            Algorithm::BreadthFirst => "breadth-first search",
            Algorithm::BestFirst(_) => "best-first search",
            Algorithm::AStar(_) => "A*",
        }
    }

    fn search<const N: usize, const CELLS: usize>(
        &self,
        expander: &mut Expander<N, CELLS>,
        initial: &State<CELLS>,
        goal: &State<CELLS>,
    ) -> Option<Vec<Action>> {
        match *self {
            Algorithm::RandomWalk { seed, step_limit } => {
                RandomWalk::new(seed, step_limit).search(expander, initial, goal)
            }
            Algorithm::BreadthFirst => BreadthFirst.search(expander, initial, goal),
            Algorithm::BestFirst(heuristic) => {
                BestFirst::new(heuristic).search(expander, initial, goal)
            }
            Algorithm::AStar(heuristic) => AStar::new(heuristic).search(expander, initial, goal),
        }
    }
}

/// Runs `algorithm` from `initial` to `goal`, timing it and counting nodes.
pub fn solve<const N: usize, const CELLS: usize>(
    board: Board<N, CELLS>,
    algorithm: &Algorithm,
    initial: &State<CELLS>,
    goal: &State<CELLS>,
) -> SearchReport {
    let mut expander = Expander::new(board);
    debug!("{}: searching {initial} -> {goal}", algorithm.name());

    let begin = Instant::now();
    let path = algorithm.search(&mut expander, initial, goal);
    let stats = SearchStats {
        counts: expander.counts(),
        elapsed: begin.elapsed(),
    };

    info!("{}: {stats}", algorithm.name());
    SearchReport {
        algorithm: algorithm.name(),
        path,
        stats,
    }
}
