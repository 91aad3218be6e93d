use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{CellKind, Grid, Point};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    Dfs,
    Bfs,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::Dfs => "dfs",
                Algorithm::Bfs => "bfs",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(Algorithm::Dfs),
            "bfs" => Ok(Algorithm::Bfs),
            _ => Err(anyhow::anyhow!("Invalid algorithm: {}", s)),
        }
    }
}

/// Outcome of one solve run.
///
/// `elapsed` spans exploration plus backtracking; `path_len` counts the cells
/// of the reconstructed path and is only meaningful when `solved` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
    pub path_len: usize,
    pub solved: bool,
}

impl SolveReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e3
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolverState {
    Exploring,
    Backtracking,
    Solved(SolveReport),
    Unsolved(SolveReport),
}

impl SolverState {
    pub fn is_done(&self) -> bool {
        matches!(self, SolverState::Solved(_) | SolverState::Unsolved(_))
    }

    pub fn report(&self) -> Option<&SolveReport> {
        match self {
            SolverState::Solved(report) | SolverState::Unsolved(report) => Some(report),
            _ => None,
        }
    }
}

/// One solve run over a grid.
///
/// Exploration labels every cell reachable from the start with its 1-based
/// visit order, exhausting the component rather than stopping at the end
/// cell; the path is then reconstructed from the end by repeatedly stepping
/// to the passable neighbor with the lowest step number. No parent pointers
/// are kept: the step labels alone drive the backtrack, which fixes the path
/// chosen on ties.
///
/// [`Solver::step`] advances by a single frontier pop or a single backtrack
/// extension, so a caller that wants to animate can pace and interrupt the
/// run between calls; [`Solver::finish`] drives it to the terminal state in
/// one go.
#[derive(Debug)]
pub struct Solver {
    algorithm: Algorithm,
    start: Point,
    end: Point,
    frontier: VecDeque<Point>,
    path: Vec<Point>,
    visited_count: u32,
    started: Instant,
    state: SolverState,
}

impl Solver {
    /// Fails with [`Error::MissingEndpoints`] unless both endpoints are set.
    /// Clears any previous run's labels from the grid before starting.
    pub fn new(grid: &mut Grid, algorithm: Algorithm) -> Result<Self> {
        let (start, end) = match (grid.start(), grid.end()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(Error::MissingEndpoints),
        };

        grid.reset();

        Ok(Self {
            algorithm,
            start,
            end,
            frontier: VecDeque::from([start]),
            path: vec![end],
            visited_count: 0,
            started: Instant::now(),
            state: SolverState::Exploring,
        })
    }

    /// Runs the state machine to completion and returns the report.
    pub fn finish(mut self, grid: &mut Grid) -> SolveReport {
        loop {
            match self.step(grid) {
                SolverState::Solved(report) | SolverState::Unsolved(report) => return report,
                _ => {}
            }
        }
    }

    /// Advances by one frontier pop (exploring) or one path extension
    /// (backtracking) and returns the resulting state.
    pub fn step(&mut self, grid: &mut Grid) -> SolverState {
        if self.state.is_done() {
            return self.state.clone();
        }

        if matches!(self.state, SolverState::Exploring) {
            self.explore(grid);
        } else {
            self.backtrack(grid);
        }

        self.state.clone()
    }

    fn explore(&mut self, grid: &mut Grid) {
        let popped = match self.algorithm {
            // the frontier doubles as stack or queue depending on where we pop
            Algorithm::Dfs => self.frontier.pop_back(),
            Algorithm::Bfs => self.frontier.pop_front(),
        };

        if let Some(current) = popped {
            if grid.cell(current).step() != 0 {
                // already visited through another frontier entry
                return;
            }

            self.visited_count += 1;
            grid.cell_mut(current).set_step(self.visited_count);
            trace!("visited {:?} as step {}", current, self.visited_count);

            let reverse = matches!(self.algorithm, Algorithm::Dfs);
            for next in grid.neighbors(current, reverse) {
                if grid.cell(next).step() == 0 {
                    self.frontier.push_back(next);
                    grid.cell_mut(next).mark(CellKind::PendingVisit);
                }
            }
        } else {
            // the reachable component is fully labeled; walk back from the end
            self.state = SolverState::Backtracking;
        }
    }

    fn backtrack(&mut self, grid: &mut Grid) {
        let current = *self.path.last().expect("path is seeded with the end cell");

        let mut next = grid.neighbors(current, false);
        next.sort_by_key(|&point| grid.cell(point).step());

        if let Some(&best) = next.first() {
            if grid.cell(best).step() < grid.cell(current).step() {
                self.path.push(best);
                return;
            }
        }

        // no strictly older neighbor left: either we walked back to the
        // start, or the end was never visited (its step is still 0) and the
        // very first extension attempt fell through
        let solved = self.path.contains(&self.start);
        if solved {
            for &point in &self.path {
                grid.cell_mut(point).mark(CellKind::Path);
            }
        }

        let report = SolveReport {
            algorithm: self.algorithm,
            elapsed: self.started.elapsed(),
            path_len: self.path.len(),
            solved,
        };
        info!(
            "{} solve finished: solved={} path_len={} elapsed={:.3}ms",
            self.algorithm, report.solved, report.path_len, report.elapsed_ms()
        );

        self.state = if solved {
            SolverState::Solved(report)
        } else {
            SolverState::Unsolved(report)
        };
    }

    pub fn state(&self) -> &SolverState {
        &self.state
    }

    /// The path built so far, end first.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// Solves in one call, without intermediate yields.
pub fn solve(grid: &mut Grid, algorithm: Algorithm) -> Result<SolveReport> {
    Ok(Solver::new(grid, algorithm)?.finish(grid))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub dfs: SolveReport,
    pub bfs: SolveReport,
}

/// Runs DFS and then BFS on the same maze and reports both timings.
///
/// Each run starts from a freshly reset grid so the second timing is not
/// skewed by leftover labels, and the grid is reset again afterwards so the
/// caller gets it back in its idle display state.
pub fn compare(grid: &mut Grid) -> Result<Comparison> {
    let dfs = solve(grid, Algorithm::Dfs)?;
    let bfs = solve(grid, Algorithm::Bfs)?;
    grid.reset();

    Ok(Comparison { dfs, bfs })
}
