//! Full-solution generation and uniqueness-checked puzzle carving.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use log::{debug, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::solver::{has_unique_solution, solve_with, CandidateOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Target number of cells the carver removes. Soft: carving stops early
    /// rather than hand out a puzzle with more than one solution.
    pub fn removal_target(self) -> usize {
        match self {
            Difficulty::Easy => 35,
            Difficulty::Medium => 45,
            Difficulty::Hard => 55,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// A carved puzzle together with the full solution it was carved from.
/// Every filled puzzle cell equals the corresponding solution cell by
/// construction; the solution is not re-derived from the puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Seeded generator for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Produce a fully-filled valid grid: seed row 0 with a random
    /// permutation of 1..=9, let the solver fill the rest, and reseed if it
    /// gives up within its step cap.
    pub fn generate_solution(&mut self) -> Grid {
        loop {
            let mut grid = Grid::empty();
            let mut digits: Vec<u8> = (1..=9).collect();
            digits.shuffle(&mut self.rng);
            for (col, &digit) in digits.iter().enumerate() {
                grid.set(0, col, Some(digit));
            }
            if solve_with(&mut grid, CandidateOrder::Shuffled, &mut self.rng) {
                return grid;
            }
            debug!("solver gave up on seeded first row, retrying");
        }
    }

    /// Generate a puzzle for `difficulty`. Removals follow a shuffled pass
    /// over all 81 cells and each one is kept only if the puzzle still has a
    /// unique solution; the target count is therefore approximate.
    pub fn generate_puzzle(&mut self, difficulty: Difficulty) -> GeneratedPuzzle {
        loop {
            let mut solution = self.generate_solution();
            self.randomize(&mut solution);
            let mut puzzle = solution.clone();

            let mut coords = (0..9).cartesian_product(0..9).collect_vec();
            coords.shuffle(&mut self.rng);

            let target = difficulty.removal_target();
            let mut removed = 0usize;
            for (row, col) in coords {
                if removed >= target {
                    break;
                }
                let Some(kept) = puzzle.get(row, col) else {
                    continue;
                };
                puzzle.set(row, col, None);
                if has_unique_solution(&puzzle) {
                    removed += 1;
                } else {
                    puzzle.set(row, col, Some(kept));
                }
            }
            debug!("{difficulty}: removed {removed} of {target} cells");

            // The incremental checks should make this unconditional, but a
            // non-unique puzzle must never escape.
            if has_unique_solution(&puzzle) {
                return GeneratedPuzzle { puzzle, solution };
            }
            warn!("carved puzzle failed the final uniqueness check, regenerating");
        }
    }

    /// Symmetry-preserving shuffling of a complete solution: row swaps
    /// inside each horizontal band, column swaps inside each vertical stack,
    /// then a few whole-band and whole-stack swaps. Each is a permutation
    /// under which Sudoku validity is invariant.
    fn randomize(&mut self, grid: &mut Grid) {
        for band in 0..3 {
            let base = band * 3;
            for _ in 0..self.rng.gen_range(2..=4) {
                let (a, b) = self.distinct_pair();
                grid.swap_rows(base + a, base + b);
            }
        }
        for stack in 0..3 {
            let base = stack * 3;
            for _ in 0..self.rng.gen_range(2..=4) {
                let (a, b) = self.distinct_pair();
                grid.swap_cols(base + a, base + b);
            }
        }
        for _ in 0..self.rng.gen_range(0..=2) {
            let (a, b) = self.distinct_pair();
            for r in 0..3 {
                grid.swap_rows(a * 3 + r, b * 3 + r);
            }
        }
        for _ in 0..self.rng.gen_range(0..=2) {
            let (a, b) = self.distinct_pair();
            for c in 0..3 {
                grid.swap_cols(a * 3 + c, b * 3 + c);
            }
        }
    }

    /// Two distinct indices in 0..3.
    fn distinct_pair(&mut self) -> (usize, usize) {
        let a = self.rng.gen_range(0..3);
        let mut b = self.rng.gen_range(0..3);
        while b == a {
            b = self.rng.gen_range(0..3);
        }
        (a, b)
    }
}

/// Entropy-seeded convenience wrapper around [`Generator::generate_puzzle`].
pub fn generate_puzzle(difficulty: Difficulty) -> GeneratedPuzzle {
    Generator::new().generate_puzzle(difficulty)
}

/// Entropy-seeded convenience wrapper around [`Generator::generate_solution`].
pub fn generate_solution() -> Grid {
    Generator::new().generate_solution()
}
