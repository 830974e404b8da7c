//! Backtracking search over the grid, used three ways: solving a puzzle,
//! filling a fresh solution for the generator, and probing for a second
//! solution in the uniqueness test.
//!
//! The search keeps an explicit stack of `(cell, candidates, cursor)`
//! frames instead of recursing, so the step cap is a plain counter and no
//! call-stack depth is at risk. It runs on an owned copy of the caller's
//! grid and writes back only on success; a failed search never leaves a
//! half-filled grid behind.

use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::grid::Grid;
use crate::rules::{is_valid_placement, possible_numbers};

/// Cap on search steps (one step per cell descended into). Past the cap the
/// solver reports failure; callers must read that as "could not determine"
/// and retry with fresh randomization, not as proof of unsolvability.
pub(crate) const MAX_SEARCH_STEPS: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CandidateOrder {
    Ascending,
    Shuffled,
}

struct Frame {
    row: usize,
    col: usize,
    candidates: Vec<u8>,
    cursor: usize,
}

/// Solve in place. Returns false when no solution was found within the
/// search bound, leaving `grid` untouched.
pub fn solve_sudoku(grid: &mut Grid) -> bool {
    solve_with(grid, CandidateOrder::Shuffled, &mut rand::thread_rng())
}

pub(crate) fn solve_with<R: Rng>(grid: &mut Grid, order: CandidateOrder, rng: &mut R) -> bool {
    let mut work = grid.clone();
    if search(&mut work, order, rng) {
        *grid = work;
        true
    } else {
        false
    }
}

/// MRV-guided backtracking on `grid` directly; true iff `grid` ends solved.
fn search<R: Rng>(grid: &mut Grid, order: CandidateOrder, rng: &mut R) -> bool {
    let mut stack: Vec<Frame> = Vec::new();
    let mut steps = 0usize;
    loop {
        let Some((row, col)) = find_mrv_cell(grid) else {
            return true;
        };
        steps += 1;
        if steps > MAX_SEARCH_STEPS {
            trace!("search gave up after {MAX_SEARCH_STEPS} steps");
            return false;
        }
        let mut candidates = possible_numbers(grid, row, col);
        if order == CandidateOrder::Shuffled {
            candidates.shuffle(rng);
        }
        stack.push(Frame { row, col, candidates, cursor: 0 });

        // Advance the top frame to its next candidate; pop exhausted frames,
        // clearing their cells (backtrack).
        loop {
            let Some(top) = stack.last_mut() else {
                return false;
            };
            if let Some(&num) = top.candidates.get(top.cursor) {
                top.cursor += 1;
                let (r, c) = (top.row, top.col);
                grid.set(r, c, Some(num));
                break;
            }
            grid.set(top.row, top.col, None);
            stack.pop();
        }
    }
}

/// Minimum-remaining-values cell choice, ties broken by scan order. A cell
/// with one candidate is returned immediately; so is a cell with none,
/// since nothing can beat it and the search fails there anyway.
fn find_mrv_cell(grid: &Grid) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None;
    for row in 0..9 {
        for col in 0..9 {
            if grid.get(row, col).is_some() {
                continue;
            }
            let count = (1..=9)
                .filter(|&num| is_valid_placement(grid, row, col, num))
                .count();
            let better = match best {
                None => true,
                Some((_, _, best_count)) => count < best_count,
            };
            if better {
                if count <= 1 {
                    return Some((row, col));
                }
                best = Some((row, col, count));
            }
        }
    }
    best.map(|(row, col, _)| (row, col))
}

/// Best-effort uniqueness test: find one solution, then search from the
/// original grid for a completion that diverges from it. Not a counting
/// solver; "unique" means this second search found no divergent completion.
pub fn has_unique_solution(grid: &Grid) -> bool {
    let mut rng = rand::thread_rng();
    let mut first = grid.clone();
    // Deterministic candidate order here keeps the overall verdict a pure
    // function of the grid: the divergent search below is exhaustive, so
    // its shuffle affects only which counterexample turns up.
    if !solve_with(&mut first, CandidateOrder::Ascending, &mut rng) {
        return false;
    }
    !has_another_solution(grid, &first, &mut rng)
}

/// Scan-order backtracking that at every empty cell tries only values
/// different from `first`'s assignment there, i.e. it searches the space of
/// completions diverging from `first` at each originally-empty cell.
fn has_another_solution<R: Rng>(grid: &Grid, first: &Grid, rng: &mut R) -> bool {
    let mut work = grid.clone();
    let mut stack: Vec<Frame> = Vec::new();
    loop {
        match find_first_empty(&work) {
            None => {
                if work != *first {
                    return true;
                }
                // Identical to the first solution; treat as a dead end.
            }
            Some((row, col)) => {
                let mut candidates: Vec<u8> = (1..=9)
                    .filter(|&num| {
                        first.get(row, col) != Some(num)
                            && is_valid_placement(&work, row, col, num)
                    })
                    .collect();
                candidates.shuffle(rng);
                stack.push(Frame { row, col, candidates, cursor: 0 });
            }
        }
        loop {
            let Some(top) = stack.last_mut() else {
                return false;
            };
            if let Some(&num) = top.candidates.get(top.cursor) {
                top.cursor += 1;
                let (r, c) = (top.row, top.col);
                work.set(r, c, Some(num));
                break;
            }
            work.set(top.row, top.col, None);
            stack.pop();
        }
    }
}

fn find_first_empty(grid: &Grid) -> Option<(usize, usize)> {
    for row in 0..9 {
        for col in 0..9 {
            if grid.get(row, col).is_none() {
                return Some((row, col));
            }
        }
    }
    None
}
