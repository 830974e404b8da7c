pub mod generator;
pub mod grid;
pub mod rules;
pub mod solver;

pub use generator::{generate_puzzle, generate_solution, Difficulty, GeneratedPuzzle, Generator};
pub use grid::{CellValue, Grid, ParseGridError};
pub use rules::{
    auto_notes, is_puzzle_complete, is_valid_box, is_valid_column, is_valid_placement,
    is_valid_row, is_valid_sudoku, possible_numbers,
};
pub use solver::{has_unique_solution, solve_sudoku};
