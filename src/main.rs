use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dokugen::{
    generator::{Difficulty, Generator},
    grid::Grid,
    rules::{is_puzzle_complete, is_valid_sudoku},
    solver::{has_unique_solution, solve_sudoku},
};
use std::{fs, path::PathBuf, time::Instant};

#[derive(Parser, Debug)]
#[command(name = "dokugen", version, about = "Sudoku puzzle generator and solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate puzzles with uniqueness-checked carving
    Generate {
        #[arg(short, long, value_enum, default_value_t = Level::Medium)]
        difficulty: Level,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// How many puzzles to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Emit puzzle/solution pairs as JSON instead of boards
        #[arg(long)]
        json: bool,
    },
    /// Solve a puzzle (81 chars with 0 or . for blanks) from a file or stdin
    Solve {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Report validity, completeness, and uniqueness of a puzzle
    Check {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Generate and verify a batch of puzzles across all difficulties
    Verify {
        /// Puzzles per difficulty
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

fn read_puzzle(input: &Option<PathBuf>) -> Result<Grid> {
    let text = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::Read;
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Grid::parse(&text).context("parse puzzle")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { difficulty, seed, count, json } => {
            let mut generator = match seed {
                Some(s) => Generator::with_seed(s),
                None => Generator::new(),
            };
            let difficulty = Difficulty::from(difficulty);
            for i in 0..count {
                let generated = generator.generate_puzzle(difficulty);
                if json {
                    println!("{}", serde_json::to_string(&generated)?);
                } else {
                    println!(
                        "{} {} {} ({} empty cells)",
                        "puzzle".bold(),
                        i + 1,
                        difficulty,
                        generated.puzzle.empty_count()
                    );
                    println!("{}", generated.puzzle);
                    println!("solution: {}\n", generated.solution.to_compact());
                }
            }
        }
        Command::Solve { input } => {
            let mut grid = read_puzzle(&input)?;
            if !is_valid_sudoku(&grid) {
                bail!("puzzle has conflicting cells");
            }
            if !solve_sudoku(&mut grid) {
                bail!("no solution found within the search bound");
            }
            println!("{}", grid);
        }
        Command::Check { input } => {
            let grid = read_puzzle(&input)?;
            let valid = is_valid_sudoku(&grid);
            let complete = is_puzzle_complete(&grid);
            let unique = valid && has_unique_solution(&grid);
            println!("empty cells: {}", grid.empty_count());
            println!("valid:       {}", yes_no(valid));
            println!("complete:    {}", yes_no(complete));
            println!("unique:      {}", yes_no(unique));
            if !valid || !unique {
                std::process::exit(1);
            }
        }
        Command::Verify { count } => {
            let mut failures = 0usize;
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                println!("{} {} puzzles", "verifying".bold(), difficulty);
                for i in 0..count {
                    let start = Instant::now();
                    let generated = Generator::new().generate_puzzle(difficulty);
                    let elapsed = start.elapsed();

                    let valid = is_valid_sudoku(&generated.puzzle);
                    let unique = has_unique_solution(&generated.puzzle);
                    let mut solved = generated.puzzle.clone();
                    let solvable = solve_sudoku(&mut solved) && is_puzzle_complete(&solved);

                    let ok = valid && unique && solvable;
                    if !ok {
                        failures += 1;
                    }
                    println!(
                        "  puzzle {}: {} empty cells, {:?} — {}",
                        i + 1,
                        generated.puzzle.empty_count(),
                        elapsed,
                        if ok { "ok".green() } else { "FAIL".red().bold() }
                    );
                }
            }
            if failures > 0 {
                bail!("{failures} generated puzzles failed verification");
            }
            println!("{}", "all puzzles verified".green().bold());
        }
    }
    Ok(())
}

fn yes_no(b: bool) -> ColoredString {
    if b {
        "yes".green()
    } else {
        "no".red()
    }
}
