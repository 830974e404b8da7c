use dokugen::{
    has_unique_solution, is_puzzle_complete, is_valid_sudoku, solve_sudoku, Difficulty, Generator,
    Grid,
};

#[test]
fn generated_solution_is_complete_and_valid() {
    let mut generator = Generator::with_seed(42);
    let solution = generator.generate_solution();
    assert!(is_puzzle_complete(&solution));
}

#[test]
fn solutions_differ_across_calls() {
    let a = Generator::new().generate_solution();
    let b = Generator::new().generate_solution();
    assert_ne!(a, b, "two independently generated solutions coincided");
}

#[test]
fn removal_targets_per_difficulty() {
    assert_eq!(Difficulty::Easy.removal_target(), 35);
    assert_eq!(Difficulty::Medium.removal_target(), 45);
    assert_eq!(Difficulty::Hard.removal_target(), 55);
}

#[test]
fn generated_puzzles_meet_contract() {
    let mut generator = Generator::with_seed(7);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let generated = generator.generate_puzzle(difficulty);
        let (puzzle, solution) = (&generated.puzzle, &generated.solution);

        assert!(is_valid_sudoku(puzzle));
        assert!(is_puzzle_complete(solution));
        for r in 0..9 {
            for c in 0..9 {
                if let Some(v) = puzzle.get(r, c) {
                    assert_eq!(
                        Some(v),
                        solution.get(r, c),
                        "puzzle disagrees with its solution at ({r},{c})"
                    );
                }
            }
        }

        // Targets are soft; carving trades exact counts for uniqueness
        let target = difficulty.removal_target();
        let empty = puzzle.empty_count();
        assert!(
            (target - 5..=target + 5).contains(&empty),
            "{difficulty}: {empty} empty cells, expected {target}±5"
        );

        assert!(has_unique_solution(puzzle));
    }
}

#[test]
fn generated_puzzle_round_trips_through_solver() {
    let generated = Generator::with_seed(99).generate_puzzle(Difficulty::Medium);
    let mut solved = generated.puzzle.clone();
    assert!(solve_sudoku(&mut solved));
    assert!(is_puzzle_complete(&solved));
    for r in 0..9 {
        for c in 0..9 {
            if let Some(v) = generated.puzzle.get(r, c) {
                assert_eq!(solved.get(r, c), Some(v));
            }
        }
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = Generator::with_seed(1234).generate_puzzle(Difficulty::Easy);
    let b = Generator::with_seed(1234).generate_puzzle(Difficulty::Easy);
    assert_eq!(a.puzzle, b.puzzle);
    assert_eq!(a.solution, b.solution);
}

#[test]
fn classic_puzzle_has_unique_solution() {
    let g = Grid::parse(
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    )
    .unwrap();
    assert!(has_unique_solution(&g));
}

#[test]
fn unsolvable_grid_is_not_unique() {
    // (0,8) has no candidates at all
    let mut g = Grid::empty();
    for c in 0..8 {
        g.set(0, c, Some(c as u8 + 1));
    }
    g.set(1, 8, Some(9));
    assert!(!has_unique_solution(&g));
}

#[test]
fn blanked_rectangle_breaks_uniqueness() {
    // Blanking four cells at (r1,c1),(r1,c2),(r2,c1),(r2,c2) with values
    // a,b / b,a and r1,r2 in the same band leaves two completions: the
    // original and the one with a and b swapped. Such a rectangle is not
    // guaranteed in any single solution grid, so hunt across a few.
    for seed in 0..20 {
        let solution = Generator::with_seed(seed).generate_solution();
        if let Some((r1, r2, c1, c2)) = find_swappable_rectangle(&solution) {
            let mut puzzle = solution.clone();
            for (r, c) in [(r1, c1), (r1, c2), (r2, c1), (r2, c2)] {
                puzzle.set(r, c, None);
            }
            assert!(!has_unique_solution(&puzzle));
            return;
        }
    }
    panic!("no swappable rectangle found in 20 generated solutions");
}

fn find_swappable_rectangle(g: &Grid) -> Option<(usize, usize, usize, usize)> {
    for band in 0..3 {
        for i in 0..3 {
            for j in i + 1..3 {
                let (r1, r2) = (band * 3 + i, band * 3 + j);
                for c1 in 0..9 {
                    for c2 in c1 + 1..9 {
                        if g.get(r1, c1) == g.get(r2, c2) && g.get(r1, c2) == g.get(r2, c1) {
                            return Some((r1, r2, c1, c2));
                        }
                    }
                }
            }
        }
    }
    None
}
