use std::collections::HashSet;

use labyrinth_core::{Coord, Direction};
use labyrinth_system_backtracking::BacktrackingGenerator;
use labyrinth_world::{query, GenerationError, Generator, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZES: [(u32, u32); 6] = [(2, 2), (3, 2), (4, 4), (7, 3), (10, 10), (25, 18)];

fn generate(columns: u32, rows: u32, seed: u64) -> BacktrackingGenerator<ChaCha8Rng> {
    let mut generator = BacktrackingGenerator::new(columns, rows, ChaCha8Rng::seed_from_u64(seed))
        .expect("generator construction succeeds");
    generator.generate().expect("generation succeeds");
    generator
}

/// Depth-first cycle check over the passage graph.
fn has_cycle(grid: &Grid) -> bool {
    let mut seen = HashSet::new();
    for root in grid.coords() {
        if seen.contains(&root) {
            continue;
        }
        let mut stack: Vec<(Coord, Option<Coord>)> = vec![(root, None)];
        while let Some((coord, parent)) = stack.pop() {
            if !seen.insert(coord) {
                return true;
            }
            let cell = grid.get(coord).expect("cell");
            for direction in Direction::ALL {
                if let Some(next) = cell.edge(direction).destination() {
                    if Some(next) != parent {
                        stack.push((next, Some(coord)));
                    }
                }
            }
        }
    }
    false
}

#[test]
fn passages_form_a_spanning_tree() {
    for (columns, rows) in SIZES {
        for seed in 0..30 {
            let generator = generate(columns, rows, seed);
            let grid = generator.result().expect("grid available");
            let cells = (columns * rows) as usize;

            assert_eq!(query::passage_count(grid), cells - 1);
            assert_eq!(generator.passages(), cells - 1);
            assert!(query::is_connected(grid), "{columns}x{rows} seed {seed} disconnected");
            assert!(!has_cycle(grid), "{columns}x{rows} seed {seed} contains a loop");
            assert!(query::is_spanning_tree(grid));
        }
    }
}

#[test]
fn passages_are_symmetric_and_rim_faces_are_boundaries() {
    for (columns, rows) in SIZES {
        let generator = generate(columns, rows, 4);
        let grid = generator.result().expect("grid available");
        assert!(query::edges_are_symmetric(grid));
        assert!(query::boundaries_are_correct(grid));
    }
}

#[test]
fn carving_starts_on_the_north_rim() {
    for seed in 0..20 {
        let generator = generate(8, 5, seed);
        let start = generator.start().expect("start recorded");
        assert_eq!(start.y(), 4);
        let grid = generator.result().expect("grid");
        assert!(grid.get(start).expect("start").edge(Direction::North).is_boundary());
    }
}

#[test]
fn routes_are_never_shorter_than_the_manhattan_distance() {
    let generator = generate(6, 6, 21);
    let grid = generator.result().expect("grid");
    let from = Coord::new(0, 0);
    let to = Coord::new(5, 5);
    let length = query::path_length(grid, from, to).expect("route exists");
    assert!(length >= 10, "route of {length} steps beats the manhattan distance");
}

#[test]
fn result_before_generate_is_rejected() {
    let generator =
        BacktrackingGenerator::new(4, 4, ChaCha8Rng::seed_from_u64(0)).expect("generator");
    assert_eq!(generator.result(), Err(GenerationError::NotGenerated));
    assert_eq!(generator.start(), None);
}

#[test]
fn generate_runs_only_once() {
    let mut generator = generate(5, 5, 8);
    assert_eq!(generator.generate(), Err(GenerationError::AlreadyGenerated));
    assert!(generator.into_grid().is_ok());
}

#[test]
fn degenerate_sizes_are_rejected() {
    assert!(matches!(
        BacktrackingGenerator::new(1, 4, ChaCha8Rng::seed_from_u64(0)),
        Err(GenerationError::Grid(_))
    ));
}

#[test]
fn large_grids_do_not_exhaust_the_stack() {
    let generator = generate(200, 200, 1);
    let grid = generator.result().expect("grid");
    assert!(query::is_spanning_tree(grid));
}
