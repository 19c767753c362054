#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive-backtracking maze generator.
//!
//! Carving starts on a random cell of the north rim and walks depth-first,
//! trying the faces of each cell in shuffled order and carving into every
//! neighbour not visited yet. Dead ends backtrack to the most recent cell with
//! untried faces. Every cell is visited exactly once, so the carved passages
//! form a spanning tree: a perfect maze with one route between any two cells.

use std::collections::HashSet;

use labyrinth_core::{Coord, Direction};
use labyrinth_world::{passage, query, GenerationError, Generator, Grid, GridError, Progress};
use rand::{seq::SliceRandom, Rng};

/// Depth-first frame: a cell and the shuffled order its faces are tried in.
#[derive(Clone, Copy, Debug)]
struct Frame {
    coord: Coord,
    directions: [Direction; 4],
    next: usize,
}

/// Generator that carves a perfect maze by depth-first backtracking.
#[derive(Debug)]
pub struct BacktrackingGenerator<R> {
    grid: Grid,
    rng: R,
    progress: Progress,
    visited: HashSet<Coord>,
    start: Option<Coord>,
    passages: usize,
}

impl<R: Rng> BacktrackingGenerator<R> {
    /// Creates a generator over a fresh walled grid of the provided size.
    pub fn new(columns: u32, rows: u32, rng: R) -> Result<Self, GenerationError> {
        Ok(Self {
            grid: Grid::walled(columns, rows)?,
            rng,
            progress: Progress::default(),
            visited: HashSet::new(),
            start: None,
            passages: 0,
        })
    }

    /// Cell carving started from, once generation ran.
    #[must_use]
    pub const fn start(&self) -> Option<Coord> {
        self.start
    }

    /// Number of passages carved by the last generation run.
    #[must_use]
    pub const fn passages(&self) -> usize {
        self.passages
    }

    /// Consumes the generator, yielding the finished grid.
    pub fn into_grid(self) -> Result<Grid, GenerationError> {
        let _ = self.progress.gate(&self.grid)?;
        Ok(self.grid)
    }

    fn pick_start(&mut self) -> Result<Coord, GridError> {
        let too_large = GridError::TooLarge {
            columns: self.grid.columns(),
            rows: self.grid.rows(),
        };
        let width = i32::try_from(self.grid.columns()).map_err(|_| too_large)?;
        let top = i32::try_from(self.grid.rows()).map_err(|_| too_large)? - 1;
        Ok(Coord::new(self.rng.gen_range(0..width), top))
    }

    fn visit(&mut self, coord: Coord) -> Result<Frame, GridError> {
        self.grid.get_mut(coord)?.mark_reached();
        let _ = self.visited.insert(coord);
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        Ok(Frame {
            coord,
            directions,
            next: 0,
        })
    }

    fn carve_from(&mut self, start: Coord) -> Result<(), GridError> {
        let mut stack = vec![self.visit(start)?];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                let _ = stack.pop();
                continue;
            };
            frame.next += 1;
            let here = frame.coord;

            if self.grid.get(here)?.edge(direction).is_boundary() {
                continue;
            }
            let neighbor = here.step(direction);
            if self.visited.contains(&neighbor) {
                continue;
            }

            passage::carve(&mut self.grid, here, neighbor);
            self.passages += 1;
            stack.push(self.visit(neighbor)?);
        }
        Ok(())
    }
}

impl<R: Rng> Generator for BacktrackingGenerator<R> {
    fn generate(&mut self) -> Result<(), GenerationError> {
        self.progress.ensure_pending()?;

        let start = self.pick_start()?;
        tracing::debug!(%start, "carving from the north rim");
        self.carve_from(start)?;

        let unvisited = query::unreached(&self.grid);
        if let Some(&coord) = unvisited.first() {
            return Err(GenerationError::IsolatedCell { coord });
        }
        tracing::debug!(
            passages = self.passages,
            cells = self.grid.cell_count(),
            "backtracking generation finished"
        );

        self.start = Some(start);
        self.progress = Progress::Done;
        Ok(())
    }

    fn result(&self) -> Result<&Grid, GenerationError> {
        self.progress.gate(&self.grid)
    }
}
