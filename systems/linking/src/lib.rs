#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Linking maze generator.
//!
//! Generation runs in three phases. Seed placement picks a start cell near the
//! perimeter and a target cell on the mirrored side of the grid. Probabilistic
//! linking then walks depth-first from the start, opening a passage to each
//! unreached neighbour with a fixed probability. Finally the cleanup phase
//! scans the grid repeatedly and forces every still-unreached cell to link to
//! its neighbours until no cell remains unreached. The cleanup phase may open
//! passages between cells that are already connected, so the result can
//! contain loops.

use labyrinth_core::{Coord, Direction};
use labyrinth_world::{passage, query, GenerationError, Generator, Grid, GridError, Progress};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Probability that the depth-first phase links a candidate neighbour.
pub const DEFAULT_LINK_PROBABILITY: f64 = 0.58;

/// Smallest extent along either axis that seed placement supports.
pub const MIN_SEED_EXTENT: u32 = 4;

/// Rejected tuning values.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The link probability must be a number within `[0, 1]`.
    #[error("link probability {0} lies outside [0, 1]")]
    LinkProbabilityOutOfRange(f64),
}

/// Tuning knobs for the linking generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkingConfig {
    link_probability: f64,
}

impl LinkingConfig {
    /// Creates a configuration with the provided link probability.
    ///
    /// Lower probabilities leave more cells for the cleanup phase, which
    /// tends to produce more loops.
    pub fn new(link_probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&link_probability) {
            return Err(ConfigError::LinkProbabilityOutOfRange(link_probability));
        }
        Ok(Self { link_probability })
    }

    /// Chance that a candidate neighbour is linked during the depth-first phase.
    #[must_use]
    pub const fn link_probability(&self) -> f64 {
        self.link_probability
    }
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            link_probability: DEFAULT_LINK_PROBABILITY,
        }
    }
}

/// Initial layout the generator starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkingMode {
    /// Every interior face starts as a wall and passages are linked in.
    #[default]
    Walled,
    /// Every interior face starts as a passage; no linking is required.
    Open,
}

/// Start and target cells chosen during seed placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seeds {
    /// Cell the player starts in and the linking phase grows from.
    pub start: Coord,
    /// Cell on the mirrored side of the grid that the player seeks.
    pub target: Coord,
}

/// Counters describing a finished generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkingStats {
    /// Cells connected to the start once the depth-first phase finished.
    pub reached_by_linking: usize,
    /// Number of cleanup scans needed to connect the remaining cells.
    pub cleanup_passes: usize,
    /// Undirected passages present in the finished grid.
    pub passages: usize,
}

/// Chooses the start and target seeds for a grid.
///
/// One axis of the start cell is drawn from the outer quarter bands of the
/// grid (`[-n, n)` with `n = extent / 4`, wrapped onto the axis); the other is
/// uniform. The target mirrors the start through the centre of the grid.
pub fn place_seeds<R>(grid: &Grid, rng: &mut R) -> Result<Seeds, GenerationError>
where
    R: Rng + ?Sized,
{
    let (columns, rows) = (grid.columns(), grid.rows());
    if columns < MIN_SEED_EXTENT || rows < MIN_SEED_EXTENT {
        return Err(GenerationError::GridTooSmall {
            columns,
            rows,
            minimum: MIN_SEED_EXTENT,
        });
    }

    let width = extent(columns, grid)?;
    let height = extent(rows, grid)?;
    let start = if rng.gen_bool(0.5) {
        Coord::new(perimeter_component(width, rng), rng.gen_range(0..height))
    } else {
        Coord::new(rng.gen_range(0..width), perimeter_component(height, rng))
    };
    let target = Coord::new(
        width - 1 - start.x().rem_euclid(width),
        height - 1 - start.y().rem_euclid(height),
    );

    if start == target {
        return Err(GenerationError::DegenerateSeeds { coord: start });
    }
    Ok(Seeds { start, target })
}

fn perimeter_component<R>(extent: i32, rng: &mut R) -> i32
where
    R: Rng + ?Sized,
{
    let band = extent / 4;
    rng.gen_range(-band..band).rem_euclid(extent)
}

fn extent(size: u32, grid: &Grid) -> Result<i32, GridError> {
    i32::try_from(size).map_err(|_| GridError::TooLarge {
        columns: grid.columns(),
        rows: grid.rows(),
    })
}

/// Depth-first frame: a cell and the shuffled order its faces are tried in.
#[derive(Clone, Copy, Debug)]
struct Frame {
    coord: Coord,
    directions: [Direction; 4],
    next: usize,
}

/// Generator that links cells probabilistically and then forces connectivity.
#[derive(Debug)]
pub struct LinkingGenerator<R> {
    grid: Grid,
    mode: LinkingMode,
    config: LinkingConfig,
    rng: R,
    progress: Progress,
    seeds: Option<Seeds>,
    stats: LinkingStats,
}

impl<R: Rng> LinkingGenerator<R> {
    /// Creates a generator over a fresh grid of the provided size.
    pub fn new(
        columns: u32,
        rows: u32,
        mode: LinkingMode,
        config: LinkingConfig,
        rng: R,
    ) -> Result<Self, GenerationError> {
        let grid = match mode {
            LinkingMode::Walled => Grid::walled(columns, rows)?,
            LinkingMode::Open => Grid::open(columns, rows)?,
        };
        Ok(Self {
            grid,
            mode,
            config,
            rng,
            progress: Progress::default(),
            seeds: None,
            stats: LinkingStats::default(),
        })
    }

    /// Seeds chosen by the last successful generation run.
    #[must_use]
    pub const fn seeds(&self) -> Option<Seeds> {
        self.seeds
    }

    /// Counters collected by the last successful generation run.
    #[must_use]
    pub const fn stats(&self) -> LinkingStats {
        self.stats
    }

    /// Consumes the generator, yielding the finished grid.
    pub fn into_grid(self) -> Result<Grid, GenerationError> {
        let _ = self.progress.gate(&self.grid)?;
        Ok(self.grid)
    }

    fn is_reached(&self, coord: Coord) -> bool {
        self.grid.get(coord).map_or(false, |cell| cell.is_reached())
    }

    fn mark_reached(&mut self, coord: Coord) -> Result<(), GridError> {
        self.grid.get_mut(coord)?.mark_reached();
        Ok(())
    }

    fn frame(&mut self, coord: Coord) -> Frame {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        Frame {
            coord,
            directions,
            next: 0,
        }
    }

    /// Links two neighbours when at least one is already reached; both end up
    /// reached. Returns whether a passage was opened.
    fn link(&mut self, first: Coord, second: Coord) -> Result<bool, GridError> {
        let _ = passage::direction_between(&self.grid, first, second);
        if !self.is_reached(first) && !self.is_reached(second) {
            return Ok(false);
        }
        self.mark_reached(first)?;
        self.mark_reached(second)?;
        passage::open(&mut self.grid, first, second);
        Ok(true)
    }

    fn link_recursively(&mut self, start: Coord) -> Result<(), GridError> {
        debug_assert!(self.is_reached(start), "linking must grow from a reached cell");
        let mut stack = vec![self.frame(start)];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = frame.directions.get(frame.next) else {
                let _ = stack.pop();
                continue;
            };
            frame.next += 1;
            let here = frame.coord;

            let Some(neighbor) = self.grid.neighbor(here, direction) else {
                continue;
            };
            if self.is_reached(neighbor) {
                continue;
            }
            if self.rng.gen_bool(self.config.link_probability) && self.link(here, neighbor)? {
                stack.push(self.frame(neighbor));
            }
        }
        Ok(())
    }

    fn force_connect(&mut self, coord: Coord) -> Result<(), GridError> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        for direction in directions {
            if let Some(neighbor) = self.grid.neighbor(coord, direction) {
                let _ = self.link(coord, neighbor)?;
            }
        }
        Ok(())
    }

    fn tie_loose_ends(&mut self) -> Result<usize, GenerationError> {
        let scan: Vec<Coord> = self.grid.coords().collect();
        let mut unreached = query::unreached(&self.grid);
        let mut passes = 0;

        while let Some(&first) = unreached.first() {
            for &coord in &scan {
                if !self.is_reached(coord) {
                    self.force_connect(coord)?;
                }
            }
            passes += 1;

            // Only a grid with no reached cell at all can stall here.
            let remaining = query::unreached(&self.grid);
            tracing::debug!(pass = passes, remaining = remaining.len(), "cleanup pass finished");
            if remaining.len() >= unreached.len() {
                return Err(GenerationError::IsolatedCell { coord: first });
            }
            unreached = remaining;
        }
        Ok(passes)
    }

    fn run(&mut self) -> Result<(), GenerationError> {
        let seeds = place_seeds(&self.grid, &mut self.rng)?;
        tracing::debug!(start = %seeds.start, target = %seeds.target, "placed seeds");

        let mut stats = LinkingStats::default();
        match self.mode {
            LinkingMode::Open => {
                let scan: Vec<Coord> = self.grid.coords().collect();
                for coord in scan {
                    self.mark_reached(coord)?;
                }
                stats.reached_by_linking = self.grid.cell_count();
            }
            LinkingMode::Walled => {
                self.mark_reached(seeds.start)?;
                self.link_recursively(seeds.start)?;
                stats.reached_by_linking =
                    self.grid.cell_count() - query::unreached(&self.grid).len();
                tracing::debug!(
                    reached = stats.reached_by_linking,
                    cells = self.grid.cell_count(),
                    "depth-first linking finished"
                );
                stats.cleanup_passes = self.tie_loose_ends()?;
            }
        }
        stats.passages = query::passage_count(&self.grid);
        tracing::debug!(
            passages = stats.passages,
            cleanup_passes = stats.cleanup_passes,
            "linking generation finished"
        );

        self.seeds = Some(seeds);
        self.stats = stats;
        Ok(())
    }
}

impl<R: Rng> Generator for LinkingGenerator<R> {
    fn generate(&mut self) -> Result<(), GenerationError> {
        self.progress.ensure_pending()?;
        self.run()?;
        self.progress = Progress::Done;
        Ok(())
    }

    fn result(&self) -> Result<&Grid, GenerationError> {
        self.progress.gate(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn generator(columns: u32, rows: u32) -> LinkingGenerator<ChaCha8Rng> {
        LinkingGenerator::new(
            columns,
            rows,
            LinkingMode::Walled,
            LinkingConfig::default(),
            ChaCha8Rng::seed_from_u64(7),
        )
        .expect("generator")
    }

    #[test]
    fn link_skips_pairs_without_a_reached_side() {
        let mut generator = generator(4, 4);
        let linked = generator
            .link(Coord::new(0, 0), Coord::new(1, 0))
            .expect("link");
        assert!(!linked);
        assert_eq!(query::passage_count(&generator.grid), 0);
    }

    #[test]
    fn link_propagates_reachability() {
        let mut generator = generator(4, 4);
        generator.mark_reached(Coord::new(1, 0)).expect("mark");
        let linked = generator
            .link(Coord::new(0, 0), Coord::new(1, 0))
            .expect("link");
        assert!(linked);
        assert!(generator.is_reached(Coord::new(0, 0)));
        assert_eq!(query::passage_count(&generator.grid), 1);
    }

    #[test]
    #[should_panic(expected = "not adjacent")]
    fn link_asserts_adjacency_even_when_unreached() {
        let mut generator = generator(4, 4);
        let _ = generator.link(Coord::new(0, 0), Coord::new(2, 0));
    }

    #[test]
    fn frame_holds_every_direction_once() {
        let mut generator = generator(4, 4);
        let frame = generator.frame(Coord::ORIGIN);
        for direction in Direction::ALL {
            assert_eq!(
                frame.directions.iter().filter(|d| **d == direction).count(),
                1
            );
        }
    }

    #[test]
    fn perimeter_component_avoids_the_central_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let value = perimeter_component(10, &mut rng);
            assert!((0..2).contains(&value) || (8..10).contains(&value), "{value}");
        }
    }

    #[test]
    fn cleanup_without_a_reached_cell_aborts() {
        let mut generator = generator(4, 4);
        assert_eq!(
            generator.tie_loose_ends(),
            Err(GenerationError::IsolatedCell {
                coord: Coord::ORIGIN,
            })
        );
        assert_eq!(query::passage_count(&generator.grid), 0);
        assert_eq!(query::unreached(&generator.grid).len(), 16);
    }

    #[test]
    fn cleanup_from_a_single_reached_cell_connects_everything() {
        let mut generator = generator(4, 4);
        generator.mark_reached(Coord::new(3, 3)).expect("mark");
        let passes = generator.tie_loose_ends().expect("cleanup");
        assert!((1..=16).contains(&passes));
        assert!(query::unreached(&generator.grid).is_empty());
        assert!(query::is_connected(&generator.grid));
    }

    #[test]
    fn zero_probability_links_nothing_before_cleanup() {
        let config = LinkingConfig::new(0.0).expect("config");
        let mut generator = LinkingGenerator::new(
            5,
            5,
            LinkingMode::Walled,
            config,
            ChaCha8Rng::seed_from_u64(1),
        )
        .expect("generator");
        generator.generate().expect("generate");
        assert_eq!(generator.stats().reached_by_linking, 1);
        assert!(query::is_connected(generator.result().expect("grid")));
    }
}
