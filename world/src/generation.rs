//! Two-step contract shared by maze generators.

use labyrinth_core::Coord;
use thiserror::Error;

use crate::{Grid, GridError};

/// Failures reported by maze generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The grid could not be built or addressed.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The result was requested before [`Generator::generate`] ran.
    #[error("maze has not been generated yet")]
    NotGenerated,
    /// [`Generator::generate`] was invoked a second time.
    #[error("maze has already been generated")]
    AlreadyGenerated,
    /// The grid is too small for the generator's seed placement rules.
    #[error("{columns}x{rows} grid is below the {minimum}x{minimum} minimum for this generator")]
    GridTooSmall {
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
        /// Smallest supported extent along either axis.
        minimum: u32,
    },
    /// The start and target seeds landed on the same cell.
    #[error("start and target seeds coincide at {coord}")]
    DegenerateSeeds {
        /// Shared seed coordinate.
        coord: Coord,
    },
    /// A cell stayed disconnected after connectivity cleanup.
    #[error("cell {coord} is still unreachable after connectivity cleanup")]
    IsolatedCell {
        /// First unreachable cell in scan order.
        coord: Coord,
    },
}

/// Builds a fully connected maze in place, then hands it out.
///
/// Callers invoke [`Generator::generate`] exactly once and read the finished
/// grid through [`Generator::result`] afterwards.
pub trait Generator {
    /// Runs generation to completion.
    fn generate(&mut self) -> Result<(), GenerationError>;

    /// Finished grid. Fails with [`GenerationError::NotGenerated`] until
    /// [`Generator::generate`] succeeded.
    fn result(&self) -> Result<&Grid, GenerationError>;
}

/// Tracks whether a generator has produced its grid yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Progress {
    /// Generation has not started.
    #[default]
    Pending,
    /// Generation completed successfully.
    Done,
}

impl Progress {
    /// Fails with [`GenerationError::AlreadyGenerated`] once generation ran.
    pub fn ensure_pending(&self) -> Result<(), GenerationError> {
        match self {
            Self::Pending => Ok(()),
            Self::Done => Err(GenerationError::AlreadyGenerated),
        }
    }

    /// Hands out `grid` only once generation finished.
    pub fn gate<'grid>(&self, grid: &'grid Grid) -> Result<&'grid Grid, GenerationError> {
        match self {
            Self::Pending => Err(GenerationError::NotGenerated),
            Self::Done => Ok(grid),
        }
    }
}
