//! Occupant movement across open passages.

use labyrinth_core::{Coord, Direction};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::{Grid, GridError};

/// Reasons an occupant could not be moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The origin or destination is not part of the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// No passage leads out of the origin in the requested direction.
    #[error("no passage leads {direction:?} from {from}")]
    Blocked {
        /// Cell the move started from.
        from: Coord,
        /// Requested direction of travel.
        direction: Direction,
    },
    /// The origin holds no creature to move.
    #[error("no creature occupies {from}")]
    Empty {
        /// Cell the move started from.
        from: Coord,
    },
    /// The destination already holds a creature.
    #[error("{to} is already occupied")]
    Occupied {
        /// Cell the creature attempted to enter.
        to: Coord,
    },
    /// The origin has no open passage at all.
    #[error("{from} has no open passage to leave through")]
    Isolated {
        /// Cell the move started from.
        from: Coord,
    },
}

/// Reports whether a step from `from` toward `direction` is legal.
pub fn can_move(grid: &Grid, from: Coord, direction: Direction) -> Result<bool, GridError> {
    Ok(grid.get(from)?.is_passage(direction))
}

/// Moves the creature at `from` one step through the passage in `direction`.
///
/// Returns the coordinate the creature now occupies.
pub fn move_creature(grid: &mut Grid, from: Coord, direction: Direction) -> Result<Coord, MoveError> {
    let origin = grid.get(from)?;
    let Some(to) = origin.edge(direction).destination() else {
        return Err(MoveError::Blocked { from, direction });
    };
    if origin.creature().is_none() {
        return Err(MoveError::Empty { from });
    }
    if grid.get(to)?.creature().is_some() {
        return Err(MoveError::Occupied { to });
    }

    let Some(creature) = grid.get_mut(from)?.take_creature() else {
        return Err(MoveError::Empty { from });
    };
    let _ = grid.get_mut(to)?.place_creature(creature);
    Ok(to)
}

/// Moves the creature at `from` through a randomly chosen open passage.
///
/// Passages leading into occupied cells are skipped. A cell without any open
/// passage means the maze is disconnected and is reported as
/// [`MoveError::Isolated`].
pub fn wander<R>(grid: &mut Grid, from: Coord, rng: &mut R) -> Result<Coord, MoveError>
where
    R: Rng + ?Sized,
{
    let origin = grid.get(from)?;
    if origin.creature().is_none() {
        return Err(MoveError::Empty { from });
    }

    let mut directions: Vec<Direction> = origin.passages().collect();
    if directions.is_empty() {
        return Err(MoveError::Isolated { from });
    }
    directions.shuffle(rng);

    let mut blocked_by = None;
    for direction in directions {
        match move_creature(grid, from, direction) {
            Ok(to) => return Ok(to),
            Err(MoveError::Occupied { to }) => blocked_by = blocked_by.or(Some(to)),
            Err(error) => return Err(error),
        }
    }

    match blocked_by {
        Some(to) => Err(MoveError::Occupied { to }),
        None => Err(MoveError::Isolated { from }),
    }
}
