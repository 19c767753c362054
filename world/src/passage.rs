//! Symmetric passage carving between neighbouring cells.
//!
//! Every helper treats a bad pair of coordinates as a programming error: every
//! caller is a generator that only offers in-bounds, distinct, adjacent pairs,
//! so a violation panics instead of being reported as a recoverable error.

use labyrinth_core::{Coord, Direction, Edge};

use crate::Grid;

/// Opens a passage between two adjacent cells, on both sides.
///
/// Re-opening an existing passage leaves the grid unchanged.
///
/// # Panics
///
/// Panics when either coordinate is outside the grid, when the coordinates
/// coincide, or when they are not grid neighbours.
pub fn open(grid: &mut Grid, from: Coord, to: Coord) {
    let direction = direction_between(grid, from, to);
    connect(grid, from, to, direction);
}

/// Carves through the wall separating two adjacent cells.
///
/// # Panics
///
/// Panics under the same conditions as [`open`], and additionally when either
/// side of the shared face is not currently an [`Edge::Wall`].
pub fn carve(grid: &mut Grid, from: Coord, to: Coord) {
    let direction = direction_between(grid, from, to);
    for (here, facing) in [(from, direction), (to, direction.opposite())] {
        let edge = match grid.get(here) {
            Ok(cell) => cell.edge(facing),
            Err(error) => panic!("{error}"),
        };
        assert!(
            edge.is_wall(),
            "cannot carve {facing:?} out of {here}: face is {edge:?}, not a wall"
        );
    }
    connect(grid, from, to, direction);
}

/// Direction of the face shared by two cells that may be linked.
///
/// # Panics
///
/// Panics when either coordinate is outside the grid, when the coordinates
/// coincide, or when they are not grid neighbours.
pub fn direction_between(grid: &Grid, from: Coord, to: Coord) -> Direction {
    assert!(
        grid.valid(from) && grid.valid(to),
        "cannot link {from} and {to}: outside the {}x{} grid",
        grid.columns(),
        grid.rows()
    );
    assert_ne!(from, to, "cannot link {from} to itself");
    match Direction::between(from, to) {
        Some(direction) => direction,
        None => panic!("cannot link {from} and {to}: cells are not adjacent"),
    }
}

fn connect(grid: &mut Grid, from: Coord, to: Coord, direction: Direction) {
    for (here, there, facing) in [(from, to, direction), (to, from, direction.opposite())] {
        match grid.get_mut(here) {
            Ok(cell) => cell.set_edge(facing, Edge::Passage(there)),
            Err(error) => panic!("{error}"),
        }
    }
    tracing::trace!(%from, %to, ?direction, "opened passage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    #[test]
    fn open_sets_both_faces() {
        let mut grid = Grid::walled(3, 3).expect("grid");
        let west = Coord::new(0, 1);
        let east = Coord::new(1, 1);

        open(&mut grid, west, east);

        let west_cell = grid.get(west).expect("west");
        let east_cell = grid.get(east).expect("east");
        assert_eq!(west_cell.edge(Direction::East), Edge::Passage(east));
        assert_eq!(east_cell.edge(Direction::West), Edge::Passage(west));
        assert!(query::edges_are_symmetric(&grid));
    }

    #[test]
    fn open_is_idempotent() {
        let mut grid = Grid::walled(2, 2).expect("grid");
        open(&mut grid, Coord::new(0, 0), Coord::new(0, 1));
        let snapshot = grid.clone();
        open(&mut grid, Coord::new(0, 1), Coord::new(0, 0));
        assert_eq!(grid, snapshot);
    }

    #[test]
    #[should_panic(expected = "not adjacent")]
    fn open_rejects_diagonal_pairs() {
        let mut grid = Grid::walled(3, 3).expect("grid");
        open(&mut grid, Coord::new(0, 0), Coord::new(1, 1));
    }

    #[test]
    #[should_panic(expected = "to itself")]
    fn open_rejects_self_links() {
        let mut grid = Grid::walled(3, 3).expect("grid");
        open(&mut grid, Coord::new(1, 1), Coord::new(1, 1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn open_rejects_out_of_bounds_pairs() {
        let mut grid = Grid::walled(3, 3).expect("grid");
        open(&mut grid, Coord::new(2, 0), Coord::new(3, 0));
    }

    #[test]
    #[should_panic(expected = "not a wall")]
    fn carve_refuses_to_recarve_a_passage() {
        let mut grid = Grid::walled(3, 3).expect("grid");
        carve(&mut grid, Coord::new(0, 0), Coord::new(1, 0));
        carve(&mut grid, Coord::new(1, 0), Coord::new(0, 0));
    }
}
