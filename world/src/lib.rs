#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid storage for the labyrinth.
//!
//! The [`Grid`] owns every [`Cell`] by value and addresses them by
//! coordinate. Edges refer to neighbours by coordinate as well, so the
//! symmetric passage structure never forms an ownership cycle. The grid
//! itself is pure storage with bounds-checked access; carving lives in
//! [`passage`], reachability reasoning in [`query`] and occupant movement in
//! [`traversal`]. Generators implement the [`Generator`] contract.

pub mod generation;
pub mod passage;
pub mod traversal;

mod reachability;

use labyrinth_core::{Coord, CreatureId, Direction, Edge, ItemId};
use thiserror::Error;

pub use generation::{GenerationError, Generator, Progress};

/// Smallest supported extent along either axis.
pub const MIN_GRID_SIZE: u32 = 2;

/// Failures raised by bounds-checked grid access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate lies outside `[0, columns) x [0, rows)`.
    #[error("coordinate {coord} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Rejected coordinate.
        coord: Coord,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
    /// The requested dimensions are below [`MIN_GRID_SIZE`].
    #[error("grid dimensions {columns}x{rows} are below the 2x2 minimum")]
    TooSmall {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// The requested dimensions cannot be addressed with signed coordinates.
    #[error("grid dimensions {columns}x{rows} exceed the addressable range")]
    TooLarge {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// A cell was stored into a slot that does not match its own coordinate.
    #[error("cell created for {cell} cannot be stored at {slot}")]
    Misplaced {
        /// Slot the caller attempted to overwrite.
        slot: Coord,
        /// Coordinate recorded inside the cell.
        cell: Coord,
    },
}

/// One grid position with four directional edges and occupant slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    edges: [Edge; 4],
    reached: bool,
    creature: Option<CreatureId>,
    item: Option<ItemId>,
}

impl Cell {
    /// Creates an unreached cell walled in on every side.
    #[must_use]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            edges: [Edge::Wall; 4],
            reached: false,
            creature: None,
            item: None,
        }
    }

    /// Coordinate the cell was created for.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Edge on the provided face of the cell.
    #[must_use]
    pub const fn edge(&self, direction: Direction) -> Edge {
        self.edges[slot(direction)]
    }

    /// Replaces the edge on the provided face of the cell.
    pub fn set_edge(&mut self, direction: Direction, edge: Edge) {
        self.edges[slot(direction)] = edge;
    }

    /// Reports whether an open passage leads out through `direction`.
    #[must_use]
    pub const fn is_passage(&self, direction: Direction) -> bool {
        self.edge(direction).is_passage()
    }

    /// Directions with an open passage, in [`Direction::ALL`] order.
    pub fn passages(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.is_passage(*direction))
    }

    /// Reports whether generation has connected the cell to the start.
    #[must_use]
    pub const fn is_reached(&self) -> bool {
        self.reached
    }

    /// Flags the cell as connected to the start.
    pub fn mark_reached(&mut self) {
        self.reached = true;
    }

    /// Creature currently occupying the cell.
    #[must_use]
    pub const fn creature(&self) -> Option<CreatureId> {
        self.creature
    }

    /// Puts a creature into the cell, returning the previous occupant.
    pub fn place_creature(&mut self, creature: CreatureId) -> Option<CreatureId> {
        self.creature.replace(creature)
    }

    /// Removes and returns the creature occupying the cell.
    pub fn take_creature(&mut self) -> Option<CreatureId> {
        self.creature.take()
    }

    /// Item currently lying in the cell.
    #[must_use]
    pub const fn item(&self) -> Option<ItemId> {
        self.item
    }

    /// Drops an item into the cell, returning the item it displaced.
    pub fn place_item(&mut self, item: ItemId) -> Option<ItemId> {
        self.item.replace(item)
    }

    /// Removes and returns the item lying in the cell.
    pub fn take_item(&mut self) -> Option<ItemId> {
        self.item.take()
    }
}

const fn slot(direction: Direction) -> usize {
    match direction {
        Direction::North => 0,
        Direction::East => 1,
        Direction::South => 2,
        Direction::West => 3,
    }
}

/// Rectangular arena of cells addressed by coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid whose interior faces are all walls.
    ///
    /// Faces on the outer rim are [`Edge::Boundary`].
    pub fn walled(columns: u32, rows: u32) -> Result<Self, GridError> {
        let (width, height, capacity) = checked_extent(columns, rows)?;
        let mut cells = Vec::with_capacity(capacity);
        for y in 0..height {
            for x in 0..width {
                let mut cell = Cell::new(Coord::new(x, y));
                if y == height - 1 {
                    cell.set_edge(Direction::North, Edge::Boundary);
                }
                if y == 0 {
                    cell.set_edge(Direction::South, Edge::Boundary);
                }
                if x == width - 1 {
                    cell.set_edge(Direction::East, Edge::Boundary);
                }
                if x == 0 {
                    cell.set_edge(Direction::West, Edge::Boundary);
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Creates a grid where every interior face is a passage to its neighbour.
    pub fn open(columns: u32, rows: u32) -> Result<Self, GridError> {
        let mut grid = Self::walled(columns, rows)?;
        for cell in &mut grid.cells {
            let here = cell.coord;
            for direction in Direction::ALL {
                if cell.edge(direction).is_wall() {
                    cell.set_edge(direction, Edge::Passage(here.step(direction)));
                }
            }
        }
        Ok(grid)
    }

    /// Number of columns (extent along `x`).
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (extent along `y`).
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells held by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the coordinate addresses a cell of this grid.
    #[must_use]
    pub fn valid(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Cell stored at the provided coordinate.
    pub fn get(&self, coord: Coord) -> Result<&Cell, GridError> {
        match self.index(coord) {
            Some(index) => Ok(&self.cells[index]),
            None => Err(self.out_of_bounds(coord)),
        }
    }

    /// Mutable access to the cell stored at the provided coordinate.
    pub fn get_mut(&mut self, coord: Coord) -> Result<&mut Cell, GridError> {
        match self.index(coord) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(self.out_of_bounds(coord)),
        }
    }

    /// Replaces the cell stored at the provided coordinate.
    ///
    /// The incoming cell must have been created for the same coordinate.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GridError> {
        if cell.coord != coord {
            return Err(GridError::Misplaced {
                slot: coord,
                cell: cell.coord,
            });
        }
        *self.get_mut(coord)? = cell;
        Ok(())
    }

    /// Valid neighbour one step away in `direction`, if any.
    #[must_use]
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let next = coord.step(direction);
        self.valid(next).then_some(next)
    }

    /// Every coordinate in scan order: `x` outer, `y` inner.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = i32::try_from(self.columns).unwrap_or(0);
        let height = i32::try_from(self.rows).unwrap_or(0);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Iterator over every cell in storage order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let column = u32::try_from(coord.x()).ok()?;
        let row = u32::try_from(coord.y()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    const fn out_of_bounds(&self, coord: Coord) -> GridError {
        GridError::OutOfBounds {
            coord,
            columns: self.columns,
            rows: self.rows,
        }
    }
}

fn checked_extent(columns: u32, rows: u32) -> Result<(i32, i32, usize), GridError> {
    if columns < MIN_GRID_SIZE || rows < MIN_GRID_SIZE {
        return Err(GridError::TooSmall { columns, rows });
    }
    let too_large = GridError::TooLarge { columns, rows };
    let width = i32::try_from(columns).map_err(|_| too_large)?;
    let height = i32::try_from(rows).map_err(|_| too_large)?;
    let capacity = usize::try_from(columns)
        .ok()
        .zip(usize::try_from(rows).ok())
        .and_then(|(width, height)| width.checked_mul(height))
        .ok_or(too_large)?;
    Ok((width, height, capacity))
}

/// Read-only questions about connectivity and structure of a grid.
pub mod query {
    use labyrinth_core::{Coord, Direction, Edge};

    use super::{reachability::ReachabilityField, Grid};

    /// Coordinates reachable from `start` through open passages, in
    /// breadth-first order. Empty when `start` lies outside the grid.
    #[must_use]
    pub fn reachable_from(grid: &Grid, start: Coord) -> Vec<Coord> {
        ReachabilityField::explore(grid, start).visit_order().to_vec()
    }

    /// Number of passage steps on the shortest route between two cells.
    #[must_use]
    pub fn path_length(grid: &Grid, from: Coord, to: Coord) -> Option<u32> {
        ReachabilityField::explore(grid, from).distance(to, grid)
    }

    /// Reports whether every cell can be reached from every other cell.
    #[must_use]
    pub fn is_connected(grid: &Grid) -> bool {
        reachable_from(grid, Coord::ORIGIN).len() == grid.cell_count()
    }

    /// Number of undirected passages; each open pair is counted once.
    #[must_use]
    pub fn passage_count(grid: &Grid) -> usize {
        let faces: usize = grid.cells().map(|cell| cell.passages().count()).sum();
        faces / 2
    }

    /// Reports whether the passages form a spanning tree: connected with
    /// exactly one fewer passage than there are cells.
    #[must_use]
    pub fn is_spanning_tree(grid: &Grid) -> bool {
        is_connected(grid) && passage_count(grid) + 1 == grid.cell_count()
    }

    /// Cells whose reached flag is still clear, in scan order.
    #[must_use]
    pub fn unreached(grid: &Grid) -> Vec<Coord> {
        grid.coords()
            .filter(|coord| grid.get(*coord).map_or(false, |cell| !cell.is_reached()))
            .collect()
    }

    /// Reports whether every passage is mirrored by a passage back.
    #[must_use]
    pub fn edges_are_symmetric(grid: &Grid) -> bool {
        grid.cells().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                match cell.edge(direction) {
                    Edge::Passage(neighbor) => {
                        cell.coord().step(direction) == neighbor
                            && grid.get(neighbor).map_or(false, |other| {
                                other.edge(direction.opposite()) == Edge::Passage(cell.coord())
                            })
                    }
                    Edge::Wall => grid
                        .get(cell.coord().step(direction))
                        .map_or(false, |other| other.edge(direction.opposite()).is_wall()),
                    Edge::Boundary => true,
                }
            })
        })
    }

    /// Reports whether exactly the outward faces of the rim are boundaries.
    #[must_use]
    pub fn boundaries_are_correct(grid: &Grid) -> bool {
        grid.cells().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                let outside = !grid.valid(cell.coord().step(direction));
                cell.edge(direction).is_boundary() == outside
            })
        })
    }
}
