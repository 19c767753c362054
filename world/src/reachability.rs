//! Breadth-first reachability field used by the query module.

use std::collections::VecDeque;

use labyrinth_core::Coord;

use crate::Grid;

/// Dense passage-distance grid seeded from a single start cell.
///
/// Distances default to `u32::MAX` for cells that cannot be reached through
/// open passages, so callers can distinguish sealed pockets from connected
/// cells. The field also records the order in which cells were dequeued.
#[derive(Clone, Debug, Default)]
pub(crate) struct ReachabilityField {
    distances: Vec<u32>,
    order: Vec<Coord>,
}

impl ReachabilityField {
    /// Runs a breadth-first search over the passages of `grid`.
    pub(crate) fn explore(grid: &Grid, start: Coord) -> Self {
        let mut field = Self {
            distances: vec![u32::MAX; grid.cell_count()],
            order: Vec::new(),
        };

        let Some(start_index) = grid.index(start) else {
            return field;
        };

        field.distances[start_index] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(coord) = queue.pop_front() {
            field.order.push(coord);
            let Some(current_index) = grid.index(coord) else {
                continue;
            };
            let next_distance = field.distances[current_index].saturating_add(1);

            for neighbor in grid.cells[current_index]
                .passages()
                .filter_map(|direction| grid.cells[current_index].edge(direction).destination())
            {
                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };

                if field.distances[neighbor_index] <= next_distance {
                    continue;
                }

                field.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        field
    }

    /// Cells in the order the search settled them, start first.
    #[must_use]
    pub(crate) fn visit_order(&self) -> &[Coord] {
        &self.order
    }

    /// Passage distance captured for the provided cell, if it was reached.
    #[must_use]
    pub(crate) fn distance(&self, cell: Coord, grid: &Grid) -> Option<u32> {
        let index = grid.index(cell)?;
        self.distances
            .get(index)
            .copied()
            .filter(|distance| *distance != u32::MAX)
    }
}
