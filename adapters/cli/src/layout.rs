use labyrinth_core::{Coord, Direction};
use labyrinth_world::{Grid, GridError};

/// Connector drawn above or below a cell whose north or south face is open.
const VERTICAL_PASSAGE: &str = " || ";
const VERTICAL_WALL: &str = "    ";
const HORIZONTAL_PASSAGE: char = '=';
const HORIZONTAL_WALL: char = ' ';
const EMPTY_MARKER: char = '/';

/// Cells highlighted in the rendered layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Markers {
    /// Cell marked with `S`.
    pub(crate) start: Coord,
    /// Cell marked with `T`.
    pub(crate) target: Coord,
}

/// Renders the grid as ASCII art, north rim first.
///
/// Each cell occupies three text lines four characters wide: a north
/// connector, a middle line carrying the west connector, the start and target
/// markers and the east connector, and a south connector.
pub(crate) fn render(grid: &Grid, markers: Markers) -> Result<String, GridError> {
    let too_large = GridError::TooLarge {
        columns: grid.columns(),
        rows: grid.rows(),
    };
    let columns = i32::try_from(grid.columns()).map_err(|_| too_large)?;
    let rows = i32::try_from(grid.rows()).map_err(|_| too_large)?;

    let mut output = String::new();
    for y in (0..rows).rev() {
        let mut top = String::new();
        let mut middle = String::new();
        let mut bottom = String::new();

        for x in 0..columns {
            let coord = Coord::new(x, y);
            let cell = grid.get(coord)?;

            top.push_str(vertical(cell.is_passage(Direction::North)));
            bottom.push_str(vertical(cell.is_passage(Direction::South)));

            middle.push(horizontal(cell.is_passage(Direction::West)));
            middle.push(marker(coord == markers.start, 'S'));
            middle.push(marker(coord == markers.target, 'T'));
            middle.push(horizontal(cell.is_passage(Direction::East)));
        }

        for line in [top, middle, bottom] {
            output.push_str(&line);
            output.push('\n');
        }
    }
    Ok(output)
}

const fn vertical(open: bool) -> &'static str {
    if open {
        VERTICAL_PASSAGE
    } else {
        VERTICAL_WALL
    }
}

const fn horizontal(open: bool) -> char {
    if open {
        HORIZONTAL_PASSAGE
    } else {
        HORIZONTAL_WALL
    }
}

const fn marker(present: bool, symbol: char) -> char {
    if present {
        symbol
    } else {
        EMPTY_MARKER
    }
}

#[cfg(test)]
mod tests {
    use labyrinth_world::passage;

    use super::*;

    fn lines(grid: &Grid, markers: Markers) -> Vec<String> {
        render(grid, markers)
            .expect("layout renders")
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn renders_north_rim_first_with_markers() {
        let mut grid = Grid::walled(2, 2).expect("grid");
        passage::open(&mut grid, Coord::new(0, 0), Coord::new(1, 0));
        let markers = Markers {
            start: Coord::new(0, 1),
            target: Coord::new(1, 0),
        };

        assert_eq!(
            lines(&grid, markers),
            vec![
                "        ",
                " S/  // ",
                "        ",
                "        ",
                " //==/T ",
                "        ",
            ]
        );
    }

    #[test]
    fn vertical_passages_draw_connectors_on_both_cells() {
        let mut grid = Grid::walled(2, 2).expect("grid");
        passage::open(&mut grid, Coord::new(1, 0), Coord::new(1, 1));
        let markers = Markers {
            start: Coord::new(0, 0),
            target: Coord::new(0, 0),
        };

        let rendered = lines(&grid, markers);
        assert_eq!(rendered[2], "     || ");
        assert_eq!(rendered[3], "     || ");
        assert_eq!(rendered[4], " ST  // ");
    }

    #[test]
    fn rim_faces_never_draw_connectors() {
        let grid = Grid::open(3, 2).expect("grid");
        let markers = Markers {
            start: Coord::new(0, 0),
            target: Coord::new(2, 1),
        };

        let rendered = lines(&grid, markers);
        assert_eq!(rendered.len(), 6);
        assert_eq!(rendered[0], "            ");
        assert_eq!(rendered[1], " //==//==/T ");
        assert_eq!(rendered[5], "            ");
    }
}
