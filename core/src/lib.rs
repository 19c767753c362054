#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core value types shared across the labyrinth engine.
//!
//! This crate defines the vocabulary that connects the authoritative grid,
//! the generation systems and the adapters. Everything here is a small `Copy`
//! value: coordinates, cardinal directions, the [`Edge`] describing one face
//! of a cell, occupant identifiers and the compass labels produced by the
//! bearing calculator. Nothing in this crate owns cells or draws randomness.

use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};

/// Location on the maze plane expressed as signed `x`/`y` components.
///
/// Coordinates are not bounded by themselves; validity against a particular
/// grid is checked by the grid. `y` grows toward [`Direction::North`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Reports whether both components are zero.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Reports whether `other` lies exactly one step north, south, east or west.
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }

    /// Displacement that leads from `self` to `other`.
    ///
    /// Computed in 64 bits, so any two coordinates have an exact offset.
    #[must_use]
    pub const fn offset_to(self, other: Coord) -> Offset {
        Offset::new(
            other.x as i64 - self.x as i64,
            other.y as i64 - self.y as i64,
        )
    }

    /// Neighbouring coordinate one step away in `direction`.
    ///
    /// Saturates at the edge of the `i32` range, where no grid cell exists.
    #[must_use]
    pub fn step(self, direction: Direction) -> Coord {
        self + direction.delta()
    }
}

/// Displacement between two coordinates.
///
/// Components are 64-bit so that the difference of any two [`Coord`] values
/// is representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    dx: i64,
    dy: i64,
}

impl Offset {
    /// No displacement at all.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a displacement from its components.
    #[must_use]
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i64 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i64 {
        self.dy
    }

    /// Reports whether both components are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Euclidean length measured in cells.
    #[must_use]
    pub fn length(self) -> f64 {
        (self.dx as f64).hypot(self.dy as f64)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Cardinal directions a cell can open toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing `y`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward decreasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit displacement associated with the direction.
    #[must_use]
    pub const fn delta(self) -> Coord {
        match self {
            Self::North => Coord::new(0, 1),
            Self::East => Coord::new(1, 0),
            Self::South => Coord::new(0, -1),
            Self::West => Coord::new(-1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction that leads from `from` to the adjacent coordinate `to`.
    ///
    /// Returns `None` when the coordinates are not grid neighbours.
    #[must_use]
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let offset = from.offset_to(to);
        Self::ALL
            .into_iter()
            .find(|direction| Coord::ORIGIN.offset_to(direction.delta()) == offset)
    }
}

/// What lies on one face of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Outer rim of the grid; no cell exists beyond it.
    Boundary,
    /// A neighbouring cell exists but cannot be entered from this side.
    Wall,
    /// Open connection to the neighbouring cell at the stored coordinate.
    Passage(Coord),
}

impl Edge {
    /// Reports whether the edge is the outer rim.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary)
    }

    /// Reports whether the edge is a sealed wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Reports whether the edge is an open passage.
    #[must_use]
    pub const fn is_passage(&self) -> bool {
        matches!(self, Self::Passage(_))
    }

    /// Coordinate reached through the edge when it is a passage.
    #[must_use]
    pub const fn destination(&self) -> Option<Coord> {
        match self {
            Self::Passage(coord) => Some(*coord),
            Self::Boundary | Self::Wall => None,
        }
    }
}

/// Identifier of a creature placed in a cell by the gameplay layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(u32);

impl CreatureId {
    /// Creates a new creature identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an item lying in a cell, owned by the gameplay layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One of the eight compass points used for directional hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    /// Due east, centred on 0 radians.
    East,
    /// Centred on π/4.
    NorthEast,
    /// Centred on π/2.
    North,
    /// Centred on 3π/4.
    NorthWest,
    /// Centred on π.
    West,
    /// Centred on 5π/4.
    SouthWest,
    /// Centred on 3π/2.
    South,
    /// Centred on 7π/4.
    SouthEast,
}

impl CompassPoint {
    /// Compass points in counter-clockwise order starting from east.
    pub const COUNTER_CLOCKWISE: [CompassPoint; 8] = [
        CompassPoint::East,
        CompassPoint::NorthEast,
        CompassPoint::North,
        CompassPoint::NorthWest,
        CompassPoint::West,
        CompassPoint::SouthWest,
        CompassPoint::South,
        CompassPoint::SouthEast,
    ];

    /// Upper-case label presentation layers print for the point.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::East => "EAST",
            Self::NorthEast => "NORTHEAST",
            Self::North => "NORTH",
            Self::NorthWest => "NORTHWEST",
            Self::West => "WEST",
            Self::SouthWest => "SOUTHWEST",
            Self::South => "SOUTH",
            Self::SouthEast => "SOUTHEAST",
        }
    }
}

/// Coarse distance band used to pick how loud a directional hint sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProximityTier {
    /// Closer than three cells.
    Near,
    /// Between three and six cells.
    Medium,
    /// Between six and ten cells.
    Far,
    /// Ten cells or more.
    Distant,
}

impl ProximityTier {
    /// Buckets a straight-line distance measured in cells.
    #[must_use]
    pub fn classify(distance: f64) -> Self {
        if distance < 3.0 {
            Self::Near
        } else if distance < 6.0 {
            Self::Medium
        } else if distance < 10.0 {
            Self::Far
        } else {
            Self::Distant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompassPoint, Coord, Direction, Edge, Offset, ProximityTier};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn adjacency_requires_single_axis_unit_step() {
        let origin = Coord::new(3, 3);
        assert!(origin.is_adjacent(Coord::new(3, 4)));
        assert!(origin.is_adjacent(Coord::new(2, 3)));
        assert!(!origin.is_adjacent(Coord::new(4, 4)));
        assert!(!origin.is_adjacent(origin));
        assert!(!origin.is_adjacent(Coord::new(3, 5)));
    }

    #[test]
    fn coord_displays_as_pair() {
        assert_eq!(Coord::new(-1, 4).to_string(), "(-1, 4)");
    }

    #[test]
    fn offset_to_is_target_minus_origin() {
        let from = Coord::new(1, 7);
        let to = Coord::new(8, 2);
        assert_eq!(from.offset_to(to), Offset::new(7, -5));
        assert!(from.offset_to(from).is_zero());
        assert!((from.offset_to(to).length() - 74.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn coordinates_at_the_range_limits_do_not_overflow() {
        let low = Coord::new(i32::MIN, i32::MIN);
        let high = Coord::new(i32::MAX, i32::MAX);
        assert!(!low.is_adjacent(high));
        assert!(!high.is_adjacent(low));
        assert_eq!(
            low.offset_to(high),
            Offset::new(u32::MAX.into(), u32::MAX.into())
        );
        assert_eq!(high.step(Direction::North), high);
        assert_eq!(low.step(Direction::West), low);
        assert_eq!(Direction::between(low, high), None);
        assert!(Coord::new(i32::MAX, 0).is_adjacent(Coord::new(i32::MAX - 1, 0)));
    }

    #[test]
    fn directions_are_distinct_unit_vectors() {
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            assert!(Coord::ORIGIN.is_adjacent(direction.delta()));
            for other in Direction::ALL.into_iter().skip(index + 1) {
                assert_ne!(direction.delta(), other.delta());
            }
        }
    }

    #[test]
    fn opposite_is_an_involution_that_negates_delta() {
        for direction in Direction::ALL {
            let opposite = direction.opposite();
            assert_eq!(opposite.opposite(), direction);
            assert!((direction.delta() + opposite.delta()).is_origin());
        }
    }

    #[test]
    fn between_recovers_step_direction() {
        let here = Coord::new(5, 5);
        for direction in Direction::ALL {
            assert_eq!(Direction::between(here, here.step(direction)), Some(direction));
        }
        assert_eq!(Direction::between(here, Coord::new(6, 6)), None);
        assert_eq!(Direction::between(here, here), None);
    }

    #[test]
    fn edge_destination_only_for_passages() {
        let target = Coord::new(2, 1);
        assert_eq!(Edge::Passage(target).destination(), Some(target));
        assert_eq!(Edge::Wall.destination(), None);
        assert!(Edge::Boundary.is_boundary());
        assert!(!Edge::Wall.is_passage());
    }

    #[test]
    fn proximity_tiers_follow_distance_bands() {
        assert_eq!(ProximityTier::classify(1.0), ProximityTier::Near);
        assert_eq!(ProximityTier::classify(3.0), ProximityTier::Medium);
        assert_eq!(ProximityTier::classify(5.99), ProximityTier::Medium);
        assert_eq!(ProximityTier::classify(6.0), ProximityTier::Far);
        assert_eq!(ProximityTier::classify(10.0), ProximityTier::Distant);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn coord_round_trips_through_bincode() {
        assert_round_trip(&Coord::new(-4, 9));
    }

    #[test]
    fn compass_point_round_trips_through_bincode() {
        assert_round_trip(&CompassPoint::SouthWest);
    }
}
