#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Straight-line distance and compass bearing between two cells.
//!
//! The polar angle of the displacement is resolved quadrant by quadrant so
//! that displacements lying on an axis never divide by zero. The angle is then
//! mapped onto eight 45° sectors centred on the compass points, starting with
//! east at `(-π/8, π/8]` and rotating counter-clockwise.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI, TAU};

use labyrinth_core::{CompassPoint, Coord, Offset, ProximityTier};
use thiserror::Error;

/// Defects in sector resolution.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum BearingError {
    /// The angle matched none of the eight compass sectors.
    #[error("angle {angle} rad fell outside every compass sector")]
    UnresolvedSector {
        /// Angle that failed to resolve, in radians.
        angle: f64,
    },
}

/// Distance and direction from an origin cell toward a target cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bearing {
    /// Origin and target are the same cell.
    Coincident,
    /// The target lies `distance` cells away toward `point`.
    Toward {
        /// Euclidean distance measured in cells.
        distance: f64,
        /// Compass point whose sector contains the displacement.
        point: CompassPoint,
    },
}

impl Bearing {
    /// Euclidean distance; zero when the cells coincide.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        match self {
            Self::Coincident => 0.0,
            Self::Toward { distance, .. } => *distance,
        }
    }

    /// Compass point toward the target, if there is any displacement.
    #[must_use]
    pub const fn point(&self) -> Option<CompassPoint> {
        match self {
            Self::Coincident => None,
            Self::Toward { point, .. } => Some(*point),
        }
    }

    /// Distance band of the target, if there is any displacement.
    #[must_use]
    pub fn tier(&self) -> Option<ProximityTier> {
        match self {
            Self::Coincident => None,
            Self::Toward { distance, .. } => Some(ProximityTier::classify(*distance)),
        }
    }
}

/// Computes the distance and compass bearing from `origin` to `target`.
pub fn bearing(origin: Coord, target: Coord) -> Result<Bearing, BearingError> {
    let offset = origin.offset_to(target);
    let Some(angle) = polar_angle(offset) else {
        return Ok(Bearing::Coincident);
    };
    Ok(Bearing::Toward {
        distance: offset.length(),
        point: sector(angle)?,
    })
}

/// Polar angle of a displacement in `[0, 2π)`; `None` for no displacement.
#[must_use]
pub fn polar_angle(offset: Offset) -> Option<f64> {
    let (dx, dy) = (offset.dx(), offset.dy());
    if dx == 0 {
        return match dy.signum() {
            1 => Some(FRAC_PI_2),
            -1 => Some(3.0 * FRAC_PI_2),
            _ => None,
        };
    }

    let basic = (dy as f64 / dx as f64).atan().abs();
    let angle = match (dx.signum(), dy.signum()) {
        (1, 1) => basic,
        (-1, 1) => PI - basic,
        (-1, -1) => PI + basic,
        (1, -1) => TAU - basic,
        (1, _) => 0.0,
        _ => PI,
    };
    Some(angle)
}

/// Compass point whose sector contains `angle` (radians in `[0, 2π)`).
pub fn sector(angle: f64) -> Result<CompassPoint, BearingError> {
    if (0.0..=FRAC_PI_8).contains(&angle) || (angle > 15.0 * FRAC_PI_8 && angle < TAU) {
        return Ok(CompassPoint::East);
    }

    // Sector k spans ((2k - 1)π/8, (2k + 1)π/8].
    let rest = CompassPoint::COUNTER_CLOCKWISE.into_iter().skip(1);
    for (step, point) in (1_u32..).zip(rest) {
        let lower = FRAC_PI_8 * f64::from(2 * step - 1);
        let upper = FRAC_PI_8 * f64::from(2 * step + 1);
        if angle > lower && angle <= upper {
            return Ok(point);
        }
    }
    Err(BearingError::UnresolvedSector { angle })
}
