//! Weighted centroid aggregation.
//!
//! Sections are blended lightest first. Each step moves the running point
//! toward the next section center by that section's share of the mass seen
//! so far:
//!
//! ```text
//! running = 0
//! for (mass, center) in sorted_ascending(samples):
//!     running += mass
//!     current = first ? center : lerp(current, center, mass / running)
//! ```
//!
//! The procedure is reproduced step for step; callers relying on bit-exact
//! output must not swap it for a closed-form weighted mean.

use glam::DVec3;
use serde::Serialize;

/// One weighted point fed into [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassSample {
    pub mass: f64,
    pub position: DVec3,
}

impl MassSample {
    pub fn new(mass: f64, position: DVec3) -> Self {
        Self { mass, position }
    }
}

/// Arithmetic mean of `positions`, or the origin when there are none.
pub fn local_center(positions: &[DVec3]) -> DVec3 {
    if positions.is_empty() {
        return DVec3::ZERO;
    }
    positions.iter().copied().sum::<DVec3>() / positions.len() as f64
}

/// `a + (b - a) * t`.
pub fn lerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    (b - a) * t + a
}

/// Blend `samples` into a single point, lightest mass first.
///
/// Samples are expected to carry positive mass; filtering happens before
/// this is called. Ties keep their input order. Returns the origin for an
/// empty slice.
pub fn aggregate(samples: &[MassSample]) -> DVec3 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.mass.total_cmp(&b.mass));

    let mut running_mass = 0.0;
    let mut current: Option<DVec3> = None;

    for sample in &sorted {
        running_mass += sample.mass;

        current = Some(match current {
            None => sample.position,
            Some(at) => lerp(at, sample.position, sample.mass / running_mass),
        });
    }

    current.unwrap_or(DVec3::ZERO)
}
