//! Pairwise force accumulation
//!
//! Every unordered pair is visited once. The contribution added to one
//! particle is subtracted from the other, so the accelerations always sum to
//! zero (up to rounding) and total momentum is conserved.

use crate::error::{Error, Result};
use crate::potential::VdwPotential;
use glam::DVec2;

/// Smallest separation accepted when a configuration is validated
pub const MIN_SEPARATION: f64 = 1e-12;

/// Acceleration felt by particle `xi` due to particle `xj`.
///
/// The particle at `xj` feels exactly the negation of this vector.
/// `xi` and `xj` must not coincide.
#[inline]
pub fn pair_acceleration(xi: DVec2, xj: DVec2, potential: &VdwPotential) -> DVec2 {
    // displacement from j to i
    let diff = xi - xj;
    let dist = diff.length();
    let magnitude = potential.acceleration_magnitude(dist);
    // positive magnitude pushes i away from j
    diff * (magnitude / dist)
}

/// Compute the net acceleration of every particle into `out`.
///
/// `out` is zeroed first and must be the same length as `positions`.
/// Coincident particles produce non-finite accelerations; use
/// [`check_separation`] beforehand when that can happen.
///
/// # Panics
///
/// Panics if `out.len() != positions.len()`.
pub fn compute_accelerations(positions: &[DVec2], potential: &VdwPotential, out: &mut [DVec2]) {
    assert_eq!(
        positions.len(),
        out.len(),
        "acceleration buffer length must match particle count"
    );

    for a in out.iter_mut() {
        *a = DVec2::ZERO;
    }

    for i in 0..positions.len() {
        let xi = positions[i];
        for j in 0..i {
            let accel = pair_acceleration(xi, positions[j], potential);
            out[i] += accel;
            out[j] -= accel;
        }
    }
}

/// Allocating convenience wrapper around [`compute_accelerations`]
pub fn accelerations(positions: &[DVec2], potential: &VdwPotential) -> Vec<DVec2> {
    let mut out = vec![DVec2::ZERO; positions.len()];
    compute_accelerations(positions, potential, &mut out);
    out
}

/// Fail on the first pair closer than `min_distance`.
pub fn check_separation(positions: &[DVec2], min_distance: f64) -> Result<()> {
    for i in 0..positions.len() {
        for j in 0..i {
            let distance = positions[i].distance(positions[j]);
            if distance <= min_distance {
                return Err(Error::DegenerateConfiguration { i, j, distance });
            }
        }
    }
    Ok(())
}
