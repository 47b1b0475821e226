//! Energy and momentum bookkeeping
//!
//! Every particle has unit mass, so momentum is the sum of velocities and
//! kinetic energy is half the sum of squared speeds. Leapfrog velocities lag
//! positions by half a step; [`EnergyReport::measure`] resynchronises them
//! before computing kinetic energy so the total is evaluated at one instant.

use crate::forces::accelerations;
use crate::potential::VdwPotential;
use crate::simulation::{Running, Simulation};
use glam::DVec2;

pub fn kinetic_energy(velocities: &[DVec2]) -> f64 {
    0.5 * velocities.iter().map(|v| v.length_squared()).sum::<f64>()
}

/// Sum of the pair energy over every unordered pair
pub fn potential_energy(positions: &[DVec2], potential: &VdwPotential) -> f64 {
    let mut total = 0.0;
    for i in 0..positions.len() {
        for j in 0..i {
            total += potential.energy(positions[i].distance(positions[j]));
        }
    }
    total
}

pub fn total_momentum(velocities: &[DVec2]) -> DVec2 {
    velocities.iter().copied().sum()
}

/// Estimate velocities at the positions' time from half-step velocities.
///
/// `v(t) = v(t - dt/2) + a(t) * dt/2`, which undoes the initial half-kick
/// exactly at t = 0.
pub fn synchronized_velocities(half_step: &[DVec2], accel: &[DVec2], dt: f64) -> Vec<DVec2> {
    let half_dt = 0.5 * dt;
    half_step
        .iter()
        .zip(accel.iter())
        .map(|(v, a)| *v + *a * half_dt)
        .collect()
}

/// Conserved quantities at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub time: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
    pub momentum: DVec2,
}

impl EnergyReport {
    /// Measure a running simulation at its current time.
    ///
    /// Costs one extra force evaluation and one pass over all pairs.
    pub fn measure(sim: &Simulation<Running>) -> Self {
        let params = sim.params();
        let state = sim.state();
        let accel = accelerations(state.positions(), &params.potential);
        let velocities = synchronized_velocities(state.velocities(), &accel, params.dt);

        let kinetic = kinetic_energy(&velocities);
        let potential = potential_energy(state.positions(), &params.potential);
        Self {
            time: sim.time(),
            kinetic,
            potential,
            total: kinetic + potential,
            momentum: total_momentum(&velocities),
        }
    }
}

/// Reference values that later measurements are compared against
#[derive(Debug, Clone, Copy)]
pub struct ConservationBaseline {
    pub energy: f64,
    pub momentum: DVec2,
}

impl ConservationBaseline {
    pub fn new(report: &EnergyReport) -> Self {
        Self {
            energy: report.total,
            momentum: report.momentum,
        }
    }
}

/// Conservation errors relative to a baseline
#[derive(Debug, Clone, Copy)]
pub struct ConservationMonitor {
    /// Relative energy error: |E - E0| / |E0|
    pub energy_error: f64,
    /// Momentum drift: p - p0
    pub momentum_error: DVec2,
}

impl ConservationMonitor {
    pub fn check(baseline: &ConservationBaseline, report: &EnergyReport) -> Self {
        // Fall back to absolute error when the baseline energy is ~0
        let energy_error = if baseline.energy.abs() > 1e-12 {
            (report.total - baseline.energy).abs() / baseline.energy.abs()
        } else {
            (report.total - baseline.energy).abs()
        };

        Self {
            energy_error,
            momentum_error: report.momentum - baseline.momentum,
        }
    }

    pub fn is_violated(&self, energy_tol: f64, momentum_tol: f64) -> bool {
        !(self.energy_error <= energy_tol && self.momentum_error.length() <= momentum_tol)
    }
}
