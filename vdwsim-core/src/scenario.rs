//! Initial conditions
//!
//! Particles start on a square lattice with small random velocities, the
//! same layout the plotting scripts expect: particle `col + row * cols`
//! sits at `(row * spacing, col * spacing)`.

use crate::config::ScenarioConfig;
use crate::engine::ParticleSystem;
use crate::error::{Error, Result};
use crate::simulation::{Simulation, Uninitialized};
use glam::DVec2;
use rand::distr::{Distribution, Uniform};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Lattice positions, row-major in `col`
pub fn grid_positions(rows: usize, cols: usize, spacing: f64) -> Result<Vec<DVec2>> {
    let count = rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidParam(format!("grid of {} x {} particles is too large", rows, cols))
    })?;
    let mut positions = Vec::with_capacity(count);
    for row in 0..rows {
        for col in 0..cols {
            positions.push(DVec2::new(row as f64 * spacing, col as f64 * spacing));
        }
    }
    Ok(positions)
}

/// Each component drawn uniformly from `[-max_speed, max_speed]`
///
/// Fails when the interval is not a finite, non-empty range.
pub fn uniform_velocities<R: Rng>(
    count: usize,
    max_speed: f64,
    rng: &mut R,
) -> Result<Vec<DVec2>> {
    if max_speed == 0.0 {
        return Ok(vec![DVec2::ZERO; count]);
    }
    let component = Uniform::new_inclusive(-max_speed, max_speed).map_err(|e| {
        Error::InvalidParam(format!("cannot sample velocities in [-{0}, {0}]: {1}", max_speed, e))
    })?;
    let velocities = (0..count)
        .map(|_| {
            let vx = component.sample(rng);
            let vy = component.sample(rng);
            DVec2::new(vx, vy)
        })
        .collect();
    Ok(velocities)
}

/// Seeded generator, or a freshly seeded one when `seed` is `None`
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    }
}

pub fn build_initial_state(config: &ScenarioConfig) -> Result<ParticleSystem> {
    let grid = &config.grid;
    let positions = grid_positions(grid.rows, grid.cols, grid.spacing)?;
    let mut rng = seeded_rng(config.velocity.seed);
    let velocities = uniform_velocities(positions.len(), config.velocity.max_speed, &mut rng)?;
    ParticleSystem::new(positions, velocities)
}

/// Validate the config and lay out its initial state
pub fn build_simulation(config: &ScenarioConfig) -> Result<Simulation<Uninitialized>> {
    config.validate()?;
    let state = build_initial_state(config)?;
    Simulation::new(config.params(), state)
}
