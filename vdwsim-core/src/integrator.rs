use crate::engine::ParticleSystem;
use crate::forces::compute_accelerations;
use crate::potential::VdwPotential;
use glam::DVec2;

/// Advance the system by one leapfrog step (kick then drift).
///
/// Velocities go in at t - dt/2 and come out at t + dt/2; positions go from
/// t to t + dt. One force evaluation per step, written into `accel`.
///
/// # Panics
///
/// Panics if `accel` is not the same length as the particle system.
pub fn leapfrog_step(
    state: &mut ParticleSystem,
    potential: &VdwPotential,
    dt: f64,
    accel: &mut [DVec2],
) {
    compute_accelerations(state.positions(), potential, accel);

    let (positions, velocities) = state.split_mut();

    // Kick: v(t + dt/2) = v(t - dt/2) + a(t) * dt
    for (v, a) in velocities.iter_mut().zip(accel.iter()) {
        *v += *a * dt;
    }

    // Drift with the new velocity: x(t + dt) = x(t) + v(t + dt/2) * dt
    for (x, v) in positions.iter_mut().zip(velocities.iter()) {
        *x += *v * dt;
    }
}

/// Shift synchronised velocities back half a step to seed the leapfrog.
///
/// Takes positions and velocities both at t = 0 and leaves velocities at
/// t = -dt/2. Must run exactly once before the first [`leapfrog_step`].
///
/// # Panics
///
/// Panics if `accel` is not the same length as the particle system.
pub fn init_half_step(
    state: &mut ParticleSystem,
    potential: &VdwPotential,
    dt: f64,
    accel: &mut [DVec2],
) {
    compute_accelerations(state.positions(), potential, accel);

    let half_dt = 0.5 * dt;
    for (v, a) in state.velocities_mut().iter_mut().zip(accel.iter()) {
        *v -= *a * half_dt;
    }
}
