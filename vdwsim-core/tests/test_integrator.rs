//! Tests for the leapfrog step and the half-step initializer

use glam::DVec2;
use vdwsim_core::diagnostics::total_momentum;
use vdwsim_core::forces::accelerations;
use vdwsim_core::scenario::{seeded_rng, uniform_velocities};
use vdwsim_core::tests::test_helpers::{approx_eq_vec, jittered_grid, two_body_system};
use vdwsim_core::{init_half_step, leapfrog_step, ParticleSystem, VdwPotential};

fn moving_pair() -> ParticleSystem {
    ParticleSystem::new(
        vec![DVec2::new(0.0, 0.0), DVec2::new(1.3, 0.4)],
        vec![DVec2::new(0.02, -0.01), DVec2::new(-0.03, 0.05)],
    )
    .unwrap()
}

#[test]
fn test_init_half_step_velocity() {
    let p = VdwPotential::default();
    let dt = 0.01;
    let mut state = moving_pair();
    let v0 = state.velocities().to_vec();
    let a0 = accelerations(state.positions(), &p);

    let mut scratch = vec![DVec2::ZERO; state.len()];
    init_half_step(&mut state, &p, dt, &mut scratch);

    for i in 0..state.len() {
        let expected = v0[i] - a0[i] * (0.5 * dt);
        assert!(approx_eq_vec(state.velocities()[i], expected, 1e-15));
    }
    // The scratch buffer holds the t = 0 accelerations
    assert_eq!(scratch, a0);
}

#[test]
fn test_init_leaves_positions_alone() {
    let p = VdwPotential::default();
    let mut state = moving_pair();
    let x0 = state.positions().to_vec();

    let mut scratch = vec![DVec2::ZERO; state.len()];
    init_half_step(&mut state, &p, 0.01, &mut scratch);
    assert_eq!(state.positions(), x0.as_slice());
}

#[test]
fn test_step_kicks_then_drifts() {
    let p = VdwPotential::default();
    let dt = 0.01;
    let mut state = moving_pair();
    let x0 = state.positions().to_vec();
    let v_half = state.velocities().to_vec();
    let a0 = accelerations(state.positions(), &p);

    let mut scratch = vec![DVec2::ZERO; state.len()];
    leapfrog_step(&mut state, &p, dt, &mut scratch);

    for i in 0..state.len() {
        let v_new = v_half[i] + a0[i] * dt;
        assert!(approx_eq_vec(state.velocities()[i], v_new, 1e-15));
        // Drift uses the updated velocity, not the old one
        assert!(approx_eq_vec(state.positions()[i], x0[i] + v_new * dt, 1e-15));
    }
}

#[test]
fn test_free_particle_moves_in_straight_line() {
    let p = VdwPotential::default();
    let dt = 0.1;
    let mut state =
        ParticleSystem::new(vec![DVec2::new(1.0, 2.0)], vec![DVec2::new(0.5, -0.25)]).unwrap();

    let mut scratch = vec![DVec2::ZERO; 1];
    init_half_step(&mut state, &p, dt, &mut scratch);
    for _ in 0..10 {
        leapfrog_step(&mut state, &p, dt, &mut scratch);
    }
    assert!(approx_eq_vec(state.positions()[0], DVec2::new(1.5, 1.75), 1e-12));
    assert_eq!(state.velocities()[0], DVec2::new(0.5, -0.25));
}

#[test]
fn test_momentum_conserved_over_many_steps() {
    let p = VdwPotential::default();
    let dt = 0.01;
    let positions = jittered_grid(4, 4, 0.15);
    let mut rng = seeded_rng(Some(7));
    let velocities = uniform_velocities(positions.len(), 0.05, &mut rng).unwrap();
    let mut state = ParticleSystem::new(positions, velocities).unwrap();
    let p0 = total_momentum(state.velocities());

    let mut scratch = vec![DVec2::ZERO; state.len()];
    init_half_step(&mut state, &p, dt, &mut scratch);
    for _ in 0..1000 {
        leapfrog_step(&mut state, &p, dt, &mut scratch);
    }

    let drift = total_momentum(state.velocities()) - p0;
    assert!(drift.length() < 1e-12, "momentum drifted by {:?}", drift);
}

#[test]
fn test_equilibrium_pair_stays_put() {
    let p = VdwPotential::default();
    let r0 = p.equilibrium_distance().unwrap();
    let mut state = two_body_system(r0);
    let x0 = state.positions().to_vec();

    let mut scratch = vec![DVec2::ZERO; 2];
    init_half_step(&mut state, &p, 0.01, &mut scratch);
    for _ in 0..2000 {
        leapfrog_step(&mut state, &p, 0.01, &mut scratch);
    }

    for (x, x_init) in state.positions().iter().zip(x0.iter()) {
        assert!(approx_eq_vec(*x, *x_init, 1e-9), "moved to {:?}", x);
    }
    for v in state.velocities() {
        assert!(v.length() < 1e-9);
    }
}

#[test]
#[should_panic(expected = "acceleration buffer length must match particle count")]
fn test_short_scratch_buffer_panics() {
    let p = VdwPotential::default();
    let mut state = moving_pair();
    let mut scratch = vec![DVec2::ZERO; 1];
    leapfrog_step(&mut state, &p, 0.01, &mut scratch);
}
