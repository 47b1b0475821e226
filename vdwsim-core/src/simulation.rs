//! Simulation lifecycle
//!
//! A [`Simulation`] starts out [`Uninitialized`], with positions and
//! velocities defined at the same instant. [`Simulation::initialize`] shifts
//! the velocities back half a step and hands back a [`Running`] simulation,
//! which is the only kind that can be stepped. Initializing twice or stepping
//! before initializing does not compile.

use crate::engine::ParticleSystem;
use crate::error::{Error, Result};
use crate::forces::{check_separation, MIN_SEPARATION};
use crate::integrator::{init_half_step, leapfrog_step};
use crate::params::SimParams;
use crate::report::Snapshot;
use glam::DVec2;
use std::marker::PhantomData;

/// Positions and velocities are synchronised; no step has been taken.
#[derive(Debug)]
pub struct Uninitialized;

/// Velocities lag positions by half a step; the simulation can advance.
#[derive(Debug)]
pub struct Running;

#[derive(Debug)]
pub struct Simulation<S> {
    params: SimParams,
    state: ParticleSystem,
    accel: Vec<DVec2>, // scratch buffer, rewritten on every force evaluation
    steps: u64,
    _phase: PhantomData<S>,
}

impl<S> Simulation<S> {
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn state(&self) -> &ParticleSystem {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl Simulation<Uninitialized> {
    /// Validate parameters and initial state.
    ///
    /// Rejects an empty system, non-finite coordinates and any pair of
    /// particles closer than [`MIN_SEPARATION`].
    pub fn new(params: SimParams, state: ParticleSystem) -> Result<Self> {
        params.validate()?;
        if state.is_empty() {
            return Err(Error::InvalidParam("particle count must be > 0".into()));
        }
        if !state.is_finite() {
            return Err(Error::InvalidParam(
                "initial positions and velocities must be finite".into(),
            ));
        }
        check_separation(state.positions(), MIN_SEPARATION)?;

        let accel = vec![DVec2::ZERO; state.len()];
        Ok(Self {
            params,
            state,
            accel,
            steps: 0,
            _phase: PhantomData,
        })
    }

    /// Seed the leapfrog recurrence and start the run.
    pub fn initialize(mut self) -> Simulation<Running> {
        init_half_step(
            &mut self.state,
            &self.params.potential,
            self.params.dt,
            &mut self.accel,
        );
        log::debug!(
            "initialized {} particles with dt = {}",
            self.state.len(),
            self.params.dt
        );
        Simulation {
            params: self.params,
            state: self.state,
            accel: self.accel,
            steps: 0,
            _phase: PhantomData,
        }
    }
}

impl Simulation<Running> {
    /// One leapfrog step
    pub fn step(&mut self) {
        leapfrog_step(
            &mut self.state,
            &self.params.potential,
            self.params.dt,
            &mut self.accel,
        );
        self.steps += 1;
    }

    /// Take `count` steps
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Take one report's worth of steps
    pub fn advance_report(&mut self) {
        self.advance(self.params.substeps);
    }

    /// Number of steps taken since initialization
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time of the current positions
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.params.dt
    }

    /// True once the configured number of reports has been produced
    pub fn is_done(&self) -> bool {
        self.steps >= self.params.total_steps()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time: self.time(),
            positions: self.state.positions(),
            velocities: self.state.velocities(),
        }
    }

    /// End the run and take the final state.
    ///
    /// Velocities in the returned state are at t - dt/2.
    pub fn finish(self) -> ParticleSystem {
        self.state
    }
}
