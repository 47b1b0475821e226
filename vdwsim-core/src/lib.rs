pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod params;
pub mod potential;
pub mod report;
pub mod runtime;
pub mod scenario;
pub mod simulation;

pub use config::ScenarioConfig;
pub use diagnostics::{ConservationBaseline, ConservationMonitor, EnergyReport};
pub use engine::ParticleSystem;
pub use error::{Error, Result};
pub use forces::{compute_accelerations, MIN_SEPARATION};
pub use integrator::{init_half_step, leapfrog_step};
pub use params::SimParams;
pub use potential::VdwPotential;
pub use report::{Frame, ReportSink, Snapshot, TextReporter, TrajectoryRecorder};
pub use runtime::{drive, run_scenario, run_to_end, RunSummary};
pub use scenario::build_simulation;
pub use simulation::{Running, Simulation, Uninitialized};
