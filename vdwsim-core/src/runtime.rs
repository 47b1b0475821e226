use crate::config::{MonitorConfig, ScenarioConfig};
use crate::diagnostics::{ConservationBaseline, ConservationMonitor, EnergyReport};
use crate::engine::ParticleSystem;
use crate::error::Result;
use crate::report::ReportSink;
use crate::scenario::build_simulation;
use crate::simulation::{Running, Simulation};

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub particles: usize,
    pub steps: u64,
    pub final_time: f64,
    /// Worst relative energy error seen at any report (when monitored)
    pub max_energy_error: Option<f64>,
    /// Largest momentum drift seen at any report (when monitored)
    pub max_momentum_drift: Option<f64>,
}

/// Main entry point: build the scenario, run it, and report to `sink`
pub fn run_scenario(config: &ScenarioConfig, sink: &mut dyn ReportSink) -> Result<RunSummary> {
    let sim = build_simulation(config)?.initialize();
    log::info!(
        "running {} particles for {} reports of {} steps (dt = {})",
        sim.len(),
        sim.params().reports,
        sim.params().substeps,
        sim.params().dt
    );

    let mut tracker = MonitorTracker::new(&config.monitor, &sim);
    let sim = drive(sim, |sim| {
        sink.report(&sim.snapshot())?;
        if let Some(tracker) = tracker.as_mut() {
            tracker.observe(sim);
        }
        Ok(())
    })?;

    let summary = RunSummary {
        particles: sim.len(),
        steps: sim.steps(),
        final_time: sim.time(),
        max_energy_error: tracker.as_ref().map(|t| t.max_energy_error),
        max_momentum_drift: tracker.as_ref().map(|t| t.max_momentum_drift),
    };
    log::info!(
        "finished {} steps at t = {:.4}",
        summary.steps,
        summary.final_time
    );
    Ok(summary)
}

/// Run a simulation to completion, calling `on_report` after every group
/// of substeps. Returns the simulation in its final state.
pub fn drive<F>(mut sim: Simulation<Running>, mut on_report: F) -> Result<Simulation<Running>>
where
    F: FnMut(&Simulation<Running>) -> Result<()>,
{
    let reports = sim.params().reports;
    for k in 0..reports {
        sim.advance_report();
        if !sim.state().is_finite() {
            log::warn!("non-finite state after report {} (t = {:.4})", k, sim.time());
        }
        log::debug!("report {}/{} at t = {:.4}", k + 1, reports, sim.time());
        on_report(&sim)?;
    }
    Ok(sim)
}

/// Run to completion without reporting and return the final state
pub fn run_to_end(config: &ScenarioConfig) -> Result<ParticleSystem> {
    let sim = build_simulation(config)?.initialize();
    let sim = drive(sim, |_| Ok(()))?;
    Ok(sim.finish())
}

struct MonitorTracker {
    baseline: ConservationBaseline,
    energy_tolerance: f64,
    momentum_tolerance: f64,
    max_energy_error: f64,
    max_momentum_drift: f64,
    warned: bool,
}

impl MonitorTracker {
    fn new(config: &MonitorConfig, sim: &Simulation<Running>) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let baseline = ConservationBaseline::new(&EnergyReport::measure(sim));
        Some(Self {
            baseline,
            energy_tolerance: config.energy_tolerance,
            momentum_tolerance: config.momentum_tolerance,
            max_energy_error: 0.0,
            max_momentum_drift: 0.0,
            warned: false,
        })
    }

    fn observe(&mut self, sim: &Simulation<Running>) {
        let report = EnergyReport::measure(sim);
        let monitor = ConservationMonitor::check(&self.baseline, &report);
        self.max_energy_error = self.max_energy_error.max(monitor.energy_error);
        self.max_momentum_drift = self
            .max_momentum_drift
            .max(monitor.momentum_error.length());

        if !self.warned && monitor.is_violated(self.energy_tolerance, self.momentum_tolerance) {
            // Only the first violation is logged to keep the output readable
            log::warn!(
                "conservation drift at t = {:.4}: energy error {:.3e}, momentum drift {:.3e}",
                report.time,
                monitor.energy_error,
                monitor.momentum_error.length()
            );
            self.warned = true;
        }
    }
}
