//! Scenario configuration loaded from YAML.
//!
//! A scenario describes the pair potential, the initial grid, how initial
//! velocities are drawn and how long to integrate. Every field has a
//! default, so an empty document runs the stock 10x10 simulation.
//!
//! ```yaml
//! potential:
//!   a: 1.0          # repulsive amplitude
//!   b: 2.0          # attractive amplitude
//!   n: 3.0          # repulsive exponent
//!   m: 2.0          # attractive exponent
//!
//! grid:
//!   rows: 10
//!   cols: 10
//!   spacing: 1.0
//!
//! velocity:
//!   max_speed: 0.01 # components drawn from [-max_speed, max_speed]
//!   seed: 42        # omit for a fresh seed each run
//!
//! integration:
//!   dt: 0.01
//!   substeps: 5     # steps between reports
//!   reports: 300
//!
//! monitor:
//!   enabled: true
//!   energy_tolerance: 0.05
//!   momentum_tolerance: 1.0e-9
//! ```

use crate::error::{Error, Result};
use crate::params::SimParams;
use crate::potential::VdwPotential;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Initial particle layout: `rows x cols` points on a square lattice
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            spacing: 1.0,
        }
    }
}

impl GridConfig {
    /// `rows * cols`, or `None` when the product does not fit in `usize`
    pub fn particle_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}

/// Initial velocity sampling
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VelocityConfig {
    pub max_speed: f64,    // bound of each velocity component
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            max_speed: 0.01,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrationConfig {
    pub dt: f64,
    pub substeps: usize,
    pub reports: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        let params = SimParams::default();
        Self {
            dt: params.dt,
            substeps: params.substeps,
            reports: params.reports,
        }
    }
}

/// Conservation checks performed at every report
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    pub enabled: bool,
    pub energy_tolerance: f64,   // relative
    pub momentum_tolerance: f64, // absolute
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            energy_tolerance: 0.05,
            momentum_tolerance: 1e-9,
        }
    }
}

/// Top-level scenario configuration
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub potential: VdwPotential,
    pub grid: GridConfig,
    pub velocity: VelocityConfig,
    pub integration: IntegrationConfig,
    pub monitor: MonitorConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        // An empty document deserializes as null, not as an empty map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ScenarioConfig = serde_yaml::from_str(source)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    pub fn params(&self) -> SimParams {
        SimParams {
            potential: self.potential,
            dt: self.integration.dt,
            substeps: self.integration.substeps,
            reports: self.integration.reports,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.grid.particle_count() {
            Some(0) => {
                return Err(Error::InvalidParam("grid must hold at least one particle".into()));
            }
            None => {
                return Err(Error::InvalidParam(format!(
                    "grid of {} x {} particles is too large",
                    self.grid.rows, self.grid.cols
                )));
            }
            Some(_) => {}
        }
        if !self.grid.spacing.is_finite() || self.grid.spacing <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "grid spacing must be finite and > 0, got {}",
                self.grid.spacing
            )));
        }
        // The sampled interval is 2 * max_speed wide and must stay finite
        let max_speed = self.velocity.max_speed;
        if !(2.0 * max_speed).is_finite() || max_speed < 0.0 {
            return Err(Error::InvalidParam(format!(
                "max_speed must be >= 0 with a finite range, got {}",
                self.velocity.max_speed
            )));
        }
        if self.monitor.energy_tolerance.is_nan() || self.monitor.momentum_tolerance.is_nan() {
            return Err(Error::InvalidParam("monitor tolerances must not be NaN".into()));
        }
        self.params().validate()
    }
}
