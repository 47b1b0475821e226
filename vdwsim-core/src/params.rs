//! Numerical and physical parameters for a run
//!
//! `SimParams` holds everything that stays fixed while the system evolves:
//! - the pair potential,
//! - the step size,
//! - how many steps make up one report and how many reports to emit.

use crate::error::{Error, Result};
use crate::potential::VdwPotential;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub potential: VdwPotential,
    pub dt: f64,         // step size
    pub substeps: usize, // integrator calls per report
    pub reports: usize,  // number of reports in a full run
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            potential: VdwPotential::default(),
            dt: 0.01,
            substeps: 5,
            reports: 300,
        }
    }
}

impl SimParams {
    /// Total integrator calls in a full run
    pub fn total_steps(&self) -> u64 {
        self.substeps as u64 * self.reports as u64
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if self.substeps == 0 {
            return Err(Error::InvalidParam("substeps must be >= 1".into()));
        }
        self.potential.validate()
    }
}
