//! Soft van der Waals pair potential
//!
//! The pair energy is `A*r^-n - B*r^-m`. The classic Lennard-Jones form
//! uses n = 12 and m = 6; the defaults here (n = 3, m = 2) give a much
//! softer core so a coarse timestep stays stable.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Constants of the pair potential `a*r^-n - b*r^-m`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VdwPotential {
    pub a: f64, // repulsive amplitude
    pub b: f64, // attractive amplitude
    pub n: f64, // repulsive exponent
    pub m: f64, // attractive exponent
}

impl Default for VdwPotential {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 2.0,
            n: 3.0,
            m: 2.0,
        }
    }
}

impl VdwPotential {
    pub fn new(a: f64, b: f64, n: f64, m: f64) -> Self {
        Self { a, b, n, m }
    }

    /// Radial acceleration magnitude at `distance`, i.e. `-dU/dr`.
    ///
    /// Positive values push a pair apart, negative values pull it together.
    /// `distance` must be strictly positive; zero gives a non-finite result.
    #[inline]
    pub fn acceleration_magnitude(&self, distance: f64) -> f64 {
        self.n * self.a * distance.powf(-1.0 - self.n)
            - self.m * self.b * distance.powf(-1.0 - self.m)
    }

    /// Pair energy at `distance`.
    #[inline]
    pub fn energy(&self, distance: f64) -> f64 {
        self.a * distance.powf(-self.n) - self.b * distance.powf(-self.m)
    }

    /// Separation at which the pair force vanishes, if there is one.
    ///
    /// Solves `n*A*r^(-1-n) = m*B*r^(-1-m)`, giving
    /// `r = (n*A / (m*B))^(1/(n-m))`.
    pub fn equilibrium_distance(&self) -> Option<f64> {
        if self.n == self.m {
            return None;
        }
        let ratio = (self.n * self.a) / (self.m * self.b);
        if !(ratio.is_finite() && ratio > 0.0) {
            return None;
        }
        let r = ratio.powf(1.0 / (self.n - self.m));
        (r.is_finite() && r > 0.0).then_some(r)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [("a", self.a), ("b", self.b), ("n", self.n), ("m", self.m)];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidParam(format!(
                    "potential constant {name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}
