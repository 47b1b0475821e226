use crate::error::{Error, Result};
use glam::DVec2;

/// State of every particle in the simulation
///
/// Positions and velocities are kept in two buffers of equal length; the
/// index into either buffer is the particle id. The buffers can be mutated
/// through slices but never resized, so the particle count is fixed once the
/// system is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystem {
    positions: Vec<DVec2>,
    velocities: Vec<DVec2>,
}

impl ParticleSystem {
    pub fn new(positions: Vec<DVec2>, velocities: Vec<DVec2>) -> Result<Self> {
        if positions.len() != velocities.len() {
            return Err(Error::InvalidParam(format!(
                "got {} positions but {} velocities",
                positions.len(),
                velocities.len()
            )));
        }
        Ok(Self {
            positions,
            velocities,
        })
    }

    /// Particles at the given positions with zero velocity
    pub fn at_rest(positions: Vec<DVec2>) -> Self {
        let velocities = vec![DVec2::ZERO; positions.len()];
        Self {
            positions,
            velocities,
        }
    }

    /// Build from four separate coordinate sequences (x, y, vx, vy)
    pub fn from_components(x: &[f64], y: &[f64], vx: &[f64], vy: &[f64]) -> Result<Self> {
        let n = x.len();
        if y.len() != n || vx.len() != n || vy.len() != n {
            return Err(Error::InvalidParam(format!(
                "coordinate sequences differ in length: x={}, y={}, vx={}, vy={}",
                n,
                y.len(),
                vx.len(),
                vy.len()
            )));
        }
        let positions = x.iter().zip(y).map(|(&x, &y)| DVec2::new(x, y)).collect();
        let velocities = vx.iter().zip(vy).map(|(&x, &y)| DVec2::new(x, y)).collect();
        Ok(Self {
            positions,
            velocities,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [DVec2] {
        &mut self.velocities
    }

    /// Borrow positions and velocities mutably at the same time
    pub fn split_mut(&mut self) -> (&mut [DVec2], &mut [DVec2]) {
        (self.positions.as_mut_slice(), self.velocities.as_mut_slice())
    }

    /// True when every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.positions
            .iter()
            .chain(self.velocities.iter())
            .all(|v| v.is_finite())
    }
}
