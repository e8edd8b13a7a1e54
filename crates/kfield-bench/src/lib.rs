//! Benchmark profiles and scenarios for kfield.
//!
//! Provides pre-built setups shared by the benches and examples:
//!
//! - [`reference_grid`]: 32³ unit-cell grid at Courant number 0.5
//! - [`tight_focusing_chain`]: the focusing scenario's mapping chain
//! - [`focusing_pulse`]: converging spherical pulse for initialisation

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kfield_core::constants::{C, PI};
use kfield_core::{Axis, ConfigError, Vec3};
use kfield_grid::{GridConfig, SpectralGrid};
use kfield_mapping::{MappingChain, TightFocusingMapping};

/// Parameters of the tight-focusing scenario, in units of the
/// wavelength.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusingScenario {
    /// Number of cells along each axis.
    pub cells: [usize; 3],
    /// Wavelength (cm).
    pub wavelength: f64,
    /// Focusing radius.
    pub r0: f64,
    /// Pulse length.
    pub pulse_length: f64,
    /// Period of the box along x.
    pub period: f64,
    /// Courant number `c·dt/step_x`.
    pub courant: f64,
}

impl Default for FocusingScenario {
    fn default() -> Self {
        Self {
            cells: [64, 64, 64],
            wavelength: 0.9e-4,
            r0: 16.0,
            pulse_length: 2.0,
            period: 20.0,
            courant: 0.5,
        }
    }
}

impl FocusingScenario {
    /// Grid spanning one period along x, centred on the focus across.
    pub fn grid(&self) -> Result<SpectralGrid, ConfigError> {
        let lambda = self.wavelength;
        let d = self.period * lambda;
        let r = self.r0 * lambda;
        let tf = self.mapping()?;
        let min = Vec3::new(tf.min_coord(), -r, -r);
        let max = Vec3::new(tf.min_coord() + d, r, r);
        let mut config = GridConfig::from_bounds(self.cells, min, max, 1.0);
        config.dt = self.courant * config.steps.x / C;
        SpectralGrid::new(&config)
    }

    /// The tight-focusing mapping in physical units.
    pub fn mapping(&self) -> Result<TightFocusingMapping, ConfigError> {
        let lambda = self.wavelength;
        TightFocusingMapping::new(
            self.r0 * lambda,
            self.pulse_length * lambda,
            self.period * lambda,
            Axis::X,
        )
    }
}

/// 32³ unit-cell grid at Courant number 0.5.
pub fn reference_grid() -> SpectralGrid {
    let config = GridConfig {
        cells: [32, 32, 32],
        dt: 0.5 / C,
        ..Default::default()
    };
    match SpectralGrid::new(&config) {
        Ok(grid) => grid,
        Err(e) => panic!("reference grid config is invalid: {e}"),
    }
}

/// Chain holding only the scenario's tight-focusing mapping.
pub fn tight_focusing_chain(scenario: &FocusingScenario) -> Result<MappingChain, ConfigError> {
    let mut chain = MappingChain::new();
    chain.push(scenario.mapping()?);
    Ok(chain)
}

/// Converging spherical pulse of the scenario: a transverse E along
/// `ẑ × r̂` with a cos² envelope of the pulse length around `r0`.
///
/// Returns `(E, B)` with `B = r̂ × E` for an inward-travelling wave.
pub fn focusing_pulse(scenario: &FocusingScenario, r: Vec3) -> (Vec3, Vec3) {
    let lambda = scenario.wavelength;
    let r0 = scenario.r0 * lambda;
    let half = 0.5 * scenario.pulse_length * lambda;
    let norm = r.norm();
    if norm == 0.0 || (norm - r0).abs() >= half {
        return (Vec3::zeros(), Vec3::zeros());
    }
    let rhat = r / norm;
    let envelope = (PI * (norm - r0) / (2.0 * half)).cos().powi(2);
    let phase = 2.0 * PI * (norm - r0) / lambda;
    let amplitude = envelope * phase.sin();
    let polar = Vec3::z().cross(&rhat);
    let e = polar * amplitude;
    // Inward propagation: B = −r̂ × E.
    let b = -rhat.cross(&e);
    (e, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_grid_spans_one_period() {
        let s = FocusingScenario {
            cells: [16, 8, 8],
            ..Default::default()
        };
        let grid = s.grid().unwrap();
        let span = grid.steps().x * 16.0;
        assert!((span - s.period * s.wavelength).abs() < 1e-12);
        assert!((grid.dt() * C - 0.5 * grid.steps().x).abs() < 1e-18);
    }

    #[test]
    fn pulse_vanishes_outside_shell() {
        let s = FocusingScenario::default();
        let (e, b) = focusing_pulse(&s, Vec3::zeros());
        assert_eq!((e, b), (Vec3::zeros(), Vec3::zeros()));
        let far = Vec3::new(0.0, 30.0 * s.wavelength, 0.0);
        assert_eq!(focusing_pulse(&s, far).0, Vec3::zeros());
    }

    #[test]
    fn pulse_is_transverse() {
        let s = FocusingScenario::default();
        let r = Vec3::new(-15.6, 3.0, 1.0) * s.wavelength;
        let (e, b) = focusing_pulse(&s, r);
        assert!(e.norm() > 0.0);
        assert!(e.dot(&r).abs() < 1e-12 * e.norm() * r.norm());
        assert!(b.dot(&r).abs() < 1e-12 * b.norm() * r.norm());
        assert!((e.norm() - b.norm()).abs() < 1e-12 * e.norm());
    }
}
