//! Core types shared across the halo pipeline.
//!
//! Excitation descriptors, the solved polarization response, and the field
//! samples handed from the sampler to the renderer. Each stage returns these
//! explicitly; no stage communicates through shared mutable state.

use ndarray::Array2;
use num_complex::Complex64;
use serde::Deserialize;
use thiserror::Error;

/// Errors from excitation and probe-grid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wavelength must be positive and finite, got {0} nm")]
    InvalidWavelength(f64),

    #[error("padding factor must be positive and finite, got {0}")]
    InvalidPadding(f64),

    #[error("probe resolution must be at least 2 points per axis, got {0}")]
    InvalidResolution(usize),
}

/// Incident polarization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    Linear,
    Circular,
}

impl Default for Polarization {
    fn default() -> Self {
        Polarization::Linear
    }
}

/// Plane-wave excitation: wavelength, incidence angle, and s/p amplitudes.
///
/// The incidence direction lies in the xz-plane at `inc_angle_deg` from +z.
/// The s-polarization axis is ŷ; p is k̂ × ŝ. The s-component carries an
/// optional phase offset, which is what turns s+p into circular light.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneWave {
    wavelength_nm: f64,
    inc_angle_deg: f64,
    e_s: f64,
    e_p: f64,
    phase_e_s: f64,
}

impl PlaneWave {
    /// Build a plane wave with explicit field parameters.
    pub fn new(
        wavelength_nm: f64,
        inc_angle_deg: f64,
        e_s: f64,
        e_p: f64,
        phase_e_s: f64,
    ) -> Result<Self, ConfigError> {
        if !wavelength_nm.is_finite() || wavelength_nm <= 0.0 {
            return Err(ConfigError::InvalidWavelength(wavelength_nm));
        }
        Ok(Self {
            wavelength_nm,
            inc_angle_deg,
            e_s,
            e_p,
            phase_e_s,
        })
    }

    /// Build the excitation preset for a polarization mode.
    ///
    /// - `Circular`: incidence angle 180°, E_s = E_p = 1, s-phase −π/2.
    /// - `Linear`: incidence angle 0°, E_s = 0, E_p = 1.
    pub fn with_polarization(
        wavelength_nm: f64,
        polarization: Polarization,
    ) -> Result<Self, ConfigError> {
        match polarization {
            Polarization::Circular => Self::new(
                wavelength_nm,
                180.0,
                1.0,
                1.0,
                -std::f64::consts::FRAC_PI_2,
            ),
            Polarization::Linear => Self::new(wavelength_nm, 0.0, 0.0, 1.0, 0.0),
        }
    }

    pub fn wavelength_nm(&self) -> f64 {
        self.wavelength_nm
    }

    pub fn inc_angle_deg(&self) -> f64 {
        self.inc_angle_deg
    }

    pub fn e_s(&self) -> f64 {
        self.e_s
    }

    pub fn e_p(&self) -> f64 {
        self.e_p
    }

    pub fn phase_e_s(&self) -> f64 {
        self.phase_e_s
    }

    /// Incident intensity |E₀|² = E_s² + E_p².
    pub fn incident_intensity(&self) -> f64 {
        self.e_s * self.e_s + self.e_p * self.e_p
    }

    /// Propagation direction and the s/p polarization axes.
    fn basis(&self) -> ([f64; 3], [f64; 3], [f64; 3]) {
        let theta = self.inc_angle_deg.to_radians();
        let k_hat = [theta.sin(), 0.0, theta.cos()];
        let s_hat = [0.0, 1.0, 0.0];
        // p = k̂ × ŝ
        let p_hat = [-theta.cos(), 0.0, theta.sin()];
        (k_hat, s_hat, p_hat)
    }

    /// Evaluate the incident electric field at a position.
    ///
    /// E(r) = (E_s e^{iφ_s} ŝ + E_p p̂) e^{i k k̂·r}
    pub fn electric_field_at(&self, position: &[f64; 3], k: f64) -> [Complex64; 3] {
        let (k_hat, s_hat, p_hat) = self.basis();
        let kdotr = k
            * (k_hat[0] * position[0] + k_hat[1] * position[1] + k_hat[2] * position[2]);
        let envelope = Complex64::new(0.0, kdotr).exp();
        let amp_s = Complex64::from_polar(self.e_s, self.phase_e_s);
        let amp_p = Complex64::from(self.e_p);

        let mut e = [Complex64::from(0.0); 3];
        for axis in 0..3 {
            e[axis] = (amp_s * s_hat[axis] + amp_p * p_hat[axis]) * envelope;
        }
        e
    }

    /// Evaluate the incident magnetic field at a position.
    ///
    /// For a plane wave in a medium of index n, B(r) = n k̂ × E(r).
    pub fn magnetic_field_at(
        &self,
        position: &[f64; 3],
        k: f64,
        n_environment: f64,
    ) -> [Complex64; 3] {
        let (k_hat, _, _) = self.basis();
        let e = self.electric_field_at(position, k);
        let n = Complex64::from(n_environment);
        [
            n * (k_hat[1] * e[2] - k_hat[2] * e[1]),
            n * (k_hat[2] * e[0] - k_hat[0] * e[2]),
            n * (k_hat[0] * e[1] - k_hat[1] * e[0]),
        ]
    }
}

/// The solved cell polarizations for one excitation.
#[derive(Debug, Clone)]
pub struct PolarizationResponse {
    /// Wavelength (nm) at which the solve ran.
    pub wavelength_nm: f64,
    /// Complex cell polarizations, shape (N, 3).
    pub moments: Array2<Complex64>,
}

/// Complex vector fields sampled on a probe grid.
///
/// All four arrays are index-aligned with `positions` (row-major over the
/// grid). This is the complete output of the sampling stage; the renderer
/// consumes it without recomputing anything.
#[derive(Debug, Clone)]
pub struct FieldSamples {
    /// Probe positions (nm).
    pub positions: Vec<[f64; 3]>,
    /// Scattered electric field at each probe point.
    pub e_scattered: Vec<[Complex64; 3]>,
    /// Total (incident + scattered) electric field.
    pub e_total: Vec<[Complex64; 3]>,
    /// Scattered magnetic field.
    pub b_scattered: Vec<[Complex64; 3]>,
    /// Total magnetic field.
    pub b_total: Vec<[Complex64; 3]>,
    /// Points along x.
    pub nx: usize,
    /// Points along y.
    pub ny: usize,
    /// Grid extent [x_min, x_max, y_min, y_max] (nm).
    pub extent: [f64; 4],
    /// Excitation wavelength (nm).
    pub wavelength_nm: f64,
    /// Incident intensity |E₀|², the enhancement normalisation.
    pub incident_intensity: f64,
}

impl FieldSamples {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Field enhancement |E/E₀|² of the total electric field at each point.
    pub fn enhancement(&self) -> Vec<f64> {
        self.e_total
            .iter()
            .map(|e| {
                (e[0].norm_sqr() + e[1].norm_sqr() + e[2].norm_sqr()) / self.incident_intensity
            })
            .collect()
    }
}

/// Clausius–Mossotti polarisability of one cubic cell.
///
/// α_CM = 3V (ε − ε_m) / (ε + 2ε_m), with ε₀ absorbed so that α has units
/// of volume (nm³).
pub fn clausius_mossotti(volume_nm3: f64, epsilon: Complex64, epsilon_m: f64) -> Complex64 {
    let eps_m = Complex64::from(epsilon_m);
    3.0 * volume_nm3 * (epsilon - eps_m) / (epsilon + 2.0 * eps_m)
}

/// Draine radiative correction, keeping the optical theorem consistent:
/// α = α_CM / (1 − i k³ α_CM / 6π).
pub fn radiative_correction(alpha_cm: Complex64, k: f64) -> Complex64 {
    let reaction = Complex64::new(0.0, k.powi(3) / (6.0 * std::f64::consts::PI));
    alpha_cm / (Complex64::from(1.0) - reaction * alpha_cm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circular_preset_parameters_are_exact() {
        let wave = PlaneWave::with_polarization(520.0, Polarization::Circular).unwrap();
        assert_eq!(wave.inc_angle_deg(), 180.0);
        assert_eq!(wave.e_s(), 1.0);
        assert_eq!(wave.e_p(), 1.0);
        assert_eq!(wave.phase_e_s(), -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn linear_preset_parameters_are_exact() {
        let wave = PlaneWave::with_polarization(520.0, Polarization::Linear).unwrap();
        assert_eq!(wave.inc_angle_deg(), 0.0);
        assert_eq!(wave.e_s(), 0.0);
        assert_eq!(wave.e_p(), 1.0);
        assert_eq!(wave.phase_e_s(), 0.0);
    }

    #[test]
    fn rejects_nonpositive_wavelength() {
        assert!(PlaneWave::with_polarization(0.0, Polarization::Linear).is_err());
        assert!(PlaneWave::with_polarization(-520.0, Polarization::Circular).is_err());
        assert!(PlaneWave::with_polarization(f64::NAN, Polarization::Linear).is_err());
    }

    #[test]
    fn circular_components_are_in_quadrature() {
        let wave = PlaneWave::with_polarization(520.0, Polarization::Circular).unwrap();
        let e = wave.electric_field_at(&[0.0, 0.0, 0.0], 2.0 * std::f64::consts::PI / 520.0);
        // x carries the p-component, y the −i s-component, z nothing.
        assert_abs_diff_eq!(e[0].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[0].im, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[1].re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[1].im, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[2].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_field_is_p_polarized() {
        let wave = PlaneWave::with_polarization(520.0, Polarization::Linear).unwrap();
        let e = wave.electric_field_at(&[0.0, 0.0, 0.0], 2.0 * std::f64::consts::PI / 520.0);
        assert_abs_diff_eq!(e[0].norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[1].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(e[2].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn plane_wave_phase_advances_along_propagation() {
        let wave = PlaneWave::with_polarization(500.0, Polarization::Linear).unwrap();
        let k = 2.0 * std::f64::consts::PI / 500.0;
        // Quarter wavelength along +z shifts the phase by π/2.
        let e0 = wave.electric_field_at(&[0.0, 0.0, 0.0], k);
        let e1 = wave.electric_field_at(&[0.0, 0.0, 125.0], k);
        let ratio = e1[0] / e0[0];
        assert_abs_diff_eq!(ratio.re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ratio.im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn magnetic_field_is_orthogonal_to_e_and_k() {
        let wave = PlaneWave::with_polarization(520.0, Polarization::Linear).unwrap();
        let k = 2.0 * std::f64::consts::PI / 520.0;
        let r = [3.0, -2.0, 7.0];
        let e = wave.electric_field_at(&r, k);
        let b = wave.magnetic_field_at(&r, k, 1.0);
        // E ∥ x, k ∥ z → B ∥ y with |B| = |E|.
        assert_abs_diff_eq!(b[1].norm(), e[0].norm(), epsilon = 1e-12);
        assert_abs_diff_eq!(b[0].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b[2].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn clausius_mossotti_vanishes_for_matched_medium() {
        let alpha = clausius_mossotti(27.0, Complex64::new(1.0, 0.0), 1.0);
        assert!(alpha.norm() < 1e-15);
    }

    #[test]
    fn radiative_correction_adds_negative_imaginary_shift() {
        // For a lossless dielectric, the corrected alpha must gain Im > 0
        // (absorption-free scattering still extinguishes the beam).
        let alpha_cm = clausius_mossotti(27.0, Complex64::new(4.0, 0.0), 1.0);
        let alpha = radiative_correction(alpha_cm, 2.0 * std::f64::consts::PI / 520.0);
        assert!(alpha.im > 0.0);
    }
}
