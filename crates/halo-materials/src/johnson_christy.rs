//! Johnson & Christy tabulated dielectric functions.
//!
//! Optical constants for Ag and Au from:
//! P. B. Johnson and R. W. Christy, *Phys. Rev. B* **6**, 4370 (1972).
//!
//! Silver is the primary dataset: the clusters this tool is pointed at are
//! silver icosahedra, with the plasmon-driven enhancement peak in the green.
//! Data is embedded at compile time and interpolated with natural splines.

use num_complex::Complex64;

use crate::provider::{DielectricProvider, MaterialError};
use crate::spline::NaturalSpline;

/// A Johnson & Christy metal with spline-interpolated ε(λ).
#[derive(Debug)]
pub struct JohnsonChristy {
    name: String,
    min_nm: f64,
    max_nm: f64,
    eps_real: NaturalSpline,
    eps_imag: NaturalSpline,
}

impl JohnsonChristy {
    /// Construct from tabulated data.
    ///
    /// # Arguments
    /// * `name` — Material name, e.g. "Ag (Johnson & Christy)".
    /// * `wavelengths_nm` — Strictly increasing wavelengths in nm.
    /// * `re` — Real part of ε at each wavelength.
    /// * `im` — Imaginary part of ε at each wavelength.
    pub fn new(
        name: impl Into<String>,
        wavelengths_nm: Vec<f64>,
        re: Vec<f64>,
        im: Vec<f64>,
    ) -> Self {
        let min_nm = wavelengths_nm[0];
        let max_nm = *wavelengths_nm.last().expect("non-empty table");
        Self {
            name: name.into(),
            min_nm,
            max_nm,
            eps_real: NaturalSpline::new(wavelengths_nm.clone(), re),
            eps_imag: NaturalSpline::new(wavelengths_nm, im),
        }
    }

    /// Silver dataset, 350–900 nm.
    pub fn silver() -> Self {
        let wavelengths = vec![
            350.0, 400.0, 450.0, 500.0, 520.0, 550.0, 600.0, 650.0, 700.0, 750.0, 800.0,
            850.0, 900.0,
        ];
        let re = vec![
            -2.03, -3.77, -6.28, -8.91, -10.06, -11.85, -15.04, -18.57, -22.47, -26.73,
            -31.35, -36.34, -40.68,
        ];
        let im = vec![
            0.60, 0.67, 0.30, 0.30, 0.32, 0.37, 0.43, 0.48, 0.49, 0.53, 0.60, 0.67, 0.73,
        ];
        Self::new("Ag (Johnson & Christy)", wavelengths, re, im)
    }

    /// Gold dataset, 400–800 nm.
    pub fn gold() -> Self {
        let wavelengths = vec![400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0, 750.0, 800.0];
        let re = vec![-1.66, -1.95, -2.83, -5.42, -9.64, -14.05, -18.47, -23.08, -28.24];
        let im = vec![5.29, 4.01, 3.07, 2.26, 1.66, 1.36, 1.18, 1.10, 1.08];
        Self::new("Au (Johnson & Christy)", wavelengths, re, im)
    }
}

impl DielectricProvider for JohnsonChristy {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        (self.min_nm, self.max_nm)
    }

    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        if wavelength_nm < self.min_nm || wavelength_nm > self.max_nm {
            return Err(MaterialError::OutOfRange {
                wavelength_nm,
                min: self.min_nm,
                max: self.max_nm,
            });
        }
        Ok(Complex64::new(
            self.eps_real.evaluate(wavelength_nm),
            self.eps_imag.evaluate(wavelength_nm),
        ))
    }
}
