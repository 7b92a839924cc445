//! Self-consistent polarization solve.
//!
//! A [`Simulation`] aggregates the discretised structure, the plane-wave
//! excitation, and the quasistatic propagator. [`Simulation::scatter`]
//! computes the self-consistent cell polarizations under the incident field
//! by assembling and LU-solving the $3N \times 3N$ interaction system. The
//! call blocks until the solve finishes; there is no cancellation and no
//! progress reporting beyond log lines.

pub mod assembly;
pub mod direct;

use ndarray::Array2;
use num_complex::Complex64;
use thiserror::Error;

use halo_geometry::Structure;
use halo_materials::{DielectricProvider, MaterialError};

use crate::dyads::QuasistaticDyads;
use crate::types::{clausius_mossotti, radiative_correction, PlaneWave, PolarizationResponse};

/// Errors from the polarization solve.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("linear algebra error: {0}")]
    LinAlg(String),
}

/// A configured simulation: structure + excitation + propagator, plus the
/// per-cell polarisability derived from the material at the excitation
/// wavelength. Immutable once built.
#[derive(Debug, Clone)]
pub struct Simulation {
    structure: Structure,
    field: PlaneWave,
    dyads: QuasistaticDyads,
    alpha: Complex64,
}

impl Simulation {
    /// Configure a simulation over a homogeneous structure.
    ///
    /// Looks up the material's ε at the excitation wavelength and derives the
    /// cell polarisability (Clausius–Mossotti with radiative correction, cell
    /// volume = step³).
    pub fn new(
        structure: Structure,
        field: PlaneWave,
        dyads: QuasistaticDyads,
        material: &dyn DielectricProvider,
    ) -> Result<Self, SolveError> {
        if structure.is_empty() {
            return Err(SolveError::InvalidGeometry("structure has no cells".into()));
        }

        let epsilon = material.dielectric_function(field.wavelength_nm())?;
        let epsilon_m = dyads.epsilon_environment();
        let k = dyads.wavenumber(field.wavelength_nm());
        let volume = structure.step_size().powi(3);
        let alpha = radiative_correction(clausius_mossotti(volume, epsilon, epsilon_m), k);

        log::debug!(
            "configured simulation: {} cells, lambda = {} nm, eps = {:.3} + {:.3}i",
            structure.len(),
            field.wavelength_nm(),
            epsilon.re,
            epsilon.im
        );

        Ok(Self {
            structure,
            field,
            dyads,
            alpha,
        })
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn field(&self) -> &PlaneWave {
        &self.field
    }

    pub fn dyads(&self) -> &QuasistaticDyads {
        &self.dyads
    }

    /// Cell polarisability at the excitation wavelength (nm³).
    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    /// Solve for the self-consistent cell polarizations.
    pub fn scatter(&self) -> Result<PolarizationResponse, SolveError> {
        let positions = self.structure.positions();
        let n = positions.len();
        let k = self.dyads.wavenumber(self.field.wavelength_nm());

        log::info!("assembling {0}x{0} interaction matrix ({1} cells)", 3 * n, n);
        let matrix = assembly::interaction_matrix(positions, self.alpha, &self.dyads);
        let rhs = assembly::incident_field_vector(positions, &self.field, k);

        let solution = direct::solve_lu(&matrix, &rhs)?;

        let mut moments = Array2::<Complex64>::zeros((n, 3));
        for i in 0..n {
            for c in 0..3 {
                moments[[i, c]] = solution[3 * i + c];
            }
        }
        log::info!("scatter solve complete");

        Ok(PolarizationResponse {
            wavelength_nm: self.field.wavelength_nm(),
            moments,
        })
    }
}
