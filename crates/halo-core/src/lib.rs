//! # Halo Core
//!
//! The numerical backbone of the halo near-field mapper. This crate computes
//! the self-consistent optical response of a discretised nanostructure under
//! plane-wave excitation and samples the resulting near-field on a probe
//! grid above the structure.
//!
//! ## Pipeline
//!
//! 1. Build a [`types::PlaneWave`] excitation from a wavelength and a
//!    [`types::Polarization`] preset.
//! 2. Assemble a [`solver::Simulation`] over a structure, the excitation, and
//!    the [`dyads::QuasistaticDyads`] propagator, then call
//!    [`solver::Simulation::scatter`] for the cell polarizations.
//! 3. Lay a [`probe::ProbeGrid`] above the structure and evaluate
//!    [`fields::nearfield`] for the scattered and total E and B fields.
//!
//! ## Modules
//!
//! - [`types`] — Excitation, solved-response, and field-sample containers.
//! - [`dyads`] — Quasistatic dyadic propagators.
//! - [`solver`] — Interaction-matrix assembly and the direct LU solve.
//! - [`probe`] — Probe-grid construction above a structure.
//! - [`fields`] — Near-field evaluation from solved polarizations.

pub mod dyads;
pub mod fields;
pub mod probe;
pub mod solver;
pub mod types;
