//! # Halo Geometry
//!
//! Structure handling for the halo near-field mapper. This crate provides:
//!
//! - **File parsers** ([`parsers`]) — Import atomic coordinates from `.xyz`
//!   files.
//! - **Structures** ([`structure`]) — Lattice-snapped cell positions with the
//!   extent queries the probe-grid and rendering stages need.

pub mod parsers;
pub mod structure;

pub use parsers::LoadError;
pub use structure::Structure;
