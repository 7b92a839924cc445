//! File format parsers for importing atomic coordinate files.
//!
//! Supported formats:
//! - [`.xyz`](xyz) — XYZ molecular coordinate files
//!
//! The format is selected from the file extension, matching how chemistry
//! file readers dispatch.

pub mod xyz;

use std::path::Path;

use thiserror::Error;

/// Errors while loading a structure from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read structure file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("unsupported structure format '{0}' (supported: xyz)")]
    UnsupportedFormat(String),

    #[error("structure contains no cells")]
    Empty,

    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),
}

/// An atomic position read from a coordinate file.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Position in nanometres.
    pub position: [f64; 3],
    /// Element symbol as written in the file.
    pub element: String,
}

/// Read atomic positions from a coordinate file, dispatching on extension.
pub fn read_coordinate_file(path: &Path) -> Result<Vec<Atom>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xyz" => {
            let content = std::fs::read_to_string(path)?;
            xyz::parse_xyz(&content)
        }
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}
