//! Material property provider trait.
//!
//! Material data sources implement [`DielectricProvider`], which returns the
//! complex dielectric function at a given wavelength. Every cell of a
//! structure is assigned one provider, looked up by identifier.

use num_complex::Complex64;
use thiserror::Error;

use crate::johnson_christy::JohnsonChristy;

/// Errors from material providers.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("wavelength {wavelength_nm} nm is outside the data range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown material '{0}' (valid identifiers: Ag_JC, Au_JC)")]
    Unknown(String),
}

/// Provides a frequency-dependent complex dielectric function.
pub trait DielectricProvider: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which data is available (nm).
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex dielectric function ε(λ) at a given wavelength.
    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError>;

    /// Complex refractive index ñ = n + ik, derived from ε = ñ².
    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        Ok(self.dielectric_function(wavelength_nm)?.sqrt())
    }
}

/// Look up a provider by its config-file identifier.
pub fn resolve_identifier(id: &str) -> Result<Box<dyn DielectricProvider>, MaterialError> {
    match id {
        "Ag_JC" => Ok(Box::new(JohnsonChristy::silver())),
        "Au_JC" => Ok(Box::new(JohnsonChristy::gold())),
        other => Err(MaterialError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_identifiers() {
        assert!(resolve_identifier("Ag_JC").is_ok());
        assert!(resolve_identifier("Au_JC").is_ok());
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = resolve_identifier("Unobtainium").unwrap_err();
        assert!(err.to_string().contains("Unobtainium"));
    }
}
