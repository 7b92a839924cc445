//! TOML configuration deserialisation for mapping jobs.

use serde::Deserialize;

use halo_core::types::Polarization;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub structure: StructureConfig,
    pub excitation: ExcitationConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Structure source and discretisation.
#[derive(Debug, Deserialize)]
pub struct StructureConfig {
    /// Path to the atomic coordinate file (.xyz).
    pub file: String,
    /// Material identifier (e.g. "Ag_JC").
    #[serde(default = "default_material")]
    pub material: String,
    /// Lattice step size in nm.
    #[serde(default = "default_step_size")]
    pub step_size: f64,
    /// Translate the structure so its centre of mass sits at the origin.
    #[serde(default = "default_true")]
    pub recentre: bool,
}

fn default_material() -> String {
    "Ag_JC".into()
}
fn default_step_size() -> f64 {
    2.88
}

/// Incident-field configuration.
#[derive(Debug, Deserialize)]
pub struct ExcitationConfig {
    /// Wavelength in nm.
    pub wavelength: f64,
    /// Polarization mode: "linear" or "circular".
    #[serde(default)]
    pub polarization: Polarization,
    /// Refractive index of the surrounding medium.
    #[serde(default = "default_environment_n")]
    pub environment_n: f64,
}

fn default_environment_n() -> f64 {
    1.0
}

/// Probe-grid configuration.
#[derive(Debug, Deserialize)]
pub struct ProbeConfig {
    /// Scales the structure's lateral extent to the grid half-span.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Grid points per axis.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            resolution: default_resolution(),
        }
    }
}

fn default_padding() -> f64 {
    2.0
}
fn default_resolution() -> usize {
    101
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Path of the rendered enhancement map.
    #[serde(default = "default_image")]
    pub image: String,
    /// Optional CSV dump of the sampled fields.
    #[serde(default)]
    pub samples_csv: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            samples_csv: None,
        }
    }
}

fn default_image() -> String {
    "enhancement.png".into()
}

fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: JobConfig = toml::from_str(
            r#"
            [structure]
            file = "cluster.xyz"

            [excitation]
            wavelength = 520.0
            "#,
        )
        .unwrap();

        assert_eq!(config.structure.material, "Ag_JC");
        assert_eq!(config.structure.step_size, 2.88);
        assert!(config.structure.recentre);
        assert_eq!(config.excitation.polarization, Polarization::Linear);
        assert_eq!(config.excitation.environment_n, 1.0);
        assert_eq!(config.probe.padding, 2.0);
        assert_eq!(config.probe.resolution, 101);
        assert_eq!(config.output.image, "enhancement.png");
        assert!(config.output.samples_csv.is_none());
    }

    #[test]
    fn polarization_parses_lowercase_names() {
        let config: JobConfig = toml::from_str(
            r#"
            [structure]
            file = "cluster.xyz"

            [excitation]
            wavelength = 520.0
            polarization = "circular"
            "#,
        )
        .unwrap();
        assert_eq!(config.excitation.polarization, Polarization::Circular);
    }

    #[test]
    fn unknown_polarization_is_rejected() {
        let result: Result<JobConfig, _> = toml::from_str(
            r#"
            [structure]
            file = "cluster.xyz"

            [excitation]
            wavelength = 520.0
            polarization = "elliptical"
            "#,
        );
        assert!(result.is_err());
    }
}
