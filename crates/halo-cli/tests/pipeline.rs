//! End-to-end pipeline test: synthetic structure file in, image file out.

use std::fs;

use halo_cli::config::JobConfig;
use halo_cli::runner;

/// Write a two-atom silver dimer as an XYZ file (coordinates in angstroms).
fn write_dimer_xyz(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("dimer.xyz");
    fs::write(&path, "2\nAg dimer\nAg 0.0 0.0 0.0\nAg 57.6 0.0 0.0\n").unwrap();
    path
}

fn job_toml(structure: &std::path::Path, image: &std::path::Path, resolution: usize) -> String {
    format!(
        r#"
        [structure]
        file = "{structure}"
        material = "Ag_JC"
        step_size = 2.88

        [excitation]
        wavelength = 520.0
        polarization = "circular"

        [probe]
        padding = 1.5
        resolution = {resolution}

        [output]
        image = "{image}"
        "#,
        structure = structure.display(),
        image = image.display(),
        resolution = resolution,
    )
}

#[test]
fn two_point_structure_produces_map_and_samples() {
    let dir = tempfile::tempdir().unwrap();
    let xyz = write_dimer_xyz(dir.path());
    let image = dir.path().join("enhancement.png");

    let job: JobConfig = toml::from_str(&job_toml(&xyz, &image, 21)).unwrap();
    let output = runner::run_job(&job).unwrap();

    // Sample arrays are shaped by the requested resolution.
    assert_eq!(output.samples.len(), 21 * 21);
    assert_eq!(output.samples.nx, 21);
    assert_eq!(output.samples.ny, 21);
    assert_eq!(output.samples.e_scattered.len(), 21 * 21);
    assert_eq!(output.samples.b_total.len(), 21 * 21);

    // The renderer wrote a non-empty image.
    let meta = fs::metadata(&image).unwrap();
    assert!(meta.len() > 0, "enhancement map is empty");
}

#[test]
fn resolution_controls_sample_count() {
    let dir = tempfile::tempdir().unwrap();
    let xyz = write_dimer_xyz(dir.path());
    let image = dir.path().join("map.png");

    let coarse: JobConfig = toml::from_str(&job_toml(&xyz, &image, 11)).unwrap();
    let fine: JobConfig = toml::from_str(&job_toml(&xyz, &image, 31)).unwrap();

    assert_eq!(runner::run_job(&coarse).unwrap().samples.len(), 121);
    assert_eq!(runner::run_job(&fine).unwrap().samples.len(), 961);
}

#[test]
fn loaded_structure_keeps_both_cells() {
    let dir = tempfile::tempdir().unwrap();
    let xyz = write_dimer_xyz(dir.path());
    let image = dir.path().join("map.png");

    let job: JobConfig = toml::from_str(&job_toml(&xyz, &image, 11)).unwrap();
    let structure = runner::load_structure(&job).unwrap();
    assert_eq!(structure.len(), 2, "dimer must not collapse to one point");
}

#[test]
fn missing_structure_file_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("map.png");
    let missing = dir.path().join("nowhere.xyz");

    let job: JobConfig = toml::from_str(&job_toml(&missing, &image, 11)).unwrap();
    let err = runner::run_job(&job).unwrap_err();
    assert!(err.to_string().contains("loading structure"));
}

#[test]
fn samples_csv_is_written_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let xyz = write_dimer_xyz(dir.path());
    let image = dir.path().join("map.png");
    let csv = dir.path().join("samples.csv");

    let mut toml_text = job_toml(&xyz, &image, 11);
    toml_text.push_str(&format!("samples_csv = \"{}\"\n", csv.display()));

    let job: JobConfig = toml::from_str(&toml_text).unwrap();
    runner::run_job(&job).unwrap();

    let content = fs::read_to_string(&csv).unwrap();
    assert!(content.contains("x_nm,y_nm,z_nm"));
    // Header lines plus one row per probe point.
    assert_eq!(content.lines().filter(|l| !l.starts_with('#')).count(), 1 + 121);
}
