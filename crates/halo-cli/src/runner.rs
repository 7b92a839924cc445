//! Pipeline runner: structure -> excitation -> solve -> sample -> render.
//!
//! Four strictly sequential stages; each stage's output is returned and
//! threaded explicitly into the next, so no stage depends on state another
//! stage left behind.

use std::path::Path;

use anyhow::{Context, Result};

use halo_core::dyads::QuasistaticDyads;
use halo_core::fields::nearfield;
use halo_core::probe::ProbeGrid;
use halo_core::solver::Simulation;
use halo_core::types::{FieldSamples, PlaneWave};
use halo_geometry::Structure;
use halo_materials::resolve_identifier;
use halo_plot::render_enhancement;

use crate::config::JobConfig;

/// Results of a mapping run.
#[derive(Debug)]
pub struct RunOutput {
    pub samples: FieldSamples,
    pub image_path: std::path::PathBuf,
}

/// Run the full pipeline from a parsed job configuration.
pub fn run_job(job: &JobConfig) -> Result<RunOutput> {
    // Stage 1: structure.
    let structure = load_structure(job)?;
    println!(
        "Structure: {} cells (step {} nm, material {})",
        structure.len(),
        structure.step_size(),
        structure.material()
    );

    // Stage 2: excitation + solve.
    let field = PlaneWave::with_polarization(
        job.excitation.wavelength,
        job.excitation.polarization,
    )
    .context("invalid excitation")?;
    let dyads = QuasistaticDyads::new(job.excitation.environment_n);
    let material = resolve_identifier(&job.structure.material)?;

    let sim = Simulation::new(structure, field, dyads, material.as_ref())
        .with_context(|| {
            format!(
                "configuring simulation at {} nm",
                job.excitation.wavelength
            )
        })?;
    let response = sim.scatter().with_context(|| {
        format!("scatter solve at {} nm", job.excitation.wavelength)
    })?;

    // Stage 3: probe grid + field sampling.
    let grid = ProbeGrid::above(sim.structure(), job.probe.padding, job.probe.resolution)
        .context("invalid probe configuration")?;
    println!(
        "Probe grid: {}x{} points at z = {:.2} nm",
        grid.nx(),
        grid.ny(),
        grid.height()
    );
    let samples = nearfield(&sim, &response, &grid);

    // Stage 4: render (and optional CSV dump).
    let image_path = std::path::PathBuf::from(&job.output.image);
    render_enhancement(&samples, sim.structure(), &image_path)?;
    println!("Enhancement map written to: {}", image_path.display());

    if let Some(csv) = &job.output.samples_csv {
        let csv_path = Path::new(csv);
        write_samples_csv(&samples, csv_path)?;
        println!("Field samples written to: {}", csv_path.display());
    }

    Ok(RunOutput {
        samples,
        image_path,
    })
}

/// Load and discretise the structure named by the job.
pub fn load_structure(job: &JobConfig) -> Result<Structure> {
    let path = Path::new(&job.structure.file);
    let structure = Structure::from_file(
        path,
        job.structure.step_size,
        job.structure.material.clone(),
    )
    .with_context(|| format!("loading structure from {}", path.display()))?;

    Ok(if job.structure.recentre {
        structure.recentred()
    } else {
        structure
    })
}

/// Write the sampled fields to a CSV file with a metadata header.
pub fn write_samples_csv(samples: &FieldSamples, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "# halo — near-field samples")?;
    writeln!(file, "# version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# wavelength_nm: {}", samples.wavelength_nm)?;
    writeln!(file, "# grid: {}x{}", samples.nx, samples.ny)?;
    writeln!(
        file,
        "# extent: x=[{:.2}, {:.2}] y=[{:.2}, {:.2}] nm",
        samples.extent[0], samples.extent[1], samples.extent[2], samples.extent[3]
    )?;
    writeln!(file, "#")?;
    writeln!(file, "x_nm,y_nm,z_nm,|Es|_sq,|Et|_sq,|Bs|_sq,|Bt|_sq")?;

    for (idx, pos) in samples.positions.iter().enumerate() {
        let sq = |v: &[num_complex::Complex64; 3]| {
            v[0].norm_sqr() + v[1].norm_sqr() + v[2].norm_sqr()
        };
        writeln!(
            file,
            "{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6e},{:.6e}",
            pos[0],
            pos[1],
            pos[2],
            sq(&samples.e_scattered[idx]),
            sq(&samples.e_total[idx]),
            sq(&samples.b_scattered[idx]),
            sq(&samples.b_total[idx]),
        )?;
    }

    Ok(())
}
