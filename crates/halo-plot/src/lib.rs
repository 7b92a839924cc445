//! # Halo Plot
//!
//! Renders the sampled near-field as a colour-mapped enhancement map: a
//! viridis heatmap of |E/E₀|² over the probe plane, the structure footprint
//! overlaid semi-transparently, a gradient legend, and axis labels in
//! nanometres. Output is a PNG sized for publication-style figures.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use thiserror::Error;

use halo_core::types::FieldSamples;
use halo_geometry::Structure;

const CANVAS: (u32, u32) = (1080, 860);
const LEGEND_WIDTH: u32 = 180;

/// Errors from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no field samples to render")]
    EmptySamples,

    #[error("drawing error: {0}")]
    Backend(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the total-field enhancement map to an image file.
///
/// The image format follows the path's extension (plotters' bitmap backend,
/// typically `.png`). Parent directories are created as needed.
pub fn render_enhancement(
    samples: &FieldSamples,
    structure: &Structure,
    path: &Path,
) -> Result<(), RenderError> {
    if samples.is_empty() {
        return Err(RenderError::EmptySamples);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let enhancement = samples.enhancement();
    let vmax = enhancement.iter().cloned().fold(0.0_f64, f64::max).max(1e-12);

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(to_backend)?;
    let (map_area, legend_area) = root.split_horizontally(CANVAS.0 - LEGEND_WIDTH);

    draw_map(&map_area, samples, &enhancement, vmax, structure)?;
    draw_legend(&legend_area, vmax)?;

    root.present().map_err(to_backend)?;
    log::info!("wrote enhancement map to {}", path.display());
    Ok(())
}

fn draw_map<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    samples: &FieldSamples,
    enhancement: &[f64],
    vmax: f64,
    structure: &Structure,
) -> Result<(), RenderError> {
    let [x_min, x_max, y_min, y_max] = samples.extent;
    let title = format!("Field enhancement at {:.0} nm", samples.wavelength_nm);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(58)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(to_backend)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (nm)")
        .y_desc("y (nm)")
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(to_backend)?;

    // Heatmap: one filled cell per probe point.
    let dx = if samples.nx > 1 {
        (x_max - x_min) / (samples.nx - 1) as f64
    } else {
        x_max - x_min
    };
    let dy = if samples.ny > 1 {
        (y_max - y_min) / (samples.ny - 1) as f64
    } else {
        y_max - y_min
    };
    chart
        .draw_series(samples.positions.iter().zip(enhancement.iter()).map(
            |(pos, &value)| {
                let colour = ViridisRGB.get_color_normalized(value, 0.0, vmax);
                Rectangle::new(
                    [
                        (pos[0] - dx / 2.0, pos[1] - dy / 2.0),
                        (pos[0] + dx / 2.0, pos[1] + dy / 2.0),
                    ],
                    colour.filled(),
                )
            },
        ))
        .map_err(to_backend)?;

    // Structure footprint, semi-transparent above the heatmap.
    chart
        .draw_series(
            structure
                .positions()
                .iter()
                .map(|p| Circle::new((p[0], p[1]), 3, WHITE.mix(0.35).filled())),
        )
        .map_err(to_backend)?;

    Ok(())
}

/// Vertical gradient strip standing in for a colorbar, labelled with the
/// relative-intensity scale.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    vmax: f64,
) -> Result<(), RenderError> {
    let mut chart = ChartBuilder::on(area)
        .caption("|E/E0|^2", ("sans-serif", 22))
        .margin(12)
        .margin_right(24)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0_f64..1.0_f64, 0.0_f64..vmax)
        .map_err(to_backend)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(to_backend)?;

    const STEPS: usize = 128;
    chart
        .draw_series((0..STEPS).map(|i| {
            let lo = vmax * i as f64 / STEPS as f64;
            let hi = vmax * (i + 1) as f64 / STEPS as f64;
            let colour = ViridisRGB.get_color_normalized(lo, 0.0, vmax);
            Rectangle::new([(0.0, lo), (1.0, hi)], colour.filled())
        }))
        .map_err(to_backend)?;

    Ok(())
}

fn to_backend<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}
