//! Probe-grid construction above a structure.
//!
//! The near-field is sampled on a horizontal plane floating above the
//! structure: the span is the structure's lateral extent scaled by a padding
//! factor, and the height sits exactly two step sizes above the topmost
//! cell, so the sampled field is the near-field radiating into free space
//! rather than the field inside the material.

use serde::Serialize;

use halo_geometry::Structure;

use crate::types::ConfigError;

/// An ordered 2D lattice of sample positions at a fixed height.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeGrid {
    positions: Vec<[f64; 3]>,
    nx: usize,
    ny: usize,
    /// [x_min, x_max, y_min, y_max] in nm.
    extent: [f64; 4],
    height: f64,
}

impl ProbeGrid {
    /// Lay a probe plane above a structure.
    ///
    /// The horizontal half-span per axis is `padding × max(|coordinate|)`
    /// over the structure's cells, with a floor of one step size so flat or
    /// linear structures still get a finite window. The plane height is
    /// `max(z) + 2 × step_size`. `resolution` is the point count per axis.
    pub fn above(
        structure: &Structure,
        padding: f64,
        resolution: usize,
    ) -> Result<Self, ConfigError> {
        if !padding.is_finite() || padding <= 0.0 {
            return Err(ConfigError::InvalidPadding(padding));
        }
        if resolution < 2 {
            return Err(ConfigError::InvalidResolution(resolution));
        }

        let step = structure.step_size();
        let (max_x, max_y) = structure.max_abs_xy();
        let half_x = (padding * max_x).max(step);
        let half_y = (padding * max_y).max(step);
        let height = structure.max_z() + 2.0 * step;

        let dx = 2.0 * half_x / (resolution - 1) as f64;
        let dy = 2.0 * half_y / (resolution - 1) as f64;

        let mut positions = Vec::with_capacity(resolution * resolution);
        for iy in 0..resolution {
            let y = -half_y + iy as f64 * dy;
            for ix in 0..resolution {
                let x = -half_x + ix as f64 * dx;
                positions.push([x, y, height]);
            }
        }

        Ok(Self {
            positions,
            nx: resolution,
            ny: resolution,
            extent: [-half_x, half_x, -half_y, half_y],
            height,
        })
    }

    /// Sample positions in row-major order (x fastest).
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// [x_min, x_max, y_min, y_max] in nm.
    pub fn extent(&self) -> [f64; 4] {
        self.extent
    }

    /// Plane height above the xy-plane (nm).
    pub fn height(&self) -> f64 {
        self.height
    }
}
