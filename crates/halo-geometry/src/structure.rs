//! Discretised nanostructures.
//!
//! A [`Structure`] is an ordered set of cell positions on a cubic lattice of
//! the configured step size, all carrying the same material identifier. Atomic
//! coordinates from a file are snapped onto the lattice and deduplicated, so
//! several atoms falling into one cell produce a single dipole cell. The full
//! spatial footprint of the input is preserved — a loaded cluster is never
//! reduced to its centre of mass.

use std::collections::BTreeSet;
use std::path::Path;

use crate::parsers::{self, Atom, LoadError};

/// A discretised structure: lattice cell positions plus shared metadata.
///
/// Invariants: every cell sits on the same cubic lattice of spacing
/// `step_size`, and every cell shares the same material. The structure is
/// immutable after construction.
#[derive(Debug, Clone)]
pub struct Structure {
    positions: Vec<[f64; 3]>,
    step_size: f64,
    material: String,
}

impl Structure {
    /// Build a structure by snapping arbitrary points onto the step lattice.
    ///
    /// Points mapping to the same lattice cell are merged; the first
    /// occurrence fixes the cell's order.
    pub fn from_points(
        points: &[[f64; 3]],
        step_size: f64,
        material: impl Into<String>,
    ) -> Result<Self, LoadError> {
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(LoadError::InvalidStep(step_size));
        }
        if points.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = BTreeSet::new();
        let mut positions = Vec::with_capacity(points.len());
        for p in points {
            let cell = [
                (p[0] / step_size).round() as i64,
                (p[1] / step_size).round() as i64,
                (p[2] / step_size).round() as i64,
            ];
            if seen.insert(cell) {
                positions.push([
                    cell[0] as f64 * step_size,
                    cell[1] as f64 * step_size,
                    cell[2] as f64 * step_size,
                ]);
            }
        }

        Ok(Self {
            positions,
            step_size,
            material: material.into(),
        })
    }

    /// Load a structure from an atomic coordinate file.
    ///
    /// The format is chosen from the file extension. Coordinates are
    /// converted to nanometres before lattice snapping.
    pub fn from_file(
        path: &Path,
        step_size: f64,
        material: impl Into<String>,
    ) -> Result<Self, LoadError> {
        let atoms = parsers::read_coordinate_file(path)?;
        let points: Vec<[f64; 3]> = atoms.iter().map(|a: &Atom| a.position).collect();
        let structure = Self::from_points(&points, step_size, material)?;
        log::info!(
            "loaded {}: {} atoms -> {} cells (step {} nm)",
            path.display(),
            atoms.len(),
            structure.len(),
            step_size
        );
        Ok(structure)
    }

    /// Cell positions in nanometres, in construction order.
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lattice spacing in nanometres.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Material identifier applied to every cell.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Unweighted centre of mass of the cell positions.
    pub fn centre_of_mass(&self) -> [f64; 3] {
        let n = self.positions.len() as f64;
        let mut com = [0.0; 3];
        for p in &self.positions {
            for axis in 0..3 {
                com[axis] += p[axis];
            }
        }
        for c in &mut com {
            *c /= n;
        }
        com
    }

    /// A copy translated so the centre of mass sits at the origin.
    pub fn recentred(&self) -> Self {
        let com = self.centre_of_mass();
        let positions = self
            .positions
            .iter()
            .map(|p| [p[0] - com[0], p[1] - com[1], p[2] - com[2]])
            .collect();
        Self {
            positions,
            step_size: self.step_size,
            material: self.material.clone(),
        }
    }

    /// Largest |x| and |y| over all cells.
    pub fn max_abs_xy(&self) -> (f64, f64) {
        let mut mx = 0.0_f64;
        let mut my = 0.0_f64;
        for p in &self.positions {
            mx = mx.max(p[0].abs());
            my = my.max(p[1].abs());
        }
        (mx, my)
    }

    /// Largest z coordinate over all cells.
    pub fn max_z(&self) -> f64 {
        self.positions
            .iter()
            .map(|p| p[2])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounding_box(&self) -> ([f64; 3], [f64; 3]) {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_points_onto_lattice() {
        let points = [[0.1, 0.0, 0.0], [2.9, 0.1, -0.1], [6.1, 0.0, 0.0]];
        let s = Structure::from_points(&points, 3.0, "Ag_JC").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.positions()[1], [3.0, 0.0, 0.0]);
        assert_eq!(s.positions()[2], [6.0, 0.0, 0.0]);
    }

    #[test]
    fn merges_points_in_one_cell() {
        let points = [[0.0, 0.0, 0.0], [0.2, -0.2, 0.1], [0.1, 0.1, 0.1]];
        let s = Structure::from_points(&points, 2.0, "Ag_JC").unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn keeps_every_distinct_cell() {
        // Spatial resolution must survive loading: N well-separated points
        // stay N cells, never a single centroid.
        let points: Vec<[f64; 3]> = (0..20).map(|i| [i as f64 * 5.0, 0.0, 0.0]).collect();
        let s = Structure::from_points(&points, 2.5, "Ag_JC").unwrap();
        assert_eq!(s.len(), 20);
    }

    #[test]
    fn rejects_bad_step() {
        let points = [[0.0, 0.0, 0.0]];
        assert!(Structure::from_points(&points, 0.0, "Ag_JC").is_err());
        assert!(Structure::from_points(&points, -1.0, "Ag_JC").is_err());
        assert!(Structure::from_points(&points, f64::NAN, "Ag_JC").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            Structure::from_points(&[], 1.0, "Ag_JC"),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn extent_helpers() {
        let points = [[-6.0, 2.0, 0.0], [4.0, -8.0, 2.0], [0.0, 0.0, 6.0]];
        let s = Structure::from_points(&points, 2.0, "Ag_JC").unwrap();
        let (mx, my) = s.max_abs_xy();
        assert_eq!(mx, 6.0);
        assert_eq!(my, 8.0);
        assert_eq!(s.max_z(), 6.0);
        let (min, max) = s.bounding_box();
        assert_eq!(min, [-6.0, -8.0, 0.0]);
        assert_eq!(max, [4.0, 2.0, 6.0]);
    }

    #[test]
    fn recentred_moves_com_to_origin() {
        let points = [[0.0, 0.0, 0.0], [4.0, 4.0, 4.0]];
        let s = Structure::from_points(&points, 2.0, "Ag_JC").unwrap().recentred();
        let com = s.centre_of_mass();
        for c in com {
            assert!(c.abs() < 1e-12);
        }
    }
}
