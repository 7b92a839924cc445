//! Interaction matrix assembly for the coupled-cell solve.
//!
//! The self-consistent cell polarizations $\mathbf{p}$ satisfy
//! $\mathbf{A}\mathbf{p} = \mathbf{E}_{\text{inc}}$ where each 3×3 block of
//! the $3N \times 3N$ matrix $\mathbf{A}$ is:
//!
//! - Diagonal ($i = j$): $\alpha^{-1} \mathbf{I}$ (the structure is
//!   homogeneous and isotropic, so one scalar polarisability covers it).
//! - Off-diagonal ($i \neq j$): $-\mathbf{G}_E(\mathbf{r}_i, \mathbf{r}_j)$.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::dyads::QuasistaticDyads;
use crate::types::PlaneWave;

/// Assemble the full $3N \times 3N$ interaction matrix.
pub fn interaction_matrix(
    positions: &[[f64; 3]],
    alpha: Complex64,
    dyads: &QuasistaticDyads,
) -> Array2<Complex64> {
    let n = positions.len();
    let dim = 3 * n;
    let inv_alpha = Complex64::from(1.0) / alpha;
    let mut matrix = Array2::<Complex64>::zeros((dim, dim));

    for i in 0..n {
        for row in 0..3 {
            matrix[[3 * i + row, 3 * i + row]] = inv_alpha;
        }

        for j in 0..n {
            if i == j {
                continue;
            }
            let g = dyads.electric_tensor(&positions[i], &positions[j]);
            for row in 0..3 {
                for col in 0..3 {
                    matrix[[3 * i + row, 3 * j + col]] = -g[row][col];
                }
            }
        }
    }

    matrix
}

/// Build the right-hand side: the incident field at every cell, flattened.
pub fn incident_field_vector(
    positions: &[[f64; 3]],
    field: &PlaneWave,
    k: f64,
) -> Array1<Complex64> {
    let mut rhs = Array1::<Complex64>::zeros(3 * positions.len());
    for (i, pos) in positions.iter().enumerate() {
        let e = field.electric_field_at(pos, k);
        for c in 0..3 {
            rhs[3 * i + c] = e[c];
        }
    }
    rhs
}
