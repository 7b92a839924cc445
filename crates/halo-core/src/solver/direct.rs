//! Direct linear solve for the coupled-cell system.
//!
//! Uses LU decomposition with partial pivoting via `faer` to solve the
//! $3N \times 3N$ system $\mathbf{A}\mathbf{p} = \mathbf{E}_{\text{inc}}$
//! exactly. The driver runs a single solve per invocation, so the direct
//! path is always taken.

use faer::linalg::solvers::SpSolver;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use super::SolveError;

/// Solve the interaction system by LU decomposition.
///
/// # Arguments
/// * `matrix` - The $3N \times 3N$ interaction matrix $\mathbf{A}$.
/// * `rhs` - The incident field vector (length $3N$).
///
/// # Returns
/// The flattened cell-polarization vector $\mathbf{p}$ (length $3N$).
pub fn solve_lu(
    matrix: &Array2<Complex64>,
    rhs: &Array1<Complex64>,
) -> Result<Array1<Complex64>, SolveError> {
    let dim = matrix.nrows();
    assert_eq!(dim, matrix.ncols(), "matrix must be square");
    assert_eq!(dim, rhs.len(), "rhs length must match matrix dimension");

    let faer_mat = faer::Mat::<faer::complex_native::c64>::from_fn(dim, dim, |i, j| {
        let c = matrix[[i, j]];
        faer::complex_native::c64::new(c.re, c.im)
    });
    let faer_rhs = faer::Col::<faer::complex_native::c64>::from_fn(dim, |i| {
        let c = rhs[i];
        faer::complex_native::c64::new(c.re, c.im)
    });

    let lu = faer_mat.partial_piv_lu();
    let faer_sol = lu.solve(&faer_rhs);

    let solution = Array1::from_vec(
        (0..dim)
            .map(|i| {
                let c = faer_sol[i];
                Complex64::new(c.re, c.im)
            })
            .collect(),
    );

    // A singular interaction matrix surfaces as non-finite entries rather
    // than an Err from the factorisation.
    if solution.iter().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
        return Err(SolveError::LinAlg(
            "LU solve produced non-finite polarizations (singular interaction matrix?)".into(),
        ));
    }

    Ok(solution)
}
