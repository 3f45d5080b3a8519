//! Truncated singular value decomposition
//!
//! Randomized range finder with power iterations (Halko, Martinsson & Tropp).
//! The sparse products stay in `ndarray`; the thin QR steps and the small
//! projected eigenproblem go through `nalgebra`.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::matrix::SparseMatrix;
use crate::error::{PipelineError, PipelineResult};

const DEFAULT_OVERSAMPLES: usize = 10;
const DEFAULT_POWER_ITERATIONS: usize = 7;

/// Projects rows onto the top `k` singular directions
#[derive(Debug, Clone)]
pub struct TruncatedSvd {
    n_components: usize,
    n_oversamples: usize,
    n_iter: usize,
    seed: u64,
    singular_values: Option<Array1<f64>>,
}

impl TruncatedSvd {
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            n_oversamples: DEFAULT_OVERSAMPLES,
            n_iter: DEFAULT_POWER_ITERATIONS,
            seed: crate::config::DEFAULT_SEED,
            singular_values: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Singular values of the kept components, largest first
    pub fn singular_values(&self) -> Option<&Array1<f64>> {
        self.singular_values.as_ref()
    }

    /// Returns `U_k · Σ_k`, one row per input row and `k` columns
    ///
    /// Requires `1 <= k < min(rows, cols)`. Each component's sign is chosen
    /// so that its largest-magnitude entry is positive.
    pub fn fit_transform(&mut self, matrix: &SparseMatrix) -> PipelineResult<Array2<f64>> {
        let (m, n) = (matrix.n_rows(), matrix.n_cols());
        let k = self.n_components;
        let limit = m.min(n);
        if k == 0 || k >= limit {
            return Err(PipelineError::InvalidRank { k, limit });
        }

        let width = (k + self.n_oversamples).min(limit);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let omega = Array2::from_shape_fn((n, width), |_| rng.random_range(-1.0..1.0));

        let mut q = orthonormalize(&matrix.dot_dense(&omega));
        for _ in 0..self.n_iter {
            let z = orthonormalize(&matrix.t_dot_dense(&q));
            q = orthonormalize(&matrix.dot_dense(&z));
        }

        // Bᵀ = Aᵀ Q, so B Bᵀ is the small Gram matrix of the projected rows
        let bt = to_nalgebra(&matrix.t_dot_dense(&q));
        let (eigenvalues, eigenvectors) = descending_eigen(bt.transpose() * &bt);

        let mut reduced = Array2::zeros((m, k));
        let mut singular_values = Array1::zeros(k);
        for c in 0..k {
            let sigma = eigenvalues[c].max(0.0).sqrt();
            let mut u = q.dot(&eigenvectors.column(c));
            flip_sign(&mut u);
            reduced.column_mut(c).assign(&(u * sigma));
            singular_values[c] = sigma;
        }

        tracing::debug!(
            rows = m,
            cols = n,
            k,
            top_singular_value = singular_values[0],
            "Truncated SVD fitted"
        );
        self.singular_values = Some(singular_values);
        Ok(reduced)
    }
}

fn to_nalgebra(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn from_nalgebra(a: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.nrows(), a.ncols()), |(i, j)| a[(i, j)])
}

/// Orthonormal basis of the column space, from a thin QR factorization
///
/// `a` must have at least as many rows as columns.
fn orthonormalize(a: &Array2<f64>) -> Array2<f64> {
    from_nalgebra(&to_nalgebra(a).qr().q())
}

/// Eigenpairs of a symmetric matrix, eigenvalues in descending order
fn descending_eigen(gram: DMatrix<f64>) -> (Vec<f64>, Array2<f64>) {
    let eigen = SymmetricEigen::new(gram);
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&i, &j| eigen.eigenvalues[j].total_cmp(&eigen.eigenvalues[i]));

    let eigenvalues = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
    let eigenvectors = from_nalgebra(&eigen.eigenvectors).select(Axis(1), &order);
    (eigenvalues, eigenvectors)
}

fn flip_sign(u: &mut Array1<f64>) {
    let pivot = u
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        u.mapv_inplace(|x| -x);
    }
}
