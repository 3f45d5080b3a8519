use ndarray::{Array2, ArrayView1, Axis};

/// Row-oriented sparse matrix
///
/// Each row holds `(column, value)` pairs sorted by column with no
/// duplicates and no explicit zeros.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    n_cols: usize,
}

impl SparseMatrix {
    /// Builds a matrix from already sorted rows
    pub fn from_rows(rows: Vec<Vec<(usize, f64)>>, n_cols: usize) -> Self {
        debug_assert!(rows
            .iter()
            .all(|r| r.windows(2).all(|w| w[0].0 < w[1].0) && r.iter().all(|&(c, _)| c < n_cols)));
        Self { rows, n_cols }
    }

    pub fn from_dense(dense: &Array2<f64>) -> Self {
        let rows = dense
            .axis_iter(Axis(0))
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &v)| v != 0.0)
                    .map(|(c, &v)| (c, v))
                    .collect()
            })
            .collect();
        Self {
            rows,
            n_cols: dense.ncols(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_cols));
        for (i, row) in self.rows.iter().enumerate() {
            for &(c, v) in row {
                dense[[i, c]] = v;
            }
        }
        dense
    }

    /// Places `other`'s columns to the right of this matrix's columns
    ///
    /// Both matrices must have the same number of rows.
    pub fn hstack(&self, other: &SparseMatrix) -> SparseMatrix {
        assert_eq!(self.n_rows(), other.n_rows(), "row counts must match");
        let offset = self.n_cols;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(left, right)| {
                left.iter()
                    .copied()
                    .chain(right.iter().map(|&(c, v)| (c + offset, v)))
                    .collect()
            })
            .collect();
        SparseMatrix {
            rows,
            n_cols: self.n_cols + other.n_cols,
        }
    }

    /// Computes `self · x` for a dense `x` with `n_cols` rows
    pub fn dot_dense(&self, x: &Array2<f64>) -> Array2<f64> {
        assert_eq!(x.nrows(), self.n_cols, "inner dimensions must match");
        let mut out = Array2::zeros((self.n_rows(), x.ncols()));
        for (i, row) in self.rows.iter().enumerate() {
            let mut target = out.row_mut(i);
            for &(c, v) in row {
                target.scaled_add(v, &x.row(c));
            }
        }
        out
    }

    /// Computes `selfᵀ · y` for a dense `y` with `n_rows` rows
    pub fn t_dot_dense(&self, y: &Array2<f64>) -> Array2<f64> {
        assert_eq!(y.nrows(), self.n_rows(), "inner dimensions must match");
        let mut out = Array2::zeros((self.n_cols, y.ncols()));
        for (i, row) in self.rows.iter().enumerate() {
            let source = y.row(i);
            for &(c, v) in row {
                out.row_mut(c).scaled_add(v, &source);
            }
        }
        out
    }
}

/// A set of equally sized vectors addressed by row index
pub trait RowVectors {
    fn n_rows(&self) -> usize;

    fn row_dot(&self, i: usize, j: usize) -> f64;

    fn row_norm(&self, i: usize) -> f64 {
        self.row_dot(i, i).sqrt()
    }
}

impl RowVectors for SparseMatrix {
    fn n_rows(&self) -> usize {
        self.rows.len()
    }

    fn row_dot(&self, i: usize, j: usize) -> f64 {
        sparse_dot(&self.rows[i], &self.rows[j])
    }
}

impl RowVectors for Array2<f64> {
    fn n_rows(&self) -> usize {
        self.nrows()
    }

    fn row_dot(&self, i: usize, j: usize) -> f64 {
        dense_dot(self.row(i), self.row(j))
    }
}

fn dense_dot(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.dot(&b)
}

/// Merge-join dot product of two column-sorted sparse rows
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut x, mut y) = (0, 0);
    let mut sum = 0.0;
    while x < a.len() && y < b.len() {
        match a[x].0.cmp(&b[y].0) {
            std::cmp::Ordering::Less => x += 1,
            std::cmp::Ordering::Greater => y += 1,
            std::cmp::Ordering::Equal => {
                sum += a[x].1 * b[y].1;
                x += 1;
                y += 1;
            }
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> SparseMatrix {
        SparseMatrix::from_rows(
            vec![vec![(0, 1.0), (2, 2.0)], vec![], vec![(1, 3.0), (2, 1.0)]],
            3,
        )
    }

    #[test]
    fn test_dense_round_trip() {
        let dense = array![[1.0, 0.0, 2.0], [0.0, 0.0, 0.0], [0.0, 3.0, 1.0]];
        assert_eq!(sample().to_dense(), dense);
        assert_eq!(SparseMatrix::from_dense(&dense), sample());
        assert_eq!(sample().nnz(), 4);
    }

    #[test]
    fn test_sparse_dot_matches_dense() {
        let sparse = sample();
        let dense = sparse.to_dense();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(sparse.row_dot(i, j), dense.row_dot(i, j));
            }
        }
        assert_eq!(sparse.row_norm(0), 5f64.sqrt());
        assert_eq!(sparse.row_norm(1), 0.0);
    }

    #[test]
    fn test_products_match_ndarray() {
        let sparse = sample();
        let dense = sparse.to_dense();
        let x = array![[1.0, 2.0], [0.5, -1.0], [3.0, 0.0]];
        let y = array![[1.0], [2.0], [-1.0]];

        assert_eq!(sparse.dot_dense(&x), dense.dot(&x));
        assert_eq!(sparse.t_dot_dense(&y), dense.t().dot(&y));
    }

    #[test]
    fn test_hstack_offsets_columns() {
        let right = SparseMatrix::from_rows(vec![vec![(0, 9.0)], vec![(1, 8.0)], vec![]], 2);
        let stacked = sample().hstack(&right);

        assert_eq!(stacked.n_cols(), 5);
        assert_eq!(stacked.row(0), &[(0, 1.0), (2, 2.0), (3, 9.0)]);
        assert_eq!(stacked.row(1), &[(4, 8.0)]);
    }
}
