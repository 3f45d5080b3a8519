use ndarray::Array2;

use super::matrix::RowVectors;

/// All-pairs cosine similarity between items
///
/// Square and symmetric. A zero vector has similarity 0 with everything,
/// itself included.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Array2<f32>,
}

impl SimilarityMatrix {
    /// Dense O(n²·d) cosine over every pair of rows
    pub fn compute<R: RowVectors + ?Sized>(rows: &R) -> Self {
        let n = rows.n_rows();
        let norms: Vec<f64> = (0..n).map(|i| rows.row_norm(i)).collect();

        let mut values = Array2::<f32>::zeros((n, n));
        for i in 0..n {
            if norms[i] == 0.0 {
                continue;
            }
            values[[i, i]] = 1.0;
            for j in i + 1..n {
                if norms[j] == 0.0 {
                    continue;
                }
                let cosine = (rows.row_dot(i, j) / (norms[i] * norms[j])).clamp(-1.0, 1.0) as f32;
                values[[i, j]] = cosine;
                values[[j, i]] = cosine;
            }
        }

        tracing::debug!(items = n, "Cosine similarity computed");
        Self { values }
    }

    /// Wraps an already computed square matrix
    pub(crate) fn from_values(values: Array2<f32>) -> Self {
        debug_assert_eq!(values.nrows(), values.ncols());
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[[i, j]]
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// The `n` items closest to `item`, best first, excluding `item` itself
    ///
    /// Ties keep index order.
    pub fn most_similar(&self, item: usize, n: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .values
            .row(item)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, _)| j != item)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(n);
        scored
    }
}
