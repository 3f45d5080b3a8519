use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;

use super::matrix::SparseMatrix;

/// Multi-hot encoding of a set-valued column
///
/// Columns are the distinct values seen during fitting, sorted
/// lexicographically. Each row stores the sorted column indices set to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorMatrix {
    classes: Vec<String>,
    rows: Vec<Vec<usize>>,
}

impl IndicatorMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.classes.len()
    }

    /// Category values in column order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Column labels with a prefix, e.g. `genre_Action`
    pub fn labels(&self, prefix: &str) -> Vec<String> {
        self.classes
            .iter()
            .map(|c| format!("{prefix}{c}"))
            .collect()
    }

    /// Number of categories set for an item
    pub fn row_sum(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    pub fn to_dense(&self) -> Array2<u8> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_cols()));
        for (i, cols) in self.rows.iter().enumerate() {
            for &c in cols {
                dense[[i, c]] = 1;
            }
        }
        dense
    }

    /// Sparse real-valued copy with every non-empty row scaled to length `weight`
    pub fn to_weighted(&self, weight: f64) -> SparseMatrix {
        let rows = self
            .rows
            .iter()
            .map(|cols| {
                let value = weight / (cols.len() as f64).sqrt();
                cols.iter().map(|&c| (c, value)).collect()
            })
            .collect();
        SparseMatrix::from_rows(rows, self.n_cols())
    }
}

/// Fits the category vocabulary of a list-valued column and encodes it
#[derive(Debug, Clone, Default)]
pub struct MultiLabelBinarizer {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl MultiLabelBinarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit<L: AsRef<[String]>>(&mut self, lists: &[L]) -> &mut Self {
        let distinct: BTreeSet<&String> = lists.iter().flat_map(|l| l.as_ref()).collect();
        self.classes = distinct.into_iter().cloned().collect();
        self.index = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        self
    }

    /// Encodes lists against the fitted classes; unseen values are ignored
    pub fn transform<L: AsRef<[String]>>(&self, lists: &[L]) -> IndicatorMatrix {
        let rows = lists
            .iter()
            .map(|list| {
                let cols: BTreeSet<usize> = list
                    .as_ref()
                    .iter()
                    .filter_map(|value| self.index.get(value).copied())
                    .collect();
                cols.into_iter().collect()
            })
            .collect();

        IndicatorMatrix {
            classes: self.classes.clone(),
            rows,
        }
    }

    pub fn fit_transform<L: AsRef<[String]>>(&mut self, lists: &[L]) -> IndicatorMatrix {
        self.fit(lists);
        self.transform(lists)
    }
}
