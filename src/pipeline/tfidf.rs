use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use super::matrix::SparseMatrix;
use super::stop_words::is_stop_word;

/// TF-IDF weights, one row per document and one column per vocabulary term
pub type TermWeightMatrix = SparseMatrix;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is valid"));

/// Lowercased word tokens of two or more characters, stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Smooth-IDF TF-IDF vectorizer
///
/// * `tf` is the raw term count in the document
/// * `idf = ln((1 + n_docs) / (1 + df)) + 1`
/// * every row is L2-normalized
///
/// The same weighting is used by `fit_transform` and by later `transform`
/// calls. Terms outside the fitted vocabulary are dropped.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learns the vocabulary and IDF weights
    ///
    /// An empty or all-stop-word corpus leaves the vocabulary empty.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> &mut Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let distinct: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in distinct {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        // BTreeMap iteration gives sorted column order
        self.terms = doc_freq.keys().cloned().collect();
        self.idf = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = self
            .terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = self.terms.len(),
            "TF-IDF vocabulary fitted"
        );
        self
    }

    /// Weights documents against the fitted vocabulary
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> TermWeightMatrix {
        let rows = documents
            .iter()
            .map(|doc| self.weigh(doc.as_ref()))
            .collect();
        SparseMatrix::from_rows(rows, self.terms.len())
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> TermWeightMatrix {
        self.fit(documents);
        self.transform(documents)
    }

    /// Term to column index
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Column labels in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    fn weigh(&self, document: &str) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&col) = self.vocabulary.get(&token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}
