//! Content-based similarity pipeline
//!
//! Feature combination → TF-IDF → multi-hot encoding → truncated SVD →
//! cosine similarity, executed as one synchronous batch over an in-memory
//! corpus.

use std::time::Instant;

use ndarray::Array2;

use crate::config::{PipelineConfig, SimilaritySource};
use crate::error::PipelineResult;

pub mod artifact;
pub mod corpus;
pub mod encoder;
pub mod features;
pub mod matrix;
pub mod similarity;
pub mod stop_words;
pub mod svd;
pub mod tfidf;

pub use artifact::SimilarityArtifact;
pub use corpus::Corpus;
pub use encoder::{IndicatorMatrix, MultiLabelBinarizer};
pub use features::combine_features;
pub use matrix::{RowVectors, SparseMatrix};
pub use similarity::SimilarityMatrix;
pub use svd::TruncatedSvd;
pub use tfidf::{TermWeightMatrix, TfidfVectorizer};

/// Everything derived from one corpus snapshot
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub combined_text: Vec<String>,
    pub term_weights: TermWeightMatrix,
    pub vocabulary: Vec<String>,
    pub genres: IndicatorMatrix,
    pub cast: IndicatorMatrix,
    pub reduced: Array2<f64>,
    pub singular_values: Vec<f64>,
    pub similarity: SimilarityMatrix,
    pub source: SimilaritySource,
}

impl PipelineOutput {
    /// Packages the similarity matrix for persistence
    pub fn into_artifact(self, corpus: &Corpus) -> PipelineResult<SimilarityArtifact> {
        SimilarityArtifact::new(corpus, self.source, self.similarity)
    }
}

/// Runs every stage over `corpus`
///
/// Configuration problems, including a reduction rank the corpus cannot
/// support, abort before the similarity stage. An empty vocabulary is not
/// one of them: the reduction is skipped, `reduced` has zero columns and
/// every similarity is 0.
pub fn run(corpus: &Corpus, config: &PipelineConfig) -> PipelineResult<PipelineOutput> {
    config.validate()?;
    let started = Instant::now();
    tracing::info!(
        items = corpus.len(),
        corpus = %corpus.hash_hex(),
        genre_repeat = config.genre_repeat,
        n_components = config.n_components,
        source = config.similarity_source.as_str(),
        "Starting similarity pipeline"
    );

    let combined_text = features::combine_all(corpus.items(), config.genre_repeat);

    let stage = Instant::now();
    let mut vectorizer = TfidfVectorizer::new();
    let term_weights = vectorizer.fit_transform(&combined_text);
    tracing::info!(
        vocabulary = term_weights.n_cols(),
        nnz = term_weights.nnz(),
        elapsed_ms = stage.elapsed().as_millis(),
        "TF-IDF matrix built"
    );

    let stage = Instant::now();
    let items = corpus.items();
    let genre_lists: Vec<&[String]> = items.iter().map(|m| m.genres.as_slice()).collect();
    let cast_lists: Vec<&[String]> = items.iter().map(|m| m.cast.as_slice()).collect();
    let genres = MultiLabelBinarizer::new().fit_transform(&genre_lists);
    let cast = MultiLabelBinarizer::new().fit_transform(&cast_lists);
    tracing::debug!(
        genre_columns = ?genres.labels("genre_"),
        "Genre indicator columns"
    );
    tracing::info!(
        genres = genres.n_cols(),
        actors = cast.n_cols(),
        elapsed_ms = stage.elapsed().as_millis(),
        "Categorical encodings built"
    );

    let stage = Instant::now();
    let (reduced, singular_values) = if term_weights.n_cols() == 0 {
        tracing::warn!("Empty vocabulary, skipping dimensionality reduction");
        (Array2::zeros((corpus.len(), 0)), Vec::new())
    } else {
        let mut svd = TruncatedSvd::new(config.n_components).with_seed(config.seed);
        let reduced = svd.fit_transform(&term_weights)?;
        let singular_values = svd
            .singular_values()
            .map(|s| s.to_vec())
            .unwrap_or_default();
        (reduced, singular_values)
    };
    tracing::info!(
        components = reduced.ncols(),
        elapsed_ms = stage.elapsed().as_millis(),
        "Dimensionality reduction done"
    );

    let stage = Instant::now();
    let similarity = if config.blends_categories() {
        let categories = genres
            .to_weighted(config.categorical_weight)
            .hstack(&cast.to_weighted(config.categorical_weight));
        let blended = match config.similarity_source {
            SimilaritySource::Raw => term_weights.hstack(&categories),
            SimilaritySource::Reduced => SparseMatrix::from_dense(&reduced).hstack(&categories),
        };
        SimilarityMatrix::compute(&blended)
    } else {
        match config.similarity_source {
            SimilaritySource::Raw => SimilarityMatrix::compute(&term_weights),
            SimilaritySource::Reduced => SimilarityMatrix::compute(&reduced),
        }
    };
    tracing::info!(
        items = similarity.len(),
        blended = config.blends_categories(),
        elapsed_ms = stage.elapsed().as_millis(),
        "Similarity matrix computed"
    );

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis(),
        "Similarity pipeline finished"
    );

    Ok(PipelineOutput {
        combined_text,
        vocabulary: vectorizer.terms().to_vec(),
        term_weights,
        genres,
        cast,
        reduced,
        singular_values,
        similarity,
        source: config.similarity_source,
    })
}
