use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cinefilo::{
    config::{
        PipelineConfig, SimilaritySource, DEFAULT_GENRE_REPEAT, DEFAULT_N_COMPONENTS, DEFAULT_SEED,
    },
    pipeline::{self, Corpus},
};

#[derive(Parser)]
#[clap(
    name = "build-similarity",
    about = "Build the item-item similarity matrix for a movie corpus"
)]
struct Args {
    /// Corpus file (JSON array of movie records)
    #[clap(long, env = "CORPUS_PATH", default_value = "data/movies_processed.json")]
    corpus: PathBuf,

    /// Where to write the similarity artifact
    #[clap(long, env = "OUTPUT_PATH", default_value = "data/similarity.bin")]
    output: PathBuf,

    /// Times the genre block is repeated in the combined text
    #[clap(long, env = "GENRE_REPEAT", default_value_t = DEFAULT_GENRE_REPEAT)]
    genre_repeat: usize,

    /// Rank of the truncated SVD
    #[clap(long, env = "N_COMPONENTS", default_value_t = DEFAULT_N_COMPONENTS)]
    n_components: usize,

    /// Matrix the cosine similarity runs on
    #[clap(long, env = "SIMILARITY_SOURCE", value_enum, default_value = "raw")]
    similarity_source: SimilaritySource,

    #[clap(long, env = "SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Weight of the genre and cast blocks in the similarity input (0 disables)
    #[clap(long, env = "CATEGORICAL_WEIGHT", default_value_t = 0.0)]
    categorical_weight: f64,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            genre_repeat: self.genre_repeat,
            n_components: self.n_components,
            similarity_source: self.similarity_source,
            seed: self.seed,
            categorical_weight: self.categorical_weight,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.pipeline_config();

    let corpus = Corpus::from_path(&args.corpus)
        .with_context(|| format!("Failed to load corpus from {}", args.corpus.display()))?;
    if corpus.is_empty() {
        tracing::warn!("Corpus is empty, the artifact will hold an empty matrix");
    }
    let output = pipeline::run(&corpus, &config).context("Similarity pipeline failed")?;

    let top = output.singular_values.first().copied().unwrap_or_default();
    tracing::info!(
        vocabulary = output.vocabulary.len(),
        genres = output.genres.n_cols(),
        actors = output.cast.n_cols(),
        top_singular_value = top,
        "Pipeline outputs ready"
    );

    let artifact = output
        .into_artifact(&corpus)
        .context("Similarity matrix does not match the corpus")?;
    artifact
        .write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    tracing::info!(
        path = %args.output.display(),
        items = artifact.item_count(),
        corpus = %artifact.corpus_hash_hex(),
        "Similarity artifact written"
    );

    Ok(())
}
