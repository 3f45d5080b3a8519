use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};

/// Query service configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the processed movies dataset (JSON array)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> String {
    "data/movies_processed.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub const DEFAULT_GENRE_REPEAT: usize = 2;
pub const MAX_GENRE_REPEAT: usize = 10;
pub const DEFAULT_N_COMPONENTS: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Which matrix the similarity engine runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SimilaritySource {
    /// Cosine over the TF-IDF rows
    #[default]
    Raw,
    /// Cosine over the SVD projection
    Reduced,
}

impl SimilaritySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilaritySource::Raw => "raw",
            SimilaritySource::Reduced => "reduced",
        }
    }
}

/// Tuning knobs for the similarity pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// How many times the genre block is repeated in the combined text
    pub genre_repeat: usize,
    /// Rank of the truncated SVD
    pub n_components: usize,
    pub similarity_source: SimilaritySource,
    /// Seed for the randomized range finder
    pub seed: u64,
    /// Weight of the genre/cast indicator blocks appended to the similarity
    /// input; 0 leaves them out
    pub categorical_weight: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            genre_repeat: DEFAULT_GENRE_REPEAT,
            n_components: DEFAULT_N_COMPONENTS,
            similarity_source: SimilaritySource::default(),
            seed: DEFAULT_SEED,
            categorical_weight: 0.0,
        }
    }
}

impl PipelineConfig {
    /// Checks the data-independent constraints
    ///
    /// The upper bound on `n_components` depends on the corpus and is checked
    /// by the reducer itself.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.genre_repeat == 0 || self.genre_repeat > MAX_GENRE_REPEAT {
            return Err(PipelineError::InvalidConfig(format!(
                "genre_repeat must be between 1 and {}, got {}",
                MAX_GENRE_REPEAT, self.genre_repeat
            )));
        }

        if self.n_components == 0 {
            return Err(PipelineError::InvalidRank {
                k: 0,
                limit: usize::MAX,
            });
        }

        if !self.categorical_weight.is_finite() || self.categorical_weight < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "categorical_weight must be a non-negative finite number, got {}",
                self.categorical_weight
            )));
        }

        Ok(())
    }

    pub fn blends_categories(&self) -> bool {
        self.categorical_weight > 0.0
    }
}
