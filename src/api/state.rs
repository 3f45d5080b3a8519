use std::sync::Arc;

use crate::dataset::Dataset;

/// Shared application state
///
/// The dataset is loaded once at startup and never mutated, so handlers read
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}
