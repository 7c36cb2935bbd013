use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    services::{model::SimilarityModel, sources::ModelSource},
};

/// Vectorizes the processed catalog in process
#[derive(Debug, Clone)]
pub struct ComputeSource {
    processed_csv: PathBuf,
    max_features: usize,
}

impl ComputeSource {
    pub fn new(processed_csv: impl Into<PathBuf>, max_features: usize) -> Self {
        Self {
            processed_csv: processed_csv.into(),
            max_features,
        }
    }
}

#[async_trait::async_trait]
impl ModelSource for ComputeSource {
    async fn load(&self) -> AppResult<SimilarityModel> {
        let path = self.processed_csv.clone();
        let max_features = self.max_features;

        tracing::info!(path = %path.display(), max_features, "Computing similarity model");

        tokio::task::spawn_blocking(move || SimilarityModel::from_processed_csv(path, max_features))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "compute"
    }
}
