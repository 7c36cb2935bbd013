use std::path::PathBuf;

use crate::{
    error::{AppError, AppResult},
    services::{model::SimilarityModel, sources::ModelSource},
};

/// Reads a compressed model written by `build-model`
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ModelSource for LocalFileSource {
    async fn load(&self) -> AppResult<SimilarityModel> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::Model(format!(
                "Failed to read model file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tokio::task::spawn_blocking(move || SimilarityModel::from_bytes(&bytes))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_saved_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.bin.zst");

        let model = SimilarityModel::new(
            vec![1, 2],
            vec!["Alien".to_string(), "Aliens".to_string()],
            vec![1.0, 0.5, 0.5, 1.0],
        )
        .unwrap();
        model.save(&path).unwrap();

        let loaded = LocalFileSource::new(&path).load().await.unwrap();
        assert_eq!(loaded, model);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = LocalFileSource::new("/nonexistent/similarity.bin.zst")
            .load()
            .await;
        assert!(matches!(result, Err(AppError::Model(_))));
    }
}
