//! Similarity model sources
//!
//! The model is computed from the processed catalog at startup, read from a
//! local compressed file, or downloaded from a remote URL. Each yields the
//! same [`SimilarityModel`].
use serde::Deserialize;

use crate::{config::Config, error::AppResult, services::model::SimilarityModel};

pub mod compute;
pub mod local;
pub mod remote;

pub use compute::ComputeSource;
pub use local::LocalFileSource;
pub use remote::RemoteSource;

/// Configured model source (`MODEL_SOURCE`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSourceKind {
    #[default]
    Compute,
    Local,
    Remote,
}

/// Trait for similarity model sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelSource: Send + Sync {
    /// Produce a validated model
    async fn load(&self) -> AppResult<SimilarityModel>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Builds the source selected by configuration
pub fn from_config(config: &Config) -> AppResult<Box<dyn ModelSource>> {
    let source: Box<dyn ModelSource> = match config.model_source {
        ModelSourceKind::Compute => Box::new(ComputeSource::new(
            &config.processed_movies_path,
            config.max_features,
        )),
        ModelSourceKind::Local => Box::new(LocalFileSource::new(&config.model_path)),
        ModelSourceKind::Remote => {
            let url = config.model_url.clone().ok_or_else(|| {
                crate::error::AppError::InvalidInput(
                    "MODEL_URL is required for the remote model source".to_string(),
                )
            })?;
            Box::new(RemoteSource::new(url))
        }
    };

    Ok(source)
}

/// Loads the model and logs where it came from
pub async fn load_model(source: &dyn ModelSource) -> AppResult<SimilarityModel> {
    let started = std::time::Instant::now();
    let model = source.load().await?;

    tracing::info!(
        source = source.name(),
        rows = model.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded similarity model"
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        Config::from_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_config_selects_source() {
        let cases = [
            ("compute", "compute"),
            ("local", "local"),
            ("remote", "remote"),
        ];

        for (kind, expected) in cases {
            let config = config_with(&[
                ("MODEL_SOURCE", kind),
                ("MODEL_URL", "http://127.0.0.1:9/model.bin.zst"),
            ]);
            let source = from_config(&config).unwrap();
            assert_eq!(source.name(), expected);
        }
    }

    #[tokio::test]
    async fn test_load_model_propagates_errors() {
        let mut source = MockModelSource::new();
        source
            .expect_load()
            .returning(|| Err(AppError::Model("corrupt".to_string())));
        source.expect_name().return_const("mock");

        let result = load_model(&source).await;
        assert!(matches!(result, Err(AppError::Model(_))));
    }

    #[tokio::test]
    async fn test_load_model_returns_model() {
        let mut source = MockModelSource::new();
        source.expect_load().returning(|| {
            SimilarityModel::new(vec![7], vec!["Heat".to_string()], vec![1.0])
        });
        source.expect_name().return_const("mock");

        let model = load_model(&source).await.unwrap();
        assert_eq!(model.movie_id(0), Some(7));
    }
}
