use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::{sources, Catalog, Recommender, RecommenderSettings},
    templates::Templates,
};

/// Maximum `n` accepted by the recommendations endpoint
pub const MAX_RECOMMENDATIONS: usize = 50;

/// Shared application state
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub templates: Arc<Templates>,
    pub recommendation_count: usize,
    pub static_dir: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        recommender: Recommender,
        templates: Templates,
        recommendation_count: usize,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            recommender: Arc::new(recommender),
            templates: Arc::new(templates),
            recommendation_count,
            static_dir: static_dir.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Loads the catalog and similarity model described by `config`
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let movies_path = PathBuf::from(&config.movies_path);
        let catalog = tokio::task::spawn_blocking(move || Catalog::load(movies_path))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;

        let source = sources::from_config(config)?;
        let model = sources::load_model(source.as_ref()).await?;

        let settings = RecommenderSettings {
            score_cutoff: config.match_score_cutoff,
            ..Default::default()
        };

        Ok(Self::new(
            Recommender::new(catalog, model, settings),
            Templates::new()?,
            config.recommendation_count,
            &config.static_dir,
        ))
    }
}
