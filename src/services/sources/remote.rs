use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    services::{model::SimilarityModel, sources::ModelSource},
};

/// Downloads a compressed model once at startup
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http_client: HttpClient,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ModelSource for RemoteSource {
    async fn load(&self) -> AppResult<SimilarityModel> {
        tracing::info!(url = %self.url, "Downloading similarity model");

        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(url = %self.url, status = %status, "Model download failed");
            return Err(AppError::ExternalApi(format!(
                "Model download from {} returned {}",
                self.url, status
            )));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "Model downloaded");

        tokio::task::spawn_blocking(move || SimilarityModel::from_bytes(&bytes))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
