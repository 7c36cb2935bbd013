use serde::Deserialize;

use crate::services::sources::ModelSourceKind;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Raw movie catalog (metadata shown to the user)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Processed catalog with the `tags` column used to build the model
    #[serde(default = "default_processed_movies_path")]
    pub processed_movies_path: String,

    /// Where the similarity model comes from
    #[serde(default)]
    pub model_source: ModelSourceKind,

    /// Compressed model file, read by the `local` source and written by `build-model`
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Download location of the compressed model for the `remote` source
    pub model_url: Option<String>,

    /// Directory holding `js/` assets for the index page
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Minimum fuzzy ratio (0-100) for a title to count as a match
    #[serde(default = "default_match_score_cutoff")]
    pub match_score_cutoff: f64,

    /// Vocabulary size of the tag vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_movies_path() -> String {
    "data/raw/movies_data.csv".to_string()
}

fn default_processed_movies_path() -> String {
    "data/processed/processed_movies.csv".to_string()
}

fn default_model_path() -> String {
    "models/similarity.bin.zst".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_recommendation_count() -> usize {
    5
}

fn default_match_score_cutoff() -> f64 {
    70.0
}

fn default_max_features() -> usize {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.model_source == ModelSourceKind::Remote && config.model_url.is_none() {
            anyhow::bail!("MODEL_URL must be set when MODEL_SOURCE=remote");
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.model_source, ModelSourceKind::Compute);
        assert_eq!(config.recommendation_count, 5);
        assert_eq!(config.match_score_cutoff, 70.0);
        assert_eq!(config.max_features, 5000);
        assert!(config.model_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("PORT", "8080"),
            ("MODEL_SOURCE", "local"),
            ("MODEL_PATH", "/tmp/model.bin.zst"),
            ("RECOMMENDATION_COUNT", "10"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.model_source, ModelSourceKind::Local);
        assert_eq!(config.model_path, "/tmp/model.bin.zst");
        assert_eq!(config.recommendation_count, 10);
    }

    #[test]
    fn test_remote_requires_url() {
        let result = Config::from_vars(vars(&[("MODEL_SOURCE", "remote")]));
        assert!(result.is_err());

        let config = Config::from_vars(vars(&[
            ("MODEL_SOURCE", "remote"),
            ("MODEL_URL", "https://example.com/similarity.bin.zst"),
        ]))
        .unwrap();
        assert_eq!(config.model_source, ModelSourceKind::Remote);
    }
}
