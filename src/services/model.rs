use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::ProcessedMovie,
    services::vectorize::{similarity_matrix, CountVectorizer},
};

const ZSTD_LEVEL: i32 = 3;

/// Precomputed tag similarity between every pair of processed movies
///
/// Serialized with bincode and compressed with zstd on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityModel {
    movie_ids: Vec<u64>,
    titles: Vec<String>,
    /// Row-major `n x n`
    scores: Vec<f32>,
}

impl SimilarityModel {
    pub fn new(movie_ids: Vec<u64>, titles: Vec<String>, scores: Vec<f32>) -> AppResult<Self> {
        let model = Self {
            movie_ids,
            titles,
            scores,
        };
        model.validate()?;
        Ok(model)
    }

    /// Builds the model from processed rows
    pub fn from_rows(rows: &[ProcessedMovie], max_features: usize) -> AppResult<Self> {
        let tags: Vec<&str> = rows.iter().map(|r| r.tags.as_str()).collect();

        let mut vectorizer = CountVectorizer::new(max_features);
        let vectors = vectorizer.fit_transform(&tags)?;

        tracing::debug!(
            rows = rows.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "Vectorized movie tags"
        );

        Self::new(
            rows.iter().map(|r| r.movie_id).collect(),
            rows.iter().map(|r| r.title.clone()).collect(),
            similarity_matrix(&vectors),
        )
    }

    pub fn from_processed_csv(path: impl AsRef<Path>, max_features: usize) -> AppResult<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ProcessedMovie>, csv::Error>>()?;
        Self::from_rows(&rows, max_features)
    }

    pub fn to_bytes(&self) -> AppResult<Vec<u8>> {
        let encoded = bincode::serialize(self)
            .map_err(|e| AppError::Model(format!("Failed to encode model: {}", e)))?;
        Ok(zstd::encode_all(encoded.as_slice(), ZSTD_LEVEL)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let decoded = zstd::decode_all(bytes)
            .map_err(|e| AppError::Model(format!("Failed to decompress model: {}", e)))?;
        let model: Self = bincode::deserialize(&decoded)
            .map_err(|e| AppError::Model(format!("Failed to decode model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    fn validate(&self) -> AppResult<()> {
        let n = self.titles.len();
        if self.movie_ids.len() != n {
            return Err(AppError::Model(format!(
                "{} movie ids for {} titles",
                self.movie_ids.len(),
                n
            )));
        }
        if self.scores.len() != n * n {
            return Err(AppError::Model(format!(
                "Expected {} scores for {} rows, found {}",
                n * n,
                n,
                self.scores.len()
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn movie_id(&self, index: usize) -> Option<u64> {
        self.movie_ids.get(index).copied()
    }

    /// Similarity of row `index` against every row
    pub fn row(&self, index: usize) -> &[f32] {
        let n = self.len();
        &self.scores[index * n..(index + 1) * n]
    }
}
