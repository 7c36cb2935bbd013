use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const UNKNOWN_RELEASE_DATE: &str = "Unknown release date";
const UNKNOWN_RUNTIME: &str = "Not available";

/// Row of the raw movie catalog (`movies_data.csv`)
///
/// Columns not listed here are ignored by the CSV reader.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    /// JSON array of `{"id": .., "name": ..}` objects
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// Row of the processed catalog (`processed_movies.csv`)
///
/// Row order defines the row index in the similarity matrix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProcessedMovie {
    pub movie_id: u64,
    pub title: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub name: String,
}

/// Movie metadata as presented to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    /// Genre names joined with ", "
    pub genres: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub runtime: String,
    pub poster_url: Option<String>,
}

impl MovieRecord {
    pub fn genre_names(&self) -> AppResult<Vec<String>> {
        let raw = match self.genres.as_deref().map(str::trim) {
            None | Some("") => return Ok(Vec::new()),
            Some(raw) => raw,
        };

        let genres: Vec<Genre> = serde_json::from_str(raw).map_err(|e| {
            AppError::InvalidInput(format!(
                "Malformed genres for movie {} ({}): {}",
                self.id, self.title, e
            ))
        })?;

        Ok(genres.into_iter().map(|g| g.name).collect())
    }
}

impl TryFrom<MovieRecord> for Movie {
    type Error = AppError;

    fn try_from(record: MovieRecord) -> AppResult<Self> {
        let genres = record.genre_names()?.join(", ");

        let release_date = record
            .release_date
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string());

        let runtime = record
            .runtime
            .map(|minutes| minutes.to_string())
            .unwrap_or_else(|| UNKNOWN_RUNTIME.to_string());

        Ok(Movie {
            id: record.id,
            title: record.title,
            genres,
            overview: record.overview.unwrap_or_default(),
            release_date,
            vote_average: record.vote_average.unwrap_or_default(),
            runtime,
            poster_url: record.poster.filter(|p| !p.trim().is_empty()),
        })
    }
}
