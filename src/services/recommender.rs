use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{
        catalog::Catalog,
        matching::{self, best_match, DEFAULT_SCORE_CUTOFF},
        model::SimilarityModel,
    },
};

const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct RecommenderSettings {
    /// Minimum fuzzy ratio (0-100) for a title match
    pub score_cutoff: f64,
    /// Maximum "did you mean" titles returned on a miss
    pub suggestion_limit: usize,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Result of the index-page flow: lookup first, recommendations only on a hit
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SearchOutcome {
    pub query: String,
    pub movie: Option<Movie>,
    pub recommendations: Option<Vec<Movie>>,
    pub suggestions: Vec<String>,
}

/// Content-based recommender over a catalog and its similarity model
pub struct Recommender {
    catalog: Catalog,
    model: SimilarityModel,
    settings: RecommenderSettings,
}

impl Recommender {
    pub fn new(catalog: Catalog, model: SimilarityModel, settings: RecommenderSettings) -> Self {
        Self {
            catalog,
            model,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &SimilarityModel {
        &self.model
    }

    /// Metadata of the catalog movie whose title best matches `title`
    pub fn movie_info(&self, title: &str) -> Option<&Movie> {
        self.catalog.by_title(title, self.settings.score_cutoff)
    }

    pub fn suggestions(&self, title: &str) -> Vec<String> {
        matching::suggest(title, self.catalog.titles(), self.settings.suggestion_limit)
    }

    /// The `n` movies most similar to the best match for `title`.
    ///
    /// Rows are ranked by descending score; equal scores keep row order. The
    /// matched row itself is never part of the result.
    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<Movie>> {
        let matched = best_match(title, self.model.titles(), self.settings.score_cutoff)
            .ok_or_else(|| AppError::MovieNotFound {
                title: title.to_string(),
                suggestions: self.suggestions(title),
            })?;

        tracing::debug!(
            query = title,
            matched = matched.choice,
            score = matched.score,
            "Matched title against model"
        );

        let query_index = matched.index;
        let mut ranked: Vec<(usize, f32)> = self
            .model
            .row(query_index)
            .iter()
            .copied()
            .enumerate()
            .filter(|(idx, _)| *idx != query_index)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let recommendations = ranked
            .into_iter()
            .take(n)
            .filter_map(|(idx, _)| {
                let movie_id = self.model.movie_id(idx)?;
                let movie = self.catalog.by_id(movie_id);
                if movie.is_none() {
                    tracing::warn!(movie_id, "Recommended movie missing from catalog");
                }
                movie.cloned()
            })
            .collect();

        Ok(recommendations)
    }

    pub fn search(&self, title: &str, n: usize) -> SearchOutcome {
        let movie = self.movie_info(title).cloned();

        let (recommendations, suggestions) = match &movie {
            Some(_) => match self.recommend(title, n) {
                Ok(movies) => (Some(movies), Vec::new()),
                Err(e) => {
                    tracing::warn!(query = title, error = %e, "Matched catalog movie has no model row");
                    (None, Vec::new())
                }
            },
            None => (None, self.suggestions(title)),
        };

        SearchOutcome {
            query: title.to_string(),
            movie,
            recommendations,
            suggestions,
        }
    }
}
