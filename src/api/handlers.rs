use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{state::MAX_RECOMMENDATIONS, AppState};
use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Movie,
};

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub movie: Movie,
    pub recommendations: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
    pub model_rows: usize,
    pub loaded_at: DateTime<Utc>,
}

fn require_title(title: &str) -> AppResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }
    Ok(title)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        movies: state.recommender.catalog().len(),
        model_rows: state.recommender.model().len(),
        loaded_at: state.loaded_at,
    })
}

/// Metadata of the best-matching movie
pub async fn get_movie(
    State(state): State<AppState>,
    query: Result<Query<MovieQuery>, QueryRejection>,
) -> AppResult<Json<Movie>> {
    let Query(params) = query?;
    let title = require_title(&params.title)?;

    state
        .recommender
        .movie_info(title)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::MovieNotFound {
            title: title.to_string(),
            suggestions: state.recommender.suggestions(title),
        })
}

/// Best-matching movie plus its nearest neighbours
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(params) = query?;
    let title = require_title(&params.title)?;
    let n = params.n.unwrap_or(state.recommendation_count);

    if n > MAX_RECOMMENDATIONS {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            MAX_RECOMMENDATIONS
        )));
    }

    tracing::info!(request_id = %request_id, title, n, "Processing recommendation request");

    let movie = state
        .recommender
        .movie_info(title)
        .cloned()
        .ok_or_else(|| AppError::MovieNotFound {
            title: title.to_string(),
            suggestions: state.recommender.suggestions(title),
        })?;

    let recommendations = state.recommender.recommend(title, n)?;

    tracing::info!(
        request_id = %request_id,
        matched = %movie.title,
        count = recommendations.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        movie,
        recommendations,
    }))
}
