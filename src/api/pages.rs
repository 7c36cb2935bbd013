use axum::{extract::State, response::Html, Extension, Form};
use serde::Deserialize;

use super::AppState;
use crate::{error::AppResult, middleware::RequestId, services::SearchOutcome};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub movie_title: Option<String>,
}

/// Empty index page
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, &SearchOutcome::default())
}

/// Index page after the search form is submitted
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    let title = form.movie_title.as_deref().map(str::trim).unwrap_or_default();

    if title.is_empty() {
        return render(&state, &SearchOutcome::default());
    }

    let outcome = state.recommender.search(title, state.recommendation_count);

    tracing::info!(
        request_id = %request_id,
        title,
        matched = outcome.movie.as_ref().map(|m| m.title.as_str()),
        recommendations = outcome.recommendations.as_ref().map_or(0, Vec::len),
        "Processed search form"
    );

    render(&state, &outcome)
}

fn render(state: &AppState, page: &SearchOutcome) -> AppResult<Html<String>> {
    Ok(Html(state.templates.render_index(page)?))
}
