use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Model error: {0}")]
    Model(String),

    #[error("No movie matching '{title}' found in the database")]
    MovieNotFound {
        title: String,
        suggestions: Vec<String>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::MovieNotFound { suggestions, .. } = &self {
            let body = Json(json!({
                "error": self.to_string(),
                "suggestions": suggestions,
            }));
            return (StatusCode::NOT_FOUND, body).into_response();
        }

        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            _ => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::InvalidInput("n too large".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::ExternalApi("model host down".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Model("truncated".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::MovieNotFound {
                    title: "Zzz".to_string(),
                    suggestions: vec![],
                },
                StatusCode::NOT_FOUND,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_not_found_message() {
        let error = AppError::MovieNotFound {
            title: "Inceptoin".to_string(),
            suggestions: vec!["Inception".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "No movie matching 'Inceptoin' found in the database"
        );
    }
}
