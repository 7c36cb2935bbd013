//! Computes the similarity model from the processed catalog and writes it to
//! `MODEL_PATH`, ready for the `local` and `remote` model sources.

use movie_recommender::{config::Config, init_tracing, services::SimilarityModel};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    tracing::info!(
        input = %config.processed_movies_path,
        max_features = config.max_features,
        "Building similarity model"
    );

    let model =
        SimilarityModel::from_processed_csv(&config.processed_movies_path, config.max_features)?;
    model.save(&config.model_path)?;

    let size = std::fs::metadata(&config.model_path)?.len();
    tracing::info!(
        output = %config.model_path,
        rows = model.len(),
        bytes = size,
        "Similarity model written"
    );

    Ok(())
}
