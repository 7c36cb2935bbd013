use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    tracing::info!(source = ?config.model_source, "Starting movie recommender");

    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
