mod config;
mod error;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::PlaygroundConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        %port,
        user = %config.user_name,
        failure_rate = config.subscriptions.failure_rate,
        rollback = ?config.subscriptions.rollback,
        "configuration loaded"
    );

    let state = state::AppState::new(config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "prism playground listening");
    axum::serve(listener, app).await.expect("server failed");
}
