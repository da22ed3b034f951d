use std::sync::Arc;

use tower_http::cors::CorsLayer;

use intake_agent::config::IntakeConfig;
use intake_agent::llm::{BoundaryConfig, create_boundary};
use intake_agent::routes::{RouteState, session_routes};
use intake_agent::session::TurnOrchestrator;
use intake_agent::store::{LibSqlStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Read API key from environment
    let api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: ANTHROPIC_API_KEY not set");
        eprintln!("  export ANTHROPIC_API_KEY=sk-ant-...");
        std::process::exit(1);
    });

    let model = std::env::var("INTAKE_MODEL")
        .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

    let port: u16 = std::env::var("INTAKE_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let db_path =
        std::env::var("INTAKE_DB_PATH").unwrap_or_else(|_| "./data/intake.db".to_string());

    eprintln!("🗒  Intake Agent v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", model);
    eprintln!("   API: http://0.0.0.0:{}/api/sessions", port);
    eprintln!("   Database: {}", db_path);

    let config = IntakeConfig::default();

    let boundary = create_boundary(&BoundaryConfig {
        api_key: secrecy::SecretString::from(api_key),
        model,
        max_tokens: config.max_response_tokens,
    })?;

    let store: Arc<dyn SessionStore> = Arc::new(
        LibSqlStore::new_local(std::path::Path::new(&db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open database at {}: {}", db_path, e);
                std::process::exit(1);
            }),
    );

    let orchestrator = Arc::new(TurnOrchestrator::new(store, boundary, config));

    let app = session_routes(RouteState { orchestrator }).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Listening on 0.0.0.0:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
