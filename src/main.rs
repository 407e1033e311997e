use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mlr_citations::config::{database, AppConfig, AppState};
use mlr_citations::create_router;
use mlr_citations::repositories::PgStore;

fn init_tracing() {
    // Default to INFO; override with RUST_LOG
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "mlr_citations=info,tower_http=info,sqlx=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    for origin in &config.cors_origins {
        if origin.starts_with("http://") && !origin.contains("localhost") {
            tracing::warn!("Insecure HTTP origin in CORS: {} (use HTTPS in production)", origin);
        }
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    tracing::info!("CORS configured with {} allowed origins", origins.len());

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing();

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Connected to claim store");

    if config.run_migrations {
        database::run_migrations(&pool).await?;
        tracing::info!("Schema migrations applied");
    }

    let state = AppState::with_config(PgStore::new(pool), &config);
    tracing::info!(
        annotation_style = %config.annotation_style,
        max_content_length = config.max_content_length,
        "Citation engine configured"
    );

    let app = create_router(state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server_address();
    tracing::info!("Starting MLR citation service on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
