//! noted-api - HTTP API server for the noted service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noted_api::{router, ApiConfig, AppState, NoteService};
use noted_core::{Error, NoteStore};
use noted_db::{Database, MemoryNoteStore, PoolConfig};

/// Process configuration, read from the environment.
///
/// Variables:
///   API_PORT             - listen port (default: 8080)
///   API_ALLOWED_ORIGIN   - allowed CORS origin (default: http://localhost:5173)
///   DATABASE_URL         - Postgres URL; presence selects the durable store
///   DB_MAX_CONNECTIONS   - pool size cap for the durable store (optional)
///   STRICT_CONTENT_TYPE  - "true"/"1" to require application/json bodies (default: true)
///
/// Unset variables fall back to their defaults; set-but-unparseable values
/// are a configuration error that stops startup.
#[derive(Debug, Clone)]
struct Config {
    port: u16,
    allowed_origin: String,
    database_url: Option<String>,
    db_max_connections: Option<u32>,
    strict_content_type: bool,
}

impl Config {
    fn from_env() -> Result<Self, Error> {
        let port = match std::env::var("API_PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => 8080,
        };
        let allowed_origin = std::env::var("API_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let database_url = std::env::var("DATABASE_URL").ok();
        let db_max_connections = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => Some(parse_pool_size(&raw)?),
            Err(_) => None,
        };
        let strict_content_type = std::env::var("STRICT_CONTENT_TYPE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            port,
            allowed_origin,
            database_url,
            db_max_connections,
            strict_content_type,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, Error> {
    raw.parse()
        .map_err(|_| Error::Config(format!("API_PORT must be a port number, got {raw:?}")))
}

fn parse_pool_size(raw: &str) -> Result<u32, Error> {
    raw.parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            Error::Config(format!(
                "DB_MAX_CONNECTIONS must be a positive integer, got {raw:?}"
            ))
        })
}

fn init_tracing() {
    // LOG_FORMAT selects "json" or "text" output; RUST_LOG overrides the
    // default filter.
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "noted_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => {
            layer = layer.allow_origin(origin);
        }
        Err(e) => {
            tracing::warn!("Invalid CORS origin '{}': {}", allowed_origin, e);
        }
    }
    layer
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    info!(
        port = config.port,
        allowed_origin = %config.allowed_origin,
        strict_content_type = config.strict_content_type,
        "Configuration loaded"
    );

    // Select the store variant once, at wiring time. Everything downstream
    // is agnostic to which one is active.
    let store: Arc<dyn NoteStore> = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let mut pool_config = PoolConfig::default();
            if let Some(n) = config.db_max_connections {
                pool_config = pool_config.max_connections(n);
            }
            let db = Database::connect_with_config(url, pool_config).await?;
            db.init_schema().await?;
            info!("Using durable note store (PostgreSQL)");
            Arc::new(db.notes)
        }
        None => {
            info!("DATABASE_URL not set; using transient in-memory note store");
            Arc::new(MemoryNoteStore::new())
        }
    };

    let state = AppState {
        service: NoteService::new(store),
        config: ApiConfig {
            strict_content_type: config.strict_content_type,
        },
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origin));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert!(matches!(parse_port("not-a-port"), Err(Error::Config(_))));
        assert!(matches!(parse_port("70000"), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_pool_size() {
        assert_eq!(parse_pool_size("25").unwrap(), 25);
        assert!(matches!(parse_pool_size("0"), Err(Error::Config(_))));
        assert!(matches!(parse_pool_size("ten"), Err(Error::Config(_))));
    }
}
