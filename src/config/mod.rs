pub mod database;

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::models::AnnotationStyle;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty());

        // Password is only mandatory when no full URL is given
        let password = match env::var("DATABASE_PASSWORD") {
            Ok(password) => password,
            Err(_) if url.is_some() => String::new(),
            Err(_) => return Err(anyhow!("DATABASE_URL or DATABASE_PASSWORD must be set")),
        };

        Ok(Self {
            url,
            host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()?,
            username: env::var("DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
            password,
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "mlr_content".to_string()),
            ssl_mode: env::var("DATABASE_SSL_MODE").unwrap_or_else(|_| "prefer".to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
        })
    }

    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.username, self.password, self.host, self.port, self.database, self.ssl_mode
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub annotation_style: AnnotationStyle,
    pub max_content_length: usize,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let annotation_style = env::var("CITATION_ANNOTATION_STYLE")
            .ok()
            .map(|s| s.parse::<AnnotationStyle>())
            .transpose()
            .map_err(|e| anyhow!(e))?
            .unwrap_or_default();

        Ok(Self {
            database: DatabaseConfig::from_env()?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cors_origins,
            annotation_style,
            max_content_length: env::var("MAX_CONTENT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_LENGTH),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Upper bound on a submitted document body, in bytes.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 512 * 1024;

/// Shared handler state. The store sits behind an `Arc` so any store type can
/// be used without requiring `Clone`.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub annotation_style: AnnotationStyle,
    pub max_content_length: usize,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            annotation_style: AnnotationStyle::default(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }

    pub fn with_config(store: S, config: &AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            annotation_style: config.annotation_style,
            max_content_length: config.max_content_length,
        }
    }

    pub fn with_annotation_style(mut self, annotation_style: AnnotationStyle) -> Self {
        self.annotation_style = annotation_style;
        self
    }

    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = max_content_length;
        self
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            annotation_style: self.annotation_style,
            max_content_length: self.max_content_length,
        }
    }
}
