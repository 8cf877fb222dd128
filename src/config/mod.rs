use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::set_security_headers;

const DEFAULT_PORT: u16 = 3001;

pub struct Config {
    pub database_url: String,
    /// Shared secret for signing bearer tokens. Required at startup; there
    /// is deliberately no built-in fallback value.
    pub jwt_secret: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment. Panics on missing required
    /// variables so a misconfigured deployment fails at startup, not on the
    /// first request.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            port: parse_port(env::var("PORT").ok()),
        }
    }
}

fn parse_port(value: Option<String>) -> u16 {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT value '{raw}', using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}
