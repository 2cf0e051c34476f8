use std::env;

// ============================================================================
// Runtime Configuration
// ============================================================================

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    /// `BLOOMCART_HOST` and `BLOOMCART_PORT` override; a malformed port
    /// falls back with a warning rather than aborting startup.
    pub fn from_env() -> Self {
        let host = env::var("BLOOMCART_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("BLOOMCART_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid BLOOMCART_PORT, using default");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self { host, port }
    }
}
