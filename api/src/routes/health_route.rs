//! Liveness check served at GET /.

pub const HEALTH_MESSAGE: &str = "Hi! The server is healthy.";

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}
