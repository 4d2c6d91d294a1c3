//! Startup failures. Anything after `serve` is handled per request.

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("leptos configuration: {0}")]
    Config(String),
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}
