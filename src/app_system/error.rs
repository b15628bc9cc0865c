use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] super::ConfigError),
    #[error("Failed to bind {address}: {source}")]
    Bind { address: String, source: std::io::Error },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
