use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to read keypair file: {0}")]
    KeypairNotFound(String),
}
