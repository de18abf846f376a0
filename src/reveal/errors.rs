use thiserror::Error;

#[derive(Debug, Error)]
pub enum RevealError {
    #[error("Could not resolve metadata for {0} after {1} attempt(s): {2}")]
    MetadataUnavailable(String, u8, String),
}
