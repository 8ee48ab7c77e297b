use crate::photo::ItemFailure;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote catalog error: {0}")]
    Remote(String),

    #[error("All {attempted} image downloads failed")]
    AllDownloadsFailed {
        attempted: usize,
        failures: Vec<ItemFailure>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
