use thiserror::Error;

/// Everything that can go wrong between clicking a button and getting text back.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Backend(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request worker stopped unexpectedly")]
    WorkerPanicked,
}

impl ClientError {
    /// The text shown in an output region in place of the expected result.
    pub fn display_message(&self) -> String {
        format!("Error: {}. Please try again.", self)
    }
}
