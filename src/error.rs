use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("user metadata could not be serialized: {0}")]
    InvalidMeta(#[source] serde_json::Error),
    #[error("user metadata must be a JSON object, got {0}")]
    MetaNotObject(&'static str),
    #[error("failed to serialize widget settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("surface could not present chat: {0}")]
    Surface(String),
    #[error("no chat screen has been presented")]
    NothingPresented,
}
