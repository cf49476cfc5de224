use crate::models::SessionStage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("text is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("deserialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid response from {provider}: {details}")]
    BackendResponse { provider: String, details: String },

    #[error("response body is not valid text: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("result {0} was already selected")]
    DuplicateSelection(u32),

    #[error("no fetched result has rank {0}")]
    UnknownRank(u32),

    #[error("selection is closed, the maximum number of results is already chosen")]
    SelectionClosed,

    #[error("operation requires stage {expected:?} but session is in {actual:?}")]
    StageMismatch {
        expected: SessionStage,
        actual: SessionStage,
    },
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("query is empty, refusing to derive a corpus file name")]
    EmptyQuery,
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
