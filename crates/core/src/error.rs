use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("invalid chunking config: {0}")]
    InvalidChunkConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no extractable text in the uploaded documents")]
    EmptyCorpus,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no documents uploaded")]
    NoDocuments,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("documents have not been processed yet")]
    NotReady,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
