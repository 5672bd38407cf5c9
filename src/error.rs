use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed document; `path` is the JSON path of the offending node.
    #[error("invalid model document at JSON path {path}: {message}")]
    Document { path: String, message: String },
    #[error("JSON pointer {0} selects nothing in the model document")]
    PointerMiss(String),
    #[error("class {0} is declared more than once")]
    DuplicateClass(String),
    #[error("invalid class name `{0}`")]
    InvalidClassName(String),
    #[error("cannot parse type `{text}` in {context}: {reason}")]
    TypeSyntax {
        text: String,
        context: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to render sample: {0}")]
    Render(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}
