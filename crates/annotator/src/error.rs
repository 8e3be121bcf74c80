use intent_graph::GraphError;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnnotatorError>;

#[derive(Error, Debug)]
pub enum AnnotatorError {
    #[error("Annotation service request failed: {0}")]
    Transport(String),

    #[error("Annotation service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Annotation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Annotation response could not be decoded: {0}")]
    Decode(String),

    #[error("Annotation is inconsistent: {0}")]
    Document(#[from] GraphError),

    #[error("No API key configured for the annotation service")]
    MissingApiKey,
}

impl AnnotatorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
