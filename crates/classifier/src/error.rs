use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// An entity named like the subject exists, but no token carries that text.
    #[error("Entity '{subject}' has no token with the same text in the annotation")]
    SubjectTokenNotFound { subject: String },

    #[error("No handler in the chain accepted the document")]
    NoHandlerMatched,
}
