//! Syntactic annotation of request text.
//!
//! The classifier only needs tokens with dependency edges and the recognized entities. This
//! crate turns raw text into that [`ParsedDocument`] by calling Google Cloud Natural Language
//! (`documents:annotateText`), or replays a saved response for offline use.

mod error;
mod fixed;
mod google;
mod wire;

use async_trait::async_trait;
use intent_graph::ParsedDocument;

pub use error::{AnnotatorError, Result};
pub use fixed::FixedAnnotator;
pub use google::{GoogleLanguageAnnotator, GoogleLanguageConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use wire::annotation_from_json;

/// Source of parsed documents.
///
/// Implementations are shared across concurrent requests.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<ParsedDocument>;

    /// Short identifier for logs
    fn name(&self) -> &str;
}
