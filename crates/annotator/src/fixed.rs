use crate::error::{AnnotatorError, Result};
use crate::wire::annotation_from_json;
use crate::Annotator;
use async_trait::async_trait;
use intent_graph::ParsedDocument;
use std::path::Path;

/// Answers every request with the same pre-computed document.
#[derive(Debug, Clone)]
pub struct FixedAnnotator {
    doc: ParsedDocument,
}

impl FixedAnnotator {
    pub fn new(doc: ParsedDocument) -> Self {
        Self { doc }
    }

    /// Load a saved `annotateText` response
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            AnnotatorError::Transport(format!("Failed to read {}: {err}", path.display()))
        })?;
        Ok(Self::new(annotation_from_json(&bytes)?))
    }
}

#[async_trait]
impl Annotator for FixedAnnotator {
    async fn annotate(&self, text: &str) -> Result<ParsedDocument> {
        log::debug!("Replaying saved annotation for {} byte(s) of text", text.len());
        Ok(self.doc.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
