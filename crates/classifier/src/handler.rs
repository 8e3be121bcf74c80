use crate::error::{ClassifyError, Result};
use intent_graph::ParsedDocument;
use intent_protocol::ClassificationResult;

pub const ORDER_SEARCH: &str = "ORDER_SEARCH";
pub const PRODUCT_SEARCH: &str = "PRODUCT_SEARCH";

/// One link of the handler chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentHandler {
    /// Claims documents mentioning `subject` as an entity and extracts the words describing it.
    Search { intent: String, subject: String },
    /// Claims everything and reports the `UNKNOWN` intent.
    Fallback,
}

impl IntentHandler {
    pub fn search(intent: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::Search {
            intent: intent.into(),
            subject: subject.into(),
        }
    }

    #[must_use]
    pub fn order_search() -> Self {
        Self::search(ORDER_SEARCH, "orders")
    }

    #[must_use]
    pub fn product_search() -> Self {
        Self::search(PRODUCT_SEARCH, "products")
    }

    /// Intent label this handler reports
    pub fn intent(&self) -> &str {
        match self {
            Self::Search { intent, .. } => intent,
            Self::Fallback => intent_protocol::UNKNOWN_INTENT,
        }
    }

    pub fn can_handle(&self, doc: &ParsedDocument) -> bool {
        match self {
            Self::Search { subject, .. } => doc.find_entity(subject).is_some(),
            Self::Fallback => true,
        }
    }

    pub fn handle(&self, doc: &ParsedDocument) -> Result<ClassificationResult> {
        match self {
            Self::Search { intent, subject } => {
                let query = extract_search_query(doc, subject)?;
                Ok(ClassificationResult::search(intent.as_str(), query))
            }
            Self::Fallback => Ok(ClassificationResult::unknown()),
        }
    }
}

/// Join the descriptive tokens whose head chain ends up at the first `subject` token.
///
/// Output follows document order. A document with no such token yields an empty string; a
/// document without any token spelled `subject` is an annotation inconsistency and fails.
pub fn extract_search_query(doc: &ParsedDocument, subject: &str) -> Result<String> {
    let subject_index =
        doc.find_token(subject)
            .ok_or_else(|| ClassifyError::SubjectTokenNotFound {
                subject: subject.to_string(),
            })?;

    let terms: Vec<&str> = doc
        .dependents_of(subject_index)
        .filter(|(_, token)| token.label.is_descriptive())
        .map(|(_, token)| token.text.as_str())
        .collect();

    log::debug!(
        "Subject '{subject}' at token {subject_index}: {} descriptive term(s)",
        terms.len()
    );

    Ok(terms.join(" "))
}
