use crate::error::{ClassifyError, Result};
use crate::handler::IntentHandler;
use intent_graph::ParsedDocument;
use intent_protocol::ClassificationResult;

/// Ordered handlers; the first one that can handle a document classifies it.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerChain {
    handlers: Vec<IntentHandler>,
}

impl HandlerChain {
    /// Search handlers in the given order, followed by the fallback.
    #[must_use]
    pub fn with_fallback(search_handlers: Vec<IntentHandler>) -> Self {
        let mut handlers: Vec<IntentHandler> = search_handlers
            .into_iter()
            .filter(|handler| !matches!(handler, IntentHandler::Fallback))
            .collect();
        handlers.push(IntentHandler::Fallback);
        Self { handlers }
    }

    /// Exactly the given handlers. Without a fallback, `classify` can report
    /// [`ClassifyError::NoHandlerMatched`].
    #[must_use]
    pub fn from_handlers(handlers: Vec<IntentHandler>) -> Self {
        Self { handlers }
    }

    pub fn handlers(&self) -> &[IntentHandler] {
        &self.handlers
    }

    /// First handler (in chain order) that accepts the document
    pub fn select(&self, doc: &ParsedDocument) -> Option<&IntentHandler> {
        self.handlers.iter().find(|handler| handler.can_handle(doc))
    }

    pub fn classify(&self, doc: &ParsedDocument) -> Result<ClassificationResult> {
        let handler = self.select(doc).ok_or(ClassifyError::NoHandlerMatched)?;
        log::debug!("Handler {} selected", handler.intent());
        handler.handle(doc)
    }
}

impl Default for HandlerChain {
    /// `[ORDER_SEARCH, PRODUCT_SEARCH, fallback]`
    fn default() -> Self {
        Self::with_fallback(vec![
            IntentHandler::order_search(),
            IntentHandler::product_search(),
        ])
    }
}
