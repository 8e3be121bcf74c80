use crate::error::{GraphError, Result};
use crate::label::DependencyLabel;

/// Syntax token with its dependency edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the request
    pub text: String,

    /// Relation to the head token
    pub label: DependencyLabel,

    /// Index of the governing token within the same sequence.
    /// A root token usually heads itself.
    pub head_index: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, label: DependencyLabel, head_index: usize) -> Self {
        Self {
            text: text.into(),
            label,
            head_index,
        }
    }
}

/// Named entity recognized in the request
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,

    /// Provider entity type (e.g. "OTHER", "CONSUMER_GOOD")
    pub kind: String,

    pub salience: f32,
}

impl Entity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: String::new(),
            salience: 0.0,
        }
    }
}

/// Annotated request: tokens in document order plus recognized entities.
///
/// Every head index is checked against the token count on construction, so index
/// arithmetic on a `ParsedDocument` never leaves the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    tokens: Vec<Token>,
    entities: Vec<Entity>,
    language: Option<String>,
}

impl ParsedDocument {
    pub fn new(tokens: Vec<Token>, entities: Vec<Entity>) -> Result<Self> {
        let len = tokens.len();
        if let Some((token_index, token)) = tokens
            .iter()
            .enumerate()
            .find(|(_, token)| token.head_index >= len)
        {
            return Err(GraphError::HeadOutOfRange {
                token_index,
                head_index: token.head_index,
                len,
            });
        }

        Ok(Self {
            tokens,
            entities,
            language: None,
        })
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Find entity by exact (case-sensitive) name
    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// Index of the first token whose text is exactly `text`
    pub fn find_token(&self, text: &str) -> Option<usize> {
        self.tokens.iter().position(|token| token.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new("show", DependencyLabel::Root, 0),
            Token::new("orders", DependencyLabel::Dobj, 0),
            Token::new("orders", DependencyLabel::Dep, 0),
        ]
    }

    #[test]
    fn rejects_head_outside_sequence() {
        let mut tokens = tokens();
        tokens[1].head_index = 3;
        let err = ParsedDocument::new(tokens, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            GraphError::HeadOutOfRange {
                token_index: 1,
                head_index: 3,
                len: 3
            }
        );
    }

    #[test]
    fn accepts_empty_document() {
        let doc = ParsedDocument::new(Vec::new(), Vec::new()).unwrap();
        assert!(doc.tokens().is_empty());
        assert_eq!(doc.find_token("orders"), None);
    }

    #[test]
    fn find_token_returns_first_occurrence() {
        let doc = ParsedDocument::new(tokens(), Vec::new()).unwrap();
        assert_eq!(doc.find_token("orders"), Some(1));
        assert_eq!(doc.find_token("Orders"), None);
    }

    #[test]
    fn entity_lookup_is_exact() {
        let doc = ParsedDocument::new(tokens(), vec![Entity::named("orders")])
            .unwrap()
            .with_language("en");
        assert!(doc.find_entity("orders").is_some());
        assert!(doc.find_entity("order").is_none());
        assert!(doc.find_entity("Orders").is_none());
        assert_eq!(doc.language(), Some("en"));
    }
}
