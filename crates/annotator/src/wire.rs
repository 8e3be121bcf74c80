//! JSON shapes of the `documents:annotateText` REST call.

use crate::error::{AnnotatorError, Result};
use intent_graph::{DependencyLabel, Entity, ParsedDocument, Token};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateTextRequest<'a> {
    pub document: RequestDocument<'a>,
    pub features: Features,
    pub encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestDocument<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Features {
    pub extract_syntax: bool,
    pub extract_entities: bool,
}

impl<'a> AnnotateTextRequest<'a> {
    pub(crate) fn plain_text(content: &'a str) -> Self {
        Self {
            document: RequestDocument {
                kind: "PLAIN_TEXT",
                content,
            },
            features: Features {
                extract_syntax: true,
                extract_entities: true,
            },
            encoding_type: "UTF8",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateTextResponse {
    #[serde(default)]
    tokens: Vec<WireToken>,
    #[serde(default)]
    entities: Vec<WireEntity>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireToken {
    text: WireTextSpan,
    // proto3 JSON drops zero-valued fields, so a missing edge means head 0.
    #[serde(default)]
    dependency_edge: WireDependencyEdge,
}

#[derive(Debug, Deserialize)]
struct WireTextSpan {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDependencyEdge {
    #[serde(default)]
    head_token_index: i64,
    #[serde(default)]
    label: Option<DependencyLabel>,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    salience: f32,
}

/// Parse an `annotateText` response body into a validated document.
pub fn annotation_from_json(bytes: &[u8]) -> Result<ParsedDocument> {
    let response: AnnotateTextResponse =
        serde_json::from_slice(bytes).map_err(|err| AnnotatorError::Decode(err.to_string()))?;

    let mut tokens = Vec::with_capacity(response.tokens.len());
    for (idx, token) in response.tokens.into_iter().enumerate() {
        let head_index = usize::try_from(token.dependency_edge.head_token_index).map_err(|_| {
            AnnotatorError::Decode(format!(
                "token {idx} has negative head index {}",
                token.dependency_edge.head_token_index
            ))
        })?;
        tokens.push(Token::new(
            token.text.content,
            token
                .dependency_edge
                .label
                .unwrap_or(DependencyLabel::Unknown),
            head_index,
        ));
    }

    let entities = response
        .entities
        .into_iter()
        .map(|entity| Entity {
            name: entity.name,
            kind: entity.kind,
            salience: entity.salience,
        })
        .collect();

    let doc = ParsedDocument::new(tokens, entities)?;
    Ok(match response.language {
        Some(language) if !language.is_empty() => doc.with_language(language),
        _ => doc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED_ORDERS: &str = include_str!("../../../fixtures/annotations/red_orders.json");
    const CHEAP_PRODUCTS: &str =
        include_str!("../../../fixtures/annotations/cheap_products.json");

    #[test]
    fn maps_tokens_and_entities() {
        let doc = annotation_from_json(RED_ORDERS.as_bytes()).unwrap();

        let words: Vec<(&str, DependencyLabel, usize)> = doc
            .tokens()
            .iter()
            .map(|t| (t.text.as_str(), t.label, t.head_index))
            .collect();
        assert_eq!(
            words,
            vec![
                ("show", DependencyLabel::Root, 0),
                ("me", DependencyLabel::Iobj, 0),
                ("red", DependencyLabel::Amod, 3),
                ("orders", DependencyLabel::Dobj, 0),
                ("from", DependencyLabel::Prep, 3),
                ("last", DependencyLabel::Amod, 6),
                ("week", DependencyLabel::Pobj, 4),
            ]
        );
        assert_eq!(doc.entities().len(), 1);
        assert_eq!(doc.entities()[0].name, "orders");
        assert_eq!(doc.entities()[0].kind, "OTHER");
        assert_eq!(doc.language(), Some("en"));
    }

    #[test]
    fn omitted_head_index_defaults_to_zero() {
        let doc = annotation_from_json(CHEAP_PRODUCTS.as_bytes()).unwrap();
        assert_eq!(doc.tokens()[0].head_index, 0);
        assert_eq!(doc.tokens()[2].head_index, 0);
        assert_eq!(doc.tokens()[1].head_index, 2);
    }

    #[test]
    fn rejects_head_outside_document() {
        let body = r#"{"tokens": [{"text": {"content": "x"}, "dependencyEdge": {"headTokenIndex": 4, "label": "ROOT"}}]}"#;
        let err = annotation_from_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, AnnotatorError::Document(_)), "{err}");
    }

    #[test]
    fn rejects_negative_head_and_garbage() {
        let body = r#"{"tokens": [{"text": {"content": "x"}, "dependencyEdge": {"headTokenIndex": -1}}]}"#;
        assert!(matches!(
            annotation_from_json(body.as_bytes()),
            Err(AnnotatorError::Decode(_))
        ));
        assert!(matches!(
            annotation_from_json(b"<html>quota exceeded</html>"),
            Err(AnnotatorError::Decode(_))
        ));
    }

    #[test]
    fn request_body_matches_api_shape() {
        let value = serde_json::to_value(AnnotateTextRequest::plain_text("red orders")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "document": {"type": "PLAIN_TEXT", "content": "red orders"},
                "features": {"extractSyntax": true, "extractEntities": true},
                "encodingType": "UTF8"
            })
        );
    }
}
