use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::chain::HandlerChain;
use crate::handler::IntentHandler;

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHandlersConfig {
    schema_version: Option<u32>,
    #[serde(default)]
    intent: Vec<RawIntent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIntent {
    label: String,
    subject: String,
}

impl HandlerChain {
    /// Load search handlers from a JSON or TOML file; the fallback is appended.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read handler config {}", path.display()))?;
        Self::from_config_bytes(&bytes)
            .with_context(|| format!("Invalid handler config {}", path.display()))
    }

    pub fn from_config_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = parse_raw(bytes)?;

        if let Some(version) = raw.schema_version {
            if version != SCHEMA_VERSION {
                return Err(anyhow!(
                    "schema_version {version} is not supported (expected {SCHEMA_VERSION})"
                ));
            }
        }
        if raw.intent.is_empty() {
            return Err(anyhow!("at least one [[intent]] entry is required"));
        }

        let mut handlers = Vec::with_capacity(raw.intent.len());
        for (idx, intent) in raw.intent.into_iter().enumerate() {
            let label = intent.label.trim();
            let subject = intent.subject.trim();
            if label.is_empty() || subject.is_empty() {
                return Err(anyhow!("intent[{idx}]: label and subject must be non-empty"));
            }
            if label == intent_protocol::UNKNOWN_INTENT {
                return Err(anyhow!(
                    "intent[{idx}]: label {label} is reserved for the fallback handler"
                ));
            }
            if handlers
                .iter()
                .any(|h: &IntentHandler| h.intent() == label)
            {
                log::warn!("intent[{idx}]: label {label} repeats an earlier entry");
            }
            handlers.push(IntentHandler::search(label, subject));
        }

        Ok(Self::with_fallback(handlers))
    }
}

fn parse_raw(bytes: &[u8]) -> Result<RawHandlersConfig> {
    match serde_json::from_slice(bytes) {
        Ok(raw) => Ok(raw),
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
            toml::from_str(utf8).map_err(|toml_err| {
                anyhow!("Handler config is not valid JSON ({json_err}) or TOML ({toml_err})")
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn loads_toml_in_file_order() {
        let chain = HandlerChain::from_config_bytes(
            br#"
schema_version = 1

[[intent]]
label = "PRODUCT_SEARCH"
subject = "products"

[[intent]]
label = "ORDER_SEARCH"
subject = "orders"
"#,
        )
        .unwrap();

        assert_eq!(
            chain.handlers(),
            &[
                IntentHandler::product_search(),
                IntentHandler::order_search(),
                IntentHandler::Fallback,
            ]
        );
    }

    #[test]
    fn loads_json() {
        let chain = HandlerChain::from_config_bytes(
            br#"{"intent": [{"label": "RETURN_SEARCH", "subject": "returns"}]}"#,
        )
        .unwrap();
        assert_eq!(
            chain.handlers(),
            &[
                IntentHandler::search("RETURN_SEARCH", "returns"),
                IntentHandler::Fallback
            ]
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_entries() {
        let err = HandlerChain::from_config_bytes(
            b"[[intent]]\nlabel = \"A\"\nsubject = \"a\"\nweight = 2\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("weight"), "{err}");

        assert!(HandlerChain::from_config_bytes(b"intent = []").is_err());
        assert!(HandlerChain::from_config_bytes(
            b"[[intent]]\nlabel = \"UNKNOWN\"\nsubject = \"x\"\n"
        )
        .is_err());
        assert!(HandlerChain::from_config_bytes(
            b"[[intent]]\nlabel = \" \"\nsubject = \"x\"\n"
        )
        .is_err());
        assert!(HandlerChain::from_config_bytes(
            b"schema_version = 2\n[[intent]]\nlabel = \"A\"\nsubject = \"a\"\n"
        )
        .is_err());
    }

    #[test]
    fn from_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not = [valid").unwrap();
        let err = HandlerChain::from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid handler config"));
    }
}
