use crate::error::{AnnotatorError, Result};
use crate::wire::{annotation_from_json, AnnotateTextRequest};
use crate::Annotator;
use async_trait::async_trait;
use intent_graph::ParsedDocument;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body kept in [`AnnotatorError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct GoogleLanguageConfig {
    /// Base URL, without the `/v1/...` path
    pub endpoint: String,
    pub api_key: String,
    /// Sent as `x-goog-user-project` so quota is billed to this project
    pub project_id: Option<String>,
    pub timeout: Duration,
}

impl GoogleLanguageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            project_id: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Google Cloud Natural Language `annotateText` client.
#[derive(Debug, Clone)]
pub struct GoogleLanguageAnnotator {
    client: Client,
    url: String,
    config: GoogleLanguageConfig,
}

impl GoogleLanguageAnnotator {
    pub fn new(config: GoogleLanguageConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AnnotatorError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AnnotatorError::Transport(format!("Failed to build HTTP client: {err}")))?;
        let url = format!(
            "{}/v1/documents:annotateText",
            config.endpoint.trim_end_matches('/')
        );

        Ok(Self {
            client,
            url,
            config,
        })
    }

    pub fn config(&self) -> &GoogleLanguageConfig {
        &self.config
    }

    fn map_send_error(&self, err: reqwest::Error) -> AnnotatorError {
        if err.is_timeout() {
            AnnotatorError::Timeout(self.config.timeout)
        } else {
            // reqwest errors carry the full URL, which includes the API key.
            AnnotatorError::Transport(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl Annotator for GoogleLanguageAnnotator {
    async fn annotate(&self, text: &str) -> Result<ParsedDocument> {
        let mut request = self
            .client
            .post(&self.url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&AnnotateTextRequest::plain_text(text));
        if let Some(project) = &self.config.project_id {
            request = request.header("x-goog-user-project", project);
        }

        let response = request.send().await.map_err(|err| self.map_send_error(err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_send_error(err))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body);
            return Err(AnnotatorError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let doc = annotation_from_json(&body)?;
        log::debug!(
            "Annotated {} token(s), {} entit(ies), language {:?}",
            doc.tokens().len(),
            doc.entities().len(),
            doc.language()
        );
        Ok(doc)
    }

    fn name(&self) -> &str {
        "google-language"
    }
}
