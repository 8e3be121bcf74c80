use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{Response as HttpResponse, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use intent_annotator::{Annotator, AnnotatorError};
use intent_classifier::{ClassifyError, HandlerChain};
use intent_protocol::{serialize_json, ClassificationResult, ErrorEnvelope, ErrorResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a request needs; built once by `serve` and shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<HandlerChain>,
    pub annotator: Arc<dyn Annotator>,
}

impl AppState {
    pub fn new(chain: HandlerChain, annotator: Arc<dyn Annotator>) -> Self {
        Self {
            chain: Arc::new(chain),
            annotator,
        }
    }
}

/// Failures of a single `GET /` request.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Query parameter 'request' is required and must not be blank")]
    MissingRequestParameter,

    #[error("Malformed query string: {0}")]
    InvalidQuery(String),

    #[error("Annotation service ({service}) failed: {source}")]
    AnnotationServiceFailure {
        service: String,
        #[source]
        source: AnnotatorError,
    },

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequestParameter => "missing_request_parameter",
            Self::InvalidQuery(_) => "invalid_request",
            Self::AnnotationServiceFailure { .. } => "annotation_service_failure",
            Self::Classify(ClassifyError::SubjectTokenNotFound { .. }) => {
                "subject_token_not_found"
            }
            Self::Classify(ClassifyError::NoHandlerMatched) => "no_handler_matched",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingRequestParameter | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::AnnotationServiceFailure { source, .. } if source.is_timeout() => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Self::AnnotationServiceFailure { .. } => StatusCode::BAD_GATEWAY,
            Self::Classify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            Self::MissingRequestParameter => {
                Some("Pass the text to classify as GET /?request=<text>.".to_string())
            }
            Self::InvalidQuery(_) => Some(
                "Send exactly one URL-encoded 'request' parameter.".to_string(),
            ),
            Self::AnnotationServiceFailure { .. } => Some(
                "Check the annotation API key and endpoint, then retry the request.".to_string(),
            ),
            Self::Classify(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ClassifyParams {
    request: Option<String>,
}

/// `GET /?request=<text>` router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(classify_handler))
        .with_state(Arc::new(state))
}

async fn classify_handler(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ClassifyParams>, QueryRejection>,
) -> Result<Response, StatusCode> {
    let outcome = match params {
        Ok(Query(params)) => classify_request(&state, params.request).await,
        Err(rejection) => Err(ServiceError::InvalidQuery(rejection.body_text())),
    };
    match outcome {
        Ok(result) => build_response(StatusCode::OK, &result),
        Err(err) => {
            if err.status().is_server_error() {
                log::warn!("Request failed: {err}");
            } else {
                log::debug!("Request rejected: {err}");
            }
            build_response(err.status(), &error_response(&err))
        }
    }
}

async fn classify_request(
    state: &AppState,
    request: Option<String>,
) -> Result<ClassificationResult, ServiceError> {
    // Blank text would only spend annotation quota.
    let text = request
        .filter(|text| !text.trim().is_empty())
        .ok_or(ServiceError::MissingRequestParameter)?;
    classify_text(state, &text).await
}

/// Annotate `text` and run it through the handler chain.
pub(crate) async fn classify_text(
    state: &AppState,
    text: &str,
) -> Result<ClassificationResult, ServiceError> {
    let doc = state.annotator.annotate(text).await.map_err(|source| {
        ServiceError::AnnotationServiceFailure {
            service: state.annotator.name().to_string(),
            source,
        }
    })?;
    let result = state.chain.classify(&doc)?;
    log::debug!("Classified {} byte(s) as {}", text.len(), result.intent);
    Ok(result)
}

pub(crate) fn error_response(err: &ServiceError) -> ErrorResponse {
    ErrorResponse {
        error: ErrorEnvelope {
            code: err.code().to_string(),
            message: err.to_string(),
            hint: err.hint(),
        },
    }
}

pub(crate) fn build_response<T: Serialize>(
    status: StatusCode,
    body: &T,
) -> Result<Response, StatusCode> {
    let bytes = serialize_json(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();

    HttpResponse::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
