// crates/eventmi-client/src/client.rs
// ============================================================================
// Module: Event HTTP Client
// Description: reqwest-backed client for the Event routes.
// Purpose: Send form-encoded requests and capture status plus transcript.
// Dependencies: eventmi-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! The client is configured once with a base address and issues requests
//! relative to it. Each call performs exactly one exchange; failures to reach
//! the server surface as [`ClientError::Transport`] while any HTTP status,
//! including 404 and 500, is a successful exchange for the caller to judge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use eventmi_core::EventForm;
use eventmi_core::EventId;
use eventmi_core::EventRoute;
use eventmi_core::HttpMethod;
use eventmi_core::WireDateError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::audit::NoopAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::RequestAuditSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirects followed per exchange.
const MAX_REDIRECTS: usize = 10;
/// Content type for form bodies.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by the Event HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base address failed validation.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// HTTP client construction failed.
    #[error("failed to build http client: {0}")]
    Build(String),
    /// Form body could not be encoded.
    #[error("failed to encode form: {0}")]
    Form(#[from] WireDateError),
    /// Request failed before a response arrived.
    #[error("{method} {path} failed: {message}")]
    Transport {
        /// HTTP method.
        method: &'static str,
        /// Request path.
        path: String,
        /// Transport diagnostic.
        message: String,
    },
    /// Response body could not be read.
    #[error("{method} {path} body read failed: {message}")]
    Body {
        /// HTTP method.
        method: &'static str,
        /// Request path.
        path: String,
        /// Read diagnostic.
        message: String,
    },
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Application root, e.g. `https://localhost:7236`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed development certificates.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Creates a configuration with default timeout and strict TLS.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Validates the base address and returns it without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the address is not an
    /// absolute `http`/`https` URL without query or fragment.
    pub fn normalized_base_url(&self) -> Result<String, ClientError> {
        let parsed = Url::parse(self.base_url.trim())
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{}: {err}", self.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ClientError::InvalidBaseUrl(
                "base url must not carry a query or fragment".to_string(),
            ));
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}

// ============================================================================
// SECTION: Exchange Types
// ============================================================================

/// Observed result of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    /// Client-local sequence number.
    pub sequence: u64,
    /// Route that was requested.
    pub route: EventRoute,
    /// Request path.
    pub path: String,
    /// Final status after redirects.
    pub status: u16,
    /// Final URL after redirects.
    pub final_url: String,
    /// Response body, decoded lossily as UTF-8.
    pub body: String,
    /// Wall-clock duration.
    pub elapsed: Duration,
}

impl HttpExchange {
    /// Returns true when the status matches the route's expected status.
    #[must_use]
    pub fn matches_expected(&self) -> bool {
        self.status == self.route.expected_status()
    }

    /// Returns true when the exchange ended on a different path than requested.
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        Url::parse(&self.final_url).is_ok_and(|url| url.path() != self.path)
    }
}

/// Transcript entry for one exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Client-local sequence number.
    pub sequence: u64,
    /// Route label.
    pub route: &'static str,
    /// HTTP method.
    pub method: &'static str,
    /// Request path.
    pub path: String,
    /// Posted form fields, in order.
    pub form: Vec<(String, String)>,
    /// Final status when a response arrived.
    pub status: Option<u16>,
    /// Final URL after redirects.
    pub final_url: Option<String>,
    /// Error message when the exchange failed.
    pub error: Option<String>,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u128,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Event HTTP client with transcript capture.
#[derive(Clone)]
pub struct EventmiHttpClient {
    /// Normalized application root.
    base_url: String,
    /// Underlying HTTP client.
    client: Client,
    /// Next sequence number.
    sequence: Arc<AtomicU64>,
    /// Recorded exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
    /// Request audit sink.
    audit: Arc<dyn RequestAuditSink>,
}

impl EventmiHttpClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the base address is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.normalized_base_url()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self::new_with_client(base_url, client))
    }

    /// Creates a client from an existing reqwest client.
    ///
    /// `base_url` is used verbatim and must not end with a slash.
    #[must_use]
    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            base_url,
            client,
            sequence: Arc::new(AtomicU64::new(0)),
            transcript: Arc::new(Mutex::new(Vec::new())),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Attaches an audit sink for exchange logging.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn RequestAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the normalized application root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// GET `/Event/All`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn list_events(&self) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::All, None).await
    }

    /// GET `/Event/Add`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn add_page(&self) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::AddPage, None).await
    }

    /// POST `/Event/Add` with the given form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the form cannot be encoded or the exchange fails.
    pub async fn add_event(&self, form: &EventForm) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::AddSubmit, Some(form)).await
    }

    /// GET `/Event/Details/{id}`, or `/Event/Details/` when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn details(&self, id: Option<EventId>) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::Details(id), None).await
    }

    /// GET `/Event/Edit/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn edit_page(&self, id: EventId) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::EditPage(id), None).await
    }

    /// POST `/Event/Edit/{id}` with the given form.
    ///
    /// The posted `Id` comes from the form and may differ from `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the form cannot be encoded or the exchange fails.
    pub async fn edit_event(
        &self,
        id: EventId,
        form: &EventForm,
    ) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::EditSubmit(id), Some(form)).await
    }

    /// POST `/Event/Delete/{id}`, or `/Event/Delete/` when `id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the exchange fails.
    pub async fn delete_event(&self, id: Option<EventId>) -> Result<HttpExchange, ClientError> {
        self.send(EventRoute::Delete(id), None).await
    }

    /// Sends one request for `route`, with a form body when given.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the form cannot be encoded or the exchange fails.
    pub async fn send(
        &self,
        route: EventRoute,
        form: Option<&EventForm>,
    ) -> Result<HttpExchange, ClientError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let path = route.path();
        let method = route.method();
        let pairs = form.map(EventForm::to_pairs).transpose()?.unwrap_or_default();
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        let mut request_bytes = 0;
        if form.is_some() {
            let body = encode_form(&pairs);
            request_bytes = body.len();
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let started = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let final_url = response.url().to_string();
                response
                    .bytes()
                    .await
                    .map(|bytes| (status, final_url, String::from_utf8_lossy(&bytes).into_owned()))
                    .map_err(|err| ClientError::Body {
                        method: method.as_str(),
                        path: path.clone(),
                        message: err.to_string(),
                    })
            }
            Err(err) => Err(ClientError::Transport {
                method: method.as_str(),
                path: path.clone(),
                message: err.to_string(),
            }),
        };
        let elapsed = started.elapsed();

        let (status, final_url, response_bytes, error) = match &outcome {
            Ok((status, final_url, body)) => {
                (Some(*status), Some(final_url.clone()), body.len(), None)
            }
            Err(err) => (None, None, 0, Some(err.to_string())),
        };
        self.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
            sequence,
            route: route.label(),
            method: method.as_str(),
            path: path.clone(),
            status,
            elapsed_ms: elapsed.as_millis(),
            request_bytes,
            response_bytes,
            error: error.clone(),
        }));
        self.record_transcript(TranscriptEntry {
            sequence,
            route: route.label(),
            method: method.as_str(),
            path: path.clone(),
            form: pairs.into_iter().map(|(name, value)| (name.to_string(), value)).collect(),
            status,
            final_url,
            error,
            elapsed_ms: elapsed.as_millis(),
        });

        let (status, final_url, body) = outcome?;
        Ok(HttpExchange {
            sequence,
            route,
            path,
            status,
            final_url,
            body,
            elapsed,
        })
    }

    /// Appends a transcript entry.
    fn record_transcript(&self, entry: TranscriptEntry) {
        if let Ok(mut guard) = self.transcript.lock() {
            guard.push(entry);
        }
    }
}

/// Encodes form pairs as `application/x-www-form-urlencoded`.
fn encode_form(pairs: &[(&'static str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}
