use crate::config::Config;
use crate::error::PipelineError;
use crate::payload::{decode_object, object_or_null, or_default};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Rewrite service code for a request without a `text` field
pub const CODE_MISSING_TEXT: i64 = 400;
/// Rewrite service code for an exhausted rate limit
pub const CODE_RATE_LIMITED: i64 = 429;

// Both reply shapes arrive with 200 OK. Members default (and accept null) so
// that a reply of one shape still decodes, with empty fields, as the other;
// required-field presence is checked separately.
#[derive(Debug, Default, Deserialize)]
struct SuccessReply {
    #[serde(default, deserialize_with = "object_or_null")]
    success: SuccessStatus,
    #[serde(default, deserialize_with = "object_or_null")]
    contents: SuccessContents,
}

#[derive(Debug, Default, Deserialize)]
struct SuccessStatus {
    #[serde(default, deserialize_with = "or_default")]
    total: i64,
}

#[derive(Debug, Default, Deserialize)]
struct SuccessContents {
    #[serde(default, deserialize_with = "or_default")]
    translated: String,
    #[serde(default, deserialize_with = "or_default")]
    text: String,
    #[serde(default, deserialize_with = "or_default")]
    translation: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorReply {
    #[serde(default, deserialize_with = "object_or_null")]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "or_default")]
    code: i64,
    #[serde(default, deserialize_with = "or_default")]
    message: String,
}

/// A successful rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub original_text: String,
    pub rewritten_text: String,
    pub scheme: String,
}

/// A structured rejection from the rewrite service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailure {
    pub code: i64,
    pub message: String,
}

impl TranslationFailure {
    /// Map the upstream code onto a caller-facing kind
    pub fn classify(&self) -> PipelineError {
        match self.code {
            CODE_MISSING_TEXT => PipelineError::TranslateMissingTextField,
            CODE_RATE_LIMITED => PipelineError::TranslateRateLimited,
            _ => PipelineError::TranslateInvalidPayload,
        }
    }
}

fn parse_success(body: &[u8]) -> Option<TranslationResult> {
    let reply: SuccessReply = decode_object(body).ok()?;
    if reply.contents.text.is_empty() {
        return None;
    }

    debug!("Rewrite service reported {} translation(s)", reply.success.total);

    Some(TranslationResult {
        original_text: reply.contents.text,
        rewritten_text: reply.contents.translated,
        scheme: reply.contents.translation,
    })
}

fn parse_failure(body: &[u8]) -> Option<TranslationFailure> {
    let reply: ErrorReply = decode_object(body).ok()?;
    if reply.error.message.is_empty() {
        return None;
    }

    Some(TranslationFailure {
        code: reply.error.code,
        message: reply.error.message,
    })
}

/// Decode a rewrite-service body.
///
/// The success shape is tried first and counts only when `contents.text` is
/// non-empty; otherwise the error shape is tried and counts only when
/// `error.message` is non-empty. Either shape must be a JSON object (or
/// `null`). A body matching neither is `TranslateInvalidPayload`.
pub fn parse_translation(body: &[u8]) -> Result<TranslationResult, PipelineError> {
    if let Some(result) = parse_success(body) {
        return Ok(result);
    }

    match parse_failure(body) {
        Some(failure) => {
            warn!(
                "Rewrite service rejected request (code {}): {}",
                failure.code, failure.message
            );
            Err(failure.classify())
        }
        None => Err(PipelineError::TranslateInvalidPayload),
    }
}

/// Client for the rewrite service
#[derive(Debug, Clone)]
pub struct Translator {
    url: String,
    timeout: Duration,
}

impl Translator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.translate_url.clone(), config.upstream_timeout)
    }

    /// Rewrite `text` and return the full result
    pub async fn translate_full(&self, text: &str) -> Result<TranslationResult, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client for rewrite service: {}", e);
                PipelineError::TranslateFetchFailed
            })?;

        // .form() sets Content-Type: application/x-www-form-urlencoded
        let response = client
            .post(&self.url)
            .form(&[("text", text)])
            .send()
            .await
            .map_err(|e| {
                warn!("Rewrite service request failed: {}", e);
                PipelineError::TranslateFetchFailed
            })?;

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read rewrite service reply: {}", e);
            PipelineError::TranslateReadFailed
        })?;

        parse_translation(&body)
    }

    /// Rewrite `text` and return only the rewritten text
    pub async fn translate(&self, text: &str) -> Result<String, PipelineError> {
        self.translate_full(text).await.map(|r| r.rewritten_text)
    }
}
