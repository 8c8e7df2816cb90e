use crate::config::Config;
use crate::error::PipelineError;
use crate::payload::{decode_object, object_or_null, objects_or_null, or_default};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Only entries in this language are ever selected
pub const TARGET_LANGUAGE: &str = "en";

// Reference service payload ("pokemon-species" shape). Every member is
// optional and may be null; unknown members are ignored.
#[derive(Debug, Default, Deserialize)]
struct SpeciesResponse {
    #[serde(default, deserialize_with = "objects_or_null")]
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct FlavorTextEntry {
    #[serde(default, deserialize_with = "or_default")]
    flavor_text: String,
    #[serde(default, deserialize_with = "object_or_null")]
    language: EntryLanguage,
}

#[derive(Debug, Default, Deserialize)]
struct EntryLanguage {
    #[serde(default, deserialize_with = "or_default")]
    id: i64,
    #[serde(default, deserialize_with = "or_default")]
    name: String,
}

/// One language variant of a subject's description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    pub text: String,
    pub language_code: String,
    pub language_id: i64,
}

impl FlavorTextEntry {
    fn into_localized(self) -> LocalizedText {
        LocalizedText {
            text: self.flavor_text,
            language_code: self.language.name,
            language_id: self.language.id,
        }
    }
}

/// Decode a reference-service body into its localized entries, in list order.
///
/// The body must be a JSON object (or `null`); one without an entry list
/// decodes to an empty list. Anything else, including arrays and scalars, is
/// `DescribeInvalidPayload`.
pub fn parse_entries(body: &[u8]) -> Result<Vec<LocalizedText>, PipelineError> {
    let reply: SpeciesResponse =
        decode_object(body).map_err(|_| PipelineError::DescribeInvalidPayload)?;

    Ok(reply
        .flavor_text_entries
        .into_iter()
        .map(FlavorTextEntry::into_localized)
        .collect())
}

/// First entry whose language code equals `language`
pub fn select_language<'a>(
    entries: &'a [LocalizedText],
    language: &str,
) -> Option<&'a LocalizedText> {
    entries.iter().find(|e| e.language_code == language)
}

/// Parse a reference-service body and return the English text verbatim
pub fn parse_description(body: &[u8]) -> Result<String, PipelineError> {
    let entries = parse_entries(body)?;

    select_language(&entries, TARGET_LANGUAGE)
        .map(|e| e.text.clone())
        .ok_or(PipelineError::DescribeLanguageUnavailable)
}

/// Client for the reference service
#[derive(Debug, Clone)]
pub struct Describer {
    base_url: String,
    timeout: Duration,
}

impl Describer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.describe_base_url.clone(), config.upstream_timeout)
    }

    /// URL queried for a subject. The name is appended as-is.
    pub fn url_for(&self, subject: &str) -> String {
        format!("{}{}", self.base_url, subject)
    }

    /// Fetch the English description of `subject`.
    ///
    /// The HTTP status is not inspected: the reference service's verdict is
    /// taken from the body alone.
    pub async fn describe(&self, subject: &str) -> Result<String, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                warn!("Failed to build HTTP client for reference service: {}", e);
                PipelineError::DescribeFetchFailed
            })?;

        let url = self.url_for(subject);
        let response = client.get(&url).send().await.map_err(|e| {
            warn!("Reference service request failed for {}: {}", url, e);
            PipelineError::DescribeFetchFailed
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Reference service replied {} for {}", status, url);
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read reference service reply for {}: {}", url, e);
            PipelineError::DescribeReadFailed
        })?;

        parse_description(&body)
    }
}
