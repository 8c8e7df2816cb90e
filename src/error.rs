//! Caller-facing failure kinds for the describe/translate pipeline.
//!
//! Every low-level failure (transport, body read, payload shape, upstream
//! error codes) is folded into one of these kinds. The `Display` text is what
//! ends up in the reply's `result.text`, so it is fixed per kind and never
//! includes upstream wording.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Cannot GET description")]
    DescribeFetchFailed,

    #[error("Cannot read description")]
    DescribeReadFailed,

    #[error("Invalid description or N/A")]
    DescribeInvalidPayload,

    #[error("Language not supported")]
    DescribeLanguageUnavailable,

    #[error("Cannot fetch translation")]
    TranslateFetchFailed,

    #[error("Cannot read translation")]
    TranslateReadFailed,

    #[error("Invalid translation or N/A")]
    TranslateInvalidPayload,

    #[error("Missing 'text' field")]
    TranslateMissingTextField,

    #[error("Too Many Requests")]
    TranslateRateLimited,
}

impl PipelineError {
    /// Stable numeric identifier (1xx describe stage, 2xx translate stage)
    pub fn id(&self) -> u16 {
        match self {
            PipelineError::DescribeFetchFailed => 100,
            PipelineError::DescribeReadFailed => 101,
            PipelineError::DescribeInvalidPayload => 102,
            PipelineError::DescribeLanguageUnavailable => 103,
            PipelineError::TranslateFetchFailed => 200,
            PipelineError::TranslateReadFailed => 201,
            PipelineError::TranslateInvalidPayload => 202,
            PipelineError::TranslateMissingTextField => 203,
            PipelineError::TranslateRateLimited => 204,
        }
    }

    /// Which pipeline stage produced this error
    pub fn stage(&self) -> &'static str {
        if self.id() < 200 {
            "describe"
        } else {
            "translate"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PipelineError; 9] = [
        PipelineError::DescribeFetchFailed,
        PipelineError::DescribeReadFailed,
        PipelineError::DescribeInvalidPayload,
        PipelineError::DescribeLanguageUnavailable,
        PipelineError::TranslateFetchFailed,
        PipelineError::TranslateReadFailed,
        PipelineError::TranslateInvalidPayload,
        PipelineError::TranslateMissingTextField,
        PipelineError::TranslateRateLimited,
    ];

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u16> = ALL.iter().map(|e| e.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn test_messages_are_fixed() {
        assert_eq!(
            PipelineError::DescribeLanguageUnavailable.to_string(),
            "Language not supported"
        );
        assert_eq!(
            PipelineError::TranslateRateLimited.to_string(),
            "Too Many Requests"
        );
        assert_eq!(
            PipelineError::TranslateMissingTextField.to_string(),
            "Missing 'text' field"
        );
    }

    #[test]
    fn test_stage_follows_id_range() {
        for err in ALL {
            match err.id() {
                100..=199 => assert_eq!(err.stage(), "describe"),
                200..=299 => assert_eq!(err.stage(), "translate"),
                other => panic!("unexpected id {}", other),
            }
        }
    }

    #[test]
    fn test_compared_by_kind() {
        assert_eq!(
            PipelineError::DescribeFetchFailed,
            PipelineError::DescribeFetchFailed
        );
        assert_ne!(
            PipelineError::DescribeFetchFailed,
            PipelineError::TranslateFetchFailed
        );
    }
}
