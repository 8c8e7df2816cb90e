//! Describe-then-translate pipeline.
//!
//! `Pipeline::handle` runs one request through both stages and always
//! produces a `Reply`; failures end up in `Reply::result`, never as an `Err`.

use crate::config::Config;
use crate::describer::Describer;
use crate::error::PipelineError;
use crate::translator::Translator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const COMPLETED_TEXT: &str = "Conversion completed.";

/// Turns a subject name into a description, and a description into its
/// rewritten form
#[async_trait]
pub trait DescriptionService: Send + Sync {
    async fn describe(&self, subject: &str) -> Result<String, PipelineError>;
    async fn translate(&self, text: &str) -> Result<String, PipelineError>;
}

/// `DescriptionService` backed by the two HTTP upstreams
#[derive(Debug, Clone)]
pub struct HttpDescriptionService {
    describer: Describer,
    translator: Translator,
}

impl HttpDescriptionService {
    pub fn new(describer: Describer, translator: Translator) -> Self {
        Self {
            describer,
            translator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Describer::from_config(config), Translator::from_config(config))
    }
}

#[async_trait]
impl DescriptionService for HttpDescriptionService {
    async fn describe(&self, subject: &str) -> Result<String, PipelineError> {
        self.describer.describe(subject).await
    }

    async fn translate(&self, text: &str) -> Result<String, PipelineError> {
        self.translator.translate(text).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyStatus {
    pub success: bool,
    pub text: String,
}

/// The JSON body returned for every inbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub name: String,
    pub description: String,
    pub result: ReplyStatus,
}

impl Reply {
    pub fn completed(name: &str, description: String) -> Self {
        Self {
            name: name.to_string(),
            description,
            result: ReplyStatus {
                success: true,
                text: COMPLETED_TEXT.to_string(),
            },
        }
    }

    pub fn failed(name: &str, error: PipelineError) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            result: ReplyStatus {
                success: false,
                text: error.to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct Pipeline {
    service: Arc<dyn DescriptionService>,
}

impl Pipeline {
    pub fn new(service: Arc<dyn DescriptionService>) -> Self {
        Self { service }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpDescriptionService::from_config(config)))
    }

    /// Describe then translate, stopping at the first failure
    pub async fn handle(&self, subject: &str) -> Reply {
        match self.run(subject).await {
            Ok(rewritten) => {
                info!("✓ Converted '{}'", subject);
                Reply::completed(subject, rewritten)
            }
            Err(e) => {
                warn!(
                    "✗ Conversion of '{}' failed at {} stage ({}): {}",
                    subject,
                    e.stage(),
                    e.id(),
                    e
                );
                Reply::failed(subject, e)
            }
        }
    }

    async fn run(&self, subject: &str) -> Result<String, PipelineError> {
        info!("Describing '{}'", subject);
        let description = self.service.describe(subject).await?;

        info!("Translating description of '{}' ({} chars)", subject, description.len());
        self.service.translate(&description).await
    }
}
