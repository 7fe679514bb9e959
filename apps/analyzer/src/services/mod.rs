//! Remote service clients: one thin request/response wrapper per remote capability.
//!
//! Each capability sits behind a trait so the orchestrator can be driven by
//! in-memory fakes in tests. The HTTP implementations share one `ServiceTransport`
//! pointed at the configured base address.
//!
//! Clients never retry and never interpret error bodies: a non-success status is
//! simply "not successful". Whether that is fatal is the orchestrator's call.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::models::{Classification, Document};

pub mod ats;
pub mod classifier;
pub mod parser;
pub mod skill_gap;
pub mod transport;

pub use ats::{AtsClient, AtsResponse};
pub use classifier::ClassifyClient;
pub use parser::{ParseClient, ParseResponse};
pub use skill_gap::{SkillGapClient, SkillGapResponse};
pub use transport::ServiceTransport;

pub const PARSE_ENDPOINT: &str = "/parse_resume";
pub const CLASSIFY_ENDPOINT: &str = "/classify_resume";
pub const SKILL_GAP_ENDPOINT: &str = "/skill_gap";
pub const ATS_SCORE_ENDPOINT: &str = "/ats_score";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Malformed response from {endpoint}: {message}")]
    Malformed {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned no text")]
    MissingText { endpoint: &'static str },
}

#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, document: &Document) -> Result<ParseResponse, ServiceError>;
}

#[async_trait]
pub trait RoleClassifier: Send + Sync {
    /// Returns roles ordered by descending confidence.
    async fn classify(&self, text: &str) -> Result<Classification, ServiceError>;
}

#[async_trait]
pub trait SkillGapAnalyzer: Send + Sync {
    async fn analyze(&self, role: &str, skills: &[String])
        -> Result<SkillGapResponse, ServiceError>;
}

#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AtsResponse, ServiceError>;
}

/// The four collaborators the orchestrator drives.
#[derive(Clone)]
pub struct ServiceClients {
    pub parser: Arc<dyn ResumeParser>,
    pub classifier: Arc<dyn RoleClassifier>,
    pub skill_gap: Arc<dyn SkillGapAnalyzer>,
    pub ats: Arc<dyn AtsScorer>,
}

impl ServiceClients {
    /// HTTP clients for all four capabilities, sharing one connection pool.
    pub fn http(config: &PipelineConfig) -> Result<Self, ServiceError> {
        let transport = ServiceTransport::new(&config.base_address, config.request_timeout)?;

        Ok(Self {
            parser: Arc::new(ParseClient::new(transport.clone())),
            classifier: Arc::new(ClassifyClient::new(transport.clone())),
            skill_gap: Arc::new(SkillGapClient::new(transport.clone())),
            ats: Arc::new(AtsClient::new(transport)),
        })
    }
}
