use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AtsScorer, ServiceError, ServiceTransport, ATS_SCORE_ENDPOINT};

#[derive(Debug, Serialize)]
struct AtsRequest<'a> {
    resume_text: &'a str,
    job_description: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AtsResponse {
    pub ats_score: Option<f64>,
    pub suggestions: Option<Vec<String>>,
}

/// POST /ats_score
pub struct AtsClient {
    transport: ServiceTransport,
}

impl AtsClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AtsScorer for AtsClient {
    async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AtsResponse, ServiceError> {
        info!("Calling ATS scoring service");

        self.transport
            .post_json(
                ATS_SCORE_ENDPOINT,
                &AtsRequest {
                    resume_text,
                    job_description,
                },
            )
            .await
    }
}
