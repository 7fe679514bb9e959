use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{RoleClassifier, ServiceError, ServiceTransport, CLASSIFY_ENDPOINT};
use crate::models::{Classification, RoleConfidence};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    classifications: Vec<RoleConfidence>,
}

/// POST /classify_resume
pub struct ClassifyClient {
    transport: ServiceTransport,
}

impl ClassifyClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl RoleClassifier for ClassifyClient {
    async fn classify(&self, text: &str) -> Result<Classification, ServiceError> {
        info!("Calling classify service ({} bytes)", text.len());

        let response: ClassifyResponse = self
            .transport
            .post_json(CLASSIFY_ENDPOINT, &ClassifyRequest { text })
            .await?;

        Ok(order_by_confidence(response.classifications))
    }
}

/// Clamps confidences into [0, 100] and sorts descending. The sort is stable so
/// ties keep the service's order.
fn order_by_confidence(mut roles: Classification) -> Classification {
    for entry in &mut roles {
        entry.confidence = if entry.confidence.is_finite() {
            entry.confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
    roles.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    roles
}
