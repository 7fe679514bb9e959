use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ServiceError, ServiceTransport, SkillGapAnalyzer, SKILL_GAP_ENDPOINT};

#[derive(Debug, Serialize)]
struct SkillGapRequest<'a> {
    role: &'a str,
    skills: &'a [String],
}

/// Raw skill-gap payload. Both fields are optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkillGapResponse {
    pub missing_skills: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
}

/// POST /skill_gap
pub struct SkillGapClient {
    transport: ServiceTransport,
}

impl SkillGapClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl SkillGapAnalyzer for SkillGapClient {
    async fn analyze(
        &self,
        role: &str,
        skills: &[String],
    ) -> Result<SkillGapResponse, ServiceError> {
        info!("Calling skill-gap service for role '{role}' ({} skills)", skills.len());

        self.transport
            .post_json(SKILL_GAP_ENDPOINT, &SkillGapRequest { role, skills })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sends_role_and_skills() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/skill_gap"))
            .and(body_json(json!({"role": "Backend Engineer", "skills": ["Python"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "role": "Backend Engineer",
                "missing_skills": ["go"],
                "recommendations": ["Consider adding go experience to your resume/projects."]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SkillGapClient::new(ServiceTransport::new(&server.uri(), None).unwrap());
        let response = client
            .analyze("Backend Engineer", &["Python".to_string()])
            .await
            .unwrap();
        assert_eq!(response.missing_skills, Some(vec!["go".to_string()]));
        assert_eq!(response.recommendations.map(|r| r.len()), Some(1));
    }

    #[tokio::test]
    async fn test_empty_object_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = SkillGapClient::new(ServiceTransport::new(&server.uri(), None).unwrap());
        let response = client.analyze("Role", &[]).await.unwrap();
        assert_eq!(response, SkillGapResponse::default());
    }

    #[tokio::test]
    async fn test_unsupported_role_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = SkillGapClient::new(ServiceTransport::new(&server.uri(), None).unwrap());
        let err = client.analyze("Astronaut", &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 400, .. }));
    }
}
