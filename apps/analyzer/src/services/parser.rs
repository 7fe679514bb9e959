use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use super::{ResumeParser, ServiceError, ServiceTransport, PARSE_ENDPOINT};
use crate::models::Document;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactPayload {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Parse response with `text` guaranteed; every other field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResponse {
    pub text: String,
    pub contact: Option<ContactPayload>,
    pub sections: Option<BTreeMap<String, String>>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WireParseResponse {
    text: Option<String>,
    contact: Option<ContactPayload>,
    sections: Option<BTreeMap<String, String>>,
    skills: Option<Vec<String>>,
}

impl TryFrom<WireParseResponse> for ParseResponse {
    type Error = ServiceError;

    fn try_from(wire: WireParseResponse) -> Result<Self, Self::Error> {
        let text = wire.text.ok_or(ServiceError::MissingText {
            endpoint: PARSE_ENDPOINT,
        })?;
        Ok(ParseResponse {
            text,
            contact: wire.contact,
            sections: wire.sections,
            skills: wire.skills,
        })
    }
}

/// POST /parse_resume uploads the raw document as multipart field `file`.
pub struct ParseClient {
    transport: ServiceTransport,
}

impl ParseClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }

    fn file_part(document: &Document) -> Part {
        let part = || Part::stream(document.content().clone()).file_name(document.name().to_string());
        // An unparseable declared type is dropped rather than failing the upload.
        part().mime_str(document.media_type()).unwrap_or_else(|_| part())
    }
}

#[async_trait]
impl ResumeParser for ParseClient {
    async fn parse(&self, document: &Document) -> Result<ParseResponse, ServiceError> {
        info!(
            "Calling parse service for {} ({} bytes, {})",
            document.name(),
            document.len(),
            document.media_type()
        );

        let form = Form::new().part("file", Self::file_part(document));
        let wire: WireParseResponse = self.transport.post_multipart(PARSE_ENDPOINT, form).await?;
        wire.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ParseClient {
        ParseClient::new(ServiceTransport::new(&server.uri(), None).unwrap())
    }

    fn document() -> Document {
        Document::new("cv.txt", b"John Doe, Engineer".to_vec(), Some("text/plain"))
    }

    #[tokio::test]
    async fn test_uploads_file_field_and_decodes_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse_resume"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"cv.txt\""))
            .and(body_string_contains("John Doe, Engineer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "John Doe, Engineer",
                "contact": {"email": "john@example.com", "phone": "555 123 4567"},
                "sections": {"skills": "Python"},
                "skills": ["Python"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let parsed = client(&server).parse(&document()).await.unwrap();
        assert_eq!(parsed.text, "John Doe, Engineer");
        assert_eq!(parsed.skills, Some(vec!["Python".to_string()]));
        assert_eq!(
            parsed.contact.unwrap().email.as_deref(),
            Some("john@example.com")
        );
        assert_eq!(parsed.sections.unwrap()["skills"], "Python");
    }

    #[tokio::test]
    async fn test_repeated_uploads_share_document_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/parse_resume"))
            .and(body_string_contains("John Doe, Engineer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "ok"})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client(&server);
        let document = document();
        client.parse(&document).await.unwrap();
        client.parse(&document).await.unwrap();
        assert_eq!(document.content().as_ref(), b"John Doe, Engineer");
    }

    #[tokio::test]
    async fn test_optional_fields_may_be_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": ""})))
            .mount(&server)
            .await;

        let parsed = client(&server).parse(&document()).await.unwrap();
        assert_eq!(parsed.text, "");
        assert!(parsed.contact.is_none());
        assert!(parsed.sections.is_none());
        assert!(parsed.skills.is_none());
    }

    #[tokio::test]
    async fn test_missing_text_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"skills": ["Go"]})))
            .mount(&server)
            .await;

        let err = client(&server).parse(&document()).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingText { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).parse(&document()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 500, .. }));
    }
}
