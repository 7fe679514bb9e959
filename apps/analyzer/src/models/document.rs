use bytes::Bytes;

const OCTET_STREAM: &str = "application/octet-stream";

/// Extension → media type table used when the uploader declares nothing useful.
const KNOWN_MEDIA_TYPES: &[(&str, &str)] = &[
    (".pdf", "application/pdf"),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".doc", "application/msword"),
    (".txt", "text/plain"),
];

/// A submitted document. Immutable once accepted; the pipeline only reads it.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    content: Bytes,
    media_type: String,
}

impl Document {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>, declared: Option<&str>) -> Self {
        let name = name.into();
        let media_type = resolve_media_type(&name, declared);
        Self {
            name,
            content: content.into(),
            media_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// Keeps the declared media type unless it is missing or the generic octet-stream,
/// in which case the file extension decides.
fn resolve_media_type(name: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() && declared != OCTET_STREAM => {
            declared.to_string()
        }
        _ => {
            let lower = name.to_lowercase();
            KNOWN_MEDIA_TYPES
                .iter()
                .find(|(ext, _)| lower.ends_with(ext))
                .map(|(_, media_type)| media_type.to_string())
                .unwrap_or_else(|| OCTET_STREAM.to_string())
        }
    }
}
