//! Image-based disclosure analysis collaborator.
//!
//! Some posts carry their advertising disclosure only as an image or sticker
//! the text scan cannot see. A vision service can report those; its absence
//! or failure degrades to a note on the evidence, never blocking text-based
//! classification.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use shared_types::Confidence;

/// Errors from the vision collaborator. All of them are recoverable: the
/// collector folds them into `Evidence::image_analysis_error`.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("no vision credential configured")]
    MissingCredential,

    #[error("screenshot file missing")]
    MissingImage,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed vision response: {0}")]
    Malformed(String),
}

/// One disclosure mark the service saw in the image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VisionDisclosure {
    /// Sticker, banner, text-in-image, watermark, other.
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub location: String,
    pub visibility: String,
}

impl VisionDisclosure {
    /// Display form carried on the evidence and quoted in documents.
    pub fn display(&self) -> String {
        format!(
            "[{}] {} (location: {}, visibility: {})",
            self.kind, self.content, self.location, self.visibility
        )
    }
}

/// The service's verdict for one screenshot.
#[derive(Debug, Clone)]
pub struct VisionFinding {
    pub found: bool,
    pub disclosures: Vec<VisionDisclosure>,
    pub confidence: Confidence,
}

/// A collaborator that can inspect a screenshot for disclosure marks.
#[async_trait]
pub trait DisclosureVision: Send + Sync {
    async fn analyze(&self, png: &[u8]) -> Result<VisionFinding, VisionError>;
}

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const PROMPT: &str = "Inspect this web page screenshot for advertising/sponsorship \
disclosure marks: stickers or badges reading AD / Sponsored / 광고 / 협찬, banner images \
containing disclosure wording, watermarks or overlays, and disclosure phrases rendered \
inside images rather than as text. Respond with JSON only, in the form \
{\"found\": bool, \"disclosures\": [{\"type\": \"sticker|banner|text-image|watermark|other\", \
\"content\": \"...\", \"location\": \"top|middle|bottom|sidebar\", \
\"visibility\": \"clear|small|unclear\"}], \"confidence\": \"high|medium|low\"}";

/// Gemini-backed [`DisclosureVision`] over the REST `generateContent` API.
pub struct GeminiVision {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiVision {
    /// Build from `GEMINI_API_KEY` or `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self, VisionError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| VisionError::MissingCredential)?;
        Ok(Self::new(api_key, GEMINI_ENDPOINT.to_string()))
    }

    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
        }
    }
}

#[async_trait]
impl DisclosureVision for GeminiVision {
    async fn analyze(&self, png: &[u8]) -> Result<VisionFinding, VisionError> {
        let payload = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    { "inline_data": { "mime_type": "image/png", "data": BASE64.encode(png) } },
                ]
            }]
        });

        let response = self
            .client
            .post(format!("{}?key={}", self.endpoint, self.api_key))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| VisionError::Malformed("no candidate text".to_string()))?;

        parse_finding(text)
    }
}

/// Parse the model's JSON reply, tolerating markdown code fences.
fn parse_finding(text: &str) -> Result<VisionFinding, VisionError> {
    #[derive(serde::Deserialize)]
    struct RawFinding {
        #[serde(default)]
        found: bool,
        #[serde(default)]
        disclosures: Vec<VisionDisclosure>,
        #[serde(default)]
        confidence: Option<String>,
    }

    let stripped = text.replace("```json", "").replace("```", "");
    let raw: RawFinding = serde_json::from_str(stripped.trim())
        .map_err(|e| VisionError::Malformed(e.to_string()))?;

    Ok(VisionFinding {
        found: raw.found,
        disclosures: raw.disclosures,
        confidence: raw
            .confidence
            .as_deref()
            .map(parse_confidence)
            .unwrap_or(Confidence::Unknown),
    })
}

/// Accepts both the English and Korean confidence labels the service emits.
fn parse_confidence(raw: &str) -> Confidence {
    match raw.trim().to_lowercase().as_str() {
        "high" | "높음" => Confidence::High,
        "medium" | "중간" => Confidence::Medium,
        "low" | "낮음" => Confidence::Low,
        _ => Confidence::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_fenced_response() {
        let reply = r#"```json
        {
          "found": true,
          "disclosures": [
            {"type": "sticker", "content": "광고", "location": "top", "visibility": "small"}
          ],
          "confidence": "low"
        }
        ```"#;
        let finding = parse_finding(reply).unwrap();
        assert!(finding.found);
        assert_eq!(finding.confidence, Confidence::Low);
        assert_eq!(
            finding.disclosures[0].display(),
            "[sticker] 광고 (location: top, visibility: small)"
        );
    }

    #[test]
    fn missing_fields_default_to_absent() {
        let finding = parse_finding(r#"{"found": false}"#).unwrap();
        assert!(!finding.found);
        assert!(finding.disclosures.is_empty());
        assert_eq!(finding.confidence, Confidence::Unknown);
    }

    #[test]
    fn korean_confidence_labels_are_understood() {
        assert_eq!(parse_confidence("높음"), Confidence::High);
        assert_eq!(parse_confidence("중간"), Confidence::Medium);
        assert_eq!(parse_confidence("낮음"), Confidence::Low);
        assert_eq!(parse_confidence("???"), Confidence::Unknown);
    }

    #[test]
    fn garbage_reply_is_malformed() {
        let result = parse_finding("the screenshot shows a product review");
        assert!(matches!(result, Err(VisionError::Malformed(_))));
    }

    #[test]
    fn from_env_requires_a_key() {
        if std::env::var("GEMINI_API_KEY").is_err() && std::env::var("GOOGLE_API_KEY").is_err() {
            assert!(matches!(
                GeminiVision::from_env(),
                Err(VisionError::MissingCredential)
            ));
        }
    }
}
