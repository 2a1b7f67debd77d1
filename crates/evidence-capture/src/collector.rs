//! One capture attempt, end to end.

use chrono::Utc;
use shared_types::{Evidence, ImageDisclosure};

use crate::capture::PageCapture;
use crate::session::EvidenceStore;
use crate::signals;
use crate::vision::DisclosureVision;

/// Run a full capture attempt against `url` and fold everything — including
/// collaborator failures — into one [`Evidence`].
///
/// Never fails: a navigation error or timeout produces an evidence record
/// with `capture_error` set and every signal field empty, so classification
/// can still run. Vision problems land in `image_analysis_error`.
pub async fn collect_evidence(
    capture: &dyn PageCapture,
    vision: Option<&dyn DisclosureVision>,
    store: &EvidenceStore,
    url: &str,
) -> Evidence {
    let captured_at = Utc::now();
    let mut evidence = Evidence::empty(url, captured_at);

    let snapshot = match capture.capture(url).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(url, error = %e, "capture failed");
            evidence.capture_error = Some(e.to_string());
            write_sidecar(store, url, captured_at, &evidence);
            return evidence;
        }
    };

    let signals = signals::scan(&snapshot.html);
    evidence.page_title = signals.title;
    evidence.page_text = signals.body_text;
    evidence.meta_description = signals.meta_description;
    evidence.author = signals.author;
    evidence.has_text_disclosure = signals.has_text_disclosure;
    evidence.affiliate_indicators = signals.affiliate_indicators;

    if let Some(png) = &snapshot.screenshot_png {
        match store
            .capture_dir(url, captured_at)
            .and_then(|dir| store.write_screenshot(&dir, url, captured_at, png))
        {
            Ok(path) => evidence.screenshot_path = Some(path),
            Err(e) => {
                tracing::warn!(url, error = %e, "screenshot write failed");
                evidence.capture_error = Some(format!("screenshot not stored: {e}"));
            }
        }
    }

    evidence = analyze_image(vision, snapshot.screenshot_png.as_deref(), evidence).await;

    write_sidecar(store, url, captured_at, &evidence);
    evidence
}

/// Attach image-analysis results, or the reason they are absent.
async fn analyze_image(
    vision: Option<&dyn DisclosureVision>,
    png: Option<&[u8]>,
    mut evidence: Evidence,
) -> Evidence {
    let Some(png) = png else {
        evidence.image_analysis_error =
            Some("image analysis skipped: no screenshot captured".to_string());
        return evidence;
    };

    let Some(vision) = vision else {
        evidence.image_analysis_error =
            Some("image analysis not performed: no vision service configured".to_string());
        return evidence;
    };

    match vision.analyze(png).await {
        Ok(finding) => {
            evidence.image_disclosure = Some(ImageDisclosure {
                found: finding.found,
                details: finding.disclosures.iter().map(|d| d.display()).collect(),
                confidence: finding.confidence,
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, "image analysis failed");
            evidence.image_analysis_error = Some(e.to_string());
        }
    }
    evidence
}

fn write_sidecar(
    store: &EvidenceStore,
    url: &str,
    captured_at: chrono::DateTime<Utc>,
    evidence: &Evidence,
) {
    if let Err(e) = store
        .capture_dir(url, captured_at)
        .and_then(|dir| store.write_metadata(&dir, evidence))
    {
        tracing::warn!(url, error = %e, "metadata sidecar write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PageSnapshot;
    use crate::vision::{VisionDisclosure, VisionError, VisionFinding};
    use crate::CaptureFailure;
    use async_trait::async_trait;
    use shared_types::Confidence;

    struct CannedCapture {
        html: &'static str,
        screenshot: Option<Vec<u8>>,
    }

    #[async_trait]
    impl PageCapture for CannedCapture {
        async fn capture(&self, url: &str) -> Result<PageSnapshot, CaptureFailure> {
            Ok(PageSnapshot {
                final_url: url.to_string(),
                html: self.html.to_string(),
                screenshot_png: self.screenshot.clone(),
            })
        }
    }

    struct FailingCapture;

    #[async_trait]
    impl PageCapture for FailingCapture {
        async fn capture(&self, _url: &str) -> Result<PageSnapshot, CaptureFailure> {
            Err(CaptureFailure::Timeout(crate::CAPTURE_TIMEOUT))
        }
    }

    struct StickerVision;

    #[async_trait]
    impl DisclosureVision for StickerVision {
        async fn analyze(&self, _png: &[u8]) -> Result<VisionFinding, VisionError> {
            Ok(VisionFinding {
                found: true,
                disclosures: vec![VisionDisclosure {
                    kind: "sticker".to_string(),
                    content: "광고".to_string(),
                    location: "top".to_string(),
                    visibility: "small".to_string(),
                }],
                confidence: Confidence::Low,
            })
        }
    }

    struct BrokenVision;

    #[async_trait]
    impl DisclosureVision for BrokenVision {
        async fn analyze(&self, _png: &[u8]) -> Result<VisionFinding, VisionError> {
            Err(VisionError::Malformed("no candidate text".to_string()))
        }
    }

    fn test_store(name: &str) -> EvidenceStore {
        EvidenceStore::at(std::env::temp_dir().join(format!("collector-test-{name}")))
    }

    const AFFILIATE_HTML: &str = r#"<html><body>
        <a href="https://shop.example.com/x?aff_id=1">구매하기</a>
    </body></html>"#;

    #[tokio::test]
    async fn failed_capture_yields_degraded_evidence() {
        let store = test_store("failed");
        let evidence =
            collect_evidence(&FailingCapture, None, &store, "https://example.com/p").await;
        assert!(evidence.capture_error.is_some());
        assert!(evidence.affiliate_indicators.is_empty());
        assert!(!evidence.has_text_disclosure);
    }

    #[tokio::test]
    async fn scans_signals_from_snapshot() {
        let store = test_store("signals");
        let capture = CannedCapture {
            html: AFFILIATE_HTML,
            screenshot: None,
        };
        let evidence =
            collect_evidence(&capture, None, &store, "https://blog.example.com/p/1").await;
        assert_eq!(evidence.affiliate_indicators.len(), 2);
        assert!(evidence.capture_error.is_none());
        assert!(evidence
            .image_analysis_error
            .as_deref()
            .unwrap()
            .contains("no screenshot"));
    }

    #[tokio::test]
    async fn vision_findings_are_attached() {
        let store = test_store("vision");
        let capture = CannedCapture {
            html: AFFILIATE_HTML,
            screenshot: Some(vec![0x89, 0x50, 0x4E, 0x47]),
        };
        let evidence = collect_evidence(
            &capture,
            Some(&StickerVision),
            &store,
            "https://blog.example.com/p/2",
        )
        .await;
        let image = evidence.image_disclosure.expect("image disclosure");
        assert!(image.found);
        assert_eq!(image.confidence, Confidence::Low);
        assert_eq!(
            image.details,
            vec!["[sticker] 광고 (location: top, visibility: small)".to_string()]
        );
        assert!(evidence.screenshot_path.is_some());
    }

    #[tokio::test]
    async fn vision_failure_is_a_note_not_an_error() {
        let store = test_store("broken-vision");
        let capture = CannedCapture {
            html: AFFILIATE_HTML,
            screenshot: Some(vec![1, 2, 3]),
        };
        let evidence = collect_evidence(
            &capture,
            Some(&BrokenVision),
            &store,
            "https://blog.example.com/p/3",
        )
        .await;
        assert!(evidence.image_disclosure.is_none());
        assert!(evidence
            .image_analysis_error
            .as_deref()
            .unwrap()
            .contains("malformed"));
        // Signals from the text scan are unaffected.
        assert!(!evidence.affiliate_indicators.is_empty());
    }
}
