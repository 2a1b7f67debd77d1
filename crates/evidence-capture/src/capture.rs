//! The page-capture collaborator boundary.

use std::time::Duration;

use async_trait::async_trait;

use crate::CaptureFailure;

/// Hard budget for one page load. A capture either completes within this
/// window or returns [`CaptureFailure::Timeout`]; there is no mid-capture
/// cancellation, a newer capture simply supersedes the session state once it
/// finishes.
pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Desktop user-agent presented to the target page.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// What one capture attempt observed.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// URL after redirects.
    pub final_url: String,
    /// Raw document markup.
    pub html: String,
    /// Full-page screenshot, when the collaborator can draw one. Plain HTTP
    /// capture cannot; browser-based implementations fill this after a short
    /// settle delay (~2 s) once the page reports idle.
    pub screenshot_png: Option<Vec<u8>>,
}

/// A collaborator that can load a suspect URL and report what it saw.
#[async_trait]
pub trait PageCapture: Send + Sync {
    async fn capture(&self, url: &str) -> Result<PageSnapshot, CaptureFailure>;
}

/// reqwest-backed capture: fetches the document over HTTP with a desktop
/// user-agent. Produces no screenshot.
pub struct HttpCapture {
    client: reqwest::Client,
}

impl HttpCapture {
    pub fn new() -> Result<Self, CaptureFailure> {
        let client = reqwest::Client::builder()
            .timeout(CAPTURE_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageCapture for HttpCapture {
    async fn capture(&self, url: &str) -> Result<PageSnapshot, CaptureFailure> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(CaptureFailure::Timeout(CAPTURE_TIMEOUT)),
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(CaptureFailure::Navigation(format!(
                "{url} returned {status}"
            )));
        }

        let final_url = response.url().to_string();
        let html = match response.text().await {
            Ok(html) => html,
            Err(e) if e.is_timeout() => return Err(CaptureFailure::Timeout(CAPTURE_TIMEOUT)),
            Err(e) => return Err(e.into()),
        };

        Ok(PageSnapshot {
            final_url,
            html,
            screenshot_png: None,
        })
    }
}
