//! HttpAnalysisClient - REST implementation of [`AnalysisApi`].
//!
//! The single point of HTTP egress: one `reqwest::Client` with the fixed
//! request timeout, every route resolved under `<target>/api`, and every
//! failure passed through [`crate::normalize`]. Nothing here retries.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use roadcost_core::config::REQUEST_TIMEOUT;
use roadcost_core::{
    AnalysisApi, AnalysisSummary, AnalysisTrigger, ClientConfig, DocumentId, DocumentRecord,
    FileUpload, Page, Result, RoadcostError, UploadReceipt,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::normalize::{normalize_failure, normalize_transport};

/// Client for the analysis service.
#[derive(Clone, Debug)]
pub struct HttpAnalysisClient {
    client: Client,
    api_base: Url,
}

impl HttpAnalysisClient {
    /// Creates a client for the target in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base()).map_err(|e| {
            RoadcostError::config(format!("Invalid API target '{}': {}", config.api_target, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(RoadcostError::config(format!(
                "API target '{}' cannot carry a path",
                config.api_target
            )));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RoadcostError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base })
    }

    /// The resolved `<target>/api` base.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| RoadcostError::config("API base cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and turns any non-2xx status into a normalized error.
    async fn send(&self, request: RequestBuilder, route: &str) -> Result<Response> {
        tracing::debug!(route, "dispatching request");

        let response = request.send().await.map_err(|e| {
            tracing::debug!(route, error = %e, "request failed before a response arrived");
            normalize_transport(&e)
        })?;

        let status = response.status();
        tracing::debug!(route, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(normalize_failure(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await.map_err(|e| normalize_transport(&e))?;
        serde_json::from_slice(&body).map_err(|e| {
            RoadcostError::decode(format!("Failed to parse service response: {e}"))
        })
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn upload(&self, file: &FileUpload) -> Result<UploadReceipt> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| RoadcostError::transport(format!("Invalid MIME type: {e}")))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&["upload"])?;
        let request = self.client.post(url).multipart(form);
        let response = self.send(request, "POST /upload").await?;
        Self::decode(response).await
    }

    async fn fetch_summary(&self, document_id: &DocumentId) -> Result<AnalysisSummary> {
        let url = self.endpoint(&["documents", document_id.as_str(), "analysis"])?;
        let response = self
            .send(self.client.get(url), "GET /documents/{id}/analysis")
            .await?;
        let summary: AnalysisSummary = Self::decode(response).await?;
        summary.validate()?;
        Ok(summary)
    }

    fn report_url(&self, document_id: &DocumentId) -> String {
        match self.endpoint(&["documents", document_id.as_str(), "report"]) {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}/documents/{}/report",
                self.api_base.as_str().trim_end_matches('/'),
                document_id
            ),
        }
    }

    async fn document(&self, document_id: &DocumentId) -> Result<DocumentRecord> {
        let url = self.endpoint(&["documents", document_id.as_str()])?;
        let response = self.send(self.client.get(url), "GET /documents/{id}").await?;
        Self::decode(response).await
    }

    async fn list_documents(&self, page: Page) -> Result<Vec<DocumentRecord>> {
        let url = self.endpoint(&["documents"])?;
        let request = self
            .client
            .get(url)
            .query(&[("skip", page.skip), ("limit", page.limit)]);
        let response = self.send(request, "GET /documents").await?;
        Self::decode(response).await
    }

    async fn trigger_analysis(&self, document_id: &DocumentId) -> Result<AnalysisTrigger> {
        let url = self.endpoint(&["documents", document_id.as_str(), "analyze"])?;
        let response = self
            .send(self.client.post(url), "POST /documents/{id}/analyze")
            .await?;
        Self::decode(response).await
    }

    async fn download_report(&self, document_id: &DocumentId, destination: &Path) -> Result<u64> {
        let url = self.endpoint(&["documents", document_id.as_str(), "report"])?;
        let response = self
            .send(self.client.get(url), "GET /documents/{id}/report")
            .await?;

        let written = match write_body(response, destination).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    tracing::warn!(path = %destination.display(), error = %remove_err, "failed to remove partial report");
                }
                return Err(err);
            }
        };

        tracing::info!(document_id = %document_id, bytes = written, path = %destination.display(), "report saved");
        Ok(written)
    }
}

/// Streams the response body into a new file at `destination`.
async fn write_body(response: Response, destination: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(destination).await?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| normalize_transport(&e))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
