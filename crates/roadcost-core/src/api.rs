//! The seam between the application layer and the analysis service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::AnalysisSummary;
use crate::document::{DocumentId, DocumentRecord, FileUpload, UploadReceipt};
use crate::error::Result;

/// Paging window for `GET /api/documents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 50 }
    }
}

/// Acknowledgement of `POST /api/documents/{id}/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisTrigger {
    pub message: String,
    pub document_id: DocumentId,
}

/// Operations the remote analysis service offers.
///
/// Every failure arrives as a normalized [`crate::RoadcostError`]; no
/// implementation retries.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Submits a document as the multipart field `file`.
    async fn upload(&self, file: &FileUpload) -> Result<UploadReceipt>;

    /// Fetches the current analysis summary. The returned summary has
    /// already passed [`AnalysisSummary::validate`].
    async fn fetch_summary(&self, document_id: &DocumentId) -> Result<AnalysisSummary>;

    /// URL of the generated report. Built locally, never requested.
    fn report_url(&self, document_id: &DocumentId) -> String;

    /// Fetches the document record, including its processing status.
    async fn document(&self, document_id: &DocumentId) -> Result<DocumentRecord>;

    async fn list_documents(&self, page: Page) -> Result<Vec<DocumentRecord>>;

    /// Asks the service to run the analysis again for a processed document.
    async fn trigger_analysis(&self, document_id: &DocumentId) -> Result<AnalysisTrigger>;

    /// Streams the report bytes into `destination` unchanged and returns the
    /// number of bytes written.
    async fn download_report(&self, document_id: &DocumentId, destination: &Path) -> Result<u64>;
}
