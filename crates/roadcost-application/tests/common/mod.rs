#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use roadcost_core::{
    AnalysisApi, AnalysisSummary, AnalysisTrigger, DocumentId, DocumentRecord, DocumentStatus,
    FileUpload, Page, Result, RoadcostError, UploadReceipt,
};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// In-memory analysis service with scripted responses.
///
/// Uploads are answered by file name, summaries by document id. A gate
/// installed with [`MockAnalysisApi::gate`] holds the matching call until
/// the returned sender fires (or is dropped).
#[derive(Default)]
pub struct MockAnalysisApi {
    uploads: Mutex<HashMap<String, Result<UploadReceipt>>>,
    summaries: Mutex<HashMap<String, Result<AnalysisSummary>>>,
    statuses: Mutex<VecDeque<Result<DocumentRecord>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    upload_calls: Mutex<Vec<String>>,
    summary_calls: Mutex<Vec<DocumentId>>,
    status_calls: Mutex<usize>,
}

impl MockAnalysisApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_upload(&self, file_name: &str, id: u64) {
        self.uploads.lock().unwrap().insert(
            file_name.to_string(),
            Ok(UploadReceipt {
                id: DocumentId::from(id),
                filename: Some(format!("stored_{file_name}")),
                original_filename: Some(file_name.to_string()),
                status: Some(DocumentStatus::Uploaded),
                message: Some("Document uploaded successfully".to_string()),
            }),
        );
    }

    pub fn reject_upload(&self, file_name: &str, err: RoadcostError) {
        self.uploads
            .lock()
            .unwrap()
            .insert(file_name.to_string(), Err(err));
    }

    pub fn set_summary(&self, id: u64, summary: Result<AnalysisSummary>) {
        self.summaries
            .lock()
            .unwrap()
            .insert(id.to_string(), summary);
    }

    pub fn push_status(&self, status: DocumentStatus) {
        self.statuses.lock().unwrap().push_back(Ok(record(42, status)));
    }

    pub fn push_status_error(&self, err: RoadcostError) {
        self.statuses.lock().unwrap().push_back(Err(err));
    }

    /// Holds the next call for `key` ("upload:<file>" or "summary:<id>").
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    pub fn upload_calls(&self) -> Vec<String> {
        self.upload_calls.lock().unwrap().clone()
    }

    pub fn summary_calls(&self) -> Vec<DocumentId> {
        self.summary_calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }

    async fn pass_gate(&self, key: String) {
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl AnalysisApi for MockAnalysisApi {
    async fn upload(&self, file: &FileUpload) -> Result<UploadReceipt> {
        self.upload_calls
            .lock()
            .unwrap()
            .push(file.file_name.clone());
        self.pass_gate(format!("upload:{}", file.file_name)).await;
        self.uploads
            .lock()
            .unwrap()
            .remove(&file.file_name)
            .unwrap_or_else(|| Err(RoadcostError::service(500, "no scripted upload")))
    }

    async fn fetch_summary(&self, document_id: &DocumentId) -> Result<AnalysisSummary> {
        self.summary_calls.lock().unwrap().push(document_id.clone());
        self.pass_gate(format!("summary:{document_id}")).await;
        self.summaries
            .lock()
            .unwrap()
            .get(document_id.as_str())
            .cloned()
            .unwrap_or_else(|| Err(RoadcostError::service(404, "Analysis not found")))
    }

    fn report_url(&self, document_id: &DocumentId) -> String {
        format!("http://mock.local/api/documents/{document_id}/report")
    }

    async fn document(&self, _document_id: &DocumentId) -> Result<DocumentRecord> {
        *self.status_calls.lock().unwrap() += 1;
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(record(42, DocumentStatus::Processing)))
    }

    async fn list_documents(&self, _page: Page) -> Result<Vec<DocumentRecord>> {
        Ok(Vec::new())
    }

    async fn trigger_analysis(&self, document_id: &DocumentId) -> Result<AnalysisTrigger> {
        Ok(AnalysisTrigger {
            message: "Analysis started".to_string(),
            document_id: document_id.clone(),
        })
    }

    async fn download_report(&self, _document_id: &DocumentId, _destination: &Path) -> Result<u64> {
        Ok(0)
    }
}

pub fn pdf(name: &str) -> FileUpload {
    FileUpload::new(name, b"%PDF-1.4 survey".to_vec())
}

/// The summary the service returns for the reference survey document.
pub fn survey_summary() -> AnalysisSummary {
    let started = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let generated = Utc.with_ymd_and_hms(2024, 1, 1, 10, 5, 0).unwrap();
    AnalysisSummary::new(7, 450_000.0, started.into(), Some(generated.into())).unwrap()
}

pub fn record(id: u64, status: DocumentStatus) -> DocumentRecord {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    DocumentRecord {
        id: DocumentId::from(id),
        filename: "stored_survey.pdf".to_string(),
        original_filename: "survey.pdf".to_string(),
        file_size: 15,
        mime_type: "application/pdf".to_string(),
        status,
        processing_error: None,
        created_at: at.into(),
        updated_at: at.into(),
    }
}

/// Yields until `cond` holds. Panics after a generous number of rounds.
pub async fn until(mut cond: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
