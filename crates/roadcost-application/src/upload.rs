use roadcost_core::{AnalysisApi, FileUpload, UploadOutcome};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::store::{CommitOutcome, DocumentStore, UploadTicket};

/// What the upload control shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadStatus {
    /// True while at least one upload is on the wire.
    pub uploading: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Default)]
struct Messages {
    success: Option<String>,
    error: Option<String>,
    /// Ticket of the upload whose result the messages describe.
    reported: u64,
}

/// Decrements the in-flight count however the upload future ends.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Sends selected files and reports new identifiers to the [`DocumentStore`].
///
/// Overlapping uploads are allowed. Each takes a ticket at dispatch; results
/// of an upload overtaken by a newer successful one are returned to the
/// caller but never replace the newer upload's identifier or messages. The
/// success message always belongs to the identifier the store holds.
pub struct UploadInitiator {
    api: Arc<dyn AnalysisApi>,
    store: Arc<DocumentStore>,
    in_flight: AtomicUsize,
    messages: RwLock<Messages>,
}

impl UploadInitiator {
    pub fn new(api: Arc<dyn AnalysisApi>, store: Arc<DocumentStore>) -> Self {
        Self {
            api,
            store,
            in_flight: AtomicUsize::new(0),
            messages: RwLock::new(Messages::default()),
        }
    }

    /// Uploads the selected file, if any.
    ///
    /// Returns `None` without touching the network or any state when nothing
    /// is selected. Failures never escape: they come back as
    /// [`UploadOutcome::Failure`] with the normalized message.
    pub async fn upload(&self, selection: Option<FileUpload>) -> Option<UploadOutcome> {
        let file = selection?;
        let ticket = self.store.begin_upload();
        let _in_flight = InFlightGuard::enter(&self.in_flight);

        tracing::info!(
            file = %file.file_name,
            bytes = file.size(),
            ticket = ticket.sequence(),
            "uploading document"
        );

        let outcome = match self.api.upload(&file).await {
            Ok(receipt) => {
                let message = receipt.message.clone().unwrap_or_else(|| {
                    let name = receipt
                        .original_filename
                        .as_deref()
                        .unwrap_or(&file.file_name);
                    format!("Uploaded {name}")
                });
                if let CommitOutcome::Applied { .. } =
                    self.store.commit(ticket, receipt.id.clone())
                {
                    self.report_success(ticket, message).await;
                }
                UploadOutcome::Success {
                    document_id: receipt.id,
                }
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(file = %file.file_name, error = %err, "upload failed");
                self.report_failure(ticket, message.clone()).await;
                UploadOutcome::Failure { message }
            }
        };

        Some(outcome)
    }

    /// Called only for a commit the store applied, so the messages always
    /// describe the identifier the store holds.
    async fn report_success(&self, ticket: UploadTicket, message: String) {
        let mut messages = self.messages.write().await;
        messages.success = Some(message);
        messages.error = None;
        messages.reported = ticket.sequence();
    }

    /// A failure replaces the messages unless they already describe a newer upload.
    async fn report_failure(&self, ticket: UploadTicket, message: String) {
        let mut messages = self.messages.write().await;
        if ticket.sequence() < messages.reported {
            return;
        }
        messages.success = None;
        messages.error = Some(message);
        messages.reported = ticket.sequence();
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn status(&self) -> UploadStatus {
        let messages = self.messages.read().await;
        UploadStatus {
            uploading: self.is_uploading(),
            success_message: messages.success.clone(),
            error_message: messages.error.clone(),
        }
    }
}
