use roadcost_core::{AnalysisApi, DocumentId, DocumentRecord, Result, RoadcostError};
use std::time::Duration;

/// How the status poll paces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 200,
        }
    }
}

/// Polls `GET /api/documents/{id}` until processing completes or fails.
///
/// Used only when the user explicitly asks to wait. Any request failure ends
/// the wait immediately; a failed request is never repeated.
pub async fn wait_until_settled(
    api: &dyn AnalysisApi,
    document_id: &DocumentId,
    schedule: PollSchedule,
) -> Result<DocumentRecord> {
    for attempt in 1..=schedule.max_attempts {
        let record = api.document(document_id).await?;
        tracing::debug!(document_id = %document_id, attempt, status = %record.status, "polled document status");
        if record.status.is_settled() {
            return Ok(record);
        }
        if attempt < schedule.max_attempts {
            tokio::time::sleep(schedule.interval).await;
        }
    }

    Err(RoadcostError::Pending(format!(
        "document {document_id} still processing after {} checks",
        schedule.max_attempts
    )))
}
