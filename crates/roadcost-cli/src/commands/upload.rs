use anyhow::{Context, Result};
use roadcost_application::{DocumentSession, PollSchedule, wait_until_settled};
use roadcost_core::document::accept_filter;
use roadcost_core::{ClientConfig, FileUpload, UploadOutcome};
use std::path::Path;

pub async fn run(config: ClientConfig, path: &Path, wait: bool) -> Result<()> {
    let file = FileUpload::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !file.has_advertised_extension() {
        tracing::warn!(file = %file.file_name, accepted = %accept_filter(), "file type is not one the service advertises");
    }

    let session = DocumentSession::connect(config)?;
    let outcome = session.upload(Some(file)).await;

    if wait && let Some(UploadOutcome::Success { document_id }) = &outcome {
        eprintln!("Waiting for document #{document_id} to finish processing...");
        let record =
            wait_until_settled(session.api().as_ref(), document_id, PollSchedule::default()).await?;
        if let Some(error) = &record.processing_error {
            eprintln!("Processing failed: {error}");
        }
    }

    session.sync_summary().await;
    print!("{}", session.dashboard().await);

    if let Some(UploadOutcome::Failure { message }) = outcome {
        anyhow::bail!(message);
    }
    Ok(())
}
