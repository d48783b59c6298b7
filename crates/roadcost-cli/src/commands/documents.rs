use anyhow::{Context, Result};
use roadcost_application::DocumentSession;
use roadcost_core::format::{display_offset, format_local_timestamp};
use roadcost_core::{ClientConfig, DocumentId, Page};
use std::path::PathBuf;

pub async fn status(config: ClientConfig, id: &str) -> Result<()> {
    let document_id: DocumentId = id.parse()?;
    let offset = display_offset(config.utc_offset_minutes);
    let session = DocumentSession::connect(config)?;

    let record = session.api().document(&document_id).await?;
    println!("Document #{} ({})", record.id, record.original_filename);
    println!("  Status:   {}", record.status);
    println!("  Size:     {} bytes", record.file_size);
    println!("  Type:     {}", record.mime_type);
    println!("  Uploaded: {}", format_local_timestamp(record.created_at, offset));
    println!("  Updated:  {}", format_local_timestamp(record.updated_at, offset));
    if let Some(error) = &record.processing_error {
        println!("  Error:    {error}");
    }
    Ok(())
}

pub async fn list(config: ClientConfig, skip: u32, limit: u32) -> Result<()> {
    let session = DocumentSession::connect(config)?;
    let documents = session.api().list_documents(Page { skip, limit }).await?;

    if documents.is_empty() {
        println!("No documents.");
        return Ok(());
    }
    for record in documents {
        println!("#{:<6} {:<11} {}", record.id.to_string(), record.status.to_string(), record.original_filename);
    }
    Ok(())
}

pub async fn analyze(config: ClientConfig, id: &str) -> Result<()> {
    let document_id: DocumentId = id.parse()?;
    let session = DocumentSession::connect(config)?;

    let trigger = session.api().trigger_analysis(&document_id).await?;
    println!("{} (document #{})", trigger.message, trigger.document_id);
    Ok(())
}

pub async fn report(config: ClientConfig, id: &str, output: Option<PathBuf>) -> Result<()> {
    let document_id: DocumentId = id.parse()?;
    let destination = output.unwrap_or_else(|| PathBuf::from(format!("report_{document_id}.pdf")));
    let session = DocumentSession::connect(config)?;

    let written = session
        .api()
        .download_report(&document_id, &destination)
        .await
        .with_context(|| format!("Failed to download report for document #{document_id}"))?;
    println!("Saved {} ({written} bytes)", destination.display());
    Ok(())
}
