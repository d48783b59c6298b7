use anyhow::Result;
use roadcost_application::{DocumentSession, SummaryBody, SummaryFigures, SummaryPanel};
use roadcost_core::format::display_offset;
use roadcost_core::{ClientConfig, DocumentId};

pub async fn run(config: ClientConfig, id: &str) -> Result<()> {
    let document_id: DocumentId = id.parse()?;
    let offset = display_offset(config.utc_offset_minutes);
    let session = DocumentSession::connect(config)?;
    let api = session.api();

    let summary = api.fetch_summary(&document_id).await?;
    let panel = SummaryPanel {
        report_url: Some(api.report_url(&document_id)),
        body: SummaryBody::Ready(SummaryFigures::new(&summary, offset)),
    };
    print!("{panel}");

    if let Some(data) = &summary.summary_data
        && !data.interventions_by_type.is_empty()
    {
        println!("\nBy type:");
        for (kind, count) in &data.interventions_by_type {
            println!("  {kind}: {count}");
        }
    }
    if !summary.assumptions().is_empty() {
        println!("\nAssumptions:");
        for assumption in summary.assumptions() {
            println!("  - {assumption}");
        }
    }
    Ok(())
}
