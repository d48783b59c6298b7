//! Static description of the stages a submitted document goes through.
//!
//! Informational only: nothing here talks to the service. The header is the
//! one piece that varies, and it depends solely on whether a document
//! identifier is known.

use std::fmt;

use crate::document::DocumentId;

/// One named step of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleStage {
    pub name: &'static str,
    pub description: &'static str,
}

pub const PIPELINE_STAGES: [LifecycleStage; 6] = [
    LifecycleStage {
        name: "Upload",
        description: "The document is received and stored for processing.",
    },
    LifecycleStage {
        name: "Text extraction",
        description: "Text is read from the PDF, Word file or scanned image.",
    },
    LifecycleStage {
        name: "Intervention detection",
        description: "Road safety interventions and their quantities are identified.",
    },
    LifecycleStage {
        name: "Standards mapping",
        description: "Each intervention is matched to the relevant IRC standards and clauses.",
    },
    LifecycleStage {
        name: "Cost estimation",
        description: "Materials are priced from published schedules of rates.",
    },
    LifecycleStage {
        name: "Report generation",
        description: "A downloadable cost analysis report is produced.",
    },
];

pub const AWAITING_UPLOAD: &str = "Awaiting upload";

/// Header line for the tracker.
pub fn tracker_header(document_id: Option<&DocumentId>) -> String {
    match document_id {
        Some(id) => format!("Tracking document #{id}"),
        None => AWAITING_UPLOAD.to_string(),
    }
}

/// Renderable tracker: the header plus every stage, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleView {
    pub header: String,
    pub stages: &'static [LifecycleStage],
}

impl LifecycleView {
    pub fn new(document_id: Option<&DocumentId>) -> Self {
        Self {
            header: tracker_header(document_id),
            stages: &PIPELINE_STAGES,
        }
    }
}

impl fmt::Display for LifecycleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        write!(f, "{}", StageList(self.stages))
    }
}

/// Numbered stage lines, one per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageList(pub &'static [LifecycleStage]);

impl StageList {
    pub fn pipeline() -> Self {
        Self(&PIPELINE_STAGES)
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, stage) in self.0.iter().enumerate() {
            writeln!(f, "  {}. {} - {}", index + 1, stage.name, stage.description)?;
        }
        Ok(())
    }
}
