pub mod analysis;
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod timestamp;

// Re-export common error type
pub use error::{Result, RoadcostError};

pub use analysis::{AnalysisSummary, FailureDisplay, RetrievalState};
pub use api::{AnalysisApi, AnalysisTrigger, Page};
pub use config::ClientConfig;
pub use document::{DocumentId, DocumentRecord, DocumentStatus, FileUpload, UploadOutcome, UploadReceipt};
pub use timestamp::ServiceTime;
