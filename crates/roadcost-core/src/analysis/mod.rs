//! Analysis results and the state of fetching them.

pub mod model;
pub mod retrieval;

pub use model::{AnalysisSummary, SummaryData};
pub use retrieval::{FailureDisplay, RetrievalState};
