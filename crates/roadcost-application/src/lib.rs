pub mod progress;
pub mod session;
pub mod store;
pub mod summary;
pub mod upload;

pub use progress::{PollSchedule, wait_until_settled};
pub use session::{Dashboard, DocumentSession};
pub use store::{CommitOutcome, DocumentSlot, DocumentStore, OrchestratorState, UploadTicket};
pub use summary::{
    RefreshOutcome, RetrievalSnapshot, SummaryBody, SummaryFigures, SummaryPanel, SummaryRetriever,
};
pub use upload::{UploadInitiator, UploadStatus};
