//! Submitted documents: identifiers, upload payloads and service records.

pub mod model;
pub mod upload;

pub use model::{DocumentId, DocumentRecord, DocumentStatus, UploadOutcome, UploadReceipt};
pub use upload::{ACCEPTED_EXTENSIONS, ADVERTISED_MAX_UPLOAD_MB, FileUpload, accept_filter};
