//! Document domain models.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoadcostError;
use crate::timestamp::ServiceTime;

/// Opaque, server-assigned identifier of one submitted document.
///
/// The service currently issues integers, but any JSON number or string is
/// accepted. The textual form is kept exactly as received and reused
/// unmodified in every URL built for the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps a raw identifier without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier exactly as the service sent it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for DocumentId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for DocumentId {
    type Err = RoadcostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RoadcostError::config("document id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Ok(Self(n.to_string())),
            RawId::Signed(n) => Ok(Self(n.to_string())),
            RawId::Text(s) if s.is_empty() => {
                Err(serde::de::Error::custom("document id must not be empty"))
            }
            RawId::Text(s) => Ok(Self(s)),
        }
    }
}

/// Processing status reported by the service for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
}

impl DocumentStatus {
    /// True once the service will no longer change the status on its own.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Body of a successful `POST /api/upload`.
///
/// Only `id` is guaranteed; the remaining fields are filled in when the
/// service provides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: DocumentId,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /api/documents/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub filename: String,
    pub original_filename: String,
    pub file_size: u64,
    pub mime_type: String,
    pub status: DocumentStatus,
    #[serde(default)]
    pub processing_error: Option<String>,
    pub created_at: ServiceTime,
    pub updated_at: ServiceTime,
}

/// Result of one upload attempt, reported once and then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { document_id: DocumentId },
    Failure { message: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            Self::Success { document_id } => Some(document_id),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_from_number_and_string() {
        let numeric: DocumentId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric.as_str(), "42");

        let text: DocumentId = serde_json::from_str("\"doc-7f3a\"").unwrap();
        assert_eq!(text.as_str(), "doc-7f3a");
    }

    #[test]
    fn test_document_id_rejects_empty_and_float() {
        assert!(serde_json::from_str::<DocumentId>("\"\"").is_err());
        assert!(serde_json::from_str::<DocumentId>("4.2").is_err());
        assert!("  ".parse::<DocumentId>().is_err());
    }

    #[test]
    fn test_minimal_upload_receipt() {
        let receipt: UploadReceipt = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(receipt.id, DocumentId::from(42));
        assert!(receipt.message.is_none());
    }

    #[test]
    fn test_full_upload_receipt() {
        let receipt: UploadReceipt = serde_json::from_str(
            r#"{
                "id": 9,
                "filename": "audit_20240101_100000_ab12cd34.pdf",
                "original_filename": "audit.pdf",
                "status": "uploaded",
                "message": "Document uploaded successfully. Processing will begin shortly."
            }"#,
        )
        .unwrap();
        assert_eq!(receipt.status, Some(DocumentStatus::Uploaded));
        assert_eq!(receipt.original_filename.as_deref(), Some("audit.pdf"));
    }

    #[test]
    fn test_document_record_with_naive_timestamps() {
        let record: DocumentRecord = serde_json::from_str(
            r#"{
                "id": 3,
                "filename": "a.pdf",
                "original_filename": "a.pdf",
                "file_size": 2048,
                "mime_type": "application/pdf",
                "status": "processing",
                "created_at": "2024-01-01T10:00:00.123456",
                "updated_at": "2024-01-01T10:00:05"
            }"#,
        )
        .unwrap();
        assert_eq!(record.status, DocumentStatus::Processing);
        assert!(!record.status.is_settled());
        assert!(record.updated_at > record.created_at);
    }
}
