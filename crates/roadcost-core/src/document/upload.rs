//! Files selected for submission.

use std::path::Path;

use crate::error::Result;

/// Extensions advertised at the upload control.
///
/// Advisory only: the service is the validation boundary and nothing on the
/// client rejects a file for its extension.
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "docx", "txt", "png", "jpg", "jpeg"];

/// Upload ceiling advertised alongside the accept filter, in megabytes.
pub const ADVERTISED_MAX_UPLOAD_MB: u64 = 50;

/// A file ready to be sent as the `file` field of a multipart submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Builds an upload from in-memory contents, guessing the MIME type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Reads a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the extension is one the accept filter advertises.
    pub fn has_advertised_extension(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                ACCEPTED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

/// The accept filter in the `.ext,.ext` form a file picker expects.
pub fn accept_filter() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}
