//! Upload flow
//!
//! One document at a time: pick it, send it with the session token, and
//! record whether the backend accepted it. A successful upload unlocks the
//! "continue" action that leads to the query page.

use std::sync::Arc;

use crate::api::DocQueryApi;
use crate::routes::{Navigation, Route};
use crate::session::Session;
use crate::types::{AppError, Result, UploadReceipt};

/// Extensions offered by the file picker.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

pub const MSG_SELECT_FILE: &str = "Please select a file.";
pub const MSG_LOG_IN_FIRST: &str = "No token found, please log in first.";
pub const MSG_UPLOAD_OK: &str = "File uploaded successfully! Click Continue to chat";
pub const MSG_UPLOAD_FAILED: &str = "Error uploading the file.";
const MSG_IN_FLIGHT: &str = "An upload is already in progress.";

/// A file read into memory, ready to go out as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).map(str::to_string);
        Self {
            name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, keeping only its file name.
    #[cfg(feature = "native")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::Validation(format!("Not a file: {}", path.display())))?;
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(Self::new(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    pub fn is_supported(&self) -> bool {
        self.extension()
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }
}

fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

/// Value passed to the `accept` attribute of a file input.
pub fn accept_attribute() -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// What `begin_submit` hands to the transport.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub token: String,
    pub document: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    file: Option<Document>,
    uploading: bool,
    succeeded: bool,
    message: String,
    receipt: Option<UploadReceipt>,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected file and forget the previous outcome.
    pub fn select_file(&mut self, document: Document) {
        tracing::debug!(file = %document.name, bytes = document.len(), "File selected");
        self.file = Some(document);
        self.succeeded = false;
        self.message.clear();
        self.receipt = None;
    }

    pub fn file(&self) -> Option<&Document> {
        self.file.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn receipt(&self) -> Option<&UploadReceipt> {
        self.receipt.as_ref()
    }

    /// Whether the upload control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.uploading
    }

    /// Whether the "continue" action should be shown.
    pub fn can_continue(&self) -> bool {
        self.succeeded && !self.uploading
    }

    pub fn continue_to(&self) -> Option<Navigation> {
        self.can_continue().then(|| Navigation::push(Route::Query))
    }

    /// Check preconditions and enter the uploading state. A local failure
    /// sets `message` and leaves the state otherwise untouched.
    pub fn begin_submit(&mut self, session: &Session) -> Result<UploadJob> {
        if self.uploading {
            return Err(AppError::Validation(MSG_IN_FLIGHT.into()));
        }
        let Some(document) = self.file.clone() else {
            self.message = MSG_SELECT_FILE.into();
            return Err(AppError::Validation(MSG_SELECT_FILE.into()));
        };
        let Some(token) = session.get() else {
            self.message = MSG_LOG_IN_FIRST.into();
            return Err(AppError::Unauthenticated(MSG_LOG_IN_FIRST.into()));
        };

        self.uploading = true;
        self.succeeded = false;
        self.message.clear();
        Ok(UploadJob { token, document })
    }

    /// Record the backend's answer to the job started by `begin_submit`.
    pub fn finish(&mut self, outcome: Result<UploadReceipt>) {
        self.uploading = false;
        match outcome {
            Ok(receipt) => {
                tracing::info!(chunks = ?receipt.extracted_chunks, "Upload accepted");
                self.succeeded = true;
                self.message = MSG_UPLOAD_OK.into();
                self.receipt = Some(receipt);
            }
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                self.succeeded = false;
                self.message = MSG_UPLOAD_FAILED.into();
            }
        }
    }

    /// Run a whole submission against `api`.
    pub async fn submit<A>(&mut self, api: &A, session: &Session) -> Result<()>
    where
        A: DocQueryApi + ?Sized,
    {
        let job = self.begin_submit(session)?;
        let outcome = api.upload(&job.token, &job.document).await;
        let result = outcome.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.finish(outcome);
        result
    }
}
