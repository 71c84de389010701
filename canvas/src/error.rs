//! User-facing failure kinds.
//!
//! Every variant's `Display` text is the message shown to the user; the host
//! surfaces it through [`crate::engine::Action::Alert`]. Operations not listed
//! here (placement, navigation, zoom, clear, undo) are total and never fail.

/// Error returned by session operations that can be refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// The uploaded file does not declare itself as a PDF.
    #[error("Please upload a valid PDF file (got \"{mime}\")")]
    InvalidFileType { mime: String },
    /// The document could not be decoded. The previous document stays active.
    #[error("Error loading PDF. Please check the file format. ({reason})")]
    DocumentLoadFailure { reason: String },
    /// PDF export needs a loaded document to pick the page orientation.
    #[error("Load a PDF floor plan before exporting to PDF")]
    ExportPrecondition,
    /// A snapshot, writer, or download collaborator failed.
    #[error("export failed: {reason}")]
    ExportFailed { reason: String },
}
