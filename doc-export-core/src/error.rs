use thiserror::Error;

/// Failure to fetch a single document's bytes.
///
/// The export pipeline recovers from these locally by skipping the document.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// Pipeline-level export failures. Each one is surfaced to the user as a
/// single notification; none of them leaves a partial archive behind.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No documents selected for export")]
    NoDocumentsSelected,

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Export was cancelled")]
    Cancelled,

    #[error("Failed to assemble archive: {0}")]
    ArchiveAssemblyFailed(#[from] zip::result::ZipError),

    #[error("Failed to save archive {archive_name}: {source}")]
    DownloadTriggerFailed {
        archive_name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the document listing/deletion backend.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode document listing: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Document {id} cannot be deleted")]
    NotDeletable { id: String },

    #[error("Document {id} has no owning record to delete")]
    MissingSource { id: String },
}

