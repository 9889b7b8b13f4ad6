//! Document export pipeline: selection → fetch → categorised ZIP → sink.
//!
//! [`DocumentExporter::export_documents`] is the single entrypoint. It
//!   - resolves the effective document set from the listing and the selection
//!   - groups documents into one folder per category (first-appearance order)
//!   - fetches each document sequentially, skipping the ones that fail
//!   - names entries `{order}-{prefix}-{NN}-{description}.{ext}`
//!   - hands the archive to an [`ArchiveSink`] as `{order}_DOCUMENTOS_{date}.zip`
//!
//! # Error Handling
//! Per-document fetch failures are logged and skipped. Only pipeline-level
//! failures ([`ExportError`]) reach the caller, and none of them deliver a
//! partial archive.
//!
//! # State
//! An exporter is either `Idle` or `Exporting`. A call made while another is
//! running is rejected with [`ExportError::ExportInProgress`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::archive::{partition_by_category, ArchiveBuilder};
use crate::contract::{ArchiveSink, DocumentFetcher, DocumentRecord};
use crate::error::ExportError;
use crate::naming::{archive_file_name, clean_order_label, entry_file_name};
use crate::selection::ExportSelection;

/// Human-readable order identifier used as a file name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLabel(String);

impl OrderLabel {
    /// Use `label` when present and non-blank, else `OS-{order_id}`.
    pub fn resolve(label: Option<&str>, order_id: i64) -> Self {
        match label.map(clean_order_label) {
            Some(l) if !l.is_empty() => OrderLabel(l),
            _ => OrderLabel(format!("OS-{}", order_id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting,
}

/// Cancels the export currently running on the exporter it came from.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a finished export.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportReport {
    pub archive_name: String,
    pub location: std::path::PathBuf,
    /// Documents in the effective selection.
    pub requested: usize,
    /// Documents actually written to the archive.
    pub included: usize,
    /// Ids whose fetch failed.
    pub skipped: Vec<String>,
    pub folders: Vec<FolderReport>,
}

impl ExportReport {
    /// True when every fetch failed and the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.included == 0
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FolderReport {
    pub folder: String,
    pub entries: Vec<String>,
}

/// Resets the exporter to `Idle` on every exit path.
struct ExportingGuard<'a> {
    state: &'a Mutex<ExportState>,
}

impl Drop for ExportingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            *state = ExportState::Idle;
        }
    }
}

pub struct DocumentExporter<F, S> {
    fetcher: F,
    sink: S,
    state: Mutex<ExportState>,
    cancelled: Arc<AtomicBool>,
    export_date: Option<NaiveDate>,
}

impl<F, S> DocumentExporter<F, S>
where
    F: DocumentFetcher,
    S: ArchiveSink,
{
    pub fn new(fetcher: F, sink: S) -> Self {
        Self {
            fetcher,
            sink,
            state: Mutex::new(ExportState::Idle),
            cancelled: Arc::new(AtomicBool::new(false)),
            export_date: None,
        }
    }

    /// Pin the date used in archive names instead of today's local date.
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    pub fn state(&self) -> ExportState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(ExportState::Idle)
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancelled.clone())
    }

    fn begin(&self) -> Result<ExportingGuard<'_>, ExportError> {
        let mut state = self.state.lock().map_err(|_| ExportError::ExportInProgress)?;
        if *state == ExportState::Exporting {
            return Err(ExportError::ExportInProgress);
        }
        *state = ExportState::Exporting;
        self.cancelled.store(false, Ordering::SeqCst);
        Ok(ExportingGuard { state: &self.state })
    }

    /// Export the selected (or all) `documents` into one archive.
    ///
    /// `selection` is cleared after a successful export and left untouched on
    /// error.
    pub async fn export_documents(
        &self,
        documents: &[DocumentRecord],
        selection: &mut ExportSelection,
        order_label: &OrderLabel,
    ) -> Result<ExportReport, ExportError> {
        let effective = selection.effective(documents);
        if effective.is_empty() {
            warn!(
                listed = documents.len(),
                selected = selection.len(),
                "[EXPORT] Nothing to export"
            );
            return Err(ExportError::NoDocumentsSelected);
        }

        let _guard = self.begin().map_err(|e| {
            warn!("[EXPORT] Rejected export request while another one is running");
            e
        })?;

        let requested = effective.len();
        info!(order = %order_label, requested, "[EXPORT] Starting document export");

        let mut archive = ArchiveBuilder::new();
        let mut skipped: Vec<String> = Vec::new();
        let mut folders: Vec<FolderReport> = Vec::new();

        for (category, docs) in partition_by_category(effective) {
            let prefix = category.prefix();
            let mut entries: Vec<String> = Vec::new();

            for document in docs {
                if self.cancelled.load(Ordering::SeqCst) {
                    info!(order = %order_label, "[EXPORT] Export cancelled");
                    return Err(ExportError::Cancelled);
                }

                let content = match self.fetcher.fetch(&document.file_url).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(
                            document_id = %document.id,
                            url = %document.file_url,
                            error = %e,
                            "[EXPORT] Skipping document that could not be fetched"
                        );
                        skipped.push(document.id.clone());
                        continue;
                    }
                };

                // Index counts included documents only, so skips leave no gaps.
                let file_name = entry_file_name(
                    order_label.as_str(),
                    prefix,
                    entries.len() + 1,
                    &document.description,
                    &document.file_name,
                );
                archive.add_entry(prefix, &file_name, &content).map_err(|e| {
                    error!(error = ?e, entry = %file_name, "[EXPORT][ERROR] Failed to add archive entry");
                    ExportError::ArchiveAssemblyFailed(e)
                })?;
                debug!(document_id = %document.id, folder = prefix, entry = %file_name, "[EXPORT] Included document");
                entries.push(file_name);
            }

            if !entries.is_empty() {
                folders.push(FolderReport {
                    folder: prefix.to_string(),
                    entries,
                });
            }
        }

        if self.cancelled.load(Ordering::SeqCst) {
            info!(order = %order_label, "[EXPORT] Export cancelled before delivery");
            return Err(ExportError::Cancelled);
        }

        let included = archive.entry_count();
        let bytes = archive.finish().map_err(|e| {
            error!(error = ?e, "[EXPORT][ERROR] Failed to finalise archive");
            ExportError::ArchiveAssemblyFailed(e)
        })?;

        let date = self
            .export_date
            .unwrap_or_else(|| Local::now().date_naive());
        let archive_name = archive_file_name(order_label.as_str(), date);

        let location = self
            .sink
            .deliver(&archive_name, bytes)
            .await
            .map_err(|source| {
                error!(error = ?source, archive = %archive_name, "[EXPORT][ERROR] Failed to deliver archive");
                ExportError::DownloadTriggerFailed {
                    archive_name: archive_name.clone(),
                    source,
                }
            })?;

        if included == 0 {
            warn!(archive = %archive_name, requested, "[EXPORT] Every fetch failed, archive is empty");
        }
        info!(
            archive = %archive_name,
            location = %location.display(),
            requested,
            included,
            skipped = skipped.len(),
            "[EXPORT] Export complete"
        );

        selection.clear();

        Ok(ExportReport {
            archive_name,
            location,
            requested,
            included,
            skipped,
            folders,
        })
    }
}
