#![doc = "doc-export-core: core logic library for doc-export."]

//! This crate contains the document export pipeline and everything it is
//! built from: the category catalog, naming rules, selection handling,
//! archive assembly and the HTTP-backed fetch/listing clients.
//!
//! # Usage
//! The CLI crate wires [`http::HttpFetcher`] and [`sink::DirectorySink`] into
//! an [`export::DocumentExporter`]; tests wire the mocks from [`contract`].

pub mod archive;
pub mod catalog;
pub mod contract;
pub mod error;
pub mod export;
pub mod http;
pub mod naming;
pub mod selection;
pub mod sink;

pub use catalog::DocumentCategory;
pub use contract::{ArchiveSink, DocumentFetcher, DocumentRecord, DocumentSource};
pub use error::{ExportError, FetchError, SourceError};
pub use export::{CancelHandle, DocumentExporter, ExportReport, ExportState, OrderLabel};
pub use selection::{DocumentFilter, ExportSelection};
