//! # contract: data records and the async seams of the export pipeline
//!
//! This module defines the document record returned by the backend and the
//! three traits the pipeline talks through:
//!
//! - [`DocumentFetcher`]: fetch one document's bytes from its URL.
//! - [`DocumentSource`]: list an order's documents, delete a document.
//! - [`ArchiveSink`]: deliver the finished archive ("trigger the download").
//!
//! ## Mocking & Testing
//! - Each trait is annotated for `mockall`, so tests can script fetch results
//!   per URL without a network. The mocks are exported under the default
//!   `test-export-mocks` feature for use from integration tests.

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::DocumentCategory;
use crate::error::{FetchError, SourceError};

/// A document as listed by the backend. Not owned by this crate; it only lives
/// for the duration of one listing or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Raw category tag as sent by the backend.
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub description: String,
    /// Original upload name; only its extension is used.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub file_name: String,
    pub file_url: String,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub source_model: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub source_id: Option<String>,
}

impl DocumentRecord {
    pub fn category(&self) -> DocumentCategory {
        DocumentCategory::from_tag(&self.category)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn deserialize_nullable_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fetches a document's binary content.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// GET the bytes behind `url`. Any non-success answer is an error.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Backend collaborator that lists and deletes an order's documents.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Ordered list of the documents attached to a service order.
    async fn list_documents(&self, order_id: i64) -> Result<Vec<DocumentRecord>, SourceError>;

    /// Delete a document through its owning backend record.
    ///
    /// Implementors must refuse records that are not `deletable`.
    async fn delete_document(&self, record: &DocumentRecord) -> Result<(), SourceError>;
}

/// Receives the finished archive.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Store `content` under `archive_name`, returning where it ended up.
    async fn deliver(&self, archive_name: &str, content: Vec<u8>) -> std::io::Result<PathBuf>;
}
