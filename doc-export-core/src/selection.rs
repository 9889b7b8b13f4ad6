//! Selection and filtering of an order's documents.
//!
//! Both are plain values owned by the caller. [`DocumentFilter`] narrows the
//! listing down to the "currently visible" documents and [`ExportSelection`]
//! picks which of those get exported.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::DocumentCategory;
use crate::contract::DocumentRecord;

/// Ids of the documents chosen for export. Empty means "everything visible".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSelection {
    ids: BTreeSet<String>,
}

impl ExportSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Flip membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select_all(&mut self, documents: &[DocumentRecord]) {
        self.ids.extend(documents.iter().map(|d| d.id.clone()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Documents an export would include, in input order.
    ///
    /// Ids selected but absent from `documents` are ignored. A repeated id is
    /// kept once so its file is only fetched once.
    pub fn effective<'a>(&self, documents: &'a [DocumentRecord]) -> Vec<&'a DocumentRecord> {
        let mut seen: HashSet<&str> = HashSet::new();
        documents
            .iter()
            .filter(|d| self.ids.is_empty() || self.ids.contains(&d.id))
            .filter(|d| seen.insert(d.id.as_str()))
            .collect()
    }
}

/// Narrows a document listing by category and free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub category: Option<DocumentCategory>,
    pub search: Option<String>,
}

impl DocumentFilter {
    pub fn matches(&self, document: &DocumentRecord) -> bool {
        if let Some(category) = self.category {
            if document.category() != category {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                document.description.to_lowercase().contains(&needle)
                    || document.file_name.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    pub fn apply(&self, documents: Vec<DocumentRecord>) -> Vec<DocumentRecord> {
        documents.into_iter().filter(|d| self.matches(d)).collect()
    }
}

/// Document count per category, for categories that have at least one.
pub fn count_by_category(documents: &[DocumentRecord]) -> Vec<(DocumentCategory, usize)> {
    DocumentCategory::ALL
        .iter()
        .map(|&c| (c, documents.iter().filter(|d| d.category() == c).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}
