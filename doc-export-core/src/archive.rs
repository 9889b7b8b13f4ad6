//! In-memory archive assembly.

use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::catalog::DocumentCategory;
use crate::contract::DocumentRecord;

/// Group documents by category.
///
/// Folders appear in order of their category's first occurrence and keep the
/// relative input order of their documents.
pub fn partition_by_category<'a>(
    documents: Vec<&'a DocumentRecord>,
) -> Vec<(DocumentCategory, Vec<&'a DocumentRecord>)> {
    let mut folders: Vec<(DocumentCategory, Vec<&'a DocumentRecord>)> = Vec::new();
    for document in documents {
        let category = document.category();
        match folders.iter_mut().find(|(c, _)| *c == category) {
            Some((_, docs)) => docs.push(document),
            None => folders.push((category, vec![document])),
        }
    }
    folders
}

/// Builds a ZIP archive in memory. Entries live under `{folder}/`.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    pub fn add_entry(
        &mut self,
        folder: &str,
        file_name: &str,
        content: &[u8],
    ) -> zip::result::ZipResult<()> {
        let path = format!("{}/{}", folder, file_name);
        self.writer.start_file(path.as_str(), self.options)?;
        self.writer.write_all(content)?;
        self.entries += 1;
        debug!(entry = %path, size = content.len(), "Added archive entry");
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Finalise the central directory and return the archive bytes.
    pub fn finish(self) -> zip::result::ZipResult<Vec<u8>> {
        Ok(self.writer.finish()?.into_inner())
    }
}
