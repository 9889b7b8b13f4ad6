//! `cli` module: the doc-export command-line interface.
//!
//! This module implements the CLI interface for doc-export: command parsing,
//! argument validation and the async entrypoint used by `main` and the tests.
//!
//! All document logic (catalog, naming, selection, archive assembly, HTTP
//! clients) lives in the [`doc-export-core`] crate. This module only wires the
//! configured HTTP clients into it and prints results.
//!
//! ## Commands
//! - `list`: show an order's documents, optionally filtered
//! - `export`: bundle the filtered (and optionally selected) documents into a ZIP
//! - `delete`: delete one deletable document through its owning record
//!
//! [`doc-export-core`]: ../../doc-export-core/
use crate::load_config::{load_config, CliConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doc_export_core::http::{HttpDocumentSource, HttpFetcher};
use doc_export_core::selection::count_by_category;
use doc_export_core::sink::DirectorySink;
use doc_export_core::{
    DocumentCategory, DocumentExporter, DocumentFilter, DocumentRecord, DocumentSource,
    ExportError, ExportSelection, OrderLabel,
};
use std::path::PathBuf;

/// CLI for doc-export: the service-order document center.
#[derive(Parser)]
#[clap(
    name = "doc-export",
    version,
    about = "List, export and delete the documents attached to a service order"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Only documents of this category (e.g. factura_venta)
    #[clap(long, value_parser = parse_category)]
    pub category: Option<DocumentCategory>,
    /// Case-insensitive text matched against description and file name
    #[clap(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> DocumentFilter {
        DocumentFilter {
            category: self.category,
            search: self.search.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the documents of a service order
    List {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        #[clap(long)]
        order_id: i64,
        #[clap(flatten)]
        filter: FilterArgs,
        /// Print the listing as JSON
        #[clap(long)]
        json: bool,
    },
    /// Export documents into a ZIP archive grouped by category
    Export {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        #[clap(long)]
        order_id: i64,
        /// Order number used to prefix file names (defaults to OS-<order-id>)
        #[clap(long)]
        order_label: Option<String>,
        /// Document ids to export; all filtered documents when omitted
        #[clap(long = "select", num_args = 1..)]
        select: Vec<String>,
        #[clap(flatten)]
        filter: FilterArgs,
    },
    /// Delete a document through its owning record
    Delete {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        #[clap(long)]
        order_id: i64,
        #[clap(long)]
        document_id: String,
    },
}

fn parse_category(s: &str) -> std::result::Result<DocumentCategory, String> {
    DocumentCategory::ALL
        .iter()
        .copied()
        .find(|c| c.tag() == s)
        .ok_or_else(|| {
            let known: Vec<&str> = DocumentCategory::ALL.iter().map(|c| c.tag()).collect();
            format!("unknown category '{}', expected one of: {}", s, known.join(", "))
        })
}

fn document_source(config: &CliConfig) -> Result<HttpDocumentSource> {
    HttpDocumentSource::new(
        &config.api.base_url,
        config.api_token.clone(),
        config.timeout(),
    )
    .context("Failed to build document listing client")
}

async fn visible_documents<S: DocumentSource>(
    source: &S,
    order_id: i64,
    filter: &DocumentFilter,
) -> Result<Vec<DocumentRecord>> {
    let documents = source
        .list_documents(order_id)
        .await
        .with_context(|| format!("Failed to list documents of order {}", order_id))?;
    let listed = documents.len();
    let visible = filter.apply(documents);
    tracing::info!(order_id, listed, visible = visible.len(), "Documents filtered");
    Ok(visible)
}

fn print_listing(documents: &[DocumentRecord]) {
    for (category, count) in count_by_category(documents) {
        println!("{} ({})", category.label(), count);
        for doc in documents.iter().filter(|d| d.category() == category) {
            let description = if doc.description.is_empty() {
                "-"
            } else {
                doc.description.as_str()
            };
            let marker = if doc.deletable { "" } else { " [locked]" };
            println!("  {}\t{}\t{}{}", doc.id, description, doc.file_name, marker);
        }
    }
    println!("{} document(s)", documents.len());
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::List {
            config,
            order_id,
            filter,
            json,
        } => {
            let config = load_config(config)?;
            tracing::info!(command = "list", order_id, "Listing documents");
            let source = document_source(&config)?;
            let documents = visible_documents(&source, order_id, &filter.to_filter()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&documents)?);
            } else {
                print_listing(&documents);
            }
            Ok(())
        }
        Commands::Export {
            config,
            order_id,
            order_label,
            select,
            filter,
        } => {
            let config = load_config(config)?;
            tracing::info!(command = "export", order_id, "Starting export");
            let source = document_source(&config)?;
            let documents = visible_documents(&source, order_id, &filter.to_filter()).await?;

            let fetcher = HttpFetcher::new(config.timeout())
                .context("Failed to build document fetch client")?
                .with_token(config.api_token.clone());
            let exporter =
                DocumentExporter::new(fetcher, DirectorySink::new(&config.export.output_dir));
            let label = OrderLabel::resolve(order_label.as_deref(), order_id);
            let mut selection = ExportSelection::from_ids(select);

            match exporter
                .export_documents(&documents, &mut selection, &label)
                .await
            {
                Ok(report) => {
                    tracing::info!(command = "export", ?report, "Export complete");
                    if report.is_empty() {
                        eprintln!(
                            "[WARN] None of the {} document(s) could be downloaded; the archive is empty.",
                            report.requested
                        );
                    } else if !report.skipped.is_empty() {
                        eprintln!(
                            "[WARN] Skipped {} document(s) that could not be downloaded: {}",
                            report.skipped.len(),
                            report.skipped.join(", ")
                        );
                    }
                    println!(
                        "Exported {} of {} document(s) to {}",
                        report.included,
                        report.requested,
                        report.location.display()
                    );
                    Ok(())
                }
                Err(ExportError::NoDocumentsSelected) => {
                    tracing::warn!(command = "export", "Nothing to export");
                    Err(anyhow::anyhow!("No documents to export"))
                }
                Err(e) => {
                    tracing::error!(command = "export", error = %e, "Export failed");
                    Err(anyhow::Error::new(e).context("Error exporting documents"))
                }
            }
        }
        Commands::Delete {
            config,
            order_id,
            document_id,
        } => {
            let config = load_config(config)?;
            tracing::info!(command = "delete", order_id, document_id = %document_id, "Deleting document");
            let source = document_source(&config)?;
            let documents = visible_documents(&source, order_id, &DocumentFilter::default()).await?;
            let record = documents
                .iter()
                .find(|d| d.id == document_id)
                .ok_or_else(|| {
                    anyhow::anyhow!("Document {} not found in order {}", document_id, order_id)
                })?;
            source
                .delete_document(record)
                .await
                .with_context(|| format!("Failed to delete document {}", document_id))?;
            println!("Deleted document {}", document_id);
            Ok(())
        }
    }
}
