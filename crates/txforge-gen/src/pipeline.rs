//! Generation pipeline
//!
//! Orchestrates the processing stages for one request: parse each metadata
//! document, extract its schema, synthesize records, materialize them to
//! disk, and bundle everything into a single archive.
//!
//! For container input, documents are processed independently: a failing
//! document is logged and recorded in the report without aborting its
//! siblings. A single-document failure aborts the whole request.

use crate::archive::write_archive;
use crate::container::{container_kind, unpack_container};
use crate::materialize::materialize;
use crate::schema::extract_schema;
use crate::synth::RecordSynthesizer;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use txforge_common::{checksum, Result, TxforgeError};

/// Default directory for generated record files
pub const DEFAULT_OUTPUT_ROOT: &str = "data";

/// Default directory for produced archives
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";

/// Default archive file name
pub const DEFAULT_ARCHIVE_NAME: &str = "generated_data.zip";

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for generated record files
    pub output_root: PathBuf,

    /// Directory the archive is written to
    pub downloads_dir: PathBuf,

    /// Archive file name
    pub archive_name: String,

    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            seed: None,
        }
    }
}

/// Outcome of processing one metadata document
#[derive(Debug)]
pub struct DocumentReport {
    /// Entry name within the container, or the input file name
    pub source: String,

    /// Produced file paths, or the reason the document was skipped
    pub outcome: std::result::Result<Vec<PathBuf>, String>,
}

impl DocumentReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregated result of one generation request
#[derive(Debug)]
pub struct BatchReport {
    /// Per-document outcomes, in processing order
    pub documents: Vec<DocumentReport>,

    /// Total number of generated files across all documents
    pub file_count: usize,

    /// Path of the produced archive
    pub archive_path: PathBuf,

    /// SHA-256 digest of the produced archive
    pub archive_sha256: String,
}

/// Drives metadata documents through schema extraction, synthesis,
/// materialization, and archiving
pub struct GenerationPipeline {
    config: PipelineConfig,
    synthesizer: RecordSynthesizer<StdRng>,
}

impl GenerationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let synthesizer = match config.seed {
            Some(seed) => RecordSynthesizer::seeded(seed),
            None => RecordSynthesizer::from_entropy(),
        };
        Self {
            config,
            synthesizer,
        }
    }

    /// Process one input (a single document or a container of documents)
    /// and archive the generated files
    ///
    /// `source_name` is the input's file name; it decides container
    /// handling. `count` is the number of records generated per table per
    /// document.
    pub fn run(&mut self, source_name: &str, bytes: &[u8], count: usize) -> Result<BatchReport> {
        let documents = match container_kind(source_name) {
            Some(kind) => {
                let entries = unpack_container(kind, bytes)?;
                info!(
                    container = %source_name,
                    documents = entries.len(),
                    "Expanded container"
                );
                let mut reports = Vec::with_capacity(entries.len());
                for (name, data) in entries {
                    let outcome = match self.process_document(&data, count) {
                        Ok(paths) => Ok(paths),
                        Err(e) => {
                            warn!(document = %name, error = %e, "Skipping document");
                            Err(e.to_string())
                        },
                    };
                    reports.push(DocumentReport {
                        source: name,
                        outcome,
                    });
                }
                reports
            },
            None => {
                let paths = self.process_document(bytes, count)?;
                vec![DocumentReport {
                    source: source_name.to_string(),
                    outcome: Ok(paths),
                }]
            },
        };

        let all_paths: Vec<PathBuf> = documents
            .iter()
            .filter_map(|report| report.outcome.as_ref().ok())
            .flatten()
            .cloned()
            .collect();

        let destination = self.config.downloads_dir.join(&self.config.archive_name);
        let archive_path = write_archive(&all_paths, &self.config.output_root, &destination)?;
        let archive_sha256 = checksum::compute_file_checksum(&archive_path)?;

        info!(
            archive = %archive_path.display(),
            files = all_paths.len(),
            sha256 = %archive_sha256,
            "Generation complete"
        );

        Ok(BatchReport {
            documents,
            file_count: all_paths.len(),
            archive_path,
            archive_sha256,
        })
    }

    /// Parse, extract, synthesize, and materialize one document
    fn process_document(&mut self, bytes: &[u8], count: usize) -> Result<Vec<PathBuf>> {
        let doc: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| TxforgeError::invalid_format(e.to_string()))?;

        let extracted = extract_schema(&doc);
        info!(
            table = %extracted.table_name,
            records = count,
            "Generating records"
        );

        let envelopes = self.synthesizer.synthesize(&extracted.schema, count);
        materialize(
            &envelopes,
            &self.config.output_root,
            &extracted.schema_key,
            &extracted.entity_key,
        )
    }
}

/// Resolve a previously produced archive by name
///
/// Retrieval of an unknown name yields [`TxforgeError::ArchiveNotFound`],
/// distinct from internal failures.
pub fn locate_archive(downloads_dir: &Path, name: &str) -> Result<PathBuf> {
    let path = downloads_dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(TxforgeError::ArchiveNotFound(name.to_string()))
    }
}
