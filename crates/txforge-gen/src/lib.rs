//! Txforge Generation Library
//!
//! Turns metadata descriptions of data entities ("schema files") into
//! batches of synthetic transaction records, and packages the generated
//! records into a single downloadable archive.
//!
//! # Processing stages
//!
//! - **[`schema`]**: extract a canonical field-name→type schema from a
//!   loosely-structured metadata document
//! - **[`synth`]**: synthesize type-appropriate random values for each
//!   field across N records, wrapped in transaction envelopes
//! - **[`materialize`]**: write each envelope to an individual JSON file
//!   under a deterministic path
//! - **[`archive`]**: bundle the generated files into one zip archive
//! - **[`container`]**: expand multi-document input bundles in memory
//! - **[`pipeline`]**: orchestrate the stages per document and aggregate
//!   the results
//!
//! # Example
//!
//! ```no_run
//! use txforge_gen::pipeline::{GenerationPipeline, PipelineConfig};
//!
//! fn main() -> txforge_common::Result<()> {
//!     let bytes = std::fs::read("customer.json")?;
//!     let mut pipeline = GenerationPipeline::new(PipelineConfig::default());
//!     let report = pipeline.run("customer.json", &bytes, 5)?;
//!     println!("archive at {}", report.archive_path.display());
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod container;
pub mod materialize;
pub mod pipeline;
pub mod schema;
pub mod synth;

// Re-export the types most callers need
pub use pipeline::{BatchReport, DocumentReport, GenerationPipeline, PipelineConfig};
pub use schema::{ExtractedSchema, FieldType};
