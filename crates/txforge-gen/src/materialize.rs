//! File materialization for generated envelopes
//!
//! Rendering (serialization to named byte buffers) and writing to disk are
//! separate steps, so callers that only need an archive can skip the disk
//! round-trip.

use crate::synth::TransactionEnvelope;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use txforge_common::Result;

/// An envelope rendered to bytes, addressed by its table-relative path
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    /// Path relative to the output root: `<table>/<schemaKey>_<entityKey>_file<N>.json`
    pub relative_path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Serialize envelopes to in-memory files
///
/// File order is generation order: table order, then record order within a
/// table. Indices are 1-based per table.
pub fn render(
    envelopes_by_table: &IndexMap<String, Vec<TransactionEnvelope>>,
    schema_key: &str,
    entity_key: &str,
) -> Result<Vec<RenderedFile>> {
    let mut rendered = Vec::new();

    for (table_name, envelopes) in envelopes_by_table {
        for (i, envelope) in envelopes.iter().enumerate() {
            let filename = format!("{}_{}_file{}.json", schema_key, entity_key, i + 1);
            rendered.push(RenderedFile {
                relative_path: Path::new(table_name).join(filename),
                bytes: to_pretty_json(envelope)?,
            });
        }
    }

    Ok(rendered)
}

/// Write envelopes to individual files under `<output_root>/<table>/`
///
/// Table directories are created if absent; pre-existing files at the same
/// paths are overwritten without warning. Returns the written paths in
/// generation order.
pub fn materialize(
    envelopes_by_table: &IndexMap<String, Vec<TransactionEnvelope>>,
    output_root: &Path,
    schema_key: &str,
    entity_key: &str,
) -> Result<Vec<PathBuf>> {
    let rendered = render(envelopes_by_table, schema_key, entity_key)?;
    let mut written = Vec::with_capacity(rendered.len());

    for file in rendered {
        let path = output_root.join(&file.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.bytes)?;
        debug!(path = %path.display(), size = file.bytes.len(), "Wrote record file");
        written.push(path);
    }

    Ok(written)
}

/// Pretty-print with 4-space indentation, matching the upstream envelope
/// consumers' expected layout.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
