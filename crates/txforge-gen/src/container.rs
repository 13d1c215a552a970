//! Input container expansion
//!
//! A request may supply a single metadata document or a container bundling
//! many of them. Containers are expanded entirely in memory; only entries
//! matching the metadata naming convention (`*.json`) are yielded, in
//! archive order. Supported container formats: zip and gzip-compressed tar.

use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use tracing::debug;
use txforge_common::{Result, TxforgeError};

/// Classification of an input filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Zip,
    TarGz,
}

/// Detect whether a filename denotes a supported container format
///
/// Anything else is treated as a single metadata document.
pub fn container_kind(filename: &str) -> Option<ContainerKind> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".zip") {
        Some(ContainerKind::Zip)
    } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
        Some(ContainerKind::TarGz)
    } else {
        None
    }
}

/// Expand a container into `(entry_name, bytes)` pairs for its metadata
/// documents
pub fn unpack_container(kind: ContainerKind, data: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    match kind {
        ContainerKind::Zip => unpack_zip(data),
        ContainerKind::TarGz => unpack_tar_gz(data),
    }
}

fn unpack_zip(data: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;
    let mut documents = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !is_metadata_entry(entry.name()) {
            continue;
        }

        let name = entry.name().to_string();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        debug!(entry = %name, size = contents.len(), "Unpacked container entry");
        documents.push((name, contents));
    }

    Ok(documents)
}

fn unpack_tar_gz(data: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let decoder = GzDecoder::new(data);
    let mut archive = tar::Archive::new(decoder);
    let mut documents = Vec::new();

    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = entry
            .path()
            .map_err(|e| TxforgeError::invalid_format(format!("bad tar entry path: {e}")))?
            .to_string_lossy()
            .to_string();
        if !is_metadata_entry(&name) {
            continue;
        }

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;
        debug!(entry = %name, size = contents.len(), "Unpacked container entry");
        documents.push((name, contents));
    }

    Ok(documents)
}

fn is_metadata_entry(name: &str) -> bool {
    name.to_lowercase().ends_with(".json")
}
