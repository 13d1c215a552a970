//! Output archive assembly
//!
//! Bundles materialized record files into a single deflate-compressed zip.
//! Entry names are relative to the output root, so the per-table directory
//! structure is preserved while the root itself is stripped.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use txforge_common::Result;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Create (or truncate) a zip archive of the given files at `destination`
///
/// Every input path must exist and be readable at archive time; a missing
/// or unreadable source aborts the whole build. Paths outside
/// `output_root` are stored under their file name alone.
pub fn write_archive(
    paths: &[PathBuf],
    output_root: &Path,
    destination: &Path,
) -> Result<PathBuf> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(destination)?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in paths {
        let entry_name = entry_name(path, output_root);
        writer.start_file(entry_name.as_str(), options)?;

        let mut source = File::open(path)?;
        let mut contents = Vec::new();
        source.read_to_end(&mut contents)?;
        io::Write::write_all(&mut writer, &contents)?;
        debug!(entry = %entry_name, size = contents.len(), "Archived file");
    }

    writer.finish()?;
    info!(archive = %destination.display(), files = paths.len(), "Archive written");

    Ok(destination.to_path_buf())
}

/// Archive entry name for a source path: relative to the output root, with
/// forward-slash separators.
fn entry_name(path: &Path, output_root: &Path) -> String {
    let relative = path
        .strip_prefix(output_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| {
            path.file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf())
        });

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
