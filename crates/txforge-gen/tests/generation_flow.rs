//! End-to-end generation flow tests
//!
//! Exercises the full pipeline through the public API: metadata bytes in,
//! archive out, with the archive contents compared byte-for-byte against
//! the materialized files.

use std::io::{Read, Write};
use txforge_gen::pipeline::{locate_archive, GenerationPipeline, PipelineConfig};

fn config(dir: &std::path::Path, seed: u64) -> PipelineConfig {
    PipelineConfig {
        output_root: dir.join("data"),
        downloads_dir: dir.join("downloads"),
        archive_name: "generated_data.zip".to_string(),
        seed: Some(seed),
    }
}

#[test]
fn generates_and_archives_a_customer_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = GenerationPipeline::new(config(dir.path(), 21));

    let doc = br#"{
        "schemaKey": "Cust",
        "entityKey": "E1",
        "attributes": [
            {"name": "customer_id", "datatype": "INTEGER"},
            {"name": "name", "datatype": "STRING"}
        ]
    }"#;

    let report = pipeline.run("customer.json", doc, 2).unwrap();
    assert_eq!(report.file_count, 2);

    // Materialized files carry sequential customer ids and the fixed
    // operation descriptor
    let paths = report.documents[0].outcome.as_ref().unwrap();
    for (i, path) in paths.iter().enumerate() {
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();
        let record = &parsed["repeatedMessages"]["Cust"][0];
        assert_eq!(record["customer_id"], (i + 1).to_string());
        assert_eq!(record["operation"]["valueName"], "UPSERT");
        assert_eq!(record["operation"]["enumName"], "Operation");
        assert_eq!(record["operation"]["valueOrdinal"], 1);
    }

    // Archive round-trip: every materialized file appears under its
    // root-relative name with identical bytes
    let archive_file = std::fs::File::open(&report.archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(archive_file).unwrap();
    assert_eq!(archive.len(), 2);

    for (i, path) in paths.iter().enumerate() {
        let name = format!("Cust/Cust_E1_file{}.json", i + 1);
        let mut entry = archive.by_name(&name).unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, std::fs::read(path).unwrap());
    }
}

#[test]
fn container_with_malformed_document_still_produces_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = GenerationPipeline::new(config(dir.path(), 4));

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let entries: [(&str, &[u8]); 3] = [
        ("doc1.json", br#"{"schemaKey": "T1", "attributes": [{"name": "f", "datatype": "STRING"}]}"#),
        ("doc2.json", b"definitely not json"),
        ("doc3.json", br#"{"schemaKey": "T3"}"#),
    ];
    for (name, bytes) in entries {
        writer
            .start_file(name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    let container = writer.finish().unwrap().into_inner();

    let report = pipeline.run("bundle.zip", &container, 2).unwrap();

    let successes: Vec<&str> = report
        .documents
        .iter()
        .filter(|d| d.is_success())
        .map(|d| d.source.as_str())
        .collect();
    assert_eq!(successes, vec!["doc1.json", "doc3.json"]);
    assert_eq!(report.file_count, 4);

    let archive_file = std::fs::File::open(&report.archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(archive_file).unwrap();
    assert_eq!(archive.len(), 4);
    assert!(archive.by_name("T1/T1_default_entity_file1.json").is_ok());
    assert!(archive.by_name("T3/T3_default_entity_file2.json").is_ok());
}

#[test]
fn document_without_attributes_gets_synthetic_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = GenerationPipeline::new(config(dir.path(), 8));

    let report = pipeline.run("empty.json", b"{}", 1).unwrap();
    let paths = report.documents[0].outcome.as_ref().unwrap();
    assert!(paths[0].ends_with("unknown_table/unknown_schema_default_entity_file1.json"));

    let parsed: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&paths[0]).unwrap()).unwrap();
    let record = &parsed["repeatedMessages"]["unknown_table"][0];
    assert_eq!(record.as_object().unwrap().len(), 2);
    let key = record["key"].as_str().unwrap();
    assert!(key.starts_with('V'));
    assert_eq!(record["operation"]["valueName"], "UPSERT");
}

#[test]
fn produced_archive_is_locatable_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = GenerationPipeline::new(config(dir.path(), 1));
    pipeline.run("empty.json", b"{}", 1).unwrap();

    assert!(locate_archive(&dir.path().join("downloads"), "generated_data.zip").is_ok());
    assert!(locate_archive(&dir.path().join("downloads"), "other.zip").is_err());
}
