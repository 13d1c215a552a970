//! End-to-end tests for the txforge binary
//!
//! These tests validate the full generate workflow from the command line:
//! single-document and container inputs, archive production, and the
//! schema inspection command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const CUSTOMER_DOC: &[u8] = br#"{
    "schemaKey": "Cust",
    "entityKey": "E1",
    "attributes": [
        {"name": "customer_id", "datatype": "INTEGER"},
        {"name": "name", "datatype": "STRING"}
    ]
}"#;

fn txforge() -> Command {
    Command::cargo_bin("txforge").unwrap()
}

#[test]
fn test_generate_single_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("customer.json");
    std::fs::write(&input, CUSTOMER_DOC).unwrap();

    txforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--count")
        .arg("2")
        .arg("--output-dir")
        .arg(dir.path().join("data"))
        .arg("--downloads-dir")
        .arg(dir.path().join("downloads"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 file(s)"))
        .stdout(predicate::str::contains("generated_data.zip"))
        .stdout(predicate::str::contains("SHA-256:"));

    assert!(dir.path().join("data/Cust/Cust_E1_file1.json").is_file());
    assert!(dir.path().join("data/Cust/Cust_E1_file2.json").is_file());
    assert!(dir.path().join("downloads/generated_data.zip").is_file());
}

#[test]
fn test_generate_container_skips_malformed_documents() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bundle.zip");

    let mut writer = zip::ZipWriter::new(std::fs::File::create(&input).unwrap());
    let entries: [(&str, &[u8]); 2] = [
        ("good.json", br#"{"schemaKey": "Good"}"#),
        ("bad.json", b"{oops"),
    ];
    for (name, bytes) in entries {
        writer
            .start_file(name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();

    txforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--count")
        .arg("1")
        .arg("--output-dir")
        .arg(dir.path().join("data"))
        .arg("--downloads-dir")
        .arg(dir.path().join("downloads"))
        .assert()
        .success()
        .stdout(predicate::str::contains("good.json -> 1 file(s)"))
        .stdout(predicate::str::contains("bad.json -> skipped"))
        .stdout(predicate::str::contains("Generated 1 file(s)"));
}

#[test]
fn test_generate_malformed_single_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    std::fs::write(&input, b"{not json").unwrap();

    txforge()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--count")
        .arg("1")
        .arg("--output-dir")
        .arg(dir.path().join("data"))
        .arg("--downloads-dir")
        .arg(dir.path().join("downloads"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid document format"));
}

#[test]
fn test_generate_seeded_runs_match() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("customer.json");
    std::fs::write(&input, CUSTOMER_DOC).unwrap();

    for out in ["a", "b"] {
        txforge()
            .arg("generate")
            .arg("--input")
            .arg(&input)
            .arg("--count")
            .arg("1")
            .arg("--seed")
            .arg("42")
            .arg("--output-dir")
            .arg(dir.path().join(out).join("data"))
            .arg("--downloads-dir")
            .arg(dir.path().join(out).join("downloads"))
            .assert()
            .success();
    }

    let file_a = std::fs::read(dir.path().join("a/data/Cust/Cust_E1_file1.json")).unwrap();
    let file_b = std::fs::read(dir.path().join("b/data/Cust/Cust_E1_file1.json")).unwrap();
    assert_eq!(file_a, file_b);
}

#[test]
fn test_schema_command_prints_canonical_schema() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("customer.json");
    std::fs::write(&input, CUSTOMER_DOC).unwrap();

    txforge()
        .arg("schema")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Cust\""))
        .stdout(predicate::str::contains("\"customer_id\": \"integer\""))
        .stdout(predicate::str::contains("\"operation\": \"operation\""));
}

#[test]
fn test_missing_input_file_fails() {
    txforge()
        .arg("generate")
        .arg("--input")
        .arg("/nonexistent/schema.json")
        .arg("--count")
        .arg("1")
        .assert()
        .failure();
}
