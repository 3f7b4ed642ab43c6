use std::fs;
use std::path::Path;

use hide_hooks::{absolute_from_current, sha256_file, sha256_hex};
use tempfile::tempdir;

#[test]
fn absolute_path_is_returned_unchanged() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("cli.js");
    assert_eq!(absolute_from_current(&path).expect("absolute"), path);
}

#[test]
fn relative_path_is_joined_to_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = absolute_from_current(Path::new("bin/claude")).expect("absolute");
    assert_eq!(result, cwd.join("bin/claude"));
}

#[test]
fn sha256_of_known_input() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha256_file_matches_in_memory_digest() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("bundle.js");
    let body = "x".repeat(20_000);
    fs::write(&path, &body).expect("write");
    assert_eq!(sha256_file(&path).expect("hash"), sha256_hex(body.as_bytes()));
}

#[test]
fn sha256_file_errors_for_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let err = sha256_file(&tmp.path().join("absent")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}
