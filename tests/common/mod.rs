#![allow(dead_code)]

use assert_cmd::Command;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const LOCAL_REPO: &str = "local";
pub const CLOUD_REPO: &str = "cloud";

/// Digest of the blob "hello": sha1("blob 5\0hello")
pub const HELLO_DIGEST: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

/// A `kit` command running inside the given working directory
pub fn kit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find the kit binary");
    cmd.current_dir(dir);
    cmd
}

pub fn init_local(dir: &Path) {
    kit(dir).arg("init").arg(LOCAL_REPO).assert().success();
}

pub fn write_local_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(LOCAL_REPO).join(name), content).expect("Failed to write file");
}

pub fn add(dir: &Path, name: &str) {
    kit(dir).arg("add").arg(name).assert().success();
}

pub fn commit(dir: &Path, message: &str) {
    kit(dir)
        .arg("commit")
        .arg("-m")
        .arg(message)
        .assert()
        .success();
}

pub fn branches_file(dir: &Path, repo: &str) -> PathBuf {
    dir.join(repo).join(".git").join("branches.json")
}

pub fn read_branches(dir: &Path, repo: &str) -> BTreeMap<String, Vec<String>> {
    let content = std::fs::read(branches_file(dir, repo)).expect("Failed to read branches.json");
    serde_json::from_slice(&content).expect("Failed to parse branches.json")
}

pub fn read_index(dir: &Path, repo: &str) -> BTreeMap<String, String> {
    let index_path = dir.join(repo).join(".git").join("index.json");
    let content = std::fs::read(index_path).expect("Failed to read index.json");
    serde_json::from_slice(&content).expect("Failed to parse index.json")
}

pub fn read_head(dir: &Path, repo: &str) -> String {
    let head_path = dir.join(repo).join(".git").join("HEAD");
    std::fs::read_to_string(head_path).expect("Failed to read HEAD")
}

pub fn object_path(dir: &Path, repo: &str, digest: &str) -> PathBuf {
    dir.join(repo)
        .join(".git")
        .join("objects")
        .join(&digest[..2])
        .join(&digest[2..])
}

/// Read a stored object's payload: decompress and strip the header
pub fn read_object_payload(dir: &Path, repo: &str, digest: &str) -> Vec<u8> {
    let compressed = std::fs::read(object_path(dir, repo, digest)).expect("Failed to read object");

    let mut decoder = flate2::read::ZlibDecoder::new(compressed.as_slice());
    let mut content = Vec::new();
    decoder
        .read_to_end(&mut content)
        .expect("Failed to decompress object");

    let separator = content
        .iter()
        .position(|byte| *byte == b'\0')
        .expect("Object has no header separator");
    content.split_off(separator + 1)
}

/// Parse a stored commit record into (message, timestamp, files)
pub fn read_commit_record(
    dir: &Path,
    repo: &str,
    digest: &str,
) -> (String, i64, BTreeMap<String, String>) {
    let payload = read_object_payload(dir, repo, digest);
    let record: serde_json::Value =
        serde_json::from_slice(&payload).expect("Failed to parse commit record");

    let message = record["message"].as_str().expect("missing message").to_string();
    let timestamp = record["timestamp"].as_i64().expect("missing timestamp");
    let files = record["files"]
        .as_object()
        .expect("missing files")
        .iter()
        .map(|(path, digest)| (path.clone(), digest.as_str().unwrap().to_string()))
        .collect();

    (message, timestamp, files)
}
