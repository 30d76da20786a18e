use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn folio_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("folio");
    path
}

/// Config with no credential and two text documents plus one PDF.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let docs_dir = root.join("documents");
    fs::create_dir_all(&docs_dir).unwrap();
    fs::write(
        docs_dir.join("cv.md"),
        "# CV\n\nSenior Data Scientist. Python, machine learning, SQL.",
    )
    .unwrap();
    fs::write(
        docs_dir.join("education.txt"),
        "MSc in Management of Data and Artificial Intelligence.",
    )
    .unwrap();
    fs::write(docs_dir.join("resume.pdf"), "%PDF-1.7").unwrap();

    let config_content = format!(
        r#"[completion]
api_key_env = "FOLIO_INTEGRATION_TEST_NO_KEY"

[documents]
root = "{}/documents"
include_globs = ["**/*.md", "**/*.txt"]

[server]
bind = "127.0.0.1:0"
"#,
        root.display()
    );

    let config_path = config_dir.join("folio.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_folio(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = folio_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("FOLIO_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run folio binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_ask_language_question_without_service() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_folio(
        &config_path,
        &["ask", "What languages does he speak?", "--origin"],
    );
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("[canned]"));
    assert!(stdout.contains("multilingual"));
    assert!(stdout.contains("French - C1"));
}

#[test]
fn test_ask_empty_question_lists_topics() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_folio(&config_path, &["ask", ""]);
    assert!(success);
    assert!(stdout.contains("You can ask me about"));
    assert!(stdout.contains("Contact information"));
}

#[test]
fn test_rank_orders_documents() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_folio(&config_path, &["rank", "python data"]);
    assert!(success, "rank failed: stdout={}, stderr={}", stdout, stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. [2]"));
    assert!(lines[0].ends_with("cv.md"));
    assert!(lines[1].starts_with("2. [1]"));
    assert!(lines[1].ends_with("education.txt"));
}

#[test]
fn test_rank_no_results() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_folio(&config_path, &["rank", "kubernetes"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_rank_context_separator() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_folio(&config_path, &["rank", "data", "--context"]);
    assert!(success);
    assert!(stdout.contains("\n---\n"));
}

#[test]
fn test_sources_reports_canned_and_documents() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_folio(&config_path, &["sources"]);
    assert!(success, "sources failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("responder: canned"));
    assert!(stdout.contains("cv.md"));
    assert!(stdout.contains("education.txt"));
    // PDFs are filtered out during the directory scan
    assert!(!stdout.contains("resume.pdf"));
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[completion]\ntemperature = 3.0\n").unwrap();

    let (_, stderr, success) = run_folio(&config_path, &["ask", "hi"]);
    assert!(!success);
    assert!(stderr.contains("temperature"));
}

#[test]
fn test_missing_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("nope.toml");

    let (_, stderr, success) = run_folio(&config_path, &["sources"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
