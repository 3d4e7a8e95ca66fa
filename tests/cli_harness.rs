#![allow(unused)]
//! `sift` binary integration harness.
//!
//! # What this covers
//!
//! - The binary loads a feed file, applies the criteria of a shared URL,
//!   prints the list surface, the counters and the persisted URL.
//! - `--pick` checks a company or school by display name before searching.
//! - Both catalogs are reachable through `--catalog`.
//! - A missing or malformed feed exits non-zero.
//!
//! Each run points `--config` at a path inside a temp dir so the user's own
//! config file never leaks into the results.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::*;

fn sift(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sift"))
        .args(args)
        .arg("--config")
        .arg(dir.join("config.toml"))
        .output()
        .expect("sift binary runs")
}

fn write_feed(dir: &Path, name: &str, blob: &serde_json::Value) -> String {
    let path = dir.join(name);
    std::fs::write(&path, blob.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn jobs_search_prints_list_stats_and_url() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "companies.json", &companies_blob());

    let output = sift(
        dir.path(),
        &["--catalog", "jobs", "--data", &feed, "--url", "vacancy-query=rust"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        &lines[..4],
        &[
            "Acme  https://jobs.dou.ua/companies/acme/",
            "  Rust developer ($3000–5000)",
            "Initech  https://jobs.dou.ua/companies/initech/",
            "  Senior Rust engineer",
        ]
    );
    assert!(lines[4].starts_with("2 vacancies in 2 companies"));
    assert_eq!(lines[5], "/?center=50.4435158,30.5030242,14&vacancy-query=rust");
    assert_eq!(lines.len(), 6);
}

#[test]
fn courses_search_uses_course_catalog() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "courses.json", &courses_blob());

    let output = sift(
        dir.path(),
        &["--catalog", "courses", "--data", &feed, "--url", "school-by-company=1"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("IT Academy  https://it-academy.example/"));
    assert!(!stdout.contains("Rust School"));
    assert!(stdout.contains("1 schools, 1 categories, 2 cities"));
    assert!(stdout.trim_end().ends_with("&school-by-company=1"));
}

#[test]
fn pick_checks_company_by_name() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "companies.json", &companies_blob());

    let output = sift(
        dir.path(),
        &["--catalog", "jobs", "--data", &feed, "--pick", "Globex"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        &lines[..2],
        &["Globex  https://jobs.dou.ua/companies/globex/", "  Java developer ($2000–2500)"]
    );
    assert_eq!(lines[lines.len() - 1], "/?center=50.4435158,30.5030242,14&company=globex");
}

#[test]
fn pick_checks_school_by_name() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "courses.json", &courses_blob());

    let output = sift(
        dir.path(),
        &["--catalog", "courses", "--data", &feed, "--pick", "Rust School"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Rust School  https://rust-school.example/"));
    assert!(!stdout.contains("IT Academy"));
}

#[test]
fn unknown_pick_fails() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "companies.json", &companies_blob());

    let output = sift(
        dir.path(),
        &["--catalog", "jobs", "--data", &feed, "--pick", "Umbrella"],
    );
    assert!(!output.status.success());
}

#[test]
fn missing_feed_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let output = sift(
        dir.path(),
        &["--catalog", "jobs", "--data", &missing.to_string_lossy()],
    );
    assert!(!output.status.success());
}

#[test]
fn malformed_feed_fails() {
    let dir = TempDir::new().unwrap();
    let feed = write_feed(dir.path(), "courses.json", &companies_blob());

    let output = sift(dir.path(), &["--catalog", "courses", "--data", &feed]);
    assert!(!output.status.success());
}
