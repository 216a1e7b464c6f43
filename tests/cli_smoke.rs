use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path, email: &str) {
    fs::create_dir_all(dir).unwrap();
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", email]);
    git(dir, &["config", "user.name", "Your Name"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, email: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    let author = format!("Someone <{email}>");
    git(dir, &["commit", "-m", &format!("add {name}"), "--author", &author]);
}

const SNAPSHOT: &str = r#"{
  "links": [
    { "contributorEmail": "a@x.com", "projectName": "Alpha", "totalCommits": 10, "commits30Days": 2, "commits90Days": 4,
      "latestCommitDate": "2024-06-20", "firstCommitDate": "2022-01-01", "commitsThisYear": 5 },
    { "contributorEmail": "b@x.com", "projectName": "Alpha", "totalCommits": 3, "commits30Days": 1, "commits90Days": 1,
      "latestCommitDate": "2024-06-25", "firstCommitDate": "2024-06-01", "commitsThisYear": 3 },
    { "contributorEmail": "a@x.com", "projectName": "Beta", "totalCommits": 7, "commits30Days": 1, "commits90Days": 1,
      "latestCommitDate": "2024-06-10", "firstCommitDate": "2023-03-01", "commitsThisYear": 2 },
    { "contributorEmail": "b@X.COM", "projectName": "Beta", "totalCommits": 1, "commits30Days": 1, "commits90Days": 1,
      "latestCommitDate": "2024-06-11", "firstCommitDate": "2024-06-11", "commitsThisYear": 1 }
  ],
  "extensionCommits": [
    { "extension": "go", "committerEmail": "c@x.com", "filePath": "a.go", "commitDate": "2024-06-25", "commitId": "c1" },
    { "extension": "go", "committerEmail": "c@x.com", "filePath": "b.go", "commitDate": "2024-06-25", "commitId": "c1" },
    { "extension": "go", "committerEmail": "c@x.com", "filePath": "c.go", "commitDate": "2024-06-25", "commitId": "c1" }
  ]
}"#;

fn write_snapshot(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("snapshot.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("landgraph").unwrap();
    cmd.args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn people_json_merges_case_variants() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let v = run_json(&[
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--today",
        "2024-06-30",
        "people",
        "--window",
        "30",
        "--json",
    ]);

    let windows = v["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 1);
    let edges = windows[0]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["from"], "a@x.com");
    assert_eq!(edges[0]["to"], "b@x.com");
    assert_eq!(edges[0]["weight"], 2);
    assert_eq!(windows[0]["indices"]["cIndex"], 1);
}

#[test]
fn extensions_json_counts_commit_once() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let v = run_json(&[
        "--snapshot",
        snapshot.to_str().unwrap(),
        "--today",
        "2024-06-30",
        "extensions",
        "--json",
    ]);

    let row = &v["extensions"][0];
    assert_eq!(row["extension"], "go");
    assert_eq!(row["commits30"], 1);
    assert_eq!(row["files30"], 3);
    assert_eq!(row["committers30"], 1);
}

#[test]
fn report_contains_every_table() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let v = run_json(&["--snapshot", snapshot.to_str().unwrap(), "--today", "2024-06-30", "report"]);

    assert_eq!(v["people"].as_array().unwrap().len(), 3);
    let projects = v["projects"].as_array().unwrap();
    assert_eq!(projects[0]["project"], "Alpha");
    assert_eq!(projects[0]["rookies"], 1);
    assert_eq!(v["contributors"]["totalCommits"], 21);
}

#[test]
fn bad_today_fails() {
    let dir = tempdir().unwrap();
    let snapshot = write_snapshot(dir.path());
    let mut cmd = Command::cargo_bin("landgraph").unwrap();
    cmd.args(["--snapshot", snapshot.to_str().unwrap(), "--today", "June", "people"]);
    cmd.assert().failure();
}

#[test]
fn scan_builds_snapshot_from_repositories() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let alpha = dir.path().join("alpha");
    let beta = dir.path().join("beta");
    init_git_repo(&alpha, "a@x.com");
    init_git_repo(&beta, "a@x.com");
    commit_file(&alpha, "src/main.rs", "fn main(){}\n", "a@x.com");
    commit_file(&alpha, "src/lib.rs", "pub fn f(){}\n", "b@x.com");
    commit_file(&beta, "README.md", "hi\n", "A@x.com");
    commit_file(&beta, "docs/guide.md", "guide\n", "b@x.com");

    let v = run_json(&["--landscape", dir.path().to_str().unwrap(), "scan"]);
    let links = v["links"].as_array().unwrap();
    assert_eq!(links.len(), 4);
    let projects: Vec<_> = links.iter().map(|l| l["projectName"].as_str().unwrap()).collect();
    assert!(projects.contains(&"alpha"));
    assert!(projects.contains(&"beta"));
    assert!(!v["extensionCommits"].as_array().unwrap().is_empty());

    let people = run_json(&["--landscape", dir.path().to_str().unwrap(), "people", "--window", "30", "--json"]);
    let edges = people["windows"][0]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["weight"], 2);

    let contributors = run_json(&["--landscape", dir.path().to_str().unwrap(), "contributors", "--json"]);
    let years = contributors["contributors"]["perYear"].as_array().unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years[0]["commits"], 4);
    assert_eq!(years[0]["contributors"], 2);
}
