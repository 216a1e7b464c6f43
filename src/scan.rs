use crate::cli::CommonArgs;
use crate::config::LandscapeConfig;
use crate::error::Result;
use crate::git::{CommitRecord, GitRepo};
use crate::identity::IdentityTable;
use crate::model::{ContributionSnapshot, ContributorProjectLink, ExtensionCommit};
use crate::util::extension_of;
use crate::window::{format_date, RecencyWindow};
use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub since: Option<String>,
    pub until: Option<String>,
    pub include_merges: bool,
    pub progress: bool,
}

impl ScanOptions {
    pub fn from_args(common: &CommonArgs, config: &LandscapeConfig) -> Self {
        Self {
            since: common.since.clone(),
            until: common.until.clone(),
            include_merges: config.include_merges,
            progress: console::Term::stderr().is_term(),
        }
    }
}

pub fn exec(common: CommonArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = LandscapeConfig::from_args(&common).context("Failed to load configuration")?;
    let window = crate::session::resolve_today(common.today.as_deref())?;
    let root = crate::session::landscape_root(&common)?;

    let snapshot = scan_landscape(&root, &ScanOptions::from_args(&common, &config), &window)
        .context("Failed to scan landscape")?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            tracing::info!(path = %path.display(), links = snapshot.links.len(), "snapshot written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<ContributionSnapshot> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn scan_landscape(
    root: &Path,
    options: &ScanOptions,
    window: &RecencyWindow,
) -> Result<ContributionSnapshot> {
    let mut snapshot = ContributionSnapshot::default();

    for (name, path) in project_dirs(root)? {
        match scan_project(&name, &path, options, window) {
            Ok(project) => {
                tracing::info!(
                    project = %name,
                    contributors = project.links.len(),
                    files = project.extension_commits.len(),
                    "scanned project"
                );
                snapshot.extend(project);
            }
            Err(e) => tracing::warn!(project = %name, error = %e, "skipping project"),
        }
    }

    Ok(snapshot)
}

fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn project_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    if is_repository(root) {
        let name = root
            .canonicalize()?
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        return Ok(vec![(name, root.to_path_buf())]);
    }

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && is_repository(&path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            dirs.push((name, path));
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn scan_project(
    name: &str,
    path: &Path,
    options: &ScanOptions,
    window: &RecencyWindow,
) -> Result<ContributionSnapshot> {
    let repo = GitRepo::open(Some(path))?;
    let range = repo.resolve_range(options.since.as_deref(), options.until.as_deref())?;
    let history = repo.collect_history(&range, options.include_merges, options.progress)?;
    Ok(project_snapshot(name, &history, window))
}

struct LinkAccum {
    email: String,
    total: u32,
    commits_30: u32,
    commits_90: u32,
    this_year: u32,
    per_year: BTreeMap<i32, u32>,
    first: NaiveDate,
    latest: NaiveDate,
}

pub fn project_snapshot(
    project: &str,
    history: &[CommitRecord],
    window: &RecencyWindow,
) -> ContributionSnapshot {
    let mut identities = IdentityTable::new();
    let mut accums: Vec<LinkAccum> = Vec::new();
    let mut extension_commits = Vec::new();

    for commit in history {
        let date = commit.timestamp.date_naive();
        let id = identities.intern(&commit.author_email);
        if id.index() == accums.len() {
            accums.push(LinkAccum {
                email: identities.display(id).to_string(),
                total: 0,
                commits_30: 0,
                commits_90: 0,
                this_year: 0,
                per_year: BTreeMap::new(),
                first: date,
                latest: date,
            });
        }

        let accum = &mut accums[id.index()];
        accum.total += 1;
        if window.is_recent_date(date, 30) {
            accum.commits_30 += 1;
        }
        if window.is_recent_date(date, 90) {
            accum.commits_90 += 1;
        }
        if date.year() == window.current_year() {
            accum.this_year += 1;
        }
        *accum.per_year.entry(date.year()).or_insert(0) += 1;
        accum.first = accum.first.min(date);
        accum.latest = accum.latest.max(date);

        let commit_date = format_date(date);
        for path in &commit.paths {
            extension_commits.push(ExtensionCommit {
                extension: extension_of(path),
                committer: commit.author_email.clone(),
                file_path: path.clone(),
                commit_date: commit_date.clone(),
                commit_id: Some(commit.id.clone()),
            });
        }
    }

    let links = accums
        .into_iter()
        .map(|a| ContributorProjectLink {
            contributor: a.email,
            project: project.to_string(),
            total_commits: a.total,
            commits_30_days: a.commits_30,
            commits_90_days: a.commits_90,
            latest_commit_date: format_date(a.latest),
            first_commit_date: format_date(a.first),
            commits_this_year: a.this_year,
            commits_per_year: a.per_year,
        })
        .collect();

    ContributionSnapshot {
        links,
        extension_commits,
    }
}
