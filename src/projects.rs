use crate::cli::CommonArgs;
use crate::identity::{IdentityId, IdentityTable};
use crate::model::{ContributorProjectLink, ProjectSummary, ProjectsOutput, SCHEMA_VERSION};
use crate::session::Session;
use crate::window::{format_date, parse_date, RecencyWindow};
use chrono::{NaiveDate, Utc};
use console::style;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct ProjectContributor {
    commits: u32,
    commits_this_year: u32,
    first: Option<NaiveDate>,
    latest: Option<NaiveDate>,
}

impl ProjectContributor {
    fn merge(&mut self, link: &ContributorProjectLink) {
        self.commits += link.total_commits;
        self.commits_this_year += link.commits_this_year;
        self.first = earliest(self.first, parse_date(&link.first_commit_date));
        self.latest = latest(self.latest, parse_date(&link.latest_commit_date));
    }
}

fn earliest(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn latest(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

struct ProjectAccum<'a> {
    name: &'a str,
    order: Vec<IdentityId>,
    contributors: HashMap<IdentityId, ProjectContributor>,
}

pub fn project_summaries(
    links: &[ContributorProjectLink],
    identities: &mut IdentityTable,
    window: &RecencyWindow,
    threshold_commits: u32,
    recent_days: i64,
) -> Vec<ProjectSummary> {
    let mut projects: Vec<ProjectAccum> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for link in links {
        let id = identities.intern(&link.contributor);
        let pos = *positions.entry(link.project.as_str()).or_insert_with(|| {
            projects.push(ProjectAccum {
                name: link.project.as_str(),
                order: Vec::new(),
                contributors: HashMap::new(),
            });
            projects.len() - 1
        });
        let project = &mut projects[pos];
        if !project.contributors.contains_key(&id) {
            project.order.push(id);
        }
        project
            .contributors
            .entry(id)
            .or_insert(ProjectContributor {
                commits: 0,
                commits_this_year: 0,
                first: None,
                latest: None,
            })
            .merge(link);
    }

    let mut rows: Vec<ProjectSummary> = projects
        .iter()
        .map(|p| {
            let qualifying: Vec<&ProjectContributor> = p
                .order
                .iter()
                .map(|id| &p.contributors[id])
                .filter(|c| c.commits >= threshold_commits)
                .collect();

            let recent_contributors = qualifying
                .iter()
                .filter(|c| c.latest.is_some_and(|d| window.is_recent_date(d, recent_days)))
                .count();
            let rookies = qualifying
                .iter()
                .filter(|c| c.first.is_some_and(|d| window.is_recent_date(d, recent_days)))
                .count();
            let commits_this_year = qualifying.iter().map(|c| c.commits_this_year).sum();

            ProjectSummary {
                project: p.name.to_string(),
                contributors: qualifying.len(),
                recent_contributors,
                rookies,
                commits_this_year,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.commits_this_year.cmp(&a.commits_this_year));
    rows
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let session = Session::load(&common)?;
    let config = &session.config;
    let mut identities = IdentityTable::from_snapshot(&session.snapshot);
    let rows = project_summaries(
        &session.snapshot.links,
        &mut identities,
        &session.window,
        config.contributor_threshold_commits,
        config.recent_threshold_days,
    );

    if json {
        let output = ProjectsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            today: format_date(session.window.date()),
            contributor_threshold_commits: config.contributor_threshold_commits,
            recent_threshold_days: config.recent_threshold_days,
            projects: rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        output_table(&rows, config.recent_threshold_days);
    }
    Ok(())
}

fn output_table(rows: &[ProjectSummary], recent_days: i64) {
    if rows.is_empty() {
        println!("No projects to display");
        return;
    }

    let recent_header = format!("Recent ({recent_days}d)");
    println!(
        "{:<40} {:>12} {:>12} {:>8} {:>12}",
        style("Project").bold(),
        style("Contributors").bold(),
        style(recent_header).bold(),
        style("Rookies").bold(),
        style("This year").bold()
    );
    println!("{}", "─".repeat(88));
    for r in rows {
        println!(
            "{:<40} {:>12} {:>12} {:>8} {:>12}",
            r.project, r.contributors, r.recent_contributors, r.rookies, r.commits_this_year
        );
    }
}
