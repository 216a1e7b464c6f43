use crate::cli::CommonArgs;
use crate::identity::{IdentityId, IdentityTable};
use crate::model::{
    ContributorProjectLink, ContributorSummary, ContributorsOutput, ContributorsTable,
    RecentContributors, YearActivity, SCHEMA_VERSION,
};
use crate::session::Session;
use crate::util::percentage;
use crate::window::{format_date, parse_date, RecencyWindow};
use chrono::{NaiveDate, Utc};
use console::style;
use std::collections::{BTreeMap, HashMap, HashSet};

const PER_YEAR_LIMIT: usize = 20;

#[derive(Debug, Default)]
struct ContributorAccum<'a> {
    commits: u32,
    commits_30: u32,
    commits_90: u32,
    first: Option<NaiveDate>,
    latest: Option<NaiveDate>,
    projects: HashSet<&'a str>,
    per_year: BTreeMap<i32, u32>,
}

pub fn contributor_summaries(
    links: &[ContributorProjectLink],
    identities: &mut IdentityTable,
    window: &RecencyWindow,
    threshold_commits: u32,
) -> ContributorsTable {
    let mut order: Vec<IdentityId> = Vec::new();
    let mut accums: HashMap<IdentityId, ContributorAccum> = HashMap::new();

    for link in links {
        let id = identities.intern(&link.contributor);
        let accum = accums.entry(id).or_insert_with(|| {
            order.push(id);
            ContributorAccum::default()
        });
        accum.commits += link.total_commits;
        accum.commits_30 += link.commits_30_days;
        accum.commits_90 += link.commits_90_days;
        if let Some(d) = parse_date(&link.first_commit_date) {
            accum.first = Some(accum.first.map_or(d, |f| f.min(d)));
        }
        if let Some(d) = parse_date(&link.latest_commit_date) {
            accum.latest = Some(accum.latest.map_or(d, |l| l.max(d)));
        }
        accum.projects.insert(link.project.as_str());
        for (year, commits) in &link.commits_per_year {
            *accum.per_year.entry(*year).or_insert(0) += commits;
        }
    }

    let kept: Vec<(IdentityId, &ContributorAccum)> = order
        .iter()
        .map(|id| (*id, &accums[id]))
        .filter(|(_, a)| a.commits >= threshold_commits)
        .collect();

    let total_commits: u64 = kept.iter().map(|(_, a)| a.commits as u64).sum();
    let recent_within = |days: i64| {
        kept.iter()
            .filter(|(_, a)| a.latest.is_some_and(|d| window.is_recent_date(d, days)))
            .count()
    };
    let recent = RecentContributors {
        days_30: recent_within(30),
        days_90: recent_within(90),
        days_180: recent_within(180),
    };

    let per_year = yearly_activity(kept.iter().map(|(_, a)| &a.per_year));

    let mut rows: Vec<ContributorSummary> = kept
        .iter()
        .map(|(id, a)| ContributorSummary {
            identity: identities.display(*id).to_string(),
            commits: a.commits,
            commits_30_days: a.commits_30,
            commits_90_days: a.commits_90,
            first_commit_date: a.first.map(format_date).unwrap_or_default(),
            latest_commit_date: a.latest.map(format_date).unwrap_or_default(),
            projects_count: a.projects.len(),
            commits_share: percentage(a.commits as u64, total_commits),
        })
        .collect();
    rows.sort_by(|a, b| b.commits.cmp(&a.commits));

    ContributorsTable {
        total_commits,
        recent,
        per_year,
        rows,
    }
}

// active = at least one commit that year
fn yearly_activity<'a>(contributors: impl Iterator<Item = &'a BTreeMap<i32, u32>>) -> Vec<YearActivity> {
    let mut years: BTreeMap<i32, YearActivity> = BTreeMap::new();
    for per_year in contributors {
        for (&year, &commits) in per_year {
            if commits == 0 {
                continue;
            }
            let entry = years.entry(year).or_insert(YearActivity {
                year,
                commits: 0,
                contributors: 0,
            });
            entry.commits += commits as u64;
            entry.contributors += 1;
        }
    }

    let skip = years.len().saturating_sub(PER_YEAR_LIMIT);
    years.into_values().skip(skip).collect()
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let session = Session::load(&common)?;
    let mut identities = IdentityTable::from_snapshot(&session.snapshot);
    let table = contributor_summaries(
        &session.snapshot.links,
        &mut identities,
        &session.window,
        session.config.contributor_threshold_commits,
    );

    if json {
        let output = ContributorsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            today: format_date(session.window.date()),
            contributors: table,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for row in &table.rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        output_table(&table, &session.window, session.config.recent_threshold_days);
    }
    Ok(())
}

fn output_table(table: &ContributorsTable, window: &RecencyWindow, recent_days: i64) {
    if table.rows.is_empty() {
        println!("No contributors to display");
        return;
    }

    if !table.per_year.is_empty() {
        println!("{:<6} {:>10} {:>14}", style("Year").bold(), style("Commits").bold(), style("Contributors").bold());
        for y in &table.per_year {
            println!("{:<6} {:>10} {:>14}", y.year, y.commits, y.contributors);
        }
        println!();
    }

    println!(
        "Recent contributors: {} (30 days), {} (90 days), {} (180 days)\n",
        style(table.recent.days_30).cyan(),
        style(table.recent.days_90).cyan(),
        style(table.recent.days_180).cyan()
    );
    println!(
        "{:<40} {:>16} {:>8} {:>8} {:>10} {:>10} {:>8}",
        style("Contributor").bold(),
        style("Commits").bold(),
        style("30d").bold(),
        style("90d").bold(),
        style("First").bold(),
        style("Latest").bold(),
        style("Projects").bold()
    );
    println!("{}", "─".repeat(106));
    for r in table.rows.iter().take(100) {
        let commits = format!("{} ({:.1}%)", r.commits, r.commits_share);
        let line = format!(
            "{:<40} {:>16} {:>8} {:>8} {:>10} {:>10} {:>8}",
            r.identity,
            commits,
            r.commits_30_days,
            r.commits_90_days,
            r.first_commit_date,
            r.latest_commit_date,
            r.projects_count
        );
        if window.is_recent(&r.latest_commit_date, recent_days) {
            println!("{}", style(line).bold());
        } else if window.is_recent(&r.latest_commit_date, 90) {
            println!("{line}");
        } else {
            println!("{}", style(line).dim());
        }
    }
    if table.rows.len() > 100 {
        println!("\n... and {} more contributors", table.rows.len() - 100);
    }
}
