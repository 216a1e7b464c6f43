use crate::cli::CommonArgs;
use crate::identity::{IdentityId, IdentityTable};
use crate::model::{ExtensionCommit, ExtensionRow, ExtensionsOutput, SCHEMA_VERSION};
use crate::session::Session;
use crate::window::{format_date, RecencyWindow};
use chrono::Utc;
use console::style;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
struct Tally<'a> {
    committers: HashSet<IdentityId>,
    files: HashSet<&'a str>,
    commit_ids: HashSet<&'a str>,
    commits: u32,
}

impl<'a> Tally<'a> {
    fn add(&mut self, committer: IdentityId, record: &'a ExtensionCommit) {
        self.committers.insert(committer);
        self.files.insert(record.file_path.as_str());
        match record.commit_id.as_deref() {
            Some(id) => {
                if self.commit_ids.insert(id) {
                    self.commits += 1;
                }
            }
            None => self.commits += 1,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct ExtensionAccum<'a> {
    days_30: Tally<'a>,
    days_90: Tally<'a>,
    all: Tally<'a>,
}

/// Tallies 30-day, 90-day and all-time activity per extension in one pass.
///
/// Records sharing a commit id count once per extension and window; records
/// without one count as a commit each. Undated records only reach the
/// all-time tally.
pub fn extension_activity(
    records: &[ExtensionCommit],
    identities: &mut IdentityTable,
    window: &RecencyWindow,
) -> Vec<ExtensionRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut accums: HashMap<&str, ExtensionAccum> = HashMap::new();

    for record in records {
        let committer = identities.intern(&record.committer);
        let accum = accums.entry(record.extension.as_str()).or_insert_with(|| {
            order.push(record.extension.as_str());
            ExtensionAccum::default()
        });

        accum.all.add(committer, record);
        if window.is_recent(&record.commit_date, 90) {
            accum.days_90.add(committer, record);
        }
        if window.is_recent(&record.commit_date, 30) {
            accum.days_30.add(committer, record);
        }
    }

    let mut rows: Vec<ExtensionRow> = order
        .into_iter()
        .map(|ext| {
            let a = &accums[ext];
            ExtensionRow {
                extension: ext.to_string(),
                committers_30: a.days_30.committers.len(),
                commits_30: a.days_30.commits,
                files_30: a.days_30.files.len(),
                committers_90: a.days_90.committers.len(),
                commits_90: a.days_90.commits,
                files_90: a.days_90.files.len(),
                committers_all: a.all.committers.len(),
                commits_all: a.all.commits,
                files_all: a.all.files.len(),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.commits_all
            .cmp(&a.commits_all)
            .then_with(|| a.extension.cmp(&b.extension))
    });
    rows
}

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let session = Session::load(&common)?;
    let mut identities = IdentityTable::from_snapshot(&session.snapshot);
    let rows = extension_activity(&session.snapshot.extension_commits, &mut identities, &session.window);

    if json {
        let output = ExtensionsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            today: format_date(session.window.date()),
            extensions: rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        output_table(&rows);
    }
    Ok(())
}

fn output_table(rows: &[ExtensionRow]) {
    if rows.is_empty() {
        println!("No commits to display");
        return;
    }

    println!(
        "{:<12} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        style("Extension").bold(),
        style("Ppl 30d").bold(),
        style("Cmt 30d").bold(),
        style("Files 30d").bold(),
        style("Ppl 90d").bold(),
        style("Cmt 90d").bold(),
        style("Files 90d").bold(),
        style("Ppl").bold(),
        style("Commits").bold(),
        style("Files").bold()
    );
    println!("{}", "─".repeat(102));
    for r in rows {
        let line = format!(
            "{:<12} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            r.extension,
            r.committers_30,
            r.commits_30,
            r.files_30,
            r.committers_90,
            r.commits_90,
            r.files_90,
            r.committers_all,
            r.commits_all,
            r.files_all
        );
        if r.committers_30 > 0 {
            println!("{}", style(line).bold());
        } else if r.committers_90 > 0 {
            println!("{line}");
        } else {
            println!("{}", style(line).dim());
        }
    }
}
