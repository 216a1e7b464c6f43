use crate::model::{PeopleOutput, PeopleWindow, SCHEMA_VERSION};
use crate::window::{format_date, RecencyWindow};
use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;

const TOP_PEOPLE: usize = 50;
const TOP_CONNECTIONS: usize = 50;

pub fn output_json(windows: &[PeopleWindow], window: &RecencyWindow) -> Result<()> {
    let output = PeopleOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        today: format_date(window.date()),
        windows: windows.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[derive(Serialize)]
struct EdgeLine<'a> {
    days: i64,
    from: &'a str,
    to: &'a str,
    weight: u32,
}

pub fn output_ndjson(windows: &[PeopleWindow]) -> Result<()> {
    for w in windows {
        for edge in &w.edges {
            let line = EdgeLine {
                days: w.days,
                from: &edge.from,
                to: &edge.to,
                weight: edge.weight,
            };
            println!("{}", serde_json::to_string(&line)?);
        }
    }
    Ok(())
}

pub fn output_table(windows: &[PeopleWindow]) {
    for w in windows {
        println!(
            "{}",
            style(format!("People dependencies ({} days)", w.days)).bold()
        );
        println!("{}", "─".repeat(80));
        println!(
            "C-index: {}  ({} people with {} or more connections to other people)",
            style(w.indices.c_index).cyan(),
            w.indices.c_index,
            w.indices.c_index
        );
        println!(
            "P-index: {}  ({} people committing to {} or more projects)\n",
            style(w.indices.p_index).cyan(),
            w.indices.p_index,
            w.indices.p_index
        );

        if w.identities.is_empty() {
            println!("No shared projects in this window\n");
            continue;
        }

        println!(
            "{:>4} {:<40} {:>9} {:>12}",
            style("#").bold(),
            style("Contributor").bold(),
            style("Projects").bold(),
            style("Connections").bold()
        );
        for (i, m) in w.identities.iter().take(TOP_PEOPLE).enumerate() {
            println!(
                "{:>4} {:<40} {:>9} {:>12}",
                i + 1,
                m.identity,
                m.projects_count,
                m.connections_count
            );
        }
        if w.identities.len() > TOP_PEOPLE {
            println!("... and {} more people", w.identities.len() - TOP_PEOPLE);
        }

        println!(
            "\n{:<40} {:<40} {:>8}",
            style("From").bold(),
            style("To").bold(),
            style("Shared").bold()
        );
        for e in w.edges.iter().take(TOP_CONNECTIONS) {
            println!("{:<40} {:<40} {:>8}", e.from, e.to, e.weight);
        }
        if w.edges.len() > TOP_CONNECTIONS {
            println!("... and {} more connections", w.edges.len() - TOP_CONNECTIONS);
        }
        println!();
    }
}
