use crate::cli::CommonArgs;
use crate::config::LandscapeConfig;
use crate::contributors::contributor_summaries;
use crate::extensions::extension_activity;
use crate::identity::IdentityTable;
use crate::model::{
    ContributionSnapshot, ContributorsTable, ExtensionRow, PeopleWindow, ProjectSummary,
    SCHEMA_VERSION,
};
use crate::people::people_window;
use crate::projects::project_summaries;
use crate::session::Session;
use crate::window::{format_date, RecencyWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandscapeReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub today: String,
    pub people: Vec<PeopleWindow>,
    pub extensions: Vec<ExtensionRow>,
    pub projects: Vec<ProjectSummary>,
    pub contributors: ContributorsTable,
}

impl LandscapeReport {
    pub fn build(
        snapshot: &ContributionSnapshot,
        config: &LandscapeConfig,
        window: &RecencyWindow,
    ) -> Self {
        let mut identities = IdentityTable::from_snapshot(snapshot);

        let people = config
            .people_windows
            .iter()
            .map(|days| people_window(&snapshot.links, &mut identities, window, *days))
            .collect();
        let extensions = extension_activity(&snapshot.extension_commits, &mut identities, window);
        let projects = project_summaries(
            &snapshot.links,
            &mut identities,
            window,
            config.contributor_threshold_commits,
            config.recent_threshold_days,
        );
        let contributors = contributor_summaries(
            &snapshot.links,
            &mut identities,
            window,
            config.contributor_threshold_commits,
        );

        tracing::info!(
            identities = identities.len(),
            projects = projects.len(),
            extensions = extensions.len(),
            "landscape report built"
        );

        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            today: format_date(window.date()),
            people,
            extensions,
            projects,
            contributors,
        }
    }
}

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let session = Session::load(&common)?;
    let report = LandscapeReport::build(&session.snapshot, &session.config, &session.window);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
