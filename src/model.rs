use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorProjectLink {
    #[serde(rename = "contributorEmail")]
    pub contributor: String,
    #[serde(rename = "projectName")]
    pub project: String,
    pub total_commits: u32,
    pub commits_30_days: u32,
    pub commits_90_days: u32,
    pub latest_commit_date: String,
    pub first_commit_date: String,
    #[serde(default)]
    pub commits_this_year: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commits_per_year: BTreeMap<i32, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionCommit {
    pub extension: String,
    #[serde(rename = "committerEmail")]
    pub committer: String,
    pub file_path: String,
    pub commit_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSnapshot {
    #[serde(default)]
    pub links: Vec<ContributorProjectLink>,
    #[serde(default)]
    pub extension_commits: Vec<ExtensionCommit>,
}

impl ContributionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.extension_commits.is_empty()
    }

    pub fn extend(&mut self, other: ContributionSnapshot) {
        self.links.extend(other.links);
        self.extension_commits.extend(other.extension_commits);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkIndices {
    pub c_index: usize,
    pub p_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityMetric {
    pub identity: String,
    pub projects_count: u32,
    pub connections_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleWindow {
    pub days: i64,
    pub edges: Vec<EdgeRow>,
    pub indices: NetworkIndices,
    pub identities: Vec<IdentityMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRow {
    pub extension: String,
    #[serde(rename = "committers30")]
    pub committers_30: usize,
    #[serde(rename = "commits30")]
    pub commits_30: u32,
    #[serde(rename = "files30")]
    pub files_30: usize,
    #[serde(rename = "committers90")]
    pub committers_90: usize,
    #[serde(rename = "commits90")]
    pub commits_90: u32,
    #[serde(rename = "files90")]
    pub files_90: usize,
    #[serde(rename = "committersAll")]
    pub committers_all: usize,
    #[serde(rename = "commitsAll")]
    pub commits_all: u32,
    #[serde(rename = "filesAll")]
    pub files_all: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project: String,
    pub contributors: usize,
    pub recent_contributors: usize,
    pub rookies: usize,
    pub commits_this_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorSummary {
    pub identity: String,
    pub commits: u32,
    pub commits_30_days: u32,
    pub commits_90_days: u32,
    pub first_commit_date: String,
    pub latest_commit_date: String,
    pub projects_count: usize,
    pub commits_share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentContributors {
    pub days_30: usize,
    pub days_90: usize,
    pub days_180: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorsTable {
    pub total_commits: u64,
    pub recent: RecentContributors,
    pub per_year: Vec<YearActivity>,
    pub rows: Vec<ContributorSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearActivity {
    pub year: i32,
    pub commits: u64,
    pub contributors: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub today: String,
    pub windows: Vec<PeopleWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub today: String,
    pub extensions: Vec<ExtensionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub today: String,
    pub contributor_threshold_commits: u32,
    pub recent_threshold_days: i64,
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub today: String,
    pub contributors: ContributorsTable,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
