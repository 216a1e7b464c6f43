use crate::error::{LandscapeError, Result};
use crate::model::DateRange;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
    pub paths: Vec<String>,
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let mut range = DateRange::new();

        let since_dt = match since {
            Some(s) => Some(self.parse_commit_or_date(s)?),
            None => None,
        };
        let until_dt = match until {
            Some(u) => Some(self.parse_commit_or_date(u)?),
            None => None,
        };

        if let (Some(s), Some(u)) = (since_dt, until_dt) {
            if s > u {
                return Err(LandscapeError::InvalidDate(format!(
                    "Invalid range: since ({}) is after until ({})",
                    s, u
                )));
            }
        }

        if let Some(s) = since_dt {
            range = range.with_since(s);
        }
        if let Some(u) = until_dt {
            range = range.with_until(u);
        }

        Ok(range)
    }

    fn parse_commit_or_date(&self, input: &str) -> Result<DateTime<Utc>> {
        if let Some(dt) = parse_date_bound(input)? {
            return Ok(dt);
        }

        // Fallback to Git ref
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| LandscapeError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| LandscapeError::Parse(format!("Not a commit: {input}")))?;

        let secs = commit.time()?.seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| LandscapeError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }

    // paths are diffed against the first parent, or the empty tree for a root commit
    pub fn collect_history(
        &self,
        range: &DateRange,
        include_merges: bool,
        progress: bool,
    ) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = if progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Collecting commits from {}...", self.path.display()));
            pb
        } else {
            ProgressBar::hidden()
        };

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| LandscapeError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            let skip = !range.contains(&timestamp) || (!include_merges && parents.len() > 1);

            if !skip {
                let author_email = commit.author()?.email.to_string();
                let paths = self.changed_paths(commit_id, parents.first().copied())?;
                commits.push(CommitRecord {
                    id: commit_id.to_string(),
                    author_email,
                    timestamp,
                    paths,
                });
                pb.inc(1);
            }

            for pid in parents {
                stack.push_back(pid);
            }
        }

        pb.finish_and_clear();
        tracing::debug!(repo = %self.path.display(), commits = commits.len(), "collected history");
        Ok(commits)
    }

    fn changed_paths(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<Vec<String>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let changes: Vec<ChangeDetached> = match parent_id {
            Some(pid) => {
                let parent_tree = self.repo.find_commit(pid)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut paths = Vec::with_capacity(changes.len());
        for change in changes {
            match change {
                ChangeDetached::Addition { location, .. }
                | ChangeDetached::Modification { location, .. }
                | ChangeDetached::Rewrite { location, .. } => paths.push(location.to_string()),
                ChangeDetached::Deletion { .. } => {}
            }
        }
        Ok(paths)
    }
}

pub fn parse_date_bound(input: &str) -> Result<Option<DateTime<Utc>>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(Utc.from_utc_datetime(&datetime)));
        }
    }

    // "90 days ago", "2 weeks ago"
    if let Some(duration) = parse_natural_duration(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| LandscapeError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(Some(DateTime::<Utc>::from(target)));
    }

    Ok(None)
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    let units = [(" days ago", 1u64), (" weeks ago", 7), (" months ago", 30)];

    for (suffix, days) in units {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Ok(n) = n.trim().parse::<u64>() {
                return Some(Duration::from_secs(n * days * 86400));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn natural_durations() {
        assert_eq!(parse_natural_duration("3 days ago"), Some(Duration::from_secs(3 * 86400)));
        assert_eq!(parse_natural_duration("2 Weeks ago"), Some(Duration::from_secs(14 * 86400)));
        assert_eq!(parse_natural_duration("1 months ago"), Some(Duration::from_secs(30 * 86400)));
        assert_eq!(parse_natural_duration("soon"), None);
    }

    #[test]
    fn date_bounds() {
        let dt = parse_date_bound("2024-03-01").unwrap().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert!(parse_date_bound("2024-03-01T10:00:00Z").unwrap().is_some());
        assert!(parse_date_bound("main").unwrap().is_none());
    }
}
