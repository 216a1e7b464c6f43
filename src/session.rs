use crate::cli::CommonArgs;
use crate::config::LandscapeConfig;
use crate::error::{LandscapeError, Result};
use crate::model::ContributionSnapshot;
use crate::scan::{read_snapshot, scan_landscape, ScanOptions};
use crate::window::{parse_date, RecencyWindow};
use anyhow::Context;
use std::path::PathBuf;

pub struct Session {
    pub snapshot: ContributionSnapshot,
    pub config: LandscapeConfig,
    pub window: RecencyWindow,
}

impl Session {
    pub fn load(common: &CommonArgs) -> anyhow::Result<Self> {
        let config = LandscapeConfig::from_args(common).context("Failed to load configuration")?;
        let window = resolve_today(common.today.as_deref())?;

        let snapshot = match &common.snapshot {
            Some(path) => read_snapshot(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?,
            None => {
                let root = landscape_root(common)?;
                scan_landscape(&root, &ScanOptions::from_args(common, &config), &window)
                    .context("Failed to scan landscape")?
            }
        };

        tracing::debug!(
            links = snapshot.links.len(),
            extension_commits = snapshot.extension_commits.len(),
            today = %window.date(),
            "session loaded"
        );

        Ok(Self {
            snapshot,
            config,
            window,
        })
    }
}

pub fn resolve_today(today: Option<&str>) -> Result<RecencyWindow> {
    match today {
        Some(s) => parse_date(s)
            .map(RecencyWindow::new)
            .ok_or_else(|| LandscapeError::InvalidDate(format!("--today expects YYYY-MM-DD, got '{s}'"))),
        None => Ok(RecencyWindow::today()),
    }
}

pub fn landscape_root(common: &CommonArgs) -> Result<PathBuf> {
    match &common.landscape {
        Some(p) => Ok(p.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn today_flag_pins_the_window() {
        let window = resolve_today(Some("2024-02-29")).unwrap();
        assert_eq!(window.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(matches!(
            resolve_today(Some("29/02/2024")),
            Err(LandscapeError::InvalidDate(_))
        ));
    }

    #[test]
    fn loads_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, r#"{ "links": [], "extensionCommits": [] }"#).unwrap();
        let common = CommonArgs {
            snapshot: Some(path),
            today: Some("2024-06-30".to_string()),
            ..Default::default()
        };
        let session = Session::load(&common).unwrap();
        assert!(session.snapshot.is_empty());
        assert_eq!(session.config, LandscapeConfig::default());
    }
}
