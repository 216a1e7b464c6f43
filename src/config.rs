use crate::cli::CommonArgs;
use crate::error::{LandscapeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const RECENT_THRESHOLD_DAYS: i64 = 40;

pub const DEFAULT_PEOPLE_WINDOWS: [i64; 3] = [30, 90, 180];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandscapeConfig {
    pub contributor_threshold_commits: u32,
    pub recent_threshold_days: i64,
    pub people_windows: Vec<i64>,
    pub include_merges: bool,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            contributor_threshold_commits: 1,
            recent_threshold_days: RECENT_THRESHOLD_DAYS,
            people_windows: DEFAULT_PEOPLE_WINDOWS.to_vec(),
            include_merges: false,
        }
    }
}

impl LandscapeConfig {
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p.as_ref())?;
                serde_json::from_str(&raw).map_err(|e| {
                    LandscapeError::Config(format!("{}: {e}", p.as_ref().display()))
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        let mut config = Self::load(common.config.as_ref())?;
        if let Some(threshold) = common.threshold_commits {
            config.contributor_threshold_commits = threshold;
        }
        if common.include_merges {
            config.include_merges = true;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.recent_threshold_days < 0 {
            return Err(LandscapeError::Config(format!(
                "recentThresholdDays must not be negative, got {}",
                self.recent_threshold_days
            )));
        }
        if let Some(days) = self.people_windows.iter().find(|d| **d < 0) {
            return Err(LandscapeError::Config(format!(
                "people windows must not be negative, got {days}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config: LandscapeConfig =
            serde_json::from_str(r#"{ "contributorThresholdCommits": 5 }"#).unwrap();
        assert_eq!(config.contributor_threshold_commits, 5);
        assert_eq!(config.recent_threshold_days, 40);
        assert_eq!(config.people_windows, vec![30, 90, 180]);
    }

    #[test]
    fn rejects_negative_windows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "peopleWindows": [30, -1] }}"#).unwrap();
        let err = LandscapeConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, LandscapeError::Config(_)));
    }

    #[test]
    fn no_file_means_defaults() {
        let config = LandscapeConfig::load(None::<&Path>).unwrap();
        assert_eq!(config, LandscapeConfig::default());
    }
}
