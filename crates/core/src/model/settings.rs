use thiserror::Error;
use url::Url;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where scores are published. `base_url: None` keeps the leaderboard local.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardSettings {
    base_url: Option<Url>,
    timeout_secs: u64,
}

#[derive(Clone, Debug, Default)]
pub struct LeaderboardSettingsDraft {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid leaderboard URL: {0}")]
    InvalidBaseUrl(String),

    #[error("leaderboard URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

impl LeaderboardSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the URL is present but unusable, or the
    /// timeout is zero.
    pub fn validate(self) -> Result<LeaderboardSettings, SettingsError> {
        let base_url = match normalize_optional(self.base_url) {
            Some(raw) => {
                let url = Url::parse(&raw).map_err(|_| SettingsError::InvalidBaseUrl(raw.clone()))?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(SettingsError::UnsupportedScheme(raw));
                }
                Some(url)
            }
            None => None,
        };

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        Ok(LeaderboardSettings {
            base_url,
            timeout_secs,
        })
    }
}

impl LeaderboardSettings {
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_means_local() {
        let settings = LeaderboardSettingsDraft {
            base_url: Some("   ".into()),
            timeout_secs: None,
        }
        .validate()
        .unwrap();
        assert!(!settings.is_remote());
        assert_eq!(settings.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn rejects_bad_urls_and_zero_timeout() {
        let bad = LeaderboardSettingsDraft {
            base_url: Some("not a url".into()),
            timeout_secs: None,
        };
        assert!(matches!(bad.validate(), Err(SettingsError::InvalidBaseUrl(_))));

        let ftp = LeaderboardSettingsDraft {
            base_url: Some("ftp://scores.example".into()),
            timeout_secs: None,
        };
        assert!(matches!(ftp.validate(), Err(SettingsError::UnsupportedScheme(_))));

        let zero = LeaderboardSettingsDraft {
            base_url: None,
            timeout_secs: Some(0),
        };
        assert_eq!(zero.validate().unwrap_err(), SettingsError::ZeroTimeout);
    }

    #[test]
    fn keeps_remote_url() {
        let settings = LeaderboardSettingsDraft {
            base_url: Some("https://dayguess.example/".into()),
            timeout_secs: Some(3),
        }
        .validate()
        .unwrap();
        assert_eq!(
            settings.base_url().map(Url::as_str),
            Some("https://dayguess.example/")
        );
        assert_eq!(settings.timeout_secs(), 3);
    }
}
