//! LinkedIn connector configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the LinkedIn connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInConfig {
    /// OAuth 2.0 access token. When absent, the `LINKEDIN_ACCESS_TOKEN`
    /// environment variable is consulted at client construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Base URL for the LinkedIn API (default: https://api.linkedin.com)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Versioned-endpoint year-month string, sent as `LinkedIn-Version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Character budget for post commentary
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,

    /// API request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Timeout for fetching a page during Open Graph scraping
    #[serde(default = "default_og_fetch_timeout", with = "duration_secs")]
    pub og_fetch_timeout: Duration,

    /// Timeout for fetching image bytes before upload
    #[serde(default = "default_image_fetch_timeout", with = "duration_secs")]
    pub image_fetch_timeout: Duration,
}

fn default_api_url() -> String {
    "https://api.linkedin.com".into()
}

fn default_api_version() -> String {
    "202601".into()
}

fn default_character_limit() -> usize {
    3000
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_og_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_image_fetch_timeout() -> Duration {
    Duration::from_secs(15)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl LinkedInConfig {
    /// Resolve the bearer credential: explicit config first, then the
    /// process environment.
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .or_else(|| std::env::var("LINKEDIN_ACCESS_TOKEN").ok())
    }
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_url: default_api_url(),
            api_version: default_api_version(),
            character_limit: default_character_limit(),
            timeout: default_timeout(),
            og_fetch_timeout: default_og_fetch_timeout(),
            image_fetch_timeout: default_image_fetch_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_expectations() {
        let config = LinkedInConfig::default();
        assert_eq!(config.api_url, "https://api.linkedin.com");
        assert_eq!(config.api_version, "202601");
        assert_eq!(config.character_limit, 3000);
        assert_eq!(config.og_fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(15));
    }

    #[test]
    fn deserializes_with_sparse_input() {
        let config: LinkedInConfig =
            serde_json::from_str(r#"{"access_token":"tok","character_limit":280}"#).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert_eq!(config.character_limit, 280);
        assert_eq!(config.api_version, "202601");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_token_wins_over_environment() {
        let config = LinkedInConfig {
            access_token: Some("explicit".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_token().as_deref(), Some("explicit"));
    }
}
