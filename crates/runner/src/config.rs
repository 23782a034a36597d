//! Run configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SmokeError, SmokeResult};

/// Longest credential prefix ever written to console or report.
const REDACTED_PREFIX_MAX: usize = 20;

/// Smoke run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// Project metadata carried into the report
    pub project: ProjectConfig,

    /// Frontend base URL
    pub frontend_url: String,

    /// Backend API base URL
    pub backend_url: String,

    /// Timeout for each connectivity probe, in seconds
    pub probe_timeout_secs: u64,

    /// Timeout for each test case request, in seconds
    pub request_timeout_secs: u64,

    /// Where the JSON report is written
    pub output_path: PathBuf,

    /// How expected elements are looked up in HTML pages
    pub markup: MarkupMode,

    /// Credential for the checked project, injected at startup. Empty means unset.
    #[serde(default, deserialize_with = "non_empty_key")]
    pub api_key: Option<ApiKey>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            frontend_url: "http://localhost:8080".to_string(),
            backend_url: "http://localhost:3000".to_string(),
            probe_timeout_secs: 10,
            request_timeout_secs: 15,
            output_path: PathBuf::from("smoke-results/test_results.json"),
            markup: MarkupMode::default(),
            api_key: None,
        }
    }
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Display name
    pub name: String,

    /// Source checkout of the project under test
    pub path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Sistema Ministerial".to_string(),
            path: PathBuf::from("."),
        }
    }
}

/// Element lookup strategy for HTML responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupMode {
    /// Parse the page and match CSS selectors
    #[default]
    Selector,
    /// Literal substring search over the raw body
    Substring,
}

impl std::str::FromStr for MarkupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selector" => Ok(Self::Selector),
            "substring" => Ok(Self::Substring),
            other => Err(format!("unknown markup mode '{}' (expected selector or substring)", other)),
        }
    }
}

impl SmokeConfig {
    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> SmokeResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that both base URLs parse as absolute http(s) URLs
    pub fn validate(&self) -> SmokeResult<()> {
        check_url("frontend_url", &self.frontend_url)?;
        check_url("backend_url", &self.backend_url)?;
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backend status endpoint shared by the prober and the plan
    pub fn backend_status_url(&self) -> String {
        join_url(&self.backend_url, "/api/status")
    }
}

fn check_url(field: &'static str, value: &str) -> SmokeResult<()> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(SmokeError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn non_empty_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ApiKey>, D::Error> {
    let key = Option::<ApiKey>::deserialize(deserializer)?;
    Ok(key.filter(|k| !k.0.is_empty()))
}

/// Join a base URL and an absolute path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Credential for the project under test.
///
/// Only the redacted form is ever printed or serialized.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw secret, for sending to the service it belongs to
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Prefix of at most 20 characters, and never more than half the key, followed by `...`
    pub fn redacted(&self) -> String {
        let len = self.0.chars().count();
        let keep = REDACTED_PREFIX_MAX.min(len / 2);
        let prefix: String = self.0.chars().take(keep).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.redacted())
    }
}
