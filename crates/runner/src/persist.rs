//! JSON report file

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::config::ApiKey;
use crate::error::SmokeResult;
use crate::plan::{ProjectInfo, TestPlan};
use crate::runner::TestResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shape of the persisted report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Local time of the write, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,

    /// Redacted credential, null when none was injected
    pub api_key: Option<String>,

    pub project: ProjectInfo,

    pub results: Vec<TestResult>,
}

impl RunRecord {
    pub fn new(plan: &TestPlan, results: &[TestResult], api_key: Option<&ApiKey>) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            api_key: api_key.map(ApiKey::redacted),
            project: plan.project.clone(),
            results: results.to_vec(),
        }
    }
}

/// Write the run to `path` as pretty-printed UTF-8 JSON, replacing any existing file
pub fn save_report(
    plan: &TestPlan,
    results: &[TestResult],
    api_key: Option<&ApiKey>,
    path: &Path,
) -> SmokeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let record = RunRecord::new(plan, results, api_key);
    let json = serde_json::to_string_pretty(&record)?;
    std::fs::write(path, json)?;

    info!("Results written to: {}", path.display());
    Ok(())
}
