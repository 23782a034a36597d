//! Sequential smoke test runner

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::markup::MarkupInspector;
use crate::plan::{TestCase, TestPlan};

/// Outcome class of a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Passed,
    Warning,
    Failed,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Warning => "WARNING",
            TestStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// Result of running a single case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Name of the case this result belongs to
    pub test: String,

    pub status: TestStatus,

    /// Seconds until the response headers arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,

    /// Parsed body of a JSON response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Character count of an HTML response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_length: Option<usize>,

    /// HTTP status of a non-200 response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Transport or decoding error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Expected elements present in an HTML response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_elements: Option<Vec<String>>,

    /// Whether the expected content was present in a JSON response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_found: Option<bool>,
}

impl TestResult {
    fn new(test: &str, status: TestStatus) -> Self {
        Self {
            test: test.to_string(),
            status,
            response_time: None,
            data: None,
            html_length: None,
            status_code: None,
            error: None,
            found_elements: None,
            content_found: None,
        }
    }

    pub fn failed(test: &str, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(test, TestStatus::Failed)
        }
    }

    /// Failure after the response arrived, keeping the measured response time
    pub fn failed_after(test: &str, error: impl Into<String>, response_time: f64) -> Self {
        Self {
            response_time: Some(response_time),
            ..Self::failed(test, error)
        }
    }

    pub fn warning(test: &str, status_code: u16, response_time: f64) -> Self {
        Self {
            status_code: Some(status_code),
            response_time: Some(response_time),
            ..Self::new(test, TestStatus::Warning)
        }
    }

    pub fn passed(test: &str, response_time: f64) -> Self {
        Self {
            response_time: Some(response_time),
            ..Self::new(test, TestStatus::Passed)
        }
    }
}

/// Runs a plan one case at a time, collecting every result
pub struct SmokeRunner {
    client: Client,
    inspector: Box<dyn MarkupInspector>,
}

impl SmokeRunner {
    /// Create a runner with the configured request timeout and markup mode
    pub fn new(config: &SmokeConfig) -> SmokeResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            inspector: config.markup.inspector(),
        })
    }

    /// Replace the element inspector
    pub fn with_inspector(mut self, inspector: Box<dyn MarkupInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    /// Run every case in plan order. Always returns one result per case.
    pub async fn run(&self, plan: &TestPlan) -> Vec<TestResult> {
        info!("Running {} test(s)...", plan.len());

        let mut results = Vec::with_capacity(plan.len());
        for case in &plan.tests {
            let result = self.run_case(case).await;
            match result.status {
                TestStatus::Passed => info!("✓ {} ({})", case.name, case.url),
                TestStatus::Warning => warn!(
                    "⚠ {} returned {}",
                    case.name,
                    result.status_code.unwrap_or_default()
                ),
                TestStatus::Failed => error!(
                    "✗ {} - {}",
                    case.name,
                    result.error.as_deref().unwrap_or("unknown error")
                ),
            }
            results.push(result);
        }

        results
    }

    /// Run a single case. Transport errors become a `FAILED` result.
    pub async fn run_case(&self, case: &TestCase) -> TestResult {
        debug!("Testing {} at {}", case.name, case.url);

        let start = Instant::now();
        let response = match self.client.get(&case.url).send().await {
            Ok(resp) => resp,
            Err(e) => return TestResult::failed(&case.name, e.to_string()),
        };
        let response_time = start.elapsed().as_secs_f64();

        let status = response.status();
        if status != StatusCode::OK {
            return TestResult::warning(&case.name, status.as_u16(), response_time);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return TestResult::failed_after(&case.name, e.to_string(), response_time),
        };

        if is_json {
            self.json_result(case, &body, response_time)
        } else {
            self.html_result(case, &body, response_time)
        }
    }

    fn json_result(&self, case: &TestCase, body: &str, response_time: f64) -> TestResult {
        let data: serde_json::Value = match serde_json::from_str(body) {
            Ok(data) => data,
            Err(e) => {
                return TestResult::failed_after(
                    &case.name,
                    format!("invalid JSON body: {}", e),
                    response_time,
                );
            }
        };
        debug!("{} data: {}", case.name, preview(&data.to_string(), 200));

        let content_found = case
            .expected_content
            .as_deref()
            .map(|needle| data.get(needle).is_some() || body.contains(needle));

        TestResult {
            data: Some(data),
            content_found,
            ..TestResult::passed(&case.name, response_time)
        }
    }

    fn html_result(&self, case: &TestCase, body: &str, response_time: f64) -> TestResult {
        let html_length = body.chars().count();
        debug!("{} HTML: {} characters", case.name, html_length);

        let found_elements = case.expected_elements.as_deref().map(|expected| {
            let found = self.inspector.find_elements(body, expected);
            debug!("{} elements found: {:?}", case.name, found);
            found
        });

        TestResult {
            html_length: Some(html_length),
            found_elements,
            ..TestResult::passed(&case.name, response_time)
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&TestStatus::Warning).unwrap(), "\"WARNING\"");
        assert_eq!(TestStatus::Passed.to_string(), "PASSED");
    }

    #[test]
    fn test_result_omits_absent_fields() {
        let result = TestResult::failed("Admin Dashboard Access", "connection refused");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "test": "Admin Dashboard Access",
                "status": "FAILED",
                "error": "connection refused"
            })
        );
    }

    #[test]
    fn test_warning_keeps_response_time() {
        let result = TestResult::warning("Student Management", 404, 0.25);
        assert_eq!(result.status_code, Some(404));
        assert_eq!(result.response_time, Some(0.25));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_failed_after_keeps_response_time() {
        let result = TestResult::failed_after("Backend API Status", "invalid JSON body", 0.4);
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.response_time, Some(0.4));
        assert_eq!(result.error.as_deref(), Some("invalid JSON body"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("gestão", 10), "gestão");
        assert_eq!(preview("gestão", 5), "gestã...");
    }
}
