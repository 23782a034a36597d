//! Built-in smoke test plan

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::{join_url, SmokeConfig};

/// Project metadata written alongside the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub path: PathBuf,
    pub frontend_url: String,
    pub backend_url: String,
}

/// A single named HTTP check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique id within the plan
    pub id: String,

    /// Human-readable name, copied into the result
    pub name: String,

    /// Absolute URL to GET
    pub url: String,

    #[serde(default)]
    pub description: String,

    /// Elements looked up in HTML responses (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_elements: Option<Vec<String>>,

    /// Key or text looked up in JSON responses (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_content: Option<String>,
}

impl TestCase {
    fn page(id: &str, name: &str, url: String, description: &str, elements: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url,
            description: description.to_string(),
            expected_elements: Some(elements.iter().map(|e| e.to_string()).collect()),
            expected_content: None,
        }
    }
}

/// Ordered list of cases plus the project they target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub project: ProjectInfo,
    pub tests: Vec<TestCase>,
}

impl TestPlan {
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Build the fixed five-case plan against the configured base URLs
pub fn build_plan(config: &SmokeConfig) -> TestPlan {
    let frontend = &config.frontend_url;

    let tests = vec![
        TestCase::page(
            "TC001",
            "Admin Dashboard Access",
            join_url(frontend, "/admin"),
            "Admin dashboard is reachable",
            &["h1", "h2", "button", "input"],
        ),
        TestCase::page(
            "TC002",
            "Authentication Page",
            join_url(frontend, "/auth"),
            "Sign-in page is reachable",
            &["form", "input[type='email']", "input[type='password']", "button"],
        ),
        TestCase::page(
            "TC003",
            "Student Management",
            join_url(frontend, "/estudantes"),
            "Student management page is reachable",
            &["table", "button", "input"],
        ),
        TestCase::page(
            "TC004",
            "Program Management",
            join_url(frontend, "/programas"),
            "Program management page is reachable",
            &["h1", "button", "input"],
        ),
        TestCase {
            id: "TC005".to_string(),
            name: "Backend API Status".to_string(),
            url: config.backend_status_url(),
            description: "Backend status endpoint answers".to_string(),
            expected_elements: None,
            expected_content: Some("status".to_string()),
        },
    ];

    TestPlan {
        project: ProjectInfo {
            name: config.project.name.clone(),
            path: config.project.path.clone(),
            frontend_url: config.frontend_url.clone(),
            backend_url: config.backend_url.clone(),
        },
        tests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_plan_has_five_unique_cases() {
        let plan = build_plan(&SmokeConfig::default());
        assert_eq!(plan.len(), 5);

        let ids: HashSet<_> = plan.tests.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_plan_urls_follow_config() {
        let config = SmokeConfig {
            frontend_url: "http://web.test:9000/".to_string(),
            backend_url: "http://api.test:4000".to_string(),
            ..Default::default()
        };
        let plan = build_plan(&config);

        let urls: Vec<_> = plan.tests.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://web.test:9000/admin",
                "http://web.test:9000/auth",
                "http://web.test:9000/estudantes",
                "http://web.test:9000/programas",
                "http://api.test:4000/api/status",
            ]
        );
        assert_eq!(plan.project.backend_url, "http://api.test:4000");
    }

    #[test]
    fn test_only_api_case_expects_content() {
        let plan = build_plan(&SmokeConfig::default());
        let api = &plan.tests[4];
        assert_eq!(api.expected_content.as_deref(), Some("status"));
        assert!(api.expected_elements.is_none());
        assert!(plan.tests[..4].iter().all(|t| t.expected_elements.is_some()));
    }
}
