//! Connectivity probe - checks that the frontend and the backend answer at all

use colored::Colorize;
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::debug;

use crate::config::SmokeConfig;
use crate::error::SmokeResult;

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    /// "Frontend" or "Backend"
    pub target: &'static str,

    /// Base URL shown to the user
    pub base_url: String,

    /// HTTP status on completion, error text on transport failure
    pub result: Result<u16, String>,

    /// `services` field of a JSON backend status body
    pub services: Option<serde_json::Value>,
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(status) => {
                write!(f, "{} {} ({}): Status {}", "✅".green(), self.target, self.base_url, status)?;
                if let Some(services) = &self.services {
                    write!(f, "\n   📊 Services: {}", services)?;
                }
                Ok(())
            }
            Err(e) => write!(f, "{} {} ({}): Error - {}", "❌".red(), self.target, self.base_url, e),
        }
    }
}

/// Issues the two pre-flight requests
pub struct Prober {
    client: Client,
    frontend_url: String,
    backend_url: String,
    backend_status_url: String,
}

impl Prober {
    pub fn new(config: &SmokeConfig) -> SmokeResult<Self> {
        let client = Client::builder()
            .timeout(config.probe_timeout())
            .build()?;

        Ok(Self {
            client,
            frontend_url: config.frontend_url.clone(),
            backend_url: config.backend_url.clone(),
            backend_status_url: config.backend_status_url(),
        })
    }

    /// Probe both services, printing each status line as soon as it is known.
    ///
    /// True only when both requests complete, whatever their HTTP status.
    pub async fn probe(&self) -> bool {
        println!("🔍 Checking connectivity...");

        let outcomes = self.probe_each(|outcome| println!("{}", outcome)).await;
        outcomes.len() == 2 && outcomes.iter().all(ProbeOutcome::is_reachable)
    }

    /// Probe the frontend, then the backend status endpoint.
    ///
    /// Stops after the first transport error, so the backend is skipped when the
    /// frontend is unreachable.
    pub async fn probe_all(&self) -> Vec<ProbeOutcome> {
        self.probe_each(|_| {}).await
    }

    /// Like `probe_all`, handing each outcome to `on_outcome` before the next request starts
    pub async fn probe_each<F>(&self, mut on_outcome: F) -> Vec<ProbeOutcome>
    where
        F: FnMut(&ProbeOutcome),
    {
        let frontend = self.probe_frontend().await;
        on_outcome(&frontend);
        if !frontend.is_reachable() {
            return vec![frontend];
        }

        let backend = self.probe_backend().await;
        on_outcome(&backend);
        vec![frontend, backend]
    }

    async fn probe_frontend(&self) -> ProbeOutcome {
        debug!("Probing frontend at {}", self.frontend_url);

        let result = match self.client.get(&self.frontend_url).send().await {
            Ok(resp) => Ok(resp.status().as_u16()),
            Err(e) => Err(e.to_string()),
        };

        ProbeOutcome {
            target: "Frontend",
            base_url: self.frontend_url.clone(),
            result,
            services: None,
        }
    }

    async fn probe_backend(&self) -> ProbeOutcome {
        debug!("Probing backend at {}", self.backend_status_url);

        let mut outcome = ProbeOutcome {
            target: "Backend",
            base_url: self.backend_url.clone(),
            result: Ok(0),
            services: None,
        };

        match self.client.get(&self.backend_status_url).send().await {
            Ok(resp) => {
                let status = resp.status();
                outcome.result = Ok(status.as_u16());
                if status == StatusCode::OK {
                    // A 200 with a non-JSON body still counts as reachable
                    match resp.json::<serde_json::Value>().await {
                        Ok(body) => {
                            outcome.services = Some(
                                body.get("services")
                                    .cloned()
                                    .unwrap_or_else(|| serde_json::json!({})),
                            );
                        }
                        Err(e) => debug!("Backend status body is not JSON: {}", e),
                    }
                }
            }
            Err(e) => outcome.result = Err(e.to_string()),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        colored::control::set_override(false);

        let ok = ProbeOutcome {
            target: "Backend",
            base_url: "http://localhost:3000".to_string(),
            result: Ok(200),
            services: Some(serde_json::json!({"db": "up"})),
        };
        assert_eq!(
            ok.to_string(),
            "✅ Backend (http://localhost:3000): Status 200\n   📊 Services: {\"db\":\"up\"}"
        );

        let down = ProbeOutcome {
            target: "Frontend",
            base_url: "http://localhost:8080".to_string(),
            result: Err("connection refused".to_string()),
            services: None,
        };
        assert!(!down.is_reachable());
        assert!(down.to_string().ends_with("Error - connection refused"));
    }
}
