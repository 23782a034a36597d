//! smokecheck CLI - Main Entry Point
//!
//! Probes the frontend and backend, runs the built-in smoke plan, prints a
//! report and saves the results as JSON.
//!
//! Exit status: 0 once the suite has run, whatever the individual results;
//! 1 when the connectivity check fails and the suite is skipped; non-zero on
//! config or report-write errors.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use smokecheck_runner::{
    build_plan, render_report, save_report, ApiKey, MarkupMode, Prober, Report, SmokeConfig,
    SmokeRunner,
};

mod output;

const EXIT_STATUS_HELP: &str = "Exit status:\n  0  suite ran (individual failures are in the report)\n  1  connectivity check failed, suite skipped\n  other  config or report-write error";

/// smokecheck - connectivity and smoke checks for a web frontend and its API
#[derive(Parser, Debug)]
#[command(name = "smokecheck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXIT_STATUS_HELP)]
struct Cli {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "smokecheck.toml")]
    config: PathBuf,

    /// Frontend base URL
    #[arg(long, env = "SMOKECHECK_FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Backend API base URL
    #[arg(long, env = "SMOKECHECK_BACKEND_URL")]
    backend_url: Option<String>,

    /// Credential for the project under test
    #[arg(long, env = "SMOKECHECK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Path of the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Element lookup for HTML pages: selector or substring
    #[arg(long)]
    markup: Option<MarkupMode>,

    /// Probe timeout in seconds
    #[arg(long)]
    probe_timeout: Option<u64>,

    /// Per-test request timeout in seconds
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Run the suite without the connectivity pre-check
    #[arg(long)]
    skip_probe: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Load the config file and apply command-line overrides on top
    fn resolve_config(&self) -> anyhow::Result<SmokeConfig> {
        let mut config = SmokeConfig::load(&self.config)
            .with_context(|| format!("Failed to load config from {}", self.config.display()))?;

        if let Some(url) = &self.frontend_url {
            config.frontend_url = url.clone();
        }
        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            config.api_key = Some(ApiKey::new(key));
        }
        if let Some(path) = &self.output {
            config.output_path = path.clone();
        }
        if let Some(mode) = self.markup {
            config.markup = mode;
        }
        if let Some(secs) = self.probe_timeout {
            config.probe_timeout_secs = secs;
        }
        if let Some(secs) = self.request_timeout {
            config.request_timeout_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = cli.resolve_config()?;
    output::print_banner(&config);

    if cli.skip_probe {
        tracing::warn!("Connectivity probe skipped");
    } else {
        let prober = Prober::new(&config)?;
        if !prober.probe().await {
            output::print_error("Connectivity problems detected!");
            std::process::exit(1);
        }
        println!();
        output::print_success("Connectivity OK! Starting tests...");
    }

    let plan = build_plan(&config);
    output::print_info(&format!("\n📋 Test plan created with {} tests", plan.len()));

    let runner = SmokeRunner::new(&config)?;
    let results = runner.run(&plan).await;

    let report = Report::summarize(&results);
    render_report(&report, &results, &mut std::io::stdout().lock())
        .context("Failed to print report")?;

    save_report(&plan, &results, config.api_key.as_ref(), &config.output_path).with_context(|| {
        format!("Failed to save results to {}", config.output_path.display())
    })?;
    output::print_info(&format!(
        "\n💾 Results saved to: {}",
        config.output_path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["smokecheck", "--config", "/nonexistent/smokecheck.toml"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse(&[]).resolve_config().unwrap();
        assert_eq!(config.frontend_url, "http://localhost:8080");
        assert_eq!(config.backend_url, "http://localhost:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "--frontend-url",
            "http://web.test:9000",
            "--api-key",
            "sk-user-0123456789abcdefghijklmnop",
            "--markup",
            "substring",
            "--probe-timeout",
            "3",
            "-o",
            "out/results.json",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.frontend_url, "http://web.test:9000");
        assert_eq!(config.markup, MarkupMode::Substring);
        assert_eq!(config.probe_timeout(), Duration::from_secs(3));
        assert_eq!(config.output_path, PathBuf::from("out/results.json"));
        assert_eq!(
            config.api_key.map(|k| k.expose().to_string()).as_deref(),
            Some("sk-user-0123456789abcdefghijklmnop")
        );
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smokecheck.toml");
        std::fs::write(
            &path,
            "backend_url = \"http://api.test:4000\"\n[project]\nname = \"Demo\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["smokecheck", "--config", path.to_str().unwrap()]).unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.backend_url, "http://api.test:4000");
        assert_eq!(config.project.name, "Demo");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let cli = parse(&["--backend-url", "not a url"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_help_documents_exit_status() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Exit status:"));
        assert!(help.contains("connectivity check failed"));
    }

    #[test]
    fn test_unknown_markup_mode_is_a_parse_error() {
        assert!(Cli::try_parse_from(["smokecheck", "--markup", "dom"]).is_err());
    }
}
