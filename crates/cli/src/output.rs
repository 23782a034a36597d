//! Console output for the CLI

use colored::Colorize;
use smokecheck_runner::SmokeConfig;

const RULE_WIDTH: usize = 60;

/// Print the run header with the resolved configuration
pub fn print_banner(config: &SmokeConfig) {
    let rule = "=".repeat(RULE_WIDTH);
    let api_key = config
        .api_key
        .as_ref()
        .map(|k| k.redacted())
        .unwrap_or_else(|| "not set".dimmed().to_string());

    println!("🚀 smokecheck - {}", config.project.name.bold());
    println!("{}", rule);
    println!("🔑 API Key: {}", api_key);
    println!("🌐 Frontend: {}", config.frontend_url);
    println!("🔧 Backend: {}", config.backend_url);
    println!("📁 Project: {}", config.project.path.display());
    println!("{}", rule);
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message.green());
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message.red());
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{}", message);
}
