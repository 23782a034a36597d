//! Summary counts, success rate and the final verdict

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::runner::{TestResult, TestStatus};

const RULE_WIDTH: usize = 60;

/// Aggregate counts over a result sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub passed: usize,
    pub warning: usize,
    pub failed: usize,
    pub total: usize,
    /// Percentage of passed cases, 0.0 for an empty run
    pub success_rate: f64,
}

impl Report {
    pub fn summarize(results: &[TestResult]) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();

        let passed = count(TestStatus::Passed);
        let total = results.len();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };

        Self {
            passed,
            warning: count(TestStatus::Warning),
            failed: count(TestStatus::Failed),
            total,
            success_rate,
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_rate(self.success_rate)
    }
}

/// Qualitative reading of the success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Problem,
    Regular,
    Good,
    Excellent,
}

impl Verdict {
    pub fn from_rate(success_rate: f64) -> Self {
        if success_rate >= 90.0 {
            Verdict::Excellent
        } else if success_rate >= 70.0 {
            Verdict::Good
        } else if success_rate >= 50.0 {
            Verdict::Regular
        } else {
            Verdict::Problem
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "excellent",
            Verdict::Good => "good",
            Verdict::Regular => "regular",
            Verdict::Problem => "problem",
        }
    }

    fn headline(&self) -> ColoredString {
        match self {
            Verdict::Excellent => "🎉 EXCELLENT! System working as expected".green().bold(),
            Verdict::Good => "✅ GOOD! System working with minor issues".green(),
            Verdict::Regular => "⚠️ REGULAR! System has some issues".yellow(),
            Verdict::Problem => "❌ PROBLEM! System has significant issues".red().bold(),
        }
    }
}

fn status_icon(status: TestStatus) -> ColoredString {
    match status {
        TestStatus::Passed => "✅".green(),
        TestStatus::Warning => "⚠️".yellow(),
        TestStatus::Failed => "❌".red(),
    }
}

/// Write the summary, per-test details and verdict
pub fn render_report<W: Write>(report: &Report, results: &[TestResult], out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "📊 FINAL TEST REPORT")?;
    writeln!(out, "{}", rule)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Passed", "Warnings", "Failed", "Total", "Success rate"])
        .add_row(vec![
            report.passed.to_string(),
            report.warning.to_string(),
            report.failed.to_string(),
            report.total.to_string(),
            format!("{:.1}%", report.success_rate),
        ]);
    writeln!(out, "{table}")?;

    writeln!(out)?;
    writeln!(out, "📋 DETAILS PER TEST:")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for result in results {
        writeln!(out, "{} {}: {}", status_icon(result.status), result.test, result.status)?;
        if let Some(secs) = result.response_time {
            writeln!(out, "   ⏱️ Response time: {:.2}s", secs)?;
        }
        if let Some(code) = result.status_code {
            writeln!(out, "   🔢 HTTP status: {}", code)?;
        }
        if let Some(error) = &result.error {
            writeln!(out, "   🚨 Error: {}", error)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "🎯 CONCLUSION:")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", report.verdict().headline())?;

    Ok(())
}
