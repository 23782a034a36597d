//! smokecheck runner
//!
//! Library behind the `smokecheck` binary. A run is a short linear pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SmokeConfig  ──►  Prober::probe()        (frontend, API)    │
//! │                       │ false -> abort                       │
//! │                       ▼                                      │
//! │               build_plan() -> TestPlan   (5 fixed cases)     │
//! │                       ▼                                      │
//! │               SmokeRunner::run() -> Vec<TestResult>          │
//! │                       ▼                                      │
//! │               Report::summarize() + render_report()          │
//! │                       ▼                                      │
//! │               save_report() -> JSON file                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every case produces exactly one result, in plan order. A transport error on
//! one case is recorded as `FAILED` and the run moves on.

pub mod config;
pub mod error;
pub mod markup;
pub mod persist;
pub mod plan;
pub mod probe;
pub mod report;
pub mod runner;

pub use config::{ApiKey, MarkupMode, ProjectConfig, SmokeConfig};
pub use error::{SmokeError, SmokeResult};
pub use markup::{MarkupInspector, SelectorInspector, SubstringInspector};
pub use persist::{save_report, RunRecord};
pub use plan::{build_plan, ProjectInfo, TestCase, TestPlan};
pub use probe::{ProbeOutcome, Prober};
pub use report::{render_report, Report, Verdict};
pub use runner::{SmokeRunner, TestResult, TestStatus};
