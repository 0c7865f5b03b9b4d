//! Scenario orchestration
//!
//! The per-scenario lifecycle lives here: the context that owns the session
//! and cross-step data, the report that collects the visual trail, and the
//! runner that drives Before → steps → After with the release guarantee.

pub mod context;
pub mod report;
pub mod runner;

pub use context::ScenarioContext;
pub use report::{Attachment, ScenarioReport};
pub use runner::{Scenario, ScenarioOutcome, ScenarioPhase, ScenarioRunner, SuiteReport};
