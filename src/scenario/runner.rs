//! Scenario lifecycle and suite orchestration
//!
//! Every scenario moves through the same phases:
//!
//! ```text
//! Init ──▶ SessionAcquired ──▶ StepsRunning ──▶ Passed ─┐
//!   │             │                  │                  ├──▶ Released
//!   │             │                  └─────▶ Failed ────┘
//!   └─────────────┴── (acquire failed) ────▶ Failed ──▶ Released
//! ```
//!
//! Before: fresh report (action counter at zero), fresh context, session
//! acquired into the context. After: on failure one best-effort final
//! screenshot, then the session is taken out of the context and closed —
//! the single release site every exit path funnels through.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::scenario::context::ScenarioContext;
use crate::scenario::report::ScenarioReport;
use crate::session::{SessionProfile, SessionProvider};

/// The body of a scenario: steps executed against the shared context
pub type StepFn =
    Box<dyn for<'a> Fn(&'a mut ScenarioContext) -> BoxFuture<'a, Result<()>> + Send + Sync>;

/// One complete test case with its own Before/After lifecycle
pub struct Scenario {
    name: String,
    run: StepFn,
}

impl Scenario {
    /// Define a scenario from a name and its step body
    pub fn new(name: impl Into<String>, run: StepFn) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }

    /// The scenario's display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario").field("name", &self.name).finish()
    }
}

/// Where a scenario currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPhase {
    /// Nothing acquired yet
    Init,
    /// Session launched and stored in the context
    SessionAcquired,
    /// Step body executing
    StepsRunning,
    /// Steps completed without error
    Passed,
    /// Steps errored, or the session never came up
    Failed,
    /// Session released; terminal
    Released,
}

impl ScenarioPhase {
    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: ScenarioPhase) -> bool {
        use ScenarioPhase::*;
        matches!(
            (self, next),
            (Init, SessionAcquired)
                | (Init, Failed)
                | (SessionAcquired, StepsRunning)
                | (StepsRunning, Passed)
                | (StepsRunning, Failed)
                | (Passed, Released)
                | (Failed, Released)
        )
    }

    /// Whether the phase is terminal
    pub fn is_terminal(self) -> bool {
        self == ScenarioPhase::Released
    }
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Whether the steps completed without error
    pub passed: bool,
    /// Wall-clock duration
    pub duration_ms: u64,
    /// The failure, if any
    pub error: Option<String>,
    /// Where this scenario's artifacts were written
    pub artifacts_dir: Option<PathBuf>,
}

/// Result of running a whole catalog
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// When the suite started
    pub started_at: DateTime<Utc>,
    /// Scenario count
    pub total: usize,
    /// Scenarios that passed
    pub passed: usize,
    /// Scenarios that failed
    pub failed: usize,
    /// Wall-clock duration of the whole suite
    pub duration_ms: u64,
    /// Per-scenario outcomes, in execution order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Whether every scenario passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Drives scenarios through their lifecycle, one at a time
pub struct ScenarioRunner {
    settings: Arc<Settings>,
    provider: SessionProvider,
    results_root: PathBuf,
}

impl ScenarioRunner {
    /// Build a runner from loaded settings
    pub fn new(settings: Settings) -> Self {
        let provider = SessionProvider::new(SessionProfile::from_settings(&settings));
        let results_root = settings.results_dir();
        Self {
            settings: Arc::new(settings),
            provider,
            results_root,
        }
    }

    /// The session provider scenarios acquire through
    pub fn provider(&self) -> &SessionProvider {
        &self.provider
    }

    /// Run every scenario in order and tally the outcomes
    #[instrument(skip(self, scenarios))]
    pub async fn run_suite(&self, scenarios: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(scenarios.len());
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            let outcome = self.run_scenario(scenario).await;
            if outcome.passed {
                passed += 1;
                info!("✓ {} ({} ms)", outcome.name, outcome.duration_ms);
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    outcome.name,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
            outcomes.push(outcome);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!("");
        info!(
            "Suite results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteReport {
            started_at,
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            outcomes,
        }
    }

    /// Run one scenario through Before → steps → After
    ///
    /// The session release in the After phase is unconditional: whatever the
    /// steps did, a session stored in the context is taken out and closed
    /// exactly once.
    #[instrument(skip(self, scenario), fields(scenario = scenario.name()))]
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let start = Instant::now();
        let mut phase = ScenarioPhase::Init;

        let report = match ScenarioReport::create(&self.results_root, scenario.name()) {
            Ok(report) => Arc::new(report),
            Err(e) => {
                // No session exists yet, so there is nothing to release
                return ScenarioOutcome {
                    name: scenario.name().to_string(),
                    passed: false,
                    duration_ms: start.elapsed().as_millis() as u64,
                    error: Some(format!("could not create report: {e}")),
                    artifacts_dir: None,
                };
            }
        };
        let mut ctx = ScenarioContext::new(self.settings.clone(), report.clone());

        // Before: acquire the session into the context
        let result = match ctx.ensure_session(&self.provider).await {
            Ok(()) => {
                phase = advance(phase, ScenarioPhase::SessionAcquired);
                phase = advance(phase, ScenarioPhase::StepsRunning);
                self.run_steps(scenario, &mut ctx).await
            }
            Err(e) => Err(e),
        };

        phase = advance(
            phase,
            if result.is_ok() {
                ScenarioPhase::Passed
            } else {
                ScenarioPhase::Failed
            },
        );

        // After: best-effort failure artifact, then unconditional release
        if result.is_err() {
            if let Some(session) = ctx.session() {
                report.record_failure_capture(session.screenshot().await);
            }
        }
        if let Some(session) = ctx.take_session() {
            if let Err(e) = session.close().await {
                warn!("Error while releasing session: {e}");
            }
        }
        phase = advance(phase, ScenarioPhase::Released);
        debug_assert!(phase.is_terminal());

        ScenarioOutcome {
            name: scenario.name().to_string(),
            passed: result.is_ok(),
            duration_ms: start.elapsed().as_millis() as u64,
            error: result.err().map(|e| e.to_string()),
            artifacts_dir: Some(report.dir().to_path_buf()),
        }
    }

    /// Execute the step body, racing it against cancellation
    ///
    /// Ctrl-C while steps run becomes a fatal interrupted error for the
    /// scenario; teardown still happens in the caller.
    async fn run_steps(&self, scenario: &Scenario, ctx: &mut ScenarioContext) -> Result<()> {
        let cancelled = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => (),
                Err(e) => {
                    // No signal handler; wait forever instead of spuriously
                    // cancelling the scenario
                    warn!("Cannot listen for Ctrl-C: {e}");
                    futures::future::pending::<()>().await
                }
            }
        };

        tokio::select! {
            result = (scenario.run)(ctx) => result,
            _ = cancelled => Err(Error::Interrupted(
                "cancelled while steps were running".to_string(),
            )),
        }
    }

    /// Write the suite summary JSON under the results root
    pub fn write_summary(&self, suite: &SuiteReport) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.results_root)?;
        let path = self.results_root.join("summary.json");
        let json = serde_json::to_string_pretty(suite)?;
        std::fs::write(&path, json)?;
        info!("Summary written to: {}", path.display());
        Ok(path)
    }
}

/// Advance the phase machine, flagging illegal transitions in debug builds
fn advance(from: ScenarioPhase, to: ScenarioPhase) -> ScenarioPhase {
    debug_assert!(
        from.can_advance_to(to),
        "illegal phase transition {from:?} -> {to:?}"
    );
    to
}
