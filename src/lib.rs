//! Shopcheck - End-to-End UI+API Verification Harness
//!
//! This crate drives a sample storefront end to end: it logs in through a
//! real Chromium session, fetches product data from the REST backend, adds
//! items to the cart, completes checkout, and asserts UI state against API
//! state — while recording a reviewable visual trail (highlight, slow-motion
//! pause, screenshot) of every interaction.
//!
//! # Features
//!
//! - **Session lifecycle**: one owned browser session per scenario, released
//!   on every exit path
//! - **Wait-bounded interaction**: find/click/type with explicit visibility
//!   and interactability waits
//! - **Visual trail**: per-action screenshots sequenced into a per-scenario
//!   report, plus a final screenshot on failure
//! - **API cross-checking**: product records fetched and contract-asserted
//!   alongside the UI flow
//!
//! # Architecture
//!
//! ```text
//! Runner ──▶ Scenario Context ──▶ Flows (steps)
//!                 │                    │
//!                 ▼                    ▼
//!          ┌────────────┐    ┌──────────────────┐
//!          │  Session   │    │ Pages / ApiClient│
//!          └─────┬──────┘    └────────┬─────────┘
//!                │                    │
//!                ▼                    ▼
//!          Chromium (CDP)    Interactor ──▶ Report
//!                            (wait, highlight,   (actions, notes,
//!                             pause, screenshot)  failure artifact)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shopcheck::config::Settings;
//! use shopcheck::flows;
//! use shopcheck::scenario::ScenarioRunner;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::load();
//!     let runner = ScenarioRunner::new(settings);
//!
//!     let suite = runner.run_suite(&flows::catalog()).await;
//!     std::process::exit(if suite.all_passed() { 0 } else { 1 });
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod interact;
pub mod pages;
pub mod scenario;
pub mod session;

// Re-exports for convenience
pub use api::{ApiClient, Product};
pub use config::Settings;
pub use error::{Error, Result};
pub use interact::Interactor;
pub use scenario::{ScenarioContext, ScenarioRunner, SuiteReport};
pub use session::{Session, SessionProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
