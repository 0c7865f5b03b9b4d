//! Scenario context
//!
//! A per-scenario container for everything steps share: the active session,
//! a previously fetched product, the loaded settings, and the report through
//! which the interaction layer's screenshots flow. The context lives exactly
//! as long as its scenario; nothing in it outlives the After phase.

use std::sync::Arc;

use crate::api::Product;
use crate::config::Settings;
use crate::error::{Result, SessionError};
use crate::interact::{Interactor, SlowMo, WaitOptions};
use crate::scenario::report::ScenarioReport;
use crate::session::{Session, SessionProvider};

/// Shared state for one scenario's steps
pub struct ScenarioContext {
    settings: Arc<Settings>,
    report: Arc<ScenarioReport>,
    session: Option<Session>,
    product: Option<Product>,
}

impl ScenarioContext {
    /// Create a context with no session yet (the Before phase acquires one)
    pub fn new(settings: Arc<Settings>, report: Arc<ScenarioReport>) -> Self {
        Self {
            settings,
            report,
            session: None,
            product: None,
        }
    }

    /// Loaded settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// This scenario's report
    pub fn report(&self) -> &ScenarioReport {
        &self.report
    }

    /// The active session, if one has been acquired
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Store the session acquired for this scenario
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Remove and return the session for release; None outside scenario
    /// bounds
    pub fn take_session(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Acquire a session through the provider unless one is already held
    pub async fn ensure_session(&mut self, provider: &SessionProvider) -> Result<()> {
        if self.session.is_none() {
            self.session = Some(provider.acquire().await?);
        }
        Ok(())
    }

    /// The product cached by an earlier step, if any
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Cache a fetched product for later steps
    pub fn set_product(&mut self, product: Product) {
        self.product = Some(product);
    }

    /// Build an interactor over the active session
    ///
    /// The report is attached as the action observer, so every visible
    /// action lands in this scenario's trail — and only this scenario's.
    pub fn interactor(&self) -> Result<Interactor> {
        let session = self.session.as_ref().ok_or(SessionError::NotAcquired)?;
        let interactor = Interactor::new(
            session.page().clone(),
            WaitOptions::with_budget(session.implicit_wait()),
            session.page_load_timeout(),
            SlowMo::new(self.settings.slow_mo()),
        )
        .with_observer(self.report.clone());
        Ok(interactor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Product;

    fn context() -> ScenarioContext {
        let settings = Arc::new(Settings::default());
        let report = Arc::new(
            ScenarioReport::create(std::env::temp_dir().as_path(), "context-unit").unwrap(),
        );
        ScenarioContext::new(settings, report)
    }

    #[test]
    fn test_context_starts_empty() {
        let mut ctx = context();
        assert!(ctx.session().is_none());
        assert!(ctx.product().is_none());
        assert!(ctx.take_session().is_none());
    }

    #[test]
    fn test_interactor_requires_session() {
        let ctx = context();
        let err = ctx.interactor().unwrap_err();
        assert!(err.to_string().contains("No active session"));
    }

    #[test]
    fn test_product_round_trip() {
        let mut ctx = context();
        ctx.set_product(Product {
            id: 4,
            title: "Sample Jacket".to_string(),
            price: 55.99,
        });
        assert_eq!(ctx.product().unwrap().id, 4);
    }
}
