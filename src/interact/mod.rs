//! Element interaction with visual feedback
//!
//! This module wraps the raw CDP find/click/type primitives with the
//! behavior every step relies on:
//!
//! - **Explicit waits**: every lookup polls until the element is present and
//!   visible (clicks additionally wait until the element is interactable),
//!   bounded by the profile's wait budget.
//! - **Visual trail**: before each visible action the element is
//!   highlighted, the configured slow-motion pause elapses, and the injected
//!   [`ActionObserver`] receives a screenshot. All of it is demo/debug
//!   instrumentation: with `slow.mo=0` and no observer the layer adds no
//!   overhead and no correctness depends on it.
//!
//! Driver errors from a located element propagate unmodified; nothing here
//! catches or retries them.

pub mod effects;

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::{Element, Page};
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::error::{InteractError, Result};
use crate::session::capture;

pub use effects::SlowMo;

/// Receives the screenshot captured before each visible action
///
/// Implemented by the reporting layer; the interaction layer deliberately has
/// no dependency on how the bytes are stored. A scenario without an observer
/// simply produces no trail.
pub trait ActionObserver: Send + Sync {
    /// Called with the PNG captured just before an action fires
    fn on_action(&self, png: &[u8]);
}

/// Bounds for element lookup polling
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Total budget before a lookup fails (default: 10s)
    pub budget: Duration,
    /// Poll interval (default: 100ms)
    pub poll: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            budget: Duration::from_secs(10),
            poll: Duration::from_millis(100),
        }
    }
}

impl WaitOptions {
    /// Wait options with a custom budget and the default poll interval
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }
}

/// What a lookup must observe before it returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    /// Present in the DOM with a nonzero, non-hidden box
    Visible,
    /// Visible and not disabled
    Interactable,
}

const JS_IS_VISIBLE: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}"#;

const JS_IS_INTERACTABLE: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none'
        && !this.disabled;
}"#;

const JS_CLEAR_VALUE: &str = r#"function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
}"#;

const JS_PAGE_LOADED: &str = r#"
    new Promise(resolve => {
        if (document.readyState === 'complete') {
            resolve(true);
        } else {
            window.addEventListener('load', () => resolve(true));
        }
    })
"#;

/// Wait-bounded element interaction against a single active session
#[derive(Clone)]
pub struct Interactor {
    page: Page,
    wait: WaitOptions,
    nav_timeout: Duration,
    slow_mo: SlowMo,
    observer: Option<Arc<dyn ActionObserver>>,
}

impl std::fmt::Debug for Interactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactor")
            .field("wait", &self.wait)
            .field("nav_timeout", &self.nav_timeout)
            .field("slow_mo", &self.slow_mo)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish_non_exhaustive()
    }
}

impl Interactor {
    /// Create an interactor over a page
    pub fn new(page: Page, wait: WaitOptions, nav_timeout: Duration, slow_mo: SlowMo) -> Self {
        Self {
            page,
            wait,
            nav_timeout,
            slow_mo,
            observer: None,
        }
    }

    /// Attach the observer that receives per-action screenshots
    pub fn with_observer(mut self, observer: Arc<dyn ActionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The page this interactor drives
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate to a URL and wait for the load event
    ///
    /// Single attempt: a storefront that does not come up within the
    /// page-load budget fails the step.
    #[instrument(skip(self))]
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");

        tokio::time::timeout(self.nav_timeout, self.page.goto(url))
            .await
            .map_err(|_| InteractError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: self.nav_timeout.as_millis() as u64,
            })?
            .map_err(|e| InteractError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tokio::time::timeout(self.nav_timeout, self.page.evaluate(JS_PAGE_LOADED))
            .await
            .map_err(|_| InteractError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: self.nav_timeout.as_millis() as u64,
            })??;

        Ok(())
    }

    /// Locate an element, waiting until it is present and visible
    #[instrument(skip(self))]
    pub async fn locate(&self, selector: &str) -> Result<Element> {
        self.locate_when(selector, Readiness::Visible).await
    }

    /// Click an element once it is interactable, with the visual trail
    #[instrument(skip(self))]
    pub async fn click(&self, selector: &str) -> Result<()> {
        let element = self.locate_when(selector, Readiness::Interactable).await?;
        effects::highlight(&element).await;
        self.slow_mo.pause().await;
        self.shutter().await;
        element.click().await?;
        Ok(())
    }

    /// Replace an element's content with `text`, with the visual trail
    #[instrument(skip(self, text))]
    pub async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.locate_when(selector, Readiness::Visible).await?;
        effects::highlight(&element).await;
        self.slow_mo.pause().await;
        self.shutter().await;
        element.call_js_fn(JS_CLEAR_VALUE, false).await?;
        element.focus().await?;
        element.type_str(text).await?;
        self.slow_mo.pause().await;
        Ok(())
    }

    /// Read an element's inner text (no visual effects)
    #[instrument(skip(self))]
    pub async fn read_text(&self, selector: &str) -> Result<String> {
        let element = self.locate_when(selector, Readiness::Visible).await?;
        let text = element.inner_text().await?.unwrap_or_default();
        Ok(text.trim().to_string())
    }

    /// Highlight an element for the trail, then return it for follow-up reads
    #[instrument(skip(self))]
    pub async fn emphasize(&self, selector: &str) -> Result<Element> {
        let element = self.locate_when(selector, Readiness::Visible).await?;
        effects::highlight(&element).await;
        self.slow_mo.pause().await;
        self.shutter().await;
        Ok(element)
    }

    /// Count elements matching `selector`, waiting for the first to appear
    #[instrument(skip(self))]
    pub async fn count(&self, selector: &str) -> Result<usize> {
        self.locate_when(selector, Readiness::Visible).await?;
        let elements = self.page.find_elements(selector).await?;
        Ok(elements.len())
    }

    /// Bounded poll until the element satisfies the readiness predicate
    async fn locate_when(&self, selector: &str, readiness: Readiness) -> Result<Element> {
        let deadline = Instant::now() + self.wait.budget;

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                if self.is_ready(&element, readiness).await {
                    return Ok(element);
                }
            }

            if Instant::now() >= deadline {
                let waited_ms = self.wait.budget.as_millis() as u64;
                let err = match readiness {
                    Readiness::Visible => InteractError::LookupTimeout {
                        selector: selector.to_string(),
                        waited_ms,
                    },
                    Readiness::Interactable => InteractError::NotInteractable {
                        selector: selector.to_string(),
                        waited_ms,
                    },
                };
                return Err(err.into());
            }

            tokio::time::sleep(self.wait.poll).await;
        }
    }

    /// Probe readiness in the page; a stale or detached element reads as
    /// not ready and the poll continues
    async fn is_ready(&self, element: &Element, readiness: Readiness) -> bool {
        let script = match readiness {
            Readiness::Visible => JS_IS_VISIBLE,
            Readiness::Interactable => JS_IS_INTERACTABLE,
        };
        match element.call_js_fn(script, false).await {
            Ok(ret) => ret
                .result
                .value
                .as_ref()
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Hand a screenshot to the observer, if one is registered
    ///
    /// Instrumentation must never fail a step: capture errors are logged and
    /// swallowed.
    async fn shutter(&self) {
        let Some(observer) = &self.observer else {
            return;
        };
        match capture::capture_png(&self.page).await {
            Ok(png) => observer.on_action(&png),
            Err(e) => warn!("Failed to capture action screenshot: {e}"),
        }
    }
}
