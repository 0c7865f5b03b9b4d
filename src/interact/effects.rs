//! Visual feedback side effects
//!
//! Highlight and slow-motion pause exist purely to make automated actions
//! reviewable by a human — on screen and in the captured trail. Neither is
//! needed for correctness, and both must cost nothing when disabled.

use std::time::Duration;

use chromiumoxide::Element;
use tracing::trace;

const JS_HIGHLIGHT: &str = r#"function() {
    this.style.outline = '2px dashed red';
}"#;

// Small settle so the outline is painted before the screenshot is taken
const HIGHLIGHT_SETTLE: Duration = Duration::from_millis(50);

/// Outline an element in the page; best-effort
///
/// A highlight that fails (stale element, navigation race) is not worth
/// failing a step over.
pub async fn highlight(element: &Element) {
    if element.call_js_fn(JS_HIGHLIGHT, false).await.is_err() {
        trace!("Highlight failed, continuing");
        return;
    }
    tokio::time::sleep(HIGHLIGHT_SETTLE).await;
}

/// Deliberate pause between visible actions
///
/// Configured from `slow.mo` (milliseconds). Zero disables the pause
/// entirely: `pause()` returns immediately without touching the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowMo(Duration);

impl SlowMo {
    /// A pause of the given duration; zero disables
    pub fn new(delay: Duration) -> Self {
        Self(delay)
    }

    /// Disabled pause
    pub fn off() -> Self {
        Self(Duration::ZERO)
    }

    /// Whether the pause is disabled
    pub fn is_off(&self) -> bool {
        self.0.is_zero()
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.0
    }

    /// Sleep for the configured delay, or return immediately when disabled
    pub async fn pause(&self) {
        if self.0.is_zero() {
            return;
        }
        tokio::time::sleep(self.0).await;
    }
}

impl Default for SlowMo {
    fn default() -> Self {
        Self(Duration::from_millis(500))
    }
}
