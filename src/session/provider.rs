//! Session acquisition and release
//!
//! The provider turns a [`SessionProfile`] into a live [`Session`]: one
//! browser process, one page, one scenario. Construction failure is fatal to
//! the scenario and is never retried here.

use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result, SessionError};
use crate::session::capture;
use crate::session::profile::SessionProfile;

/// Launches browser sessions from a fixed profile
#[derive(Debug, Clone)]
pub struct SessionProvider {
    profile: SessionProfile,
}

impl SessionProvider {
    /// Create a provider for the given profile
    pub fn new(profile: SessionProfile) -> Self {
        Self { profile }
    }

    /// The profile every acquired session is built from
    pub fn profile(&self) -> &SessionProfile {
        &self.profile
    }

    /// Launch a browser and open its page
    ///
    /// Every call constructs a fresh session; reuse within a scenario goes
    /// through the scenario context, which owns the returned value.
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Result<Session> {
        info!(
            "Launching {:?} session (headless={})",
            self.profile.kind, self.profile.headless
        );

        let mut builder = CdpBrowserConfig::builder();

        builder = builder.viewport(chromiumoxide::handler::viewport::Viewport {
            width: self.profile.width,
            height: self.profile.height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        });

        if !self.profile.headless {
            builder = builder.with_head();
        }

        if let Some(executable) = self.profile.resolve_executable() {
            debug!("Using browser executable: {}", executable.display());
            builder = builder.chrome_executable(executable);
        }

        for arg in self.profile.launch_args() {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| SessionError::ConfigRejected(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;

        // Drain CDP events for the lifetime of the session
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(SessionError::PageFailed(e.to_string()).into());
            }
        };

        info!("Session ready");

        Ok(Session {
            browser,
            handler: handler_task,
            page,
            implicit_wait: self.profile.implicit_wait,
            page_load_timeout: self.profile.page_load_timeout,
        })
    }
}

/// One live browser session
///
/// Owned exclusively by the scenario that acquired it. Closing consumes the
/// value, so a released session cannot be touched again.
pub struct Session {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    implicit_wait: Duration,
    page_load_timeout: Duration,
}

impl Session {
    /// The session's page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Element-wait budget inherited from the profile
    pub fn implicit_wait(&self) -> Duration {
        self.implicit_wait
    }

    /// Page-load budget inherited from the profile
    pub fn page_load_timeout(&self) -> Duration {
        self.page_load_timeout
    }

    /// Capture the current viewport as PNG
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        capture::capture_png(&self.page).await
    }

    /// Close the browser and reap the handler task
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        info!("Closing session");

        self.browser
            .close()
            .await
            .map_err(|e| Error::Session(SessionError::CloseFailed(e.to_string())))?;

        // Bounded wait for the handler task; a stuck handler must not hang
        // scenario teardown
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handler).await;

        info!("Session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::profile::BrowserKind;

    // Launch/close paths need a running Chrome/Chromium; they are exercised
    // by the live e2e tests. Provider construction is testable everywhere.

    #[test]
    fn test_provider_keeps_profile() {
        let profile = SessionProfile::builder()
            .kind(BrowserKind::Chromium)
            .headless(true)
            .build();
        let provider = SessionProvider::new(profile);
        assert_eq!(provider.profile().kind, BrowserKind::Chromium);
        assert!(provider.profile().headless);
    }
}
