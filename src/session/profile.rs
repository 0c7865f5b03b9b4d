//! Session profiles
//!
//! A [`SessionProfile`] captures everything needed to launch a browser for
//! one scenario: which browser family, headless or headed, wait budgets, and
//! viewport. Profiles are resolved once from [`Settings`] and handed to the
//! [`SessionProvider`](super::SessionProvider).

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::config::Settings;

/// Browser family to drive
///
/// Both are driven over CDP; the kind selects which executable is preferred
/// when no explicit path is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    /// Google Chrome (default)
    #[default]
    Chrome,
    /// Chromium
    Chromium,
}

impl BrowserKind {
    /// Parse a configured browser name, falling back to Chrome
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "chrome" => Self::Chrome,
            "chromium" => Self::Chromium,
            other => {
                warn!("Unknown browser `{other}`, using chrome");
                Self::Chrome
            }
        }
    }

    /// Executable names probed on PATH when no explicit path is set
    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            Self::Chromium => &["chromium", "chromium-browser"],
        }
    }
}

/// Configuration for one browser session
#[derive(Debug, Clone)]
pub struct SessionProfile {
    /// Browser family (default: Chrome)
    pub kind: BrowserKind,
    /// Run without a visible window (default: false)
    pub headless: bool,
    /// Element-wait budget for the interaction layer (default: 10s)
    pub implicit_wait: Duration,
    /// Page-load budget for navigation (default: 30s)
    pub page_load_timeout: Duration,
    /// Viewport width (default: 1920)
    pub width: u32,
    /// Viewport height (default: 1080)
    pub height: u32,
    /// Explicit browser executable (None = probe by kind, then auto-detect)
    pub executable: Option<String>,
    /// Additional browser arguments
    pub extra_args: Vec<String>,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            kind: BrowserKind::Chrome,
            headless: false,
            implicit_wait: Duration::from_secs(10),
            page_load_timeout: Duration::from_secs(30),
            width: 1920,
            height: 1080,
            executable: None,
            extra_args: Vec::new(),
        }
    }
}

impl SessionProfile {
    /// Create a new profile builder
    pub fn builder() -> SessionProfileBuilder {
        SessionProfileBuilder::default()
    }

    /// Resolve a profile from loaded settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            kind: BrowserKind::from_name(&settings.browser()),
            headless: settings.headless(),
            implicit_wait: settings.default_timeout(),
            page_load_timeout: settings.long_timeout(),
            executable: settings.get("browser.path"),
            ..Self::default()
        }
    }

    /// Arguments applied to every launch
    ///
    /// Private browsing plus disabled password-manager/autofill surfaces keep
    /// the UI deterministic across runs; the sandbox/shm flags keep CI happy.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "--incognito",
            "--no-first-run",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-notifications",
            "--disable-infobars",
            "--disable-save-password-bubble",
            "--disable-features=PasswordLeakDetection,PasswordManagerOnboarding,AutofillServerCommunication",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push(format!("--window-size={},{}", self.width, self.height));
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Resolve the executable to launch, if one can be pinned down
    ///
    /// Explicit configuration wins; otherwise the kind's well-known names are
    /// probed on PATH. Returning None defers to chromiumoxide's detection.
    pub fn resolve_executable(&self) -> Option<PathBuf> {
        if let Some(path) = &self.executable {
            return Some(PathBuf::from(path));
        }
        let path_var = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path_var) {
            for name in self.kind.candidates() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// Builder for [`SessionProfile`]
#[derive(Default)]
pub struct SessionProfileBuilder {
    profile: SessionProfile,
}

impl SessionProfileBuilder {
    /// Set the browser family
    pub fn kind(mut self, kind: BrowserKind) -> Self {
        self.profile.kind = kind;
        self
    }

    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.profile.headless = headless;
        self
    }

    /// Set the element-wait budget
    pub fn implicit_wait(mut self, wait: Duration) -> Self {
        self.profile.implicit_wait = wait;
        self
    }

    /// Set the page-load budget
    pub fn page_load_timeout(mut self, timeout: Duration) -> Self {
        self.profile.page_load_timeout = timeout;
        self
    }

    /// Set viewport dimensions
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.profile.width = width;
        self.profile.height = height;
        self
    }

    /// Set an explicit browser executable
    pub fn executable<S: Into<String>>(mut self, path: S) -> Self {
        self.profile.executable = Some(path.into());
        self
    }

    /// Add an extra browser argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.profile.extra_args.push(arg.into());
        self
    }

    /// Build the profile
    pub fn build(self) -> SessionProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default() {
        let profile = SessionProfile::default();
        assert_eq!(profile.kind, BrowserKind::Chrome);
        assert!(!profile.headless);
        assert_eq!(profile.implicit_wait, Duration::from_secs(10));
        assert_eq!(profile.page_load_timeout, Duration::from_secs(30));
        assert_eq!(profile.width, 1920);
        assert_eq!(profile.height, 1080);
        assert!(profile.executable.is_none());
        assert!(profile.extra_args.is_empty());
    }

    #[test]
    fn test_profile_builder() {
        let profile = SessionProfile::builder()
            .kind(BrowserKind::Chromium)
            .headless(true)
            .implicit_wait(Duration::from_secs(5))
            .page_load_timeout(Duration::from_secs(60))
            .viewport(1280, 720)
            .executable("/usr/bin/chromium")
            .arg("--disable-gpu")
            .build();

        assert_eq!(profile.kind, BrowserKind::Chromium);
        assert!(profile.headless);
        assert_eq!(profile.implicit_wait, Duration::from_secs(5));
        assert_eq!(profile.page_load_timeout, Duration::from_secs(60));
        assert_eq!(profile.width, 1280);
        assert_eq!(profile.height, 720);
        assert_eq!(profile.executable, Some("/usr/bin/chromium".to_string()));
        assert_eq!(profile.extra_args, vec!["--disable-gpu"]);
    }

    #[test]
    fn test_browser_kind_parsing() {
        assert_eq!(BrowserKind::from_name("chrome"), BrowserKind::Chrome);
        assert_eq!(BrowserKind::from_name("Chromium"), BrowserKind::Chromium);
        assert_eq!(BrowserKind::from_name("firefox"), BrowserKind::Chrome);
    }

    #[test]
    fn test_launch_args_include_isolation_flags() {
        let profile = SessionProfile::default();
        let args = profile.launch_args();
        assert!(args.iter().any(|a| a == "--incognito"));
        assert!(args.iter().any(|a| a.contains("PasswordLeakDetection")));
        assert!(args.iter().any(|a| a == "--window-size=1920,1080"));
    }

    #[test]
    fn test_from_settings() {
        let settings = crate::config::Settings::from_properties(
            "browser=chromium\nheadless.mode=true\ndefault.timeout=4\nlong.timeout=20\n",
        );
        let profile = SessionProfile::from_settings(&settings);
        assert_eq!(profile.kind, BrowserKind::Chromium);
        assert!(profile.headless);
        assert_eq!(profile.implicit_wait, Duration::from_secs(4));
        assert_eq!(profile.page_load_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_explicit_executable_wins() {
        let profile = SessionProfile::builder().executable("/opt/chrome").build();
        assert_eq!(profile.resolve_executable(), Some(PathBuf::from("/opt/chrome")));
    }
}
