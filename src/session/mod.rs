//! Browser session management
//!
//! This module owns the browser lifecycle: building a session from an
//! environment profile, launching Chromium over CDP, and tearing the session
//! down on every exit path. A [`Session`] is an owned value; closing it
//! consumes the handle, so a released session cannot be reused.

pub mod capture;
pub mod profile;
pub mod provider;

pub use capture::capture_png;
pub use profile::{BrowserKind, SessionProfile, SessionProfileBuilder};
pub use provider::{Session, SessionProvider};
