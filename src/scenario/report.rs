//! Per-scenario reporting
//!
//! Each scenario writes its artifacts into its own directory under the
//! results root: one numbered PNG per visible action, free-form text notes
//! for key scenario data, and at most one final failure screenshot. The
//! report doubles as the [`ActionObserver`] the interaction layer notifies,
//! which is how the step counter stays in lockstep with the visual trail.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::interact::ActionObserver;

/// One named artifact attached to a scenario
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Attachment {
    /// A captured screenshot written to disk
    Image {
        /// Display name, e.g. `Action 3 (highlighted)`
        name: String,
        /// Where the PNG landed
        path: PathBuf,
    },
    /// A short text note
    Note {
        /// Display name, e.g. `Product ID Requested`
        name: String,
        /// The note body
        text: String,
    },
}

impl Attachment {
    /// The attachment's display name
    pub fn name(&self) -> &str {
        match self {
            Attachment::Image { name, .. } | Attachment::Note { name, .. } => name,
        }
    }
}

/// Collects the artifacts of a single scenario
///
/// The action counter starts at zero for every report, so attachment
/// sequencing is scenario-scoped by construction.
pub struct ScenarioReport {
    scenario: String,
    dir: PathBuf,
    actions: AtomicU32,
    attachments: Mutex<Vec<Attachment>>,
}

impl ScenarioReport {
    /// Create the report and its artifact directory
    pub fn create(results_root: &Path, scenario: &str) -> Result<Self> {
        let dir = results_root.join(slug(scenario));
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            scenario: scenario.to_string(),
            dir,
            actions: AtomicU32::new(0),
            attachments: Mutex::new(Vec::new()),
        })
    }

    /// The scenario this report belongs to
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// The scenario's artifact directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of visible actions recorded so far
    pub fn action_count(&self) -> u32 {
        self.actions.load(Ordering::SeqCst)
    }

    /// Attach a text note
    pub fn attach_note(&self, name: &str, text: &str) {
        debug!("Note `{name}`: {text}");
        self.push(Attachment::Note {
            name: name.to_string(),
            text: text.to_string(),
        });
    }

    /// Attach a PNG under the given file stem
    pub fn attach_image(&self, file_stem: &str, name: &str, png: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(format!("{file_stem}.png"));
        std::fs::write(&path, png)?;
        self.push(Attachment::Image {
            name: name.to_string(),
            path: path.clone(),
        });
        Ok(path)
    }

    /// Record one visible action's screenshot, tagged with the next sequence
    /// number
    ///
    /// Called from instrumentation, so failures are logged and swallowed.
    pub fn record_action(&self, png: &[u8]) {
        let seq = self.actions.fetch_add(1, Ordering::SeqCst) + 1;
        let stem = format!("action-{seq:02}");
        let name = format!("Action {seq} (highlighted)");
        if let Err(e) = self.attach_image(&stem, &name, png) {
            warn!("Failed to store screenshot for action {seq}: {e}");
        }
    }

    /// Record the best-effort final screenshot of a failed scenario
    ///
    /// Takes the capture attempt as a `Result` and never propagates its
    /// failure: a broken capture must not mask the failure that triggered it.
    pub fn record_failure_capture(&self, capture: Result<Vec<u8>>) {
        match capture {
            Ok(png) => {
                if let Err(e) =
                    self.attach_image("failure", "Scenario failed - final screenshot", &png)
                {
                    warn!("Failed to store failure screenshot: {e}");
                }
            }
            Err(e) => warn!("Failed to capture failure screenshot: {e}"),
        }
    }

    /// Snapshot of all attachments recorded so far
    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.lock().expect("attachment lock").clone()
    }

    fn push(&self, attachment: Attachment) {
        self.attachments
            .lock()
            .expect("attachment lock")
            .push(attachment);
    }
}

impl ActionObserver for ScenarioReport {
    fn on_action(&self, png: &[u8]) {
        self.record_action(png);
    }
}

/// Directory-safe scenario name
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_is_directory_safe() {
        assert_eq!(slug("Login lands on Products"), "login-lands-on-products");
        assert_eq!(slug("api/ui cross-check"), "api-ui-cross-check");
    }

    #[test]
    fn test_attachment_name() {
        let note = Attachment::Note {
            name: "Product Title".to_string(),
            text: "Sample Jacket".to_string(),
        };
        assert_eq!(note.name(), "Product Title");
    }
}
