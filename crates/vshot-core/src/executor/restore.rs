//! Fire-at-most-once holder for the inverse actions a request records while
//! suppressing host UI.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type RestoreAction = Box<dyn FnOnce() -> anyhow::Result<()> + Send>;

/// One-shot restore token, constructed fresh per request.
///
/// A second `fire` is a harmless no-op, so overlapping silent downloads
/// tolerate double restoration.
pub struct RestoreOnce {
    fired: AtomicBool,
    actions: Mutex<Vec<RestoreAction>>,
}

impl RestoreOnce {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fired: AtomicBool::new(false),
            actions: Mutex::new(Vec::new()),
        })
    }

    /// Records an inverse action to run on restore.
    pub fn push(&self, action: impl FnOnce() -> anyhow::Result<()> + Send + 'static) {
        self.actions.lock().unwrap().push(Box::new(action));
    }

    /// Runs every recorded action, exactly once across all callers. Each
    /// action is independently guarded: a failing one is logged and the
    /// rest still run.
    pub fn fire(&self) {
        if self.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        let actions: Vec<RestoreAction> = std::mem::take(&mut *self.actions.lock().unwrap());
        for action in actions {
            if let Err(err) = action() {
                tracing::warn!("restore action failed: {err:#}");
            }
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
