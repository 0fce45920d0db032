//! Host download-UI visibility control (the "download shelf").
//!
//! The host exposes one global visibility flag shared by every request.
//! Suppression records its inverse on the request's restore token;
//! suppress and restore are both idempotent, so overlapping silent
//! downloads can double-invoke them without harm.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::restore::RestoreOnce;

/// Process-global download-UI visibility flag.
#[derive(Clone)]
pub struct ShelfController {
    visible: Arc<AtomicBool>,
}

impl Default for ShelfController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfController {
    pub fn new() -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Hides the shelf and records re-enabling on `restore`.
    pub fn suppress(&self, restore: &RestoreOnce) {
        self.visible.store(false, Ordering::SeqCst);
        tracing::debug!("download shelf hidden");
        let visible = Arc::clone(&self.visible);
        restore.push(move || {
            visible.store(true, Ordering::SeqCst);
            tracing::debug!("download shelf restored");
            Ok(())
        });
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}
