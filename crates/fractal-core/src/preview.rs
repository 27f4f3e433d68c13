//! Preview host: live sandbox frames and their lifecycle.
//!
//! Rendering hands a [`SandboxDocument`] to an isolated frame addressed by
//! an opaque locator. Each render fully supersedes the previous one; the
//! superseded frame's registration is released so repeated generations
//! within one session do not accumulate resources.

use crate::sandbox::SandboxDocument;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

type FrameMap = Arc<DashMap<String, Arc<SandboxDocument>>>;

/// Opaque reference to a live sandbox frame.
///
/// Disposal is explicit: dropping a handle does nothing, calling
/// [`SandboxHandle::dispose`] releases the frame's registration (the analog
/// of revoking a transient object URL).
#[derive(Debug, Clone)]
pub struct SandboxHandle {
    id: String,
    frames: FrameMap,
}

impl SandboxHandle {
    /// The frame id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Locator path a host page can point an iframe at.
    pub fn path(&self) -> String {
        format!("/preview/{}", self.id)
    }

    /// Whether the frame is still registered.
    pub fn is_live(&self) -> bool {
        self.frames.contains_key(&self.id)
    }

    /// Release the frame's registration.
    pub fn dispose(&self) {
        if self.frames.remove(&self.id).is_some() {
            debug!(frame = %self.id, "disposed sandbox frame");
        }
    }
}

/// Registry of sandbox frames with a single "current preview" slot.
///
/// Last-write-wins: the most recent completed render is the current one,
/// and rendering disposes whatever it superseded.
#[derive(Debug, Default)]
pub struct PreviewHost {
    frames: FrameMap,
    current: Mutex<Option<SandboxHandle>>,
}

impl PreviewHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sandbox document for `source` and register it as the current
    /// frame, disposing the superseded one.
    pub fn render(&self, source: &str) -> SandboxHandle {
        let document = SandboxDocument::build(source);
        let id = Uuid::new_v4().to_string();
        self.frames.insert(id.clone(), Arc::new(document));

        let handle = SandboxHandle {
            id,
            frames: Arc::clone(&self.frames),
        };
        debug!(frame = %handle.id, "registered sandbox frame");

        if let Ok(mut current) = self.current.lock() {
            if let Some(superseded) = current.replace(handle.clone()) {
                superseded.dispose();
            }
        }

        handle
    }

    /// Look up a frame's document by id.
    pub fn document(&self, id: &str) -> Option<Arc<SandboxDocument>> {
        self.frames.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// The current frame, if a render has been issued.
    pub fn current(&self) -> Option<SandboxHandle> {
        self.current.lock().ok().and_then(|guard| guard.clone())
    }

    /// Number of live frames. One at most under normal operation.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
