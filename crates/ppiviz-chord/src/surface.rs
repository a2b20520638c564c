//! Render Surfaces
//!
//! A surface is one named target that renders write into. Every render takes a ticket
//! before it starts; only the newest ticket may write, so a slow render that finishes
//! after a newer one has drawn is discarded instead of overwriting it.
use crate::scene::Rendered;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Proof of the render generation a writer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicket {
    epoch: u64,
}

impl RenderTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Default)]
pub struct Surface {
    epoch: AtomicU64,
    content: Mutex<Option<Rendered>>,
}

impl Surface {
    /// Starts a new render generation, superseding all earlier tickets.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket {
            epoch: self.epoch.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    pub fn is_current(&self, ticket: &RenderTicket) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket.epoch
    }

    /// Replaces the surface content if `ticket` is still the newest. Returns whether it was.
    pub fn commit(&self, ticket: &RenderTicket, rendered: Rendered) -> bool {
        let mut content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            log::warn!(
                "discarding stale render {} (surface is at {})",
                ticket.epoch,
                self.epoch.load(Ordering::SeqCst)
            );
            return false;
        }
        *content = Some(rendered);
        true
    }

    pub fn content(&self) -> Option<Rendered> {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current content as markup; empty when nothing was rendered yet.
    pub fn markup(&self) -> String {
        self.content()
            .map(|rendered| rendered.markup())
            .unwrap_or_default()
    }
}

/// Surfaces by target id, created on first use.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: Mutex<HashMap<String, Arc<Surface>>>,
}

impl SurfaceRegistry {
    pub fn surface(&self, target: &str) -> Arc<Surface> {
        self.surfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(target.to_string())
            .or_default()
            .clone()
    }
}
