//! Container handle holding at most one active mount.

use log::debug;
use std::fmt;

use super::sdk::MountHandle;

/// Owns the screen region a dashboard is embedded into.
///
/// At most one mount is active per container. Installing a new mount
/// replaces the previous one, [`clear`] empties the container, and
/// dropping the container tears any mount down — so overlapping embeds
/// cannot happen and an unmounted screen leaves nothing behind.
///
/// [`clear`]: EmbedContainer::clear
#[derive(Default)]
pub struct EmbedContainer {
    active: Option<Box<dyn MountHandle>>,
}

impl EmbedContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a dashboard is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the mounted dashboard, if any.
    pub fn mounted_dashboard(&self) -> Option<&str> {
        self.active.as_deref().map(MountHandle::dashboard_id)
    }

    /// Tear down the active mount, if any. Idempotent.
    pub fn clear(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!("[EMBED] Clearing mount for dashboard {}", handle.dashboard_id());
            drop(handle);
        }
    }

    /// Replace the active mount with a freshly created one.
    pub(crate) fn install(&mut self, handle: Box<dyn MountHandle>) {
        self.clear();
        self.active = Some(handle);
    }
}

impl fmt::Debug for EmbedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedContainer")
            .field("mounted_dashboard", &self.mounted_dashboard())
            .finish()
    }
}
