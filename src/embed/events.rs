//! Mount lifecycle event handlers.

use std::fmt;
use std::sync::Arc;

/// Type alias for the on_load callback.
pub type OnLoadCallback = Arc<dyn Fn() + Send + Sync>;

/// Type alias for the on_error callback.
pub type OnMountErrorCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callbacks for one mount attempt.
///
/// All handlers are optional. Exactly one of the two fires per
/// [`mount`](crate::embed::EmbedClient::mount) call: `on_load` after the
/// dashboard is embedded, `on_error` with a display-ready message when any
/// step failed.
#[derive(Clone, Default)]
pub struct MountEvents {
    /// Called when the dashboard finished mounting.
    pub(crate) on_load: Option<OnLoadCallback>,

    /// Called with a display-ready message when the mount failed.
    pub(crate) on_error: Option<OnMountErrorCallback>,
}

impl fmt::Debug for MountEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountEvents")
            .field("on_load", &self.on_load.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl MountEvents {
    /// Create a new empty `MountEvents` (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked when the dashboard finished mounting.
    ///
    /// # Example
    /// ```rust
    /// use sima_link::MountEvents;
    ///
    /// let events = MountEvents::new()
    ///     .on_load(|| println!("Dashboard is visible"));
    /// ```
    pub fn on_load(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_load = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked when the mount failed.
    ///
    /// The message is display-ready; show it to the user as-is.
    ///
    /// # Example
    /// ```rust
    /// use sima_link::MountEvents;
    ///
    /// let events = MountEvents::new()
    ///     .on_error(|message| eprintln!("Mount failed: {}", message));
    /// ```
    pub fn on_error(mut self, f: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Returns `true` if any handler is registered.
    pub fn has_any(&self) -> bool {
        self.on_load.is_some() || self.on_error.is_some()
    }

    /// Dispatch the on_load event.
    pub(crate) fn emit_load(&self) {
        if let Some(cb) = &self.on_load {
            cb();
        }
    }

    /// Dispatch the on_error event.
    pub(crate) fn emit_error(&self, message: &str) {
        if let Some(cb) = &self.on_error {
            cb(message.to_string());
        }
    }
}
