//! Window Manager for the mind map shell.
//!
//! Holds the single top-level window as an owned handle. There is never more
//! than one live window; a new one is only created once the previous handle
//! was dropped by `on_closed`.

use crate::types::errors::WindowError;

pub struct WindowManager<W> {
    window: Option<W>,
    created: u32,
}

impl<W> WindowManager<W> {
    pub fn new() -> Self {
        Self {
            window: None,
            created: 0,
        }
    }

    /// Creates a window with `create` unless one is already live.
    ///
    /// Returns `Ok(true)` when a new window was created.
    pub fn open_with<F>(&mut self, create: F) -> Result<bool, WindowError>
    where
        F: FnOnce() -> Result<W, WindowError>,
    {
        if self.window.is_some() {
            return Ok(false);
        }
        let window = create()?;
        self.window = Some(window);
        self.created += 1;
        tracing::debug!(generation = self.created, "Window created");
        Ok(true)
    }

    /// Drops the live handle, if any.
    pub fn on_closed(&mut self) -> Option<W> {
        let closed = self.window.take();
        if closed.is_some() {
            tracing::debug!("Window closed");
        }
        closed
    }

    pub fn current(&self) -> Option<&W> {
        self.window.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    /// Number of windows created over the lifetime of the manager.
    pub fn created_count(&self) -> u32 {
        self.created
    }
}

impl<W> Default for WindowManager<W> {
    fn default() -> Self {
        Self::new()
    }
}
