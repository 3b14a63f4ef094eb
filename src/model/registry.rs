//! The ordered window registry.
//!
//! Insertion order is the single source of truth for master/stack rank:
//! the earliest tracked, eligible window on a desktop is that desktop's
//! master, the rest form the stack top to bottom. There is deliberately no
//! separate rank field anywhere; the sequence is the ranking.

use thiserror::Error;

use crate::sys::gateway::{DesktopId, WindowHandle, WindowId};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TilingError {
    #[error("window {0:?} is already registered")]
    DuplicateWindow(WindowId),
    #[error("window {0:?} is not registered")]
    UnknownWindow(WindowId),
}

/// State the core keeps per tracked window. A window stays tracked while
/// temporarily excluded from the layout (minimized, maximized); it is only
/// removed when the host signals removal or a desktop change re-evaluates it.
#[derive(Debug, Clone)]
pub struct TrackedWindow {
    pub id: WindowId,
    pub handle: WindowHandle,
    pub desktop: DesktopId,
    pub is_maximized: bool,
    /// Captured once per interactive gesture; `None` means no capture yet.
    pub is_moving: Option<bool>,
    pub is_resizing: Option<bool>,
}

impl TrackedWindow {
    pub fn new(id: WindowId, handle: WindowHandle, desktop: DesktopId) -> Self {
        Self {
            id,
            handle,
            desktop,
            is_maximized: false,
            is_moving: None,
            is_resizing: None,
        }
    }

    /// True once the move/resize kind of an in-progress gesture has been
    /// captured. Guards against re-capturing mid-gesture.
    pub fn gesture_captured(&self) -> bool {
        self.is_moving.is_some() || self.is_resizing.is_some()
    }

    pub fn clear_gesture(&mut self) {
        self.is_moving = None;
        self.is_resizing = None;
    }
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<TrackedWindow>,
}

impl WindowRegistry {
    pub fn len(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedWindow> { self.windows.iter() }

    /// Inserts a window at the master position (`as_root`) or at the end of
    /// the stack. Duplicate ids are rejected; the registry is left untouched.
    pub fn insert(&mut self, window: TrackedWindow, as_root: bool) -> Result<(), TilingError> {
        if self.contains(window.id) {
            return Err(TilingError::DuplicateWindow(window.id));
        }
        if as_root {
            self.windows.insert(0, window);
        } else {
            self.windows.push(window);
        }
        Ok(())
    }

    /// Removes a window, returning its record so callers can re-insert it on
    /// desktop changes. `None` if the id was never tracked.
    pub fn remove_by_id(&mut self, id: WindowId) -> Option<TrackedWindow> {
        let index = self.windows.iter().position(|window| window.id == id)?;
        Some(self.windows.remove(index))
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.iter().any(|window| window.id == id)
    }

    pub fn find_by_id(&self, id: WindowId) -> Option<&TrackedWindow> {
        self.windows.iter().find(|window| window.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: WindowId) -> Option<&mut TrackedWindow> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    /// All tracked windows on a desktop, preserving global order. Eligibility
    /// is the caller's concern; this is a pure desktop filter.
    pub fn windows_on_desktop(&self, desktop: DesktopId) -> impl Iterator<Item = &TrackedWindow> {
        self.windows.iter().filter(move |window| window.desktop == desktop)
    }

    /// Exchanges the positions of two tracked windows in place.
    pub fn swap(&mut self, a: WindowId, b: WindowId) -> Result<(), TilingError> {
        let index_a = self
            .windows
            .iter()
            .position(|window| window.id == a)
            .ok_or(TilingError::UnknownWindow(a))?;
        let index_b = self
            .windows
            .iter()
            .position(|window| window.id == b)
            .ok_or(TilingError::UnknownWindow(b))?;
        self.windows.swap(index_a, index_b);
        Ok(())
    }
}
