//! The eligibility predicate deciding whether a window participates in
//! tiling. Evaluated fresh on every decision; host properties are live state
//! and must never be cached.
//!
//! The predicate runs in two phases: at registration time only host-level
//! properties exist, while at layout time the tracked record's maximize flag
//! also counts. A maximized window stays tracked but gives up its slot until
//! it is restored.

use crate::common::config::Config;
use crate::model::registry::TrackedWindow;
use crate::sys::gateway::{WindowGateway, WindowHandle};

pub struct EligibilityFilter<'a> {
    config: &'a Config,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(config: &'a Config) -> Self { Self { config } }

    /// Host-level checks only: the global switch, the ignore list, and the
    /// window's own attribute set. Any veto excludes the window.
    pub fn eligible_for_register<G: WindowGateway>(
        &self,
        gateway: &G,
        handle: WindowHandle,
    ) -> bool {
        if !self.config.tiling_enabled {
            return false;
        }
        let Some(class) = gateway.window_class(handle) else {
            return false;
        };
        if self.config.ignores(&class) {
            return false;
        }
        !gateway.window_traits(handle).vetoes_tiling()
    }

    /// The registration checks plus the tracked maximize flag. Used when
    /// collecting the windows that actually receive a slot in the layout.
    pub fn eligible_for_tiling<G: WindowGateway>(
        &self,
        gateway: &G,
        handle: WindowHandle,
        record: &TrackedWindow,
    ) -> bool {
        self.eligible_for_register(gateway, handle) && !record.is_maximized
    }
}
