//! The tiling manager keeps the registry coherent with the host's window
//! lifecycle and re-tiles the affected desktop after every change.
//!
//! Each hook is invoked by the host adapter on the one event thread and runs
//! to completion; the registry is never touched from anywhere else. Hooks
//! never fail outward: invariant violations are logged and dropped, because
//! the host event stream cannot be blocked, and the next re-tile re-derives
//! correct geometry from the registry anyway.

use tracing::{debug, warn};

use crate::common::config::Config;
use crate::layout_engine::master_stack;
use crate::model::filter::EligibilityFilter;
use crate::model::registry::{TrackedWindow, WindowRegistry};
use crate::sys::gateway::{DesktopId, MaximizeMode, WindowGateway, WindowHandle, WindowId};

pub struct TilingManager<G> {
    gateway: G,
    config: Config,
    registry: WindowRegistry,
}

impl<G: WindowGateway> TilingManager<G> {
    pub fn new(gateway: G, config: Config) -> Self {
        Self {
            gateway,
            config,
            registry: WindowRegistry::default(),
        }
    }

    pub fn gateway(&self) -> &G { &self.gateway }

    pub fn config(&self) -> &Config { &self.config }

    pub fn registry(&self) -> &WindowRegistry { &self.registry }

    /// Hook: a window was opened (or replayed at startup). Accepts it into
    /// the registry if eligible and re-tiles its desktop.
    pub fn register_window(&mut self, handle: WindowHandle) {
        debug!(?handle, class = ?self.gateway.window_class(handle), "window registration started");

        if !EligibilityFilter::new(&self.config).eligible_for_register(&self.gateway, handle) {
            debug!(?handle, "window is not eligible for tiling");
            return;
        }
        let (Some(id), Some(desktop)) = (
            self.gateway.window_id(handle),
            self.gateway.window_desktop(handle),
        ) else {
            warn!(?handle, "host could not identify window, skipping registration");
            return;
        };

        // Tiled windows always start from their restored frame.
        self.gateway.restore_window(handle);

        let as_root = self.should_register_as_root(handle);
        match self.registry.insert(TrackedWindow::new(id, handle, desktop), as_root) {
            Ok(()) => {
                debug!(?id, ?desktop, as_root, "window added to the tiling manager");
                self.retile_desktop(desktop);
            }
            Err(err) => warn!(%err, "registration skipped"),
        }
    }

    /// Hook: a window was closed or permanently removed by the host.
    pub fn remove_window(&mut self, handle: WindowHandle) {
        let Some(id) = self.gateway.window_id(handle) else {
            return;
        };
        if let Some(removed) = self.registry.remove_by_id(id) {
            debug!(?id, desktop = ?removed.desktop, "window removed");
            self.retile_desktop(removed.desktop);
        }
    }

    /// Hook: a window's minimized state flipped. The registry keeps the
    /// window either way; the layout-time filter decides whether it holds a
    /// slot, so a re-tile is all that is needed.
    pub fn minimized_changed(&mut self, handle: WindowHandle) {
        debug!(?handle, "window minimized state changed");
        let Some(desktop) = self.gateway.window_desktop(handle) else {
            return;
        };
        self.retile_desktop(desktop);
    }

    /// Hook: a window is about to change maximize state. Entering maximized
    /// leaves the layout underneath untouched (it is hidden anyway); leaving
    /// maximized re-claims the window's slot.
    pub fn maximized_changed(&mut self, handle: WindowHandle, mode: MaximizeMode) {
        let Some(id) = self.gateway.window_id(handle) else {
            return;
        };
        let Some(record) = self.registry.find_by_id_mut(id) else {
            return;
        };
        record.is_maximized = mode == MaximizeMode::Maximized;
        debug!(?id, ?mode, "window maximized state changed");
        if mode == MaximizeMode::Restored {
            let desktop = record.desktop;
            self.retile_desktop(desktop);
        }
    }

    /// Hook: a window moved to another virtual desktop. The record leaves the
    /// old desktop's order, the old desktop is re-tiled, and the window is
    /// registered onto the new desktop as if newly opened (the root rule
    /// applies again). The record is never left dangling between desktops.
    pub fn desktop_changed(&mut self, handle: WindowHandle) {
        let Some(id) = self.gateway.window_id(handle) else {
            return;
        };
        let Some(mut record) = self.registry.remove_by_id(id) else {
            return;
        };
        let old_desktop = record.desktop;
        self.retile_desktop(old_desktop);

        let Some(new_desktop) = self.gateway.window_desktop(handle) else {
            warn!(?id, "window left for an unknown desktop, dropping it");
            return;
        };
        debug!(?id, ?old_desktop, ?new_desktop, "window changed desktop");

        if !EligibilityFilter::new(&self.config).eligible_for_tiling(&self.gateway, handle, &record)
        {
            return;
        }
        record.desktop = new_desktop;
        let as_root = self.should_register_as_root(handle);
        match self.registry.insert(record, as_root) {
            Ok(()) => self.retile_desktop(new_desktop),
            Err(err) => warn!(%err, "re-registration after desktop change skipped"),
        }
    }

    /// Hook: an interactive move or resize is in progress. The host only
    /// reports which kind while the gesture is live, so it is captured here,
    /// exactly once per gesture, for use when the gesture finishes. No
    /// re-tiling happens mid-gesture.
    pub fn move_resized_changed(&mut self, handle: WindowHandle) {
        let Some(id) = self.gateway.window_id(handle) else {
            return;
        };
        let moving = self.gateway.is_window_moving(handle);
        let resizing = self.gateway.is_window_resizing(handle);
        let Some(record) = self.registry.find_by_id_mut(id) else {
            return;
        };
        if !record.gesture_captured() {
            record.is_moving = Some(moving);
            record.is_resizing = Some(resizing);
            debug!(?id, moving, resizing, "gesture captured");
        }
    }

    /// Hook: an interactive move or resize gesture finished.
    ///
    /// A resize is discarded by re-tiling; the layout is authoritative and
    /// hand-resizing is not supported. A move is a drag-to-swap gesture: if
    /// the dropped window's center lands inside another eligible window's
    /// frame, the two exchange registry positions. Either way the desktop is
    /// re-tiled, so a miss snaps the window back into its slot.
    pub fn interactive_move_resize_finished(&mut self, handle: WindowHandle) {
        let Some(id) = self.gateway.window_id(handle) else {
            return;
        };
        let Some(record) = self.registry.find_by_id(id) else {
            return;
        };
        let was_moved = record.is_moving == Some(true);
        let was_resized = record.is_resizing == Some(true);
        let desktop = record.desktop;
        debug!(?id, was_moved, was_resized, "move/resize finished");

        if was_resized {
            self.retile_desktop(desktop);
        }

        if was_moved {
            if let Some(target) = self.window_below(handle, id, desktop) {
                debug!(?id, ?target, "swapping dropped window with the one below");
                if let Err(err) = self.registry.swap(id, target) {
                    warn!(%err, "drop swap skipped");
                }
            }
            self.retile_desktop(desktop);
        }

        if let Some(record) = self.registry.find_by_id_mut(id) {
            record.clear_gesture();
        }
    }

    /// Re-tiles every desktop that currently has tracked windows. Used by the
    /// host bootstrap after replaying already-open windows.
    pub fn retile_all(&self) {
        let mut desktops: Vec<DesktopId> = self.registry.iter().map(|w| w.desktop).collect();
        desktops.sort();
        desktops.dedup();
        for desktop in desktops {
            self.retile_desktop(desktop);
        }
    }

    /// Recomputes and applies geometry for all eligible windows on the
    /// desktop. Safe to call at any time; state is re-derived from the
    /// registry on every call.
    fn retile_desktop(&self, desktop: DesktopId) {
        let windows: Vec<(WindowId, WindowHandle)> = self
            .eligible_on_desktop(desktop)
            .into_iter()
            .map(|window| (window.id, window.handle))
            .collect();
        if windows.is_empty() {
            return;
        }
        let Some(screen) = self.gateway.screen_area(desktop) else {
            warn!(?desktop, "no screen area for desktop, skipping re-tile");
            return;
        };
        debug!(?desktop, count = windows.len(), "tiling desktop");
        for ((_, handle), frame) in master_stack::compute(screen, &windows, &self.config.layout) {
            self.gateway.set_window_frame(handle, frame);
        }
    }

    /// The tracked windows on a desktop that pass the layout-time filter, in
    /// master/stack order.
    fn eligible_on_desktop(&self, desktop: DesktopId) -> Vec<&TrackedWindow> {
        let filter = EligibilityFilter::new(&self.config);
        self.registry
            .windows_on_desktop(desktop)
            .filter(|window| filter.eligible_for_tiling(&self.gateway, window.handle, window))
            .collect()
    }

    /// Hit-tests the dropped window's center against the other eligible
    /// windows' current frames. The first match in desktop order wins, so the
    /// outcome is deterministic even if transient frames overlap.
    fn window_below(
        &self,
        handle: WindowHandle,
        moved: WindowId,
        desktop: DesktopId,
    ) -> Option<WindowId> {
        let center = self.gateway.window_frame(handle)?.center();
        self.eligible_on_desktop(desktop)
            .into_iter()
            .filter(|window| window.id != moved)
            .find(|window| {
                self.gateway
                    .window_frame(window.handle)
                    .is_some_and(|frame| frame.contains(center))
            })
            .map(|window| window.id)
    }

    fn should_register_as_root(&self, handle: WindowHandle) -> bool {
        self.gateway
            .window_class(handle)
            .is_some_and(|class| self.config.registers_as_root(&class))
    }
}
