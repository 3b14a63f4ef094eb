//! The capability surface the tiling core needs from the host compositor.
//!
//! The host owns windows, desktops and screens; the core only ever sees
//! opaque identities and queries properties through [`WindowGateway`]. Window
//! properties are queried fresh on every call, never cached, because they
//! change continuously while events are in flight.

use bitflags::bitflags;

use crate::sys::geometry::Rect;

/// Stable identity assigned by the host, unique for a window's lifetime.
/// This is the registry key: the interactive move/resize protocol has to
/// re-identify a window mid-gesture by something the host never mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

/// Opaque reference to the underlying host window object. Only ever handed
/// back to the gateway to query or set properties, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Identity of a virtual desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DesktopId(pub u32);

/// Maximize transition reported by the host alongside the
/// maximized-about-to-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaximizeMode {
    Restored,
    Maximized,
}

bitflags! {
    /// Host-reported window attributes relevant to eligibility. Each veto
    /// flag is an independent disqualifier; `NORMAL` is the one required
    /// positive.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct WindowTraits: u32 {
        const NORMAL = 1 << 0;
        const FULLSCREEN = 1 << 1;
        const MINIMIZED = 1 << 2;
        const DIALOG = 1 << 3;
        const SPLASH = 1 << 4;
        const UTILITY = 1 << 5;
        const DROPDOWN_MENU = 1 << 6;
        const TOOLTIP = 1 << 7;
        const NOTIFICATION = 1 << 8;
        const CRITICAL_NOTIFICATION = 1 << 9;
        const APPLET_POPUP = 1 << 10;
        const ON_SCREEN_DISPLAY = 1 << 11;
        const COMBO_BOX = 1 << 12;
        const DND_ICON = 1 << 13;
        const SPECIAL = 1 << 14;
        const POPUP = 1 << 15;
        const DESKTOP = 1 << 16;
        const TOOLBAR = 1 << 17;
        const MENU = 1 << 18;
    }
}

impl WindowTraits {
    /// Popup-like attributes that disqualify a window outright.
    pub fn popup_like() -> WindowTraits {
        WindowTraits::DIALOG
            | WindowTraits::SPLASH
            | WindowTraits::UTILITY
            | WindowTraits::DROPDOWN_MENU
            | WindowTraits::TOOLTIP
            | WindowTraits::NOTIFICATION
            | WindowTraits::CRITICAL_NOTIFICATION
            | WindowTraits::APPLET_POPUP
            | WindowTraits::ON_SCREEN_DISPLAY
            | WindowTraits::COMBO_BOX
            | WindowTraits::DND_ICON
            | WindowTraits::SPECIAL
            | WindowTraits::POPUP
            | WindowTraits::DESKTOP
            | WindowTraits::TOOLBAR
            | WindowTraits::MENU
    }

    /// True if any attribute excludes the window from tiling.
    pub fn vetoes_tiling(self) -> bool {
        !self.contains(WindowTraits::NORMAL)
            || self.intersects(
                WindowTraits::popup_like() | WindowTraits::FULLSCREEN | WindowTraits::MINIMIZED,
            )
    }
}

/// Host adapter interface. Implementations wrap the compositor's scripting or
/// accessibility API; all methods take `&self` and may use interior
/// mutability, since every call happens on the one host event thread.
pub trait WindowGateway {
    /// Placement area of the active screen for the given desktop, or `None`
    /// if the host does not know the desktop.
    fn screen_area(&self, desktop: DesktopId) -> Option<Rect>;

    fn window_id(&self, handle: WindowHandle) -> Option<WindowId>;

    fn window_desktop(&self, handle: WindowHandle) -> Option<DesktopId>;

    /// The window's class / resource name, used for ignore and
    /// register-as-root matching.
    fn window_class(&self, handle: WindowHandle) -> Option<String>;

    fn window_traits(&self, handle: WindowHandle) -> WindowTraits;

    fn window_frame(&self, handle: WindowHandle) -> Option<Rect>;

    fn set_window_frame(&self, handle: WindowHandle, frame: Rect);

    /// Whether an interactive move gesture is in progress for the window.
    fn is_window_moving(&self, handle: WindowHandle) -> bool;

    /// Whether an interactive resize gesture is in progress for the window.
    fn is_window_resizing(&self, handle: WindowHandle) -> bool;

    /// Clear any host-level maximize state, returning the window to its
    /// restored frame.
    fn restore_window(&self, handle: WindowHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_window_is_not_vetoed() {
        assert!(!WindowTraits::NORMAL.vetoes_tiling());
    }

    #[test]
    fn missing_normal_flag_vetoes() {
        assert!(WindowTraits::empty().vetoes_tiling());
    }

    #[test]
    fn any_popup_trait_vetoes() {
        for trait_ in [
            WindowTraits::DIALOG,
            WindowTraits::SPLASH,
            WindowTraits::TOOLTIP,
            WindowTraits::MENU,
        ] {
            assert!((WindowTraits::NORMAL | trait_).vetoes_tiling());
        }
    }

    #[test]
    fn fullscreen_and_minimized_veto() {
        assert!((WindowTraits::NORMAL | WindowTraits::FULLSCREEN).vetoes_tiling());
        assert!((WindowTraits::NORMAL | WindowTraits::MINIMIZED).vetoes_tiling());
    }
}
