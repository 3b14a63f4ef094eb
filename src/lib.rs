//! Master-stack automatic tiling core for desktop window managers.
//!
//! The crate is host-agnostic: a thin bootstrap implements
//! [`WindowGateway`](sys::gateway::WindowGateway) over the compositor's API
//! and forwards lifecycle events to the hooks on
//! [`TilingManager`](manager::TilingManager). The manager keeps an ordered
//! registry of tracked windows (position 0 is the master, the rest are the
//! stack) and re-tiles the affected desktop after every event.

pub mod common;
pub mod layout_engine;
pub mod manager;
pub mod model;
pub mod sys;

pub use common::config::{Config, LayoutSettings, MasterPosition};
pub use manager::TilingManager;
pub use model::filter::EligibilityFilter;
pub use model::registry::{TilingError, TrackedWindow, WindowRegistry};
pub use sys::gateway::{
    DesktopId, MaximizeMode, WindowGateway, WindowHandle, WindowId, WindowTraits,
};
pub use sys::geometry::{Point, Rect};
