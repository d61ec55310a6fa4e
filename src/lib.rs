//! # Bevy Collision Snap
//!
//! Editor tool that pushes the selection along an axis until it touches the
//! first collider in the way. Uses Avian3D shape casts for the sweep.
//!
//! ## Quick Start
//!
//! ```no_run
//! use avian3d::prelude::PhysicsPlugins;
//! use bevy::prelude::*;
//! use bevy_collision_snap::CollisionSnapPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PhysicsPlugins::default())
//!         .add_plugins(CollisionSnapPlugin::default())
//!         .run();
//! }
//! ```
//!
//! ## Usage
//!
//! Mark entities with `Selected`, then press `Ctrl+Shift+S` (or write an
//! `OpenSnapWindow` message). The window offers:
//!
//! - **Direction**: one of the six world axes
//! - **Preview**: wire box around the selection, arrow, and destination box
//! - **Snap**: move the selection and close the window
//!
//! Changing the selection while the window is open closes it.

pub mod constants;
pub mod error;
pub mod plugin;
pub mod selection;
pub mod settings;
pub mod snap;
pub mod ui;
pub mod utils;

pub use error::SnapError;
pub use plugin::{CollisionSnapPlugin, CollisionSnapPluginConfig};
pub use selection::{Selectable, Selected};
pub use settings::SnapSettings;

pub use snap::{
    AvianBackend, CloseSnapWindow, ConfirmSnap, OpenSnapWindow, SessionPhase, SetSnapDirection,
    SetSnapPreview, SnapApplied, SnapDirection, SnapSession, SnapStatus, SweepBackend, SweepHit,
    SweepQuery, UnionBounds,
};
