//! chart-scene: retained-mode scene graph for charting.
//!
//! Nodes live in an arena owned by [`SceneGraph`]. Property changes queue
//! layout, position and redraw work that one call per host frame drains in
//! that order, after stepping declarative state transitions.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{SceneConfig, SceneEvent, SceneGraph};
pub use core::{NodeId, PropertyKey, PropertyValue};
pub use error::{SceneError, SceneResult};
