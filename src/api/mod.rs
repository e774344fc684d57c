//! Scene graph facade: node lifecycle, property access, states, validation
//! passes, events and rendering.

mod animation;
mod event_dispatch;
mod factory;
mod invalidation;
mod json_contract;
mod layout_pass;
mod node_lifecycle;
mod position_pass;
mod property_access;
mod render_pass;
mod scene_config;
mod scene_graph;
mod state_controller;
mod theme;

pub use event_dispatch::{EventKind, SceneEvent, SubscriptionId};
pub use factory::{NodeConfig, NodeConstructor, NodeFactory};
pub use invalidation::DrainReport;
pub use json_contract::{SCENE_CONFIG_JSON_SCHEMA_V1, SceneConfigJsonContractV1};
pub use node_lifecycle::{CIRCLE_KIND, CONTAINER_KIND, LABEL_KIND, RECTANGLE_KIND};
pub use scene_config::SceneConfig;
pub use scene_graph::{ROOT_KIND, SceneGraph};
pub use theme::{Theme, ThemeTarget};
