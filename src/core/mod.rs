pub mod clock;
pub mod color;
pub mod content;
pub mod easing;
pub mod geometry;
pub mod invalidation_queue;
pub mod layout;
pub mod node;
pub mod property;
pub mod property_store;
pub mod state;
pub mod transition;

pub use clock::FrameClock;
pub use color::Color;
pub use content::{CircleContent, LabelContent, RectangleContent};
pub use easing::Easing;
pub use geometry::{Affine, Point, Rect, Size, Vec2};
pub use invalidation_queue::{InvalidationKind, InvalidationKinds, InvalidationQueue};
pub use layout::{ChildBox, Insets};
pub use node::{Node, NodeContent, NodeGeometry, NodeId};
pub use property::{Align, Dimension, LayoutMode, PropertyKey, PropertyValue, percent};
pub use property_store::{Adapter, AdapterId, PropertyChange, PropertyStore};
pub use state::{DEFAULT_STATE, HIDDEN_STATE, HOVER_STATE, State, StateRegistry};
pub use transition::{Transition, TransitionSample};
