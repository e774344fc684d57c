use indexmap::IndexMap;

use crate::core::geometry::{Affine, Point, Size};
use crate::core::property::PropertyKey;
use crate::core::property_store::PropertyStore;
use crate::core::state::StateRegistry;
use crate::core::transition::Transition;
use crate::error::SceneResult;
use crate::render::DrawPrimitive;

slotmap::new_key_type! {
    /// Stable handle of a scene node. Stale once the node is disposed.
    pub struct NodeId;
}

/// Capability implemented by node kinds that have intrinsic content.
///
/// Containers carry no content; their size comes from children.
pub trait NodeContent {
    /// Natural size before explicit width/height are applied.
    fn measure(&self, props: &PropertyStore) -> SceneResult<Size> {
        let _ = props;
        Ok(Size::ZERO)
    }

    /// Drawables in node-local space for the final `size`.
    fn paint(&self, props: &PropertyStore, size: Size) -> SceneResult<Vec<DrawPrimitive>>;
}

/// Geometry caches written by the validation passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub measured: Option<Size>,
    /// Offset inside the parent assigned by the parent's arrangement.
    pub arranged_offset: Point,
    pub world: Option<Affine>,
    pub world_opacity: f64,
    pub(crate) layout_frame: u64,
    pub(crate) position_frame: u64,
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            measured: None,
            arranged_offset: Point::ZERO,
            world: None,
            world_opacity: 1.0,
            layout_frame: 0,
            position_frame: 0,
        }
    }
}

/// Arena record of one scene node.
pub struct Node {
    pub(crate) kind: String,
    pub(crate) props: PropertyStore,
    pub(crate) states: StateRegistry,
    pub(crate) transitions: IndexMap<PropertyKey, Transition>,
    pub(crate) content: Option<Box<dyn NodeContent>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) current_state: Option<String>,
    pub(crate) geometry: NodeGeometry,
    pub(crate) display: Vec<DrawPrimitive>,
}

impl Node {
    #[must_use]
    pub(crate) fn new(kind: impl Into<String>, content: Option<Box<dyn NodeContent>>) -> Self {
        Self {
            kind: kind.into(),
            props: PropertyStore::new(),
            states: StateRegistry::default(),
            transitions: IndexMap::new(),
            content,
            parent: None,
            children: Vec::new(),
            current_state: None,
            geometry: NodeGeometry::default(),
            display: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn props(&self) -> &PropertyStore {
        &self.props
    }

    #[must_use]
    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn geometry(&self) -> NodeGeometry {
        self.geometry
    }

    #[must_use]
    pub fn current_state(&self) -> Option<&str> {
        self.current_state.as_deref()
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.props.flag(PropertyKey::Visible, true)
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.props.flag(PropertyKey::Interactive, false)
    }
}
