use slotmap::SlotMap;
use tracing::debug;

use crate::core::geometry::{Affine, Point, Rect, Size, transformed_bounds};
use crate::core::{
    FrameClock, InvalidationKind, InvalidationQueue, Node, NodeGeometry, NodeId, PropertyKey,
    PropertyValue,
};
use crate::error::SceneResult;

use super::event_dispatch::EventRegistry;
use super::theme::Theme;
use super::{DrainReport, SceneConfig};

pub const ROOT_KIND: &str = "Root";

/// Retained scene: node arena, invalidation sets, clock, themes and events.
///
/// All mutation happens through `&mut self` on one thread; one call to
/// [`SceneGraph::frame`] per host animation frame advances transitions and
/// drains pending validation.
pub struct SceneGraph {
    pub(super) config: SceneConfig,
    pub(super) nodes: SlotMap<NodeId, Node>,
    pub(super) root: NodeId,
    pub(super) queue: InvalidationQueue<NodeId>,
    pub(super) clock: FrameClock,
    pub(super) themes: Vec<Box<dyn Theme>>,
    pub(super) events: EventRegistry,
    pub(super) frame_index: u64,
    pub(super) hovered: Option<NodeId>,
}

impl SceneGraph {
    /// Creates a scene whose root is bound to a surface of the configured size.
    pub fn new(config: SceneConfig) -> SceneResult<Self> {
        config.validate()?;

        let mut nodes = SlotMap::with_key();
        let mut root_node = Node::new(ROOT_KIND, None);
        root_node
            .props
            .set(PropertyKey::Width, PropertyValue::Number(config.surface_width));
        root_node
            .props
            .set(PropertyKey::Height, PropertyValue::Number(config.surface_height));
        let root = nodes.insert(root_node);

        let mut queue = InvalidationQueue::default();
        queue.invalidate(root, InvalidationKind::Layout);
        queue.invalidate(root, InvalidationKind::Position);

        debug!(
            width = config.surface_width,
            height = config.surface_height,
            "scene graph created"
        );

        Ok(Self {
            config,
            nodes,
            root,
            queue,
            clock: FrameClock::new(),
            themes: Vec::new(),
            events: EventRegistry::default(),
            frame_index: 0,
            hovered: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> SceneConfig {
        self.config
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    #[must_use]
    pub fn geometry(&self, id: NodeId) -> Option<NodeGeometry> {
        self.nodes.get(id).map(|node| node.geometry)
    }

    /// Size resolved by the last layout pass.
    #[must_use]
    pub fn measured_size(&self, id: NodeId) -> Option<Size> {
        self.nodes.get(id).and_then(|node| node.geometry.measured)
    }

    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        self.nodes.get(id).and_then(|node| node.geometry.world)
    }

    /// Axis-aligned bounds of the node box in surface coordinates.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        Some(transformed_bounds(
            node.geometry.world?,
            node.geometry.measured?,
        ))
    }

    #[must_use]
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Option<Point> {
        self.world_transform(id).map(|world| world * point)
    }

    #[must_use]
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Option<Point> {
        let world = self.world_transform(id)?;
        if world.determinant().abs() <= f64::EPSILON {
            return None;
        }
        Some(world.inverse() * point)
    }

    /// Returns `true` when `id` is the root or reachable from it.
    #[must_use]
    pub fn is_live(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes.get(current).and_then(|node| node.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Number of ancestors between `id` and the top of its tree.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        node_depth(&self.nodes, id)
    }

    /// Resizes the host surface; the root re-lays out on the next drain.
    pub fn resize_surface(&mut self, width: f64, height: f64) -> SceneResult<()> {
        let resized = SceneConfig {
            surface_width: width,
            surface_height: height,
            ..self.config
        };
        resized.validate()?;
        self.config = resized;
        let root = self.root;
        self.set(root, PropertyKey::Width, PropertyValue::Number(width));
        self.set(root, PropertyKey::Height, PropertyValue::Number(height));
        Ok(())
    }

    /// Current scene time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Host animation-frame entry point: advances the clock with the host
    /// timestamp, steps transitions, then drains validation.
    pub fn frame(&mut self, timestamp_ms: f64) -> DrainReport {
        self.clock.tick(timestamp_ms);
        self.step_transitions();
        self.drain()
    }

    /// Like [`Self::frame`] with an explicit scene-time delta.
    pub fn advance(&mut self, delta_ms: f64) -> DrainReport {
        self.clock.advance(delta_ms);
        self.step_transitions();
        self.drain()
    }
}

pub(super) fn node_depth(nodes: &SlotMap<NodeId, Node>, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = nodes.get(id).and_then(|node| node.parent);
    while let Some(parent) = current {
        depth += 1;
        current = nodes.get(parent).and_then(|node| node.parent);
    }
    depth
}
