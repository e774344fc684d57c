use tracing::{trace, warn};

use crate::core::geometry::Size;
use crate::core::{InvalidationKind, NodeId, PropertyKey};
use crate::error::SceneResult;
use crate::render::{DrawCommand, DrawPrimitive, RenderFrame, Renderer};

use super::{DrainReport, SceneEvent, SceneGraph};

impl SceneGraph {
    pub(super) fn validate_redraw(&mut self, id: NodeId, report: &mut DrainReport) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let size = node.geometry.measured.unwrap_or(Size::ZERO);
        let painted = match node.content.as_ref() {
            Some(content) => content.paint(&node.props, size),
            None => Ok(Vec::new()),
        }
        .and_then(|primitives| {
            primitives.iter().try_for_each(DrawPrimitive::validate)?;
            Ok(primitives)
        });
        match painted {
            Ok(primitives) => {
                node.display = primitives;
                report.count(InvalidationKind::Redraw, 1);
                self.emit(SceneEvent::Validated {
                    node: id,
                    kind: InvalidationKind::Redraw,
                });
            }
            Err(error) => {
                node.display.clear();
                warn!(?id, %error, "redraw failed");
                report.failures += 1;
                self.emit(SceneEvent::ValidationFailed {
                    node: id,
                    kind: InvalidationKind::Redraw,
                    message: error.to_string(),
                });
            }
        }
    }

    /// Cached primitives of `id` in node-local coordinates.
    #[must_use]
    pub fn display_list(&self, id: NodeId) -> &[DrawPrimitive] {
        self.nodes.get(id).map_or(&[], |node| node.display.as_slice())
    }

    /// Flattens the live tree into painter-ordered draw commands.
    ///
    /// Parents paint before children; siblings paint by ascending `z_index`
    /// with insertion order kept for ties. Hidden and fully transparent
    /// subtrees are skipped, and a `clip` rect wraps its subtree.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.config.surface());
        self.collect_commands(self.root, &mut frame.commands);
        frame
    }

    /// Drains pending work, then hands the frame to `renderer`.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> SceneResult<DrainReport> {
        let report = self.drain();
        let frame = self.build_render_frame();
        frame.validate()?;
        renderer.render(&frame)?;
        trace!(commands = frame.commands.len(), "frame rendered");
        Ok(report)
    }

    fn collect_commands(&self, id: NodeId, commands: &mut Vec<DrawCommand>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let Some(transform) = node.geometry.world else {
            return;
        };
        let opacity = node.geometry.world_opacity;
        if !node.is_visible() || opacity <= 0.0 {
            return;
        }

        let clip = node
            .props
            .resolve(PropertyKey::Clip)
            .and_then(|value| value.as_rect());
        if let Some(rect) = clip {
            commands.push(DrawCommand::PushClip { transform, rect });
        }

        commands.extend(node.display.iter().map(|primitive| DrawCommand::Draw {
            node: id,
            transform,
            opacity,
            primitive: primitive.clone(),
        }));

        let mut children = node.children.clone();
        children.sort_by(|left, right| {
            self.z_index(*left).total_cmp(&self.z_index(*right))
        });
        for child in children {
            self.collect_commands(child, commands);
        }

        if clip.is_some() {
            commands.push(DrawCommand::PopClip);
        }
    }

    pub(super) fn z_index(&self, id: NodeId) -> f64 {
        self.nodes
            .get(id)
            .map_or(0.0, |node| node.props.number(PropertyKey::ZIndex, 0.0))
    }
}
