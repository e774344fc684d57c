use crate::core::geometry::{Affine, Rect, Size};
use crate::core::node::NodeId;
use crate::error::{SceneError, SceneResult};
use crate::render::DrawPrimitive;

/// Flattened, painter-ordered command emitted for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draws a node-local primitive through the node's world transform.
    Draw {
        node: NodeId,
        transform: Affine,
        opacity: f64,
        primitive: DrawPrimitive,
    },
    /// Restricts following commands to `rect` (node-local) until the matching pop.
    PushClip { transform: Affine, rect: Rect },
    PopClip,
}

/// Backend-agnostic scene for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: Size,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: Size) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    /// Commands drawn for `node`, in frame order.
    pub fn primitives_for(&self, node: NodeId) -> impl Iterator<Item = &DrawPrimitive> {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::Draw {
                node: owner,
                primitive,
                ..
            } if *owner == node => Some(primitive),
            _ => None,
        })
    }

    /// Nodes in the order their first primitive is painted.
    #[must_use]
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        for command in &self.commands {
            if let DrawCommand::Draw { node, .. } = command
                && order.last() != Some(node)
            {
                order.push(*node);
            }
        }
        order
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.surface.width.is_finite()
            || !self.surface.height.is_finite()
            || self.surface.width <= 0.0
            || self.surface.height <= 0.0
        {
            return Err(SceneError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        let mut clip_depth = 0_usize;
        for command in &self.commands {
            match command {
                DrawCommand::Draw {
                    opacity, primitive, ..
                } => {
                    if !opacity.is_finite() || !(0.0..=1.0).contains(opacity) {
                        return Err(SceneError::InvalidConfig(
                            "draw opacity must be finite and in [0, 1]".to_owned(),
                        ));
                    }
                    primitive.validate()?;
                }
                DrawCommand::PushClip { .. } => clip_depth += 1,
                DrawCommand::PopClip => {
                    clip_depth = clip_depth.checked_sub(1).ok_or_else(|| {
                        SceneError::InvalidConfig("unbalanced clip pop".to_owned())
                    })?;
                }
            }
        }
        if clip_depth != 0 {
            return Err(SceneError::InvalidConfig(
                "unbalanced clip push".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
