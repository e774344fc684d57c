mod frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, DrawPrimitive, LinePrimitive, Paint, RectPrimitive, TextPrimitive,
};

pub use crate::core::color::Color;

use crate::error::SceneResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, painter-ordered `RenderFrame` so
/// drawing code stays isolated from scene bookkeeping and animation.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> SceneResult<()>;
}
