use crate::error::SceneResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// No-op renderer used by tests and headless scenes.
///
/// It still validates frame content so tests catch malformed geometry before
/// a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_draw_count: usize,
    pub last_clip_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SceneResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_draw_count = frame
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Draw { .. }))
            .count();
        self.last_clip_count = frame
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::PushClip { .. }))
            .count();
        Ok(())
    }
}
