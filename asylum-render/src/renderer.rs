use crate::dispatcher::RenderFrame;
use log::info;
use std::io::Write;

/// The drawing side. Implementations own layout and drawing; they only
/// receive frames.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> anyhow::Result<()>;
}

/// Writes each frame as pretty-printed JSON, one document per frame.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &RenderFrame) -> anyhow::Result<()> {
        if let Some(variant) = frame.variant() {
            info!("Rendering {}", variant.container_id());
        }
        serde_json::to_writer_pretty(&mut self.out, frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
