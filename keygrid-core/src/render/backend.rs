use crate::{compile::plan::FramePlan, foundation::error::KeygridResult};

/// Rasterized frame. Pixels are premultiplied RGBA8 when `premultiplied` is set.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Anything that can turn a [`FramePlan`] into pixels.
pub trait RenderBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> KeygridResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Cpu,
}

pub fn create_backend(kind: BackendKind) -> KeygridResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new())),
    }
}
