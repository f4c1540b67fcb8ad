use kurbo::Shape as _;

use crate::{
    compile::plan::{DrawOp, FramePlan},
    foundation::{
        core::{Point, Rect},
        error::{KeygridError, KeygridResult},
    },
    render::backend::{FrameRGBA, RenderBackend},
};

const PATH_TOLERANCE: f64 = 0.1;

/// vello_cpu rasterizer. Keeps its pixmap between frames of the same size.
#[derive(Default)]
pub struct CpuBackend {
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> KeygridResult<&mut CpuSurface> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| KeygridError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| KeygridError::render("surface height exceeds u16"))?;

        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width == width_u16 && s.height == height_u16);
        if !reuse {
            self.surface = Some(CpuSurface {
                width: width_u16,
                height: height_u16,
                pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            });
        }
        self.surface
            .as_mut()
            .ok_or_else(|| KeygridError::render("surface missing"))
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> KeygridResult<FrameRGBA> {
        let surface = self.ensure_surface(plan.canvas.width, plan.canvas.height)?;
        clear_pixmap(&mut surface.pixmap, plan.background.to_rgba8());

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        let bg = plan.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(surface.width),
            f64::from(surface.height),
        ));
        for op in plan.ops() {
            draw_op(&mut ctx, op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    let c = op.color();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
    ctx.fill_path(&bezpath_to_cpu(&op_path(op)));
}

/// Outline of a primitive in canvas space.
pub(crate) fn op_path(op: &DrawOp) -> kurbo::BezPath {
    match op {
        DrawOp::RoundedRect {
            center,
            width,
            height,
            radius,
            ..
        } => {
            let rect = Rect::from_center_size(*center, (width.max(0.0), height.max(0.0)));
            kurbo::RoundedRect::from_rect(rect, *radius).to_path(PATH_TOLERANCE)
        }
        DrawOp::Polygon { points, .. } => polygon_path(points),
        DrawOp::Triangle { points, .. } => polygon_path(points),
        DrawOp::Circle { center, radius, .. } => {
            kurbo::Circle::new(*center, radius.max(0.0)).to_path(PATH_TOLERANCE)
        }
    }
}

fn polygon_path(points: &[Point]) -> kurbo::BezPath {
    let mut path = kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
