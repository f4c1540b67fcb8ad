use crate::{
    compile::plan::{FrameOptions, compile_frame},
    config::SceneConfig,
    foundation::error::KeygridResult,
    model::grid::KeyGrid,
    render::backend::{FrameRGBA, RenderBackend},
};

/// Compile the current grid snapshot and rasterize it.
#[tracing::instrument(skip_all)]
pub fn render_frame(
    grid: &KeyGrid,
    cfg: &SceneConfig,
    opts: &FrameOptions,
    backend: &mut dyn RenderBackend,
) -> KeygridResult<FrameRGBA> {
    let plan = compile_frame(grid, cfg, opts);
    backend.render_plan(&plan)
}
