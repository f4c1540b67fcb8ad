use crate::{
    config::SceneConfig,
    foundation::core::{Canvas, Point, Rgb8},
    geometry::shape::{CellFrame, solve_key},
    layout::{
        focus::focus_placement,
        solver::{KeyPlacement, resolve_grid},
    },
    model::{
        grid::{KeyGrid, clamp_selection},
        key::KeyModel,
    },
};

/// Solid-fill primitive. Any backend able to rasterize these four kinds can draw a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    RoundedRect {
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        color: Rgb8,
    },
    Polygon {
        points: Vec<Point>,
        color: Rgb8,
    },
    Triangle {
        points: [Point; 3],
        color: Rgb8,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgb8,
    },
}

impl DrawOp {
    pub fn color(&self) -> Rgb8 {
        match self {
            Self::RoundedRect { color, .. }
            | Self::Polygon { color, .. }
            | Self::Triangle { color, .. }
            | Self::Circle { color, .. } => *color,
        }
    }
}

/// Per-call draw mode. A singled-out key is never flipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawMode {
    pub flip: bool,
    pub singled_out: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOptions {
    /// Checkerboard flip of keys whose `row + col` is odd.
    pub flip: bool,
    pub selected: Option<usize>,
    /// Zoom progress of the selected key, see [`crate::FocusZoom`].
    pub focus_progress: f64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            flip: true,
            selected: None,
            focus_progress: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyDraw {
    pub index: usize,
    pub singled_out: bool,
    pub ops: Vec<DrawOp>,
}

/// Everything needed to paint one frame, in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub keys: Vec<KeyDraw>,
}

impl FramePlan {
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.keys.iter().flat_map(|k| k.ops.iter())
    }

    pub fn op_count(&self) -> usize {
        self.keys.iter().map(|k| k.ops.len()).sum()
    }
}

/// Lay out the grid and emit every key's primitives.
///
/// The selected key (if any) is skipped in the grid pass and emitted last at
/// its focus placement.
#[tracing::instrument(skip_all, fields(keys = grid.count()))]
pub fn compile_frame(grid: &KeyGrid, cfg: &SceneConfig, opts: &FrameOptions) -> FramePlan {
    let layout = resolve_grid(grid, cfg.canvas, &cfg.layout);
    let selected = clamp_selection(opts.selected, grid.count());

    let mut keys = Vec::with_capacity(layout.placements.len());
    for placement in &layout.placements {
        if Some(placement.index) == selected {
            continue;
        }
        let Some(model) = grid.get(placement.index) else {
            continue;
        };
        let mode = DrawMode {
            flip: opts.flip && (placement.row + placement.col) % 2 == 1,
            singled_out: false,
        };
        keys.push(compile_key(model, placement, mode, cfg));
    }

    if let Some(idx) = selected
        && let (Some(model), Some(base)) = (grid.get(idx), layout.placement(idx))
    {
        let placement = focus_placement(base, cfg.canvas, opts.focus_progress);
        let mode = DrawMode {
            flip: false,
            singled_out: true,
        };
        keys.push(compile_key(model, &placement, mode, cfg));
    }

    tracing::debug!(ops = keys.iter().map(|k| k.ops.len()).sum::<usize>(), "frame compiled");
    FramePlan {
        canvas: cfg.canvas,
        background: cfg.background,
        keys,
    }
}

/// Resolve and emit one key at `placement`.
pub fn compile_key(
    model: &KeyModel,
    placement: &KeyPlacement,
    mode: DrawMode,
    cfg: &SceneConfig,
) -> KeyDraw {
    let cell = CellFrame {
        center_x: placement.center_x,
        top_y: placement.top_y,
        height: placement.cell_h,
    };
    let geometry = solve_key(
        &model.sample(),
        cell,
        placement.x_scale,
        &cfg.shape,
        &cfg.palette,
    );
    KeyDraw {
        index: placement.index,
        singled_out: mode.singled_out,
        ops: geometry.emit(mode.flip && !mode.singled_out, cfg.background),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
