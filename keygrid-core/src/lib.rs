//! Keygrid is a procedural generator for animated grids of stylized keys.
//!
//! Every key is a rounded head, a shaft with an optional bit, and a run of teeth.
//! Each shape parameter sits on its own damped spring, so changing a target makes
//! the key morph toward it over subsequent frames instead of jumping.
//!
//! # Pipeline overview
//!
//! 1. **Simulate**: `Simulation + TargetInputs -> KeyGrid` (spring state after one tick)
//! 2. **Layout**: `KeyGrid + Canvas -> GridLayout` (row fill, per-row horizontal scale)
//! 3. **Compile**: `KeyGrid + SceneConfig -> FramePlan` (solid-fill draw ops, back to front)
//! 4. **Render**: `FramePlan -> FrameRGBA` (CPU backend)
//!
//! Simulation, layout and compilation are pure and deterministic for a given seed.
//! Renderers output premultiplied RGBA8.
#![forbid(unsafe_code)]

mod animation;
mod compile;
mod config;
mod foundation;
mod geometry;
mod layout;
mod model;
mod render;
mod sim;

pub use animation::spring::{Animatable, ScalarSpring, SpringParams};
pub use compile::plan::{
    DrawMode, DrawOp, FrameOptions, FramePlan, KeyDraw, compile_frame, compile_key,
};
pub use config::SceneConfig;
pub use foundation::core::{Canvas, Point, Rect, Rgb8, Vec2};
pub use foundation::error::{KeygridError, KeygridResult};
pub use foundation::math::Rng64;
pub use geometry::shape::{
    CellFrame, HeadRect, Hole, KeyGeometry, ShapeConfig, Tooth, ToothLayout, VerticalBudget,
    solve_key, vertical_budget,
};
pub use layout::focus::{FOCUS_EASE, FocusZoom, focus_placement};
pub use layout::solver::{
    GridLayout, KeyPlacement, LayoutConfig, RowLayout, RowSlot, resolve_grid, solve_row,
};
pub use model::grid::{KeyGrid, MAX_DIM, MIN_COLS, MIN_ROWS, clamp_selection, normalize_dims};
pub use model::input::{InputSource, ParamKey, TargetInputs};
pub use model::key::{
    HEAD_RANGE, KeyModel, KeySample, NOMINAL_HEAD, ROUND_RANGE, SHAFT_FRAC, TOOTH_EXTRA_RANGE,
    TOOTH_SCALE_RANGE, shaft_bounds,
};
pub use model::palette::Palette;
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::cpu::CpuBackend;
pub use render::pipeline::render_frame;
pub use sim::driver::Simulation;
