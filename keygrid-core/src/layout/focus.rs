use crate::{
    foundation::core::{Canvas, lerp},
    layout::solver::KeyPlacement,
};

/// Fraction of the remaining distance closed per tick.
pub const FOCUS_EASE: f64 = 0.15;

/// Zoom progress of the singled-out key, in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FocusZoom {
    progress: f64,
}

impl FocusZoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn update(&mut self, active: bool) {
        let goal = if active { 1.0 } else { 0.0 };
        self.progress = lerp(self.progress, goal, FOCUS_EASE);
    }

    pub fn apply(&self, base: &KeyPlacement, canvas: Canvas) -> KeyPlacement {
        focus_placement(base, canvas, self.progress)
    }
}

/// Interpolate `base` toward the magnified, centered focus position.
///
/// At `progress == 1` the cell is `0.5 * canvas_h` tall, horizontally centered,
/// with its middle at `0.45 * canvas_h`.
pub fn focus_placement(base: &KeyPlacement, canvas: Canvas, progress: f64) -> KeyPlacement {
    let t = progress.clamp(0.0, 1.0);
    let canvas_h = canvas.height_f64();
    let mag = if base.cell_h > 0.0 {
        canvas_h * 0.5 / base.cell_h
    } else {
        1.0
    };
    let target_x = canvas.width_f64() / 2.0;
    let target_y = canvas_h * 0.45 - base.cell_h * mag / 2.0;

    KeyPlacement {
        center_x: lerp(base.center_x, target_x, t),
        top_y: lerp(base.top_y, target_y, t),
        cell_h: lerp(base.cell_h, base.cell_h * mag, t),
        x_scale: lerp(base.x_scale, base.x_scale * mag, t),
        ..*base
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/focus.rs"]
mod tests;
