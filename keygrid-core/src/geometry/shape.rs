use crate::{
    compile::plan::DrawOp,
    foundation::core::{Point, Rgb8},
    model::{key::KeySample, palette::Palette},
};

/// Proportions of the key glyph. Lengths are in unscaled model units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Head-to-shaft gap.
    pub gap: f64,
    pub overlap: f64,
    /// Minimum shaft body, as a fraction of the cell height.
    pub min_shaft_body_frac: f64,
    /// Tip height, as a fraction of the shaft width.
    pub tip_frac: f64,
    pub head_floor: f64,
    pub tip_floor: f64,
    /// Tooth height along the shaft, before `tooth_scale`.
    pub tooth_base: f64,
    /// Tooth reach away from the shaft, before `tooth_scale`.
    pub tooth_out: f64,
    pub hole_radius_frac: f64,
    pub hole_offset_frac: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            gap: 5.0,
            overlap: 5.0,
            min_shaft_body_frac: 0.15,
            tip_frac: 0.35,
            head_floor: 20.0,
            tip_floor: 10.0,
            tooth_base: 26.0,
            tooth_out: 18.0,
            hole_radius_frac: 0.1,
            hole_offset_frac: 0.15,
        }
    }
}

/// Vertical cell a key is fitted into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFrame {
    pub center_x: f64,
    pub top_y: f64,
    pub height: f64,
}

impl CellFrame {
    pub fn mid_y(&self) -> f64 {
        self.top_y + self.height / 2.0
    }

    pub fn bottom_y(&self) -> f64 {
        self.top_y + self.height
    }
}

/// Resolved split of the cell height, top to bottom:
/// `head_h + gap_y + overlap_y + shaft_body_h + tip_h`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalBudget {
    pub head_h: f64,
    pub gap_y: f64,
    pub overlap_y: f64,
    pub shaft_body_h: f64,
    pub tip_h: f64,
    pub min_shaft_body: f64,
    pub y_scale: f64,
}

impl VerticalBudget {
    pub fn total(&self) -> f64 {
        self.head_h + self.gap_y + self.overlap_y + self.shaft_body_h + self.tip_h
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToothLayout {
    pub base_y: f64,
    pub out_x: f64,
    /// Teeth that fit along the shaft body.
    pub max_teeth: usize,
    /// Continuous tooth count; the fractional part is the sliding tooth.
    pub requested: f64,
    pub draw_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tooth {
    pub points: [Point; 3],
    /// `0` fully retracted into the shaft, `1` fully out.
    pub progress: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadRect {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hole {
    pub center: Point,
    pub radius: f64,
}

/// Fully resolved geometry of one key in canvas coordinates (unflipped).
#[derive(Clone, Debug, PartialEq)]
pub struct KeyGeometry {
    pub cell: CellFrame,
    pub budget: VerticalBudget,
    pub head: HeadRect,
    /// Shoulders, joint corners and tip, clockwise from the top-left shoulder.
    pub shaft: [Point; 5],
    pub teeth: Vec<Tooth>,
    pub tooth_layout: ToothLayout,
    pub hole: Hole,
    pub color: Rgb8,
}

fn y_scale_for(head_h: f64, head_h_raw: f64) -> f64 {
    if head_h_raw > 0.0 {
        head_h / head_h_raw
    } else {
        1.0
    }
}

/// Fit `sample` into `cell` with the row's horizontal scale.
///
/// Only `head_w` and `shaft_w` take `x_scale`. If the shaft body would end up
/// shorter than its minimum, the tip is reduced first and the head last.
pub fn solve_key(
    sample: &KeySample,
    cell: CellFrame,
    x_scale: f64,
    cfg: &ShapeConfig,
    palette: &Palette,
) -> KeyGeometry {
    let cell_h = cell.height.max(0.0);
    let head_w_x = (sample.head_w * x_scale).max(0.0);
    let shaft_w_x = (sample.shaft_w * x_scale).max(0.0);
    let head_h_raw = sample.head_h;

    let budget = vertical_budget(head_h_raw, sample.shaft_w, cell_h, cfg);

    let cx = cell.center_x;
    let head_center_y = cell.top_y + budget.head_h / 2.0;
    let shaft_top = cell.top_y + budget.head_h + budget.gap_y + budget.overlap_y;
    let joint_y = shaft_top + budget.shaft_body_h;
    let tip_y = joint_y + budget.tip_h;
    let half = shaft_w_x / 2.0;

    let half_min = head_w_x.min(budget.head_h).max(0.0) / 2.0;
    let head = HeadRect {
        center: Point::new(cx, head_center_y),
        width: head_w_x,
        height: budget.head_h,
        radius: (sample.roundness * half_min).max(0.0).min(half_min),
    };

    let shaft = [
        Point::new(cx - half, shaft_top),
        Point::new(cx + half, shaft_top),
        Point::new(cx + half, joint_y),
        Point::new(cx, tip_y),
        Point::new(cx - half, joint_y),
    ];

    let tooth_layout = tooth_layout(sample, &budget, x_scale, cfg);
    let mut teeth = Vec::with_capacity(tooth_layout.draw_count);
    let edge_x = cx + half;
    for i in 0..tooth_layout.draw_count {
        let progress = (tooth_layout.requested - i as f64).clamp(0.0, 1.0);
        if progress <= 0.0 {
            continue;
        }
        let py = joint_y - tooth_layout.base_y * i as f64;
        if py - tooth_layout.base_y < shaft_top - 1e-9 {
            break;
        }
        teeth.push(Tooth {
            points: [
                Point::new(edge_x, py),
                Point::new(edge_x, py - tooth_layout.base_y),
                Point::new(
                    edge_x + tooth_layout.out_x * progress,
                    py - tooth_layout.base_y * 0.5,
                ),
            ],
            progress,
        });
    }

    let hole = hole(sample.head_w, head_h_raw, &budget, head.center, half_min, cfg);

    KeyGeometry {
        cell: CellFrame {
            height: cell_h,
            ..cell
        },
        budget,
        head,
        shaft,
        teeth,
        tooth_layout,
        hole,
        color: palette.resolve(sample.color_idx),
    }
}

/// Split `cell_h` into head, gaps, shaft body and tip.
pub fn vertical_budget(
    head_h_raw: f64,
    shaft_w: f64,
    cell_h: f64,
    cfg: &ShapeConfig,
) -> VerticalBudget {
    let min_body = cell_h * cfg.min_shaft_body_frac;
    let tip_h_raw = (shaft_w * cfg.tip_frac).max(0.0);

    let head_max = (cell_h - (cfg.gap + cfg.overlap + min_body + tip_h_raw)).max(cfg.head_floor);
    let mut head_h = head_h_raw.min(head_max).max(0.0);
    let mut y_scale = y_scale_for(head_h, head_h_raw);
    let mut gap_y = cfg.gap * y_scale;
    let mut overlap_y = cfg.overlap * y_scale;

    let room_for_tip = cell_h - (gap_y + overlap_y + min_body + head_h);
    let mut tip_h = (tip_h_raw * y_scale).min(room_for_tip.max(cfg.tip_floor)).max(0.0);
    let mut body = cell_h - tip_h - (head_h + gap_y + overlap_y);

    // Tier 2: give tip height back to the shaft.
    if body < min_body {
        let reclaim = (min_body - body).min(tip_h);
        tip_h -= reclaim;
        body += reclaim;
    }

    // Tier 3: shrink the head, never below its floor (or its current size if smaller).
    // Only reached once the head is at or below its floor. The floor then holds and
    // the body clamps to zero.
    if body < min_body {
        let shortfall = min_body - body;
        head_h = (head_h - shortfall).max(cfg.head_floor.min(head_h));
        y_scale = y_scale_for(head_h, head_h_raw);
        gap_y = cfg.gap * y_scale;
        overlap_y = cfg.overlap * y_scale;
        body = cell_h - tip_h - (head_h + gap_y + overlap_y);
    }

    VerticalBudget {
        head_h,
        gap_y,
        overlap_y,
        shaft_body_h: body.max(0.0),
        tip_h,
        min_shaft_body: min_body,
        y_scale,
    }
}

fn tooth_layout(
    sample: &KeySample,
    budget: &VerticalBudget,
    x_scale: f64,
    cfg: &ShapeConfig,
) -> ToothLayout {
    let base_y = cfg.tooth_base * sample.tooth_scale * budget.y_scale;
    let out_x = cfg.tooth_out * sample.tooth_scale * x_scale;

    let max_teeth = if base_y > 0.0 && budget.shaft_body_h > 0.0 {
        (budget.shaft_body_h / base_y).floor() as usize
    } else {
        0
    };
    if max_teeth == 0 {
        return ToothLayout {
            base_y,
            out_x,
            max_teeth,
            requested: 0.0,
            draw_count: 0,
        };
    }

    let extra = sample.tooth_extra.max(0.0).min((max_teeth - 1) as f64);
    let requested = 1.0 + extra;
    let draw_count = max_teeth.min(requested.ceil() as usize + 1);
    ToothLayout {
        base_y,
        out_x,
        max_teeth,
        requested,
        draw_count,
    }
}

fn hole(
    head_w: f64,
    head_h_raw: f64,
    budget: &VerticalBudget,
    head_center: Point,
    half_min: f64,
    cfg: &ShapeConfig,
) -> Hole {
    let size = (head_w * head_h_raw).max(1.0).sqrt();
    let radius = (size * cfg.hole_radius_frac * budget.y_scale).min(half_min);
    let max_offset = (budget.head_h / 2.0 - radius).max(0.0);
    let offset = (size * cfg.hole_offset_frac * budget.y_scale).min(max_offset);
    Hole {
        center: Point::new(head_center.x, head_center.y - offset),
        radius,
    }
}

impl KeyGeometry {
    /// Draw primitives in paint order: head, shaft, teeth, hole.
    ///
    /// `flip` mirrors about the cell's own horizontal midline, so the key stays in its cell.
    pub fn emit(&self, flip: bool, background: Rgb8) -> Vec<DrawOp> {
        let mid = self.cell.mid_y();
        let map = |p: Point| {
            if flip {
                Point::new(p.x, 2.0 * mid - p.y)
            } else {
                p
            }
        };

        let mut ops = Vec::with_capacity(3 + self.teeth.len());
        ops.push(DrawOp::RoundedRect {
            center: map(self.head.center),
            width: self.head.width,
            height: self.head.height,
            radius: self.head.radius,
            color: self.color,
        });
        ops.push(DrawOp::Polygon {
            points: self.shaft.iter().copied().map(map).collect(),
            color: self.color,
        });
        for tooth in &self.teeth {
            ops.push(DrawOp::Triangle {
                points: tooth.points.map(map),
                color: self.color,
            });
        }
        ops.push(DrawOp::Circle {
            center: map(self.hole.center),
            radius: self.hole.radius,
            color: background,
        });
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
