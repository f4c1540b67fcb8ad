use crate::{
    animation::spring::Animatable,
    foundation::core::Canvas,
    model::grid::KeyGrid,
};

/// Fixed screen margins and gaps, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margin_x: f64,
    pub margin_y: f64,
    pub head_gap_x: f64,
    pub row_gap_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_x: 15.0,
            margin_y: 15.0,
            head_gap_x: 15.0,
            row_gap_y: 10.0,
        }
    }
}

impl LayoutConfig {
    /// Width left for the heads of one row once margins and inter-key gaps are removed.
    pub fn available_width(&self, canvas_w: f64, cols: usize) -> f64 {
        let gaps = cols.saturating_sub(1) as f64 * self.head_gap_x;
        (canvas_w - self.margin_x * 2.0 - gaps).max(0.0)
    }

    pub fn cell_height(&self, canvas_h: f64, rows: usize) -> f64 {
        let rows_f = rows.max(1) as f64;
        let gaps = rows.saturating_sub(1) as f64 * self.row_gap_y;
        ((canvas_h - self.margin_y * 2.0 - gaps) / rows_f).max(0.0)
    }

    pub fn row_top(&self, row: usize, cell_h: f64) -> f64 {
        self.margin_y + row as f64 * (cell_h + self.row_gap_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowSlot {
    pub left: f64,
    pub center: f64,
    pub width: f64,
}

/// Horizontal fit of one row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    pub x_scale: f64,
    pub slots: Vec<RowSlot>,
}

impl RowLayout {
    pub fn scaled_width_sum(&self) -> f64 {
        self.slots.iter().map(|s| s.width).sum()
    }

    /// Distance from the first slot's left edge to the last slot's right edge.
    pub fn span(&self) -> f64 {
        match (self.slots.first(), self.slots.last()) {
            (Some(a), Some(b)) => b.left + b.width - a.left,
            _ => 0.0,
        }
    }
}

/// Scale a row so its head widths sum to `available_width`, then place the
/// slots left to right from `x0`, separated by `gap`.
///
/// `available_width` must already exclude the gaps. A non-positive width sum
/// falls back to a scale of `1`.
pub fn solve_row<I>(head_widths: I, available_width: f64, x0: f64, gap: f64) -> RowLayout
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let widths = head_widths.into_iter();
    let sum: f64 = widths.clone().sum();
    let x_scale = if sum > 0.0 {
        available_width / sum
    } else {
        1.0
    };

    let mut slots = Vec::with_capacity(widths.size_hint().0);
    let mut x_left = x0;
    for w in widths {
        let width = w * x_scale;
        slots.push(RowSlot {
            left: x_left,
            center: x_left + width / 2.0,
            width,
        });
        x_left += width + gap;
    }
    RowLayout { x_scale, slots }
}

/// Where one key is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPlacement {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub center_x: f64,
    pub top_y: f64,
    pub cell_h: f64,
    pub x_scale: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub cell_h: f64,
    pub available_width: f64,
    pub rows: Vec<RowLayout>,
    pub placements: Vec<KeyPlacement>,
}

impl GridLayout {
    pub fn placement(&self, index: usize) -> Option<&KeyPlacement> {
        self.placements.get(index)
    }
}

/// Lay out every row of `grid` on `canvas`. Rows are fitted independently.
pub fn resolve_grid(grid: &KeyGrid, canvas: Canvas, cfg: &LayoutConfig) -> GridLayout {
    let cell_h = cfg.cell_height(canvas.height_f64(), grid.rows());
    let available_width = cfg.available_width(canvas.width_f64(), grid.cols());

    let mut rows = Vec::with_capacity(grid.rows());
    let mut placements = Vec::with_capacity(grid.count());
    for r in 0..grid.rows() {
        let row = solve_row(
            grid.row(r).iter().map(|k| k.head_w.get()),
            available_width,
            cfg.margin_x,
            cfg.head_gap_x,
        );
        let top_y = cfg.row_top(r, cell_h);
        for (c, slot) in row.slots.iter().enumerate() {
            placements.push(KeyPlacement {
                index: r * grid.cols() + c,
                row: r,
                col: c,
                center_x: slot.center,
                top_y,
                cell_h,
                x_scale: row.x_scale,
            });
        }
        rows.push(row);
    }

    GridLayout {
        cell_h,
        available_width,
        rows,
        placements,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
