use std::path::Path;

use crate::{
    animation::spring::SpringParams,
    foundation::{
        core::{Canvas, Rgb8},
        error::{KeygridError, KeygridResult},
    },
    geometry::shape::ShapeConfig,
    layout::solver::LayoutConfig,
    model::{input::ParamKey, palette::Palette},
};

/// Scene document: canvas, grid size, seed, and every tunable constant.
///
/// All fields default, so `{}` is a valid scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas: Canvas,
    pub rows: u32,
    pub cols: u32,
    pub seed: u64,
    pub spring: SpringParams,
    pub layout: LayoutConfig,
    pub shape: ShapeConfig,
    pub palette: Palette,
    pub background: Rgb8,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            rows: 9,
            cols: 22,
            seed: 1,
            spring: SpringParams::default(),
            layout: LayoutConfig::default(),
            shape: ShapeConfig::default(),
            palette: Palette::reference(),
            background: Rgb8::BLACK,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(s: &str) -> KeygridResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| KeygridError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> KeygridResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            KeygridError::Other(
                anyhow::Error::new(e).context(format!("read scene '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> KeygridResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| KeygridError::serde(e.to_string()))
    }

    pub fn validate(&self) -> KeygridResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(KeygridError::validation("canvas dimensions must be > 0"));
        }
        for (key, v) in [(ParamKey::Rows, self.rows), (ParamKey::Cols, self.cols)] {
            let (lo, hi) = key.ui_bounds(self.palette.len());
            let v = f64::from(v);
            if v < lo || v > hi {
                return Err(KeygridError::validation(format!(
                    "{key} must be in [{lo}, {hi}], got {v}"
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(KeygridError::validation("palette must not be empty"));
        }

        let unit = |name: &str, v: f64| -> KeygridResult<()> {
            if !(v > 0.0 && v <= 1.0) {
                return Err(KeygridError::validation(format!(
                    "spring.{name} must be in (0, 1], got {v}"
                )));
            }
            Ok(())
        };
        unit("stiffness", self.spring.stiffness)?;
        unit("damping", self.spring.damping)?;

        let l = &self.layout;
        let s = &self.shape;
        let lengths = [
            ("layout.margin_x", l.margin_x),
            ("layout.margin_y", l.margin_y),
            ("layout.head_gap_x", l.head_gap_x),
            ("layout.row_gap_y", l.row_gap_y),
            ("shape.gap", s.gap),
            ("shape.overlap", s.overlap),
            ("shape.min_shaft_body_frac", s.min_shaft_body_frac),
            ("shape.tip_frac", s.tip_frac),
            ("shape.head_floor", s.head_floor),
            ("shape.tip_floor", s.tip_floor),
            ("shape.tooth_base", s.tooth_base),
            ("shape.tooth_out", s.tooth_out),
            ("shape.hole_radius_frac", s.hole_radius_frac),
            ("shape.hole_offset_frac", s.hole_offset_frac),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v < 0.0 {
                return Err(KeygridError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/scene.rs"]
mod tests;
