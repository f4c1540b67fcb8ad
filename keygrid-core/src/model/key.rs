use crate::{
    animation::spring::{Animatable, ScalarSpring, SpringParams},
    foundation::math::Rng64,
    model::input::{ParamKey, TargetInputs},
};

pub const NOMINAL_HEAD: f64 = 250.0;
pub const HEAD_RANGE: (f64, f64) = (NOMINAL_HEAD * 0.7, NOMINAL_HEAD * 1.3);
pub const ROUND_RANGE: (f64, f64) = (0.25, 1.0);
/// Shaft width as a fraction of the head width target.
pub const SHAFT_FRAC: (f64, f64) = (0.2, 0.4);
pub const TOOTH_SCALE_RANGE: (f64, f64) = (1.2, 2.3);
pub const TOOTH_EXTRA_RANGE: (f64, f64) = (0.0, 20.0);

const SEED_HEAD_JITTER: f64 = 60.0;
const SEED_SHAFT: f64 = 100.0;
const SEED_SHAFT_JITTER: f64 = 20.0;
const SEED_TOOTH_EXTRA_MAX: f64 = 10.0;

/// One glyph's full animated state.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyModel {
    pub head_w: ScalarSpring,
    pub head_h: ScalarSpring,
    pub roundness: ScalarSpring,
    pub shaft_w: ScalarSpring,
    pub color_idx: ScalarSpring,
    pub tooth_scale: ScalarSpring,
    pub tooth_extra: ScalarSpring,
}

/// Current values of every spring of a [`KeyModel`], read in one go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySample {
    pub head_w: f64,
    pub head_h: f64,
    pub roundness: f64,
    pub shaft_w: f64,
    pub color_idx: f64,
    pub tooth_scale: f64,
    pub tooth_extra: f64,
}

impl KeyModel {
    /// Seed values around the nominal size so a fresh grid looks pre-settled.
    pub fn create(rng: &mut Rng64, params: SpringParams, palette_len: usize) -> Self {
        let spring = |v: f64| ScalarSpring::new(v, params);
        Self {
            head_w: spring(NOMINAL_HEAD + rng.range(-SEED_HEAD_JITTER, SEED_HEAD_JITTER)),
            head_h: spring(NOMINAL_HEAD + rng.range(-SEED_HEAD_JITTER, SEED_HEAD_JITTER)),
            roundness: spring(rng.range(ROUND_RANGE.0, ROUND_RANGE.1)),
            shaft_w: spring(SEED_SHAFT + rng.range(-SEED_SHAFT_JITTER, SEED_SHAFT_JITTER)),
            color_idx: spring(rng.index(palette_len) as f64),
            tooth_scale: spring(rng.range(TOOTH_SCALE_RANGE.0, TOOTH_SCALE_RANGE.1)),
            tooth_extra: spring(rng.range(TOOTH_EXTRA_RANGE.0, SEED_TOOTH_EXTRA_MAX)),
        }
    }

    /// Draw fresh targets. Values and velocities are untouched, so the change animates.
    pub fn randomize_targets(&mut self, rng: &mut Rng64, palette_len: usize) {
        let head_w = rng.range(HEAD_RANGE.0, HEAD_RANGE.1);
        self.head_w.set_target(head_w);
        self.head_h.set_target(rng.range(HEAD_RANGE.0, HEAD_RANGE.1));
        self.roundness
            .set_target(rng.range(ROUND_RANGE.0, ROUND_RANGE.1));
        self.shaft_w
            .set_target(rng.range(head_w * SHAFT_FRAC.0, head_w * SHAFT_FRAC.1));
        self.color_idx.set_target(rng.index(palette_len) as f64);
        self.tooth_scale
            .set_target(rng.range(TOOTH_SCALE_RANGE.0, TOOTH_SCALE_RANGE.1));
        self.tooth_extra
            .set_target(rng.range(TOOTH_EXTRA_RANGE.0, TOOTH_EXTRA_RANGE.1));
    }

    /// Pull the shaft target back into `SHAFT_FRAC * head_w.target`.
    pub fn enforce_shaft_bounds(&mut self) {
        let (lo, hi) = shaft_bounds(self.head_w.target());
        let t = self.shaft_w.target();
        if t < lo || t > hi || t.is_nan() {
            self.shaft_w.set_target(if t.is_nan() { lo } else { t.max(lo).min(hi) });
        }
    }

    pub fn spring(&self, key: ParamKey) -> Option<&ScalarSpring> {
        match key {
            ParamKey::HeadW => Some(&self.head_w),
            ParamKey::HeadH => Some(&self.head_h),
            ParamKey::Roundness => Some(&self.roundness),
            ParamKey::ShaftW => Some(&self.shaft_w),
            ParamKey::ColorIndex => Some(&self.color_idx),
            ParamKey::ToothScale => Some(&self.tooth_scale),
            ParamKey::ToothExtra => Some(&self.tooth_extra),
            ParamKey::Rows | ParamKey::Cols => None,
        }
    }

    pub fn spring_mut(&mut self, key: ParamKey) -> Option<&mut ScalarSpring> {
        match key {
            ParamKey::HeadW => Some(&mut self.head_w),
            ParamKey::HeadH => Some(&mut self.head_h),
            ParamKey::Roundness => Some(&mut self.roundness),
            ParamKey::ShaftW => Some(&mut self.shaft_w),
            ParamKey::ColorIndex => Some(&mut self.color_idx),
            ParamKey::ToothScale => Some(&mut self.tooth_scale),
            ParamKey::ToothExtra => Some(&mut self.tooth_extra),
            ParamKey::Rows | ParamKey::Cols => None,
        }
    }

    /// Snapshot of the current targets, keyed like the inputs that drive them.
    pub fn targets(&self) -> TargetInputs {
        let mut out = TargetInputs::new();
        for key in ParamKey::KEY_PARAMS {
            if let Some(s) = self.spring(key) {
                out.set(key, s.target());
            }
        }
        out
    }

    pub fn sample(&self) -> KeySample {
        KeySample {
            head_w: self.head_w.get(),
            head_h: self.head_h.get(),
            roundness: self.roundness.get(),
            shaft_w: self.shaft_w.get(),
            color_idx: self.color_idx.get(),
            tooth_scale: self.tooth_scale.get(),
            tooth_extra: self.tooth_extra.get(),
        }
    }

    /// Advance all seven springs by one tick.
    pub fn update(&mut self) {
        for s in self.springs_mut() {
            s.update();
        }
    }

    fn springs_mut(&mut self) -> [&mut dyn Animatable; 7] {
        [
            &mut self.head_w,
            &mut self.head_h,
            &mut self.roundness,
            &mut self.shaft_w,
            &mut self.color_idx,
            &mut self.tooth_scale,
            &mut self.tooth_extra,
        ]
    }
}

pub fn shaft_bounds(head_w_target: f64) -> (f64, f64) {
    let a = head_w_target * SHAFT_FRAC.0;
    let b = head_w_target * SHAFT_FRAC.1;
    (a.min(b), a.max(b))
}

#[cfg(test)]
#[path = "../../tests/unit/model/key.rs"]
mod tests;
