use crate::{
    animation::spring::SpringParams,
    foundation::math::Rng64,
    model::{
        grid::{KeyGrid, clamp_selection, normalize_dims},
        input::{InputSource, ParamKey, TargetInputs},
    },
};

/// Explicit simulation state owned by the caller: the grid plus the seeded
/// generator every randomize call draws from.
///
/// Per-tick order is fixed:
/// 1. [`Simulation::apply_inputs`]: grid dimensions first (may rebuild), then key targets.
/// 2. [`Simulation::tick`]: re-clamp shaft targets, then advance every spring once.
/// 3. Layout and geometry read the resulting snapshot.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: KeyGrid,
    rng: Rng64,
    frame: u64,
}

impl Simulation {
    pub fn new(rows: f64, cols: f64, params: SpringParams, palette_len: usize, seed: u64) -> Self {
        let mut rng = Rng64::new(seed);
        let grid = KeyGrid::new(rows, cols, params, palette_len, &mut rng);
        Self {
            grid,
            rng,
            frame: 0,
        }
    }

    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut KeyGrid {
        &mut self.grid
    }

    /// Number of ticks since construction.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn rebuild(&mut self, rows: f64, cols: f64) {
        self.grid.rebuild(rows, cols, &mut self.rng);
    }

    pub fn randomize_all(&mut self) {
        self.grid.randomize_all(&mut self.rng);
    }

    /// Feed one batch of external targets. Returns `true` when the grid was rebuilt.
    ///
    /// Values are clamped into each key's slider bounds. Key parameters go to the
    /// selected model (clamped into range), whose shaft target is then pulled back
    /// into bounds. They are ignored with no selection or when the grid was rebuilt.
    pub fn apply_inputs(&mut self, inputs: &TargetInputs, selected: Option<usize>) -> bool {
        let palette_len = self.grid.palette_len();
        let rows = inputs
            .get(ParamKey::Rows)
            .map(|v| ParamKey::Rows.clamp_input(v, palette_len));
        let cols = inputs
            .get(ParamKey::Cols)
            .map(|v| ParamKey::Cols.clamp_input(v, palette_len));

        let rebuilt = match (rows, cols) {
            (None, None) => false,
            (r, c) => {
                let r = r.unwrap_or(self.grid.rows() as f64);
                let c = c.unwrap_or(self.grid.cols() as f64);
                if normalize_dims(r, c) != (self.grid.rows(), self.grid.cols()) {
                    self.rebuild(r, c);
                    true
                } else {
                    false
                }
            }
        };

        // A rebuild invalidates the selection for this batch.
        if rebuilt {
            return true;
        }
        let Some(idx) = clamp_selection(selected, self.grid.count()) else {
            return false;
        };
        if selected != Some(idx) {
            tracing::debug!(?selected, clamped = idx, "selection clamped into grid");
        }
        if let Some(key) = self.grid.get_mut(idx) {
            for (param, v) in inputs.key_params() {
                if let Some(spring) = key.spring_mut(param) {
                    spring.set_target(param.clamp_input(v, palette_len));
                }
            }
            key.enforce_shaft_bounds();
        }
        false
    }

    /// Advance one frame: re-enforce shaft bounds, then step every spring.
    pub fn tick(&mut self) {
        self.grid.enforce_shaft_bounds();
        self.grid.update_springs();
        self.frame += 1;
        tracing::trace!(frame = self.frame, "tick");
    }

    /// [`Simulation::apply_inputs`] followed by [`Simulation::tick`].
    pub fn step(&mut self, inputs: &TargetInputs, selected: Option<usize>) -> bool {
        let rebuilt = self.apply_inputs(inputs, selected);
        self.tick();
        rebuilt
    }

    pub fn step_from(&mut self, source: &mut dyn InputSource, selected: Option<usize>) -> bool {
        let inputs = source.poll();
        self.step(&inputs, selected)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/driver.rs"]
mod tests;
