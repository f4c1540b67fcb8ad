use crate::{
    animation::spring::SpringParams,
    foundation::math::Rng64,
    model::key::KeyModel,
};

pub const MIN_ROWS: usize = 1;
pub const MIN_COLS: usize = 6;
/// Upper bound on either dimension. Larger requests clamp to it.
pub const MAX_DIM: usize = 256;

/// Rectangular array of key models, stored row-major.
///
/// `keys.len() == rows * cols` at all times. Changing either dimension rebuilds
/// the array from scratch; no key survives a resize.
#[derive(Clone, Debug)]
pub struct KeyGrid {
    rows: usize,
    cols: usize,
    keys: Vec<KeyModel>,
    params: SpringParams,
    palette_len: usize,
}

impl KeyGrid {
    pub fn new(
        rows: f64,
        cols: f64,
        params: SpringParams,
        palette_len: usize,
        rng: &mut Rng64,
    ) -> Self {
        let mut grid = Self {
            rows: MIN_ROWS,
            cols: MIN_COLS,
            keys: Vec::new(),
            params,
            palette_len,
        };
        grid.rebuild(rows, cols, rng);
        grid
    }

    /// Floor and clamp the requested dimensions, then replace every key with a
    /// freshly seeded, freshly randomized one.
    #[tracing::instrument(skip(self, rng))]
    pub fn rebuild(&mut self, rows: f64, cols: f64, rng: &mut Rng64) {
        let (rows, cols) = normalize_dims(rows, cols);
        let count = rows.saturating_mul(cols);
        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            keys.push(KeyModel::create(rng, self.params, self.palette_len));
        }
        for k in &mut keys {
            k.randomize_targets(rng, self.palette_len);
        }
        self.rows = rows;
        self.cols = cols;
        self.keys = keys;
        tracing::debug!(rows, cols, count, "grid rebuilt");
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn palette_len(&self) -> usize {
        self.palette_len
    }

    pub fn spring_params(&self) -> SpringParams {
        self.params
    }

    pub fn keys(&self) -> &[KeyModel] {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut [KeyModel] {
        &mut self.keys
    }

    pub fn get(&self, idx: usize) -> Option<&KeyModel> {
        self.keys.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut KeyModel> {
        self.keys.get_mut(idx)
    }

    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    /// Keys of one row, left to right. Empty when `row` is out of range.
    pub fn row(&self, row: usize) -> &[KeyModel] {
        if row >= self.rows {
            return &[];
        }
        let start = row * self.cols;
        &self.keys[start..start + self.cols]
    }

    pub fn randomize_all(&mut self, rng: &mut Rng64) {
        for k in &mut self.keys {
            k.randomize_targets(rng, self.palette_len);
        }
        tracing::debug!(count = self.keys.len(), "randomized all targets");
    }

    pub fn enforce_shaft_bounds(&mut self) {
        for k in &mut self.keys {
            k.enforce_shaft_bounds();
        }
    }

    pub fn update_springs(&mut self) {
        for k in &mut self.keys {
            k.update();
        }
    }
}

/// `(max(1, floor(rows)), max(6, floor(cols)))`, each capped at [`MAX_DIM`].
/// Non-finite values map to the minimum.
pub fn normalize_dims(rows: f64, cols: f64) -> (usize, usize) {
    (clamp_dim(rows, MIN_ROWS), clamp_dim(cols, MIN_COLS))
}

fn clamp_dim(v: f64, min: usize) -> usize {
    if !v.is_finite() {
        return min;
    }
    v.floor().clamp(min as f64, MAX_DIM as f64) as usize
}

/// Clamp an externally held selection into `[0, count - 1]`.
pub fn clamp_selection(selected: Option<usize>, count: usize) -> Option<usize> {
    match selected {
        Some(_) if count == 0 => None,
        Some(i) => Some(i.min(count - 1)),
        None => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/grid.rs"]
mod tests;
