use crate::foundation::{
    core::Rgb8,
    error::{KeygridError, KeygridResult},
};

const REFERENCE: [Rgb8; 12] = [
    Rgb8::new(0, 122, 255),
    Rgb8::new(205, 92, 92),
    Rgb8::new(255, 105, 180),
    Rgb8::new(255, 69, 0),
    Rgb8::new(240, 230, 140),
    Rgb8::new(189, 183, 107),
    Rgb8::new(147, 112, 219),
    Rgb8::new(102, 205, 170),
    Rgb8::new(70, 130, 180),
    Rgb8::new(119, 136, 153),
    Rgb8::new(47, 79, 79),
    Rgb8::new(188, 143, 143),
];

/// Ordered, non-empty color table. Never mutated once built.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Rgb8>", into = "Vec<Rgb8>")]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb8>) -> KeygridResult<Self> {
        if colors.is_empty() {
            return Err(KeygridError::validation("palette must not be empty"));
        }
        Ok(Self { colors })
    }

    pub fn reference() -> Self {
        Self {
            colors: REFERENCE.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Snap a continuous index to the nearest entry, clamped into the table.
    ///
    /// Mid-animation values always land on one of the two neighbouring colors.
    pub fn resolve(&self, idx: f64) -> Rgb8 {
        self.colors[self.snap(idx)]
    }

    pub fn snap(&self, idx: f64) -> usize {
        let last = (self.colors.len() - 1) as f64;
        // NaN saturates to 0 on the cast.
        (idx + 0.5).floor().max(0.0).min(last) as usize
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<Rgb8>> for Palette {
    type Error = KeygridError;

    fn try_from(colors: Vec<Rgb8>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb8> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/palette.rs"]
mod tests;
