use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::foundation::error::{KeygridError, KeygridResult};

/// Named numeric target recognized by the core.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ParamKey {
    #[serde(rename = "headW")]
    HeadW,
    #[serde(rename = "headH")]
    HeadH,
    #[serde(rename = "roundness")]
    Roundness,
    #[serde(rename = "shaftW")]
    ShaftW,
    #[serde(rename = "colorIndex")]
    ColorIndex,
    #[serde(rename = "toothScale")]
    ToothScale,
    #[serde(rename = "toothExtra")]
    ToothExtra,
    #[serde(rename = "rows")]
    Rows,
    #[serde(rename = "cols")]
    Cols,
}

impl ParamKey {
    pub const ALL: [ParamKey; 9] = [
        Self::HeadW,
        Self::HeadH,
        Self::Roundness,
        Self::ShaftW,
        Self::ColorIndex,
        Self::ToothScale,
        Self::ToothExtra,
        Self::Rows,
        Self::Cols,
    ];

    /// Keys that target a single key model (as opposed to the grid).
    pub const KEY_PARAMS: [ParamKey; 7] = [
        Self::HeadW,
        Self::HeadH,
        Self::Roundness,
        Self::ShaftW,
        Self::ColorIndex,
        Self::ToothScale,
        Self::ToothExtra,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::HeadW => "headW",
            Self::HeadH => "headH",
            Self::Roundness => "roundness",
            Self::ShaftW => "shaftW",
            Self::ColorIndex => "colorIndex",
            Self::ToothScale => "toothScale",
            Self::ToothExtra => "toothExtra",
            Self::Rows => "rows",
            Self::Cols => "cols",
        }
    }

    pub fn is_grid(self) -> bool {
        matches!(self, Self::Rows | Self::Cols)
    }

    /// Inclusive bounds of the slider that drives this key.
    ///
    /// These bound externally supplied targets only; the randomizer samples its own ranges.
    pub fn ui_bounds(self, palette_len: usize) -> (f64, f64) {
        match self {
            Self::HeadW | Self::HeadH => (70.0, 325.0),
            Self::Roundness => (0.25, 1.0),
            Self::ShaftW => (40.0, 150.0),
            Self::ColorIndex => (0.0, palette_len.saturating_sub(1) as f64),
            Self::ToothScale => (1.2, 2.3),
            Self::ToothExtra => (0.0, 20.0),
            Self::Rows => (1.0, 12.0),
            Self::Cols => (6.0, 24.0),
        }
    }

    /// Clamp `v` into [`ParamKey::ui_bounds`], snapping integer-stepped keys.
    pub fn clamp_input(self, v: f64, palette_len: usize) -> f64 {
        let (lo, hi) = self.ui_bounds(palette_len);
        let v = if v.is_nan() { lo } else { v };
        let v = match self {
            Self::ColorIndex | Self::Rows | Self::Cols => v.round(),
            _ => v,
        };
        v.max(lo).min(hi)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = KeygridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| KeygridError::validation(format!("unknown parameter '{s}'")))
    }
}

/// Mapping from parameter name to numeric target, refreshed at will by the caller.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TargetInputs {
    values: BTreeMap<ParamKey, f64>,
}

impl TargetInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name=value` style pairs, rejecting unknown names.
    pub fn from_pairs<'a, I>(pairs: I) -> KeygridResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut out = Self::new();
        for (name, v) in pairs {
            out.set(name.parse()?, v);
        }
        Ok(out)
    }

    pub fn set(&mut self, key: ParamKey, v: f64) -> &mut Self {
        self.values.insert(key, v);
        self
    }

    pub fn with(mut self, key: ParamKey, v: f64) -> Self {
        self.set(key, v);
        self
    }

    pub fn get(&self, key: ParamKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    pub fn remove(&mut self, key: ParamKey) -> Option<f64> {
        self.values.remove(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn key_params(&self) -> impl Iterator<Item = (ParamKey, f64)> + '_ {
        self.iter().filter(|(k, _)| !k.is_grid())
    }
}

/// Capability implemented by the UI layer: hand over the current targets once per tick.
pub trait InputSource {
    fn poll(&mut self) -> TargetInputs;
}

impl InputSource for TargetInputs {
    fn poll(&mut self) -> TargetInputs {
        self.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/input.rs"]
mod tests;
