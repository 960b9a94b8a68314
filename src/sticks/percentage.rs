use crate::foundation::math::{clamp_percentage, floor_count};
use std::cell::Cell;
use std::rc::Rc;

/// How many sticks a percentage hard-fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FillCount {
    pub fill_count: usize,
    /// `false` when `stick_count * p / 100` has a fractional part.
    pub is_exact_boundary: bool,
}

/// Map a percentage onto a stick count. Out-of-range input is clamped, never rejected.
pub fn map_percentage_to_fill_count(percentage: f64, stick_count: usize) -> FillCount {
    let p = clamp_percentage(percentage);
    let exact = stick_count as f64 * p / 100.0;
    let fill_count = floor_count(exact).min(stick_count);
    FillCount {
        fill_count,
        is_exact_boundary: exact == fill_count as f64,
    }
}

/// Per-side fill of a symmetric ring fill: `floor(count * p / 200)`.
///
/// The flag reports whether the half-fill rounds to a whole stick; when it does not, one extra
/// stick leads the fill.
pub(crate) fn map_symmetric_fill(percentage: f64, stick_count: usize) -> (usize, bool) {
    let p = clamp_percentage(percentage);
    let half = stick_count as f64 * p / 200.0;
    let per_side = floor_count(half);
    (per_side, per_side as f64 == half.round())
}

/// Externally owned progress value shared read-only with a sequencer.
///
/// Clones observe the same value. Reads are clamped to `[0, 100]`.
#[derive(Clone, Debug, Default)]
pub struct ProgressInput(Rc<Cell<f64>>);

impl ProgressInput {
    pub fn new(percentage: f64) -> Self {
        Self(Rc::new(Cell::new(percentage)))
    }

    /// Store a raw value; readers clamp.
    pub fn set(&self, percentage: f64) {
        self.0.set(percentage);
    }

    /// The current value clamped to `[0, 100]`.
    pub fn get(&self) -> f64 {
        clamp_percentage(self.0.get())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sticks/percentage.rs"]
mod tests;
