//! Geometry sizing: bounding size + style -> immutable [`SequencerConfig`].

use crate::foundation::core::{Rgba8, Size};
use crate::foundation::math::{finite_or, floor_count, secs_to_duration};
use crate::sticks::kind::{Shape, StickKind};
use std::f64::consts::PI;
use std::time::Duration;

/// Narrowest stick a linear kind draws.
pub const MIN_LINEAR_STICK_WIDTH: f64 = 5.0;
/// Shortest stick a linear kind draws.
pub const MIN_STICK_HEIGHT: f64 = 1.0;
/// Linear kinds never show fewer sticks.
pub const MIN_LINEAR_STICKS: usize = 3;
/// Ring kinds never show fewer sticks.
pub const MIN_RING_STICKS: usize = 1;
/// Upper bound on any stick count.
pub const MAX_STICK_COUNT: usize = 1024;
/// Total animation durations below this are raised to it.
pub const MIN_TOTAL_DURATION_SECS: f64 = 0.2;
/// Smallest ring diameter.
pub const MIN_RING_DIAMETER: f64 = 50.0;
/// A ring stays this far inside the smaller screen dimension.
pub const RING_SCREEN_MARGIN: f64 = 50.0;
/// Ring stick width band, as fractions of the diameter.
pub const RING_STICK_WIDTH_MIN_FRACTION: f64 = 0.09;
pub const RING_STICK_WIDTH_MAX_FRACTION: f64 = 0.20;
/// Ring sticks swing by this fraction of one angular slot.
pub const RING_SWING_SLOTS: f64 = 0.6;
/// Ring loading lets a stick settle back this many steps slower than it left.
pub const RING_SETTLE_FACTOR: u32 = 10;

const LINEAR_REST_EXTENT: f64 = 0.80;
const LINEAR_ACTIVE_EXTENT: f64 = 1.25;
const RING_STICKS_PER_CIRCUMFERENCE_WIDTH: f64 = 0.25;

/// Caller-facing style options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickStyle {
    /// Requested stick width. Linear kinds floor it; ring kinds clamp it to a diameter band.
    pub stick_width: f64,
    /// Requested gap between linear sticks.
    pub spacing: f64,
    /// Total duration of one sweep, in seconds.
    pub duration_secs: f64,
    pub filled_color: Rgba8,
    pub unfilled_color: Rgba8,
    /// Colour of percentage-backed sticks.
    pub progress_color: Rgba8,
    /// Linear kinds stretch the active stick.
    pub allow_height_animation: bool,
    /// Screen size bounding ring diameters. `None` leaves the upper bound open.
    pub screen: Option<Size>,
}

impl Default for StickStyle {
    fn default() -> Self {
        Self {
            stick_width: 10.0,
            spacing: 6.0,
            duration_secs: 1.0,
            filled_color: Rgba8::BLACK,
            unfilled_color: Rgba8::GRAY,
            progress_color: Rgba8::GREEN,
            allow_height_animation: true,
            screen: None,
        }
    }
}

/// Immutable sequencing parameters, derived once per bounding size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequencerConfig {
    pub kind: StickKind,
    pub stick_count: usize,
    pub stick_width: f64,
    /// Height of the linear row, or the drawn height of a ring stick.
    pub stick_height: f64,
    /// `fill_extent` of a stick that has not been activated yet. Released sticks settle at
    /// `stick_height`.
    pub rest_extent: f64,
    /// `fill_extent` of the active stick.
    pub active_extent: f64,
    pub spacing: f64,
    /// Magnitude of the active stick's offset.
    pub swing: f64,
    pub per_step_duration: Duration,
    /// How long the host should take to bring a released stick back to rest.
    pub settle_duration: Duration,
    pub filled_color: Rgba8,
    pub unfilled_color: Rgba8,
    pub progress_color: Rgba8,
    pub allow_height_animation: bool,
    /// Zero for linear kinds.
    pub ring_diameter: f64,
}

impl SequencerConfig {
    pub fn shape(&self) -> Shape {
        self.kind.shape()
    }

    /// Index of the last stick.
    pub fn last_index(&self) -> usize {
        self.stick_count - 1
    }
}

/// Derive the configuration for `kind` inside `bounds`.
///
/// Pure and total: degenerate input (zero, negative, NaN) is raised to the floors above.
#[tracing::instrument(level = "debug", skip(style))]
pub fn compute_config(kind: StickKind, bounds: Size, style: &StickStyle) -> SequencerConfig {
    let total_secs = finite_or(style.duration_secs, 0.0).max(MIN_TOTAL_DURATION_SECS);
    match kind.shape() {
        Shape::Linear => linear_config(kind, bounds, style, total_secs),
        Shape::Ring => ring_config(kind, bounds, style, total_secs),
    }
}

fn linear_config(
    kind: StickKind,
    bounds: Size,
    style: &StickStyle,
    total_secs: f64,
) -> SequencerConfig {
    let width = finite_or(bounds.width, 0.0).max(0.0);
    let height = finite_or(bounds.height, 0.0).max(MIN_STICK_HEIGHT);
    let stick_width = finite_or(style.stick_width, 0.0).max(MIN_LINEAR_STICK_WIDTH);
    let spacing = finite_or(style.spacing, 0.0).clamp(0.0, stick_width);

    let stick_count =
        floor_count(width / (stick_width + spacing)).clamp(MIN_LINEAR_STICKS, MAX_STICK_COUNT);

    let (rest_extent, active_extent) = if style.allow_height_animation {
        (height * LINEAR_REST_EXTENT, height * LINEAR_ACTIVE_EXTENT)
    } else {
        (height, height)
    };

    // Forward and reverse share the budget.
    let per_step_duration = secs_to_duration(total_secs / (stick_count * 2) as f64);

    SequencerConfig {
        kind,
        stick_count,
        stick_width,
        stick_height: height,
        rest_extent,
        active_extent,
        spacing,
        swing: spacing,
        per_step_duration,
        settle_duration: per_step_duration,
        filled_color: style.filled_color,
        unfilled_color: style.unfilled_color,
        progress_color: style.progress_color,
        allow_height_animation: style.allow_height_animation,
        ring_diameter: 0.0,
    }
}

fn ring_config(
    kind: StickKind,
    bounds: Size,
    style: &StickStyle,
    total_secs: f64,
) -> SequencerConfig {
    let side = finite_or(bounds.width.min(bounds.height), 0.0);
    let upper = style
        .screen
        .map(|s| finite_or(s.width.min(s.height), f64::INFINITY) - RING_SCREEN_MARGIN)
        .unwrap_or(f64::INFINITY)
        .max(MIN_RING_DIAMETER);
    let ring_diameter = side.clamp(MIN_RING_DIAMETER, upper);

    let stick_width = finite_or(style.stick_width, 0.0).clamp(
        ring_diameter * RING_STICK_WIDTH_MIN_FRACTION,
        ring_diameter * RING_STICK_WIDTH_MAX_FRACTION,
    );
    let circumference = 2.0 * PI * ring_diameter;
    let stick_count = floor_count(circumference / stick_width * RING_STICKS_PER_CIRCUMFERENCE_WIDTH)
        .clamp(MIN_RING_STICKS, MAX_STICK_COUNT);

    let stick_height = stick_width * 2.0;
    let per_step_duration = secs_to_duration(total_secs / stick_count as f64);
    let settle_duration = if kind.swaps_lap_colors() {
        per_step_duration
            .checked_mul(RING_SETTLE_FACTOR)
            .unwrap_or(Duration::MAX)
    } else {
        per_step_duration
    };

    SequencerConfig {
        kind,
        stick_count,
        stick_width,
        stick_height,
        rest_extent: stick_height,
        active_extent: stick_height,
        spacing: 0.0,
        swing: RING_SWING_SLOTS,
        per_step_duration,
        settle_duration,
        filled_color: style.filled_color,
        unfilled_color: style.unfilled_color,
        progress_color: style.progress_color,
        allow_height_animation: false,
        ring_diameter,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sticks/geometry.rs"]
mod tests;
