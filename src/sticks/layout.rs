//! Where the host should draw each stick.

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::sticks::geometry::SequencerConfig;
use crate::sticks::kind::Shape;
use crate::sticks::stick::Stick;
use std::f64::consts::TAU;

/// A stick rectangle and the transform that puts it in place.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickPlacement {
    /// Rectangle in the stick's local space.
    pub rect: Rect,
    /// Local space to component space.
    pub transform: Affine,
}

/// Place stick `index` for the config's shape.
pub fn place(config: &SequencerConfig, index: usize, stick: &Stick) -> StickPlacement {
    match config.shape() {
        Shape::Linear => StickPlacement {
            rect: linear_stick_rect(config, index, stick),
            transform: Affine::IDENTITY,
        },
        Shape::Ring => StickPlacement {
            rect: Rect::from_center_size(
                Point::ORIGIN,
                Size::new(config.stick_width, stick.fill_extent),
            ),
            transform: ring_stick_transform(config, index, stick),
        },
    }
}

/// Width of a linear row.
pub fn linear_row_width(config: &SequencerConfig) -> f64 {
    let n = config.stick_count as f64;
    n * config.stick_width + (n - 1.0).max(0.0) * config.spacing
}

/// Linear stick rectangle, vertically centred in the row and shifted by its offset.
pub fn linear_stick_rect(config: &SequencerConfig, index: usize, stick: &Stick) -> Rect {
    let x0 = index as f64 * (config.stick_width + config.spacing) + stick.offset;
    let y0 = (config.stick_height - stick.fill_extent) / 2.0;
    Rect::new(x0, y0, x0 + config.stick_width, y0 + stick.fill_extent)
}

/// Ring stick transform: pushed out to the rim, then rotated by `(index + offset)` slots about
/// the ring centre.
pub fn ring_stick_transform(config: &SequencerConfig, index: usize, stick: &Stick) -> Affine {
    let d = config.ring_diameter;
    let slot = TAU / config.stick_count.max(1) as f64;
    let angle = (index as f64 + stick.offset) * slot;
    Affine::translate(Vec2::new(d / 2.0, d / 2.0))
        * Affine::rotate(angle)
        * Affine::translate(Vec2::new(0.0, (d - stick.fill_extent) / 2.0))
}

#[cfg(test)]
#[path = "../../tests/unit/sticks/layout.rs"]
mod tests;
