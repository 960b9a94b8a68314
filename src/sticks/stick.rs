use crate::foundation::core::Rgba8;

/// One dash of a loader.
///
/// `offset` is in points for linear kinds and in fractions of one angular slot for ring kinds.
/// `fill_extent` is the drawn height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stick {
    /// Displacement along the sweep axis; zero at rest.
    pub offset: f64,
    /// Drawn height.
    pub fill_extent: f64,
    /// Fill colour.
    pub color: Rgba8,
}

impl Stick {
    /// A resting stick.
    pub fn at_rest(fill_extent: f64, color: Rgba8) -> Self {
        Self {
            offset: 0.0,
            fill_extent,
            color,
        }
    }
}
