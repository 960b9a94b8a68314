use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Size;
use crate::foundation::error::{StickError, StickResult};
use crate::sticks::geometry::StickStyle;
use crate::sticks::kind::StickKind;

/// A percentage change applied at a point in playback time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PercentageCue {
    pub at_secs: f64,
    pub value: f64,
}

/// A self-contained playback document: one animation, its size and style, and a percentage
/// script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StickScene {
    pub kind: StickKind,
    pub bounds: Size,
    #[serde(default)]
    pub style: StickStyle,
    /// Playback length in seconds.
    pub duration_secs: f64,
    /// Percentage bound before start. Ignored by loading kinds.
    #[serde(default)]
    pub percentage: f64,
    /// Time-ordered percentage changes.
    #[serde(default)]
    pub script: Vec<PercentageCue>,
}

impl StickScene {
    /// Parse a scene from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> StickResult<Self> {
        serde_json::from_reader(r).map_err(|e| StickError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StickResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| StickError::io(format!("open scene JSON '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject documents that cannot describe a finite playback.
    ///
    /// Style values are not checked here; the geometry sizer clamps them.
    pub fn validate(&self) -> StickResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(StickError::validation("duration_secs must be finite and > 0"));
        }
        if !(self.bounds.width.is_finite() && self.bounds.height.is_finite()) {
            return Err(StickError::validation("bounds must be finite"));
        }
        if !self.percentage.is_finite() {
            return Err(StickError::validation("percentage must be finite"));
        }

        let mut prev = 0.0;
        for (i, cue) in self.script.iter().enumerate() {
            if !(cue.at_secs.is_finite() && cue.at_secs >= 0.0) {
                return Err(StickError::validation(format!(
                    "script[{i}] at_secs must be finite and >= 0"
                )));
            }
            if cue.at_secs < prev {
                return Err(StickError::validation(format!(
                    "script[{i}] is out of order ({} < {prev})",
                    cue.at_secs
                )));
            }
            if !cue.value.is_finite() {
                return Err(StickError::validation(format!(
                    "script[{i}] value must be finite"
                )));
            }
            prev = cue.at_secs;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
