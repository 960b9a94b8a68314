//! Stickseq drives "stick" loading and progress indicators: rows or rings of short bars that
//! wave, fill and bounce.
//!
//! The crate owns the sequencing only. A host asks for an animation, feeds it timer callbacks
//! and percentage changes, and draws the resulting [`Stick`] array however it likes:
//!
//! - Describe the animation with an [`AnimationKind`] and a [`StickStyle`]
//! - Build a [`StickAnimation`] for a bounding [`Size`]
//! - Drive it with a [`Scheduler`] (or replay a [`StickScene`] through a [`Player`] into a
//!   [`StickSink`])
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod schedule;
/// Boundary scene model.
pub mod scene;
/// Playback sessions and frame sinks.
pub mod session;
pub(crate) mod sticks;

pub use crate::foundation::core::{Affine, Direction, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{StickError, StickResult};

pub use crate::scene::model::{PercentageCue, StickScene};
pub use crate::schedule::clock::{ManualClock, Scheduler, TimerId};
pub use crate::session::player::{PlayOptions, PlaySummary, Player};
pub use crate::session::sink::{InMemorySink, JsonLinesSink, StickFrame, StickSink};
pub use crate::sticks::geometry::{MAX_STICK_COUNT, SequencerConfig, StickStyle, compute_config};
pub use crate::sticks::kind::{FillMode, Motion, Shape, StickKind};
pub use crate::sticks::layout::{
    StickPlacement, linear_row_width, linear_stick_rect, place, ring_stick_transform,
};
pub use crate::sticks::percentage::{FillCount, ProgressInput, map_percentage_to_fill_count};
pub use crate::sticks::sequencer::{Phase, Sequencer, StepEvent, Transition};
pub use crate::sticks::stick::Stick;
pub use crate::sticks::variant::{AnimationKind, StickAnimation};
