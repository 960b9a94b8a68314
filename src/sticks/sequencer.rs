//! The stick sequencing state machine.
//!
//! One step is: activate the stick at the current index, wait `per_step_duration` on a one-shot
//! timer, release it and advance. The sequencer owns its sticks and the id of its single pending
//! timer; a timer id it does not hold is ignored, so stale timers never touch a reset or torn
//! down sequencer.

use crate::foundation::core::{Direction, Rgba8};
use crate::foundation::math::clamp_percentage;
use crate::schedule::clock::{Scheduler, TimerId};
use crate::sticks::geometry::SequencerConfig;
use crate::sticks::kind::{FillMode, Motion};
use crate::sticks::percentage::{ProgressInput, map_percentage_to_fill_count, map_symmetric_fill};
use crate::sticks::stick::Stick;
use std::time::Duration;

/// Lifecycle of a sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Built, not started.
    Idle,
    /// Stepping.
    Running,
    /// Progress reached 100%: every stick shows the fill colour, nothing is scheduled.
    Held,
    /// Cancelled for good.
    TornDown,
}

/// What a transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum StepEvent {
    /// A stick was swung out and recoloured.
    Activated { index: usize, direction: Direction },
    /// A stick was returned to rest.
    Released { index: usize },
    /// All sticks were painted with the fill colour.
    Held,
}

/// A discrete target state change plus how long the host should take to reach it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub event: StepEvent,
    pub duration: Duration,
}

/// Animates a fixed array of sticks one step at a time.
#[derive(Debug)]
pub struct Sequencer {
    config: SequencerConfig,
    progress: Option<ProgressInput>,
    sticks: Vec<Stick>,
    current_index: usize,
    direction: Direction,
    last_filled_index: usize,
    lap_color: Rgba8,
    phase: Phase,
    pending: Option<TimerId>,
    steps: u64,
}

impl Sequencer {
    /// Build an idle sequencer. Progress kinds read `progress` at every step; without one they
    /// behave as if it were 0%.
    pub fn new(config: SequencerConfig, progress: Option<ProgressInput>) -> Self {
        let sticks = vec![
            Stick::at_rest(config.rest_extent, config.unfilled_color);
            config.stick_count
        ];
        let lap_color = config.filled_color;
        Self {
            config,
            progress,
            sticks,
            current_index: 0,
            direction: Direction::Forward,
            last_filled_index: 0,
            lap_color,
            phase: Phase::Idle,
            pending: None,
            steps: 0,
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// The ordered stick array, ready to draw.
    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Fill boundary bookmarked by the sweep head; the reverse sweep of bouncing progress kinds
    /// stops here.
    pub fn last_filled_index(&self) -> usize {
        self.last_filled_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Id of the armed step timer, if any.
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Completed steps since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Begin sequencing. Only an idle sequencer starts; later calls are no-ops.
    pub fn start(&mut self, sched: &mut dyn Scheduler) -> Vec<Transition> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        tracing::debug!(
            kind = ?self.config.kind,
            sticks = self.config.stick_count,
            "sequencer start"
        );
        self.phase = Phase::Running;
        if self.reached_full() {
            return vec![self.hold(sched)];
        }
        vec![self.activate(sched)]
    }

    /// Deliver a fired timer.
    ///
    /// Releases the active stick, advances, and either activates the next stick or holds when
    /// progress has reached 100%.
    pub fn on_timer(&mut self, id: TimerId, sched: &mut dyn Scheduler) -> Vec<Transition> {
        if self.pending != Some(id) {
            tracing::trace!(id = id.0, "ignoring stale timer");
            return Vec::new();
        }
        self.pending = None;
        if self.phase != Phase::Running {
            return Vec::new();
        }

        let released = self.release();
        self.advance();
        self.steps += 1;

        let next = if self.reached_full() {
            self.hold(sched)
        } else {
            self.activate(sched)
        };
        vec![released, next]
    }

    /// React to the host changing the bound percentage.
    ///
    /// The host updates its [`ProgressInput`] first; the input, not `value`, decides what
    /// happens. Below 100% a running sequencer keeps its pending step and picks the value up at
    /// the next step. Reaching 100% cancels the pending step and holds. Dropping below 100%
    /// while held resumes from index 0.
    pub fn on_percentage_changed(
        &mut self,
        value: f64,
        sched: &mut dyn Scheduler,
    ) -> Vec<Transition> {
        if !self.config.kind.is_progress() {
            return Vec::new();
        }
        let current = self.percentage();
        if clamp_percentage(value) != current {
            tracing::debug!(value, current, "reported percentage differs from bound input");
        }
        match (self.phase, self.reached_full()) {
            (Phase::Running, true) => vec![self.hold(sched)],
            (Phase::Held, false) => {
                tracing::debug!(current, "sequencer resume");
                self.phase = Phase::Running;
                self.current_index = 0;
                self.direction = Direction::Forward;
                vec![self.activate(sched)]
            }
            _ => Vec::new(),
        }
    }

    /// Cancel the pending step. A torn down sequencer never mutates its sticks again.
    pub fn teardown(&mut self, sched: &mut dyn Scheduler) {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
        }
        if self.phase != Phase::TornDown {
            tracing::debug!(steps = self.steps, "sequencer teardown");
        }
        self.phase = Phase::TornDown;
    }

    fn percentage(&self) -> f64 {
        self.progress.as_ref().map_or(0.0, ProgressInput::get)
    }

    fn reached_full(&self) -> bool {
        self.config.kind.is_progress() && self.percentage() >= 100.0
    }

    fn activate(&mut self, sched: &mut dyn Scheduler) -> Transition {
        let index = self.current_index;
        let color = self.step_color(index);
        let stick = &mut self.sticks[index];
        stick.offset = self.direction.sign() * self.config.swing;
        stick.fill_extent = self.config.active_extent;
        stick.color = color;

        match self.config.kind.fill_mode() {
            Some(FillMode::FromStart) => self.fill_from_start(index),
            Some(FillMode::Symmetric) => self.fill_symmetric(index, color),
            None => {}
        }

        self.pending = Some(sched.schedule(self.config.per_step_duration));
        tracing::trace!(index, direction = ?self.direction, "stick activated");
        Transition {
            event: StepEvent::Activated {
                index,
                direction: self.direction,
            },
            duration: self.config.per_step_duration,
        }
    }

    fn release(&mut self) -> Transition {
        let index = self.current_index;
        self.settle(index);
        Transition {
            event: StepEvent::Released { index },
            duration: self.config.settle_duration,
        }
    }

    /// Bring a released stick back in line at full stick height.
    fn settle(&mut self, index: usize) {
        let stick = &mut self.sticks[index];
        stick.offset = 0.0;
        stick.fill_extent = self.config.stick_height;
    }

    fn hold(&mut self, sched: &mut dyn Scheduler) -> Transition {
        if let Some(id) = self.pending.take() {
            sched.cancel(id);
            self.settle(self.current_index);
        }
        let color = self.fill_color();
        for stick in &mut self.sticks {
            stick.color = color;
        }
        self.phase = Phase::Held;
        tracing::debug!(steps = self.steps, "sequencer hold");
        Transition {
            event: StepEvent::Held,
            duration: self.config.per_step_duration,
        }
    }

    /// Colour of percentage-backed sticks. The symmetric ring fill has no separate progress
    /// colour.
    fn fill_color(&self) -> Rgba8 {
        match self.config.kind.fill_mode() {
            Some(FillMode::Symmetric) => self.config.filled_color,
            _ => self.config.progress_color,
        }
    }

    fn step_color(&self, index: usize) -> Rgba8 {
        let cfg = &self.config;
        let last = cfg.last_index();
        match (cfg.kind.motion(), cfg.kind.fill_mode()) {
            (Motion::Wrap, None) => self.lap_color,
            (Motion::Wrap, Some(_)) => cfg.filled_color,
            (Motion::Bounce, None) if index == 0 => cfg.filled_color,
            (Motion::Bounce, Some(_)) if index == last => cfg.unfilled_color,
            (Motion::Bounce, Some(_)) if index == self.last_filled_index => cfg.filled_color,
            (Motion::Bounce, None) if index == last => cfg.unfilled_color,
            (Motion::Bounce, _) => match self.direction {
                Direction::Forward => cfg.filled_color,
                Direction::Reverse => cfg.unfilled_color,
            },
        }
    }

    fn fill_from_start(&mut self, index: usize) {
        let fill = map_percentage_to_fill_count(self.percentage(), self.sticks.len());
        let n = fill.fill_count;
        let cfg = &self.config;
        for (i, stick) in self.sticks.iter_mut().enumerate() {
            if i < n {
                stick.color = cfg.progress_color;
            } else if stick.color == cfg.progress_color {
                // The percentage dropped below this stick.
                stick.color = cfg.unfilled_color;
            }
        }
        if !fill.is_exact_boundary && n < self.sticks.len() {
            self.sticks[n].color = cfg.filled_color;
        }
        if index >= n {
            self.last_filled_index = n.min(cfg.last_index());
        }
    }

    fn fill_symmetric(&mut self, index: usize, color: Rgba8) {
        let count = self.sticks.len();
        let (per_side, rounds_exact) = map_symmetric_fill(self.percentage(), count);
        let fill = self.fill_color();
        let unfilled = self.config.unfilled_color;
        for stick in &mut self.sticks {
            stick.color = unfilled;
        }
        // Wrapping ring positions; offsets stay below `count` so the sums cannot overflow.
        let at = |delta: isize| (index as isize + delta).rem_euclid(count as isize) as usize;
        for k in 0..per_side.min(count) as isize {
            self.sticks[at(k)].color = fill;
            self.sticks[at(-1 - k)].color = fill;
        }
        if !rounds_exact {
            let lead = at(per_side.min(count) as isize);
            self.sticks[lead].color = fill;
        } else if per_side == 0 {
            self.sticks[index].color = color;
        }
    }

    fn advance(&mut self) {
        let cfg = &self.config;
        let last = cfg.last_index();
        let index = self.current_index;

        match cfg.kind.motion() {
            Motion::Wrap => {
                if index >= last {
                    self.current_index = 0;
                    if cfg.kind.swaps_lap_colors() {
                        self.lap_color = if self.lap_color == cfg.filled_color {
                            cfg.unfilled_color
                        } else {
                            cfg.filled_color
                        };
                    }
                } else {
                    self.current_index = index + 1;
                }
            }
            Motion::Bounce if last == 0 => {
                // A single stick animates in place.
                self.current_index = 0;
            }
            Motion::Bounce => {
                // The turn-around point stays below the last stick so a bounce always covers
                // at least two sticks.
                let low = if cfg.kind.is_progress() {
                    self.last_filled_index.min(last - 1)
                } else {
                    0
                };
                match self.direction {
                    Direction::Forward if index >= last => {
                        self.direction = self.direction.flipped();
                        self.current_index = index.saturating_sub(1).max(low).min(last);
                    }
                    Direction::Forward => self.current_index = index + 1,
                    Direction::Reverse if index <= low => {
                        self.direction = self.direction.flipped();
                        self.current_index = (index + 1).min(last);
                    }
                    Direction::Reverse => self.current_index = index - 1,
                }
            }
        }
        debug_assert!(self.current_index < self.sticks.len());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sticks/sequencer.rs"]
mod tests;
