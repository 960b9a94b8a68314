//! Deterministic playback of a scene on a manual clock.

use std::time::Duration;

use crate::foundation::error::StickResult;
use crate::foundation::math::secs_to_duration;
use crate::scene::model::{PercentageCue, StickScene};
use crate::schedule::clock::{ManualClock, Scheduler};
use crate::session::sink::{StickFrame, StickSink};
use crate::sticks::percentage::ProgressInput;
use crate::sticks::sequencer::{Phase, Transition};
use crate::sticks::variant::{AnimationKind, StickAnimation};

/// Playback knobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayOptions {
    /// Sleep between events so wall time tracks the clock.
    pub realtime: bool,
}

/// What a run produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlaySummary {
    pub frames: u64,
    pub steps: u64,
    /// Phase at the end of playback, before teardown.
    pub final_phase: Phase,
}

/// Owns a clock, an animation and its percentage input, and replays a scene's script against
/// them.
#[derive(Debug)]
pub struct Player {
    clock: ManualClock,
    animation: StickAnimation,
    input: ProgressInput,
    script: Vec<PercentageCue>,
    end: Duration,
    next_seq: u64,
}

impl Player {
    /// Build a player for a validated scene.
    pub fn new(scene: &StickScene) -> Self {
        let input = ProgressInput::new(scene.percentage);
        let kind = AnimationKind::bind(scene.kind, input.clone());
        let animation = StickAnimation::new(kind, scene.bounds, &scene.style);
        Self {
            clock: ManualClock::new(),
            animation,
            input,
            script: scene.script.clone(),
            end: secs_to_duration(scene.duration_secs),
            next_seq: 0,
        }
    }

    pub fn animation(&self) -> &StickAnimation {
        &self.animation
    }

    /// Play from time zero to the scene's end, pushing a frame after every transition.
    ///
    /// Cues and timers due at the same instant apply the cue first. The animation is torn down
    /// when the run ends.
    #[tracing::instrument(skip(self, sink), fields(kind = ?self.animation.config().kind))]
    pub fn run(
        &mut self,
        sink: &mut dyn StickSink,
        opts: PlayOptions,
    ) -> StickResult<PlaySummary> {
        sink.begin(self.animation.config())?;

        let started = self.animation.start(&mut self.clock);
        self.emit(sink, &started)?;

        let mut cues = std::mem::take(&mut self.script).into_iter().peekable();
        let mut last = Duration::ZERO;
        loop {
            let cue_at = cues.peek().map(|c| secs_to_duration(c.at_secs));
            let timer_at = self.clock.next_due();
            let next = match (cue_at, timer_at) {
                (Some(c), Some(t)) => c.min(t),
                (Some(c), None) => c,
                (None, Some(t)) => t,
                (None, None) => break,
            };
            if next > self.end {
                break;
            }
            if opts.realtime {
                std::thread::sleep(next.saturating_sub(last));
            }
            last = next;

            let transitions = match cues.next_if(|c| secs_to_duration(c.at_secs) <= next) {
                Some(cue) => {
                    self.clock.set_now(next);
                    self.input.set(cue.value);
                    tracing::debug!(at = ?next, value = cue.value, "percentage cue");
                    self.animation.on_percentage_changed(cue.value, &mut self.clock)
                }
                None => match self.clock.pop_due(next) {
                    Some(id) => self.animation.on_timer(id, &mut self.clock),
                    None => break,
                },
            };
            self.emit(sink, &transitions)?;
        }

        let summary = PlaySummary {
            frames: self.next_seq,
            steps: self.animation.sequencer().steps(),
            final_phase: self.animation.phase(),
        };
        self.clock.set_now(self.end);
        self.animation.teardown(&mut self.clock);
        sink.end()?;
        tracing::debug!(?summary, "playback finished");
        Ok(summary)
    }

    fn emit(&mut self, sink: &mut dyn StickSink, transitions: &[Transition]) -> StickResult<()> {
        let seq = self.animation.sequencer();
        for t in transitions {
            let frame = StickFrame {
                seq: self.next_seq,
                at: self.clock.now(),
                event: t.event,
                duration: t.duration,
                current_index: seq.current_index(),
                direction: seq.direction(),
                phase: seq.phase(),
                sticks: seq.sticks().to_vec(),
            };
            sink.push_frame(&frame)?;
            self.next_seq += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;
