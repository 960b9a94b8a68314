use crate::foundation::core::Size;
use crate::schedule::clock::{Scheduler, TimerId};
use crate::sticks::geometry::{SequencerConfig, StickStyle, compute_config};
use crate::sticks::kind::StickKind;
use crate::sticks::percentage::ProgressInput;
use crate::sticks::sequencer::{Phase, Sequencer, Transition};
use crate::sticks::stick::Stick;

/// A requested animation and the percentage it is bound to, if any.
#[derive(Clone, Debug)]
pub enum AnimationKind {
    LinearLoading,
    LinearProgress { percentage: ProgressInput },
    CircularLoading,
    CircularProgress { percentage: ProgressInput },
    CircularReversibleProgress { percentage: ProgressInput },
}

impl AnimationKind {
    /// Bind `kind` to `percentage`; loading kinds drop it.
    pub fn bind(kind: StickKind, percentage: ProgressInput) -> Self {
        match kind {
            StickKind::LinearLoading => Self::LinearLoading,
            StickKind::LinearProgress => Self::LinearProgress { percentage },
            StickKind::CircularLoading => Self::CircularLoading,
            StickKind::CircularProgress => Self::CircularProgress { percentage },
            StickKind::CircularReversibleProgress => {
                Self::CircularReversibleProgress { percentage }
            }
        }
    }

    pub fn kind(&self) -> StickKind {
        match self {
            Self::LinearLoading => StickKind::LinearLoading,
            Self::LinearProgress { .. } => StickKind::LinearProgress,
            Self::CircularLoading => StickKind::CircularLoading,
            Self::CircularProgress { .. } => StickKind::CircularProgress,
            Self::CircularReversibleProgress { .. } => StickKind::CircularReversibleProgress,
        }
    }

    pub fn percentage(&self) -> Option<&ProgressInput> {
        match self {
            Self::LinearLoading | Self::CircularLoading => None,
            Self::LinearProgress { percentage }
            | Self::CircularProgress { percentage }
            | Self::CircularReversibleProgress { percentage } => Some(percentage),
        }
    }
}

/// A sized, ready-to-start stick animation.
///
/// Hosts call [`StickAnimation::start`] on first display, [`StickAnimation::on_percentage_changed`]
/// after updating a bound percentage, deliver fired timers with [`StickAnimation::on_timer`], and
/// call [`StickAnimation::teardown`] on removal.
#[derive(Debug)]
pub struct StickAnimation {
    sequencer: Sequencer,
}

impl StickAnimation {
    pub fn new(kind: AnimationKind, bounds: Size, style: &StickStyle) -> Self {
        let config = compute_config(kind.kind(), bounds, style);
        let sequencer = Sequencer::new(config, kind.percentage().cloned());
        Self { sequencer }
    }

    pub fn start(&mut self, sched: &mut dyn Scheduler) -> Vec<Transition> {
        self.sequencer.start(sched)
    }

    /// No-op for loading kinds.
    pub fn on_percentage_changed(
        &mut self,
        value: f64,
        sched: &mut dyn Scheduler,
    ) -> Vec<Transition> {
        self.sequencer.on_percentage_changed(value, sched)
    }

    pub fn on_timer(&mut self, id: TimerId, sched: &mut dyn Scheduler) -> Vec<Transition> {
        self.sequencer.on_timer(id, sched)
    }

    pub fn teardown(&mut self, sched: &mut dyn Scheduler) {
        self.sequencer.teardown(sched);
    }

    pub fn config(&self) -> &SequencerConfig {
        self.sequencer.config()
    }

    pub fn sticks(&self) -> &[Stick] {
        self.sequencer.sticks()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sticks/variant.rs"]
mod tests;
