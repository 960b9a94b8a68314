use std::io::Write;
use std::time::Duration;

use crate::foundation::core::Direction;
use crate::foundation::error::{StickError, StickResult};
use crate::sticks::geometry::SequencerConfig;
use crate::sticks::sequencer::{Phase, StepEvent};
use crate::sticks::stick::Stick;

/// Snapshot of the sticks right after one transition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickFrame {
    /// 0-based position in the stream.
    pub seq: u64,
    /// Clock time of the transition.
    pub at: Duration,
    pub event: StepEvent,
    /// How long the host should take to reach this state.
    pub duration: Duration,
    pub current_index: usize,
    pub direction: Direction,
    pub phase: Phase,
    pub sticks: Vec<Stick>,
}

/// Sink contract for consuming frames in playback order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `seq` and non-decreasing
/// `at`, between one `begin` and one `end`.
pub trait StickSink {
    fn begin(&mut self, cfg: &SequencerConfig) -> StickResult<()>;
    fn push_frame(&mut self, frame: &StickFrame) -> StickResult<()>;
    fn end(&mut self) -> StickResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SequencerConfig>,
    /// Frames in playback order.
    pub frames: Vec<StickFrame>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SequencerConfig> {
        self.cfg.as_ref()
    }
}

impl StickSink for InMemorySink {
    fn begin(&mut self, cfg: &SequencerConfig) -> StickResult<()> {
        self.cfg = Some(cfg.clone());
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &StickFrame) -> StickResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> StickResult<()> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct Header<'a> {
    config: &'a SequencerConfig,
}

/// Writes one JSON object per line: a `{"config": ..}` header, then one line per frame.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    lines: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Lines written so far, header included.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> StickResult<()> {
        serde_json::to_writer(&mut self.out, value)
            .map_err(|e| StickError::serde(format!("encode frame line: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| StickError::io(format!("write frame line: {e}")))?;
        self.lines += 1;
        Ok(())
    }
}

impl<W: Write> StickSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: &SequencerConfig) -> StickResult<()> {
        self.write_line(&Header { config: cfg })
    }

    fn push_frame(&mut self, frame: &StickFrame) -> StickResult<()> {
        self.write_line(frame)
    }

    fn end(&mut self) -> StickResult<()> {
        self.out
            .flush()
            .map_err(|e| StickError::io(format!("flush frames: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sink.rs"]
mod tests;
