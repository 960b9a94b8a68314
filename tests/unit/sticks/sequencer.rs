use super::*;
use crate::foundation::core::{Direction, Rgba8, Size};
use crate::schedule::clock::{ManualClock, Scheduler, TimerId};
use crate::sticks::geometry::{RING_SWING_SLOTS, StickStyle, compute_config};
use crate::sticks::kind::StickKind;
use crate::sticks::percentage::ProgressInput;
use std::time::Duration;

const FILLED: Rgba8 = Rgba8::BLACK;
const UNFILLED: Rgba8 = Rgba8::GRAY;
const PROGRESS: Rgba8 = Rgba8::GREEN;

fn linear(kind: StickKind, sticks: usize) -> SequencerConfig {
    // Pitch is 10 + 6.
    let cfg = compute_config(
        kind,
        Size::new(16.0 * sticks as f64, 30.0),
        &StickStyle::default(),
    );
    assert_eq!(cfg.stick_count, sticks);
    cfg
}

fn ring(kind: StickKind) -> SequencerConfig {
    let cfg = compute_config(kind, Size::new(100.0, 100.0), &StickStyle::default());
    assert_eq!(cfg.stick_count, 15);
    cfg
}

fn activated(transitions: &[Transition]) -> Vec<usize> {
    transitions
        .iter()
        .filter_map(|t| match t.event {
            StepEvent::Activated { index, .. } => Some(index),
            _ => None,
        })
        .collect()
}

/// Fire `steps` timers and return the indices activated along the way.
fn drive(seq: &mut Sequencer, clock: &mut ManualClock, steps: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for _ in 0..steps {
        let id = clock.pop_due(Duration::MAX).expect("a step is pending");
        out.extend(activated(&seq.on_timer(id, &mut *clock)));
    }
    out
}

fn colors(seq: &Sequencer) -> Vec<Rgba8> {
    seq.sticks().iter().map(|s| s.color).collect()
}

#[test]
fn loading_bounce_repeats_the_adjacent_stick() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    assert_eq!(activated(&seq.start(&mut clock)), vec![0]);

    let path = drive(&mut seq, &mut clock, 12);
    assert_eq!(path, vec![1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3, 4]);
}

#[test]
fn direction_flips_at_last_stick() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    seq.start(&mut clock);
    drive(&mut seq, &mut clock, 4);
    assert_eq!(seq.current_index(), 4);
    assert_eq!(seq.direction(), Direction::Forward);

    drive(&mut seq, &mut clock, 1);
    assert_eq!(seq.current_index(), 3);
    assert_eq!(seq.direction(), Direction::Reverse);
}

#[test]
fn index_stays_in_bounds_for_every_kind() {
    for kind in StickKind::ALL {
        for size in [
            Size::new(0.0, 0.0),
            Size::new(70.0, 30.0),
            Size::new(333.0, 120.0),
        ] {
            let progress = ProgressInput::new(37.0);
            let cfg = compute_config(kind, size, &StickStyle::default());
            let mut clock = ManualClock::new();
            let mut seq = Sequencer::new(cfg, Some(progress.clone()));
            seq.start(&mut clock);
            for step in 0..200 {
                if step == 90 {
                    progress.set(81.0);
                }
                assert!(seq.current_index() < seq.sticks().len());
                drive(&mut seq, &mut clock, 1);
            }
            assert!(seq.current_index() < seq.sticks().len());
            assert_eq!(seq.steps(), 200);
        }
    }
}

#[test]
fn linear_loading_paints_forward_filled_and_reverse_unfilled() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    seq.start(&mut clock);
    assert_eq!(seq.sticks()[0].color, FILLED);
    assert_eq!(seq.sticks()[0].offset, 6.0);
    assert_eq!(seq.sticks()[0].fill_extent, 37.5);

    drive(&mut seq, &mut clock, 4);
    // Released sticks keep their colour and settle at full height.
    assert_eq!(seq.sticks()[0].offset, 0.0);
    assert_eq!(seq.sticks()[0].fill_extent, 30.0);
    assert_eq!(seq.sticks()[4].fill_extent, 37.5);
    // Never activated yet.
    let untouched = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    assert_eq!(untouched.sticks()[4].fill_extent, 24.0);
    assert_eq!(colors(&seq), vec![FILLED, FILLED, FILLED, FILLED, UNFILLED]);

    drive(&mut seq, &mut clock, 3);
    assert_eq!(seq.current_index(), 1);
    assert_eq!(seq.sticks()[1].offset, -6.0);
    assert_eq!(colors(&seq), vec![FILLED, UNFILLED, UNFILLED, UNFILLED, UNFILLED]);
}

#[test]
fn transitions_carry_timing_hints() {
    let mut clock = ManualClock::new();
    let cfg = ring(StickKind::CircularLoading);
    let step = cfg.per_step_duration;
    let settle = cfg.settle_duration;
    let mut seq = Sequencer::new(cfg, None);
    let first = seq.start(&mut clock);
    assert_eq!(
        first,
        vec![Transition {
            event: StepEvent::Activated {
                index: 0,
                direction: Direction::Forward
            },
            duration: step,
        }]
    );

    let id = clock.pop_due(Duration::MAX).unwrap();
    assert_eq!(clock.now(), step);
    let next = seq.on_timer(id, &mut clock);
    assert_eq!(
        next[0],
        Transition {
            event: StepEvent::Released { index: 0 },
            duration: settle,
        }
    );
    assert_eq!(activated(&next), vec![1]);
}

#[test]
fn ring_loading_wraps_and_swaps_lap_colours() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(ring(StickKind::CircularLoading), None);
    seq.start(&mut clock);
    assert_eq!(seq.sticks()[0].offset, RING_SWING_SLOTS);

    let path = drive(&mut seq, &mut clock, 15);
    assert_eq!(path.last(), Some(&0));
    assert_eq!(seq.direction(), Direction::Forward);
    assert!(colors(&seq)[1..].iter().all(|c| *c == FILLED));
    // Second lap paints the unfilled colour.
    assert_eq!(seq.sticks()[0].color, UNFILLED);

    drive(&mut seq, &mut clock, 15);
    assert_eq!(seq.sticks()[0].color, FILLED);
}

#[test]
fn single_stick_animates_in_place() {
    for kind in [StickKind::CircularLoading, StickKind::CircularReversibleProgress] {
        let mut cfg = ring(kind);
        cfg.stick_count = 1;
        let mut clock = ManualClock::new();
        let mut seq = Sequencer::new(cfg, Some(ProgressInput::new(30.0)));
        seq.start(&mut clock);
        let path = drive(&mut seq, &mut clock, 6);
        assert_eq!(path, vec![0; 6]);
        assert_eq!(seq.direction(), Direction::Forward);
        assert_eq!(seq.sticks().len(), 1);
    }
}

#[test]
fn forty_five_percent_of_ten_sticks() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(45.0);
    let mut seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress));
    seq.start(&mut clock);

    let c = colors(&seq);
    assert!(c[0..4].iter().all(|c| *c == PROGRESS), "{c:?}");
    assert_eq!(c[4], FILLED);
    assert!(c[5..].iter().all(|c| *c == UNFILLED), "{c:?}");
}

#[test]
fn exact_boundary_has_no_transient_stick() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(
        linear(StickKind::LinearProgress, 10),
        Some(ProgressInput::new(50.0)),
    );
    seq.start(&mut clock);
    let c = colors(&seq);
    assert!(c[0..5].iter().all(|c| *c == PROGRESS));
    assert!(c[5..].iter().all(|c| *c == UNFILLED));
}

#[test]
fn reverse_sweep_stops_at_fill_bookmark() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(
        linear(StickKind::LinearProgress, 10),
        Some(ProgressInput::new(45.0)),
    );
    seq.start(&mut clock);
    let path = drive(&mut seq, &mut clock, 16);
    assert_eq!(path, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 8, 7, 6, 5, 4, 5, 6]);
    assert_eq!(seq.last_filled_index(), 4);
}

#[test]
fn bookmark_follows_a_dropping_percentage() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(60.0);
    let mut seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress.clone()));
    seq.start(&mut clock);
    drive(&mut seq, &mut clock, 9);
    assert_eq!(seq.last_filled_index(), 6);

    progress.set(20.0);
    seq.on_percentage_changed(20.0, &mut clock);
    drive(&mut seq, &mut clock, 1);
    assert_eq!(seq.last_filled_index(), 2);
    // Sticks above the new fill lose the progress colour.
    assert!(colors(&seq)[2..].iter().all(|c| *c != PROGRESS));

    let path = drive(&mut seq, &mut clock, 8);
    assert_eq!(path, vec![7, 6, 5, 4, 3, 2, 3, 4]);
}

#[test]
fn full_percentage_holds_and_cancels_pending_step() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(30.0);
    let mut seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress.clone()));
    seq.start(&mut clock);
    assert_eq!(clock.pending(), 1);

    progress.set(100.0);
    let t = seq.on_percentage_changed(100.0, &mut clock);
    assert_eq!(t.len(), 1);
    assert_eq!(t[0].event, StepEvent::Held);
    assert_eq!(seq.phase(), Phase::Held);
    assert_eq!(seq.pending(), None);
    assert_eq!(clock.pending(), 0);
    assert!(
        seq.sticks()
            .iter()
            .all(|s| s.color == PROGRESS && s.offset == 0.0)
    );

    // Dropping back resumes from the first stick.
    progress.set(40.0);
    let t = seq.on_percentage_changed(40.0, &mut clock);
    assert_eq!(activated(&t), vec![0]);
    assert_eq!(seq.phase(), Phase::Running);
    assert_eq!(seq.direction(), Direction::Forward);
    assert_eq!(clock.pending(), 1);
    assert_eq!(
        map_percentage_to_fill_count(40.0, 10).fill_count,
        colors(&seq).iter().filter(|c| **c == PROGRESS).count()
    );
}

#[test]
fn full_percentage_at_start_holds_immediately() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(
        ring(StickKind::CircularReversibleProgress),
        Some(ProgressInput::new(100.0)),
    );
    let t = seq.start(&mut clock);
    assert_eq!(t[0].event, StepEvent::Held);
    assert_eq!(clock.pending(), 0);
    assert!(colors(&seq).iter().all(|c| *c == PROGRESS));
}

#[test]
fn live_input_reaching_full_holds_at_next_step() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(10.0);
    let mut seq = Sequencer::new(ring(StickKind::CircularProgress), Some(progress.clone()));
    seq.start(&mut clock);
    progress.set(120.0);
    drive(&mut seq, &mut clock, 1);
    assert_eq!(seq.phase(), Phase::Held);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn percentage_change_is_idempotent() {
    let build = || {
        let progress = ProgressInput::new(20.0);
        let seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress.clone()));
        (seq, progress)
    };

    for value in [35.0, 100.0] {
        let (mut once, p1) = build();
        let (mut twice, p2) = build();
        let mut c1 = ManualClock::new();
        let mut c2 = ManualClock::new();
        once.start(&mut c1);
        twice.start(&mut c2);

        p1.set(value);
        once.on_percentage_changed(value, &mut c1);
        p2.set(value);
        twice.on_percentage_changed(value, &mut c2);
        assert!(twice.on_percentage_changed(value, &mut c2).is_empty());

        assert_eq!(once.sticks(), twice.sticks());
        assert_eq!(once.phase(), twice.phase());
        assert_eq!(c1.pending(), c2.pending());
    }
}

#[test]
fn change_below_full_keeps_pending_step_and_applies_next_step() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(0.0);
    let mut seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress.clone()));
    seq.start(&mut clock);
    let pending = seq.pending();

    progress.set(50.0);
    assert!(seq.on_percentage_changed(50.0, &mut clock).is_empty());
    assert_eq!(seq.pending(), pending);
    assert_eq!(colors(&seq).iter().filter(|c| **c == PROGRESS).count(), 0);

    drive(&mut seq, &mut clock, 1);
    assert_eq!(colors(&seq).iter().filter(|c| **c == PROGRESS).count(), 5);
}

#[test]
fn teardown_cancels_and_freezes_sticks() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    seq.start(&mut clock);
    let stale = seq.pending().unwrap();
    let before = seq.sticks().to_vec();

    clock.set_now(Duration::from_millis(10));
    seq.teardown(&mut clock);
    assert_eq!(seq.phase(), Phase::TornDown);
    assert_eq!(clock.pending(), 0);
    assert_eq!(clock.pop_due(Duration::MAX), None);

    // Even a timer delivered by mistake does nothing.
    assert!(seq.on_timer(stale, &mut clock).is_empty());
    assert!(seq.start(&mut clock).is_empty());
    assert_eq!(seq.sticks(), before.as_slice());
}

#[test]
fn stale_and_foreign_timers_are_ignored() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    seq.start(&mut clock);
    let before = seq.sticks().to_vec();
    assert!(seq.on_timer(TimerId(9_999), &mut clock).is_empty());
    assert_eq!(seq.sticks(), before.as_slice());
    assert_eq!(seq.steps(), 0);
}

#[test]
fn loading_kinds_ignore_percentage_changes() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(linear(StickKind::LinearLoading, 5), None);
    seq.start(&mut clock);
    assert!(seq.on_percentage_changed(100.0, &mut clock).is_empty());
    assert_eq!(seq.phase(), Phase::Running);
}

#[test]
fn symmetric_fill_surrounds_the_active_stick() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(50.0);
    let mut seq = Sequencer::new(ring(StickKind::CircularProgress), Some(progress));
    seq.start(&mut clock);

    // 15 * 50 / 200 = 3.75: three per side plus one leading stick, all in the filled colour.
    let c = colors(&seq);
    for i in [0usize, 1, 2, 3, 14, 13, 12] {
        assert_eq!(c[i], FILLED, "stick {i}");
    }
    assert!(c[4..12].iter().all(|c| *c == UNFILLED));
    assert!(c.iter().all(|c| *c != PROGRESS));

    // The fill travels with the active stick.
    drive(&mut seq, &mut clock, 1);
    let c = colors(&seq);
    assert_eq!(c[0], FILLED);
    assert_eq!(c[4], FILLED);
    assert_eq!(c[12], UNFILLED);
}

#[test]
fn symmetric_fill_holds_in_the_filled_colour() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(50.0);
    let mut seq = Sequencer::new(ring(StickKind::CircularProgress), Some(progress.clone()));
    seq.start(&mut clock);

    progress.set(100.0);
    let t = seq.on_percentage_changed(100.0, &mut clock);
    assert_eq!(t[0].event, StepEvent::Held);
    assert!(colors(&seq).iter().all(|c| *c == FILLED));
}

#[test]
fn near_full_bounce_never_repeats_the_last_stick() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(
        linear(StickKind::LinearProgress, 10),
        Some(ProgressInput::new(95.0)),
    );
    seq.start(&mut clock);
    let path = drive(&mut seq, &mut clock, 14);
    assert_eq!(path, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 8, 9, 8, 9, 8]);
    assert!(path.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn held_sequencer_follows_the_bound_input_not_the_argument() {
    let mut clock = ManualClock::new();
    let progress = ProgressInput::new(100.0);
    let mut seq = Sequencer::new(linear(StickKind::LinearProgress, 10), Some(progress.clone()));
    seq.start(&mut clock);
    assert_eq!(seq.phase(), Phase::Held);

    // The input still reads 100.
    assert!(seq.on_percentage_changed(40.0, &mut clock).is_empty());
    assert_eq!(seq.phase(), Phase::Held);

    progress.set(40.0);
    assert_eq!(activated(&seq.on_percentage_changed(40.0, &mut clock)), vec![0]);
    assert_eq!(seq.phase(), Phase::Running);

    // A running sequencer holds only once the input is full.
    assert!(seq.on_percentage_changed(100.0, &mut clock).is_empty());
    assert_eq!(seq.phase(), Phase::Running);
}

#[test]
fn symmetric_fill_at_zero_marks_only_the_active_stick() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(
        ring(StickKind::CircularProgress),
        Some(ProgressInput::new(0.0)),
    );
    seq.start(&mut clock);
    let c = colors(&seq);
    assert_eq!(c[0], FILLED);
    assert!(c[1..].iter().all(|c| *c == UNFILLED));
}

#[test]
fn steps_are_strictly_sequential() {
    let mut clock = ManualClock::new();
    let mut seq = Sequencer::new(ring(StickKind::CircularReversibleProgress), None);
    seq.start(&mut clock);
    for _ in 0..40 {
        assert_eq!(clock.pending(), 1);
        drive(&mut seq, &mut clock, 1);
    }
}
