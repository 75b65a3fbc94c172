use std::sync::{Arc, Mutex};
use std::time::Duration;

use services::{ContinuousPlayer, SteppedPlayer};
use tutor_core::model::{ContinuousAnimation, ContinuousFrame, CycleMode, SteppedAnimation, SteppedFrame};

const TICK: Duration = Duration::from_millis(100);
const STEP_DELAY: Duration = Duration::from_millis(1500);

fn continuous_player(
    step_size: f64,
    mode: CycleMode,
) -> (ContinuousPlayer, Arc<Mutex<Vec<ContinuousFrame>>>) {
    let frames: Arc<Mutex<Vec<ContinuousFrame>>> = Arc::default();
    let sink = Arc::clone(&frames);
    let anim = ContinuousAnimation::new(step_size, mode).unwrap();
    let player = ContinuousPlayer::new(
        anim,
        TICK,
        Box::new(move |frame| sink.lock().unwrap().push(*frame)),
    );
    (player, frames)
}

fn stepped_player(labels: &[&str]) -> (SteppedPlayer, Arc<Mutex<Vec<SteppedFrame>>>) {
    let frames: Arc<Mutex<Vec<SteppedFrame>>> = Arc::default();
    let sink = Arc::clone(&frames);
    let anim = SteppedAnimation::from_labels(labels.iter().copied()).unwrap();
    let player = SteppedPlayer::new(
        anim,
        STEP_DELAY,
        Box::new(move |frame| sink.lock().unwrap().push(frame.clone())),
    );
    (player, frames)
}

/// Sleep past `n` tick deadlines, landing between ticks to keep wake-up
/// order deterministic under the paused clock.
async fn let_ticks_pass(n: u32) {
    tokio::time::sleep(TICK * n + TICK / 2).await;
}

async fn let_steps_pass(n: u32) {
    tokio::time::sleep(STEP_DELAY * n + STEP_DELAY / 2).await;
}

// ─── Continuous ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn construction_renders_the_initial_frame() {
    let (_player, frames) = continuous_player(0.1, CycleMode::Clamp);
    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].progress, 0.0);
    assert!(!frames[0].playing);
}

#[tokio::test(start_paused = true)]
async fn playback_advances_one_step_per_tick() {
    let (player, frames) = continuous_player(0.1, CycleMode::Clamp);
    assert!(player.play());

    let_ticks_pass(3).await;

    let progress = player.frame().progress;
    assert!((progress - 0.3).abs() < 1e-9, "got {progress}");
    // initial paint + three tick renders
    assert_eq!(frames.lock().unwrap().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn reentrant_play_does_not_change_the_tick_rate() {
    let (player, _frames) = continuous_player(0.1, CycleMode::Clamp);
    assert!(player.play());
    assert!(!player.play());
    assert!(!player.play());

    let_ticks_pass(3).await;

    let progress = player.frame().progress;
    assert!(
        (progress - 0.3).abs() < 1e-9,
        "stacked tick chains would have tripled the rate, got {progress}"
    );
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_play_resumes_from_paused_progress() {
    let (player, _frames) = continuous_player(0.1, CycleMode::Clamp);
    player.play();
    let_ticks_pass(2).await;
    player.pause();
    assert!(!player.is_playing());
    let paused_at = player.frame().progress;
    assert!((paused_at - 0.2).abs() < 1e-9);

    let_ticks_pass(5).await;
    assert_eq!(player.frame().progress, paused_at, "paused progress is frozen");

    assert!(player.play());
    let_ticks_pass(1).await;
    assert!((player.frame().progress - 0.3).abs() < 1e-9, "resumed, not restarted");
}

#[tokio::test(start_paused = true)]
async fn looping_playback_wraps_and_advances_the_phase() {
    let (player, frames) = continuous_player(0.5, CycleMode::Loop { phases: 4 });
    player.play();

    // ticks 2, 4 and 6 wrap; three crossings of 1.0 so far
    let_ticks_pass(6).await;

    let frame = player.frame();
    assert_eq!(frame.phase, 3);
    assert_eq!(frame.progress, 0.0);
    assert!(player.is_playing(), "looping animations keep playing");

    let wraps = frames
        .lock()
        .unwrap()
        .iter()
        .filter(|f| f.playing && f.progress == 0.0)
        .count();
    assert_eq!(wraps, 3);
}

#[tokio::test(start_paused = true)]
async fn clamped_playback_completes_and_stops_rendering() {
    let (player, frames) = continuous_player(0.5, CycleMode::Clamp);
    player.play();

    let_ticks_pass(6).await;

    assert!(!player.is_playing());
    assert_eq!(player.frame().progress, 1.0);
    // initial paint, the 0.5 frame, the completion frame; then silence
    assert_eq!(frames.lock().unwrap().len(), 3);

    assert!(!player.play(), "completed animations need a reset first");
    player.reset();
    assert_eq!(player.frame().progress, 0.0);
    assert!(player.play());
}

#[tokio::test(start_paused = true)]
async fn reset_while_playing_cancels_the_chain() {
    let (player, frames) = continuous_player(0.1, CycleMode::Clamp);
    player.play();
    let_ticks_pass(1).await;

    player.reset();
    let rendered_after_reset = frames.lock().unwrap().len();

    let_ticks_pass(4).await;
    assert_eq!(player.frame().progress, 0.0);
    assert_eq!(
        frames.lock().unwrap().len(),
        rendered_after_reset,
        "no tick fires after reset"
    );
}

#[tokio::test(start_paused = true)]
async fn scrub_renders_the_overridden_progress() {
    let (player, frames) = continuous_player(0.1, CycleMode::Clamp);
    player.scrub(0.4);

    let last = *frames.lock().unwrap().last().unwrap();
    assert!((last.progress - 0.4).abs() < 1e-9);
    assert!(!last.playing);
}

#[tokio::test(start_paused = true)]
async fn draw_is_idempotent_for_unchanged_state() {
    let (player, frames) = continuous_player(0.1, CycleMode::Clamp);
    player.draw();
    player.draw();

    let frames = frames.lock().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1], frames[2]);
}

// ─── Stepped ───────────────────────────────────────────────────────────────────

const BACKPROP_STEPS: [&str; 5] = [
    "Loss computed at root",
    "Gradient flows to internal nodes",
    "Gradient propagates to children",
    "Leaf gradients computed",
    "Parameters updated",
];

#[tokio::test(start_paused = true)]
async fn full_run_renders_every_step_then_the_complete_sentinel() {
    let (player, frames) = stepped_player(&BACKPROP_STEPS);
    frames.lock().unwrap().clear(); // drop the construction paint
    assert!(player.play());

    let_steps_pass(5).await;

    assert!(!player.is_playing());
    assert!(player.is_complete());
    assert_eq!(player.position(), 5);

    let frames = frames.lock().unwrap();
    let step_indices: Vec<usize> = frames
        .iter()
        .filter_map(|f| match f {
            SteppedFrame::Step { index, .. } => Some(*index),
            SteppedFrame::Complete => None,
        })
        .collect();
    assert_eq!(step_indices, vec![0, 1, 2, 3, 4], "one render per step");
    assert_eq!(frames.last(), Some(&SteppedFrame::Complete));
}

#[tokio::test(start_paused = true)]
async fn no_auto_advance_after_completion() {
    let (player, frames) = stepped_player(&BACKPROP_STEPS);
    player.play();
    let_steps_pass(5).await;
    let rendered = frames.lock().unwrap().len();

    let_steps_pass(3).await;
    assert_eq!(frames.lock().unwrap().len(), rendered);
    assert!(!player.play(), "completed sequences need a reset first");
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_the_pending_advance() {
    let (player, _frames) = stepped_player(&BACKPROP_STEPS);
    player.play();
    let_steps_pass(2).await;
    player.pause();
    assert_eq!(player.position(), 2);

    let_steps_pass(3).await;
    assert_eq!(player.position(), 2, "no advance while paused");

    assert!(player.play());
    let_steps_pass(1).await;
    assert_eq!(player.position(), 3, "resumed from the paused step");
}

#[tokio::test(start_paused = true)]
async fn reentrant_play_does_not_accelerate_stepping() {
    let (player, _frames) = stepped_player(&BACKPROP_STEPS);
    assert!(player.play());
    assert!(!player.play());
    assert!(!player.play());

    let_steps_pass(2).await;
    assert_eq!(player.position(), 2, "one advance per delay, not three");
}

#[tokio::test(start_paused = true)]
async fn manual_step_works_only_while_paused() {
    let (player, frames) = stepped_player(&BACKPROP_STEPS);

    assert!(player.step());
    assert_eq!(player.position(), 1);
    assert!(matches!(
        frames.lock().unwrap().last(),
        Some(SteppedFrame::Step { index: 1, .. })
    ));

    player.play();
    assert!(!player.step(), "no manual stepping during playback");
    player.pause();

    for _ in 0..10 {
        player.step();
    }
    assert!(player.is_complete());
    assert!(!player.step(), "complete sequences no longer step");
}

#[tokio::test(start_paused = true)]
async fn reset_after_completion_returns_to_the_first_step() {
    let (player, frames) = stepped_player(&BACKPROP_STEPS);
    player.play();
    let_steps_pass(5).await;

    player.reset();
    assert_eq!(player.position(), 0);
    assert!(!player.is_playing());
    assert!(matches!(
        frames.lock().unwrap().last(),
        Some(SteppedFrame::Step { index: 0, playing: false, .. })
    ));
}
