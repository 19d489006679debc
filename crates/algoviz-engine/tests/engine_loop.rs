//! End-to-end engine loop tests: a real ticker, a real command channel, and
//! the control registry, under tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use algoviz_core::QuestionId;
use algoviz_engine::{ControlRegistry, Engine, Message, PlaybackState, Settings};

/// Poll the registry until the predicate holds, advancing virtual time.
async fn wait_for<F>(controls: &ControlRegistry, what: &str, predicate: F) -> PlaybackState
where
    F: Fn(&PlaybackState) -> bool,
{
    for _ in 0..20_000 {
        if let Some(snapshot) = controls.snapshot() {
            if predicate(&snapshot) {
                return snapshot;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for: {what}");
}

fn fast_engine() -> Arc<Engine> {
    // 4 steps/second keeps the virtual-time polling loops short.
    let settings = Settings {
        default_speed: 4.0,
        ..Settings::default()
    };
    Arc::new(Engine::new(settings))
}

#[tokio::test(start_paused = true)]
async fn test_play_runs_to_the_end_and_pauses() {
    let engine = fast_engine();
    let viz = engine.open(QuestionId(1)).unwrap();
    let last = viz.trace().len() - 1;
    let (tx, rx) = Engine::channel();

    let worker = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run(viz, tx, rx).await })
    };

    let controls = engine.controls();
    wait_for(&controls, "registration", |_| true).await;

    assert!(controls.send(Message::Play));
    wait_for(&controls, "playback to start", |s| s.playing).await;

    // Auto-advance walks to the terminal step and stops there, never
    // overshooting along the way.
    let done = wait_for(&controls, "playback to finish", |s| {
        assert!(s.step_index <= last, "index overshot the terminal step");
        !s.playing && s.step_index == last
    })
    .await;
    assert_eq!(done.step_index, last);

    // Pressing play at the end replays from the start.
    assert!(controls.send(Message::Play));
    wait_for(&controls, "replay from the start", |s| {
        s.playing && s.step_index < last
    })
    .await;

    assert!(controls.send(Message::Close));
    let viz = worker.await.unwrap();
    assert!(viz.is_closed());
    assert!(!controls.is_registered());
}

#[tokio::test(start_paused = true)]
async fn test_input_change_mid_play_silences_the_old_ticker() {
    let engine = fast_engine();
    let viz = engine.open(QuestionId(1)).unwrap();
    let (tx, rx) = Engine::channel();

    let worker = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run(viz, tx, rx).await })
    };

    let controls = engine.controls();
    wait_for(&controls, "registration", |_| true).await;

    assert!(controls.send(Message::Play));
    wait_for(&controls, "a few steps of progress", |s| s.step_index >= 2).await;

    // Replace the input mid-play: the new trace starts paused at step 0.
    assert!(controls.send(Message::SetCustomInput("[1,2,3,4,5,6], 11".to_string())));
    wait_for(&controls, "trace replacement", |s| {
        s.step_index == 0 && !s.playing
    })
    .await;

    // No ghost auto-advance: the old trace's ticker is gone, so nothing
    // moves the new trace however long we wait.
    tokio::time::sleep(Duration::from_secs(30)).await;
    let snapshot = controls.snapshot().unwrap();
    assert_eq!(snapshot.step_index, 0);
    assert!(!snapshot.playing);

    assert!(controls.send(Message::Close));
    worker.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_manual_stepping_and_speed_through_the_toolbar() {
    let engine = fast_engine();
    let viz = engine.open(QuestionId(2)).unwrap();
    let (tx, rx) = Engine::channel();

    let worker = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run(viz, tx, rx).await })
    };

    let controls = engine.controls();
    wait_for(&controls, "registration", |_| true).await;

    assert!(controls.send(Message::StepForward));
    wait_for(&controls, "manual step", |s| s.step_index == 1 && !s.playing).await;

    assert!(controls.send(Message::StepBack));
    wait_for(&controls, "step back", |s| s.step_index == 0).await;

    // Speed changes show up in the snapshot without moving the index.
    assert!(controls.send(Message::SetSpeed(2.0)));
    let snapshot = wait_for(&controls, "speed change", |s| s.speed == 2.0).await;
    assert_eq!(snapshot.step_index, 0);

    // Out-of-range speeds are clamped, not applied.
    assert!(controls.send(Message::SetSpeed(1000.0)));
    let snapshot = wait_for(&controls, "clamped speed", |s| s.speed > 2.0).await;
    assert_eq!(snapshot.speed, engine.settings().max_speed);

    assert!(controls.send(Message::Reset));
    wait_for(&controls, "reset", |s| s.step_index == 0 && !s.playing).await;

    assert!(controls.send(Message::Close));
    worker.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_rejected_input_does_not_disturb_playback() {
    let engine = fast_engine();
    let viz = engine.open(QuestionId(1)).unwrap();
    let (tx, rx) = Engine::channel();

    let worker = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run(viz, tx, rx).await })
    };

    let controls = engine.controls();
    wait_for(&controls, "registration", |_| true).await;

    assert!(controls.send(Message::StepForward));
    assert!(controls.send(Message::StepForward));
    let before = wait_for(&controls, "two manual steps", |s| s.step_index == 2).await;

    assert!(controls.send(Message::SetCustomInput("not an input".to_string())));
    // The rejection leaves the snapshot exactly as it was.
    tokio::time::sleep(Duration::from_secs(5)).await;
    let after = controls.snapshot().unwrap();
    assert_eq!(after, before);

    let viz = {
        assert!(controls.send(Message::Close));
        worker.await.unwrap()
    };
    assert!(viz.last_input_error().unwrap().contains("Invalid input"));
}
