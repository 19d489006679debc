//! Main update function - handles playback transitions (TEA pattern)

use std::time::Duration;

use algoviz_core::prelude::*;

use crate::message::Message;
use crate::visualization::Visualization;

/// Actions the engine loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Cancel any armed ticker and arm a fresh one.
    ///
    /// `generation` tags the ticks the new ticker will send; it is already
    /// recorded in the visualization, so any tick still in flight from an
    /// older ticker is stale on arrival.
    ArmTicker {
        generation: u64,
        interval: Duration,
    },

    /// Cancel any armed ticker
    StopTicker,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the engine loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(viz: &mut Visualization, message: Message) -> UpdateResult {
    match message {
        Message::Play => {
            viz.playback.play();
            arm(viz)
        }

        Message::Pause => {
            viz.playback.pause();
            stop(viz)
        }

        Message::TogglePlay => {
            if viz.playback().is_playing() {
                UpdateResult::message(Message::Pause)
            } else {
                UpdateResult::message(Message::Play)
            }
        }

        Message::StepForward => {
            viz.playback.next();
            stop(viz)
        }

        Message::StepBack => {
            viz.playback.previous();
            stop(viz)
        }

        Message::Reset => {
            viz.playback.reset();
            stop(viz)
        }

        Message::SetSpeed(speed) => {
            let clamped = viz.settings().clamp_speed(speed);
            viz.playback.set_speed(clamped);
            if viz.playback().is_playing() {
                // Re-arm under the new interval; the index is untouched and
                // no immediate re-tick is forced.
                arm(viz)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick { generation } => {
            if generation != viz.ticker_generation() {
                debug!(
                    "discarding stale tick (generation {generation}, current {})",
                    viz.ticker_generation()
                );
                return UpdateResult::none();
            }
            viz.playback.tick();
            if viz.playback().is_playing() {
                UpdateResult::none()
            } else {
                // Reached the terminal step: auto-advance is over.
                stop(viz)
            }
        }

        Message::SetCustomInput(raw) => {
            match viz.set_custom_input(&raw) {
                Ok(()) => {
                    // The new trace starts paused at step 0; a ticker armed
                    // for the old trace must not fire against it.
                    stop(viz)
                }
                Err(err) if err.is_user_error() => {
                    viz.record_input_error(err.to_string());
                    UpdateResult::none()
                }
                Err(err) => {
                    error!("custom input failed non-recoverably: {err}");
                    viz.record_input_error(err.to_string());
                    UpdateResult::none()
                }
            }
        }

        Message::SelectLanguage(language) => {
            viz.set_language(language);
            UpdateResult::none()
        }

        Message::Close => {
            viz.close();
            stop(viz)
        }
    }
}

/// Arm (or re-arm) the ticker for the current playback speed.
fn arm(viz: &mut Visualization) -> UpdateResult {
    let generation = viz.next_generation();
    let interval = viz.playback().tick_interval(viz.settings().min_tick_ms);
    UpdateResult::action(UpdateAction::ArmTicker {
        generation,
        interval,
    })
}

/// Stop the ticker. Bumping the generation first makes any tick already in
/// the channel stale, so stopping is race-free even though the ticker task
/// shuts down asynchronously.
fn stop(viz: &mut Visualization) -> UpdateResult {
    viz.next_generation();
    UpdateResult::action(UpdateAction::StopTicker)
}
