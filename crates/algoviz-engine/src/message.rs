//! Message types for the playback engine (TEA pattern)

use algoviz_core::Language;

/// All messages the engine loop processes.
///
/// Everything except `Tick` is triggered synchronously by a user action;
/// `Tick` is the one source of spontaneous state change, delivered by the
/// armed ticker task.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Start auto-advance (replays from the start when at the end)
    Play,

    /// Stop auto-advance, keeping the current step
    Pause,

    /// Toolbar play/pause button: resolves to `Play` or `Pause`
    TogglePlay,

    /// Manual step forward; always pauses auto-advance
    StepForward,

    /// Manual step backward; always pauses auto-advance
    StepBack,

    /// Back to step 0, paused
    Reset,

    /// Change playback speed (steps per second); clamped to the configured
    /// range, takes effect from the next tick
    SetSpeed(f64),

    /// One auto-advance tick from the armed ticker.
    ///
    /// `generation` identifies which armed ticker sent it; ticks from a
    /// ticker that has since been replaced are stale and are discarded, so
    /// a timer from a previous trace can never advance the new one.
    Tick { generation: u64 },

    /// Replace the input: regenerate the trace, or reject and change nothing
    SetCustomInput(String),

    /// Switch the language used for code highlighting
    SelectLanguage(Language),

    /// End the engine loop for this visualization
    Close,
}
