//! algoviz-engine - Playback state machine and orchestration for Algoviz
//!
//! This crate implements the TEA (The Elm Architecture) pattern for playback
//! state: a pure [`Playback`] state machine, a [`Message`]/[`update`] layer,
//! a cancelable auto-advance [`ticker`], the shared [`ControlRegistry`] the
//! toolbar UI talks through, and the [`Engine`] event loop that ties one
//! [`Visualization`] together.

pub mod engine;
pub mod message;
pub mod playback;
pub mod registry;
pub mod settings;
pub mod ticker;
pub mod update;
pub mod visualization;

// Re-export primary types
pub use engine::{Engine, COMMAND_BUFFER};
pub use message::Message;
pub use playback::{Playback, PlaybackState};
pub use registry::{ControlRegistry, OwnerToken};
pub use settings::Settings;
pub use ticker::{spawn_ticker, TickerHandle};
pub use update::{update, UpdateAction, UpdateResult};
pub use visualization::Visualization;
