//! The shared control slot the toolbar UI talks through.
//!
//! Exactly one visualization's controls are live at a time. The sharp edge
//! is a fast navigation: the next page registers before the previous page's
//! teardown runs, and a naive `unregister()` would wipe the newcomer.
//! Registration therefore hands out an [`OwnerToken`], and `unregister` /
//! `publish` are no-ops unless the token still matches the live owner.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::warn;

use crate::message::Message;
use crate::playback::PlaybackState;

/// Opaque proof of a registration. Only the holder of the current token can
/// publish snapshots or clear the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerToken(u64);

struct Registered {
    token: OwnerToken,
    snapshot: PlaybackState,
    commands: mpsc::Sender<Message>,
}

/// A single mutable slot holding the active visualization's live snapshot
/// and command channel. Shareable as `Arc<ControlRegistry>`.
#[derive(Default)]
pub struct ControlRegistry {
    slot: Mutex<Option<Registered>>,
    next_token: AtomicU64,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a visualization's controls, replacing any previous owner.
    /// Returns the token required to publish or unregister.
    pub fn register(
        &self,
        commands: mpsc::Sender<Message>,
        snapshot: PlaybackState,
    ) -> OwnerToken {
        let token = OwnerToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let Ok(mut slot) = self.slot.lock() else {
            warn!("control registry mutex poisoned; registration dropped");
            return token;
        };
        *slot = Some(Registered {
            token,
            snapshot,
            commands,
        });
        token
    }

    /// Clear the slot, but only if `token` is still the live owner. A stale
    /// unmount arriving after the next page registered is a no-op.
    ///
    /// Returns whether the slot was cleared.
    pub fn unregister(&self, token: OwnerToken) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            return false;
        };
        match slot.as_ref() {
            Some(registered) if registered.token == token => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Update the live snapshot. No-op (returning `false`) unless `token`
    /// is the current owner.
    pub fn publish(&self, token: OwnerToken, snapshot: PlaybackState) -> bool {
        let Ok(mut slot) = self.slot.lock() else {
            return false;
        };
        match slot.as_mut() {
            Some(registered) if registered.token == token => {
                registered.snapshot = snapshot;
                true
            }
            _ => false,
        }
    }

    /// The live owner's latest snapshot, if any visualization is active.
    pub fn snapshot(&self) -> Option<PlaybackState> {
        let Ok(slot) = self.slot.lock() else {
            return None;
        };
        slot.as_ref().map(|registered| registered.snapshot)
    }

    /// Send a command to the live owner. Returns `false` when no owner is
    /// registered or its channel is full/closed; the command is dropped in
    /// that case (a wedged engine loop would not be helped by queueing).
    pub fn send(&self, message: Message) -> bool {
        let Ok(slot) = self.slot.lock() else {
            return false;
        };
        match slot.as_ref() {
            Some(registered) => match registered.commands.try_send(message) {
                Ok(()) => true,
                Err(err) => {
                    warn!("control command dropped: {err}");
                    false
                }
            },
            None => false,
        }
    }

    /// Whether any visualization currently owns the slot.
    pub fn is_registered(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(step_index: usize) -> PlaybackState {
        PlaybackState {
            step_index,
            playing: false,
            speed: 1.0,
            trace_len: 10,
        }
    }

    #[test]
    fn test_register_then_snapshot() {
        let registry = ControlRegistry::new();
        assert!(registry.snapshot().is_none());

        let (tx, _rx) = mpsc::channel(4);
        let token = registry.register(tx, state(0));
        assert!(registry.is_registered());
        assert_eq!(registry.snapshot().unwrap().step_index, 0);

        assert!(registry.publish(token, state(3)));
        assert_eq!(registry.snapshot().unwrap().step_index, 3);
    }

    #[test]
    fn test_stale_unregister_is_a_noop() {
        let registry = ControlRegistry::new();
        let (tx_old, _rx_old) = mpsc::channel(4);
        let old_token = registry.register(tx_old, state(5));

        // Fast navigation: the next page registers before the previous
        // page's teardown runs.
        let (tx_new, _rx_new) = mpsc::channel(4);
        let new_token = registry.register(tx_new, state(0));

        assert!(!registry.unregister(old_token));
        assert!(registry.is_registered());
        assert_eq!(registry.snapshot().unwrap().step_index, 0);

        assert!(registry.unregister(new_token));
        assert!(!registry.is_registered());
    }

    #[test]
    fn test_stale_publish_is_a_noop() {
        let registry = ControlRegistry::new();
        let (tx_old, _rx_old) = mpsc::channel(4);
        let old_token = registry.register(tx_old, state(5));
        let (tx_new, _rx_new) = mpsc::channel(4);
        let _new_token = registry.register(tx_new, state(0));

        assert!(!registry.publish(old_token, state(9)));
        assert_eq!(registry.snapshot().unwrap().step_index, 0);
    }

    #[test]
    fn test_send_reaches_the_live_owner() {
        let registry = ControlRegistry::new();
        let (tx, mut rx) = mpsc::channel(4);
        registry.register(tx, state(0));

        assert!(registry.send(Message::Play));
        assert_eq!(rx.try_recv().unwrap(), Message::Play);
    }

    #[test]
    fn test_send_without_owner_reports_failure() {
        let registry = ControlRegistry::new();
        assert!(!registry.send(Message::Play));
    }

    #[test]
    fn test_send_to_full_channel_drops_the_command() {
        let registry = ControlRegistry::new();
        let (tx, _rx) = mpsc::channel(1);
        registry.register(tx, state(0));

        assert!(registry.send(Message::Play));
        assert!(!registry.send(Message::Pause));
    }
}
