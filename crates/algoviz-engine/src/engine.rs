//! The engine event loop.
//!
//! One [`Engine`] holds the catalog, the generator registry, the settings,
//! and the shared control registry. [`Engine::run`] drives one
//! [`Visualization`]: it receives toolbar commands from the page's mpsc
//! channel and ticks from the armed ticker's internal channel, processes
//! them through the TEA [`update`] function, executes the resulting ticker
//! actions, and publishes a fresh snapshot to the control registry after
//! every message.
//!
//! All state lives inside the loop task, so every transition is atomic with
//! respect to every other one; the ticker is the only source of spontaneous
//! messages.

use std::sync::Arc;

use tokio::sync::mpsc;

use algoviz_catalog::{GeneratorRegistry, QuestionCatalog};
use algoviz_core::prelude::*;
use algoviz_core::QuestionId;

use crate::message::Message;
use crate::registry::ControlRegistry;
use crate::settings::Settings;
use crate::ticker::{spawn_ticker, TickerHandle};
use crate::update::{update, UpdateAction};
use crate::visualization::Visualization;

/// Capacity of the engine loop's command channel.
pub const COMMAND_BUFFER: usize = 64;

/// Shared context for opening and running visualizations.
#[derive(Debug)]
pub struct Engine {
    catalog: QuestionCatalog,
    generators: GeneratorRegistry,
    settings: Settings,
    controls: Arc<ControlRegistry>,
}

impl Engine {
    /// Engine over the built-in catalog and generators.
    pub fn new(settings: Settings) -> Self {
        Self::with_parts(
            QuestionCatalog::builtin(),
            GeneratorRegistry::builtin(),
            settings,
        )
    }

    /// Engine over a custom catalog and registry.
    pub fn with_parts(
        catalog: QuestionCatalog,
        generators: GeneratorRegistry,
        settings: Settings,
    ) -> Self {
        Self {
            catalog,
            generators,
            settings,
            controls: Arc::new(ControlRegistry::new()),
        }
    }

    /// The control registry the toolbar UI reads snapshots from and sends
    /// commands through.
    pub fn controls(&self) -> Arc<ControlRegistry> {
        self.controls.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    /// Open a problem visualization over its default input.
    pub fn open(&self, id: QuestionId) -> Result<Visualization> {
        Visualization::open(&self.catalog, &self.generators, self.settings.clone(), id)
    }

    /// The command channel a visualization page wires up before `run`.
    pub fn channel() -> (mpsc::Sender<Message>, mpsc::Receiver<Message>) {
        mpsc::channel(COMMAND_BUFFER)
    }

    /// Drive one visualization until a [`Message::Close`] arrives or every
    /// command sender is gone. Returns the final state.
    ///
    /// `msg_tx` is handed to the control registry (it is the live command
    /// conduit for the toolbar); ticks travel on a separate internal
    /// channel, so when the page and the registry drop their senders the
    /// loop observes the closed channel and tears down even without an
    /// explicit `Close`.
    ///
    /// Teardown cancels the armed ticker (no ghost ticks after unmount) and
    /// clears the registration — via the owner token, so a fast navigation
    /// that already re-registered is left alone.
    pub async fn run(
        &self,
        mut viz: Visualization,
        msg_tx: mpsc::Sender<Message>,
        mut msg_rx: mpsc::Receiver<Message>,
    ) -> Visualization {
        let token = self.controls.register(msg_tx, viz.snapshot());

        // Ticks bypass the command channel so the loop keeps no sender to
        // its own input; a closed command channel then means the page is
        // really gone.
        let (tick_tx, mut tick_rx) = mpsc::channel::<Message>(COMMAND_BUFFER);
        let mut ticker: Option<TickerHandle> = None;

        loop {
            let message = tokio::select! {
                command = msg_rx.recv() => match command {
                    Some(command) => command,
                    None => break,
                },
                tick = tick_rx.recv() => match tick {
                    Some(tick) => tick,
                    // Unreachable while tick_tx lives on this stack frame.
                    None => break,
                },
            };

            process_message(&mut viz, message, &mut ticker, &tick_tx);
            self.controls.publish(token, viz.snapshot());
            if viz.is_closed() {
                break;
            }
        }

        if let Some(handle) = ticker.take() {
            handle.stop();
        }
        self.controls.unregister(token);
        info!("visualization for question {} closed", viz.question().id);
        viz
    }
}

/// Process one message through the TEA update function, executing actions
/// and follow-up messages until the chain is exhausted.
fn process_message(
    viz: &mut Visualization,
    message: Message,
    ticker: &mut Option<TickerHandle>,
    tick_tx: &mpsc::Sender<Message>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = update(viz, m);

        if let Some(action) = result.action {
            match action {
                UpdateAction::ArmTicker {
                    generation,
                    interval,
                } => {
                    if let Some(handle) = ticker.take() {
                        handle.stop();
                    }
                    *ticker = Some(spawn_ticker(generation, interval, tick_tx.clone()));
                }
                UpdateAction::StopTicker => {
                    if let Some(handle) = ticker.take() {
                        handle.stop();
                    }
                }
            }
        }

        msg = result.message;
    }
}
