//! Handle to a running engine task.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::dwell::EngineSnapshot;
use crate::error::EngineError;
use crate::keypad::{Key, Viewport};

/// Commands accepted by the engine task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// The viewport changed size.
    Resize(Viewport),
    /// Activate a key directly, bypassing dwell.
    ActivateNow(Key),
    /// Stop the task.
    Shutdown,
}

/// Control and observe an engine started with
/// [`spawn_engine`](super::spawn_engine).
///
/// Dropping the handle stops the engine; use [`EngineHandle::shutdown`] to
/// get the handler back.
pub struct EngineHandle<H> {
    commands: mpsc::UnboundedSender<EngineCommand>,
    snapshots: watch::Receiver<EngineSnapshot>,
    task: JoinHandle<H>,
}

impl<H> EngineHandle<H> {
    pub(super) fn new(
        commands: mpsc::UnboundedSender<EngineCommand>,
        snapshots: watch::Receiver<EngineSnapshot>,
        task: JoinHandle<H>,
    ) -> Self {
        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Tell the engine about a new viewport size.
    pub fn resize(&self, viewport: Viewport) -> Result<(), EngineError> {
        self.send(EngineCommand::Resize(viewport))
    }

    /// Activate `key` immediately.
    pub fn activate_now(&self, key: Key) -> Result<(), EngineError> {
        self.send(EngineCommand::ActivateNow(key))
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> EngineSnapshot {
        *self.snapshots.borrow()
    }

    /// Receiver notified on every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the engine and wait for it, returning the handler.
    pub async fn shutdown(self) -> Result<H, EngineError> {
        // The task may already be gone; joining reports that
        let _ = self.commands.send(EngineCommand::Shutdown);
        self.task
            .await
            .map_err(|e| EngineError::TaskFailed(e.to_string()))
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::Stopped)
    }
}
