//! Persistence worker for background container reads and writes.
//!
//! Commands are processed strictly in submission order, so a read issued
//! after a write observes that write. Writes are fire-and-forget: their
//! outcome is only logged here.

use std::sync::Arc;

use save_core::SlotDirectory;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::repository::{self, ContainerKey, ContainerRepository, RepositoryError};

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("persistence worker is not running")]
    WorkerUnavailable,

    #[error("persistence task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Commands that can be sent to the persistence worker
pub enum Command {
    /// Replace the container at `key` with `directory`.
    Write {
        key: ContainerKey,
        directory: SlotDirectory,
    },

    /// Remove the container at `key`.
    Delete { key: ContainerKey },

    /// Read the container at `key`.
    Read {
        key: ContainerKey,
        reply: oneshot::Sender<repository::Result<Option<SlotDirectory>>>,
    },

    /// Reply once every earlier command has been processed.
    Flush { reply: oneshot::Sender<()> },

    /// Shutdown the worker after draining earlier commands
    Shutdown,
}

/// Background worker that performs container I/O
pub struct PersistenceWorker {
    repository: Arc<dyn ContainerRepository>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    writes: u64,
    failures: u64,
}

impl PersistenceWorker {
    pub fn new(
        repository: Arc<dyn ContainerRepository>,
        command_rx: mpsc::UnboundedReceiver<Command>,
    ) -> Self {
        Self {
            repository,
            command_rx,
            writes: 0,
            failures: 0,
        }
    }

    /// Main worker loop
    pub async fn run(mut self) {
        info!("PersistenceWorker started");

        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Write { key, directory } => self.write(key, directory).await,
                Command::Delete { key } => self.delete(key).await,
                Command::Read { key, reply } => {
                    let result = self.read(key).await;
                    let _ = reply.send(result);
                }
                Command::Flush { reply } => {
                    let _ = reply.send(());
                }
                Command::Shutdown => {
                    info!("Shutdown command received");
                    break;
                }
            }
        }

        info!(
            "PersistenceWorker stopped: {} write(s), {} failure(s)",
            self.writes, self.failures
        );
    }

    async fn write(&mut self, key: ContainerKey, directory: SlotDirectory) {
        let repository = Arc::clone(&self.repository);
        let file_name = key.file_name();
        let outcome = tokio::task::spawn_blocking(move || repository.save(&key, &directory))
            .await
            .map_err(|e| PersistenceError::Task(e.to_string()))
            .and_then(|r| r.map_err(PersistenceError::from));

        match outcome {
            Ok(()) => {
                self.writes += 1;
                debug!("Background save of {} completed", file_name);
            }
            Err(e) => {
                self.failures += 1;
                error!("Background save of {} failed: {}", file_name, e);
            }
        }
    }

    async fn delete(&mut self, key: ContainerKey) {
        let repository = Arc::clone(&self.repository);
        let file_name = key.file_name();
        let outcome = tokio::task::spawn_blocking(move || repository.delete(&key))
            .await
            .map_err(|e| PersistenceError::Task(e.to_string()))
            .and_then(|r| r.map_err(PersistenceError::from));

        match outcome {
            Ok(()) => debug!("Background delete of {} completed", file_name),
            Err(e) => {
                self.failures += 1;
                error!("Background delete of {} failed: {}", file_name, e);
            }
        }
    }

    async fn read(&self, key: ContainerKey) -> repository::Result<Option<SlotDirectory>> {
        let repository = Arc::clone(&self.repository);
        tokio::task::spawn_blocking(move || repository.load(&key))
            .await
            .unwrap_or_else(|e| Err(RepositoryError::Io(std::io::Error::other(e.to_string()))))
    }
}

/// Sending side of the persistence worker.
#[derive(Clone)]
pub struct PersistenceHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl PersistenceHandle {
    /// Spawn a worker for `repository` on `runtime`.
    pub fn spawn(
        runtime: &Handle,
        repository: Arc<dyn ContainerRepository>,
    ) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let worker = PersistenceWorker::new(repository, command_rx);
        let join = runtime.spawn(worker.run());
        (Self { command_tx }, join)
    }

    /// Queue a write. Returns once the command is queued, not written.
    pub fn submit_write(&self, key: ContainerKey, directory: SlotDirectory) -> Result<()> {
        self.send(Command::Write { key, directory })
    }

    /// Queue removal of a container.
    pub fn submit_delete(&self, key: ContainerKey) -> Result<()> {
        self.send(Command::Delete { key })
    }

    /// Read through the worker, blocking the calling thread.
    ///
    /// Must not be called from inside an async context.
    pub fn read_blocking(&self, key: ContainerKey) -> Result<Option<SlotDirectory>> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(Command::Read { key, reply })?;
        let result = reply_rx
            .blocking_recv()
            .map_err(|_| PersistenceError::WorkerUnavailable)?;
        Ok(result?)
    }

    /// Wait until every queued command has been processed.
    pub async fn flush(&self) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(Command::Flush { reply })?;
        reply_rx
            .await
            .map_err(|_| PersistenceError::WorkerUnavailable)
    }

    /// Blocking variant of [`PersistenceHandle::flush`].
    pub fn flush_blocking(&self) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.send(Command::Flush { reply })?;
        reply_rx
            .blocking_recv()
            .map_err(|_| PersistenceError::WorkerUnavailable)
    }

    pub fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown);
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| PersistenceError::WorkerUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContainerFormat;
    use crate::repository::InMemoryContainerRepository;
    use save_core::{SlotInfo, ValueStore};

    fn directory(slot: &str) -> SlotDirectory {
        let mut directory = SlotDirectory::new();
        directory.insert(slot, SlotInfo::default(), ValueStore::new());
        directory
    }

    #[tokio::test]
    async fn test_writes_are_applied_in_order() {
        let repo = Arc::new(InMemoryContainerRepository::new());
        let (handle, join) = PersistenceHandle::spawn(&Handle::current(), repo.clone());
        let key = ContainerKey::new("Game", 0, ContainerFormat::Bincode);

        handle.submit_write(key.clone(), directory("A")).unwrap();
        handle.submit_write(key.clone(), directory("B")).unwrap();
        handle.flush().await.unwrap();

        assert_eq!(repo.load(&key).unwrap(), Some(directory("B")));

        handle.shutdown();
        join.await.unwrap();
        assert!(matches!(
            handle.submit_write(key, directory("C")),
            Err(PersistenceError::WorkerUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_worker_running() {
        let repo = Arc::new(InMemoryContainerRepository::new());
        let (handle, _join) = PersistenceHandle::spawn(&Handle::current(), repo.clone());

        let bad = ContainerKey::new("../bad", 0, ContainerFormat::Bincode);
        let good = ContainerKey::new("Game", 0, ContainerFormat::Bincode);
        handle.submit_write(bad, directory("A")).unwrap();
        handle.submit_write(good.clone(), directory("A")).unwrap();
        handle.flush().await.unwrap();

        assert!(repo.exists(&good));
    }

    #[test]
    fn test_blocking_read_from_plain_thread() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let repo = Arc::new(InMemoryContainerRepository::new());
        let key = ContainerKey::new("Game", 0, ContainerFormat::Json);
        repo.save(&key, &directory("A")).unwrap();

        let (handle, _join) = PersistenceHandle::spawn(runtime.handle(), repo);

        assert_eq!(handle.read_blocking(key).unwrap(), Some(directory("A")));
        handle.flush_blocking().unwrap();
    }
}
