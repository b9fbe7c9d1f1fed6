//! Background work for the UI thread.
//!
//! Futures run on the shared tokio runtime and hand their output back over a
//! `std::sync::mpsc` channel that the owning screen polls once per frame.
//! Dropping a `Pending` drops the receiver, so a result that arrives after
//! its screen is gone is discarded.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tokio::runtime::Handle;

/// Outcome of polling a background task
#[derive(Debug)]
pub enum TaskPoll<T> {
    /// Still running
    Pending,
    /// Finished with a value
    Ready(T),
    /// The task ended without sending (panicked or the runtime shut down)
    Lost,
}

/// Receiving end of a spawned task.
#[derive(Debug)]
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T> Pending<T> {
    /// Non-blocking check for the task's output.
    pub fn poll(&self) -> TaskPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskPoll::Ready(value),
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => TaskPoll::Lost,
        }
    }
}

/// Cheap handle for spawning work from UI code.
#[derive(Clone, Debug)]
pub struct TaskRunner {
    handle: Handle,
}

impl TaskRunner {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Run an async task (network calls).
    pub fn spawn<F>(&self, future: F) -> Pending<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (tx, rx) = channel();
        self.handle.spawn(async move {
            let _ = tx.send(future.await);
        });
        Pending { rx }
    }

    /// Run CPU-bound work (image decoding) off the async workers.
    pub fn spawn_blocking<F, T>(&self, work: F) -> Pending<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = channel();
        self.handle.spawn_blocking(move || {
            let _ = tx.send(work());
        });
        Pending { rx }
    }
}
