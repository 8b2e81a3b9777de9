//! Blocking work off the interaction thread, results back on it.
//!
//! [`TaskRunner::run`] hands a blocking closure to the tokio blocking pool.
//! When the closure returns (or panics) exactly one completion is queued for
//! the [`TaskInbox`]; the result mapping runs when the interaction loop pulls
//! that completion, so it executes on the loop's thread and never
//! concurrently with other loop activity.

use std::any::Any;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

/// Failure at the task boundary, before the work produced a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("background task panicked: {0}")]
    Panicked(String),
    #[error("background task was cancelled")]
    Cancelled,
}

type Completion<M> = Box<dyn FnOnce() -> M + Send>;

/// Builds a connected runner/inbox pair.
pub fn channel<M: Send + 'static>() -> io::Result<(TaskRunner<M>, TaskInbox<M>)> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("backup-worker")
        .build()?;
    let (tx, rx) = mpsc::channel();
    Ok((TaskRunner { runtime, tx }, TaskInbox { rx }))
}

/// Worker side: owns the runtime that executes blocking work.
pub struct TaskRunner<M> {
    runtime: Runtime,
    tx: mpsc::Sender<Completion<M>>,
}

impl<M: Send + 'static> TaskRunner<M> {
    /// Runs `work` on a worker thread; `on_result` maps its outcome to a
    /// message on the interaction thread.
    pub fn run<T, W, F>(&self, work: W, on_result: F)
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        F: FnOnce(Result<T, TaskError>) -> M + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = tokio::task::spawn_blocking(work)
                .await
                .map_err(|err| {
                    if err.is_panic() {
                        TaskError::Panicked(panic_message(err.into_panic()))
                    } else {
                        TaskError::Cancelled
                    }
                });
            if let Err(err) = &outcome {
                engine_warn!("{}", err);
            }
            let completion: Completion<M> = Box::new(move || on_result(outcome));
            if tx.send(completion).is_err() {
                engine_debug!("task finished after its inbox was dropped");
            }
        });
    }

    /// Handle for other producers (e.g. an input thread) feeding the same inbox.
    pub fn poster(&self) -> Poster<M> {
        Poster {
            tx: self.tx.clone(),
        }
    }

    /// Stops the runtime, waiting at most `timeout` for running work.
    pub fn shutdown(self, timeout: Duration) {
        self.runtime.shutdown_timeout(timeout);
    }
}

/// Queues ready-made messages into a [`TaskInbox`].
#[derive(Clone)]
pub struct Poster<M> {
    tx: mpsc::Sender<Completion<M>>,
}

impl<M: Send + 'static> Poster<M> {
    /// Returns `false` once the inbox is gone.
    pub fn post(&self, msg: M) -> bool {
        self.tx.send(Box::new(move || msg)).is_ok()
    }
}

/// Interaction side: yields messages in completion order.
pub struct TaskInbox<M> {
    rx: mpsc::Receiver<Completion<M>>,
}

impl<M> TaskInbox<M> {
    /// Blocks until the next message; `None` once every producer is gone.
    pub fn recv(&self) -> Option<M> {
        self.rx.recv().ok().map(|complete| complete())
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<M> {
        match self.rx.recv_timeout(timeout) {
            Ok(complete) => Some(complete()),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_recv(&self) -> Option<M> {
        match self.rx.try_recv() {
            Ok(complete) => Some(complete()),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
