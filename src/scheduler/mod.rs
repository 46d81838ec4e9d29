//! Continuation scheduling on a service-owned worker pool.
//!
//! The pool itself belongs to the surrounding service and is reached through
//! [`TaskExecutor`]. [`Scheduler`] layers two operations on top of it:
//!
//! - [`Scheduler::submit`] runs a future on the pool and returns a
//!   [`TaskHandle`] for its output.
//! - [`Scheduler::and_then`] registers a continuation on an existing handle
//!   without blocking the caller.
//!
//! A continuation is an `FnOnce` moved into exactly one spawned task, so it
//! runs at most once. It runs only if the upstream task completes; if the
//! upstream is dropped by the pool, the downstream handle resolves to
//! [`TaskCanceled`] and the continuation is never invoked.
//!
//! Handles are shared futures: any number of stages may await or chain off
//! the same handle and each observes a clone of the single output.

mod handle;
mod tokio_executor;

pub use handle::{TaskCanceled, TaskHandle};
pub use tokio_executor::TokioExecutor;

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::oneshot;

/// A worker pool that accepts detached tasks.
pub trait TaskExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// Submission and chaining front-end over a [`TaskExecutor`].
#[derive(Clone)]
pub struct Scheduler {
    executor: Arc<dyn TaskExecutor>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler").finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(executor: Arc<dyn TaskExecutor>) -> Self {
        Self { executor }
    }

    /// Run `task` on the pool.
    pub fn submit<T, Fut>(&self, task: Fut) -> TaskHandle<T>
    where
        T: Clone + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.executor.spawn(Box::pin(async move {
            let _ = tx.send(task.await);
        }));
        TaskHandle::from_receiver(rx)
    }

    /// Register `continuation` to run on the pool once `upstream` completes.
    ///
    /// Returns immediately; the continuation receives the upstream output.
    pub fn and_then<T, U, F, Fut>(&self, upstream: &TaskHandle<T>, continuation: F) -> TaskHandle<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
    {
        let upstream = upstream.clone();
        let (tx, rx) = oneshot::channel();
        self.executor.spawn(Box::pin(async move {
            // Dropping `tx` unanswered cancels the downstream handle.
            if let Ok(value) = upstream.await {
                let _ = tx.send(continuation(value).await);
            }
        }));
        TaskHandle::from_receiver(rx)
    }
}
