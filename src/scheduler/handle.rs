//! Shared, awaitable task output.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;

/// The task behind a handle was dropped before producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("task was canceled before completion")]
pub struct TaskCanceled;

impl From<oneshot::error::RecvError> for TaskCanceled {
    fn from(_: oneshot::error::RecvError) -> Self {
        TaskCanceled
    }
}

/// Handle to the eventual output of a scheduled task.
///
/// Cloning a handle does not re-run the task; every clone resolves to a
/// clone of the same output.
pub struct TaskHandle<T: Clone> {
    inner: Shared<BoxFuture<'static, Result<T, TaskCanceled>>>,
}

impl<T: Clone> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> TaskHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn from_receiver(rx: oneshot::Receiver<T>) -> Self {
        Self {
            inner: async move { rx.await.map_err(TaskCanceled::from) }
                .boxed()
                .shared(),
        }
    }

    /// A handle that is already complete.
    pub fn ready(value: T) -> Self {
        Self {
            inner: futures::future::ready(Ok(value)).boxed().shared(),
        }
    }

    /// The output, if any clone of this handle has already observed it.
    pub fn peek(&self) -> Option<&Result<T, TaskCanceled>> {
        self.inner.peek()
    }
}

impl<T> Future for TaskHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Result<T, TaskCanceled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl<T: Clone> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").finish_non_exhaustive()
    }
}
