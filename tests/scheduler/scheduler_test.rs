use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use drilldown::scheduler::{Scheduler, TaskCanceled, TaskExecutor, TaskHandle, TokioExecutor};
use futures::future::BoxFuture;

/// A pool that discards everything it is given.
struct DroppingExecutor;

impl TaskExecutor for DroppingExecutor {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        drop(task);
    }
}

fn tokio_scheduler() -> Scheduler {
    Scheduler::new(Arc::new(TokioExecutor::current().unwrap()))
}

#[tokio::test]
async fn test_submit_resolves_to_output() {
    let scheduler = tokio_scheduler();
    let handle = scheduler.submit(async { 21 * 2 });
    assert_eq!(handle.await, Ok(42));
}

#[tokio::test]
async fn test_and_then_receives_upstream_output() {
    let scheduler = tokio_scheduler();
    let upstream = scheduler.submit(async { "US".to_string() });
    let downstream = scheduler.and_then(&upstream, |country| async move {
        format!("Country = '{}'", country)
    });
    assert_eq!(downstream.await.unwrap(), "Country = 'US'");
}

#[tokio::test]
async fn test_continuation_fires_once_per_registration() {
    let scheduler = tokio_scheduler();
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = TaskHandle::ready(7u64);

    let counter = calls.clone();
    let downstream = scheduler.and_then(&upstream, move |n| async move {
        counter.fetch_add(1, Ordering::SeqCst);
        n + 1
    });

    // Awaiting clones observes the one output; it does not rerun the stage.
    assert_eq!(downstream.clone().await, Ok(8));
    assert_eq!(downstream.clone().await, Ok(8));
    assert_eq!(downstream.peek(), Some(&Ok(8)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stages_can_share_upstream() {
    let scheduler = tokio_scheduler();
    let upstream = scheduler.submit(async { vec![1, 2, 3] });
    let sum = scheduler.and_then(&upstream, |v| async move { v.iter().sum::<i32>() });
    let len = scheduler.and_then(&upstream, |v| async move { v.len() });

    assert_eq!(sum.await, Ok(6));
    assert_eq!(len.await, Ok(3));
}

#[tokio::test]
async fn test_dropped_upstream_cancels_downstream() {
    let dropping = Scheduler::new(Arc::new(DroppingExecutor));
    let upstream = dropping.submit(async { 1 });

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let downstream = tokio_scheduler().and_then(&upstream, move |n| async move {
        counter.fetch_add(1, Ordering::SeqCst);
        n
    });

    assert_eq!(upstream.await, Err(TaskCanceled));
    assert_eq!(downstream.await, Err(TaskCanceled));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_peek_sees_output_once_awaited() {
    let handle = TaskHandle::ready("done");
    assert_eq!(handle.peek(), None);
    assert_eq!(handle.clone().await, Ok("done"));
    assert_eq!(handle.peek(), Some(&Ok("done")));
}
