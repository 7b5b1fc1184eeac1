//
//  pantry-cli
//  api/queue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-key serial execution.
//!
//! The backend handles concurrent writes inside one pantry or shopping list
//! badly (overlapping transactions on the same rows fail). [`SerialQueue`]
//! runs tasks that share a key one at a time, in the order they were
//! enqueued, while tasks with different keys run freely.
//!
//! Each key maps to the completion signal of the last task enqueued for it.
//! Enqueueing swaps in the new task's signal synchronously, so order is fixed
//! at the moment [`SerialQueue::enqueue`] is called, not when the returned
//! future is first polled.
//!
//! Keys are never removed. One entry per pantry or list seen during the
//! life of the queue is expected to stay small.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Runs futures one at a time per key, in enqueue order.
///
/// Cloning shares the underlying key map, so clones serialize against each
/// other.
///
/// ```rust
/// use pantry_cli::api::SerialQueue;
///
/// # async fn example() {
/// let queue = SerialQueue::new();
/// let first = queue.enqueue("pantry:7:items", async { 1 });
/// let second = queue.enqueue("pantry:7:items", async { 2 });
/// assert_eq!(tokio::join!(second, first), (2, 1));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SerialQueue {
    tails: Arc<Mutex<HashMap<String, oneshot::Receiver<()>>>>,
}

impl SerialQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a key from a resource name and an optional id, e.g.
    /// `pantry:7:items` for `("pantry", Some(7), "items")`.
    pub fn key(resource: &str, id: Option<u64>, scope: &str) -> String {
        match id {
            Some(id) => format!("{}:{}:{}", resource, id, scope),
            None => format!("{}:{}", resource, scope),
        }
    }

    /// Schedules `task` behind every task already enqueued under `key`.
    ///
    /// The returned future waits for the previous task under the key to
    /// finish, whatever its outcome, then runs `task` and yields its output
    /// unchanged. A task that fails, panics or is dropped still releases the
    /// key for the next one, but never before the task ahead of it is done.
    pub fn enqueue<F, T>(&self, key: impl Into<String>, task: F) -> impl Future<Output = T>
    where
        F: Future<Output = T>,
    {
        let key = key.into();
        let (done, tail) = oneshot::channel::<()>();
        let previous = self.lock().insert(key.clone(), tail);
        let mut turn = Turn {
            previous,
            done: Some(done),
        };

        async move {
            if let Some(previous) = turn.previous.as_mut() {
                tracing::trace!(%key, "Waiting for previous task");
                // An error only means the previous turn was dropped; it is finished either way.
                let _ = previous.await;
            }
            turn.previous = None;
            let output = task.await;
            drop(turn);
            output
        }
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, oneshot::Receiver<()>>> {
        self.tails.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One task's place in a key's line.
///
/// Dropping it signals the next task. If the task never got past waiting,
/// the signal is deferred until the task ahead of it finishes.
struct Turn {
    previous: Option<oneshot::Receiver<()>>,
    done: Option<oneshot::Sender<()>>,
}

impl Drop for Turn {
    fn drop(&mut self) {
        let Some(done) = self.done.take() else {
            return;
        };
        match (self.previous.take(), Handle::try_current()) {
            (Some(previous), Ok(handle)) => {
                handle.spawn(async move {
                    let _ = previous.await;
                    let _ = done.send(());
                });
            }
            // Outside a runtime nothing can wait; release right away.
            _ => {
                let _ = done.send(());
            }
        }
    }
}
