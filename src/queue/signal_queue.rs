//! # SignalQueue: blocking LIFO handoff.
//!
//! [`SignalQueue`] hands values from a producer to one or more consumers
//! without busy-waiting. A send appends under the lock and wakes one blocked
//! receiver; a receive pops the **most recently sent** value.
//!
//! ## Architecture
//! ```text
//! send(v) ──► lock ──► push_back(v) ──► unlock ──► notify_one (condvar + notify)
//!
//! receive() ──► lock ──► empty? ──yes──► condvar.wait (lock released while parked)
//!                          │
//!                          no
//!                          ▼
//!                      pop_back() ──► unlock ──► return newest
//! ```
//!
//! ## Rules
//! - **LIFO**: the newest buffered value is returned first; older values are
//!   delivered only after all newer ones are drained.
//! - **Competing consumers**: each value is delivered to exactly one receiver.
//! - **Unbounded by default**: with a limit, the **oldest** value is discarded
//!   when the queue is full.
//! - `send` never blocks on emptiness and never fails.
//!
//! ## Example
//! ```rust
//! use phasevisor::SignalQueue;
//!
//! let q = SignalQueue::new();
//! q.send(1);
//! q.send(2);
//! assert_eq!(q.receive(), 2);
//! assert_eq!(q.receive(), 1);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

/// Thread-safe LIFO queue with blocking receive and notifying send.
///
/// Blocking receivers park on a [`Condvar`]; async receivers park on a
/// [`Notify`]. Every send wakes one of each, and whoever reaches the lock
/// first takes the value; the other re-checks and parks again.
pub struct SignalQueue<T> {
    items: Mutex<VecDeque<T>>,
    ready: Condvar,
    notify: Notify,
    limit: Option<usize>,
}

impl<T> SignalQueue<T> {
    /// Creates an unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(0)
    }

    /// Creates a queue that keeps at most `limit` values (`0` = unbounded).
    ///
    /// When full, `send` discards the oldest buffered value before appending.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            notify: Notify::new(),
            limit: (limit > 0).then_some(limit),
        }
    }

    /// Appends `value` and wakes one blocked receiver, if any.
    pub fn send(&self, value: T) {
        {
            let mut items = self.lock();
            if let Some(limit) = self.limit {
                while items.len() >= limit {
                    items.pop_front();
                }
            }
            items.push_back(value);
        }
        self.ready.notify_one();
        self.notify.notify_one();
    }

    /// Blocks until a value is available and returns the newest one.
    ///
    /// Blocks indefinitely if nothing is ever sent.
    pub fn receive(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(value) = items.pop_back() {
                return value;
            }
            items = self
                .ready
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`receive`](Self::receive) but gives up after `timeout`.
    ///
    /// Returns `None` if no value arrived in time.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.receive());
        };

        let mut items = self.lock();
        loop {
            if let Some(value) = items.pop_back() {
                return Some(value);
            }
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .filter(|d| !d.is_zero())?;
            items = self
                .ready
                .wait_timeout(items, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Pops the newest value without blocking.
    pub fn try_receive(&self) -> Option<T> {
        self.lock().pop_back()
    }

    /// Async counterpart of [`receive`](Self::receive).
    ///
    /// Suspends the task (not the thread) while the queue is empty.
    pub async fn receive_async(&self) -> T {
        loop {
            // Register interest before checking, so a send in between leaves a permit.
            let notified = self.notify.notified();
            let popped = self.lock().pop_back();
            if let Some(value) = popped {
                return value;
            }
            notified.await;
        }
    }

    /// Number of buffered values.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Configured capacity limit (`None` = unbounded).
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for SignalQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SignalQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalQueue")
            .field("len", &self.len())
            .field("limit", &self.limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use crate::phase::Phase;

    #[test]
    fn test_newest_value_is_received_first() {
        let q = SignalQueue::new();
        for v in 1..=5 {
            q.send(v);
        }
        assert_eq!(q.receive(), 5);
        assert_eq!(q.receive(), 4);
        assert_eq!(q.receive(), 3);
        assert_eq!(q.receive(), 2);
        assert_eq!(q.receive(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn test_red_then_green_yields_green_first() {
        let q = SignalQueue::new();
        q.send(Phase::Red);
        q.send(Phase::Green);
        assert_eq!(q.receive(), Phase::Green);
        assert_eq!(q.receive(), Phase::Red);
    }

    #[test]
    fn test_interleaved_sends_keep_lifo() {
        let q = SignalQueue::new();
        q.send('a');
        q.send('b');
        assert_eq!(q.receive(), 'b');
        q.send('c');
        assert_eq!(q.receive(), 'c');
        assert_eq!(q.receive(), 'a');
    }

    #[test]
    fn test_receive_blocks_until_send() {
        let q = Arc::new(SignalQueue::new());
        let q2 = Arc::clone(&q);

        let started = Instant::now();
        let h = thread::spawn(move || q2.receive());

        thread::sleep(Duration::from_millis(50));
        assert!(!h.is_finished(), "receive returned before any send");
        q.send(42u32);

        assert_eq!(h.join().unwrap(), 42);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_receive_timeout_on_empty_queue() {
        let q: SignalQueue<u8> = SignalQueue::new();
        let started = Instant::now();
        assert_eq!(q.receive_timeout(Duration::from_millis(30)), None);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_receive_timeout_returns_buffered_value() {
        let q = SignalQueue::new();
        q.send(7);
        assert_eq!(q.receive_timeout(Duration::ZERO), Some(7));
        assert_eq!(q.try_receive(), None);
    }

    #[test]
    fn test_limit_discards_oldest() {
        let q = SignalQueue::with_limit(2);
        q.send(1);
        q.send(2);
        q.send(3);
        assert_eq!(q.len(), 2);
        assert_eq!(q.limit(), Some(2));
        assert_eq!(q.receive(), 3);
        assert_eq!(q.receive(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn test_competing_consumers_each_value_delivered_once() {
        const WAITERS: usize = 8;
        let q = Arc::new(SignalQueue::new());

        let handles: Vec<_> = (0..WAITERS)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || q.receive())
            })
            .collect();

        for v in 0..WAITERS {
            q.send(v);
        }

        let mut got: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        got.sort_unstable();
        assert_eq!(got, (0..WAITERS).collect::<Vec<_>>());
        assert!(q.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_receive_async_wakes_on_send() {
        let q = Arc::new(SignalQueue::new());
        let q2 = Arc::clone(&q);

        let h = tokio::spawn(async move { q2.receive_async().await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        q.send(Phase::Green);

        let got = tokio::time::timeout(Duration::from_secs(1), h)
            .await
            .expect("async receiver not woken")
            .unwrap();
        assert_eq!(got, Phase::Green);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sync_and_async_receivers_share_values() {
        let q = Arc::new(SignalQueue::new());

        let qa = Arc::clone(&q);
        let async_rx = tokio::spawn(async move { qa.receive_async().await });
        let qb = Arc::clone(&q);
        let blocking_rx = tokio::task::spawn_blocking(move || qb.receive());

        tokio::time::sleep(Duration::from_millis(20)).await;
        q.send(1);
        q.send(2);

        let a = tokio::time::timeout(Duration::from_secs(1), async_rx)
            .await
            .expect("async receiver stuck")
            .unwrap();
        let b = tokio::time::timeout(Duration::from_secs(1), blocking_rx)
            .await
            .expect("blocking receiver stuck")
            .unwrap();

        let mut got = vec![a, b];
        got.sort_unstable();
        assert_eq!(got, vec![1, 2]);
    }
}
