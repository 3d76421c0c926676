// src/sync/wait_queue.rs

//! Consumer wait queue.
//!
//! The chardev poll path registers a [`Waker`] here; the probe publish
//! path wakes every registered waiter after releasing the context lock.
//! Registration deduplicates on `will_wake`, so a consumer that polls
//! repeatedly does not grow the list.

use alloc::vec::Vec;
use core::task::Waker;

use spin::Mutex;

/// A set of parked consumer wakers.
pub struct WaitQueue {
    wakers: Mutex<Vec<Waker>>,
}

impl WaitQueue {
    /// Empty queue.
    pub const fn new() -> Self {
        Self {
            wakers: Mutex::new(Vec::new()),
        }
    }

    /// Park `waker` until the next wake.
    pub fn register(&self, waker: &Waker) {
        let mut wakers = self.wakers.lock();
        if wakers.iter().any(|parked| parked.will_wake(waker)) {
            return;
        }
        wakers.push(waker.clone());
    }

    /// Wake and unpark every registered waiter.
    pub fn wake_all(&self) {
        let mut parked = Vec::new();
        core::mem::swap(&mut parked, &mut *self.wakers.lock());
        for waker in parked {
            waker.wake();
        }
    }

    /// Number of parked waiters (diagnostics and tests).
    pub fn waiter_count(&self) -> usize {
        self.wakers.lock().len()
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}
