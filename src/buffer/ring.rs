// src/buffer/ring.rs

//! Byte-granular overwrite-oldest ring buffer.
//!
//! The ring is plain data: it performs no locking of its own. The
//! monitor context serialises every access (producer appends and
//! consumer drains) under a single spinlock, so the operations here can
//! stay branch-light and obviously correct.
//!
//! Records may straddle the overwrite point; a record whose head was
//! overwritten is recovered by the consumer scanning for the next
//! leading NUL sentinel (see [`crate::record`]).

use alloc::vec::Vec;

use crate::errors::AttachError;

/// Bounded byte FIFO with overwrite-oldest discipline.
///
/// Invariants: `head < capacity`, `tail < capacity`, `size <=
/// capacity`; while the ring is not full, `tail == (head + size) %
/// capacity`; once full, every appended byte advances both indices.
pub struct RingBuffer {
    data: Vec<u8>,
    head: usize,
    tail: usize,
    size: usize,
}

impl RingBuffer {
    /// Allocate a ring with the given capacity.
    ///
    /// The backing storage is reserved fallibly so an attach on a
    /// memory-starved host unwinds instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::NoMemory`] if the reservation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, AttachError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| AttachError::NoMemory)?;
        data.resize(capacity, 0);

        Ok(Self {
            data,
            head: 0,
            tail: 0,
            size: 0,
        })
    }

    /// Append `bytes`, overwriting the oldest bytes once full.
    ///
    /// Never fails and never blocks; loss is silent by design, the
    /// record framing lets the consumer resynchronise.
    pub fn append(&mut self, bytes: &[u8]) {
        let capacity = self.data.len();
        if capacity == 0 {
            return;
        }

        for &byte in bytes {
            self.data[self.tail] = byte;
            self.tail = (self.tail + 1) % capacity;
            if self.size < capacity {
                self.size += 1;
            } else {
                self.head = (self.head + 1) % capacity;
            }
        }
    }

    /// Copy the buffered bytes in logical order into `out` and append a
    /// terminating NUL. Returns the number of payload bytes copied.
    ///
    /// The drain is non-destructive: head, tail and size are left
    /// untouched. The one-shot behaviour of the channel read comes from
    /// its position contract, not from consuming the ring. `out` must
    /// hold `len() + 1` bytes; a smaller scratch yields a clipped
    /// snapshot.
    pub fn drain(&self, out: &mut [u8]) -> usize {
        if out.is_empty() {
            return 0;
        }

        let capacity = self.data.len();
        let count = self.size.min(out.len() - 1);

        let mut idx = self.head;
        for slot in out.iter_mut().take(count) {
            *slot = self.data[idx];
            idx = (idx + 1) % capacity;
        }
        out[count] = 0;

        count
    }

    /// Reset the ring to empty. The backing storage is retained.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.size = 0;
    }

    /// Number of buffered bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// True when no bytes are buffered.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}
