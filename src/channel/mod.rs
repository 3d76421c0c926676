// src/channel/mod.rs

//! Consumer-facing read/poll endpoint.
//!
//! The channel has two read modes. A plain read drains a snapshot of
//! the whole backlog exactly once per open-and-seek cycle: the first
//! call copies the ring and advances the position to the drained size,
//! and any read at a non-zero position returns 0. A read that follows a
//! readable poll instead returns exactly the most recent record: the
//! poll consumes the readiness flag and latches the latest slot, the
//! read delivers it and drops back to the drain mode.
//!
//! This lets `cat` on the device dump the backlog while an event-driven
//! consumer (poll + read) receives single fresh events with minimal
//! copying.

use alloc::vec::Vec;
use core::task::Waker;

use crate::constants::ENTRY_SIZE;
use crate::errors::{ChannelError, UserCopyFault};
use crate::monitor::MonitorContext;

/// Destination for copies toward user space, implemented by the chardev
/// glue over its faulting copy primitive.
pub trait UserWriter {
    /// Copy `bytes` to the consumer.
    ///
    /// # Errors
    ///
    /// Returns [`UserCopyFault`] when any destination byte cannot be
    /// written; the channel surfaces that as
    /// [`ChannelError::BadAddress`].
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), UserCopyFault>;
}

/// [`UserWriter`] over a kernel-side slice, used by in-kernel consumers
/// and tests. Overrunning the slice reports a fault, mirroring a
/// too-small user mapping.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceWriter<'a> {
    /// Writer over `buf`, starting at its beginning.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    /// Total bytes written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// The filled prefix of the destination.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.written]
    }
}

impl UserWriter for SliceWriter<'_> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), UserCopyFault> {
        let end = self.written.checked_add(bytes.len()).ok_or(UserCopyFault)?;
        if end > self.buf.len() {
            return Err(UserCopyFault);
        }
        self.buf[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}

/// The read/poll endpoint the chardev glue drives.
pub struct EventChannel<'a> {
    ctx: &'a MonitorContext,
}

impl<'a> EventChannel<'a> {
    pub(crate) fn new(ctx: &'a MonitorContext) -> Self {
        Self { ctx }
    }

    /// Serve one read of up to `count` bytes at position `pos`.
    ///
    /// Returns the number of bytes delivered. See the module docs for
    /// the two modes; in both, a successful read advances `pos` past
    /// the delivered data so the following read (without a seek back to
    /// zero) returns 0.
    ///
    /// # Errors
    ///
    /// [`ChannelError::BadAddress`] when the writer faults (`pos` is
    /// left unchanged) and [`ChannelError::NoMemory`] when the drain
    /// scratch cannot be allocated.
    pub fn read(
        &self,
        out: &mut dyn UserWriter,
        count: usize,
        pos: &mut u64,
    ) -> Result<usize, ChannelError> {
        if *pos > 0 {
            return Ok(0);
        }

        if let Some((snapshot, len)) = self.take_latched(count) {
            out.write_all(&snapshot[..len])
                .map_err(ChannelError::from)?;
            *pos = len as u64;
            return Ok(len);
        }

        // One-shot backlog drain. The scratch covers the whole ring
        // plus its NUL terminator and is allocated outside the lock.
        let capacity = { self.ctx.lock_shared().ring.capacity() };
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(capacity + 1)
            .map_err(|_| ChannelError::NoMemory)?;
        scratch.resize(capacity + 1, 0);

        let size = self.ctx.lock_shared().ring.drain(&mut scratch);

        let delivered = size.min(count);
        out.write_all(&scratch[..delivered])
            .map_err(ChannelError::from)?;
        *pos = size as u64;

        Ok(delivered)
    }

    /// Register the caller for wakeups and report readiness.
    ///
    /// Returns true when at least one event arrived since the previous
    /// readable poll; that consumes the readiness flag and latches the
    /// latest record for the next read.
    pub fn poll(&self, waker: &Waker) -> bool {
        self.ctx.wait_queue().register(waker);

        let mut shared = self.ctx.lock_shared();
        if shared.data_available {
            shared.data_available = false;
            shared.latched = true;
            true
        } else {
            false
        }
    }

    /// Consume the latch, returning a stack copy of the latest record
    /// clipped to `count`.
    fn take_latched(&self, count: usize) -> Option<([u8; ENTRY_SIZE], usize)> {
        let mut shared = self.ctx.lock_shared();
        if !shared.latched {
            return None;
        }
        shared.latched = false;

        let len = shared.latest_len.min(count);
        let mut snapshot = [0u8; ENTRY_SIZE];
        snapshot[..len].copy_from_slice(&shared.latest[..len]);
        Some((snapshot, len))
    }
}
