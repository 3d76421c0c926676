// src/monitor.rs

//! Monitor lifecycle and shared state.
//!
//! All mutable state the probe handlers and the event channel share
//! (the ring buffer, the latest-event slot, the readiness flag and the
//! latch) lives in one [`MonitorContext`] created at attach and
//! destroyed at detach. Tracers and the channel borrow it; nothing in
//! the crate is module-level mutable state.
//!
//! The glue's attach sequence is: `MonitorContext::attach()`, register
//! the character device, then register every probe from
//! [`MonitorContext::probe_table`], unwinding in reverse on any
//! failure. Teardown de-registers all probes (waiting for in-flight
//! handlers), removes the device node, then calls
//! [`MonitorContext::detach`].

use core::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info};
use spin::{Mutex, MutexGuard};

use crate::arch::RegisterFrame;
use crate::buffer::RingBuffer;
use crate::channel::EventChannel;
use crate::constants::{symbols, BUFFER_SIZE, ENTRY_SIZE};
use crate::errors::AttachError;
use crate::sync::WaitQueue;
use crate::tracer::{self, ProbeEnv};

/// State shared between producers and the consumer, guarded by the
/// single context spinlock.
pub(crate) struct Shared {
    /// Event backlog.
    pub(crate) ring: RingBuffer,
    /// Copy of the most recently published record.
    pub(crate) latest: [u8; ENTRY_SIZE],
    /// Length of the record in `latest`.
    pub(crate) latest_len: usize,
    /// At least one event arrived since the last poll latch.
    pub(crate) data_available: bool,
    /// A poll consumed the readiness flag; the next read returns the
    /// latest slot.
    pub(crate) latched: bool,
}

/// Owner of every shared monitor resource.
pub struct MonitorContext {
    shared: Mutex<Shared>,
    wait_queue: WaitQueue,
    stats: MonitorStats,
}

impl MonitorContext {
    /// Allocate the monitor state.
    ///
    /// The only fallible step is the ring allocation; on failure
    /// nothing is left behind.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::NoMemory`] when the ring backing storage
    /// cannot be allocated.
    pub fn attach() -> Result<Self, AttachError> {
        let ring = RingBuffer::with_capacity(BUFFER_SIZE)?;
        info!("fs monitor attached, ring capacity {} bytes", ring.capacity());

        Ok(Self {
            shared: Mutex::new(Shared {
                ring,
                latest: [0; ENTRY_SIZE],
                latest_len: 0,
                data_available: false,
                latched: false,
            }),
            wait_queue: WaitQueue::new(),
            stats: MonitorStats::new(),
        })
    }

    /// Tear the monitor down.
    ///
    /// The caller must have de-registered every probe first (so no
    /// handler can still borrow the context) and closed the device
    /// node. Teardown itself cannot fail.
    pub fn detach(self) {
        {
            let mut shared = self.shared.lock();
            shared.ring.clear();
            shared.latest_len = 0;
            shared.data_available = false;
            shared.latched = false;
        }
        let stats = self.stats.snapshot();
        info!(
            "fs monitor detached ({} published, {} dropped, {} truncated)",
            stats.published, stats.dropped, stats.truncated
        );
    }

    /// The consumer-facing read/poll endpoint over this context.
    pub fn channel(&self) -> EventChannel<'_> {
        EventChannel::new(self)
    }

    /// The probe points the glue registers, with the tracer each one
    /// dispatches to.
    pub const fn probe_table() -> &'static [ProbeSpec] {
        PROBE_TABLE
    }

    /// Run the tracer registered for `tracer` against a captured
    /// register frame. Absorbs every failure; the probed call always
    /// proceeds.
    pub fn dispatch(&self, env: &dyn ProbeEnv, tracer: TracerKind, frame: &RegisterFrame) {
        match tracer {
            TracerKind::Write => tracer::vfs_write_probe(self, env, frame),
            TracerKind::Unlink => tracer::vfs_unlink_probe(self, env, frame),
            TracerKind::Rename => tracer::vfs_rename_probe(self, env, frame),
            TracerKind::Copy => tracer::vfs_copy_probe(self, env, frame),
            #[cfg(feature = "abi-heuristic")]
            TracerKind::SysWrite => tracer::sys_write_probe(self, env, frame),
        }
    }

    /// Counter snapshot for diagnostics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Publish one finished record: append to the ring, mirror into the
    /// latest slot and raise the readiness flag in one critical
    /// section, then wake the waiters.
    pub(crate) fn publish(&self, record: &[u8], truncated: bool) {
        if record.is_empty() {
            return;
        }

        {
            let mut shared = self.shared.lock();
            shared.ring.append(record);

            let len = record.len().min(ENTRY_SIZE);
            shared.latest[..len].copy_from_slice(&record[..len]);
            shared.latest_len = len;
            shared.data_available = true;
        }
        self.wait_queue.wake_all();

        self.stats.published.fetch_add(1, Ordering::Relaxed);
        if truncated {
            self.stats.truncated.fetch_add(1, Ordering::Relaxed);
            debug!("oversized record truncated");
        }
    }

    /// Count a capture that could not be completed. The event stream
    /// itself stays silent.
    pub(crate) fn note_dropped(&self, reason: &'static str) {
        self.stats.dropped.fetch_add(1, Ordering::Relaxed);
        debug!("event dropped: {}", reason);
    }

    pub(crate) fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock()
    }

    pub(crate) fn wait_queue(&self) -> &WaitQueue {
        &self.wait_queue
    }
}

/// Tracer selector for [`MonitorContext::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracerKind {
    /// File-based write tracer.
    Write,
    /// Unlink tracer.
    Unlink,
    /// Rename tracer.
    Rename,
    /// Cross-file copy tracer.
    Copy,
    /// fd-based write-syscall tracer.
    #[cfg(feature = "abi-heuristic")]
    SysWrite,
}

/// One probe registration the glue performs.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSpec {
    /// Kernel symbol to probe.
    pub symbol: &'static str,
    /// Tracer to dispatch the pre-handler to.
    pub tracer: TracerKind,
}

#[cfg(not(feature = "abi-heuristic"))]
const PROBE_TABLE: &[ProbeSpec] = &[
    ProbeSpec {
        symbol: symbols::VFS_WRITE,
        tracer: TracerKind::Write,
    },
    ProbeSpec {
        symbol: symbols::VFS_UNLINK,
        tracer: TracerKind::Unlink,
    },
    ProbeSpec {
        symbol: symbols::VFS_RENAME,
        tracer: TracerKind::Rename,
    },
    ProbeSpec {
        symbol: symbols::VFS_COPY,
        tracer: TracerKind::Copy,
    },
];

#[cfg(feature = "abi-heuristic")]
const PROBE_TABLE: &[ProbeSpec] = &[
    ProbeSpec {
        symbol: symbols::VFS_WRITE,
        tracer: TracerKind::Write,
    },
    ProbeSpec {
        symbol: symbols::VFS_UNLINK,
        tracer: TracerKind::Unlink,
    },
    ProbeSpec {
        symbol: symbols::VFS_RENAME,
        tracer: TracerKind::Rename,
    },
    ProbeSpec {
        symbol: symbols::VFS_COPY,
        tracer: TracerKind::Copy,
    },
    ProbeSpec {
        symbol: symbols::SYS_WRITE,
        tracer: TracerKind::SysWrite,
    },
];

/// Event counters, updated outside the context lock.
struct MonitorStats {
    published: AtomicU64,
    dropped: AtomicU64,
    truncated: AtomicU64,
}

impl MonitorStats {
    const fn new() -> Self {
        Self {
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            truncated: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the monitor counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Records appended to the ring.
    pub published: u64,
    /// Captures abandoned before a record was built.
    pub dropped: u64,
    /// Records shortened to the `<truncated>` form.
    pub truncated: u64,
}
