// src/tracer/mod.rs

//! Probe-point handlers.
//!
//! Tracers execute in the probed thread's context on an arbitrary CPU.
//! The contract is strict: never sleep, never block, never allocate on
//! the hot path (all scratch lives on the stack), and absorb every
//! internal failure: a capture that cannot be completed produces no
//! record, and the glue reports success to the probe engine regardless,
//! so the probed call always proceeds unmodified.
//!
//! Raw probe arguments are register values. The glue interprets them as
//! kernel objects through [`ProbeEnv`]; the tracers keep the argument
//! mapping, the relevance decision, the record assembly and the
//! publish.

pub mod copy;
pub mod rename;
pub mod unlink;
pub mod write;

#[cfg(test)]
pub(crate) mod testenv;

use crate::constants::ENTRY_SIZE;
use crate::monitor::MonitorContext;
use crate::record::build_entry;
use crate::usercopy::UserReader;
use crate::vfs::{DentryView, FileView, RenameView};

pub use copy::vfs_copy_probe;
pub use rename::vfs_rename_probe;
pub use unlink::vfs_unlink_probe;
pub use write::vfs_write_probe;
#[cfg(feature = "abi-heuristic")]
pub use write::sys_write_probe;

/// Host-kernel services a probe handler needs, implemented by the probe
/// glue (and by an in-memory fake in tests).
///
/// Every resolution method is total and non-blocking: an address that
/// does not refer to a live object of the expected type yields `None`
/// and the tracer drops the event.
pub trait ProbeEnv: UserReader {
    /// Monotonic event timestamp in nanoseconds.
    fn timestamp_ns(&self) -> u64;

    /// Interpret a register value as an open file.
    fn file_at(&self, addr: u64) -> Option<&dyn FileView>;

    /// Interpret a register value as a directory entry.
    fn dentry_at(&self, addr: u64) -> Option<&dyn DentryView>;

    /// Interpret a register value as the rename-data structure and
    /// resolve both sides.
    fn rename_at(&self, addr: u64) -> Option<RenameView<'_>>;

    /// Dereference a file-offset pointer. `None` for an unreadable
    /// address; callers treat that like a null pointer.
    fn offset_at(&self, addr: u64) -> Option<u64>;

    /// Look up an open file by descriptor number in the probed task's
    /// file table. Only the fd-based probes use this; hosts that build
    /// without them may keep the default.
    fn file_for_fd(&self, fd: u64) -> Option<&dyn FileView> {
        let _ = fd;
        None
    }
}

/// Serialise `fields` and publish the record.
///
/// The first field must be the timestamp: the truncation fallback keeps
/// it so a shortened record stays attributable.
pub(crate) fn publish_record(ctx: &MonitorContext, fields: &[&[u8]]) {
    let mut entry = [0u8; ENTRY_SIZE];
    let built = build_entry(&mut entry, fields);
    ctx.publish(&entry[..built.len], built.truncated);
}
