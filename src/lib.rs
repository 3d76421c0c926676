// src/lib.rs

//! fs_monitor - kernel-resident file modification observer
//!
//! Captures write, unlink, rename and cross-file copy operations on
//! disk-backed regular files and publishes compact records through a
//! character device. The crate is the capture core: probe handlers,
//! record encoding, the shared ring buffer and the read/poll channel.
//! Probe registration, device registration and module glue live in the
//! host kernel and talk to the core through [`monitor::MonitorContext`],
//! [`tracer::ProbeEnv`] and [`channel::UserWriter`].
//!
//! A record is NUL-delimited UTF-8 fields between a NUL sentinel and a
//! newline; consumers resynchronise on the sentinel after overwrite
//! loss. See [`record`] for the framing and [`constants`] for the
//! capacities and tags.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod arch;
pub mod buffer;
pub mod channel;
pub mod constants;
pub mod errors;
pub mod monitor;
pub mod record;
pub mod sync;
pub mod tracer;
pub mod usercopy;
pub mod vfs;

pub use channel::{EventChannel, SliceWriter, UserWriter};
pub use errors::{AttachError, ChannelError, MonitorError, PathError, UserCopyFault};
pub use monitor::{MonitorContext, ProbeSpec, StatsSnapshot, TracerKind};
pub use tracer::ProbeEnv;
