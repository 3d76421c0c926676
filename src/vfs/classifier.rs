// src/vfs/classifier.rs

//! Service filesystem classification.
//!
//! The monitor only records events on disk-backed filesystems. The
//! preferred policy reads the "requires a backing device" type flag:
//! anything without it is a service filesystem. This loses some
//! network filesystems (NFS, non-blk FUSE mounts), which is accepted.
//!
//! Hosts that do not expose the flag build with the
//! `classical-classifier` feature and fall back to a fixed name set.

use super::{DentryView, FsIdentity, NodeKind};
#[cfg(not(feature = "classical-classifier"))]
use super::FsFlags;

/// Filesystem type names treated as service filesystems by the
/// classical policy.
#[cfg(feature = "classical-classifier")]
pub const SERVICE_FS_NAMES: &[&str] = &["proc", "sysfs", "devtmpfs", "tmpfs", "ramfs"];

/// True when `fs` is a non-disk-backed (service) filesystem.
#[cfg(not(feature = "classical-classifier"))]
pub fn is_service_fs(fs: &FsIdentity<'_>) -> bool {
    !fs.flags.contains(FsFlags::REQUIRES_DEV)
}

/// True when `fs` is a non-disk-backed (service) filesystem.
#[cfg(feature = "classical-classifier")]
pub fn is_service_fs(fs: &FsIdentity<'_>) -> bool {
    SERVICE_FS_NAMES.contains(&fs.name)
}

/// True when `dentry` refers to a regular file on a non-service
/// filesystem, the relevance filter every tracer applies.
pub fn is_traceable(dentry: &dyn DentryView) -> bool {
    dentry.kind() == NodeKind::Regular && !is_service_fs(&dentry.fs())
}
