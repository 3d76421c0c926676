// src/vfs/mod.rs

//! View of the host kernel's VFS objects.
//!
//! The monitor never owns filesystem state; probe handlers receive
//! borrowed views of the objects behind the raw probe arguments. The
//! traits here are the contract the probe glue implements on top of the
//! real inode/dentry structures, and the test environment implements
//! over in-memory fixtures.

pub mod classifier;
pub mod device;
pub mod path;

#[cfg(test)]
pub(crate) mod testfs;

use bitflags::bitflags;

bitflags! {
    /// Filesystem type capability flags, mirroring the kernel's
    /// filesystem-type flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FsFlags: u32 {
        /// The filesystem requires a backing block device.
        const REQUIRES_DEV = 1 << 0;
    }
}

/// Kind of the object a directory entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular on-disk file.
    Regular,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Named pipe.
    Fifo,
    /// Character device node.
    CharDevice,
    /// Block device node.
    BlockDevice,
    /// Socket.
    Socket,
    /// Anything the host could not classify.
    Unknown,
}

/// Identity of the filesystem an entry lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsIdentity<'a> {
    /// The registered filesystem type name ("ext4", "proc", ...).
    pub name: &'a str,
    /// The type's capability flags.
    pub flags: FsFlags,
}

/// Identity of the block device backing a filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDeviceId<'a> {
    /// The disk name as registered by the block layer ("sda",
    /// "nvme0n1", ...).
    pub disk: &'a str,
    /// Partition number; 0 for the whole disk.
    pub partno: u32,
}

/// Borrowed view of a directory entry.
pub trait DentryView {
    /// The entry's component name. The root's name is "/".
    fn name(&self) -> &str;

    /// Parent entry, or `None` when there is no known parent. A
    /// detached entry chain (possible for unlink targets on old hosts)
    /// ends at a non-root entry with no parent.
    fn parent(&self) -> Option<&dyn DentryView>;

    /// True when this entry is the resolution root (its own parent in
    /// kernel terms).
    fn is_root(&self) -> bool;

    /// Kind of the referenced object.
    fn kind(&self) -> NodeKind;

    /// Identity of the containing filesystem.
    fn fs(&self) -> FsIdentity<'_>;

    /// Backing block device, when the filesystem has one.
    fn block_device(&self) -> Option<BlockDeviceId<'_>>;
}

/// Borrowed view of an open file.
pub trait FileView {
    /// The file's directory entry.
    fn dentry(&self) -> &dyn DentryView;

    /// Current inode size in bytes.
    fn size(&self) -> u64;

    /// Current file position. Only the fd-based probe consults this;
    /// hosts that do not track it may keep the default.
    fn pos(&self) -> u64 {
        0
    }
}

/// Both sides of a rename, resolved from the call's rename-data
/// structure by the probe glue.
pub struct RenameView<'a> {
    /// Entry being renamed.
    pub source: &'a dyn DentryView,
    /// Entry at the destination name.
    pub target: &'a dyn DentryView,
}
