// src/vfs/testfs.rs

//! In-memory VFS fixtures for tests.
//!
//! Builds dentry chains as plain borrowed structs so view lifetimes
//! mirror the real borrowed-from-the-kernel shape.

use super::{BlockDeviceId, DentryView, FileView, FsFlags, FsIdentity, NodeKind};

/// Fixture directory entry. Children borrow their parent, so chains are
/// built leaf-last inside a test body.
pub(crate) struct TestDentry<'a> {
    name: &'static str,
    parent: Option<&'a TestDentry<'a>>,
    root: bool,
    kind: NodeKind,
    fs_name: &'static str,
    flags: FsFlags,
    device: Option<(&'static str, u32)>,
}

impl<'a> TestDentry<'a> {
    /// Filesystem root on a disk-backed filesystem type.
    pub(crate) fn root(fs_name: &'static str) -> TestDentry<'static> {
        TestDentry {
            name: "/",
            parent: None,
            root: true,
            kind: NodeKind::Directory,
            fs_name,
            flags: FsFlags::REQUIRES_DEV,
            device: Some(("sda", 1)),
        }
    }

    /// Filesystem root on a service filesystem type (no backing
    /// device, no flag).
    pub(crate) fn service_root(fs_name: &'static str) -> TestDentry<'static> {
        TestDentry {
            name: "/",
            parent: None,
            root: true,
            kind: NodeKind::Directory,
            fs_name,
            flags: FsFlags::empty(),
            device: None,
        }
    }

    /// Directory with no reachable root, as unlink may observe on old
    /// hosts.
    pub(crate) fn detached_dir(
        name: &'static str,
        fs_name: &'static str,
    ) -> TestDentry<'static> {
        TestDentry {
            name,
            parent: None,
            root: false,
            kind: NodeKind::Directory,
            fs_name,
            flags: FsFlags::REQUIRES_DEV,
            device: Some(("sda", 1)),
        }
    }

    /// Override the backing device reported for this subtree.
    pub(crate) fn with_device(mut self, disk: &'static str, partno: u32) -> Self {
        self.device = Some((disk, partno));
        self
    }

    /// Child directory.
    pub(crate) fn dir(&'a self, name: &'static str) -> TestDentry<'a> {
        self.child(name, NodeKind::Directory)
    }

    /// Child regular file.
    pub(crate) fn file(&'a self, name: &'static str) -> TestDentry<'a> {
        self.child(name, NodeKind::Regular)
    }

    /// Child of an arbitrary kind.
    pub(crate) fn child(&'a self, name: &'static str, kind: NodeKind) -> TestDentry<'a> {
        TestDentry {
            name,
            parent: Some(self),
            root: false,
            kind,
            fs_name: self.fs_name,
            flags: self.flags,
            device: self.device,
        }
    }
}

impl DentryView for TestDentry<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn parent(&self) -> Option<&dyn DentryView> {
        self.parent.map(|p| p as &dyn DentryView)
    }

    fn is_root(&self) -> bool {
        self.root
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn fs(&self) -> FsIdentity<'_> {
        FsIdentity {
            name: self.fs_name,
            flags: self.flags,
        }
    }

    fn block_device(&self) -> Option<BlockDeviceId<'_>> {
        self.device.map(|(disk, partno)| BlockDeviceId { disk, partno })
    }
}

/// Fixture open file.
pub(crate) struct TestFile<'a> {
    dentry: &'a TestDentry<'a>,
    size: u64,
    pos: u64,
}

impl<'a> TestFile<'a> {
    pub(crate) fn new(dentry: &'a TestDentry<'a>, size: u64) -> Self {
        Self {
            dentry,
            size,
            pos: 0,
        }
    }

    #[cfg_attr(not(feature = "abi-heuristic"), allow(dead_code))]
    pub(crate) fn with_pos(mut self, pos: u64) -> Self {
        self.pos = pos;
        self
    }
}

impl FileView for TestFile<'_> {
    fn dentry(&self) -> &dyn DentryView {
        self.dentry
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn pos(&self) -> u64 {
        self.pos
    }
}
