// src/tracer/testenv.rs

//! In-memory probe environment for tests.
//!
//! Maps fake "kernel addresses" to fixture VFS objects and fake "user
//! addresses" to byte ranges, so tracer tests can drive the real
//! handlers end to end without a host kernel.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::arch::RegisterFrame;
use crate::errors::UserCopyFault;
use crate::monitor::MonitorContext;
use crate::usercopy::{UserPtr, UserReader};
use crate::vfs::testfs::{TestDentry, TestFile};
use crate::vfs::{DentryView, FileView, RenameView};

/// Nanosecond base for the fake clock; successive reads advance it.
const CLOCK_BASE: u64 = 1_700_000_000_000_000_000;

/// Fake [`super::ProbeEnv`] over fixture objects.
pub(crate) struct FakeEnv<'a> {
    files: BTreeMap<u64, &'a TestFile<'a>>,
    dentries: BTreeMap<u64, &'a TestDentry<'a>>,
    renames: BTreeMap<u64, (&'a TestDentry<'a>, &'a TestDentry<'a>)>,
    offsets: BTreeMap<u64, u64>,
    fds: BTreeMap<u64, &'a TestFile<'a>>,
    user: Vec<(u64, &'a [u8])>,
    clock: Cell<u64>,
}

impl<'a> FakeEnv<'a> {
    pub(crate) fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            dentries: BTreeMap::new(),
            renames: BTreeMap::new(),
            offsets: BTreeMap::new(),
            fds: BTreeMap::new(),
            user: Vec::new(),
            clock: Cell::new(CLOCK_BASE),
        }
    }

    pub(crate) fn map_file(&mut self, addr: u64, file: &'a TestFile<'a>) {
        self.files.insert(addr, file);
    }

    pub(crate) fn map_dentry(&mut self, addr: u64, dentry: &'a TestDentry<'a>) {
        self.dentries.insert(addr, dentry);
    }

    #[cfg_attr(feature = "legacy-rename-abi", allow(dead_code))]
    pub(crate) fn map_rename(
        &mut self,
        addr: u64,
        source: &'a TestDentry<'a>,
        target: &'a TestDentry<'a>,
    ) {
        self.renames.insert(addr, (source, target));
    }

    pub(crate) fn map_offset(&mut self, addr: u64, value: u64) {
        self.offsets.insert(addr, value);
    }

    #[cfg_attr(
        not(any(feature = "abi-heuristic", feature = "legacy-sendfile-abi")),
        allow(dead_code)
    )]
    pub(crate) fn map_fd(&mut self, fd: u64, file: &'a TestFile<'a>) {
        self.fds.insert(fd, file);
    }

    pub(crate) fn map_user(&mut self, addr: u64, bytes: &'a [u8]) {
        self.user.push((addr, bytes));
    }
}

impl UserReader for FakeEnv<'_> {
    fn copy_from_user(&self, dst: &mut [u8], src: UserPtr) -> Result<(), UserCopyFault> {
        for &(base, bytes) in &self.user {
            let Some(offset) = src.addr().checked_sub(base) else {
                continue;
            };
            let offset = offset as usize;
            let Some(end) = offset.checked_add(dst.len()) else {
                continue;
            };
            if let Some(slice) = bytes.get(offset..end) {
                dst.copy_from_slice(slice);
                return Ok(());
            }
        }
        Err(UserCopyFault)
    }
}

impl super::ProbeEnv for FakeEnv<'_> {
    fn timestamp_ns(&self) -> u64 {
        let now = self.clock.get();
        self.clock.set(now + 1_000);
        now
    }

    fn file_at(&self, addr: u64) -> Option<&dyn FileView> {
        self.files.get(&addr).map(|file| *file as &dyn FileView)
    }

    fn dentry_at(&self, addr: u64) -> Option<&dyn DentryView> {
        self.dentries
            .get(&addr)
            .map(|dentry| *dentry as &dyn DentryView)
    }

    fn rename_at(&self, addr: u64) -> Option<RenameView<'_>> {
        self.renames.get(&addr).map(|&(source, target)| RenameView {
            source,
            target,
        })
    }

    fn offset_at(&self, addr: u64) -> Option<u64> {
        self.offsets.get(&addr).copied()
    }

    fn file_for_fd(&self, fd: u64) -> Option<&dyn FileView> {
        self.fds.get(&fd).map(|file| *file as &dyn FileView)
    }
}

/// Build a register frame carrying `args` in function-entry order.
#[cfg(target_arch = "x86_64")]
pub(crate) fn frame_with_args(args: [u64; 6]) -> RegisterFrame {
    RegisterFrame {
        di: args[0],
        si: args[1],
        dx: args[2],
        cx: args[3],
        r8: args[4],
        r9: args[5],
        ..RegisterFrame::default()
    }
}

/// Build a register frame carrying `args` in function-entry order.
#[cfg(not(target_arch = "x86_64"))]
pub(crate) fn frame_with_args(args: [u64; 6]) -> RegisterFrame {
    RegisterFrame { args }
}

/// Build a frame presenting the syscall arguments in the alternate
/// (r10, r8, r9) register set, as the historical oddity does.
#[cfg(all(feature = "abi-heuristic", target_arch = "x86_64"))]
pub(crate) fn frame_with_alt_syscall_args(fd: u64, buf: u64, count: u64) -> RegisterFrame {
    RegisterFrame {
        di: u64::MAX,
        r10: fd,
        r8: buf,
        r9: count,
        ..RegisterFrame::default()
    }
}

/// Build a frame presenting the syscall arguments in the alternate
/// register set. The stub frame has no alternate set; this is the
/// identity layout.
#[cfg(all(feature = "abi-heuristic", not(target_arch = "x86_64")))]
pub(crate) fn frame_with_alt_syscall_args(fd: u64, buf: u64, count: u64) -> RegisterFrame {
    frame_with_args([fd, buf, count, 0, 0, 0])
}

/// Snapshot of everything currently buffered in the ring.
pub(crate) fn drain_all(ctx: &MonitorContext) -> Vec<u8> {
    let shared = ctx.lock_shared();
    let mut out = vec![0u8; shared.ring.capacity() + 1];
    let n = shared.ring.drain(&mut out);
    out.truncate(n);
    out
}
