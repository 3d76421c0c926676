// src/tracer/unlink.rs

//! Unlink tracer.
//!
//! Probes the VFS unlink entry point. Records carry the timestamp, the
//! "/dev/..." name of the backing device, the path of the removed file
//! and the `<deleted>` tag.
//!
//! On hosts where the target entry is already detached when the probe
//! fires, path resolution yields only the known suffix; the record
//! carries it unchanged.

use core::fmt::Write as _;

use crate::arch::RegisterFrame;
use crate::constants::{tags, MAX_PATH_LEN};
use crate::monitor::MonitorContext;
use crate::record::FixedStr;
use crate::vfs::classifier;
use crate::vfs::device::device_name;
use crate::vfs::path::resolve_dentry;

use super::{publish_record, ProbeEnv};

/// Probe handler for the VFS unlink entry point.
pub fn vfs_unlink_probe(ctx: &MonitorContext, env: &dyn ProbeEnv, frame: &RegisterFrame) {
    let args = frame.probe_args();

    // int vfs_unlink(struct mnt_idmap *idmap, struct inode *dir,
    //                struct dentry *dentry, struct inode **delegated)
    // The leading idmap argument appeared with the 5.12-era signature;
    // older hosts build with `legacy-unlink-abi` and take the entry
    // from the second slot.
    #[cfg(not(feature = "legacy-unlink-abi"))]
    let dentry_addr = args.arg2();
    #[cfg(feature = "legacy-unlink-abi")]
    let dentry_addr = args.arg1();

    let Some(dentry) = env.dentry_at(dentry_addr) else {
        return;
    };
    if !classifier::is_traceable(dentry) {
        return;
    }

    let mut timestamp = FixedStr::<24>::new();
    if write!(timestamp, "{}", env.timestamp_ns()).is_err() {
        ctx.note_dropped("unlink: timestamp render failed");
        return;
    }

    let Some(block_device) = dentry.block_device() else {
        ctx.note_dropped("unlink: no backing device");
        return;
    };
    let Ok(device) = device_name(&block_device) else {
        ctx.note_dropped("unlink: device name render failed");
        return;
    };

    let mut path_scratch = [0u8; MAX_PATH_LEN];
    let path = match resolve_dentry(dentry, &mut path_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("unlink: path resolution failed");
            return;
        }
    };

    publish_record(
        ctx,
        &[
            timestamp.as_bytes(),
            device.as_bytes(),
            path.as_str().as_bytes(),
            tags::DELETED.as_bytes(),
        ],
    );
}
