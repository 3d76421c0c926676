// src/tracer/rename.rs

//! Rename tracer.
//!
//! Records carry the timestamp, the source path, the destination path
//! and the `<renamed>` tag. The source entry decides relevance, same as
//! unlink; the destination may not exist yet and its path may resolve
//! partially.

use core::fmt::Write as _;

use crate::arch::RegisterFrame;
use crate::constants::{tags, MAX_PATH_LEN};
use crate::monitor::MonitorContext;
use crate::record::FixedStr;
use crate::vfs::classifier;
use crate::vfs::path::resolve_dentry;
#[cfg(feature = "legacy-rename-abi")]
use crate::vfs::RenameView;

use super::{publish_record, ProbeEnv};

/// Probe handler for the VFS rename entry point.
pub fn vfs_rename_probe(ctx: &MonitorContext, env: &dyn ProbeEnv, frame: &RegisterFrame) {
    let args = frame.probe_args();

    // int vfs_rename(struct renamedata *rd)
    #[cfg(not(feature = "legacy-rename-abi"))]
    let Some(view) = env.rename_at(args.arg0()) else {
        return;
    };

    // int vfs_rename(struct inode *old_dir, struct dentry *old_dentry,
    //                struct inode *new_dir, struct dentry *new_dentry, ...)
    #[cfg(feature = "legacy-rename-abi")]
    let view = {
        let Some(source) = env.dentry_at(args.arg1()) else {
            return;
        };
        let Some(target) = env.dentry_at(args.arg3()) else {
            return;
        };
        RenameView { source, target }
    };

    if !classifier::is_traceable(view.source) {
        return;
    }

    let mut timestamp = FixedStr::<24>::new();
    if write!(timestamp, "{}", env.timestamp_ns()).is_err() {
        ctx.note_dropped("rename: timestamp render failed");
        return;
    }

    let mut source_scratch = [0u8; MAX_PATH_LEN];
    let source = match resolve_dentry(view.source, &mut source_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("rename: source path resolution failed");
            return;
        }
    };

    let mut target_scratch = [0u8; MAX_PATH_LEN];
    let target = match resolve_dentry(view.target, &mut target_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("rename: target path resolution failed");
            return;
        }
    };

    publish_record(
        ctx,
        &[
            timestamp.as_bytes(),
            source.as_str().as_bytes(),
            target.as_str().as_bytes(),
            tags::RENAMED.as_bytes(),
        ],
    );
}
