// src/tracer/copy.rs

//! Cross-file copy tracer.
//!
//! Probes `vfs_copy_file_range`; hosts predating it build with
//! `legacy-sendfile-abi` and probe `do_sendfile` instead, emitting the
//! same fields. Records carry the timestamp, the source path, the
//! destination path and the `<copied>` tag.
//!
//! The source decides relevance (regular file on a disk-backed
//! filesystem); the destination only has to resolve, since the copy
//! call itself enforces what may be written to.

use core::fmt::Write as _;

use crate::arch::RegisterFrame;
use crate::constants::{tags, MAX_PATH_LEN};
use crate::monitor::MonitorContext;
use crate::record::FixedStr;
use crate::vfs::classifier;
use crate::vfs::path::resolve_file;

use super::{publish_record, ProbeEnv};

/// Probe handler for the cross-file copy entry point.
pub fn vfs_copy_probe(ctx: &MonitorContext, env: &dyn ProbeEnv, frame: &RegisterFrame) {
    let args = frame.probe_args();

    // ssize_t vfs_copy_file_range(struct file *file_in, loff_t pos_in,
    //                             struct file *file_out, loff_t pos_out,
    //                             size_t len, unsigned int flags)
    #[cfg(not(feature = "legacy-sendfile-abi"))]
    let (source, target) = {
        let Some(source) = env.file_at(args.arg0()) else {
            return;
        };
        let Some(target) = env.file_at(args.arg2()) else {
            return;
        };
        (source, target)
    };

    // ssize_t do_sendfile(int out_fd, int in_fd, loff_t *ppos,
    //                     size_t count, loff_t max)
    #[cfg(feature = "legacy-sendfile-abi")]
    let (source, target) = {
        let Some(source) = env.file_for_fd(args.arg1()) else {
            return;
        };
        let Some(target) = env.file_for_fd(args.arg0()) else {
            return;
        };
        (source, target)
    };

    if !classifier::is_traceable(source.dentry()) {
        return;
    }

    let mut timestamp = FixedStr::<24>::new();
    if write!(timestamp, "{}", env.timestamp_ns()).is_err() {
        ctx.note_dropped("copy: timestamp render failed");
        return;
    }

    let mut source_scratch = [0u8; MAX_PATH_LEN];
    let source_path = match resolve_file(source, &mut source_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("copy: source path resolution failed");
            return;
        }
    };

    let mut target_scratch = [0u8; MAX_PATH_LEN];
    let target_path = match resolve_file(target, &mut target_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("copy: target path resolution failed");
            return;
        }
    };

    publish_record(
        ctx,
        &[
            timestamp.as_bytes(),
            source_path.as_str().as_bytes(),
            target_path.as_str().as_bytes(),
            tags::COPIED.as_bytes(),
        ],
    );
}
