// src/tracer/write.rs

//! Write tracers.
//!
//! The file-based tracer probes the VFS write entry point:
//! `vfs_write(file, buf, count, ppos)`. A record carries the
//! timestamp, the absolute path, a base64 sample from the middle of the
//! written data, the resulting file size lower bound, and either a
//! sample of the beginning or the `<not_a_beginning>` tag when the
//! write position is not zero.

use core::fmt::Write as _;

use crate::arch::RegisterFrame;
use crate::constants::{tags, BASE64_MAX, MAX_PATH_LEN, SAMPLE_SIZE};
use crate::monitor::MonitorContext;
use crate::record::{codec, FixedStr};
use crate::usercopy::{copy_sample, SampleWindow, UserPtr};
use crate::vfs::classifier;
use crate::vfs::path::resolve_file;
use crate::vfs::FileView;

use super::{publish_record, ProbeEnv};

/// Probe handler for the VFS write entry point.
pub fn vfs_write_probe(ctx: &MonitorContext, env: &dyn ProbeEnv, frame: &RegisterFrame) {
    // ssize_t vfs_write(struct file *file, const char __user *buf,
    //                   size_t count, loff_t *pos)
    let args = frame.probe_args();

    let Some(file) = env.file_at(args.arg0()) else {
        return;
    };
    if !classifier::is_traceable(file.dentry()) {
        return;
    }

    let buf = UserPtr::new(args.arg1());
    let count = args.arg2() as usize;
    // A null position pointer means "write at zero".
    let pos = match args.arg3() {
        0 => 0,
        addr => env.offset_at(addr).unwrap_or(0),
    };

    emit_write_event(ctx, env, file, buf, count, pos);
}

/// Probe handler for the raw write syscall entry.
///
/// This is the historical fd-based capture path: the descriptor is
/// resolved through the probed task's file table, and the argument
/// registers are selected by the fd-plausibility heuristic. Events it
/// emits have the same shape as the file-based tracer's, with the
/// position taken from the open file itself.
#[cfg(feature = "abi-heuristic")]
pub fn sys_write_probe(ctx: &MonitorContext, env: &dyn ProbeEnv, frame: &RegisterFrame) {
    // ssize_t write(unsigned int fd, const char __user *buf, size_t count)
    let Some(args) = frame.syscall_args_heuristic() else {
        return;
    };

    let Some(file) = env.file_for_fd(args.arg0()) else {
        return;
    };
    if !classifier::is_traceable(file.dentry()) {
        return;
    }

    let buf = UserPtr::new(args.arg1());
    let count = args.arg2() as usize;

    emit_write_event(ctx, env, file, buf, count, file.pos());
}

/// Assemble and publish one write record.
fn emit_write_event(
    ctx: &MonitorContext,
    env: &dyn ProbeEnv,
    file: &dyn FileView,
    buf: UserPtr,
    count: usize,
    pos: u64,
) {
    let mut timestamp = FixedStr::<24>::new();
    if write!(timestamp, "{}", env.timestamp_ns()).is_err() {
        ctx.note_dropped("write: timestamp render failed");
        return;
    }

    let mut path_scratch = [0u8; MAX_PATH_LEN];
    let path = match resolve_file(file, &mut path_scratch) {
        Ok(path) => path,
        Err(_) => {
            ctx.note_dropped("write: path resolution failed");
            return;
        }
    };

    let mut sample = [0u8; SAMPLE_SIZE];

    let middle_len = copy_sample(env, &mut sample, buf, count, SampleWindow::Middle);
    let mut middle_b64 = [0u8; BASE64_MAX];
    let middle_n = codec::encode(&sample[..middle_len], &mut middle_b64);

    // Lower bound on the file size after this write completes.
    let mut size = FixedStr::<24>::new();
    let resulting = pos.saturating_add(count as u64).max(file.size());
    if write!(size, "{}", resulting).is_err() {
        ctx.note_dropped("write: size render failed");
        return;
    }

    let mut head_b64 = [0u8; BASE64_MAX];
    let beginning: &[u8] = if pos == 0 {
        let head_len = copy_sample(env, &mut sample, buf, count, SampleWindow::Head);
        let head_n = codec::encode(&sample[..head_len], &mut head_b64);
        &head_b64[..head_n]
    } else {
        tags::NOT_A_BEGINNING.as_bytes()
    };

    publish_record(
        ctx,
        &[
            timestamp.as_bytes(),
            path.as_str().as_bytes(),
            &middle_b64[..middle_n],
            size.as_bytes(),
            beginning,
        ],
    );
}
