// src/constants.rs

//! Monitor constants and configuration values
//!
//! This module centralizes the capacities, record tags and probe symbol
//! names used throughout the monitor, so the wire format and the sizing
//! decisions live in one place.

/// Capacity of the event ring buffer in bytes.
///
/// Records are appended byte-granularly; once the ring is full the
/// oldest bytes are overwritten, so this bounds the backlog a slow
/// consumer can recover.
pub const BUFFER_SIZE: usize = 131_072;

/// Maximum encoded size of a single event record, including the leading
/// NUL sentinel and the trailing newline.
pub const ENTRY_SIZE: usize = 512;

/// Maximum number of fields a record may carry.
pub const MAX_FIELDS: usize = 8;

/// Size of the content window sampled from the traced write buffer.
pub const SAMPLE_SIZE: usize = 40;

/// Upper bound for the base64 encoding of a [`SAMPLE_SIZE`] window
/// (56 encoded bytes for 40 input bytes, rounded up with headroom).
pub const BASE64_MAX: usize = 60;

/// Scratch size for absolute path resolution.
pub const MAX_PATH_LEN: usize = 256;

/// Name of the character device node the glue registers for the
/// event channel.
pub const DEVICE_NAME: &str = "fs_monitor";

/// Access mode for the device node: world-readable, never writable.
pub const DEVICE_MODE: u16 = 0o444;

/// Record tags
///
/// Each tag occupies a whole field and is chosen so that it can never
/// collide with base64 output or an absolute path.
pub mod tags {
    /// Final field of an unlink record.
    pub const DELETED: &str = "<deleted>";
    /// Final field of a rename record.
    pub const RENAMED: &str = "<renamed>";
    /// Final field of a cross-file copy record.
    pub const COPIED: &str = "<copied>";
    /// Beginning-sample field of a write record whose position was
    /// not zero.
    pub const NOT_A_BEGINNING: &str = "<not_a_beginning>";
    /// Sole payload field of a record that did not fit in
    /// [`super::ENTRY_SIZE`] bytes.
    pub const TRUNCATED: &str = "<truncated>";
}

/// Kernel symbols the probe glue attaches to.
pub mod symbols {
    /// File-based write entry point.
    pub const VFS_WRITE: &str = "vfs_write";
    /// Unlink entry point.
    pub const VFS_UNLINK: &str = "vfs_unlink";
    /// Rename entry point.
    pub const VFS_RENAME: &str = "vfs_rename";
    /// Cross-file copy entry point.
    #[cfg(not(feature = "legacy-sendfile-abi"))]
    pub const VFS_COPY: &str = "vfs_copy_file_range";
    /// Cross-file copy entry point on kernels predating
    /// `vfs_copy_file_range`.
    #[cfg(feature = "legacy-sendfile-abi")]
    pub const VFS_COPY: &str = "do_sendfile";
    /// Raw write syscall entry, used by the fd-based probe.
    #[cfg(feature = "abi-heuristic")]
    pub const SYS_WRITE: &str = "__x64_sys_write";
}
