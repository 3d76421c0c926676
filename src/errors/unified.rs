// src/errors/unified.rs

//! Unified error types for the monitor
//!
//! This module provides a consistent error handling approach across
//! all monitor subsystems. Probe handlers absorb every error locally
//! (a failed capture produces no record); only the channel and the
//! lifecycle surface errors to the glue.

use core::fmt;

/// Top-level monitor error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorError {
    /// Event channel error
    Channel(ChannelError),
    /// Path resolution error
    Path(PathError),
    /// Lifecycle error
    Attach(AttachError),
    /// User-space copy fault
    UserCopy(UserCopyFault),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Channel(e) => write!(f, "channel error: {}", e),
            MonitorError::Path(e) => write!(f, "path error: {}", e),
            MonitorError::Attach(e) => write!(f, "attach error: {}", e),
            MonitorError::UserCopy(e) => write!(f, "user copy error: {}", e),
        }
    }
}

/// Event channel errors, surfaced to the chardev glue as negative
/// return codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The consumer-supplied buffer faulted during the copy (EFAULT
    /// class).
    BadAddress,
    /// The drain scratch allocation failed (ENOMEM class).
    NoMemory,
}

impl ChannelError {
    /// Stable textual form, usable from the glue's own logging.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChannelError::BadAddress => "bad user address",
            ChannelError::NoMemory => "out of memory",
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ChannelError> for MonitorError {
    fn from(err: ChannelError) -> Self {
        MonitorError::Channel(err)
    }
}

/// Path resolution errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The caller-provided scratch cannot hold the assembled path.
    ScratchTooSmall,
    /// The directory entry chain could not be interpreted.
    Unresolvable,
}

impl PathError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PathError::ScratchTooSmall => "path scratch too small",
            PathError::Unresolvable => "entry chain unresolvable",
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PathError> for MonitorError {
    fn from(err: PathError) -> Self {
        MonitorError::Path(err)
    }
}

/// Lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The ring buffer backing storage could not be allocated.
    NoMemory,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::NoMemory => write!(f, "ring buffer allocation failed"),
        }
    }
}

impl From<AttachError> for MonitorError {
    fn from(err: AttachError) -> Self {
        MonitorError::Attach(err)
    }
}

/// A copy from or to user space touched an unmapped or protected
/// address.
///
/// Inside probe handlers this is absorbed (the sample degrades to zero
/// length); on the channel read path it maps to
/// [`ChannelError::BadAddress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCopyFault;

impl fmt::Display for UserCopyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("user address fault")
    }
}

impl From<UserCopyFault> for MonitorError {
    fn from(err: UserCopyFault) -> Self {
        MonitorError::UserCopy(err)
    }
}

impl From<UserCopyFault> for ChannelError {
    fn from(_: UserCopyFault) -> Self {
        ChannelError::BadAddress
    }
}
