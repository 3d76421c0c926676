// src/vfs/device.rs

//! Block device node naming.
//!
//! Unlink records carry the conventional "/dev/..." name of the device
//! the file lived on, derived from the disk name and partition number
//! the way the block layer names partition nodes: a disk name ending in
//! a digit gets a "p" separator ("nvme0n1p2"), any other gets the bare
//! number ("sda1"), and partition 0 is the whole disk.

use core::fmt::Write as _;

use super::BlockDeviceId;
use crate::record::FixedStr;

/// Maximum rendered length of a device node name.
pub const DEVICE_NAME_LEN: usize = 48;

/// Render the "/dev/..." node name for `device`.
///
/// # Errors
///
/// Returns [`core::fmt::Error`] when the disk name exceeds
/// [`DEVICE_NAME_LEN`]; the caller drops the event.
pub fn device_name(device: &BlockDeviceId<'_>) -> Result<FixedStr<DEVICE_NAME_LEN>, core::fmt::Error> {
    let mut name = FixedStr::new();

    if device.partno == 0 {
        write!(name, "/dev/{}", device.disk)?;
    } else if device.disk.ends_with(|c: char| c.is_ascii_digit()) {
        write!(name, "/dev/{}p{}", device.disk, device.partno)?;
    } else {
        write!(name, "/dev/{}{}", device.disk, device.partno)?;
    }

    Ok(name)
}
