// src/arch/stub.rs

//! Fallback register frame for architectures without a dedicated
//! mapping.
//!
//! The probe glue on such targets fills the arguments in call order
//! itself; the frame is then a transparent carrier.

use super::ProbeArgs;

/// Argument carrier for targets without a register-level mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFrame {
    /// Arguments in function-entry order, as captured by the glue.
    pub args: [u64; 6],
}

impl RegisterFrame {
    /// Arguments in function-entry order.
    pub const fn probe_args(&self) -> ProbeArgs {
        ProbeArgs::new(self.args)
    }

    /// The stub target has no register-order oddity; the heuristic is
    /// the identity mapping.
    #[cfg(feature = "abi-heuristic")]
    pub const fn syscall_args_heuristic(&self) -> Option<ProbeArgs> {
        Some(self.probe_args())
    }
}
