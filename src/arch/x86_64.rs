// src/arch/x86_64.rs

//! x86_64 register frame and argument mapping.
//!
//! Register state at a probed function entry (System V calling
//! convention):
//! - RDI, RSI, RDX, RCX, R8, R9: arguments 1-6
//! - RAX: return value slot, clobbered
//! - R10 replaces RCX at the *syscall* entry convention, which is why
//!   the raw-syscall probe cannot reuse the function-entry mapping
//!
//! Some historically observed frames present the syscall arguments in
//! R10, R8, R9 instead of RDI, RSI, RDX. The runtime fallback for that
//! oddity checks whether the first candidate register is plausible as a
//! file descriptor; it is a pragmatic heuristic, not a guarantee, and
//! is therefore compiled only under the `abi-heuristic` feature.

use super::ProbeArgs;

/// Plausibility bound for a file descriptor value, used by the
/// register-order heuristic.
#[cfg(feature = "abi-heuristic")]
const FD_PLAUSIBLE_MAX: u64 = 1024;

/// Integer register snapshot at probe entry, in the layout the probe
/// engine captures it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFrame {
    /// R15 general purpose register.
    pub r15: u64,
    /// R14 general purpose register.
    pub r14: u64,
    /// R13 general purpose register.
    pub r13: u64,
    /// R12 general purpose register.
    pub r12: u64,
    /// Frame base pointer.
    pub bp: u64,
    /// RBX general purpose register.
    pub bx: u64,
    /// R11 scratch register.
    pub r11: u64,
    /// R10; carries argument 4 at the syscall entry convention.
    pub r10: u64,
    /// R9; argument 6.
    pub r9: u64,
    /// R8; argument 5.
    pub r8: u64,
    /// RAX; return value slot.
    pub ax: u64,
    /// RCX; argument 4 at function entry.
    pub cx: u64,
    /// RDX; argument 3.
    pub dx: u64,
    /// RSI; argument 2.
    pub si: u64,
    /// RDI; argument 1.
    pub di: u64,
    /// Instruction pointer at the probe point.
    pub ip: u64,
    /// Stack pointer.
    pub sp: u64,
    /// Flags register.
    pub flags: u64,
}

impl RegisterFrame {
    /// Arguments in function-entry order.
    pub const fn probe_args(&self) -> ProbeArgs {
        ProbeArgs::new([self.di, self.si, self.dx, self.cx, self.r8, self.r9])
    }

    /// Syscall-entry arguments via the fd-plausibility heuristic.
    ///
    /// Prefers the conventional RDI, RSI, RDX set when RDI looks like a
    /// file descriptor; falls back to the historically observed R10,
    /// R8, R9 set; yields `None` when neither candidate is plausible
    /// (an invalid or foreign frame, which the caller skips).
    #[cfg(feature = "abi-heuristic")]
    pub const fn syscall_args_heuristic(&self) -> Option<ProbeArgs> {
        if self.di < FD_PLAUSIBLE_MAX {
            Some(ProbeArgs::new([self.di, self.si, self.dx, 0, 0, 0]))
        } else if self.r10 < FD_PLAUSIBLE_MAX {
            Some(ProbeArgs::new([self.r10, self.r8, self.r9, 0, 0, 0]))
        } else {
            None
        }
    }
}
