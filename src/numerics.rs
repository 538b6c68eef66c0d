//! Floating-point denormal control.
//!
//! Flush-to-zero / denormals-are-zero is a process-wide numerics policy,
//! orthogonal to scheduling. [`init_tasking_system`] applies it once when
//! requested; it stays in effect after shutdown unless explicitly reset
//! here.
//!
//! [`init_tasking_system`]: crate::init_tasking_system

#[cfg(target_arch = "x86_64")]
mod imp {
    use std::arch::asm;

    /// MXCSR flush-to-zero bit
    const FTZ: u32 = 1 << 15;
    /// MXCSR denormals-are-zero bit
    const DAZ: u32 = 1 << 6;

    fn read_mxcsr() -> u32 {
        let mut csr: u32 = 0;
        let ptr: *mut u32 = &mut csr;
        // SAFETY: stmxcsr writes 4 bytes to a valid, aligned pointer.
        unsafe { asm!("stmxcsr [{}]", in(reg) ptr) };
        csr
    }

    fn write_mxcsr(csr: u32) {
        let ptr: *const u32 = &csr;
        // SAFETY: ldmxcsr reads 4 bytes from a valid, aligned pointer.
        unsafe { asm!("ldmxcsr [{}]", in(reg) ptr) };
    }

    pub(super) fn set_flush_denormals(enable: bool) {
        let csr = read_mxcsr();
        let csr = if enable {
            csr | FTZ | DAZ
        } else {
            csr & !(FTZ | DAZ)
        };
        write_mxcsr(csr);
    }
}

#[cfg(target_arch = "aarch64")]
mod imp {
    use std::arch::asm;

    /// FPCR flush-to-zero bit
    const FZ: u64 = 1 << 24;

    pub(super) fn set_flush_denormals(enable: bool) {
        let fpcr: u64;
        // SAFETY: reading and writing FPCR is side-effect free beyond the
        // rounding/denormal behavior it controls.
        unsafe {
            asm!("mrs {}, fpcr", out(reg) fpcr);
            let fpcr = if enable { fpcr | FZ } else { fpcr & !FZ };
            asm!("msr fpcr, {}", in(reg) fpcr);
        }
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod imp {
    pub(super) fn set_flush_denormals(_enable: bool) {}
}

/// Enable or disable flush-to-zero / denormals-are-zero for this process.
///
/// No-op on architectures without a denormal control register.
pub fn set_flush_denormals(enable: bool) {
    imp::set_flush_denormals(enable);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_does_not_disturb_normal_arithmetic() {
        set_flush_denormals(true);
        let x = std::hint::black_box(1.5f32);
        assert_eq!(x * 2.0, 3.0);
        set_flush_denormals(false);
    }
}
