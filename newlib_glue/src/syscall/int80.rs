use super::{KernelCall, Syscall};
use core::arch::asm;
use syscall_id::SYSCALL_VECTOR;

/// `int 0x80` with the i386 register convention: `eax` carries the operation
/// code in and the result out, `ebx`, `ecx`, `edx` carry the arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int80;

#[cfg(target_arch = "x86")]
impl KernelCall for Int80 {
    #[inline(always)]
    fn call(&self, request: Syscall) -> isize {
        let [a0, a1, a2] = request.args;
        let mut ret = request.id;
        unsafe {
            asm!(
                "int {vector}",
                vector = const SYSCALL_VECTOR,
                inlateout("eax") ret,
                in("ebx") a0,
                in("ecx") a1,
                in("edx") a2,
                options(nostack),
            );
        }
        ret as isize
    }

    #[inline(always)]
    fn call_noreturn(&self, request: Syscall) -> ! {
        let [a0, a1, a2] = request.args;
        unsafe {
            asm!(
                "int {vector}",
                vector = const SYSCALL_VECTOR,
                in("eax") request.id,
                in("ebx") a0,
                in("ecx") a1,
                in("edx") a2,
                options(noreturn, nostack),
            )
        }
    }
}

// LLVM reserves rbx on x86_64, so the first argument is swapped in and out
// around the interrupt.
#[cfg(target_arch = "x86_64")]
impl KernelCall for Int80 {
    #[inline(always)]
    fn call(&self, request: Syscall) -> isize {
        let [a0, a1, a2] = request.args;
        let mut ret = request.id;
        unsafe {
            asm!(
                "xchg rbx, {a0}",
                "int {vector}",
                "xchg rbx, {a0}",
                vector = const SYSCALL_VECTOR,
                a0 = inout(reg) a0 => _,
                inlateout("rax") ret,
                in("rcx") a1,
                in("rdx") a2,
                options(nostack),
            );
        }
        ret as isize
    }

    #[inline(always)]
    fn call_noreturn(&self, request: Syscall) -> ! {
        let [a0, a1, a2] = request.args;
        unsafe {
            asm!(
                "mov rbx, {a0}",
                "int {vector}",
                vector = const SYSCALL_VECTOR,
                a0 = in(reg) a0,
                in("rax") request.id,
                in("rcx") a1,
                in("rdx") a2,
                options(noreturn, nostack),
            )
        }
    }
}
