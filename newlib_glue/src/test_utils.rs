//! Stub kernel for host tests.

use crate::syscall::{KernelCall, Syscall};
use std::{cell::RefCell, collections::VecDeque, slice, vec::Vec};
use syscall_id::SYSCALL_WRITE;

/// Records every request. Replies come from a script; once it runs out,
/// writes report the full length and everything else returns 0.
#[derive(Default)]
pub struct RecordingKernel {
    calls: RefCell<Vec<Syscall>>,
    replies: RefCell<VecDeque<isize>>,
    written: RefCell<Vec<u8>>,
}

impl RecordingKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_with(self, replies: impl IntoIterator<Item = isize>) -> Self {
        self.replies.borrow_mut().extend(replies);
        self
    }

    pub fn calls(&self) -> Vec<Syscall> {
        self.calls.borrow().clone()
    }

    /// Bytes the kernel accepted across all writes.
    pub fn written(&self) -> Vec<u8> {
        self.written.borrow().clone()
    }
}

impl KernelCall for RecordingKernel {
    fn call(&self, request: Syscall) -> isize {
        self.calls.borrow_mut().push(request);
        let [_, buf, len] = request.args;
        let is_write = request.id == SYSCALL_WRITE;
        let ret = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(if is_write { len as isize } else { 0 });

        if is_write && ret > 0 && buf != 0 {
            let accepted = (ret as usize).min(len);
            let bytes = unsafe { slice::from_raw_parts(buf as *const u8, accepted) };
            self.written.borrow_mut().extend_from_slice(bytes);
        }
        ret
    }

    fn call_noreturn(&self, request: Syscall) -> ! {
        self.calls.borrow_mut().push(request);
        panic!("stub kernel cannot terminate the test process");
    }
}
