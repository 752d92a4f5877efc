/*!
# Memsec utility functions
Secret material implements `Scrubbed` so it can be wiped before release.
*/

use std::ptr;

/// Types implementing this can be scrubbed, the memory is cleared and
/// erased with a dummy value.
pub trait Scrubbed {
    fn scrub(&mut self);
}

/// Perform a secure memset. This function is guaranteed not to be elided
/// or reordered.
///
/// # Safety
///
/// The destination memory (`dst` to `dst+count`) must be properly allocated
/// and ready to use.
#[inline(never)]
pub unsafe fn memset(dst: *mut u8, val: u8, count: usize) {
    for i in 0..count {
        ptr::write_volatile(dst.add(i), val);
    }
}

impl Scrubbed for [u8] {
    fn scrub(&mut self) {
        unsafe { memset(self.as_mut_ptr(), 0, self.len()) }
    }
}

impl<const N: usize> Scrubbed for [u8; N] {
    fn scrub(&mut self) {
        unsafe { memset(self.as_mut_ptr(), 0, self.len()) }
    }
}

impl Scrubbed for Vec<u8> {
    fn scrub(&mut self) {
        self.as_mut_slice().scrub()
    }
}

impl Scrubbed for String {
    fn scrub(&mut self) {
        // zeroes are valid utf-8, the string stays well formed
        unsafe { self.as_mut_vec().scrub() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn scrubbed_vec_is_zeroed(mut bytes: Vec<u8>) -> bool {
        let len = bytes.len();
        bytes.scrub();
        bytes.len() == len && bytes.iter().all(|b| *b == 0)
    }

    #[test]
    fn scrubbed_secret_string_keeps_length() {
        let mut secret = String::from("b1e3f07a");
        secret.scrub();
        assert_eq!(secret, "\0".repeat(8));
    }
}
