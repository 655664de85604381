/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::ptr::NonNull;

/// Vector stores into the scratch are full-width and aligned.
pub(crate) const SCRATCH_ALIGNMENT: usize = 32;

/// Transient 32-byte-aligned f32 scratch. Each engine invocation owns exactly
/// one, released on drop; allocation failure is fatal.
pub(crate) struct AlignedBuf {
    ptr: NonNull<f32>,
    layout: Layout,
}

impl AlignedBuf {
    pub(crate) fn zeroed(len: usize) -> AlignedBuf {
        assert!(len > 0, "scratch must not be empty");
        let layout = Layout::from_size_align(len * std::mem::size_of::<f32>(), SCRATCH_ALIGNMENT)
            .expect("scratch layout must be valid");
        let raw = unsafe { alloc_zeroed(layout) } as *mut f32;
        if raw.is_null() {
            handle_alloc_error(layout);
        }
        AlignedBuf {
            ptr: unsafe { NonNull::new_unchecked(raw) },
            layout,
        }
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self.ptr.as_ptr()
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        unsafe {
            dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_is_vector_aligned_and_zeroed() {
        for len in [1usize, 7, 32, 129] {
            let mut buf = AlignedBuf::zeroed(len);
            let ptr = buf.as_mut_ptr();
            assert_eq!(ptr as usize % SCRATCH_ALIGNMENT, 0);
            for i in 0..len {
                assert_eq!(unsafe { *ptr.add(i) }, 0f32);
            }
        }
    }
}
