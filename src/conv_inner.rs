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
use crate::kernel::{symm_sum, Kernel};
use crate::mirror::{mirror_index, reflect_left, reflect_right};
use crate::mlaf::mlaf;
use crate::scratch::AlignedBuf;

/// Depth of the delayed write-back ring along the contiguous axis. Results
/// are held back exactly this many samples so taps may still read the input
/// the output is about to overwrite.
pub(crate) const RING_LEN: usize = 32;

/// Whole-line convolution through the full `2 * half_len + 1` tap table with
/// mirrored indices. Buffered through `scratch` (at least `n_pixels` floats)
/// so `input` and `output` may alias.
///
/// # Safety
///
/// `input` and `output` must both be valid for `n_pixels` floats and
/// `n_pixels >= 2 * kernel.half_len()`.
pub(crate) unsafe fn convolve_line_mirrored(
    input: *const f32,
    n_pixels: usize,
    scratch: *mut f32,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        let half = kernel.half_len();
        let kernel_len = 2 * half + 1;

        for i in 0..n_pixels {
            let mut sum = 0f32;

            for k in 0..kernel_len {
                let kreal = k as isize - half as isize;
                let offset = mirror_index(i as isize + kreal, n_pixels);
                sum = mlaf(sum, kernel.tap(k), *input.add(offset));
            }

            *scratch.add(i) = sum;
        }

        std::ptr::copy_nonoverlapping(scratch as *const f32, output, n_pixels);
    }
}

/// Convolves `n_times` lines along the contiguous axis without SIMD, with the
/// same path split and boundary arithmetic as the vectorized engine.
///
/// # Safety
///
/// `input` and `output` (which may alias) must both be valid for
/// `(n_times - 1) * line_stride + n_pixels` floats, `line_stride >= n_pixels`,
/// `kernel.half_len() == HALF` and `n_pixels >= 2 * HALF`.
pub(crate) unsafe fn convolve_inner_scalar<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        debug_assert_eq!(kernel.half_len(), HALF);
        let conv_end = (n_pixels - HALF) & !7;

        if conv_end < RING_LEN {
            let mut scratch = AlignedBuf::zeroed(n_pixels.max(RING_LEN));
            for dim in 0..n_times {
                convolve_line_mirrored(
                    input.add(dim * line_stride),
                    n_pixels,
                    scratch.as_mut_ptr(),
                    output.add(dim * line_stride),
                    kernel,
                );
            }
            return;
        }

        let mut scratch = AlignedBuf::zeroed(RING_LEN);
        let tmp = scratch.as_mut_ptr();
        let coefs = kernel.coefs.as_slice();

        for dim in 0..n_times {
            let cur_input = input.add(dim * line_stride);
            let cur_output = output.add(dim * line_stride);

            for i in 0..n_pixels {
                let mut sum = *coefs.get_unchecked(0) * *cur_input.add(i);

                for k in 1..=HALF {
                    let left = if i < k {
                        *cur_input.add(reflect_left(i, k))
                    } else {
                        *cur_input.add(i - k)
                    };
                    let right = if i + k >= n_pixels {
                        *cur_input.add(reflect_right(i, k, n_pixels))
                    } else {
                        *cur_input.add(i + k)
                    };
                    sum = mlaf(sum, *coefs.get_unchecked(k), symm_sum::<SYMM>(right, left));
                }

                if i >= RING_LEN {
                    *cur_output.add(i - RING_LEN) = *tmp.add(i & (RING_LEN - 1));
                }
                *tmp.add(i & (RING_LEN - 1)) = sum;
            }

            for j in n_pixels - RING_LEN..n_pixels {
                *cur_output.add(j) = *tmp.add(j & (RING_LEN - 1));
            }
        }
    }
}
