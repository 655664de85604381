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
use crate::mirror::{reflect_left, reflect_right};
use crate::mlaf::mlaf;
use crate::scratch::AlignedBuf;

/// Row indices read by each one-sided tap at `pixel`: `(forward, backward)`
/// per tap, already mirrored where the tap leaves the axis.
#[inline(always)]
pub(crate) fn tap_rows<const HALF: usize>(pixel: usize, n_pixels: usize) -> [(usize, usize); HALF] {
    let mut rows = [(0usize, 0usize); HALF];
    for k in 1..=HALF {
        let fw = if pixel + k >= n_pixels {
            reflect_right(pixel, k, n_pixels)
        } else {
            pixel + k
        };
        let bw = if pixel < k {
            reflect_left(pixel, k)
        } else {
            pixel - k
        };
        rows[k - 1] = (fw, bw);
    }
    rows
}

/// Convolves along a strided axis without SIMD. At most `HALF + 1`
/// consecutive result rows are pending at any time, so they are kept in a
/// small ring and flushed one axis step late, which keeps in-place calls
/// correct.
///
/// # Safety
///
/// `input` and `output` (which may alias) must both be valid for
/// `(n_pixels - 1) * pixel_stride + n_times` floats, `pixel_stride >= n_times`,
/// `kernel.half_len() == HALF` and `n_pixels >= 2 * HALF`.
pub(crate) unsafe fn convolve_outer_scalar<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        debug_assert_eq!(kernel.half_len(), HALF);
        let ring_rows = HALF + 1;
        let mut ring = AlignedBuf::zeroed(ring_rows * n_times);
        let ring_ptr = ring.as_mut_ptr();
        let coefs = kernel.coefs.as_slice();

        for pixel in 0..n_pixels {
            let rows = tap_rows::<HALF>(pixel, n_pixels);
            let inptr = input.add(pixel * pixel_stride);
            let row_dst = ring_ptr.add((pixel % ring_rows) * n_times);

            for dim in 0..n_times {
                let mut sum = *coefs.get_unchecked(0) * *inptr.add(dim);

                for k in 1..=HALF {
                    let (fw, bw) = *rows.get_unchecked(k - 1);
                    let fw_v = *input.add(fw * pixel_stride + dim);
                    let bw_v = *input.add(bw * pixel_stride + dim);
                    sum = mlaf(sum, *coefs.get_unchecked(k), symm_sum::<SYMM>(fw_v, bw_v));
                }

                *row_dst.add(dim) = sum;
            }

            if pixel >= HALF {
                let write_row = ring_ptr.add(((pixel + 1) % ring_rows) * n_times);
                std::ptr::copy_nonoverlapping(
                    write_row as *const f32,
                    output.add((pixel - HALF) * pixel_stride),
                    n_times,
                );
            }
        }

        for i in 0..HALF {
            let pixel = n_pixels + i;
            let write_row = ring_ptr.add(((pixel + 1) % ring_rows) * n_times);
            std::ptr::copy_nonoverlapping(
                write_row as *const f32,
                output.add((pixel - HALF) * pixel_stride),
                n_times,
            );
        }
    }
}
