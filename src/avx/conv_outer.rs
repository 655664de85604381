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
use crate::avx::utils::{
    _mm256_opt_fmlaf_ps, _mm256_remainder_mask_si256, _mm256_symm_sum_ps,
};
use crate::conv_outer::tap_rows;
use crate::kernel::Kernel;
use crate::scratch::AlignedBuf;
use std::arch::x86_64::*;

/// Convolves along a strided axis, 8 f32 lanes across the orthogonal
/// contiguous axis with a masked remainder. Result rows ride a ring of
/// `HALF + 1` rows and leave it one axis step late, so `input` and `output`
/// may be the same buffer.
///
/// # Safety
///
/// Same contract as [crate::conv_outer::convolve_outer_scalar], plus a CPU
/// with avx2.
pub(crate) unsafe fn convolve_outer_avx<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        if std::arch::is_x86_feature_detected!("fma") {
            convolve_outer_avx_fma::<SYMM, HALF>(
                input,
                n_pixels,
                pixel_stride,
                n_times,
                output,
                kernel,
            );
        } else {
            convolve_outer_avx_def::<SYMM, HALF>(
                input,
                n_pixels,
                pixel_stride,
                n_times,
                output,
                kernel,
            );
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn convolve_outer_avx_def<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        let unit = ExecutionUnit::<false, SYMM, HALF>::default();
        unit.pass(input, n_pixels, pixel_stride, n_times, output, kernel);
    }
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn convolve_outer_avx_fma<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        let unit = ExecutionUnit::<true, SYMM, HALF>::default();
        unit.pass(input, n_pixels, pixel_stride, n_times, output, kernel);
    }
}

#[derive(Copy, Clone, Default)]
struct ExecutionUnit<const FMA: bool, const SYMM: bool, const HALF: usize> {}

impl<const FMA: bool, const SYMM: bool, const HALF: usize> ExecutionUnit<FMA, SYMM, HALF> {
    #[inline(always)]
    unsafe fn pass(
        &self,
        input: *const f32,
        n_pixels: usize,
        pixel_stride: usize,
        n_times: usize,
        output: *mut f32,
        kernel: &Kernel,
    ) {
        unsafe {
            debug_assert_eq!(kernel.half_len(), HALF);
            let dim_avx_end = n_times & !7;
            let dim_left = n_times - dim_avx_end;
            // rows are padded to the vector width so remainder stores can
            // stay full and aligned
            let n_dims_aligned = (n_times + 8) & !7;
            let mask = _mm256_remainder_mask_si256(dim_left);

            let ring_rows = HALF + 1;
            let mut ring = AlignedBuf::zeroed(ring_rows * n_dims_aligned);
            let ring_ptr = ring.as_mut_ptr();
            let coefs = kernel.coefs.as_slice();

            for pixel in 0..n_pixels {
                let rows = tap_rows::<HALF>(pixel, n_pixels);
                let inptr = input.add(pixel * pixel_stride);
                let row_dst = ring_ptr.add((pixel % ring_rows) * n_dims_aligned);

                let mut dim = 0usize;
                while dim < dim_avx_end {
                    let mut result = _mm256_mul_ps(
                        _mm256_loadu_ps(inptr.add(dim)),
                        _mm256_set1_ps(*coefs.get_unchecked(0)),
                    );

                    for k in 1..=HALF {
                        let (fw, bw) = *rows.get_unchecked(k - 1);
                        let pixels = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(input.add(fw * pixel_stride + dim)),
                            _mm256_loadu_ps(input.add(bw * pixel_stride + dim)),
                        );
                        result = _mm256_opt_fmlaf_ps::<FMA>(
                            result,
                            pixels,
                            _mm256_set1_ps(*coefs.get_unchecked(k)),
                        );
                    }

                    _mm256_store_ps(row_dst.add(dim), result);
                    dim += 8;
                }

                if dim_left > 0 {
                    let mut result = _mm256_mul_ps(
                        _mm256_maskload_ps(inptr.add(dim), mask),
                        _mm256_set1_ps(*coefs.get_unchecked(0)),
                    );

                    for k in 1..=HALF {
                        let (fw, bw) = *rows.get_unchecked(k - 1);
                        let pixels = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_maskload_ps(input.add(fw * pixel_stride + dim), mask),
                            _mm256_maskload_ps(input.add(bw * pixel_stride + dim), mask),
                        );
                        result = _mm256_opt_fmlaf_ps::<FMA>(
                            result,
                            pixels,
                            _mm256_set1_ps(*coefs.get_unchecked(k)),
                        );
                    }

                    _mm256_store_ps(row_dst.add(dim), result);
                }

                if pixel >= HALF {
                    let write_row = ring_ptr.add(((pixel + 1) % ring_rows) * n_dims_aligned);
                    std::ptr::copy_nonoverlapping(
                        write_row as *const f32,
                        output.add((pixel - HALF) * pixel_stride),
                        n_times,
                    );
                }
            }

            for i in 0..HALF {
                let pixel = n_pixels + i;
                let write_row = ring_ptr.add(((pixel + 1) % ring_rows) * n_dims_aligned);
                std::ptr::copy_nonoverlapping(
                    write_row as *const f32,
                    output.add((pixel - HALF) * pixel_stride),
                    n_times,
                );
            }
        }
    }
}
