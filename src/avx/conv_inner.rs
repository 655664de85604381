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
use crate::avx::utils::{_mm256_opt_fmlaf_ps, _mm256_symm_sum_ps};
use crate::conv_inner::{convolve_line_mirrored, RING_LEN};
use crate::kernel::{symm_sum, Kernel};
use crate::mirror::{reflect_left, reflect_right};
use crate::mlaf::mlaf;
use crate::scratch::AlignedBuf;
use std::arch::x86_64::*;

/// Convolves `n_times` lines along the contiguous axis, 8 f32 lanes per
/// vector. Results trail the reads by one 32 sample block through an aligned
/// ring, so `input` and `output` may be the same buffer.
///
/// # Safety
///
/// Same contract as [crate::conv_inner::convolve_inner_scalar], plus a CPU
/// with avx2.
pub(crate) unsafe fn convolve_inner_avx<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        if std::arch::is_x86_feature_detected!("fma") {
            convolve_inner_avx_fma::<SYMM, HALF>(
                input,
                n_pixels,
                n_times,
                line_stride,
                output,
                kernel,
            );
        } else {
            convolve_inner_avx_def::<SYMM, HALF>(
                input,
                n_pixels,
                n_times,
                line_stride,
                output,
                kernel,
            );
        }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn convolve_inner_avx_def<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        let unit = ExecutionUnit::<false, SYMM, HALF>::default();
        unit.pass(input, n_pixels, n_times, line_stride, output, kernel);
    }
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn convolve_inner_avx_fma<const SYMM: bool, const HALF: usize>(
    input: *const f32,
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    output: *mut f32,
    kernel: &Kernel,
) {
    unsafe {
        let unit = ExecutionUnit::<true, SYMM, HALF>::default();
        unit.pass(input, n_pixels, n_times, line_stride, output, kernel);
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
        n_times: usize,
        line_stride: usize,
        output: *mut f32,
        kernel: &Kernel,
    ) {
        unsafe {
            debug_assert_eq!(kernel.half_len(), HALF);
            let avx_end = (n_pixels - HALF) & !31;
            let avx_end_single = (n_pixels - HALF) & !7;
            let border_end = (HALF + 7) & !7;
            let coefs = kernel.coefs.as_slice();

            if avx_end_single < RING_LEN {
                // not enough samples for even one 32 px block
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

            for dim in 0..n_times {
                let cur_input = input.add(dim * line_stride);
                let cur_output = output.add(dim * line_stride);

                // kernels here are short (<= 12 one-sided taps), the scalar
                // left border costs nothing against the main loop
                for i in 0..border_end {
                    let mut sum = *coefs.get_unchecked(0) * *cur_input.add(i);

                    for k in 1..=HALF {
                        let left = if i < k {
                            *cur_input.add(reflect_left(i, k))
                        } else {
                            *cur_input.add(i - k)
                        };
                        sum = mlaf(
                            sum,
                            *coefs.get_unchecked(k),
                            symm_sum::<SYMM>(*cur_input.add(i + k), left),
                        );
                    }

                    *tmp.add(i) = sum;
                }

                // align the main loop start to a 32 px boundary
                let mut i = border_end;
                while i < RING_LEN {
                    let mut result = _mm256_mul_ps(
                        _mm256_loadu_ps(cur_input.add(i)),
                        _mm256_set1_ps(*coefs.get_unchecked(0)),
                    );

                    for k in 1..=HALF {
                        let pixels = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k)),
                            _mm256_loadu_ps(cur_input.add(i - k)),
                        );
                        result = _mm256_opt_fmlaf_ps::<FMA>(
                            result,
                            pixels,
                            _mm256_set1_ps(*coefs.get_unchecked(k)),
                        );
                    }

                    _mm256_store_ps(tmp.add(i), result);
                    i += 8;
                }

                // main loop, 32 px per iteration; the 32 results of the
                // previous iteration leave the scratch only after all reads
                // of the current one, so the output may alias the input
                while i < avx_end {
                    let coeff = _mm256_set1_ps(*coefs.get_unchecked(0));
                    let mut k0 = _mm256_mul_ps(_mm256_loadu_ps(cur_input.add(i)), coeff);
                    let mut k1 = _mm256_mul_ps(_mm256_loadu_ps(cur_input.add(i + 8)), coeff);
                    let mut k2 = _mm256_mul_ps(_mm256_loadu_ps(cur_input.add(i + 16)), coeff);
                    let mut k3 = _mm256_mul_ps(_mm256_loadu_ps(cur_input.add(i + 24)), coeff);

                    // kernel[-k] * x[i-k] + kernel[k] * x[i+k]
                    //    == (x[i+k] ± x[i-k]) * kernel[k]
                    for k in 1..=HALF {
                        let coeff = _mm256_set1_ps(*coefs.get_unchecked(k));

                        let p0 = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k)),
                            _mm256_loadu_ps(cur_input.add(i - k)),
                        );
                        let p1 = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k + 8)),
                            _mm256_loadu_ps(cur_input.add(i - k + 8)),
                        );
                        let p2 = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k + 16)),
                            _mm256_loadu_ps(cur_input.add(i - k + 16)),
                        );
                        let p3 = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k + 24)),
                            _mm256_loadu_ps(cur_input.add(i - k + 24)),
                        );

                        k0 = _mm256_opt_fmlaf_ps::<FMA>(k0, p0, coeff);
                        k1 = _mm256_opt_fmlaf_ps::<FMA>(k1, p1, coeff);
                        k2 = _mm256_opt_fmlaf_ps::<FMA>(k2, p2, coeff);
                        k3 = _mm256_opt_fmlaf_ps::<FMA>(k3, p3, coeff);
                    }

                    _mm256_storeu_ps(cur_output.add(i - 32), _mm256_load_ps(tmp));
                    _mm256_storeu_ps(cur_output.add(i - 24), _mm256_load_ps(tmp.add(8)));
                    _mm256_storeu_ps(cur_output.add(i - 16), _mm256_load_ps(tmp.add(16)));
                    _mm256_storeu_ps(cur_output.add(i - 8), _mm256_load_ps(tmp.add(24)));
                    _mm256_store_ps(tmp, k0);
                    _mm256_store_ps(tmp.add(8), k1);
                    _mm256_store_ps(tmp.add(16), k2);
                    _mm256_store_ps(tmp.add(24), k3);

                    i += 32;
                }

                // 8 px tail, scratch becomes a 32 slot ring
                let mut ring = 0usize;
                while i < avx_end_single {
                    let mut result = _mm256_mul_ps(
                        _mm256_loadu_ps(cur_input.add(i)),
                        _mm256_set1_ps(*coefs.get_unchecked(0)),
                    );

                    for k in 1..=HALF {
                        let pixels = _mm256_symm_sum_ps::<SYMM>(
                            _mm256_loadu_ps(cur_input.add(i + k)),
                            _mm256_loadu_ps(cur_input.add(i - k)),
                        );
                        result = _mm256_opt_fmlaf_ps::<FMA>(
                            result,
                            pixels,
                            _mm256_set1_ps(*coefs.get_unchecked(k)),
                        );
                    }

                    ring &= 31;
                    _mm256_storeu_ps(cur_output.add(i - 32), _mm256_load_ps(tmp.add(ring)));
                    _mm256_store_ps(tmp.add(ring), result);

                    i += 8;
                    ring += 8;
                }

                // scalar tail, the right edge mirrors here
                while i < n_pixels {
                    let mut sum = *coefs.get_unchecked(0) * *cur_input.add(i);

                    for k in 1..=HALF {
                        let right = if i + k >= n_pixels {
                            *cur_input.add(reflect_right(i, k, n_pixels))
                        } else {
                            *cur_input.add(i + k)
                        };
                        sum = mlaf(
                            sum,
                            *coefs.get_unchecked(k),
                            symm_sum::<SYMM>(right, *cur_input.add(i - k)),
                        );
                    }

                    ring &= 31;
                    *cur_output.add(i - 32) = *tmp.add(ring);
                    *tmp.add(ring) = sum;

                    i += 1;
                    ring += 1;
                }

                // drain what the delayed write-back still holds
                for j in n_pixels - 32..n_pixels {
                    *cur_output.add(j) = *tmp.add(ring & 31);
                    ring += 1;
                }
            }
        }
    }
}
