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
use std::arch::x86_64::*;

#[inline(always)]
pub(crate) unsafe fn _mm256_opt_fmlaf_ps<const FMA: bool>(
    a: __m256,
    b: __m256,
    c: __m256,
) -> __m256 {
    if FMA {
        _mm256_fmadd_ps(b, c, a)
    } else {
        _mm256_add_ps(_mm256_mul_ps(b, c), a)
    }
}

/// Folds the two sides of a reflective kernel into one multiplicand,
/// `kernel[-k] == kernel[k]` or `kernel[-k] == -kernel[k]`.
#[inline(always)]
pub(crate) unsafe fn _mm256_symm_sum_ps<const SYMM: bool>(fw: __m256, bw: __m256) -> __m256 {
    if SYMM {
        _mm256_add_ps(fw, bw)
    } else {
        _mm256_sub_ps(fw, bw)
    }
}

/// Load mask for the last partial vector across the orthogonal axis. Valid
/// only for `1..=7` remaining lanes.
#[inline(always)]
pub(crate) unsafe fn _mm256_remainder_mask_si256(lanes: usize) -> __m256i {
    #[inline(always)]
    fn lane_on(lanes: usize, t: usize) -> i32 {
        if lanes >= t {
            -1
        } else {
            0
        }
    }
    _mm256_set_epi32(
        0,
        lane_on(lanes, 7),
        lane_on(lanes, 6),
        lane_on(lanes, 5),
        lane_on(lanes, 4),
        lane_on(lanes, 3),
        lane_on(lanes, 2),
        -1,
    )
}
