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
use crate::conv_inner::convolve_inner_scalar;
use crate::conv_outer::convolve_outer_scalar;
use crate::kernel::Kernel;
use crate::util::ConvolveError;

pub(crate) type InnerHandler = unsafe fn(*const f32, usize, usize, usize, *mut f32, &Kernel);
pub(crate) type OuterHandler = unsafe fn(*const f32, usize, usize, usize, *mut f32, &Kernel);

/// The tap loops are fully unrolled per half-length at build time; a runtime
/// half-length picks its instance here.
macro_rules! unrolled_taps {
    ($half_len:expr, $engine:ident, $handler:ty) => {
        match $half_len {
            1 => Ok($engine::<SYMM, 1> as $handler),
            2 => Ok($engine::<SYMM, 2> as $handler),
            3 => Ok($engine::<SYMM, 3> as $handler),
            4 => Ok($engine::<SYMM, 4> as $handler),
            5 => Ok($engine::<SYMM, 5> as $handler),
            6 => Ok($engine::<SYMM, 6> as $handler),
            7 => Ok($engine::<SYMM, 7> as $handler),
            8 => Ok($engine::<SYMM, 8> as $handler),
            9 => Ok($engine::<SYMM, 9> as $handler),
            10 => Ok($engine::<SYMM, 10> as $handler),
            11 => Ok($engine::<SYMM, 11> as $handler),
            12 => Ok($engine::<SYMM, 12> as $handler),
            _ => Err(ConvolveError::UnsupportedKernelLength($half_len)),
        }
    };
}

pub(crate) fn get_inner_handler(
    half_len: usize,
    is_symmetric_kernel: bool,
) -> Result<InnerHandler, ConvolveError> {
    if is_symmetric_kernel {
        inner_handler::<true>(half_len)
    } else {
        inner_handler::<false>(half_len)
    }
}

fn inner_handler<const SYMM: bool>(half_len: usize) -> Result<InnerHandler, ConvolveError> {
    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    if std::arch::is_x86_feature_detected!("avx2") {
        use crate::avx::convolve_inner_avx;
        return unrolled_taps!(half_len, convolve_inner_avx, InnerHandler);
    }
    unrolled_taps!(half_len, convolve_inner_scalar, InnerHandler)
}

pub(crate) fn get_outer_handler(
    half_len: usize,
    is_symmetric_kernel: bool,
) -> Result<OuterHandler, ConvolveError> {
    if is_symmetric_kernel {
        outer_handler::<true>(half_len)
    } else {
        outer_handler::<false>(half_len)
    }
}

fn outer_handler<const SYMM: bool>(half_len: usize) -> Result<OuterHandler, ConvolveError> {
    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    if std::arch::is_x86_feature_detected!("avx2") {
        use crate::avx::convolve_outer_avx;
        return unrolled_taps!(half_len, convolve_outer_avx, OuterHandler);
    }
    unrolled_taps!(half_len, convolve_outer_scalar, OuterHandler)
}
