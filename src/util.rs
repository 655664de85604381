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
use crate::kernel::Kernel;
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConvolveError {
    ZeroBaseSize,
    EmptyKernel,
    UnsupportedKernelLength(usize),
    LineTooShort(MismatchedSize),
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
}

impl Error for ConvolveError {}

impl std::fmt::Display for ConvolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConvolveError::ZeroBaseSize => f.write_str("Array size must not be zero"),
            ConvolveError::EmptyKernel => f.write_str("Kernel must have a center tap"),
            ConvolveError::UnsupportedKernelLength(half_len) => f.write_fmt(format_args!(
                "Kernel half-length must be in 1..=12, but received {half_len}",
            )),
            ConvolveError::LineTooShort(size) => f.write_fmt(format_args!(
                "Convolution axis must have at least {} samples for this kernel but has {}",
                size.expected, size.received
            )),
            ConvolveError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ConvolveError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
        }
    }
}

/// Verifies that the kernel reach never leaves the mirrored axis.
pub(crate) fn check_kernel_reach(kernel: &Kernel, n_pixels: usize) -> Result<(), ConvolveError> {
    if n_pixels < 2 * kernel.half_len() {
        return Err(ConvolveError::LineTooShort(MismatchedSize {
            expected: 2 * kernel.half_len(),
            received: n_pixels,
        }));
    }
    Ok(())
}

pub(crate) fn check_inner_layout(
    arr: &[f32],
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
) -> Result<(), ConvolveError> {
    if n_pixels == 0 || n_times == 0 {
        return Err(ConvolveError::ZeroBaseSize);
    }
    if line_stride < n_pixels {
        return Err(ConvolveError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: n_pixels,
            received: line_stride,
        }));
    }
    let required = (n_times - 1) * line_stride + n_pixels;
    if arr.len() < required {
        return Err(ConvolveError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

pub(crate) fn check_outer_layout(
    arr: &[f32],
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
) -> Result<(), ConvolveError> {
    if n_pixels == 0 || n_times == 0 {
        return Err(ConvolveError::ZeroBaseSize);
    }
    if pixel_stride < n_times {
        return Err(ConvolveError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: n_times,
            received: pixel_stride,
        }));
    }
    let required = (n_pixels - 1) * pixel_stride + n_times;
    if arr.len() < required {
        return Err(ConvolveError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}
