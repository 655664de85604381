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
//! Fast single-precision FIR convolution along one axis of a pixel array,
//! for kernels that are symmetric or antisymmetric about their center tap.
//!
//! [convolve_inner] runs along the contiguous axis, [convolve_outer] along a
//! strided one; the `_in_place` variants convolve a buffer into itself.
//! Borders are extended by mirroring without duplicating the edge sample.
//!
//! ```
//! use fastfir::{convolve_inner, Kernel};
//!
//! let kernel = Kernel::symmetric(vec![0.5f32, 0.25]).unwrap();
//! let src = vec![2f32; 64];
//! let mut dst = vec![0f32; 64];
//! convolve_inner(&src, &mut dst, 64, 1, 64, &kernel).unwrap();
//! // unit DC gain: 0.5 + 2 * 0.25
//! assert!(dst.iter().all(|&v| (v - 2.0).abs() < 1e-5));
//! ```
#![allow(clippy::too_many_arguments, clippy::len_without_is_empty)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod conv_inner;
mod conv_outer;
mod convolve;
mod dispatch;
mod kernel;
mod mirror;
mod mlaf;
mod scratch;
mod util;

pub use convolve::{
    convolve_inner, convolve_inner_in_place, convolve_outer, convolve_outer_in_place,
};
pub use kernel::{Kernel, MAX_HALF_LEN};
pub use util::{ConvolveError, MismatchedSize};
