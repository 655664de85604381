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
use crate::dispatch::{get_inner_handler, get_outer_handler};
use crate::kernel::Kernel;
use crate::util::{check_inner_layout, check_kernel_reach, check_outer_layout, ConvolveError};

/// Convolves `n_times` independent lines of `n_pixels` samples each along the
/// contiguous axis.
///
/// Samples past either end of a line are mirrored about the edge sample
/// without duplicating it. The kernel must be reflective, see [Kernel]; its
/// symmetry halves the multiply count against a plain `2 * half_len + 1` tap
/// convolution. On CPUs with fma the taps are accumulated fused, which
/// changes rounding against the multiply-then-add fallback.
///
/// # Arguments
///
/// * `src`: Source samples
/// * `dst`: Destination samples, same layout as `src`
/// * `n_pixels`: Line length, must be at least `2 * kernel.half_len()`
/// * `n_times`: Number of lines
/// * `line_stride`: Distance between the first samples of consecutive lines
/// * `kernel`: See [Kernel], half-length must be in `1..=12`
///
pub fn convolve_inner(
    src: &[f32],
    dst: &mut [f32],
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    kernel: &Kernel,
) -> Result<(), ConvolveError> {
    let handler = get_inner_handler(kernel.half_len(), kernel.is_symmetric())?;
    check_inner_layout(src, n_pixels, n_times, line_stride)?;
    check_inner_layout(dst, n_pixels, n_times, line_stride)?;
    check_kernel_reach(kernel, n_pixels)?;
    unsafe {
        handler(
            src.as_ptr(),
            n_pixels,
            n_times,
            line_stride,
            dst.as_mut_ptr(),
            kernel,
        );
    }
    Ok(())
}

/// Convolves a buffer along the contiguous axis into itself.
///
/// Same semantics as [convolve_inner]; results are carried in a delayed
/// write-back ring, so no sample is overwritten before the last tap that
/// reads it has executed.
pub fn convolve_inner_in_place(
    buf: &mut [f32],
    n_pixels: usize,
    n_times: usize,
    line_stride: usize,
    kernel: &Kernel,
) -> Result<(), ConvolveError> {
    let handler = get_inner_handler(kernel.half_len(), kernel.is_symmetric())?;
    check_inner_layout(buf, n_pixels, n_times, line_stride)?;
    check_kernel_reach(kernel, n_pixels)?;
    let ptr = buf.as_mut_ptr();
    unsafe {
        handler(ptr as *const f32, n_pixels, n_times, line_stride, ptr, kernel);
    }
    Ok(())
}

/// Convolves along a strided axis of `n_pixels` positions, each position
/// holding `n_times` contiguous samples of the orthogonal axis.
///
/// Boundary handling, kernel contract and rounding notes match
/// [convolve_inner]; the vectorization spans the orthogonal axis instead of
/// the convolution axis.
///
/// # Arguments
///
/// * `src`: Source samples
/// * `dst`: Destination samples, same layout as `src`
/// * `n_pixels`: Length along the convolution axis, must be at least
///   `2 * kernel.half_len()`
/// * `pixel_stride`: Distance between consecutive positions of the
///   convolution axis
/// * `n_times`: Width of the orthogonal contiguous axis
/// * `kernel`: See [Kernel], half-length must be in `1..=12`
///
pub fn convolve_outer(
    src: &[f32],
    dst: &mut [f32],
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    kernel: &Kernel,
) -> Result<(), ConvolveError> {
    let handler = get_outer_handler(kernel.half_len(), kernel.is_symmetric())?;
    check_outer_layout(src, n_pixels, pixel_stride, n_times)?;
    check_outer_layout(dst, n_pixels, pixel_stride, n_times)?;
    check_kernel_reach(kernel, n_pixels)?;
    unsafe {
        handler(
            src.as_ptr(),
            n_pixels,
            pixel_stride,
            n_times,
            dst.as_mut_ptr(),
            kernel,
        );
    }
    Ok(())
}

/// Convolves a buffer along a strided axis into itself.
///
/// Same semantics as [convolve_outer]; pending result rows ride a ring of
/// `half_len + 1` rows and reach the output one axis step late, which keeps
/// the aliased reads correct.
pub fn convolve_outer_in_place(
    buf: &mut [f32],
    n_pixels: usize,
    pixel_stride: usize,
    n_times: usize,
    kernel: &Kernel,
) -> Result<(), ConvolveError> {
    let handler = get_outer_handler(kernel.half_len(), kernel.is_symmetric())?;
    check_outer_layout(buf, n_pixels, pixel_stride, n_times)?;
    check_kernel_reach(kernel, n_pixels)?;
    let ptr = buf.as_mut_ptr();
    unsafe {
        handler(ptr as *const f32, n_pixels, pixel_stride, n_times, ptr, kernel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::MismatchedSize;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Straightforward double precision rendition of the symmetric tap
    /// formula and the mirror boundary, the ground truth for every engine.
    fn reference_line(input: &[f32], kernel: &Kernel) -> Vec<f32> {
        let n = input.len();
        let half = kernel.half_len();
        let coefs = kernel.coefs();
        let mut out = vec![0f32; n];
        for (i, dst) in out.iter_mut().enumerate() {
            let mut sum = coefs[0] as f64 * input[i] as f64;
            for k in 1..=half {
                let left = input[if i < k { k - i } else { i - k }] as f64;
                let right = input[if i + k >= n {
                    n - ((i + k) % n) - 2
                } else {
                    i + k
                }] as f64;
                let pair = if kernel.is_symmetric() {
                    right + left
                } else {
                    right - left
                };
                sum += coefs[k] as f64 * pair;
            }
            *dst = sum as f32;
        }
        out
    }

    fn assert_close(expected: &[f32], actual: &[f32], tol: f32, what: &str) {
        assert_eq!(expected.len(), actual.len(), "{what}: length mismatch");
        for (i, (&e, &a)) in expected.iter().zip(actual.iter()).enumerate() {
            let diff = (e - a).abs();
            assert!(
                diff <= tol * e.abs().max(1.0),
                "{what}: mismatch at {i}: expected {e}, got {a}, diff {diff}"
            );
        }
    }

    fn random_kernel(rng: &mut StdRng, half_len: usize, symmetric: bool) -> Kernel {
        let coefs: Vec<f32> = (0..=half_len).map(|_| rng.gen_range(-1f32..1f32)).collect();
        if symmetric {
            Kernel::symmetric(coefs).unwrap()
        } else {
            Kernel::antisymmetric(coefs).unwrap()
        }
    }

    fn random_buffer(rng: &mut StdRng, len: usize) -> Vec<f32> {
        (0..len).map(|_| rng.gen_range(-1f32..1f32)).collect()
    }

    fn transpose(src: &[f32], rows: usize, cols: usize) -> Vec<f32> {
        let mut out = vec![0f32; src.len()];
        for y in 0..rows {
            for x in 0..cols {
                out[x * rows + y] = src[y * cols + x];
            }
        }
        out
    }

    #[test]
    fn inner_concrete_symmetric_example() {
        let kernel = Kernel::symmetric(vec![1.0, 0.5]).unwrap();
        let src: Vec<f32> = (1..=10).map(|v| v as f32).collect();
        let mut dst = vec![0f32; 10];
        convolve_inner(&src, &mut dst, 10, 1, 10, &kernel).unwrap();
        assert_eq!(dst[0], 3.0);
        assert_eq!(dst[1], 4.0);
        assert_close(&reference_line(&src, &kernel), &dst, 1e-6, "short line");
    }

    #[test]
    fn inner_dc_gain_all_half_lengths() {
        for half_len in 1..=12usize {
            let coefs: Vec<f32> = (0..=half_len).map(|k| 1.0 / (k + 1) as f32).collect();
            let gain: f32 = coefs[0] + 2.0 * coefs[1..].iter().sum::<f32>();
            let kernel = Kernel::symmetric(coefs).unwrap();

            for n_pixels in [2 * half_len, 96] {
                let stride = n_pixels + 4;
                let src = vec![3.25f32; 2 * stride + n_pixels];
                let mut dst = vec![0f32; src.len()];
                convolve_inner(&src, &mut dst, n_pixels, 3, stride, &kernel).unwrap();
                for line in 0..3 {
                    for (i, &v) in dst[line * stride..line * stride + n_pixels].iter().enumerate() {
                        let expected = 3.25 * gain;
                        assert!(
                            (v - expected).abs() <= 1e-4,
                            "half_len {half_len}, n {n_pixels}, line {line}, sample {i}: {v} vs {expected}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn outer_dc_gain_all_half_lengths() {
        for half_len in 1..=12usize {
            let coefs: Vec<f32> = (0..=half_len).map(|k| 1.0 / (k + 1) as f32).collect();
            let gain: f32 = coefs[0] + 2.0 * coefs[1..].iter().sum::<f32>();
            let kernel = Kernel::symmetric(coefs).unwrap();

            let n_pixels = 40;
            let n_times = 11;
            let src = vec![1.5f32; n_pixels * n_times];
            let mut dst = vec![0f32; src.len()];
            convolve_outer(&src, &mut dst, n_pixels, n_times, n_times, &kernel).unwrap();
            for (i, &v) in dst.iter().enumerate() {
                let expected = 1.5 * gain;
                assert!(
                    (v - expected).abs() <= 1e-4,
                    "half_len {half_len}, sample {i}: {v} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn antisymmetric_constant_is_zero() {
        for half_len in 1..=12usize {
            let mut coefs: Vec<f32> = (0..=half_len).map(|k| 0.3 / (k + 1) as f32).collect();
            coefs[0] = 0.0;
            let kernel = Kernel::antisymmetric(coefs).unwrap();

            let n_pixels = 72;
            let src = vec![5f32; n_pixels * 4];
            let mut dst = vec![1f32; src.len()];
            convolve_inner(&src, &mut dst, n_pixels, 4, n_pixels, &kernel).unwrap();
            assert!(dst.iter().all(|v| v.abs() <= 1e-5));

            let mut dst = vec![1f32; src.len()];
            convolve_outer(&src, &mut dst, n_pixels, 4, 4, &kernel).unwrap();
            assert!(dst.iter().all(|v| v.abs() <= 1e-5));
        }
    }

    #[test]
    fn inner_in_place_matches_out_of_place() {
        let mut rng = StdRng::seed_from_u64(821);
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                for n_pixels in [2 * half_len, 100] {
                    let stride = n_pixels + 3;
                    let src = random_buffer(&mut rng, stride + n_pixels);
                    let mut dst = vec![0f32; src.len()];
                    convolve_inner(&src, &mut dst, n_pixels, 2, stride, &kernel).unwrap();

                    let mut buf = src.clone();
                    convolve_inner_in_place(&mut buf, n_pixels, 2, stride, &kernel).unwrap();

                    for line in 0..2 {
                        assert_close(
                            &dst[line * stride..line * stride + n_pixels],
                            &buf[line * stride..line * stride + n_pixels],
                            1e-5,
                            &format!("half_len {half_len}, symm {symmetric}, n {n_pixels}"),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn outer_in_place_matches_out_of_place() {
        let mut rng = StdRng::seed_from_u64(822);
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                for n_pixels in [2 * half_len, 37] {
                    for n_times in [5usize, 16] {
                        let stride = n_times + 2;
                        let src = random_buffer(&mut rng, (n_pixels - 1) * stride + n_times);
                        let mut dst = vec![0f32; src.len()];
                        convolve_outer(&src, &mut dst, n_pixels, stride, n_times, &kernel)
                            .unwrap();

                        let mut buf = src.clone();
                        convolve_outer_in_place(&mut buf, n_pixels, stride, n_times, &kernel)
                            .unwrap();

                        for pixel in 0..n_pixels {
                            assert_close(
                                &dst[pixel * stride..pixel * stride + n_times],
                                &buf[pixel * stride..pixel * stride + n_times],
                                1e-5,
                                &format!(
                                    "half_len {half_len}, symm {symmetric}, n {n_pixels}x{n_times}"
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn rejects_unsupported_half_lengths_without_writing() {
        for half_len in [0usize, 13, 25] {
            let kernel = Kernel::symmetric(vec![0.25f32; half_len + 1]).unwrap();
            let src = vec![1f32; 64 * 4];
            let mut dst = vec![7.75f32; 64 * 4];

            assert_eq!(
                convolve_inner(&src, &mut dst, 64, 4, 64, &kernel).unwrap_err(),
                ConvolveError::UnsupportedKernelLength(half_len)
            );
            assert!(dst.iter().all(|&v| v == 7.75));

            assert_eq!(
                convolve_outer(&src, &mut dst, 64, 4, 4, &kernel).unwrap_err(),
                ConvolveError::UnsupportedKernelLength(half_len)
            );
            assert!(dst.iter().all(|&v| v == 7.75));
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        let kernel = Kernel::symmetric(vec![1.0, 0.5, 0.25]).unwrap();
        let src = vec![0f32; 64];
        let mut dst = vec![0f32; 64];

        assert_eq!(
            convolve_inner(&src, &mut dst, 0, 4, 16, &kernel).unwrap_err(),
            ConvolveError::ZeroBaseSize
        );
        assert_eq!(
            convolve_inner(&src, &mut dst, 16, 0, 16, &kernel).unwrap_err(),
            ConvolveError::ZeroBaseSize
        );
        assert_eq!(
            convolve_inner(&src, &mut dst, 3, 1, 3, &kernel).unwrap_err(),
            ConvolveError::LineTooShort(MismatchedSize {
                expected: 4,
                received: 3
            })
        );
        assert_eq!(
            convolve_inner(&src, &mut dst, 16, 4, 8, &kernel).unwrap_err(),
            ConvolveError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: 16,
                received: 8
            })
        );
        assert_eq!(
            convolve_inner(&src, &mut dst, 16, 5, 16, &kernel).unwrap_err(),
            ConvolveError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 80,
                received: 64
            })
        );
        assert_eq!(
            convolve_outer(&src, &mut dst, 16, 2, 4, &kernel).unwrap_err(),
            ConvolveError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: 4,
                received: 2
            })
        );
        assert_eq!(
            convolve_outer(&src, &mut dst, 32, 4, 4, &kernel).unwrap_err(),
            ConvolveError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 128,
                received: 64
            })
        );
    }

    #[test]
    fn outer_matches_transposed_inner() {
        let mut rng = StdRng::seed_from_u64(823);
        let height = 48usize;
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                for width in [1usize, 3, 7, 8, 9, 16, 17, 31] {
                    let src = random_buffer(&mut rng, height * width);
                    let mut dst = vec![0f32; src.len()];
                    convolve_outer(&src, &mut dst, height, width, width, &kernel).unwrap();

                    let flipped = transpose(&src, height, width);
                    let mut flipped_dst = vec![0f32; src.len()];
                    convolve_inner(&flipped, &mut flipped_dst, height, width, height, &kernel)
                        .unwrap();
                    let expected = transpose(&flipped_dst, width, height);

                    assert_close(
                        &expected,
                        &dst,
                        1e-4,
                        &format!("half_len {half_len}, symm {symmetric}, width {width}"),
                    );
                }
            }
        }
    }

    #[test]
    fn inner_matches_reference() {
        let mut rng = StdRng::seed_from_u64(824);
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                for n_pixels in [
                    2 * half_len,
                    4 * half_len,
                    4 * half_len + 3,
                    50,
                    71,
                    100,
                    257,
                ] {
                    if n_pixels < 2 * half_len {
                        continue;
                    }
                    let stride = n_pixels + 5;
                    let src = random_buffer(&mut rng, 2 * stride + n_pixels);
                    let mut dst = vec![0f32; src.len()];
                    convolve_inner(&src, &mut dst, n_pixels, 3, stride, &kernel).unwrap();

                    let mut buf = src.clone();
                    convolve_inner_in_place(&mut buf, n_pixels, 3, stride, &kernel).unwrap();

                    for line in 0..3 {
                        let expected =
                            reference_line(&src[line * stride..line * stride + n_pixels], &kernel);
                        let what =
                            format!("half_len {half_len}, symm {symmetric}, n {n_pixels}, line {line}");
                        assert_close(
                            &expected,
                            &dst[line * stride..line * stride + n_pixels],
                            1e-4,
                            &what,
                        );
                        assert_close(
                            &expected,
                            &buf[line * stride..line * stride + n_pixels],
                            1e-4,
                            &format!("{what}, in place"),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn outer_matches_reference() {
        let mut rng = StdRng::seed_from_u64(825);
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                for n_pixels in [2 * half_len, 3 * half_len + 1, 29] {
                    if n_pixels < 2 * half_len {
                        continue;
                    }
                    for n_times in [4usize, 8, 13] {
                        let stride = n_times + 3;
                        let src = random_buffer(&mut rng, (n_pixels - 1) * stride + n_times);
                        let mut dst = vec![0f32; src.len()];
                        convolve_outer(&src, &mut dst, n_pixels, stride, n_times, &kernel)
                            .unwrap();

                        let mut buf = src.clone();
                        convolve_outer_in_place(&mut buf, n_pixels, stride, n_times, &kernel)
                            .unwrap();

                        for column in 0..n_times {
                            let line: Vec<f32> =
                                (0..n_pixels).map(|p| src[p * stride + column]).collect();
                            let expected = reference_line(&line, &kernel);
                            let got: Vec<f32> =
                                (0..n_pixels).map(|p| dst[p * stride + column]).collect();
                            let got_in_place: Vec<f32> =
                                (0..n_pixels).map(|p| buf[p * stride + column]).collect();
                            let what = format!(
                                "half_len {half_len}, symm {symmetric}, n {n_pixels}x{n_times}, column {column}"
                            );
                            assert_close(&expected, &got, 1e-4, &what);
                            assert_close(&expected, &got_in_place, 1e-4, &format!("{what}, in place"));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn tail_region_matches_reference() {
        // line lengths leaving a non-empty scalar tail after the vector
        // loops, where the original mixed another center tap in
        let mut rng = StdRng::seed_from_u64(826);
        for half_len in 1..=12usize {
            for symmetric in [true, false] {
                let kernel = random_kernel(&mut rng, half_len, symmetric);
                let n_pixels = 64 + half_len + 5;
                let src = random_buffer(&mut rng, n_pixels);
                let mut dst = vec![0f32; n_pixels];
                convolve_inner(&src, &mut dst, n_pixels, 1, n_pixels, &kernel).unwrap();

                let expected = reference_line(&src, &kernel);
                let tail = n_pixels - (2 * half_len + 8);
                assert_close(
                    &expected[tail..],
                    &dst[tail..],
                    1e-4,
                    &format!("half_len {half_len}, symm {symmetric}, tail"),
                );
                assert_close(&expected, &dst, 1e-4, "whole line");
            }
        }
    }

    #[test]
    fn scalar_engines_match_reference() {
        use crate::conv_inner::convolve_inner_scalar;
        use crate::conv_outer::convolve_outer_scalar;

        let mut rng = StdRng::seed_from_u64(827);

        let kernel = random_kernel(&mut rng, 2, true);
        for n_pixels in [4usize, 24, 90] {
            let src = random_buffer(&mut rng, n_pixels);
            let mut dst = vec![0f32; n_pixels];
            unsafe {
                convolve_inner_scalar::<true, 2>(
                    src.as_ptr(),
                    n_pixels,
                    1,
                    n_pixels,
                    dst.as_mut_ptr(),
                    &kernel,
                );
            }
            assert_close(
                &reference_line(&src, &kernel),
                &dst,
                1e-4,
                &format!("scalar inner, n {n_pixels}"),
            );
        }

        let kernel = random_kernel(&mut rng, 12, false);
        let n_pixels = 101;
        let src = random_buffer(&mut rng, n_pixels);
        let mut buf = src.clone();
        let ptr = buf.as_mut_ptr();
        unsafe {
            convolve_inner_scalar::<false, 12>(ptr as *const f32, n_pixels, 1, n_pixels, ptr, &kernel);
        }
        assert_close(
            &reference_line(&src, &kernel),
            &buf,
            1e-4,
            "scalar inner in place",
        );

        let kernel = random_kernel(&mut rng, 5, true);
        let n_pixels = 23;
        let n_times = 9;
        let src = random_buffer(&mut rng, n_pixels * n_times);
        let mut dst = vec![0f32; src.len()];
        unsafe {
            convolve_outer_scalar::<true, 5>(
                src.as_ptr(),
                n_pixels,
                n_times,
                n_times,
                dst.as_mut_ptr(),
                &kernel,
            );
        }
        for column in 0..n_times {
            let line: Vec<f32> = (0..n_pixels).map(|p| src[p * n_times + column]).collect();
            let got: Vec<f32> = (0..n_pixels).map(|p| dst[p * n_times + column]).collect();
            assert_close(
                &reference_line(&line, &kernel),
                &got,
                1e-4,
                &format!("scalar outer, column {column}"),
            );
        }
    }

    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    #[test]
    fn avx_engines_match_reference() {
        use crate::avx::{convolve_inner_avx, convolve_outer_avx};

        if !std::arch::is_x86_feature_detected!("avx2") {
            return;
        }

        let mut rng = StdRng::seed_from_u64(828);

        let kernel = random_kernel(&mut rng, 3, true);
        let n_pixels = 135;
        let src = random_buffer(&mut rng, n_pixels);
        let mut dst = vec![0f32; n_pixels];
        unsafe {
            convolve_inner_avx::<true, 3>(
                src.as_ptr(),
                n_pixels,
                1,
                n_pixels,
                dst.as_mut_ptr(),
                &kernel,
            );
        }
        assert_close(&reference_line(&src, &kernel), &dst, 1e-4, "avx inner");

        let kernel = random_kernel(&mut rng, 4, false);
        let n_pixels = 41;
        let n_times = 19;
        let src = random_buffer(&mut rng, n_pixels * n_times);
        let mut dst = vec![0f32; src.len()];
        unsafe {
            convolve_outer_avx::<false, 4>(
                src.as_ptr(),
                n_pixels,
                n_times,
                n_times,
                dst.as_mut_ptr(),
                &kernel,
            );
        }
        for column in 0..n_times {
            let line: Vec<f32> = (0..n_pixels).map(|p| src[p * n_times + column]).collect();
            let got: Vec<f32> = (0..n_pixels).map(|p| dst[p * n_times + column]).collect();
            assert_close(
                &reference_line(&line, &kernel),
                &got,
                1e-4,
                &format!("avx outer, column {column}"),
            );
        }
    }
}
