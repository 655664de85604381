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
use crate::util::ConvolveError;

/// Largest supported kernel half-length; longer kernels are rejected before
/// any output is written.
pub const MAX_HALF_LEN: usize = 12;

/// One-sided descriptor of a reflective FIR kernel.
///
/// `coefs[0]` is the center tap, `coefs[k]` the tap at offset `+k`. The tap
/// at offset `-k` is implied: equal to `coefs[k]` for a symmetric (even)
/// kernel, `-coefs[k]` for an antisymmetric (odd) one.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    pub(crate) coefs: Vec<f32>,
    is_symmetric: bool,
}

impl Kernel {
    /// Creates an even kernel from its one-sided coefficients, center tap first.
    pub fn symmetric(coefs: Vec<f32>) -> Result<Kernel, ConvolveError> {
        Kernel::new(coefs, true)
    }

    /// Creates an odd kernel from its one-sided coefficients, center tap first.
    pub fn antisymmetric(coefs: Vec<f32>) -> Result<Kernel, ConvolveError> {
        Kernel::new(coefs, false)
    }

    fn new(coefs: Vec<f32>, is_symmetric: bool) -> Result<Kernel, ConvolveError> {
        if coefs.is_empty() {
            return Err(ConvolveError::EmptyKernel);
        }
        Ok(Kernel {
            coefs,
            is_symmetric,
        })
    }

    /// Number of one-sided taps, excluding the center.
    #[inline]
    pub fn half_len(&self) -> usize {
        self.coefs.len() - 1
    }

    /// Full kernel length, `2 * half_len() + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        2 * self.half_len() + 1
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    /// One-sided coefficients, center tap first.
    #[inline]
    pub fn coefs(&self) -> &[f32] {
        &self.coefs
    }

    /// Full-kernel tap at `idx` in `0..len()`, with the antisymmetric sign
    /// applied on the left side.
    #[inline]
    pub fn tap(&self, idx: usize) -> f32 {
        let half = self.half_len();
        if idx >= half {
            self.coefs[idx - half]
        } else if self.is_symmetric {
            self.coefs[half - idx]
        } else {
            -self.coefs[half - idx]
        }
    }
}

#[inline(always)]
pub(crate) fn symm_sum<const SYMM: bool>(fw: f32, bw: f32) -> f32 {
    if SYMM {
        fw + bw
    } else {
        fw - bw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_kernel() {
        assert_eq!(
            Kernel::symmetric(vec![]).unwrap_err(),
            ConvolveError::EmptyKernel
        );
    }

    #[test]
    fn expands_symmetric_taps() {
        let kernel = Kernel::symmetric(vec![1.0, 0.5, 0.25]).unwrap();
        assert_eq!(kernel.half_len(), 2);
        assert_eq!(kernel.len(), 5);
        let taps: Vec<f32> = (0..kernel.len()).map(|i| kernel.tap(i)).collect();
        assert_eq!(taps, vec![0.25, 0.5, 1.0, 0.5, 0.25]);
    }

    #[test]
    fn expands_antisymmetric_taps() {
        let kernel = Kernel::antisymmetric(vec![0.0, 0.5, 0.25]).unwrap();
        let taps: Vec<f32> = (0..kernel.len()).map(|i| kernel.tap(i)).collect();
        assert_eq!(taps, vec![-0.25, -0.5, 0.0, 0.5, 0.25]);
    }
}
