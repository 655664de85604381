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

/// Mirrored index for a tap reaching past the left edge, `abcdef -> b` for
/// the sample one before `a`. The edge sample is not duplicated.
#[inline(always)]
pub(crate) fn reflect_left(i: usize, k: usize) -> usize {
    debug_assert!(i < k);
    k - i
}

/// Mirrored index for a tap reaching past the right edge, the counterpart of
/// [reflect_left] about the last sample.
#[inline(always)]
pub(crate) fn reflect_right(i: usize, k: usize, n_pixels: usize) -> usize {
    debug_assert!(i + k >= n_pixels);
    n_pixels - ((i + k) % n_pixels) - 2
}

/// Mirrored index over the whole axis, for paths walking the full tap table.
#[inline(always)]
pub(crate) fn mirror_index(idx: isize, n_pixels: usize) -> usize {
    if idx < 0 {
        (-idx) as usize
    } else if idx as usize >= n_pixels {
        n_pixels - (idx as usize % n_pixels) - 2
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_left_without_edge_duplication() {
        assert_eq!(reflect_left(0, 1), 1);
        assert_eq!(reflect_left(0, 3), 3);
        assert_eq!(reflect_left(2, 3), 1);
    }

    #[test]
    fn reflects_right_without_edge_duplication() {
        // virtual indices 10, 11, 12 on a 10 sample axis
        assert_eq!(reflect_right(9, 1, 10), 8);
        assert_eq!(reflect_right(9, 2, 10), 7);
        assert_eq!(reflect_right(9, 3, 10), 6);
        assert_eq!(reflect_right(8, 2, 10), 8);
    }

    #[test]
    fn mirrors_full_axis() {
        assert_eq!(mirror_index(-3, 10), 3);
        assert_eq!(mirror_index(-1, 10), 1);
        assert_eq!(mirror_index(0, 10), 0);
        assert_eq!(mirror_index(9, 10), 9);
        assert_eq!(mirror_index(10, 10), 8);
        assert_eq!(mirror_index(12, 10), 6);
    }
}
