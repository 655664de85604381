#![no_main]

use fastfir::{convolve_inner, convolve_inner_in_place, Kernel};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, bool)| {
    fuzz_inner(
        data.0 as usize,
        data.1 as usize % 8 + 1,
        data.2 as usize % 16,
        data.3,
    );
});

fn fuzz_inner(n_pixels: usize, n_times: usize, half_len: usize, symmetric: bool) {
    if half_len == 0 || half_len > 12 || n_pixels < 2 * half_len {
        return;
    }

    let coefs: Vec<f32> = (0..=half_len).map(|k| 0.75 / (k + 1) as f32).collect();
    let kernel = if symmetric {
        Kernel::symmetric(coefs).unwrap()
    } else {
        Kernel::antisymmetric(coefs).unwrap()
    };

    let src: Vec<f32> = (0..n_pixels * n_times)
        .map(|v| (v % 37) as f32 * 0.125 - 2.0)
        .collect();
    let mut dst = vec![0f32; src.len()];
    convolve_inner(&src, &mut dst, n_pixels, n_times, n_pixels, &kernel).unwrap();

    let mut buf = src.clone();
    convolve_inner_in_place(&mut buf, n_pixels, n_times, n_pixels, &kernel).unwrap();

    for (i, (a, b)) in dst.iter().zip(buf.iter()).enumerate() {
        assert!(
            (a - b).abs() <= 1e-5 * a.abs().max(1.0),
            "aliasing mismatch at {i}: {a} vs {b}"
        );
    }
}
