use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fastfir::{convolve_inner, convolve_outer, Kernel};

pub fn criterion_benchmark(c: &mut Criterion) {
    let width = 1024usize;
    let height = 512usize;
    let src = vec![0.5f32; width * height];

    // 1D gaussian, sigma ~1.5
    let kernel = Kernel::symmetric(vec![0.2637, 0.2129, 0.1120, 0.0384, 0.0086]).unwrap();

    c.bench_function("fir inner axis: 1024x512, half_len 4", |b| {
        let mut dst = vec![0f32; width * height];
        b.iter(|| {
            convolve_inner(
                black_box(&src),
                &mut dst,
                width,
                height,
                width,
                black_box(&kernel),
            )
            .unwrap();
        })
    });

    c.bench_function("fir outer axis: 1024x512, half_len 4", |b| {
        let mut dst = vec![0f32; width * height];
        b.iter(|| {
            convolve_outer(
                black_box(&src),
                &mut dst,
                height,
                width,
                width,
                black_box(&kernel),
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
