use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gs_convert::{RawCapture, encode_capture, normalize};
use gs_core::{AnyImage, Image, ReturnEncoding};

fn bench_normalize_bgr(c: &mut Criterion) {
    let width = 1280usize;
    let height = 1024usize;
    let mut data = Vec::with_capacity(width * height * 3);
    for i in 0..(width * height * 3) {
        data.push((i % 251) as u8);
    }
    let img: AnyImage = Image::from_vec_channels(width, height, 3, data)
        .expect("valid image")
        .into();

    c.bench_function("normalize_bgr_u8_1280x1024", |b| {
        b.iter(|| {
            let out = normalize(black_box(Some(&img)), Some("BGR"), None, None);
            black_box(out.expect("normalized"));
        });
    });
}

fn bench_normalize_gray_replicate(c: &mut Criterion) {
    let width = 1280usize;
    let height = 1024usize;
    let data: Vec<u8> = (0..width * height).map(|i| (i % 251) as u8).collect();
    let img: AnyImage = Image::from_vec(width, height, data)
        .expect("valid image")
        .into();

    c.bench_function("normalize_gray_replicate_u8_1280x1024", |b| {
        b.iter(|| {
            let out = normalize(black_box(Some(&img)), None, None, None);
            black_box(out.expect("normalized"));
        });
    });
}

fn bench_encode_grayscale(c: &mut Criterion) {
    let width = 1280usize;
    let height = 1024usize;
    let raw = RawCapture {
        width,
        height,
        rgba: (0..width * height * 4).map(|i| (i % 253) as u8).collect(),
    };

    c.bench_function("encode_capture_grayscale_1280x1024", |b| {
        b.iter(|| {
            let out = encode_capture(black_box(&raw), ReturnEncoding::Grayscale);
            black_box(out.expect("encoded"));
        });
    });
}

criterion_group!(
    benches,
    bench_normalize_bgr,
    bench_normalize_gray_replicate,
    bench_encode_grayscale
);
criterion_main!(benches);
