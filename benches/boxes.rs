// benches/boxes.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use lighting_filters::core::pdf::rects_from_content;
use lighting_filters::specs::boxes::classify;

/// A back page's worth of rating boxes plus some unrelated artwork.
fn sample_stream() -> String {
    let mut s = String::new();
    for i in 0..40 {
        s.push_str(&format!("0.5 g {} 600 20 10 re f\n", 20 + i * 12));
    }
    for (i, x) in [50, 80, 110, 140, 170].iter().enumerate() {
        s.push_str(&format!("{} g {x} 220 8 8 re B\n", if i == 1 { 0 } else { 1 }));
    }
    for y in [190, 160, 130, 100] {
        for (i, x) in [60, 100, 140].iter().enumerate() {
            s.push_str(&format!("{} g {x} {y} 8 8 re B\n", if i == 2 { 0 } else { 1 }));
        }
    }
    s
}

fn bench_boxes(c: &mut Criterion) {
    let stream = sample_stream();
    let rects = rects_from_content(stream.as_bytes()).expect("sample stream decodes");

    c.bench_function("content_stream_rects", |b| {
        b.iter(|| black_box(rects_from_content(black_box(stream.as_bytes())).map(|r| r.len())))
    });

    c.bench_function("classify_boxes", |b| {
        b.iter(|| black_box(classify(black_box(&rects), "bench")))
    });
}

criterion_group!(benches, bench_boxes);
criterion_main!(benches);
