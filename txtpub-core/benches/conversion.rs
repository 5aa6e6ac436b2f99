//! Conversion benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use txtpub_core::packager::package;
use txtpub_core::segmenter::segment;
use txtpub_core::{BookMetadata, Language};

fn sample_text(chapters: usize) -> String {
    let mut text = String::from("A Sample Book\nby Nobody\n\n");
    for i in 1..=chapters {
        text.push_str(&format!("Chapter {i}\n"));
        for _ in 0..40 {
            text.push_str("The quick brown fox jumps over the lazy dog.\n");
        }
        text.push('\n');
    }
    text
}

fn conversion_benchmark(c: &mut Criterion) {
    let text = sample_text(200);

    c.bench_function("segment_english_200", |b| {
        b.iter(|| segment(black_box(&text), Language::English))
    });

    let segmentation = segment(&text, Language::English);
    c.bench_function("package_english_200", |b| {
        b.iter(|| {
            package(
                black_box(&segmentation.chapters),
                BookMetadata::new("Bench", Language::English),
            )
        })
    });
}

criterion_group!(benches, conversion_benchmark);
criterion_main!(benches);
