//! Outline reconstruction benchmarks
//!
//! Measures bookmark list parsing and tree building on generated tables of
//! contents of increasing size.
//!
//! Run with: `cargo bench outline_benchmarks`

use bookmarkpdf::{build_outline_tree, parse_bookmark_text};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Book-like table of contents: parts, chapters, sections
fn generate_toc(entries: usize) -> String {
    let mut toc = String::from("# generated table of contents\n");
    for idx in 0..entries {
        let level = match idx % 7 {
            0 => 1,
            1 | 4 => 2,
            _ => 3,
        };
        toc.push_str(&format!("{} Heading {}.{} {}\n", level, idx / 7, idx % 7, idx + 1));
    }
    toc
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bookmark_text");
    for size in [100, 1_000, 10_000] {
        let toc = generate_toc(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &toc, |b, toc| {
            b.iter(|| parse_bookmark_text(black_box(toc), 4))
        });
    }
    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_outline_tree");
    for size in [100, 1_000, 10_000] {
        let records = parse_bookmark_text(&generate_toc(size), 0).records;
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| build_outline_tree(black_box(records)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_build);
criterion_main!(benches);
