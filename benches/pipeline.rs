use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use neardup::{analyze_corpus, SimilarityConfig};

fn synthetic_corpus(docs: usize) -> Vec<String> {
    // Overlapping word streams so a realistic share of pairs collides.
    (0..docs)
        .map(|d| {
            (0..120)
                .map(|i| format!("word{}", (d * 7 + i) % 400))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_corpus_analysis(c: &mut Criterion) {
    let cfg = SimilarityConfig {
        k: 9,
        bands: 20,
        rows: 5,
        ..Default::default()
    };
    let mut group = c.benchmark_group("analyze_corpus");

    for docs in [50usize, 200, 500] {
        let corpus = synthetic_corpus(docs);
        group.throughput(Throughput::Elements(docs as u64));
        group.bench_function(format!("docs_{docs}"), |b| {
            b.iter(|| analyze_corpus(black_box(&corpus), black_box(&cfg)).expect("analysis"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_corpus_analysis);
criterion_main!(benches);
