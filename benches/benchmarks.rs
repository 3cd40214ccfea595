use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use utcompress::{compress, compress_for_uri, decompress_from_string, CompressOptions, DecompressOptions, TimingEntry};

/// A page-load-like mix: a few dozen names, repeated marks and measures
fn sample_entries(count: usize) -> Vec<TimingEntry> {
    (0..count)
        .map(|i| {
            let name = format!("component{}.render", i % 40);
            let start = 100.0 + i as f64 * 12.5;
            if i % 3 == 0 {
                TimingEntry::measure(name, start, (i % 17) as f64 * 3.3)
            } else {
                TimingEntry::mark(name, start)
            }
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for count in [10, 100, 1000] {
        let entries = sample_entries(count);
        let options = CompressOptions::default();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_entries"), |b| {
            b.iter(|| black_box(compress(black_box(&entries), &options)))
        });
    }
    group.finish();
}

fn bench_compress_for_uri(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_for_uri");

    for count in [10, 100, 1000] {
        let compressed = compress(&sample_entries(count), &CompressOptions::default());
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_entries"), |b| {
            b.iter(|| black_box(compress_for_uri(black_box(&compressed))))
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let uri = compress_for_uri(&compress(&sample_entries(1000), &CompressOptions::default()));
    let options = DecompressOptions::default();

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("1000_entries", |b| {
        b.iter(|| black_box(decompress_from_string(black_box(&uri), &options)))
    });
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let entries = sample_entries(100);

    let mut group = c.benchmark_group("roundtrip");
    group.throughput(Throughput::Elements(100));
    group.bench_function("100_entries", |b| {
        b.iter(|| {
            let uri = compress_for_uri(&compress(black_box(&entries), &CompressOptions::default()));
            black_box(decompress_from_string(&uri, &DecompressOptions::default()))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_compress_for_uri, bench_decompress, bench_roundtrip);
criterion_main!(benches);
