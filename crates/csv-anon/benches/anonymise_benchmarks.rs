//! Anonymisation pass benchmarks.
//!
//! Measures pass throughput across row counts and value cardinalities.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use csv_anon::{Anonymiser, CsvSource, InputConfig, ValueMap};

/// Generate synthetic CSV data where the `city` column has `distinct` values.
fn generate_csv_data(rows: usize, distinct: usize) -> String {
    let mut data = String::from("id,name,city,score,joined\n");

    for row in 0..rows {
        data.push_str(&format!(
            "{},Person_{:06},City_{},{:.2},2023-{:02}-{:02}\n",
            row,
            row,
            row % distinct,
            row as f64 * 1.5,
            (row % 12) + 1,
            (row % 28) + 1
        ));
    }

    data
}

/// Benchmark the full pass into an in-memory writer.
fn bench_anonymise_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("anonymise_rows");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 50);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| {
                let mut source = CsvSource::from_reader(data.as_bytes(), &InputConfig::default());
                let mut out = Vec::with_capacity(data.len());
                black_box(
                    Anonymiser::new()
                        .anonymise_to_writer(&mut source, &mut out, "city")
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark how value cardinality affects the pass.
fn bench_anonymise_cardinality(c: &mut Criterion) {
    let mut group = c.benchmark_group("anonymise_cardinality");
    let rows = 10_000;

    for distinct in [1, 100, 10_000].iter() {
        let data = generate_csv_data(rows, *distinct);

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("distinct", distinct), &data, |b, data| {
            b.iter(|| {
                let mut source = CsvSource::from_reader(data.as_bytes(), &InputConfig::default());
                black_box(
                    Anonymiser::new()
                        .anonymise_to_writer(&mut source, std::io::sink(), "city")
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

/// Benchmark exporting a large mapping.
fn bench_mapping_export(c: &mut Criterion) {
    let mut values = ValueMap::new();
    for i in 0..10_000 {
        values.assign(&format!("value_{}", i));
    }

    c.bench_function("mapping_export_10k", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            values.write_csv(&mut out, "city").unwrap();
            black_box(out)
        })
    });
}

criterion_group!(
    benches,
    bench_anonymise_rows,
    bench_anonymise_cardinality,
    bench_mapping_export
);
criterion_main!(benches);
