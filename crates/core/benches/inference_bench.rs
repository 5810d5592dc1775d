//! Benchmarks for field-type inference
//!
//! Run with: cargo bench -p composer-core

use composer_core::export::{ElasticsearchMapping, MappingOptions, PostgresTable};
use composer_core::inference::{
    ColumnSample, RuleConfig, infer_document, infer_sql_type, infer_type,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::json;

/// Generate a wide table of mixed-type columns
fn generate_columns(count: usize, rows: usize) -> Vec<ColumnSample> {
    (0..count)
        .map(|i| {
            let values: Vec<String> = (0..rows)
                .map(|r| match i % 6 {
                    0 => format!("{}", r * 7919),
                    1 => format!("{}.{}", r, i),
                    2 => if r % 2 == 0 { "true" } else { "false" }.to_string(),
                    3 => format!("2024-01-{:02}", (r % 28) + 1),
                    4 => format!("Participant {} of cohort {}", r, i),
                    _ => String::new(),
                })
                .collect();
            let name = match i % 6 {
                3 => format!("created_{}", i),
                _ => format!("column_{}", i),
            };
            ColumnSample::new(name, values)
        })
        .collect()
}

/// Benchmark the scalar decision tree for representative values
fn bench_scalar_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_inference");
    let rules = RuleConfig::elasticsearch();

    let test_cases = vec![
        ("integer", "id", "12345"),
        ("float", "score", "85.5"),
        ("boolean", "is_active", "true"),
        ("date", "created_at", "2024-01-01"),
        ("keyword", "name", "John Doe"),
        ("sensitive", "password", "hunter2"),
    ];

    for (label, column, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("infer_type", label), &value, |b, value| {
            b.iter(|| black_box(infer_type(column, value, &rules)));
        });
    }

    group.finish();
}

/// Benchmark relational inference with growing sample sizes
fn bench_relational_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("relational_inference");
    let rules = RuleConfig::postgres();

    for rows in [1, 5, 100].iter() {
        let columns = generate_columns(60, *rows);
        group.throughput(Throughput::Elements(columns.len() as u64));

        group.bench_with_input(BenchmarkId::new("infer_sql_type", rows), &columns, |b, columns| {
            b.iter(|| {
                for column in columns {
                    black_box(infer_sql_type(column, &rules));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark full document generation
fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    let columns = generate_columns(200, 5);

    group.bench_function("elasticsearch_mapping", |b| {
        let rules = RuleConfig::elasticsearch();
        let options = MappingOptions::new("bench");
        b.iter(|| black_box(ElasticsearchMapping::from_columns(&columns, &rules, &options)));
    });

    group.bench_function("postgres_table", |b| {
        let rules = RuleConfig::postgres();
        b.iter(|| black_box(PostgresTable::from_columns("bench", &columns, &rules).map(|t| t.to_sql())));
    });

    group.bench_function("json_document", |b| {
        let rules = RuleConfig::elasticsearch();
        let document = json!([{
            "id": 1,
            "tags": ["red", "blue"],
            "meta": {"count": 3, "scores": [{"value": 1.5}], "created": "2024-01-01"}
        }]);
        b.iter(|| black_box(infer_document(&document, &rules)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_inference,
    bench_relational_inference,
    bench_generators
);
criterion_main!(benches);
