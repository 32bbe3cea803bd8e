use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_tomlet::{from_str, parse, parse_with_options, to_string, CommentPolicy, ParseOptions};

#[derive(Serialize, Deserialize, Clone)]
struct Server {
    host: String,
    port: u16,
    enabled: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Catalog {
    title: String,
    products: Vec<Product>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Limits {
    values: Vec<i64>,
}

const CONFIG: &str = r#"
# Service configuration
title = "inventory"
version = "1.4.2"
released = 2024-03-01T09:30:00Z

[server]
host = "0.0.0.0"
port = 8080
timeout = 30.5
tags = ["edge", "primary", "eu-west"]

[database]
url = 'postgres://db.internal/inventory'
pool = { min = 2, max = 16 }
retry.backoff = 250
retry.attempts = 5

[[replica]]
host = "10.0.0.2"
lag = 0.25

[[replica]]
host = "10.0.0.3"
lag = 1.5
"#;

fn catalog(size: u32) -> Catalog {
    Catalog {
        title: "store".to_string(),
        products: (0..size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect(),
    }
}

fn benchmark_parse_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    group.bench_function("discard_comments", |b| b.iter(|| parse(black_box(CONFIG))));

    let options = ParseOptions::new().with_comments(CommentPolicy::Preserve);
    group.bench_function("preserve_comments", |b| {
        b.iter(|| parse_with_options(black_box(CONFIG), &options))
    });

    group.finish();
}

fn benchmark_format_document(c: &mut Criterion) {
    let doc = parse(CONFIG).unwrap();

    c.bench_function("format_document", |b| b.iter(|| black_box(&doc).to_string()));
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let server = Server {
        host: "localhost".to_string(),
        port: 8080,
        enabled: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&server)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "host = \"localhost\"\nport = 8080\nenabled = true\n";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<Server>(black_box(text)))
    });
}

fn benchmark_arrays_of_tables(c: &mut Criterion) {
    let mut serialize = c.benchmark_group("serialize_array_of_tables");
    for size in [10, 50, 100, 500].iter() {
        let data = catalog(*size);
        serialize.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| to_string(black_box(data)))
        });
    }
    serialize.finish();

    let mut deserialize = c.benchmark_group("deserialize_array_of_tables");
    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&catalog(*size)).unwrap();
        deserialize.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Catalog>(black_box(text)))
        });
    }
    deserialize.finish();
}

fn benchmark_long_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_arrays");

    let limits = Limits {
        values: (0..1000).collect(),
    };
    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&limits)))
    });

    let text = to_string(&limits).unwrap();
    group.bench_function("deserialize_integers", |b| {
        b.iter(|| from_str::<Limits>(black_box(&text)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let data = catalog(50);
    let mut group = c.benchmark_group("comparison");

    group.bench_function("tomlet_serialize", |b| {
        b.iter(|| serde_tomlet::to_string(black_box(&data)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&data)))
    });

    let tomlet_str = serde_tomlet::to_string(&data).unwrap();
    let json_str = serde_json::to_string(&data).unwrap();

    group.bench_function("tomlet_deserialize", |b| {
        b.iter(|| serde_tomlet::from_str::<Catalog>(black_box(&tomlet_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Catalog>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_document,
    benchmark_format_document,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_arrays_of_tables,
    benchmark_long_arrays,
    benchmark_comparison_with_json
);
criterion_main!(benches);
