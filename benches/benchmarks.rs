use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use json_shop::{CartStore, NewCart, NewProduct, ProductPatch, ProductStore};
use std::hint::black_box;
use std::path::PathBuf;

fn bench_path(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("json_shop_bench_{}_{}.json", name, size))
}

fn seeded_products(name: &str, size: usize) -> (ProductStore, PathBuf) {
    let path = bench_path(name, size);
    let _ = std::fs::remove_file(&path);
    let store = ProductStore::open(&path).unwrap();
    for i in 0..size as u64 {
        store
            .add_product(NewProduct::new("p", "d", 1_u64, "t", i + 1, 1_u64))
            .unwrap();
    }
    (store, path)
}

fn bench_add_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_product");
    group.sample_size(20);
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("products", size), &size, |b, &size| {
            let (store, path) = seeded_products("add", size);
            let mut next = size as u64 + 1;
            b.iter(|| {
                store
                    .add_product(NewProduct::new("p", "d", 1_u64, "t", next, 1_u64))
                    .unwrap();
                next += 1;
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_product_by_id");
    for size in [100, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("products", size), &size, |b, &size| {
            let (store, path) = seeded_products("lookup", size);
            b.iter(|| black_box(store.get_product_by_id(size as u64 / 2).unwrap()));
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_product");
    group.sample_size(20);
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("products", size), &size, |b, &size| {
            let (store, path) = seeded_products("update", size);
            b.iter(|| {
                let patch = ProductPatch {
                    stock: Some(5_u64.into()),
                    ..Default::default()
                };
                store.update_product(1, patch).unwrap();
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_add_to_cart(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_product_to_cart");
    group.sample_size(20);
    for size in [10, 100] {
        group.bench_with_input(BenchmarkId::new("carts", size), &size, |b, &size| {
            let path = bench_path("cart", size);
            let _ = std::fs::remove_file(&path);
            let store = CartStore::open(&path).unwrap();
            for _ in 0..size {
                store.add_cart(NewCart::default()).unwrap();
            }
            b.iter(|| store.add_product_to_cart(1_u64, 7, 1).unwrap());
            let _ = std::fs::remove_file(&path);
        });
    }
}

criterion_group!(
    benches,
    bench_add_product,
    bench_lookup,
    bench_update,
    bench_add_to_cart,
);
criterion_main!(benches);
