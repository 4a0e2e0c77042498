use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dnssd_rs::{select, Name, Srv};

fn records(count: u16) -> Vec<Srv> {
    (0..count)
        .map(|i| Srv {
            priority: i % 3,
            weight: (i * 7) % 50,
            port: 8000 + i,
            target: Name::from_labels([format!("host{i}"), "example".into(), "com".into()]),
        })
        .collect()
}

fn order(c: &mut Criterion) {
    let mut rng = rand::rng();
    for count in [4, 32, 256] {
        let records = records(count);
        c.bench_function(&format!("order {count} records"), |b| {
            b.iter(|| select::order(black_box(&records), &mut rng))
        });
    }
}

criterion_group!(benches, order);
criterion_main!(benches);
