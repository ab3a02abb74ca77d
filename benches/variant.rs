use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sovran_variant::Variant;

type Scalar = Variant![i32, String, f64];

// Hand-written enum with the same alternatives, for comparison
enum Native {
    Int(i32),
    Text(String),
    Float(f64),
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");

    // Same alternative every time: in-place fast path
    group.bench_function("variant_set_same_alternative", |b| {
        let mut v: Scalar = Variant::new(0i32);
        b.iter(|| {
            for i in 0..64i32 {
                v.set(black_box(i));
            }
        });
    });

    // Alternating alternatives: destroy and reconstruct every time
    group.bench_function("variant_set_alternating", |b| {
        let mut v: Scalar = Variant::new(0i32);
        b.iter(|| {
            for i in 0..64i32 {
                if i % 2 == 0 {
                    v.set(black_box(i));
                } else {
                    v.set(black_box(i as f64));
                }
            }
        });
    });

    group.bench_function("native_enum_alternating", |b| {
        let mut v = Native::Text(String::new());
        b.iter(|| {
            for i in 0..64i32 {
                if i % 2 == 0 {
                    v = Native::Int(black_box(i));
                } else {
                    v = Native::Float(black_box(i as f64));
                }
            }
            black_box(&v);
        });
    });

    group.bench_function("variant_set_str_reuses_buffer", |b| {
        let mut v: Scalar = Variant::new("seed");
        b.iter(|| {
            for _ in 0..64 {
                v.set(black_box("a short string"));
            }
        });
    });

    group.finish();
}

fn bench_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("access");

    let values: Vec<Scalar> = (0..256i32)
        .map(|i| match i % 3 {
            0 => Variant::new(i),
            1 => Variant::new(i.to_string()),
            _ => Variant::new(i as f64),
        })
        .collect();

    group.bench_function("variant_get_checked", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for v in &values {
                if let Ok(i) = v.get::<i32, _>() {
                    sum += i64::from(*i);
                } else if let Ok(text) = v.get::<String, _>() {
                    sum += text.len() as i64;
                } else if let Ok(value) = v.get::<f64, _>() {
                    sum += *value as i64;
                }
            }
            black_box(sum)
        });
    });

    let natives: Vec<Native> = (0..256)
        .map(|i| match i % 3 {
            0 => Native::Int(i),
            1 => Native::Text(i.to_string()),
            _ => Native::Float(i as f64),
        })
        .collect();

    group.bench_function("native_enum_match", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for v in &natives {
                match v {
                    Native::Int(i) => sum += i64::from(*i),
                    Native::Text(text) => sum += text.len() as i64,
                    Native::Float(value) => sum += *value as i64,
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_assignment, bench_access);
criterion_main!(benches);
