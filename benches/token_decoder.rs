use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smc_processor::parser::decode_values;

/// Fixed-width block of 8 values per line with every other value negative
fn fixed_width_block(lines: usize) -> String {
    (0..lines)
        .map(|line| {
            (0..8)
                .map(|i| {
                    let value = (line * 8 + i) as f64 * 0.001;
                    if i % 2 == 0 {
                        format!("{:10.4}", value)
                    } else {
                        format!("{:10.4}", -value - 1000.0)
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn bench_decode(c: &mut Criterion) {
    let block = fixed_width_block(2_000);

    c.bench_function("decode_values 16k glued tokens", |b| {
        b.iter(|| decode_values(black_box(&block)))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
