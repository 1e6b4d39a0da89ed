use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use crr_instruments::{ExerciseStyle, LatticeParameters, OptionType};
use crr_methods::price_lattice;
use std::hint::black_box;

fn benchmark_params(style: ExerciseStyle, steps: usize) -> LatticeParameters {
    LatticeParameters::builder()
        .option_type(OptionType::Put)
        .exercise_style(style)
        .strike(100.0)
        .initial_price(100.0)
        .volatility(0.2)
        .risk_free_rate(0.05)
        .time_to_maturity(1.0)
        .step_count(steps)
        .build()
        .expect("benchmark parameters should be valid")
}

fn bench_textbook_lattice(c: &mut Criterion) {
    let params = LatticeParameters::builder()
        .strike(100.0)
        .initial_price(100.0)
        .factors(1.0604, 0.9431)
        .risk_free_rate(0.1)
        .time_to_maturity(1.0 / 3.0)
        .step_count(4)
        .build()
        .expect("textbook parameters should be valid");

    c.bench_function("textbook_european_call_4_steps", |b| {
        b.iter(|| {
            let px = price_lattice(black_box(&params))
                .expect("pricing should succeed")
                .price();
            black_box(px)
        })
    });
}

fn bench_step_counts(c: &mut Criterion) {
    for style in [ExerciseStyle::European, ExerciseStyle::American] {
        let mut group = c.benchmark_group(format!("{style}_put").to_lowercase());
        for steps in [100_usize, 500, 1000] {
            let params = benchmark_params(style, steps);
            group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
                b.iter(|| {
                    let px = price_lattice(black_box(&params))
                        .expect("pricing should succeed")
                        .price();
                    black_box(px)
                })
            });
        }
        group.finish();
    }
}

criterion_group!(lattice_benches, bench_textbook_lattice, bench_step_counts);
criterion_main!(lattice_benches);
