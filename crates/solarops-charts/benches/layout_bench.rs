//! Benchmarks for chart layout and SVG rendering

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use solarops_charts::bars::{MonthlyBookings, activity_bars};
use solarops_charts::{LineDatum, PieDatum, line, pie, svg};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn revenue_series(len: usize) -> Vec<LineDatum> {
    (0..len)
        .map(|i| {
            let label = MONTHS.get(i % MONTHS.len()).copied().unwrap_or("M");
            LineDatum::new(label, ((i * 7919) % 500_000) as f64)
        })
        .collect()
}

/// Benchmark pie layout across project type mixes
fn bench_pie_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pie_layout");

    let data = vec![
        PieDatum::project("Residential", 42.0),
        PieDatum::project("Commercial", 17.0),
        PieDatum::project("Industrial", 9.0),
        PieDatum::project("Ground Mounted", 4.0),
        PieDatum::project("Other", 1.0),
    ];

    group.bench_function("layout", |b| b.iter(|| pie::layout(black_box(&data))));
    group.bench_function("layout_and_render", |b| {
        b.iter(|| svg::pie_chart(&pie::layout(black_box(&data))));
    });
    let empty: Vec<PieDatum> = Vec::new();
    group.bench_function("no_data", |b| b.iter(|| pie::layout(black_box(&empty))));

    group.finish();
}

/// Benchmark smoothed line layout for growing series
fn bench_line_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_layout");

    for len in [6usize, 12, 60, 365] {
        let data = revenue_series(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("layout", len), &data, |b, data| {
            b.iter(|| line::layout(black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("render", len), &data, |b, data| {
            b.iter(|| svg::line_chart(line::layout(black_box(data)).as_ref(), "₹"));
        });
    }

    group.finish();
}

/// Benchmark monthly activity bars
fn bench_activity_bars(c: &mut Criterion) {
    let rows: Vec<MonthlyBookings> = MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| MonthlyBookings {
            label: (*month).to_string(),
            bookings: (i * 3) as f64,
            completed_steps: (i * 20) as f64,
        })
        .collect();

    c.bench_function("activity_bars", |b| {
        b.iter(|| svg::activity_chart(&activity_bars(black_box(&rows))));
    });
}

criterion_group!(benches, bench_pie_layout, bench_line_layout, bench_activity_bars);
criterion_main!(benches);
