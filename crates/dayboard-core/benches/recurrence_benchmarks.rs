use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dayboard_core::models::RecurrenceKind;
use dayboard_core::recurrence::{classify, matches, occurrences_between};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bench_classify(c: &mut Criterion) {
    let inputs = [
        ("plain", "Buy groceries for the weekend"),
        ("weekly", "Buy milk every week"),
        ("nested", "every day remember every day every month"),
        ("unknown_suffix", "Stretch every fortnight"),
    ];

    let mut group = c.benchmark_group("classify");
    for (name, text) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| classify(black_box(text)))
        });
    }
    group.finish();
}

fn bench_matches(c: &mut Criterion) {
    let anchor = ymd(2024, 1, 31);
    let candidates: Vec<NaiveDate> = ymd(2024, 1, 1).iter_days().take(366).collect();

    let mut group = c.benchmark_group("matches_one_year");
    for kind in RecurrenceKind::REPEATING {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, kind| {
            b.iter(|| {
                candidates
                    .iter()
                    .filter(|d| matches(black_box(anchor), **d, *kind))
                    .count()
            })
        });
    }
    group.finish();
}

fn bench_window_expansion(c: &mut Criterion) {
    // a typical two-month window across a board of recurring tasks
    let anchors: Vec<(NaiveDate, RecurrenceKind)> = (0..50)
        .map(|i| {
            let kind = RecurrenceKind::REPEATING[i % 4];
            (ymd(2023, 1, 1) + chrono::Duration::days(i as i64 * 7), kind)
        })
        .collect();
    let from = ymd(2024, 3, 1);
    let to = ymd(2024, 4, 30);

    c.bench_function("occurrences_between_50_tasks_61_days", |b| {
        b.iter(|| {
            anchors
                .iter()
                .map(|(anchor, kind)| occurrences_between(*anchor, *kind, black_box(from), black_box(to)).count())
                .sum::<usize>()
        })
    });
}

criterion_group!(benches, bench_classify, bench_matches, bench_window_expansion);
criterion_main!(benches);
