use cbr_rates::{aggregate::RateAggregator, data::feed, types::RateRecord};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn daily_document(entries: usize) -> String {
    let valutes: String = (0..entries)
        .map(|i| {
            format!(
                "<Valute ID=\"R{i}\"><NumCode>{i:03}</NumCode><CharCode>C{i:02}</CharCode>\
                 <Nominal>{}</Nominal><Name>Currency {i}</Name><Value>{},{:04}</Value></Valute>",
                1 + i % 3 * 10,
                50 + i,
                i * 37 % 10_000
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><ValCurs Date=\"01.03.2024\">{}</ValCurs>",
        valutes
    )
}

fn benchmark_parse_daily(c: &mut Criterion) {
    let body = daily_document(43);
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    c.bench_function("parse_daily_43_entries", |b| {
        b.iter(|| feed::parse_daily(black_box(body.as_bytes()), None, date).unwrap());
    });
}

fn benchmark_aggregate_window(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let records: Vec<RateRecord> = (0..90)
        .flat_map(|day| {
            let date = start - Duration::days(day);
            (0..43).map(move |i| {
                RateRecord::new(
                    date,
                    format!("C{:02}", i),
                    format!("Currency {}", i),
                    50.0 + i as f64,
                )
            })
        })
        .collect();

    c.bench_function("aggregate_90_days", |b| {
        b.iter(|| {
            let aggregator: RateAggregator = black_box(&records).iter().collect();
            aggregator
        });
    });
}

criterion_group!(benches, benchmark_parse_daily, benchmark_aggregate_window);
criterion_main!(benches);
