//! Text and JSON rendering of a run

use crate::calendar::format_feed_date;
use crate::engine::RunSummary;
use crate::error::Result;
use crate::types::{Rate, RateRecord};
use serde::Serialize;
use std::io::Write;

const TABLE_WIDTH: usize = 53;
pub const NO_DATA_MESSAGE: &str = "Не удалось загрузить данные за указанный период.";

/// Report title with the requested window length
pub fn write_header<W: Write>(out: &mut W, days: usize) -> Result<()> {
    writeln!(out, "Отчет по курсам валют ЦБ РФ за последние {} дней.", days)?;
    Ok(())
}

/// One line per attempted day, 1-based
pub fn write_progress<W: Write>(out: &mut W, index: usize, total: usize) -> Result<()> {
    writeln!(out, "Processing day {}/{}...", index, total)?;
    Ok(())
}

/// Summary block and average-rate table, or the no-data message
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    sort_by_code: bool,
) -> Result<()> {
    let aggregator = &summary.aggregator;
    let Some(extremes) = aggregator.extremes() else {
        writeln!(out, "{}", NO_DATA_MESSAGE)?;
        return Ok(());
    };

    writeln!(out, "Обработано всего {} записей о курсах.", aggregator.total_records())?;
    write_extreme(out, "Максимальный курс", &extremes.max)?;
    write_extreme(out, "Минимальный курс", &extremes.min)?;
    writeln!(out, "Количество уникальных валют: {}", aggregator.currency_count())?;

    writeln!(
        out,
        "{:<6} {:<30} {:>15}",
        "Код", "Название Валюты", "Средний Курс (руб.)"
    )?;
    writeln!(out, "{}", "-".repeat(TABLE_WIDTH))?;

    let rows: Vec<_> = if sort_by_code {
        aggregator.sorted_currencies()
    } else {
        aggregator
            .currencies()
            .iter()
            .map(|(code, stats)| (code.as_str(), stats))
            .collect()
    };

    for (code, stats) in rows {
        writeln!(out, "{:<6} {:<30} {:>15.4}", code, stats.name, stats.mean())?;
    }

    Ok(())
}

fn write_extreme<W: Write>(out: &mut W, label: &str, record: &RateRecord) -> Result<()> {
    writeln!(
        out,
        "{}: {:.4} руб. за 1 {} ({})",
        label, record.per_unit_value, record.code, record.name
    )?;
    writeln!(out, "Дата фиксации: {}", format_feed_date(record.date))?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    days_requested: usize,
    days_succeeded: usize,
    total_records: usize,
    no_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    max: Option<&'a RateRecord>,
    min: Option<&'a RateRecord>,
    currencies: Vec<JsonCurrency<'a>>,
}

#[derive(Serialize)]
struct JsonCurrency<'a> {
    code: &'a str,
    name: &'a str,
    count: usize,
    average: Rate,
}

/// Machine-readable summary; currencies ordered by code.
///
/// An empty window sets `no_data` and carries the no-data message.
pub fn write_json<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
    let aggregator = &summary.aggregator;
    let extremes = aggregator.extremes();

    let report = JsonReport {
        days_requested: summary.days_requested,
        days_succeeded: summary.days_succeeded,
        total_records: aggregator.total_records(),
        no_data: extremes.is_none(),
        message: extremes.is_none().then_some(NO_DATA_MESSAGE),
        max: extremes.map(|e| &e.max),
        min: extremes.map(|e| &e.min),
        currencies: aggregator
            .sorted_currencies()
            .into_iter()
            .map(|(code, stats)| JsonCurrency {
                code,
                name: &stats.name,
                count: stats.count,
                average: stats.mean(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::RateAggregator;
    use chrono::NaiveDate;

    fn summary(records: &[RateRecord]) -> RunSummary {
        RunSummary {
            days_requested: 2,
            days_succeeded: 2,
            aggregator: records.iter().collect(),
        }
    }

    fn render(summary: &RunSummary) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, summary, true).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_header_and_progress() {
        let mut out = Vec::new();
        write_header(&mut out, 90).unwrap();
        write_progress(&mut out, 1, 90).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Отчет по курсам валют ЦБ РФ за последние 90 дней.\nProcessing day 1/90...\n"
        );
    }

    #[test]
    fn test_no_data_only_message() {
        let summary = RunSummary {
            days_requested: 3,
            days_succeeded: 0,
            aggregator: RateAggregator::new(),
        };

        assert_eq!(render(&summary), format!("{}\n", NO_DATA_MESSAGE));
    }

    #[test]
    fn test_summary_block() {
        let text = render(&summary(&[
            RateRecord::new(date(1), "USD", "US Dollar", 90.0),
            RateRecord::new(date(2), "USD", "US Dollar", 92.5),
            RateRecord::new(date(2), "EUR", "Euro", 100.0),
        ]));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Обработано всего 3 записей о курсах.");
        assert_eq!(lines[1], "Максимальный курс: 100.0000 руб. за 1 EUR (Euro)");
        assert_eq!(lines[2], "Дата фиксации: 02/06/2024");
        assert_eq!(lines[3], "Минимальный курс: 90.0000 руб. за 1 USD (US Dollar)");
        assert_eq!(lines[4], "Дата фиксации: 01/06/2024");
        assert_eq!(lines[5], "Количество уникальных валют: 2");
        assert_eq!(lines[7], "-".repeat(53));
        assert_eq!(lines[8], format!("{:<6} {:<30} {:>15}", "EUR", "Euro", "100.0000"));
        assert_eq!(lines[9], format!("{:<6} {:<30} {:>15}", "USD", "US Dollar", "91.2500"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_unsorted_table_has_every_row() {
        let summary = summary(&[
            RateRecord::new(date(1), "USD", "US Dollar", 90.0),
            RateRecord::new(date(1), "CNY", "Yuan", 12.4),
        ]);
        let mut out = Vec::new();
        write_summary(&mut out, &summary, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.lines().any(|l| l.starts_with("USD ")));
        assert!(text.lines().any(|l| l.starts_with("CNY ")));
    }

    #[test]
    fn test_json_report() {
        let summary = summary(&[
            RateRecord::new(date(1), "USD", "US Dollar", 90.0),
            RateRecord::new(date(2), "USD", "US Dollar", 92.5),
        ]);
        let mut out = Vec::new();
        write_json(&mut out, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_records"], 2);
        assert_eq!(value["max"]["code"], "USD");
        assert_eq!(value["max"]["date"], "2024-06-02");
        assert_eq!(value["currencies"][0]["average"], 91.25);
        assert_eq!(value["no_data"], false);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_json_report_no_data() {
        let summary = RunSummary {
            days_requested: 5,
            days_succeeded: 0,
            aggregator: RateAggregator::new(),
        };
        let mut out = Vec::new();
        write_json(&mut out, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["no_data"], true);
        assert_eq!(value["message"], NO_DATA_MESSAGE);
        assert_eq!(value["days_requested"], 5);
        assert!(value["max"].is_null());
        assert_eq!(value["currencies"].as_array().unwrap().len(), 0);
    }
}
