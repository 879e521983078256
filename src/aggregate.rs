//! Per-currency statistics and global extremes

use crate::types::{CurrencyCode, Rate, RateRecord};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Running statistics for one currency code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAggregate {
    /// Name from the first observation of the code
    pub name: String,
    pub sum: Rate,
    pub count: usize,
}

impl CurrencyAggregate {
    fn first(record: &RateRecord) -> Self {
        Self {
            name: record.name.clone(),
            sum: record.per_unit_value,
            count: 1,
        }
    }

    /// Mean per-unit rate
    pub fn mean(&self) -> Rate {
        self.sum / self.count as Rate
    }
}

/// Highest and lowest per-unit rate across all currencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub max: RateRecord,
    pub min: RateRecord,
}

impl Extremes {
    fn new(record: &RateRecord) -> Self {
        Self {
            max: record.clone(),
            min: record.clone(),
        }
    }

    /// Strict comparisons: on a tie the earlier record keeps the bound
    fn update(&mut self, record: &RateRecord) {
        if record.per_unit_value > self.max.per_unit_value {
            self.max = record.clone();
        }
        if record.per_unit_value < self.min.per_unit_value {
            self.min = record.clone();
        }
    }
}

/// Fold of every admitted record in a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateAggregator {
    currencies: HashMap<CurrencyCode, CurrencyAggregate>,
    extremes: Option<Extremes>,
    total_records: usize,
}

impl RateAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the statistics
    pub fn observe(&mut self, record: &RateRecord) {
        self.currencies
            .entry_ref(record.code.as_str())
            .and_modify(|stats| {
                stats.sum += record.per_unit_value;
                stats.count += 1;
            })
            .or_insert_with(|| CurrencyAggregate::first(record));

        match self.extremes.as_mut() {
            Some(extremes) => extremes.update(record),
            None => self.extremes = Some(Extremes::new(record)),
        }

        self.total_records += 1;
    }

    /// Fold a batch of records in order
    pub fn observe_all<'a>(&mut self, records: impl IntoIterator<Item = &'a RateRecord>) {
        for record in records {
            self.observe(record);
        }
    }

    /// Statistics for one currency code
    pub fn get(&self, code: &str) -> Option<&CurrencyAggregate> {
        self.currencies.get(code)
    }

    /// All per-currency statistics, in map order
    pub fn currencies(&self) -> &HashMap<CurrencyCode, CurrencyAggregate> {
        &self.currencies
    }

    /// Per-currency statistics ordered by code
    pub fn sorted_currencies(&self) -> Vec<(&str, &CurrencyAggregate)> {
        let mut rows: Vec<_> = self
            .currencies
            .iter()
            .map(|(code, stats)| (code.as_str(), stats))
            .collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Global extremes, `None` until the first record
    pub fn extremes(&self) -> Option<&Extremes> {
        self.extremes.as_ref()
    }

    /// Number of distinct currency codes seen
    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }

    /// Number of records folded
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

impl<'a> FromIterator<&'a RateRecord> for RateAggregator {
    fn from_iter<I: IntoIterator<Item = &'a RateRecord>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.observe_all(iter);
        aggregator
    }
}
