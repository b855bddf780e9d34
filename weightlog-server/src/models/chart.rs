//! Chart series derived from the record list

use serde::Serialize;

use super::record::{DailyRecord, DATE_FORMAT};

/// Parallel date/weight/memo sequences for the weight chart.
///
/// Index `i` of every sequence describes the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub dates: Vec<String>,
    pub weights: Vec<f64>,
    pub memos: Vec<String>,
}

impl ChartSeries {
    /// Build the series from records already in ascending date order.
    pub fn from_records(records: &[DailyRecord]) -> Self {
        let mut series = Self {
            dates: Vec::with_capacity(records.len()),
            weights: Vec::with_capacity(records.len()),
            memos: Vec::with_capacity(records.len()),
        };
        for rec in records {
            series.dates.push(rec.date.format(DATE_FORMAT).to_string());
            series.weights.push(rec.weight);
            series.memos.push(rec.memo.clone());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
