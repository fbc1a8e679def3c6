//! Multi-symbol timeline merge.
//!
//! Normalizes independent per-symbol bar series into one chronological
//! sequence of steps. Each step exposes the (symbol, bar) pairs dated
//! exactly at that step, tolerating sparse and irregular series.

use crate::domain::Bar;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// One simulated day: every symbol that has a bar on this date.
#[derive(Debug, Clone)]
pub struct TimelineStep {
    pub date: NaiveDate,
    pub events: Vec<(String, Bar)>,
}

/// Lazy iterator over the merged timeline.
///
/// Steps are strictly increasing (dates come from a `BTreeSet` union) and no
/// symbol is visited twice per step: each series has one cursor that only
/// moves forward.
pub struct MergedTimeline<'a> {
    dates: std::vec::IntoIter<NaiveDate>,
    series: Vec<(&'a str, &'a [Bar], usize)>,
}

impl<'a> MergedTimeline<'a> {
    pub fn new(data: &'a BTreeMap<String, Vec<Bar>>) -> Self {
        let mut all_dates = BTreeSet::new();
        for bars in data.values() {
            for bar in bars {
                all_dates.insert(bar.date);
            }
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();
        let series = data
            .iter()
            .map(|(symbol, bars)| (symbol.as_str(), bars.as_slice(), 0usize))
            .collect();
        Self {
            dates: dates.into_iter(),
            series,
        }
    }
}

impl Iterator for MergedTimeline<'_> {
    type Item = TimelineStep;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.dates.next()?;
        let mut events = Vec::new();
        for (symbol, bars, cursor) in &mut self.series {
            // Absorb any bars at or before this step; emit only an exact match.
            let mut today = None;
            while *cursor < bars.len() && bars[*cursor].date <= date {
                if bars[*cursor].date == date {
                    today = Some(bars[*cursor].clone());
                }
                *cursor += 1;
            }
            if let Some(bar) = today {
                events.push((symbol.to_string(), bar));
            }
        }
        Some(TimelineStep { date, events })
    }
}
