//! Station price history.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::{Price, StationId};

/// Date range a history query covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One recorded price.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub price_id: u64,
    pub station_id: StationId,

    /// Numeric fuel type used by the history endpoint (see [`fuel_type_name`]).
    pub fuel_type_id: u32,

    pub price: Price,
    pub recorded_at: DateTime<Utc>,
}

/// Price history of one station.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub title: String,
    pub station_id: StationId,
    pub period: Period,
    pub entries: Vec<HistoryEntry>,
}

/// A daily point of a fuel's price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub price: Price,
}

impl PriceHistory {
    /// Distinct fuel type ids present, in first-seen order.
    pub fn fuel_types(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.fuel_type_id) {
                seen.push(entry.fuel_type_id);
            }
        }
        seen
    }

    /// One price per fuel per calendar day (UTC), oldest day first.
    ///
    /// When several prices share a day, the latest recorded one wins.
    pub fn daily_series(&self) -> BTreeMap<u32, Vec<DailyPrice>> {
        let mut latest: BTreeMap<(u32, NaiveDate), &HistoryEntry> = BTreeMap::new();
        for entry in &self.entries {
            let key = (entry.fuel_type_id, entry.recorded_at.date_naive());
            match latest.get(&key) {
                Some(existing) if existing.recorded_at > entry.recorded_at => {}
                _ => {
                    latest.insert(key, entry);
                }
            }
        }

        let mut series: BTreeMap<u32, Vec<DailyPrice>> = BTreeMap::new();
        for ((fuel, date), entry) in latest {
            series.entry(fuel).or_default().push(DailyPrice {
                date,
                price: entry.price,
            });
        }
        series
    }
}

/// Display name for a history fuel type id.
pub fn fuel_type_name(id: u32) -> String {
    let name = match id {
        1 => "Sin Plomo 95",
        3 => "Sin Plomo 98",
        4 => "Gasoil A",
        5 => "Gasoil B",
        6 => "Gasoil C",
        7 => "Gasoil A+",
        8 => "Gasoil Premium",
        15 => "Gas Natural Comprimido",
        16 => "Gas Natural Licuado",
        17 => "Gases licuados del petróleo",
        18 => "Bioetanol",
        19 => "Biodiésel",
        20 => "Hidrógeno",
        other => return format!("Tipo de combustible {other}"),
    };
    name.to_string()
}
