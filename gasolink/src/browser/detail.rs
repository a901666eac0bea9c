//! A single station with its price history.

use chrono::NaiveDate;

use crate::domain::{PriceHistory, Station, StationId};
use crate::source::{SourceError, StationSource};

/// First day of the history requested for a station.
pub const HISTORY_START: NaiveDate = match NaiveDate::from_ymd_opt(2010, 1, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Everything the station detail view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StationOverview {
    pub station: Station,
    pub history: PriceHistory,
}

/// Fetch a station's detail and its full price history up to `today`.
///
/// Both requests run concurrently; either failing fails the whole overview.
pub async fn station_overview<S: StationSource>(
    source: &S,
    id: StationId,
    today: NaiveDate,
) -> Result<StationOverview, SourceError> {
    let (station, history) = futures::try_join!(
        source.detail(id),
        source.history(id, HISTORY_START, today)
    )?;
    Ok(StationOverview { station, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FuelKey, HistoryEntry, Period, Price};
    use crate::source::MockStationSource;
    use chrono::{TimeZone, Utc};

    fn history(id: u64) -> PriceHistory {
        PriceHistory {
            title: "Histórico".into(),
            station_id: StationId(id),
            period: Period {
                start: HISTORY_START,
                end: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            },
            entries: vec![HistoryEntry {
                price_id: 1,
                station_id: StationId(id),
                fuel_type_id: 4,
                price: Price::new(1.459).unwrap(),
                recorded_at: Utc.with_ymd_and_hms(2025, 5, 1, 6, 0, 0).unwrap(),
            }],
        }
    }

    #[test]
    fn history_starts_in_2010() {
        assert_eq!(HISTORY_START, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn overview_combines_detail_and_history() {
        let source = MockStationSource::new()
            .with_stations(
                1,
                vec![Station::new(7, "Repsol").with_price(FuelKey::Diesel, Price::new(1.459).unwrap())],
            )
            .with_history(history(7));

        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let overview = station_overview(&source, StationId(7), today).await.unwrap();
        assert_eq!(overview.station.name, "Repsol");
        assert_eq!(overview.history.entries.len(), 1);
    }

    #[tokio::test]
    async fn missing_history_fails_overview() {
        let source = MockStationSource::new().with_stations(1, vec![Station::new(7, "Repsol")]);
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(matches!(
            station_overview(&source, StationId(7), today).await,
            Err(SourceError::NotFound { .. })
        ));
    }
}
