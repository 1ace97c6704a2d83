//! Day lookups: the live cache for the open day, the frozen snapshot for any
//! other date.

use crate::board::Board;
use crate::error::CoreError;
use crate::models::{DayView, SnapshotSource};
use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` date. The shape is checked before calendar
/// validity, so `+2024-1-5` and `2024-13-99` are both rejected.
pub fn parse_snapshot_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(CoreError::InvalidInput(format!(
            "Invalid date format '{raw}', expected YYYY-MM-DD"
        )));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidInput(format!("Invalid calendar date '{raw}'")))
}

impl Board {
    /// Resolves the task list for `date`.
    ///
    /// The open day is served from the cache. Any other date reads the store:
    /// stored rows are returned as-is, a marked day with no rows is an empty
    /// list, and a date never processed is [`CoreError::NotFound`].
    pub async fn resolve(&self, date: NaiveDate) -> Result<DayView, CoreError> {
        if let Some(tasks) = self.live_snapshot(date).await {
            return Ok(DayView {
                date,
                source: SnapshotSource::Live,
                tasks,
            });
        }

        let sync = self.synchronizer();
        let tasks = sync.load(date).await?;

        if tasks.is_empty() && !sync.has_marker(date).await? {
            return Err(CoreError::NotFound(format!("No data for date {date}")));
        }

        Ok(DayView {
            date,
            source: SnapshotSource::Archived,
            tasks,
        })
    }

    /// Parses `raw` and resolves it. Malformed input never reaches the store.
    pub async fn resolve_str(&self, raw: &str) -> Result<DayView, CoreError> {
        let date = parse_snapshot_date(raw)?;
        self.resolve(date).await
    }

    /// Every date the synchronizer has processed, oldest first.
    pub async fn processed_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        self.synchronizer().marked_dates().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-05", 2024, 1, 5)]
    #[case("2024-02-29", 2024, 2, 29)]
    #[case("1999-12-31", 1999, 12, 31)]
    fn test_parse_valid_dates(#[case] raw: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(
            parse_snapshot_date(raw).unwrap(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        );
    }

    #[rstest]
    #[case("2024-13-99")]
    #[case("not-a-date")]
    #[case("2023-02-29")]
    #[case("2024-1-05")]
    #[case("24-01-05")]
    #[case("+2024-01-5")]
    #[case("2024/01/05")]
    #[case("2024-01-05T00:00:00")]
    #[case("")]
    fn test_parse_rejects_malformed_dates(#[case] raw: &str) {
        assert!(matches!(
            parse_snapshot_date(raw),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
