use std::cmp::Ordering;

use chrono::{Duration, Months, NaiveDate};
use uuid::Uuid;

use crate::entry::PracticeEntry;

/// Named time window applied to `played_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFilter {
    All,
    /// The last 7 days, inclusive of the cutoff date.
    Week,
    /// The last calendar month, inclusive of the cutoff date.
    Month,
}

impl RangeFilter {
    /// Parses a raw selector value, falling back to `All` for anything
    /// unrecognized. Malformed external input is not an error here.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("week") => RangeFilter::Week,
            Some("month") => RangeFilter::Month,
            _ => RangeFilter::All,
        }
    }

    /// Returns the inclusive `played_on >= cutoff` bound for this range,
    /// computed against the given `today`. `All` has no bound.
    ///
    /// The month cutoff clamps at month end, so one month before March 31
    /// is the last day of February.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            RangeFilter::All => None,
            RangeFilter::Week => Some(today - Duration::days(7)),
            RangeFilter::Month => Some(
                today
                    .checked_sub_months(Months::new(1))
                    .expect("month cutoff out of calendar range"),
            ),
        }
    }

    /// Canonical selector token, as used in URLs and cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            RangeFilter::All => "all",
            RangeFilter::Week => "week",
            RangeFilter::Month => "month",
        }
    }
}

/// Result ordering. Every variant ends in a `created_at` tie-break so the
/// order is total even among entries sharing the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `played_on` desc, then `created_at` desc (the default).
    PlayedDesc,
    /// `played_on` asc, then `created_at` asc.
    PlayedAsc,
    /// `duration_min` desc with absent durations last, then `played_on`
    /// desc, then `created_at` desc.
    DurationDesc,
}

impl SortOrder {
    /// Parses a raw selector value, falling back to `PlayedDesc` for
    /// anything unrecognized.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("played_asc") => SortOrder::PlayedAsc,
            Some("duration_desc") => SortOrder::DurationDesc,
            _ => SortOrder::PlayedDesc,
        }
    }

    /// Canonical selector token, as used in URLs and cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PlayedDesc => "played_desc",
            SortOrder::PlayedAsc => "played_asc",
            SortOrder::DurationDesc => "duration_desc",
        }
    }

    /// Sorts entries in place according to this order.
    ///
    /// This is the in-process equivalent of the SQL ORDER BY clauses the
    /// SQLite backend emits; the two must agree.
    pub fn sort(self, entries: &mut [PracticeEntry]) {
        match self {
            SortOrder::PlayedDesc => entries.sort_by(|a, b| {
                b.played_on
                    .cmp(&a.played_on)
                    .then(b.created_at.cmp(&a.created_at))
            }),
            SortOrder::PlayedAsc => entries.sort_by(|a, b| {
                a.played_on
                    .cmp(&b.played_on)
                    .then(a.created_at.cmp(&b.created_at))
            }),
            SortOrder::DurationDesc => entries.sort_by(|a, b| {
                cmp_duration_desc(a.duration_min, b.duration_min)
                    .then(b.played_on.cmp(&a.played_on))
                    .then(b.created_at.cmp(&a.created_at))
            }),
        }
    }
}

/// Descending by duration, with absent values after all present ones.
fn cmp_duration_desc(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// An owner-scoped, planned entry query: the predicate and ordering handed
/// to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryQuery {
    pub owner_id: Uuid,
    /// Inclusive lower bound on `played_on`; `None` means no date predicate.
    pub played_since: Option<NaiveDate>,
    pub sort: SortOrder,
}

impl EntryQuery {
    /// Plans a query for the given selectors. `today` is passed explicitly
    /// so range cutoffs are deterministic under test.
    pub fn build(owner_id: Uuid, range: RangeFilter, sort: SortOrder, today: NaiveDate) -> Self {
        Self {
            owner_id,
            played_since: range.cutoff(today),
            sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryDraft;
    use chrono::{TimeZone, Timelike, Utc};

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_entry(
        played_on: NaiveDate,
        duration_min: Option<u32>,
        created_hour: u32,
    ) -> PracticeEntry {
        let created = Utc
            .with_ymd_and_hms(2024, 6, 1, created_hour, 0, 0)
            .unwrap();
        let mut entry = PracticeEntry::new(
            Uuid::nil(),
            EntryDraft {
                played_on,
                duration_min: 1,
                piece: "x".to_string(),
                bpm: None,
                tags: vec![],
                rating: 3.0,
                notes: String::new(),
            },
        )
        .with_created_at(created)
        .with_updated_at(created);
        entry.duration_min = duration_min;
        entry
    }

    #[test]
    fn test_range_parse_fallback() {
        assert_eq!(RangeFilter::parse(Some("week")), RangeFilter::Week);
        assert_eq!(RangeFilter::parse(Some("month")), RangeFilter::Month);
        assert_eq!(RangeFilter::parse(Some("fortnight")), RangeFilter::All);
        assert_eq!(RangeFilter::parse(Some("")), RangeFilter::All);
        assert_eq!(RangeFilter::parse(None), RangeFilter::All);
    }

    #[test]
    fn test_sort_parse_fallback() {
        assert_eq!(SortOrder::parse(Some("played_asc")), SortOrder::PlayedAsc);
        assert_eq!(
            SortOrder::parse(Some("duration_desc")),
            SortOrder::DurationDesc
        );
        assert_eq!(SortOrder::parse(Some("loudest")), SortOrder::PlayedDesc);
        assert_eq!(SortOrder::parse(None), SortOrder::PlayedDesc);
    }

    #[test]
    fn test_week_cutoff_is_seven_days_back() {
        let today = make_date(2024, 6, 15);
        assert_eq!(
            RangeFilter::Week.cutoff(today),
            Some(make_date(2024, 6, 8))
        );
    }

    #[test]
    fn test_month_cutoff_clamps_at_month_end() {
        assert_eq!(
            RangeFilter::Month.cutoff(make_date(2024, 3, 31)),
            Some(make_date(2024, 2, 29))
        );
        assert_eq!(
            RangeFilter::Month.cutoff(make_date(2023, 3, 31)),
            Some(make_date(2023, 2, 28))
        );
    }

    #[test]
    fn test_all_has_no_cutoff() {
        assert_eq!(RangeFilter::All.cutoff(make_date(2024, 6, 15)), None);
    }

    #[test]
    fn test_week_predicate_boundary() {
        // An entry exactly 7 days old satisfies the inclusive predicate;
        // one 8 days old does not.
        let today = make_date(2024, 6, 15);
        let cutoff = RangeFilter::Week.cutoff(today).unwrap();

        assert!(make_date(2024, 6, 8) >= cutoff);
        assert!(make_date(2024, 6, 7) < cutoff);
    }

    #[test]
    fn test_build_query() {
        let owner_id = Uuid::new_v4();
        let today = make_date(2024, 6, 15);

        let query = EntryQuery::build(owner_id, RangeFilter::Week, SortOrder::PlayedAsc, today);

        assert_eq!(query.owner_id, owner_id);
        assert_eq!(query.played_since, Some(make_date(2024, 6, 8)));
        assert_eq!(query.sort, SortOrder::PlayedAsc);
    }

    #[test]
    fn test_sort_played_desc_with_created_tiebreak() {
        let day = make_date(2024, 6, 10);
        let mut entries = vec![
            make_entry(day, Some(10), 9),
            make_entry(make_date(2024, 6, 12), Some(10), 8),
            make_entry(day, Some(10), 11),
        ];

        SortOrder::PlayedDesc.sort(&mut entries);

        assert_eq!(entries[0].played_on, make_date(2024, 6, 12));
        // Same played_on: later created_at first.
        assert_eq!(entries[1].created_at.hour(), 11);
        assert_eq!(entries[2].created_at.hour(), 9);
    }

    #[test]
    fn test_sort_played_asc() {
        let mut entries = vec![
            make_entry(make_date(2024, 6, 12), None, 8),
            make_entry(make_date(2024, 6, 10), None, 9),
        ];

        SortOrder::PlayedAsc.sort(&mut entries);

        assert_eq!(entries[0].played_on, make_date(2024, 6, 10));
        assert_eq!(entries[1].played_on, make_date(2024, 6, 12));
    }

    #[test]
    fn test_sort_duration_desc_absent_last() {
        let day = make_date(2024, 6, 10);
        let mut entries = vec![
            make_entry(day, None, 9),
            make_entry(day, Some(30), 9),
            make_entry(day, Some(90), 9),
        ];

        SortOrder::DurationDesc.sort(&mut entries);

        assert_eq!(entries[0].duration_min, Some(90));
        assert_eq!(entries[1].duration_min, Some(30));
        assert_eq!(entries[2].duration_min, None);
    }

    #[test]
    fn test_sort_duration_desc_ties_break_on_played_then_created() {
        let mut entries = vec![
            make_entry(make_date(2024, 6, 10), Some(60), 9),
            make_entry(make_date(2024, 6, 12), Some(60), 8),
            make_entry(make_date(2024, 6, 12), Some(60), 10),
        ];

        SortOrder::DurationDesc.sort(&mut entries);

        assert_eq!(entries[0].played_on, make_date(2024, 6, 12));
        assert_eq!(entries[0].created_at.hour(), 10);
        assert_eq!(entries[1].created_at.hour(), 8);
        assert_eq!(entries[2].played_on, make_date(2024, 6, 10));
    }
}
