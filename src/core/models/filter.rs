use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::models::log_entry::LogEntry;

/// Number of log rows shown per page.
pub const PER_PAGE: u64 = 20;

/// One predicate over a log row. Dates compare at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterClause {
    /// Created on this day or later.
    CreatedOnOrAfter(NaiveDate),
    /// Created on this day or earlier.
    CreatedOnOrBefore(NaiveDate),
    /// Written by this actor.
    Actor(u64),
}

impl FilterClause {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            FilterClause::CreatedOnOrAfter(day) => entry.created_at.date_naive() >= *day,
            FilterClause::CreatedOnOrBefore(day) => entry.created_at.date_naive() <= *day,
            FilterClause::Actor(id) => entry.actor_id == *id,
        }
    }
}

/// Conjunction of clauses. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    clauses: Vec<FilterClause>,
}

impl LogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.clauses.iter().all(|c| c.matches(entry))
    }
}

/// First instant of `day`, UTC.
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// First instant after `day`, UTC. `None` only at the end of chrono's range.
pub fn start_of_next_day(day: NaiveDate) -> Option<NaiveDateTime> {
    day.checked_add_days(Days::new(1)).map(start_of_day)
}

/// Page window over a filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
}

impl Pagination {
    /// Page numbers below 1 are clamped to 1.
    pub fn new(page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: PER_PAGE,
        }
    }

    /// Rows to skip. Saturates for pages far past the end of the log.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry_at(actor_id: u64, y: i32, m: u32, d: u32, h: u32) -> LogEntry {
        LogEntry {
            id: 1,
            actor_id,
            message: "m".into(),
            origin_address: "127.0.0.1".into(),
            created_at: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(LogFilter::all().matches(&entry_at(7, 2026, 3, 1, 12)));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = LogFilter::all()
            .and(FilterClause::CreatedOnOrAfter(day(2026, 3, 1)))
            .and(FilterClause::CreatedOnOrBefore(day(2026, 3, 2)));

        assert!(filter.matches(&entry_at(1, 2026, 3, 1, 0)));
        assert!(filter.matches(&entry_at(1, 2026, 3, 2, 23)));
        assert!(!filter.matches(&entry_at(1, 2026, 2, 28, 23)));
        assert!(!filter.matches(&entry_at(1, 2026, 3, 3, 0)));
    }

    #[test]
    fn sentinel_actor_matches_nothing() {
        let filter = LogFilter::all().and(FilterClause::Actor(0));
        assert!(!filter.matches(&entry_at(1, 2026, 3, 1, 12)));
    }

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(Pagination::new(Some(0)).page, 1);
        assert_eq!(Pagination::new(None).offset(), 0);
    }

    #[test]
    fn offset_and_total_pages() {
        let p = Pagination::new(Some(2));
        assert_eq!(p.offset(), 20);
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(20), 1);
        assert_eq!(p.total_pages(21), 2);
        assert_eq!(p.total_pages(25), 2);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let p = Pagination::new(Some(u64::MAX));
        assert_eq!(p.page, u64::MAX);
        assert_eq!(p.offset(), u64::MAX);
    }

    #[test]
    fn next_day_boundary() {
        let next = start_of_next_day(day(2026, 2, 28)).unwrap();
        assert_eq!(next, start_of_day(day(2026, 3, 1)));
    }
}
