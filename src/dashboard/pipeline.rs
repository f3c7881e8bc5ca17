//! Filter/sort pipeline over moderation queries.

use crate::model::{FilterConfig, Query, SortOption, TimeRange};
use chrono::{DateTime, Utc};

/// Derive the visible list from `queries` and `filter`.
///
/// Empty severity or category sets pass everything through. Sorting is
/// stable, so ties keep the order of the input.
pub fn filter_and_sort(queries: &[Query], filter: &FilterConfig) -> Vec<Query> {
    let mut result: Vec<Query> = queries
        .iter()
        .filter(|q| filter.severities.is_empty() || filter.severities.contains(&q.severity))
        .filter(|q| filter.categories.is_empty() || filter.categories.contains(&q.category))
        .cloned()
        .collect();

    sort_queries(&mut result, filter.sort_by);
    result
}

/// Like [`filter_and_sort`], additionally dropping queries outside the
/// filter's time range as seen from `now`.
pub fn filter_and_sort_within(
    queries: &[Query],
    filter: &FilterConfig,
    now: DateTime<Utc>,
) -> Vec<Query> {
    let mut result = filter_and_sort(queries, filter);
    result.retain(|q| in_time_range(q, filter, now));
    result
}

fn in_time_range(query: &Query, filter: &FilterConfig, now: DateTime<Utc>) -> bool {
    match filter.time_range {
        TimeRange::Custom => {
            filter.start_date.map_or(true, |start| query.timestamp >= start)
                && filter.end_date.map_or(true, |end| query.timestamp <= end)
        }
        range => match range.window() {
            Some(window) => query.timestamp >= now - window && query.timestamp <= now,
            None => true,
        },
    }
}

pub fn sort_queries(queries: &mut [Query], sort_by: SortOption) {
    match sort_by {
        SortOption::MostRecent => queries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOption::SeverityHighLow => {
            queries.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()))
        }
        SortOption::SeverityLowHigh => {
            queries.sort_by(|a, b| a.severity.rank().cmp(&b.severity.rank()))
        }
        SortOption::Unordered => {}
    }
}
