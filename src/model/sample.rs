//! Sample data the server starts with.

use super::types::*;
use chrono::{DateTime, TimeZone, Utc};

/// A time on 2024-02-04, the day the sample queries were flagged.
fn ts(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 4, hour, min, sec)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// The document shown before anything is uploaded.
pub fn sample_file() -> FileDetails {
    FileDetails {
        name: "sample-document.pdf".to_string(),
        size: 2_500_000,
        page_count: 15,
        status: UploadStatus::Completed,
    }
}

pub fn sample_auto_configs() -> Vec<RiskConfig> {
    vec![
        RiskConfig::auto("1", "Hate Speech", RiskSeverity::High),
        RiskConfig::auto("2", "Violence", RiskSeverity::Medium),
        RiskConfig::auto("3", "Adult Content", RiskSeverity::High),
        RiskConfig::auto("4", "Harassment", RiskSeverity::Medium),
    ]
}

pub fn sample_manual_configs() -> Vec<RiskConfig> {
    vec![
        RiskConfig::manual("5", "Misinformation", RiskSeverity::High),
        RiskConfig::manual("6", "Spam", RiskSeverity::Low),
    ]
}

pub fn sample_queries() -> Vec<Query> {
    vec![
        Query {
            id: "1".to_string(),
            timestamp: ts(10, 15, 30),
            severity: Severity::Critical,
            query: "Security vulnerability detected in authentication system".to_string(),
            category: ContentCategory::Security,
            latency: 1250,
        },
        Query {
            id: "2".to_string(),
            timestamp: ts(10, 16, 45),
            severity: Severity::High,
            query: "Main API endpoint experiencing high latency".to_string(),
            category: ContentCategory::Performance,
            latency: 850,
        },
        Query {
            id: "3".to_string(),
            timestamp: ts(10, 18, 20),
            severity: Severity::Medium,
            query: "Missing alt tags on critical UI elements".to_string(),
            category: ContentCategory::Accessibility,
            latency: 450,
        },
        Query {
            id: "4".to_string(),
            timestamp: ts(10, 20, 15),
            severity: Severity::Low,
            query: "Documentation needs update for new API endpoints".to_string(),
            category: ContentCategory::Documentation,
            latency: 350,
        },
    ]
}

pub fn sample_saved_filters() -> Vec<SavedFilter> {
    vec![
        SavedFilter {
            id: "1".to_string(),
            name: "Security Issues".to_string(),
            config: FilterConfig {
                time_range: TimeRange::Last24Hours,
                start_date: None,
                end_date: None,
                severities: [Severity::Critical, Severity::High].into_iter().collect(),
                categories: [ContentCategory::Security].into_iter().collect(),
                sort_by: SortOption::MostRecent,
            },
        },
        SavedFilter {
            id: "2".to_string(),
            name: "Performance Monitor".to_string(),
            config: FilterConfig {
                time_range: TimeRange::Last7Days,
                start_date: None,
                end_date: None,
                severities: [Severity::High, Severity::Medium].into_iter().collect(),
                categories: [ContentCategory::Performance].into_iter().collect(),
                sort_by: SortOption::MostRecent,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids_are_disjoint() {
        let auto = sample_auto_configs();
        let manual = sample_manual_configs();
        assert!(auto.iter().all(|a| a.is_auto_extracted));
        assert!(manual.iter().all(|m| !m.is_auto_extracted));
        assert!(auto.iter().all(|a| manual.iter().all(|m| m.id != a.id)));
    }

    #[test]
    fn test_sample_queries_parse_timestamps() {
        let queries = sample_queries();
        let stamps: Vec<String> = queries.iter().map(|q| q.timestamp.to_rfc3339()).collect();
        assert_eq!(
            stamps,
            vec![
                "2024-02-04T10:15:30+00:00",
                "2024-02-04T10:16:45+00:00",
                "2024-02-04T10:18:20+00:00",
                "2024-02-04T10:20:15+00:00",
            ]
        );
    }
}
