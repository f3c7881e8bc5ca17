//! Entity types for documents, risk configurations, latency and queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Document upload
// ============================================================================

/// Processing status of the uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Processing,
    Completed,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Capitalised label for the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }
}

/// The document currently held by the configurator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetails {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    pub page_count: u32,
    pub status: UploadStatus,
}

// ============================================================================
// Risk configuration
// ============================================================================

/// Severity assigned to a risk category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskSeverity {
    High,
    #[default]
    Medium,
    Low,
}

impl RiskSeverity {
    pub const ALL: [RiskSeverity; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub id: String,
    pub category: String,
    pub severity: RiskSeverity,
    pub is_auto_extracted: bool,
}

impl RiskConfig {
    pub fn auto(id: &str, category: &str, severity: RiskSeverity) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            severity,
            is_auto_extracted: true,
        }
    }

    pub fn manual(id: &str, category: &str, severity: RiskSeverity) -> Self {
        Self {
            is_auto_extracted: false,
            ..Self::auto(id, category, severity)
        }
    }
}

/// Editable part of a risk configuration, as submitted by the editor form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfigDraft {
    pub category: String,
    #[serde(default)]
    pub severity: RiskSeverity,
}

// ============================================================================
// Latency
// ============================================================================

/// A millisecond window picked on a latency slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    pub input: LatencyRange,
    pub output: LatencyRange,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            input: LatencyRange { min: 30, max: 1000 },
            output: LatencyRange { min: 30, max: 1000 },
        }
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Severity of a moderation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Info,
    ];

    /// Sort rank. Low and Info share the bottom rank.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
            Self::Low | Self::Info => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
    Security,
    Performance,
    Accessibility,
    #[serde(rename = "Best Practices")]
    BestPractices,
    #[serde(rename = "SEO")]
    Seo,
    #[serde(rename = "UI/UX")]
    UiUx,
    Documentation,
    #[serde(rename = "Code Quality")]
    CodeQuality,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 8] = [
        Self::Security,
        Self::Performance,
        Self::Accessibility,
        Self::BestPractices,
        Self::Seo,
        Self::UiUx,
        Self::Documentation,
        Self::CodeQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::Accessibility => "Accessibility",
            Self::BestPractices => "Best Practices",
            Self::Seo => "SEO",
            Self::UiUx => "UI/UX",
            Self::Documentation => "Documentation",
            Self::CodeQuality => "Code Quality",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single moderation event shown in the dashboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub query: String,
    pub category: ContentCategory,
    /// Milliseconds
    pub latency: u32,
}

// ============================================================================
// Filters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        Self::Last24Hours,
        Self::Last7Days,
        Self::Last30Days,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Last24Hours => "Last 24 hours",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Custom => "Custom Range",
        }
    }

    /// Width of a rolling window; `None` for a custom range.
    pub fn window(&self) -> Option<chrono::Duration> {
        match self {
            Self::Last24Hours => Some(chrono::Duration::hours(24)),
            Self::Last7Days => Some(chrono::Duration::days(7)),
            Self::Last30Days => Some(chrono::Duration::days(30)),
            Self::Custom => None,
        }
    }
}

/// Sort order of the dashboard view. Unrecognised values keep input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    MostRecent,
    SeverityHighLow,
    SeverityLowHigh,
    #[serde(other)]
    Unordered,
}

impl SortOption {
    pub const SELECTABLE: [SortOption; 3] = [
        Self::MostRecent,
        Self::SeverityHighLow,
        Self::SeverityLowHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MostRecent => "most_recent",
            Self::SeverityHighLow => "severity_high_low",
            Self::SeverityLowHigh => "severity_low_high",
            Self::Unordered => "unordered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MostRecent => "Most Recent",
            Self::SeverityHighLow => "Severity (High to Low)",
            Self::SeverityLowHigh => "Severity (Low to High)",
            Self::Unordered => "Unordered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub time_range: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub severities: BTreeSet<Severity>,
    #[serde(default)]
    pub categories: BTreeSet<ContentCategory>,
    pub sort_by: SortOption,
}

impl Default for FilterConfig {
    /// 24h, every severity and category, most recent first.
    fn default() -> Self {
        Self {
            time_range: TimeRange::Last24Hours,
            start_date: None,
            end_date: None,
            severities: Severity::ALL.into_iter().collect(),
            categories: ContentCategory::ALL.into_iter().collect(),
            sort_by: SortOption::MostRecent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    pub config: FilterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_rank() {
        assert_eq!(Severity::Critical.rank(), 3);
        assert_eq!(Severity::High.rank(), 2);
        assert_eq!(Severity::Medium.rank(), 1);
        assert_eq!(Severity::Low.rank(), Severity::Info.rank());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ContentCategory::BestPractices).unwrap(),
            r#""Best Practices""#
        );
        assert_eq!(serde_json::to_string(&TimeRange::Last7Days).unwrap(), r#""7d""#);
        assert_eq!(
            serde_json::to_string(&UploadStatus::Processing).unwrap(),
            r#""processing""#
        );

        let cat: ContentCategory = serde_json::from_str(r#""UI/UX""#).unwrap();
        assert_eq!(cat, ContentCategory::UiUx);
    }

    #[test]
    fn test_unknown_sort_is_unordered() {
        let sort: SortOption = serde_json::from_str(r#""alphabetical""#).unwrap();
        assert_eq!(sort, SortOption::Unordered);

        let sort: SortOption = serde_json::from_str(r#""severity_low_high""#).unwrap();
        assert_eq!(sort, SortOption::SeverityLowHigh);
    }

    #[test]
    fn test_risk_severity_defaults_to_medium() {
        assert_eq!(RiskSeverity::default(), RiskSeverity::Medium);
        let draft: RiskConfigDraft = serde_json::from_str(r#"{"category":"Spam"}"#).unwrap();
        assert_eq!(draft.severity, RiskSeverity::Medium);
    }

    #[test]
    fn test_default_filter_selects_everything() {
        let filter = FilterConfig::default();
        assert_eq!(filter.time_range, TimeRange::Last24Hours);
        assert_eq!(filter.severities.len(), 5);
        assert_eq!(filter.categories.len(), 8);
        assert_eq!(filter.sort_by, SortOption::MostRecent);
    }

    #[test]
    fn test_filter_config_without_sets_defaults_to_empty() {
        let filter: FilterConfig =
            serde_json::from_str(r#"{"time_range":"30d","sort_by":"most_recent"}"#).unwrap();
        assert!(filter.severities.is_empty());
        assert!(filter.categories.is_empty());
        assert!(filter.start_date.is_none());
    }
}
