//! Askama page templates and the view models they render.

use crate::dashboard::{selection_summary, DashboardState};
use crate::model::{
    ContentCategory, FileDetails, Query, RiskConfig, RiskSeverity, Severity, SortOption,
    TimeRange, UploadStatus,
};
use crate::moderation::{Editor, LatencyChannel, ModerationState, LATENCY_MAX_MS, LATENCY_MIN_MS};

use askama::Template;
use chrono::{DateTime, Utc};

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        }
    }
}

// ============================================================================
// Moderation configurator
// ============================================================================

pub struct FileView {
    pub name: String,
    pub size: String,
    pub page_count: u32,
    pub status: String,
    pub status_class: &'static str,
    pub state: &'static str,
}

impl FileView {
    fn new(file: &FileDetails) -> Self {
        Self {
            name: file.name.clone(),
            size: format_megabytes(file.size),
            page_count: file.page_count,
            status: file.status.label().to_string(),
            status_class: status_class(file.status),
            state: file.status.as_str(),
        }
    }
}

pub struct ConfigRow {
    pub id: String,
    pub category: String,
    pub severity: &'static str,
    pub badge_class: &'static str,
}

impl ConfigRow {
    fn new(config: &RiskConfig) -> Self {
        Self {
            id: config.id.clone(),
            category: config.category.clone(),
            severity: config.severity.as_str(),
            badge_class: risk_badge_class(config.severity),
        }
    }
}

pub struct SliderView {
    pub channel: &'static str,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub min_percent: String,
    pub max_percent: String,
    pub width_percent: String,
}

pub struct EditorView {
    pub title: &'static str,
    pub target: String,
    pub category: String,
    pub severities: Vec<SelectOption>,
}

impl EditorView {
    fn new(editor: &Editor) -> Self {
        Self {
            title: editor.title(),
            target: editor.target.clone().unwrap_or_default(),
            category: editor.draft.category.clone(),
            severities: RiskSeverity::ALL
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.as_str(), *s == editor.draft.severity))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "moderation.html")]
pub struct ModerationPage {
    pub title: String,
    pub file: Option<FileView>,
    pub upload_error: String,
    pub auto_rows: Vec<ConfigRow>,
    pub manual_rows: Vec<ConfigRow>,
    pub sliders: Vec<SliderView>,
    pub editor: Option<EditorView>,
    pub latency_min: u32,
    pub latency_max_seconds: u32,
}

impl ModerationPage {
    pub fn new(state: &ModerationState, editor: Option<&Editor>) -> Self {
        let sliders = [
            (LatencyChannel::Input, "input", "Input Guardrail Latency"),
            (LatencyChannel::Output, "output", "Output Guardrail Latency"),
        ]
        .into_iter()
        .map(|(channel, name, label)| {
            let slider = state.slider(channel);
            let range = slider.range();
            let (min_pct, max_pct) = slider.percents();
            SliderView {
                channel: name,
                label,
                min: range.min,
                max: range.max,
                min_percent: format!("{:.3}", min_pct),
                max_percent: format!("{:.3}", max_pct),
                width_percent: format!("{:.3}", max_pct - min_pct),
            }
        })
        .collect();

        Self {
            title: "Content Moderation Configurator".to_string(),
            file: state.file().map(FileView::new),
            upload_error: state.upload_error().unwrap_or_default().to_string(),
            auto_rows: state.auto_configs().iter().map(ConfigRow::new).collect(),
            manual_rows: state.manual_configs().iter().map(ConfigRow::new).collect(),
            sliders,
            editor: editor.map(EditorView::new),
            latency_min: LATENCY_MIN_MS,
            latency_max_seconds: LATENCY_MAX_MS / 1000,
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

pub struct SavedFilterView {
    pub id: String,
    pub name: String,
}

pub struct QueryRow {
    pub id: String,
    pub timestamp: String,
    pub severity: &'static str,
    pub badge_class: &'static str,
    pub row_class: &'static str,
    pub text: String,
    pub category: &'static str,
    pub latency: String,
}

impl QueryRow {
    fn new(query: &Query) -> Self {
        Self {
            id: query.id.clone(),
            timestamp: format_timestamp(&query.timestamp),
            severity: query.severity.as_str(),
            badge_class: severity_badge_class(query.severity),
            row_class: match query.severity {
                Severity::Critical => "row-critical",
                Severity::High => "row-high",
                _ => "",
            },
            text: query.query.clone(),
            category: query.category.as_str(),
            latency: format_latency(query.latency),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub title: String,
    pub saved: Vec<SavedFilterView>,
    pub time_ranges: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    pub severities: Vec<SelectOption>,
    pub severity_summary: String,
    pub categories: Vec<SelectOption>,
    pub category_summary: String,
    pub rows: Vec<QueryRow>,
}

impl DashboardPage {
    pub fn new(state: &DashboardState) -> Self {
        let filters = state.filters();

        Self {
            title: "Content Moderation Dashboard".to_string(),
            saved: state
                .saved_filters()
                .into_iter()
                .map(|f| SavedFilterView { id: f.id, name: f.name })
                .collect(),
            time_ranges: TimeRange::ALL
                .iter()
                .map(|t| SelectOption::new(t.as_str(), t.label(), *t == filters.time_range))
                .collect(),
            sort_options: SortOption::SELECTABLE
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.label(), *s == filters.sort_by))
                .collect(),
            severities: Severity::ALL
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.as_str(), filters.severities.contains(s)))
                .collect(),
            severity_summary: selection_summary(filters.severities.len(), Severity::ALL.len()),
            categories: ContentCategory::ALL
                .iter()
                .map(|c| SelectOption::new(c.as_str(), c.as_str(), filters.categories.contains(c)))
                .collect(),
            category_summary: selection_summary(
                filters.categories.len(),
                ContentCategory::ALL.len(),
            ),
            rows: state.view().iter().map(QueryRow::new).collect(),
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Size in MiB with two decimals.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Milliseconds with thousands separators.
pub fn format_latency(ms: u32) -> String {
    let digits = ms.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{} ms", out)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn status_class(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Completed => "badge-green",
        UploadStatus::Processing => "badge-blue",
        UploadStatus::Error => "badge-red",
        UploadStatus::Idle => "badge-gray",
    }
}

fn risk_badge_class(severity: RiskSeverity) -> &'static str {
    match severity {
        RiskSeverity::High => "badge-red",
        RiskSeverity::Medium => "badge-yellow",
        RiskSeverity::Low => "badge-green",
    }
}

fn severity_badge_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "badge-purple",
        Severity::High => "badge-red",
        Severity::Medium => "badge-yellow",
        Severity::Low => "badge-green",
        Severity::Info => "badge-blue",
    }
}
