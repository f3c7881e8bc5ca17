//! Moderation configurator: document upload, risk configurations and
//! latency thresholds.
//!
//! `ModerationState` owns everything the configurator screen shows. Every
//! operation is a synchronous transformation of that state; the only
//! asynchronous piece is document processing, which reports back through
//! [`ModerationState::complete_upload`].

mod latency;
mod upload;

pub use latency::*;
pub use upload::*;

use crate::model::{
    sample_auto_configs, sample_file, sample_manual_configs, ConsoleError, FileDetails,
    LatencySettings, RiskConfig, RiskConfigDraft, UploadStatus,
};

use rand::Rng;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Which guardrail a latency slider controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyChannel {
    Input,
    Output,
}

impl FromStr for LatencyChannel {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            other => Err(ConsoleError::UnknownChannel(other.to_string())),
        }
    }
}

/// The create/edit form for a manual configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    /// Id of the record being edited; `None` when adding.
    pub target: Option<String>,
    pub draft: RiskConfigDraft,
}

impl Editor {
    pub fn title(&self) -> &'static str {
        if self.target.is_some() {
            "Edit Configuration"
        } else {
            "Add New Configuration"
        }
    }
}

/// Configuration handed off by "Apply Configuration".
#[derive(Debug, Clone, Serialize)]
pub struct AppliedConfiguration {
    pub auto_configs: Vec<RiskConfig>,
    pub manual_configs: Vec<RiskConfig>,
    pub latency: LatencySettings,
}

/// Serializable view of the configurator.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationSnapshot {
    pub file: Option<FileDetails>,
    pub upload_error: Option<String>,
    pub auto_configs: Vec<RiskConfig>,
    pub manual_configs: Vec<RiskConfig>,
    pub latency: LatencySettings,
}

pub struct ModerationState {
    file: Option<FileDetails>,
    upload_error: Option<String>,
    upload_generation: u64,
    auto_configs: Vec<RiskConfig>,
    manual_configs: Vec<RiskConfig>,
    input: LatencySlider,
    output: LatencySlider,
}

impl Default for ModerationState {
    fn default() -> Self {
        let latency = LatencySettings::default();
        Self {
            file: Some(sample_file()),
            upload_error: None,
            upload_generation: 0,
            auto_configs: sample_auto_configs(),
            manual_configs: sample_manual_configs(),
            input: LatencySlider::new(latency.input),
            output: LatencySlider::new(latency.output),
        }
    }
}

impl ModerationState {
    pub fn file(&self) -> Option<&FileDetails> {
        self.file.as_ref()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    pub fn auto_configs(&self) -> &[RiskConfig] {
        &self.auto_configs
    }

    pub fn manual_configs(&self) -> &[RiskConfig] {
        &self.manual_configs
    }

    pub fn latency(&self) -> LatencySettings {
        LatencySettings {
            input: self.input.range(),
            output: self.output.range(),
        }
    }

    pub fn slider(&self, channel: LatencyChannel) -> &LatencySlider {
        match channel {
            LatencyChannel::Input => &self.input,
            LatencyChannel::Output => &self.output,
        }
    }

    pub fn slider_mut(&mut self, channel: LatencyChannel) -> &mut LatencySlider {
        match channel {
            LatencyChannel::Input => &mut self.input,
            LatencyChannel::Output => &mut self.output,
        }
    }

    pub fn snapshot(&self) -> ModerationSnapshot {
        ModerationSnapshot {
            file: self.file.clone(),
            upload_error: self.upload_error.clone(),
            auto_configs: self.auto_configs.clone(),
            manual_configs: self.manual_configs.clone(),
            latency: self.latency(),
        }
    }

    // --- Upload ---

    /// Validate `file` and mark it as processing.
    ///
    /// Returns the generation that the eventual completion must carry.
    pub fn begin_upload(
        &mut self,
        file: &FileRef,
        max_bytes: u64,
    ) -> Result<(u64, FileDetails), ConsoleError> {
        file.validate(max_bytes)?;

        let details = FileDetails {
            name: file.name.clone(),
            size: file.size,
            page_count: 0,
            status: UploadStatus::Processing,
        };
        self.upload_generation += 1;
        self.upload_error = None;
        self.file = Some(details.clone());

        tracing::info!(
            "Upload {}: processing {} ({} bytes)",
            self.upload_generation,
            file.name,
            file.size
        );
        Ok((self.upload_generation, details))
    }

    /// Apply the processor's outcome. Completions for a superseded upload
    /// are dropped; returns whether the outcome was applied.
    pub fn complete_upload(
        &mut self,
        generation: u64,
        outcome: Result<ProcessedDocument, ConsoleError>,
    ) -> bool {
        if generation != self.upload_generation {
            tracing::debug!(
                "Dropping completion for upload {} (current is {})",
                generation,
                self.upload_generation
            );
            return false;
        }
        let Some(file) = self.file.as_mut() else {
            return false;
        };

        match outcome {
            Ok(doc) => {
                file.status = UploadStatus::Completed;
                file.page_count = doc.page_count;
                self.auto_configs = doc.extracted;
                tracing::info!(
                    "Upload {}: {} completed, {} pages, {} extracted configs",
                    generation,
                    file.name,
                    doc.page_count,
                    self.auto_configs.len()
                );
            }
            Err(e) => {
                tracing::error!("Upload {}: {} failed: {}", generation, file.name, e);
                file.status = UploadStatus::Error;
                self.upload_error = Some(e.to_string());
            }
        }
        true
    }

    // --- Manual configurations ---

    /// Build the editor for adding (`None`) or editing a manual record.
    pub fn editor(&self, target: Option<&str>) -> Result<Editor, ConsoleError> {
        match target {
            None => Ok(Editor {
                target: None,
                draft: RiskConfigDraft {
                    category: String::new(),
                    severity: Default::default(),
                },
            }),
            Some(id) => {
                let existing = self.find_manual(id)?;
                Ok(Editor {
                    target: Some(existing.id.clone()),
                    draft: RiskConfigDraft {
                        category: existing.category.clone(),
                        severity: existing.severity,
                    },
                })
            }
        }
    }

    /// Submit the editor: add when there is no target, otherwise edit.
    pub fn submit(
        &mut self,
        target: Option<&str>,
        draft: RiskConfigDraft,
    ) -> Result<RiskConfig, ConsoleError> {
        match target {
            None => self.add_config(draft),
            Some(id) => self.update_config(id, draft),
        }
    }

    pub fn add_config(&mut self, draft: RiskConfigDraft) -> Result<RiskConfig, ConsoleError> {
        let category = validate_category(&draft.category)?;
        let config = RiskConfig {
            id: self.fresh_id(&mut rand::thread_rng()),
            category,
            severity: draft.severity,
            is_auto_extracted: false,
        };
        tracing::info!("Adding manual config {} ({})", config.category, config.id);
        self.manual_configs.push(config.clone());
        Ok(config)
    }

    /// Replace category and severity in place, keeping id and origin.
    pub fn update_config(
        &mut self,
        id: &str,
        draft: RiskConfigDraft,
    ) -> Result<RiskConfig, ConsoleError> {
        let category = validate_category(&draft.category)?;
        let config = self
            .manual_configs
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))?;

        config.category = category;
        config.severity = draft.severity;
        tracing::info!("Updated manual config {}", id);
        Ok(config.clone())
    }

    /// Remove a manual record. Unknown ids are ignored.
    pub fn delete_config(&mut self, id: &str) -> bool {
        let before = self.manual_configs.len();
        self.manual_configs.retain(|c| c.id != id);
        let removed = self.manual_configs.len() != before;
        if removed {
            tracing::info!("Deleted manual config {}", id);
        }
        removed
    }

    fn find_manual(&self, id: &str) -> Result<&RiskConfig, ConsoleError> {
        self.manual_configs
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.auto_configs
            .iter()
            .chain(self.manual_configs.iter())
            .any(|c| c.id == id)
    }

    fn fresh_id<R: Rng>(&self, rng: &mut R) -> String {
        loop {
            let id: String = (0..ID_LEN)
                .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if !self.id_in_use(&id) {
                return id;
            }
        }
    }

    // --- Whole-screen actions ---

    /// Clear the document and both lists and restore default latency.
    pub fn reset(&mut self) {
        let latency = LatencySettings::default();
        self.file = None;
        self.upload_error = None;
        self.upload_generation += 1;
        self.auto_configs.clear();
        self.manual_configs.clear();
        self.input = LatencySlider::new(latency.input);
        self.output = LatencySlider::new(latency.output);
        tracing::info!("Configurator reset");
    }

    pub fn apply(&self) -> AppliedConfiguration {
        let applied = AppliedConfiguration {
            auto_configs: self.auto_configs.clone(),
            manual_configs: self.manual_configs.clone(),
            latency: self.latency(),
        };
        let json = serde_json::to_string(&applied).unwrap_or_else(|_| "{}".to_string());
        tracing::info!(configuration = %json, "Applying moderation configuration");
        applied
    }
}

fn validate_category(category: &str) -> Result<String, ConsoleError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::invalid("category"));
    }
    Ok(trimmed.to_string())
}

/// Run the processor for `generation` in the background and report back.
pub fn spawn_processing(
    state: Arc<RwLock<ModerationState>>,
    processor: Arc<dyn DocumentProcessor>,
    generation: u64,
    file: FileRef,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = processor.submit(&file).await;
        state.write().await.complete_upload(generation, outcome);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LatencyRange, RiskSeverity};
    use std::collections::HashSet;
    use std::time::Duration;

    const MAX: u64 = 10 * 1024 * 1024;

    fn report() -> FileRef {
        FileRef {
            name: "report.pdf".to_string(),
            size: 3_000_000,
            content_type: Some(PDF_MIME.to_string()),
        }
    }

    fn draft(category: &str, severity: RiskSeverity) -> RiskConfigDraft {
        RiskConfigDraft {
            category: category.to_string(),
            severity,
        }
    }

    struct FailingProcessor;

    impl DocumentProcessor for FailingProcessor {
        fn submit<'a>(&'a self, _file: &'a FileRef) -> ProcessFuture<'a> {
            Box::pin(async {
                Err(ConsoleError::UploadProcessingFailed("corrupt xref table".to_string()))
            })
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ModerationState::default();
        assert_eq!(state.file().unwrap().name, "sample-document.pdf");
        assert_eq!(state.auto_configs().len(), 4);
        assert_eq!(state.manual_configs().len(), 2);
        assert_eq!(state.latency(), LatencySettings::default());
    }

    #[tokio::test]
    async fn test_upload_end_to_end() {
        let state = Arc::new(RwLock::new(ModerationState::default()));
        let processor: Arc<dyn DocumentProcessor> =
            Arc::new(SimulatedProcessor::new(Duration::from_millis(20)));

        let (generation, _) = state.write().await.begin_upload(&report(), MAX).unwrap();
        {
            let s = state.read().await;
            let file = s.file().unwrap();
            assert_eq!(file.status, UploadStatus::Processing);
            assert_eq!(file.name, "report.pdf");
            assert_eq!(file.size, 3_000_000);
            assert_eq!(file.page_count, 0);
        }

        spawn_processing(state.clone(), processor, generation, report())
            .await
            .unwrap();

        let s = state.read().await;
        let file = s.file().unwrap();
        assert_eq!(file.status, UploadStatus::Completed);
        assert_eq!(file.page_count, 5);
        let extracted: Vec<_> = s
            .auto_configs()
            .iter()
            .map(|c| (c.category.as_str(), c.severity))
            .collect();
        assert_eq!(
            extracted,
            vec![("Hate Speech", RiskSeverity::High), ("Violence", RiskSeverity::Medium)]
        );
    }

    #[tokio::test]
    async fn test_processing_failure_sets_error_status() {
        let state = Arc::new(RwLock::new(ModerationState::default()));
        let (generation, _) = state.write().await.begin_upload(&report(), MAX).unwrap();

        spawn_processing(state.clone(), Arc::new(FailingProcessor), generation, report())
            .await
            .unwrap();

        let s = state.read().await;
        assert_eq!(s.file().unwrap().status, UploadStatus::Error);
        assert!(s.upload_error().unwrap().contains("corrupt xref table"));
        assert_eq!(s.auto_configs().len(), 4);
    }

    #[test]
    fn test_superseded_upload_is_dropped() {
        let mut state = ModerationState::default();
        let (first, _) = state.begin_upload(&report(), MAX).unwrap();
        let second_file = FileRef {
            name: "second.pdf".to_string(),
            ..report()
        };
        let (second, details) = state.begin_upload(&second_file, MAX).unwrap();
        assert_eq!(details.status, UploadStatus::Processing);
        assert_ne!(first, second);

        let doc = ProcessedDocument {
            page_count: 5,
            extracted: SimulatedProcessor::extracted(),
        };
        assert!(!state.complete_upload(first, Ok(doc.clone())));
        assert_eq!(state.file().unwrap().status, UploadStatus::Processing);

        assert!(state.complete_upload(second, Ok(doc)));
        assert_eq!(state.file().unwrap().name, "second.pdf");
        assert_eq!(state.file().unwrap().status, UploadStatus::Completed);
    }

    #[test]
    fn test_rejected_upload_leaves_state_intact() {
        let mut state = ModerationState::default();
        let before = state.snapshot();
        let err = state
            .begin_upload(
                &FileRef {
                    name: "photo.png".to_string(),
                    size: 1000,
                    content_type: None,
                },
                MAX,
            )
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnsupportedFileType(_)));
        assert_eq!(state.file(), before.file.as_ref());
    }

    #[test]
    fn test_add_manual_config() {
        let mut state = ModerationState::default();
        let before: HashSet<String> = state
            .auto_configs()
            .iter()
            .chain(state.manual_configs())
            .map(|c| c.id.clone())
            .collect();

        let added = state.add_config(draft("Spam-like", RiskSeverity::Low)).unwrap();

        assert_eq!(state.manual_configs().len(), 3);
        assert_eq!(state.manual_configs().last(), Some(&added));
        assert!(!added.is_auto_extracted);
        assert_eq!(added.category, "Spam-like");
        assert_eq!(added.severity, RiskSeverity::Low);
        assert_eq!(added.id.len(), ID_LEN);
        assert!(!before.contains(&added.id));
    }

    #[test]
    fn test_empty_category_is_rejected() {
        let mut state = ModerationState::default();
        let err = state.add_config(draft("   ", RiskSeverity::High)).unwrap_err();
        assert_eq!(err, ConsoleError::ValidationFailed { field: "category" });
        assert_eq!(state.manual_configs().len(), 2);
    }

    #[test]
    fn test_edit_preserves_identity() {
        let mut state = ModerationState::default();
        let editor = state.editor(Some("6")).unwrap();
        assert_eq!(editor.title(), "Edit Configuration");
        assert_eq!(editor.draft, draft("Spam", RiskSeverity::Low));

        let updated = state
            .submit(Some("6"), draft("Bulk Spam", RiskSeverity::Medium))
            .unwrap();
        assert_eq!(updated, RiskConfig::manual("6", "Bulk Spam", RiskSeverity::Medium));
        assert_eq!(state.manual_configs()[1], updated);
    }

    #[test]
    fn test_auto_extracted_entries_are_not_editable() {
        let mut state = ModerationState::default();
        assert_eq!(
            state.editor(Some("1")).unwrap_err(),
            ConsoleError::NotFound("1".to_string())
        );
        assert!(state.update_config("1", draft("X", RiskSeverity::Low)).is_err());
        assert!(!state.delete_config("1"));
        assert_eq!(state.auto_configs().len(), 4);
    }

    #[test]
    fn test_add_editor_starts_empty() {
        let state = ModerationState::default();
        let editor = state.editor(None).unwrap();
        assert_eq!(editor.title(), "Add New Configuration");
        assert!(editor.draft.category.is_empty());
        assert_eq!(editor.draft.severity, RiskSeverity::Medium);
    }

    #[test]
    fn test_delete_manual_config() {
        let mut state = ModerationState::default();
        assert!(state.delete_config("5"));
        assert!(!state.delete_config("5"));
        assert_eq!(state.manual_configs().len(), 1);
        assert_eq!(state.manual_configs()[0].id, "6");
    }

    #[test]
    fn test_reset_and_apply() {
        let mut state = ModerationState::default();
        state
            .slider_mut(LatencyChannel::Input)
            .set_range(100, 2000)
            .unwrap();
        state.slider_mut(LatencyChannel::Output).press(
            Handle::Min,
            TrackRect {
                left: 0.0,
                width: 100.0,
            },
        );

        state.reset();

        assert!(state.file().is_none());
        assert!(state.auto_configs().is_empty());
        assert!(state.manual_configs().is_empty());
        assert_eq!(state.latency().input, LatencyRange { min: 30, max: 1000 });
        assert!(!state.slider(LatencyChannel::Output).is_dragging());

        let applied = state.apply();
        assert!(applied.manual_configs.is_empty());
        assert_eq!(applied.latency, LatencySettings::default());
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("input".parse::<LatencyChannel>(), Ok(LatencyChannel::Input));
        assert_eq!("output".parse::<LatencyChannel>(), Ok(LatencyChannel::Output));
        assert_eq!(
            "sideways".parse::<LatencyChannel>(),
            Err(ConsoleError::UnknownChannel("sideways".to_string()))
        );
    }
}
