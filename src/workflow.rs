//! Upload, analyze and render state machine.
//!
//! All transitions are plain methods on [`Workflow`]; nothing here knows
//! about widgets or the network. The shell feeds events in and reads the
//! state back out to draw it.

use crate::api::{AnalysisResult, ApiError};
use crate::preview::{PreviewHandle, PreviewManager};
use crate::selection::{self, SelectedFile, SelectionError};

const GENERIC_FAILURE: &str = "An error occurred during analysis";

/// Identifies one analysis call. Completions carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug)]
pub enum WorkflowState {
    Idle,
    Ready {
        file: SelectedFile,
        preview: PreviewHandle,
    },
    Analyzing {
        file: SelectedFile,
        preview: PreviewHandle,
        ticket: RequestTicket,
    },
    Complete {
        file: SelectedFile,
        preview: PreviewHandle,
        result: AnalysisResult,
    },
    Failed {
        file: SelectedFile,
        preview: PreviewHandle,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Ready,
    Analyzing,
    Complete,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub message: String,
}

/// What the shell needs to run one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub ticket: RequestTicket,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeRejected {
    NoFile,
    InFlight,
}

#[derive(Debug)]
pub struct Workflow {
    state: WorkflowState,
    previews: PreviewManager,
    banner: Option<Banner>,
    max_bytes: u64,
    next_ticket: u64,
    next_banner: u64,
}

impl Workflow {
    pub fn new(max_bytes: u64) -> Self {
        Workflow {
            state: WorkflowState::Idle,
            previews: PreviewManager::new(),
            banner: None,
            max_bytes,
            next_ticket: 1,
            next_banner: 1,
        }
    }

    pub fn status(&self) -> Status {
        match self.state {
            WorkflowState::Idle => Status::Idle,
            WorkflowState::Ready { .. } => Status::Ready,
            WorkflowState::Analyzing { .. } => Status::Analyzing,
            WorkflowState::Complete { .. } => Status::Complete,
            WorkflowState::Failed { .. } => Status::Failed,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::Ready { file, .. }
            | WorkflowState::Analyzing { file, .. }
            | WorkflowState::Complete { file, .. }
            | WorkflowState::Failed { file, .. } => Some(file),
        }
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::Ready { preview, .. }
            | WorkflowState::Analyzing { preview, .. }
            | WorkflowState::Complete { preview, .. }
            | WorkflowState::Failed { preview, .. } => Some(preview),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            WorkflowState::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn in_flight(&self) -> Option<RequestTicket> {
        match &self.state {
            WorkflowState::Analyzing { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    pub fn can_analyze(&self) -> bool {
        matches!(
            self.status(),
            Status::Ready | Status::Complete | Status::Failed
        )
    }

    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Accepts a new file from the dialog or a drop. Invalid files raise the
    /// banner and leave the state untouched. A pending analysis is abandoned.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), SelectionError> {
        if let Err(e) = selection::validate(&file, self.max_bytes) {
            tracing::warn!("Rejected {:?}: {}", file, e);
            self.raise(e.to_string());
            return Err(e);
        }

        if let Some(ticket) = self.in_flight() {
            tracing::info!("New file selected, abandoning analysis {:?}", ticket);
        }

        let preview = self.previews.select(&file);
        tracing::info!("Selected {} ({} bytes)", file.name, file.size());
        self.state = WorkflowState::Ready { file, preview };
        Ok(())
    }

    /// Starts an analysis of the current file.
    pub fn begin_analysis(&mut self) -> Result<AnalysisJob, AnalyzeRejected> {
        match std::mem::replace(&mut self.state, WorkflowState::Idle) {
            WorkflowState::Idle => {
                self.raise(SelectionError::NoFile.to_string());
                Err(AnalyzeRejected::NoFile)
            }
            analyzing @ WorkflowState::Analyzing { .. } => {
                self.state = analyzing;
                Err(AnalyzeRejected::InFlight)
            }
            WorkflowState::Ready { file, preview }
            | WorkflowState::Complete { file, preview, .. }
            | WorkflowState::Failed { file, preview, .. } => {
                let ticket = RequestTicket(self.next_ticket);
                self.next_ticket += 1;

                let job = AnalysisJob {
                    ticket,
                    file: file.clone(),
                };
                self.state = WorkflowState::Analyzing {
                    file,
                    preview,
                    ticket,
                };
                Ok(job)
            }
        }
    }

    /// Applies the outcome of an analysis. Returns false when the outcome
    /// belongs to a request the workflow no longer waits for.
    pub fn finish_analysis(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, ApiError>,
    ) -> bool {
        if self.in_flight() != Some(ticket) {
            tracing::debug!("Dropping stale outcome for {:?}", ticket);
            return false;
        }

        let WorkflowState::Analyzing { file, preview, .. } =
            std::mem::replace(&mut self.state, WorkflowState::Idle)
        else {
            return false;
        };

        self.state = match outcome {
            Ok(result) => WorkflowState::Complete {
                file,
                preview,
                result,
            },
            Err(e) => {
                let message = e.to_string();
                let error = if message.trim().is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message
                };
                tracing::warn!("Analysis failed: {}", error);
                self.raise(error.clone());
                WorkflowState::Failed {
                    file,
                    preview,
                    error,
                }
            }
        };
        true
    }

    /// Back to Idle. The banner is left alone; it has its own dismissal.
    pub fn reset(&mut self) {
        if let Some(ticket) = self.in_flight() {
            tracing::info!("Reset while analysis {:?} in flight", ticket);
        }
        self.previews.release();
        self.state = WorkflowState::Idle;
    }

    /// Shows `message` in the banner, replacing whatever was there.
    pub fn raise(&mut self, message: impl Into<String>) -> u64 {
        let id = self.next_banner;
        self.next_banner += 1;
        self.banner = Some(Banner {
            id,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self) {
        self.banner = None;
    }

    /// Timer-driven dismissal; a newer banner survives an older timer.
    pub fn dismiss_if(&mut self, id: u64) {
        if self.banner.as_ref().is_some_and(|b| b.id == id) {
            self.banner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 1024;

    fn image(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn text_file() -> SelectedFile {
        SelectedFile::new("notes.txt", "text/plain", b"hi".to_vec())
    }

    fn analyzed(workflow: &mut Workflow) -> RequestTicket {
        workflow.begin_analysis().unwrap().ticket
    }

    #[test]
    fn test_starts_idle() {
        let workflow = Workflow::new(LIMIT);
        assert_eq!(workflow.status(), Status::Idle);
        assert!(workflow.file().is_none());
        assert!(!workflow.can_analyze());
    }

    #[test]
    fn test_non_image_rejected_without_state_change() {
        let mut workflow = Workflow::new(LIMIT);
        assert!(workflow.select(text_file()).is_err());
        assert_eq!(workflow.status(), Status::Idle);
        assert_eq!(workflow.live_previews(), 0);
        assert_eq!(
            workflow.banner().unwrap().message,
            "Please upload an image file (.jpg, .png, etc)"
        );

        workflow.select(image("a.jpg")).unwrap();
        workflow.dismiss();
        assert!(workflow.select(text_file()).is_err());
        assert_eq!(workflow.status(), Status::Ready);
        assert_eq!(workflow.file().unwrap().name, "a.jpg");
        assert!(workflow.banner().is_some());
    }

    #[test]
    fn test_oversized_file_rejected() {
        let mut workflow = Workflow::new(2);
        assert!(matches!(
            workflow.select(image("big.jpg")),
            Err(SelectionError::TooLarge { .. })
        ));
        assert_eq!(workflow.status(), Status::Idle);
    }

    #[test]
    fn test_select_from_every_state_lands_in_ready() {
        let mut workflow = Workflow::new(LIMIT);

        workflow.select(image("a.jpg")).unwrap();
        assert_eq!(workflow.status(), Status::Ready);
        let first = workflow.preview().unwrap().clone();

        let ticket = analyzed(&mut workflow);
        workflow.finish_analysis(ticket, Ok(AnalysisResult::default()));
        assert_eq!(workflow.status(), Status::Complete);

        workflow.select(image("b.jpg")).unwrap();
        assert_eq!(workflow.status(), Status::Ready);
        assert!(workflow.result().is_none());
        assert_ne!(workflow.preview().unwrap().id(), first.id());
        assert_eq!(workflow.live_previews(), 1);

        let ticket = analyzed(&mut workflow);
        workflow.finish_analysis(ticket, Err(ApiError::Network("down".to_string())));
        assert_eq!(workflow.status(), Status::Failed);

        workflow.select(image("c.jpg")).unwrap();
        assert_eq!(workflow.status(), Status::Ready);
        assert_eq!(workflow.live_previews(), 1);
    }

    #[test]
    fn test_analyze_without_file_is_rejected() {
        let mut workflow = Workflow::new(LIMIT);
        assert_eq!(workflow.begin_analysis().unwrap_err(), AnalyzeRejected::NoFile);
        assert_eq!(workflow.status(), Status::Idle);
        assert_eq!(
            workflow.banner().unwrap().message,
            "Please upload an image first"
        );
    }

    #[test]
    fn test_second_analyze_while_in_flight_is_rejected() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();

        let job = workflow.begin_analysis().unwrap();
        assert_eq!(workflow.status(), Status::Analyzing);
        assert_eq!(job.file.name, "a.jpg");

        assert_eq!(workflow.begin_analysis().unwrap_err(), AnalyzeRejected::InFlight);
        assert_eq!(workflow.in_flight(), Some(job.ticket));
        assert!(workflow.banner().is_none());
    }

    #[test]
    fn test_success_completes() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();
        let ticket = analyzed(&mut workflow);

        let result = AnalysisResult {
            top_artist_name: Some("Turner".to_string()),
            ..Default::default()
        };
        assert!(workflow.finish_analysis(ticket, Ok(result.clone())));
        assert_eq!(workflow.status(), Status::Complete);
        assert_eq!(workflow.result(), Some(&result));
    }

    #[test]
    fn test_http_failure_reports_status_and_body() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();
        let ticket = analyzed(&mut workflow);

        workflow.finish_analysis(
            ticket,
            Err(ApiError::Http {
                status: 500,
                body: "boom".to_string(),
            }),
        );

        assert_eq!(workflow.status(), Status::Failed);
        let banner = &workflow.banner().unwrap().message;
        assert!(banner.contains("500"));
        assert!(banner.contains("boom"));
    }

    #[test]
    fn test_stale_outcome_ignored() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();
        let old = analyzed(&mut workflow);

        workflow.select(image("b.jpg")).unwrap();
        let current = analyzed(&mut workflow);

        assert!(!workflow.finish_analysis(old, Ok(AnalysisResult::default())));
        assert_eq!(workflow.in_flight(), Some(current));
        assert!(workflow.finish_analysis(current, Ok(AnalysisResult::default())));
        assert_eq!(workflow.status(), Status::Complete);
    }

    #[test]
    fn test_reset_releases_and_is_idempotent() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();
        workflow.raise("something went wrong");

        workflow.reset();
        assert_eq!(workflow.status(), Status::Idle);
        assert_eq!(workflow.live_previews(), 0);
        assert!(workflow.file().is_none());
        assert!(workflow.banner().is_some());

        workflow.reset();
        assert_eq!(workflow.status(), Status::Idle);
        assert_eq!(workflow.live_previews(), 0);
    }

    #[test]
    fn test_reset_during_analysis_discards_late_result() {
        let mut workflow = Workflow::new(LIMIT);
        workflow.select(image("a.jpg")).unwrap();
        let ticket = analyzed(&mut workflow);

        workflow.reset();
        assert!(!workflow.finish_analysis(ticket, Ok(AnalysisResult::default())));
        assert_eq!(workflow.status(), Status::Idle);
    }

    #[test]
    fn test_banner_timer_only_closes_its_own_banner() {
        let mut workflow = Workflow::new(LIMIT);
        let first = workflow.raise("first");
        let second = workflow.raise("second");

        workflow.dismiss_if(first);
        assert_eq!(workflow.banner().unwrap().message, "second");

        workflow.dismiss_if(second);
        assert!(workflow.banner().is_none());
    }
}
