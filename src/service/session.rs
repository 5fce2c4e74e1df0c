//! Analysis session state machine
//!
//! The session moves through upload → processing → complete/failed as a
//! tagged union; every change goes through [`Session::apply`] as a discrete
//! event. Events that make no sense in the current state are ignored with a
//! warning rather than corrupting it.

use crate::model::analysis::AnalyzeDocumentResponse;

/// The five fixed processing steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Upload,
    Extract,
    Analyze,
    Identify,
    Compile,
}

impl StepId {
    pub const ALL: [StepId; 5] = [
        StepId::Upload,
        StepId::Extract,
        StepId::Analyze,
        StepId::Identify,
        StepId::Compile,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            StepId::Upload => "Uploading document...",
            StepId::Extract => "Extracting text content...",
            StepId::Analyze => "Analyzing legal structure...",
            StepId::Identify => "Identifying key clauses and terms...",
            StepId::Compile => "Compiling insights and summary...",
        }
    }
}

/// Progress of one processing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStep {
    pub id: StepId,
    pub label: &'static str,
    pub completed: bool,
    pub current: bool,
}

/// Fresh step list for a new (or retried) processing run.
pub fn initial_steps() -> Vec<ProcessingStep> {
    StepId::ALL
        .into_iter()
        .map(|id| ProcessingStep {
            id,
            label: id.label(),
            completed: false,
            current: false,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub enum SessionState {
    AwaitingUpload,
    Processing {
        file_name: String,
        steps: Vec<ProcessingStep>,
    },
    Complete {
        file_name: String,
        analysis: AnalyzeDocumentResponse,
    },
    Failed {
        file_name: String,
        message: String,
    },
}

impl SessionState {
    pub const fn name(&self) -> &'static str {
        match self {
            SessionState::AwaitingUpload => "awaiting_upload",
            SessionState::Processing { .. } => "processing",
            SessionState::Complete { .. } => "complete",
            SessionState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    FileAccepted { file_name: String },
    StepStarted(StepId),
    StepCompleted(StepId),
    AnalysisSucceeded(AnalyzeDocumentResponse),
    AnalysisFailed { message: String },
    RetryRequested,
    Reset,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingUpload,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply one event to the session.
    ///
    /// Transitions:
    /// - `FileAccepted` from `AwaitingUpload`/`Complete`/`Failed` enters
    ///   `Processing` with fresh steps.
    /// - `StepStarted`/`StepCompleted` update step flags while `Processing`.
    /// - `AnalysisSucceeded`/`AnalysisFailed` leave `Processing` for
    ///   `Complete`/`Failed`.
    /// - `RetryRequested` from `Failed` re-enters `Processing` for the same
    ///   file with fresh steps.
    /// - `Reset` returns to `AwaitingUpload` from any state.
    pub fn apply(&mut self, event: SessionEvent) {
        match (&mut self.state, event) {
            (_, SessionEvent::Reset) => {
                self.state = SessionState::AwaitingUpload;
            }
            (
                SessionState::AwaitingUpload
                | SessionState::Complete { .. }
                | SessionState::Failed { .. },
                SessionEvent::FileAccepted { file_name },
            ) => {
                self.state = SessionState::Processing {
                    file_name,
                    steps: initial_steps(),
                };
            }
            (SessionState::Processing { steps, .. }, SessionEvent::StepStarted(id)) => {
                if let Some(step) = steps.iter_mut().find(|s| s.id == id) {
                    step.current = true;
                }
            }
            (SessionState::Processing { steps, .. }, SessionEvent::StepCompleted(id)) => {
                if let Some(step) = steps.iter_mut().find(|s| s.id == id) {
                    step.current = false;
                    step.completed = true;
                }
            }
            (
                SessionState::Processing { file_name, .. },
                SessionEvent::AnalysisSucceeded(analysis),
            ) => {
                self.state = SessionState::Complete {
                    file_name: std::mem::take(file_name),
                    analysis,
                };
            }
            (
                SessionState::Processing { file_name, .. },
                SessionEvent::AnalysisFailed { message },
            ) => {
                self.state = SessionState::Failed {
                    file_name: std::mem::take(file_name),
                    message,
                };
            }
            (SessionState::Failed { file_name, .. }, SessionEvent::RetryRequested) => {
                self.state = SessionState::Processing {
                    file_name: std::mem::take(file_name),
                    steps: initial_steps(),
                };
            }
            (state, event) => {
                tracing::warn!(
                    state = state.name(),
                    event = ?event,
                    "Ignoring event not valid in current session state"
                );
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::analysis::{
        AnalyzeDocumentResponse, ContractPeriod, DocumentSummary, KeyDataPoints,
    };
    use std::collections::HashMap;

    fn sample_response() -> AnalyzeDocumentResponse {
        AnalyzeDocumentResponse {
            namespace: "doc-123".to_string(),
            summary: DocumentSummary {
                important_contract_terms: HashMap::new(),
                key_data_points: KeyDataPoints {
                    contract_period: ContractPeriod {
                        start_date: "2026-01-01".to_string(),
                        end_date: "2026-12-31".to_string(),
                        term_description: "One year".to_string(),
                    },
                    financial_terms: vec![],
                    key_deadlines: vec![],
                    parties_involved: vec![],
                },
                legal_terms_glossary: HashMap::new(),
                summary: "A contract.".to_string(),
            },
        }
    }

    fn accepted(name: &str) -> SessionEvent {
        SessionEvent::FileAccepted {
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_file_accepted_enters_processing_with_fresh_steps() {
        let mut session = Session::new();
        session.apply(accepted("contract.pdf"));

        match session.state() {
            SessionState::Processing { file_name, steps } => {
                assert_eq!(file_name, "contract.pdf");
                assert_eq!(steps.len(), 5);
                assert!(steps.iter().all(|s| !s.completed && !s.current));
                assert_eq!(steps[0].label, "Uploading document...");
            }
            other => panic!("expected processing, got {}", other.name()),
        }
    }

    #[test]
    fn test_step_flags_track_progress() {
        let mut session = Session::new();
        session.apply(accepted("contract.pdf"));
        session.apply(SessionEvent::StepStarted(StepId::Upload));

        match session.state() {
            SessionState::Processing { steps, .. } => {
                assert!(steps[0].current && !steps[0].completed);
            }
            other => panic!("expected processing, got {}", other.name()),
        }

        session.apply(SessionEvent::StepCompleted(StepId::Upload));
        match session.state() {
            SessionState::Processing { steps, .. } => {
                assert!(!steps[0].current && steps[0].completed);
                assert!(!steps[1].completed);
            }
            other => panic!("expected processing, got {}", other.name()),
        }
    }

    #[test]
    fn test_success_transitions_to_complete() {
        let mut session = Session::new();
        session.apply(accepted("contract.pdf"));
        session.apply(SessionEvent::AnalysisSucceeded(sample_response()));

        match session.state() {
            SessionState::Complete {
                file_name,
                analysis,
            } => {
                assert_eq!(file_name, "contract.pdf");
                assert_eq!(analysis.namespace, "doc-123");
            }
            other => panic!("expected complete, got {}", other.name()),
        }
    }

    #[test]
    fn test_failure_then_retry_reprocesses_same_file() {
        let mut session = Session::new();
        session.apply(accepted("contract.pdf"));
        session.apply(SessionEvent::AnalysisFailed {
            message: "Request timed out.".to_string(),
        });

        assert!(matches!(session.state(), SessionState::Failed { .. }));

        session.apply(SessionEvent::RetryRequested);
        match session.state() {
            SessionState::Processing { file_name, steps } => {
                assert_eq!(file_name, "contract.pdf");
                assert!(steps.iter().all(|s| !s.completed && !s.current));
            }
            other => panic!("expected processing, got {}", other.name()),
        }
    }

    #[test]
    fn test_reset_returns_to_awaiting_upload_from_any_state() {
        let mut session = Session::new();
        session.apply(accepted("contract.pdf"));
        session.apply(SessionEvent::AnalysisSucceeded(sample_response()));
        session.apply(SessionEvent::Reset);
        assert!(matches!(session.state(), SessionState::AwaitingUpload));
    }

    #[test]
    fn test_invalid_events_leave_state_unchanged() {
        let mut session = Session::new();

        // Not processing yet: step and outcome events are ignored
        session.apply(SessionEvent::StepStarted(StepId::Upload));
        session.apply(SessionEvent::AnalysisSucceeded(sample_response()));
        session.apply(SessionEvent::RetryRequested);
        assert!(matches!(session.state(), SessionState::AwaitingUpload));

        // Retry only applies to failed sessions
        session.apply(accepted("contract.pdf"));
        session.apply(SessionEvent::RetryRequested);
        assert!(matches!(session.state(), SessionState::Processing { .. }));
    }
}
