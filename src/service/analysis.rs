//! Document analysis orchestration
//!
//! Drives a full session: validated upload, the five-step processing
//! sequence, the backend analyze and highlights calls, then the risk engine.
//! Session events are applied along the way so callers observe the same
//! transitions the dashboard renders.

use std::time::Duration;

use crate::client::{AnalysisApi, ClientError};
use crate::model::analysis::{AnalyzeDocumentResponse, AskQuestionResponse};
use crate::model::risk::RiskAssessment;
use crate::service::document::{DocumentUpload, UploadError};
use crate::service::risk;
use crate::service::session::{Session, SessionEvent, StepId};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Client(#[from] ClientError),
}

/// Outcome of a successful run: the backend summary plus the derived risk
/// assessment.
#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    pub analysis: AnalyzeDocumentResponse,
    pub assessment: RiskAssessment,
}

/// Orchestrates analysis sessions against an [`AnalysisApi`].
pub struct AnalysisService<A: AnalysisApi> {
    api: A,
    simulate_delays: bool,
}

impl<A: AnalysisApi> AnalysisService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            simulate_delays: true,
        }
    }

    /// Skip the cosmetic step delays. Used by tests.
    pub fn without_simulated_delays(api: A) -> Self {
        Self {
            api,
            simulate_delays: false,
        }
    }

    /// Run a new analysis for an accepted upload.
    pub async fn run(
        &self,
        session: &mut Session,
        upload: DocumentUpload,
    ) -> Result<CompletedAnalysis, AnalysisError> {
        session.apply(SessionEvent::FileAccepted {
            file_name: upload.file_name.clone(),
        });
        self.process(session, upload).await
    }

    /// Re-run a failed session with the same upload.
    pub async fn retry(
        &self,
        session: &mut Session,
        upload: DocumentUpload,
    ) -> Result<CompletedAnalysis, AnalysisError> {
        session.apply(SessionEvent::RetryRequested);
        self.process(session, upload).await
    }

    async fn process(
        &self,
        session: &mut Session,
        upload: DocumentUpload,
    ) -> Result<CompletedAnalysis, AnalysisError> {
        self.simulated_step(session, StepId::Upload, Duration::from_millis(1000))
            .await;
        self.simulated_step(session, StepId::Extract, Duration::from_millis(1500))
            .await;

        session.apply(SessionEvent::StepStarted(StepId::Analyze));
        let analysis = match self.api.analyze(&upload.file_name, upload.bytes).await {
            Ok(analysis) => analysis,
            Err(e) => return Err(self.fail(session, e)),
        };
        session.apply(SessionEvent::StepCompleted(StepId::Analyze));

        self.simulated_step(session, StepId::Identify, Duration::from_millis(800))
            .await;
        self.simulated_step(session, StepId::Compile, Duration::from_millis(1000))
            .await;

        let highlights = match self.api.highlights(&analysis.namespace).await {
            Ok(highlights) => highlights,
            Err(e) => return Err(self.fail(session, e)),
        };

        let assessment = risk::assess(highlights.into_assessments());
        tracing::info!(
            namespace = %analysis.namespace,
            score = assessment.score,
            label = assessment.label.label,
            "Analysis complete"
        );

        session.apply(SessionEvent::AnalysisSucceeded(analysis.clone()));
        Ok(CompletedAnalysis {
            analysis,
            assessment,
        })
    }

    /// Ask a follow-up question about a completed analysis.
    pub async fn ask(
        &self,
        query: &str,
        namespace: &str,
    ) -> Result<AskQuestionResponse, AnalysisError> {
        Ok(self.api.ask(query, namespace).await?)
    }

    fn fail(&self, session: &mut Session, error: ClientError) -> AnalysisError {
        tracing::error!(error = %error, "Document processing failed");
        session.apply(SessionEvent::AnalysisFailed {
            message: error.user_message(),
        });
        AnalysisError::Client(error)
    }

    /// A step with no real work behind it: pause so progress is observable,
    /// then mark it done.
    async fn simulated_step(&self, session: &mut Session, id: StepId, delay: Duration) {
        session.apply(SessionEvent::StepStarted(id));
        if self.simulate_delays {
            tokio::time::sleep(delay).await;
        }
        session.apply(SessionEvent::StepCompleted(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::analysis::{ContractPeriod, DocumentSummary, KeyDataPoints};
    use crate::model::highlights::{Clause, ClauseDetails, HighlightsResponse};
    use crate::model::risk::{ConfidenceLevel, RiskLevel};
    use crate::service::session::SessionState;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StubApi {
        fail_analyze: bool,
        fail_highlights: bool,
    }

    impl StubApi {
        fn ok() -> Self {
            Self {
                fail_analyze: false,
                fail_highlights: false,
            }
        }
    }

    fn clause(risk: RiskLevel) -> ClauseDetails {
        ClauseDetails {
            clause: Clause {
                heading: "Heading".to_string(),
                description: "Description".to_string(),
            },
            recommendation: "Recommendation".to_string(),
            risk,
            confidence: ConfidenceLevel::High,
        }
    }

    fn sample_analysis() -> AnalyzeDocumentResponse {
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

    #[async_trait]
    impl AnalysisApi for StubApi {
        async fn analyze(
            &self,
            _file_name: &str,
            _bytes: Vec<u8>,
        ) -> Result<AnalyzeDocumentResponse, ClientError> {
            if self.fail_analyze {
                return Err(ClientError::Timeout(
                    "Request timed out. The document analysis is taking longer than expected. Please try again.".to_string(),
                ));
            }
            Ok(sample_analysis())
        }

        async fn highlights(&self, namespace: &str) -> Result<HighlightsResponse, ClientError> {
            assert_eq!(namespace, "doc-123");
            if self.fail_highlights {
                return Err(ClientError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    message: "backend exploded".to_string(),
                });
            }
            Ok(HighlightsResponse {
                termination: clause(RiskLevel::Critical),
                financial: clause(RiskLevel::High),
                liability: clause(RiskLevel::Medium),
                renewal: clause(RiskLevel::Low),
                service: clause(RiskLevel::Medium),
            })
        }

        async fn ask(
            &self,
            _query: &str,
            _namespace: &str,
        ) -> Result<AskQuestionResponse, ClientError> {
            Ok(AskQuestionResponse {
                answer: "December 31st, 2026.".to_string(),
            })
        }
    }

    fn upload() -> DocumentUpload {
        DocumentUpload {
            file_name: "contract.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_successful_run_completes_session_with_assessment() {
        let service = AnalysisService::without_simulated_delays(StubApi::ok());
        let mut session = Session::new();

        let completed = service.run(&mut session, upload()).await.unwrap();

        assert_eq!(completed.analysis.namespace, "doc-123");
        assert_eq!(completed.assessment.items.len(), 5);
        assert_eq!(completed.assessment.counts.critical, 1);
        assert_eq!(completed.assessment.counts.high, 1);
        assert_eq!(completed.assessment.counts.medium, 2);
        assert_eq!(completed.assessment.counts.low, 1);
        assert!(matches!(session.state(), SessionState::Complete { .. }));
    }

    #[tokio::test]
    async fn test_analyze_failure_moves_session_to_failed_with_message() {
        let service = AnalysisService::without_simulated_delays(StubApi {
            fail_analyze: true,
            fail_highlights: false,
        });
        let mut session = Session::new();

        let err = service.run(&mut session, upload()).await.unwrap_err();
        assert!(err.to_string().contains("Request timed out"));

        match session.state() {
            SessionState::Failed { message, .. } => {
                assert!(message.contains("document analysis is taking longer"));
            }
            other => panic!("expected failed, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_highlights_failure_also_fails_session() {
        let service = AnalysisService::without_simulated_delays(StubApi {
            fail_analyze: false,
            fail_highlights: true,
        });
        let mut session = Session::new();

        let err = service.run(&mut session, upload()).await.unwrap_err();
        assert!(err.to_string().contains("backend exploded"));
        assert!(matches!(session.state(), SessionState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_retry_after_failure_can_succeed() {
        let failing = AnalysisService::without_simulated_delays(StubApi {
            fail_analyze: true,
            fail_highlights: false,
        });
        let mut session = Session::new();
        let _ = failing.run(&mut session, upload()).await;
        assert!(matches!(session.state(), SessionState::Failed { .. }));

        let recovering = AnalysisService::without_simulated_delays(StubApi::ok());
        let completed = recovering.retry(&mut session, upload()).await.unwrap();
        assert_eq!(completed.analysis.namespace, "doc-123");
        assert!(matches!(session.state(), SessionState::Complete { .. }));
    }

    #[tokio::test]
    async fn test_ask_delegates_to_api() {
        let service = AnalysisService::without_simulated_delays(StubApi::ok());
        let answer = service
            .ask("When does the contract end?", "doc-123")
            .await
            .unwrap();
        assert_eq!(answer.answer, "December 31st, 2026.");
    }
}
