//! MarketabilityWizard - Drives segmentation → targeting → positioning.
//!
//! Each transition loads the project, checks that the derived step is the
//! transition's starting step, calls the generation gateway and merges the
//! validated result. The step is re-derived from the merged document, never
//! tracked in memory.
//!
//! # Concurrency
//!
//! - At most one transition per project is in flight; a second call fails
//!   fast with `OperationInFlight`.
//! - Every transition carries a [`StepToken`]. If [`MarketabilityWizard::abandon`]
//!   ran, or the stored document no longer derives the starting step, the
//!   response is dropped with `StaleResponse` and nothing is written.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, StateMachine, ValidationError};
use crate::domain::project::ProjectDocument;
use crate::domain::wizard::WizardStep;
use crate::ports::{
    GenerationError, GenerationGateway, PositioningRequest, ProjectRepository,
    SegmentDiscoveryRequest, TargetRecommendationRequest,
};

/// Snapshot of where a project stands in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardStatus {
    pub step: WizardStep,
    pub in_flight: bool,
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub document: ProjectDocument,
    pub step: WizardStep,
}

/// User edits to the positioning texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyEdits {
    pub niche_suggestion: String,
    pub positioning_statement: String,
}

/// Identity of one transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToken {
    pub epoch: u64,
    pub step: WizardStep,
}

/// Tracked only while at least one transition for the project is pending.
#[derive(Debug, Default)]
struct ProjectSession {
    epoch: u64,
    next_call: u64,
    in_flight: Option<u64>,
    pending: usize,
}

type Sessions = Arc<Mutex<HashMap<ProjectId, ProjectSession>>>;

fn lock(sessions: &Sessions) -> MutexGuard<'_, HashMap<ProjectId, ProjectSession>> {
    sessions.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight marker when the transition ends, however it ends,
/// and forgets the session once nothing is pending.
struct InFlight {
    sessions: Sessions,
    project_id: ProjectId,
    call: u64,
    epoch: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut sessions = lock(&self.sessions);
        let idle = match sessions.get_mut(&self.project_id) {
            Some(session) => {
                if session.in_flight == Some(self.call) {
                    session.in_flight = None;
                }
                session.pending = session.pending.saturating_sub(1);
                session.pending == 0
            }
            None => false,
        };
        if idle {
            sessions.remove(&self.project_id);
        }
    }
}

/// The marketability wizard over a project repository and a generation gateway.
pub struct MarketabilityWizard {
    repository: Arc<dyn ProjectRepository>,
    gateway: Arc<dyn GenerationGateway>,
    sessions: Sessions,
}

impl MarketabilityWizard {
    pub fn new(repository: Arc<dyn ProjectRepository>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            repository,
            gateway,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Current step, derived from the stored document, and the in-flight flag.
    pub async fn status(&self, project_id: &ProjectId) -> Result<WizardStatus, DomainError> {
        let document = self.repository.get(project_id).await?;
        Ok(WizardStatus {
            step: WizardStep::derive(&document),
            in_flight: self.is_in_flight(project_id),
        })
    }

    pub fn is_in_flight(&self, project_id: &ProjectId) -> bool {
        lock(&self.sessions)
            .get(project_id)
            .is_some_and(|s| s.in_flight.is_some())
    }

    /// Invalidates every pending transition for the project.
    ///
    /// Responses that arrive afterwards are dropped, and a new transition
    /// may start immediately. A no-op when nothing is pending.
    pub fn abandon(&self, project_id: &ProjectId) {
        let mut sessions = lock(&self.sessions);
        if let Some(session) = sessions.get_mut(project_id) {
            session.epoch += 1;
            session.in_flight = None;
            info!(project_id = %project_id, epoch = session.epoch, "Wizard step abandoned");
        }
    }

    #[cfg(test)]
    fn tracked_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Segmentation → Targeting.
    pub async fn discover_segments(
        &self,
        project_id: &ProjectId,
    ) -> Result<TransitionOutcome, DomainError> {
        let (guard, document) = self.begin(project_id, WizardStep::Segmentation).await?;

        let request = SegmentDiscoveryRequest {
            business_type: document.business.business_type,
            products: document.business.products.clone(),
        };
        let discovery = self
            .generate(project_id, WizardStep::Segmentation, self.gateway.discover_segments(request))
            .await?;
        let discovery = discovery.validated().map_err(|err| {
            warn!(project_id = %project_id, error = %err, "Segment discovery rejected");
            DomainError::from(err)
        })?;

        let partial = json!({ "marketability": { "marketSegments": discovery.market_segments } });
        self.commit(&guard, project_id, WizardStep::Segmentation, partial).await
    }

    /// Targeting → Positioning.
    pub async fn recommend_targets(
        &self,
        project_id: &ProjectId,
    ) -> Result<TransitionOutcome, DomainError> {
        let (guard, document) = self.begin(project_id, WizardStep::Targeting).await?;

        let request = TargetRecommendationRequest {
            business_type: document.business.business_type,
            products_sold: document.business.products.clone(),
            market_segments: document.market_segments().to_vec(),
        };
        let recommendation = self
            .generate(project_id, WizardStep::Targeting, self.gateway.recommend_targets(request))
            .await?;
        let pair = recommendation.into_pair().map_err(|err| {
            warn!(project_id = %project_id, error = %err, "Target recommendation rejected");
            DomainError::from(err)
        })?;

        let partial = json!({ "marketability": { "recommendedSegments": pair } });
        self.commit(&guard, project_id, WizardStep::Targeting, partial).await
    }

    /// Positioning → Complete.
    pub async fn synthesize_positioning(
        &self,
        project_id: &ProjectId,
    ) -> Result<TransitionOutcome, DomainError> {
        let (guard, document) = self.begin(project_id, WizardStep::Positioning).await?;

        let selected = document
            .marketability
            .as_ref()
            .map(|m| m.selected_segment_names())
            .unwrap_or_default();
        let request = PositioningRequest {
            business_name: document.business.name.clone(),
            business_type: document.business.business_type,
            products_sold: document.business.products.clone(),
            selected_market_segments: selected,
        };
        let suggestion = self
            .generate(
                project_id,
                WizardStep::Positioning,
                self.gateway.synthesize_positioning(request),
            )
            .await?;
        let suggestion = suggestion.validated().map_err(|err| {
            warn!(project_id = %project_id, error = %err, "Positioning suggestion rejected");
            DomainError::from(err)
        })?;

        let partial = json!({
            "marketability": {
                "nicheSuggestion": suggestion.niche_suggestion,
                "positioningStatement": suggestion.positioning_statement,
            }
        });
        self.commit(&guard, project_id, WizardStep::Positioning, partial).await
    }

    /// Overwrites the generated positioning texts with user edits.
    ///
    /// Only allowed once the wizard is complete; never calls the gateway.
    pub async fn save_strategy(
        &self,
        project_id: &ProjectId,
        edits: StrategyEdits,
    ) -> Result<ProjectDocument, DomainError> {
        let niche = edits.niche_suggestion.trim();
        if niche.is_empty() {
            return Err(ValidationError::empty_field("marketability.nicheSuggestion").into());
        }
        let statement = edits.positioning_statement.trim();
        if statement.is_empty() {
            return Err(ValidationError::empty_field("marketability.positioningStatement").into());
        }

        let document = self.repository.get(project_id).await?;
        let step = WizardStep::derive(&document);
        if step != WizardStep::Complete {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Strategy can only be edited once the wizard is complete, currently at {}", step),
            ));
        }

        let partial = json!({
            "marketability": {
                "nicheSuggestion": niche,
                "positioningStatement": statement,
            }
        });
        let updated = self.repository.update(project_id, partial).await?;
        info!(project_id = %project_id, "Positioning strategy saved");
        Ok(updated)
    }

    // ─── Transition plumbing ────────────────────────────────────────────────

    /// Marks the project in flight and checks the starting step.
    async fn begin(
        &self,
        project_id: &ProjectId,
        from: WizardStep,
    ) -> Result<(InFlight, ProjectDocument), DomainError> {
        let guard = {
            let mut sessions = lock(&self.sessions);
            let session = sessions.entry(project_id.clone()).or_default();
            if session.in_flight.is_some() {
                return Err(DomainError::new(
                    ErrorCode::OperationInFlight,
                    format!("A wizard step is already running for project {}", project_id),
                ));
            }
            session.next_call += 1;
            session.in_flight = Some(session.next_call);
            session.pending += 1;
            InFlight {
                sessions: Arc::clone(&self.sessions),
                project_id: project_id.clone(),
                call: session.next_call,
                epoch: session.epoch,
            }
        };

        let document = self.repository.get(project_id).await?;
        let current = WizardStep::derive(&document);
        if current != from {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Project is at {}, expected {}", current, from),
            )
            .with_detail("current_step", current.title()));
        }

        Ok((guard, document))
    }

    async fn generate<T>(
        &self,
        project_id: &ProjectId,
        from: WizardStep,
        call: impl std::future::Future<Output = Result<T, GenerationError>>,
    ) -> Result<T, DomainError> {
        call.await.map_err(|err| {
            warn!(
                project_id = %project_id,
                step = %from,
                error = %err,
                "Wizard generation failed, document unchanged"
            );
            DomainError::from(err)
        })
    }

    /// Writes a validated result unless the token went stale meanwhile.
    ///
    /// The merge is previewed on the freshly loaded document first; a result
    /// that would not land on the next step is refused before any write.
    async fn commit(
        &self,
        guard: &InFlight,
        project_id: &ProjectId,
        from: WizardStep,
        partial: Value,
    ) -> Result<TransitionOutcome, DomainError> {
        let token = StepToken {
            epoch: guard.epoch,
            step: from,
        };
        let current = self.ensure_current(project_id, token).await?;

        let target = from.advance()?;
        let preview = current.merged(&partial)?;
        let reached = WizardStep::derive(&preview);
        if reached != target {
            warn!(project_id = %project_id, from = %from, reached = %reached, "Result would not advance the wizard");
            return Err(DomainError::new(
                ErrorCode::GenerationFailure,
                format!("Result for {} does not advance the wizard to {}", from, target),
            )
            .with_detail("reached_step", reached.title()));
        }

        let document = self.repository.update(project_id, partial).await?;
        let step = WizardStep::derive(&document);
        info!(project_id = %project_id, from = %from, to = %step, "Wizard step completed");

        Ok(TransitionOutcome { document, step })
    }

    /// Returns the stored document if `token` still describes it.
    async fn ensure_current(
        &self,
        project_id: &ProjectId,
        token: StepToken,
    ) -> Result<ProjectDocument, DomainError> {
        let epoch = lock(&self.sessions)
            .get(project_id)
            .map(|s| s.epoch)
            .unwrap_or_default();
        if epoch != token.epoch {
            warn!(project_id = %project_id, step = %token.step, "Dropping response for abandoned step");
            return Err(stale(project_id, token.step));
        }

        let document = self.repository.get(project_id).await?;
        if WizardStep::derive(&document) != token.step {
            warn!(project_id = %project_id, step = %token.step, "Dropping response, project moved on");
            return Err(stale(project_id, token.step));
        }
        Ok(document)
    }
}

fn stale(project_id: &ProjectId, step: WizardStep) -> DomainError {
    DomainError::new(
        ErrorCode::StaleResponse,
        format!("Response for {} arrived after project {} moved on", step, project_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryLocalStorage, ProjectRecordStore};
    use crate::domain::project::{Business, BusinessType, TargetSegment};
    use crate::ports::{
        PositioningSuggestion, SegmentDiscovery, TargetRecommendation,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Holds a gateway call until released.
    #[derive(Default)]
    struct Gate {
        entered: Notify,
        release: Notify,
    }

    struct ScriptedGateway {
        discovery: Result<SegmentDiscovery, GenerationError>,
        targets: Result<TargetRecommendation, GenerationError>,
        positioning: Result<PositioningSuggestion, GenerationError>,
        /// Held on the first call only.
        gate: Option<Arc<Gate>>,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn happy() -> Self {
            Self {
                discovery: Ok(SegmentDiscovery {
                    market_segments: vec![
                        "Mahasiswa".into(),
                        "Pekerja kantoran".into(),
                        "Keluarga".into(),
                    ],
                }),
                targets: Ok(TargetRecommendation {
                    recommended_segments: vec![
                        TargetSegment::new("Mahasiswa", "Pasar besar"),
                        TargetSegment::new("Keluarga", "Daya beli stabil"),
                    ],
                }),
                positioning: Ok(PositioningSuggestion {
                    niche_suggestion: "Kopi dingin untuk begadang".into(),
                    positioning_statement: "Teman belajar malam yang terjangkau".into(),
                }),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn gated(gate: Arc<Gate>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::happy()
            }
        }

        async fn enter(&self) {
            let earlier = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = self.gate.as_ref().filter(|_| earlier == 0) {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }
    }

    #[async_trait]
    impl GenerationGateway for ScriptedGateway {
        async fn discover_segments(
            &self,
            _request: SegmentDiscoveryRequest,
        ) -> Result<SegmentDiscovery, GenerationError> {
            self.enter().await;
            self.discovery.clone()
        }

        async fn recommend_targets(
            &self,
            _request: TargetRecommendationRequest,
        ) -> Result<TargetRecommendation, GenerationError> {
            self.enter().await;
            self.targets.clone()
        }

        async fn synthesize_positioning(
            &self,
            _request: PositioningRequest,
        ) -> Result<PositioningSuggestion, GenerationError> {
            self.enter().await;
            self.positioning.clone()
        }
    }

    struct Fixture {
        wizard: Arc<MarketabilityWizard>,
        store: Arc<ProjectRecordStore>,
        project_id: ProjectId,
    }

    async fn fixture(gateway: ScriptedGateway) -> Fixture {
        let store = Arc::new(ProjectRecordStore::new(Arc::new(InMemoryLocalStorage::new())));
        let document = ProjectDocument::new(
            ProjectId::new(),
            Business::new("Kopi Kita", BusinessType::FoodAndBeverage, "Cold brew coffee bottles", None)
                .unwrap(),
        );
        let project_id = document.id.clone();
        store.create(document).await.unwrap();

        let wizard = Arc::new(MarketabilityWizard::new(store.clone(), Arc::new(gateway)));
        Fixture {
            wizard,
            store,
            project_id,
        }
    }

    #[tokio::test]
    async fn full_flow_reaches_complete() {
        let f = fixture(ScriptedGateway::happy()).await;
        let id = &f.project_id;

        assert_eq!(f.wizard.status(id).await.unwrap().step, WizardStep::Segmentation);

        let out = f.wizard.discover_segments(id).await.unwrap();
        assert_eq!(out.step, WizardStep::Targeting);
        assert_eq!(out.document.market_segments().len(), 3);

        let out = f.wizard.recommend_targets(id).await.unwrap();
        assert_eq!(out.step, WizardStep::Positioning);

        let out = f.wizard.synthesize_positioning(id).await.unwrap();
        assert_eq!(out.step, WizardStep::Complete);
        assert_eq!(out.document.niche_suggestion(), Some("Kopi dingin untuk begadang"));

        let status = f.wizard.status(id).await.unwrap();
        assert_eq!(status, WizardStatus { step: WizardStep::Complete, in_flight: false });
    }

    #[tokio::test]
    async fn derived_step_matches_transition_sequence() {
        let f = fixture(ScriptedGateway::happy()).await;
        let id = &f.project_id;
        for expected in [WizardStep::Targeting, WizardStep::Positioning, WizardStep::Complete] {
            let reached = match f.wizard.status(id).await.unwrap().step {
                WizardStep::Segmentation => f.wizard.discover_segments(id).await,
                WizardStep::Targeting => f.wizard.recommend_targets(id).await,
                WizardStep::Positioning => f.wizard.synthesize_positioning(id).await,
                WizardStep::Complete => unreachable!(),
            }
            .unwrap()
            .step;
            assert_eq!(reached, expected);
            let reloaded = f.store.get(id).await.unwrap();
            assert_eq!(WizardStep::derive(&reloaded), expected);
        }
    }

    #[tokio::test]
    async fn generation_failure_leaves_document_unchanged() {
        let gateway = ScriptedGateway {
            discovery: Err(GenerationError::provider("503")),
            ..ScriptedGateway::happy()
        };
        let f = fixture(gateway).await;
        let before = f.store.get(&f.project_id).await.unwrap();

        let err = f.wizard.discover_segments(&f.project_id).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::GenerationFailure);
        assert_eq!(f.store.get(&f.project_id).await.unwrap(), before);
        assert!(!f.wizard.is_in_flight(&f.project_id));
    }

    #[tokio::test]
    async fn wrong_target_count_is_rejected_without_write() {
        for count in [1usize, 3] {
            let gateway = ScriptedGateway {
                targets: Ok(TargetRecommendation {
                    recommended_segments: (0..count)
                        .map(|i| TargetSegment::new(format!("S{}", i), "r"))
                        .collect(),
                }),
                ..ScriptedGateway::happy()
            };
            let f = fixture(gateway).await;
            f.wizard.discover_segments(&f.project_id).await.unwrap();
            let before = f.store.get(&f.project_id).await.unwrap();

            let err = f.wizard.recommend_targets(&f.project_id).await.unwrap_err();

            assert_eq!(err.code, ErrorCode::GenerationFailure);
            assert_eq!(f.store.get(&f.project_id).await.unwrap(), before);
            assert_eq!(f.wizard.status(&f.project_id).await.unwrap().step, WizardStep::Targeting);
        }
    }

    #[tokio::test]
    async fn transition_from_wrong_step_is_invalid() {
        let f = fixture(ScriptedGateway::happy()).await;
        let err = f.wizard.recommend_targets(&f.project_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);

        f.wizard.discover_segments(&f.project_id).await.unwrap();
        let err = f.wizard.discover_segments(&f.project_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let f = fixture(ScriptedGateway::happy()).await;
        let err = f.wizard.discover_segments(&ProjectId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectNotFound);
    }

    #[tokio::test]
    async fn second_call_while_in_flight_fails_fast() {
        let gate = Arc::new(Gate::default());
        let f = fixture(ScriptedGateway::gated(gate.clone())).await;

        let wizard = f.wizard.clone();
        let id = f.project_id.clone();
        let first = tokio::spawn(async move { wizard.discover_segments(&id).await });

        gate.entered.notified().await;
        assert!(f.wizard.status(&f.project_id).await.unwrap().in_flight);
        let err = f.wizard.discover_segments(&f.project_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OperationInFlight);

        gate.release.notify_one();
        let out = first.await.unwrap().unwrap();
        assert_eq!(out.step, WizardStep::Targeting);
        assert!(!f.wizard.is_in_flight(&f.project_id));
    }

    #[tokio::test]
    async fn response_after_abandon_is_dropped() {
        let gate = Arc::new(Gate::default());
        let f = fixture(ScriptedGateway::gated(gate.clone())).await;

        let wizard = f.wizard.clone();
        let id = f.project_id.clone();
        let pending = tokio::spawn(async move { wizard.discover_segments(&id).await });

        gate.entered.notified().await;
        f.wizard.abandon(&f.project_id);
        assert!(!f.wizard.is_in_flight(&f.project_id));
        gate.release.notify_one();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err.code, ErrorCode::StaleResponse);
        let doc = f.store.get(&f.project_id).await.unwrap();
        assert!(doc.market_segments().is_empty());
    }

    #[tokio::test]
    async fn response_is_dropped_if_document_moved_on() {
        let gate = Arc::new(Gate::default());
        let f = fixture(ScriptedGateway::gated(gate.clone())).await;

        let wizard = f.wizard.clone();
        let id = f.project_id.clone();
        let pending = tokio::spawn(async move { wizard.discover_segments(&id).await });

        gate.entered.notified().await;
        ProjectRepository::update(
            f.store.as_ref(),
            &f.project_id,
            json!({ "marketability": { "marketSegments": ["Lansia"] } }),
        )
        .await
        .unwrap();
        gate.release.notify_one();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err.code, ErrorCode::StaleResponse);
        assert_eq!(f.store.get(&f.project_id).await.unwrap().market_segments(), ["Lansia"]);
    }

    #[tokio::test]
    async fn empty_or_blank_discovery_is_rejected_without_write() {
        for segments in [vec![], vec!["  ".to_string(), "".to_string()]] {
            let gateway = ScriptedGateway {
                discovery: Ok(SegmentDiscovery {
                    market_segments: segments,
                }),
                ..ScriptedGateway::happy()
            };
            let f = fixture(gateway).await;
            let before = f.store.get(&f.project_id).await.unwrap();

            let err = f.wizard.discover_segments(&f.project_id).await.unwrap_err();

            assert_eq!(err.code, ErrorCode::GenerationFailure);
            assert_eq!(f.store.get(&f.project_id).await.unwrap(), before);
            assert_eq!(
                f.wizard.status(&f.project_id).await.unwrap().step,
                WizardStep::Segmentation
            );
        }
    }

    #[tokio::test]
    async fn discovered_segments_are_trimmed() {
        let gateway = ScriptedGateway {
            discovery: Ok(SegmentDiscovery {
                market_segments: vec![" Mahasiswa ".into(), " ".into(), "Keluarga".into()],
            }),
            ..ScriptedGateway::happy()
        };
        let f = fixture(gateway).await;
        let out = f.wizard.discover_segments(&f.project_id).await.unwrap();
        assert_eq!(out.document.market_segments(), ["Mahasiswa", "Keluarga"]);
        assert_eq!(out.step, WizardStep::Targeting);
    }

    #[tokio::test]
    async fn sessions_are_released_when_idle() {
        let f = fixture(ScriptedGateway::happy()).await;
        f.wizard.abandon(&f.project_id);
        assert_eq!(f.wizard.tracked_sessions(), 0);

        f.wizard.discover_segments(&f.project_id).await.unwrap();
        f.wizard.discover_segments(&f.project_id).await.unwrap_err();
        assert_eq!(f.wizard.tracked_sessions(), 0);
    }

    #[tokio::test]
    async fn abandoned_call_stays_stale_after_a_newer_call_finishes() {
        let gate = Arc::new(Gate::default());
        let f = fixture(ScriptedGateway::gated(gate.clone())).await;

        let wizard = f.wizard.clone();
        let id = f.project_id.clone();
        let old = tokio::spawn(async move { wizard.discover_segments(&id).await });
        gate.entered.notified().await;
        f.wizard.abandon(&f.project_id);

        let out = f.wizard.discover_segments(&f.project_id).await.unwrap();
        assert_eq!(out.step, WizardStep::Targeting);
        // The abandoned call still holds its session
        assert_eq!(f.wizard.tracked_sessions(), 1);

        gate.release.notify_one();
        let err = old.await.unwrap().unwrap_err();
        assert_eq!(err.code, ErrorCode::StaleResponse);
        assert_eq!(f.wizard.tracked_sessions(), 0);
        assert_eq!(f.store.get(&f.project_id).await.unwrap(), out.document);
    }

    #[tokio::test]
    async fn save_strategy_overwrites_generated_text() {
        let f = fixture(ScriptedGateway::happy()).await;
        let id = &f.project_id;
        f.wizard.discover_segments(id).await.unwrap();
        f.wizard.recommend_targets(id).await.unwrap();
        f.wizard.synthesize_positioning(id).await.unwrap();

        let doc = f
            .wizard
            .save_strategy(
                id,
                StrategyEdits {
                    niche_suggestion: " Kopi untuk perawat shift malam ".into(),
                    positioning_statement: "Energi untuk yang merawat".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(doc.niche_suggestion(), Some("Kopi untuk perawat shift malam"));
        assert_eq!(doc.market_segments().len(), 3);
    }

    #[tokio::test]
    async fn save_strategy_requires_complete_and_text() {
        let f = fixture(ScriptedGateway::happy()).await;
        let edits = StrategyEdits {
            niche_suggestion: "n".into(),
            positioning_statement: "p".into(),
        };
        let err = f.wizard.save_strategy(&f.project_id, edits).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);

        let blank = StrategyEdits {
            niche_suggestion: "  ".into(),
            positioning_statement: "p".into(),
        };
        let err = f.wizard.save_strategy(&f.project_id, blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
