//! End-to-end flow: create a project, run the marketability wizard, fill in
//! innovation and financials, and score readiness.
//!
//! Wires the real adapters (record store, sync adapter, LLM gateway) over
//! in-memory media and a scripted text provider.

use std::sync::Arc;

use venture_planner::adapters::{
    InMemoryLocalStorage, InMemoryRemoteProjectClient, LlmGenerationGateway, MockAIProvider,
    ProjectRecordStore, RemoteSyncAdapter,
};
use venture_planner::application::{
    AddVariantCommand, CalculateReadinessCommand, CalculateReadinessHandler, CreateProjectCommand,
    CreateProjectHandler, GetProjectOverviewHandler, GetProjectQuery, MarketabilityWizard,
    SavePackagingCommand, SavePackagingHandler, SimulateProjectionCommand,
    SimulateProjectionHandler, StrategyEdits, VariantsHandler,
};
use venture_planner::domain::foundation::ErrorCode;
use venture_planner::domain::project::{ModuleStatus, ReadinessStatus, VariantType};
use venture_planner::domain::wizard::WizardStep;
use venture_planner::ports::ProjectRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SEGMENTS: &str = r#"Berikut segmen pasar:
```json
{"marketSegments": ["Mahasiswa", "Pekerja kantoran", "Keluarga"]}
```"#;

const TARGETS: &str = r#"{"recommendedSegments": [
    {"segment": "Mahasiswa", "reason": "Sering begadang dan sensitif harga"},
    {"segment": "Keluarga", "reason": "Pembelian rutin dalam jumlah besar"}
]}"#;

const POSITIONING: &str = r#"{"nicheSuggestion": "Cold brew untuk sesi belajar malam",
"positioningStatement": "Teman begadang yang terjangkau untuk mahasiswa"}"#;

struct Harness {
    records: Arc<ProjectRecordStore>,
    remote: InMemoryRemoteProjectClient,
    provider: MockAIProvider,
    repository: Arc<dyn ProjectRepository>,
    wizard: MarketabilityWizard,
}

fn harness() -> Harness {
    let records = Arc::new(ProjectRecordStore::new(Arc::new(InMemoryLocalStorage::new())));
    let remote = InMemoryRemoteProjectClient::new();
    let provider = MockAIProvider::new();

    let repository: Arc<dyn ProjectRepository> = Arc::new(RemoteSyncAdapter::new(
        Arc::new(remote.clone()),
        records.clone(),
    ));
    let gateway = Arc::new(LlmGenerationGateway::new(Arc::new(provider.clone())));
    let wizard = MarketabilityWizard::new(repository.clone(), gateway);

    Harness {
        records,
        remote,
        provider,
        repository,
        wizard,
    }
}

fn new_project() -> CreateProjectCommand {
    CreateProjectCommand {
        business_name: "Kopi Kita".into(),
        business_type: "F&B".into(),
        products: "Cold brew coffee in 250ml bottles".into(),
        description: Some("Home-brewed, delivered on campus".into()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_planning_flow_reaches_ready() {
    let h = harness();

    let created = CreateProjectHandler::new(h.repository.clone())
        .handle(new_project())
        .await
        .unwrap();
    let id = created.id.clone();
    assert_eq!(id.as_str(), "1", "remote id is adopted");

    // Marketability wizard
    h.provider.push_response(SEGMENTS);
    h.provider.push_response(TARGETS);
    h.provider.push_response(POSITIONING);

    assert_eq!(h.wizard.discover_segments(&id).await.unwrap().step, WizardStep::Targeting);
    assert_eq!(h.wizard.recommend_targets(&id).await.unwrap().step, WizardStep::Positioning);
    let done = h.wizard.synthesize_positioning(&id).await.unwrap();
    assert_eq!(done.step, WizardStep::Complete);
    assert_eq!(h.provider.call_count(), 3);

    let doc = h
        .wizard
        .save_strategy(
            &id,
            StrategyEdits {
                niche_suggestion: "Cold brew untuk mahasiswa tingkat akhir".into(),
                positioning_statement: "Teman skripsi paling setia".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(doc.recommended_segments().unwrap()[1].segment, "Keluarga");

    // Innovation
    SavePackagingHandler::new(h.repository.clone())
        .handle(SavePackagingCommand {
            project_id: id.clone(),
            notes: "Botol kaca dengan segel".into(),
            is_adaptive: true,
            is_tested: true,
        })
        .await
        .unwrap();
    VariantsHandler::new(h.repository.clone())
        .add(AddVariantCommand {
            project_id: id.clone(),
            name: "Aren".into(),
            variant_type: VariantType::Flavor,
            is_active: true,
        })
        .await
        .unwrap();

    // Financials
    SimulateProjectionHandler::new(h.repository.clone())
        .handle(SimulateProjectionCommand {
            project_id: id.clone(),
            price: 25_000.0,
            cost: 10_000.0,
            frequency: 50.0,
        })
        .await
        .unwrap();
    let profile = CalculateReadinessHandler::new(h.repository.clone())
        .handle(CalculateReadinessCommand { project_id: id.clone() })
        .await
        .unwrap();
    assert_eq!(profile.score.value(), 100);
    assert_eq!(profile.status, ReadinessStatus::Ready);

    let overview = GetProjectOverviewHandler::new(h.repository.clone())
        .handle(GetProjectQuery { project_id: id.clone() })
        .await
        .unwrap();
    assert_eq!(overview.progress.marketability, ModuleStatus::Complete);
    assert_eq!(overview.progress.innovation, ModuleStatus::Complete);
    assert_eq!(overview.progress.financials, ModuleStatus::Complete);

    // Both copies hold the final document
    let remote = h.remote.record("1").await.unwrap();
    assert!(remote.data.contains("Teman skripsi paling setia"));
    let local = h.records.load("project-1").await.unwrap();
    assert_eq!(local.niche_suggestion(), Some("Cold brew untuk mahasiswa tingkat akhir"));
}

#[tokio::test]
async fn wizard_updates_are_published() {
    let h = harness();
    let mut updates = h.records.subscribe();
    let id = CreateProjectHandler::new(h.repository.clone())
        .handle(new_project())
        .await
        .unwrap()
        .id;

    h.provider.push_response(SEGMENTS);
    h.wizard.discover_segments(&id).await.unwrap();

    let mut last = None;
    while let Ok(doc) = updates.try_recv() {
        last = Some(doc);
    }
    let last = last.expect("at least one published update");
    assert_eq!(last.market_segments().len(), 3);
}

#[tokio::test]
async fn malformed_generation_leaves_project_untouched() {
    let h = harness();
    let id = CreateProjectHandler::new(h.repository.clone())
        .handle(new_project())
        .await
        .unwrap()
        .id;
    let before = h.repository.get(&id).await.unwrap();

    h.provider.push_response("Maaf, saya tidak dapat membantu.");
    let err = h.wizard.discover_segments(&id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationFailure);

    h.provider.push_response(SEGMENTS);
    h.wizard.discover_segments(&id).await.unwrap();
    h.provider.push_response(
        r#"{"recommendedSegments": [{"segment": "Mahasiswa", "reason": "x"}]}"#,
    );
    let err = h.wizard.recommend_targets(&id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationFailure);

    let after = h.repository.get(&id).await.unwrap();
    assert_ne!(after, before);
    assert!(after.recommended_segments().is_none());
    assert_eq!(h.wizard.status(&id).await.unwrap().step, WizardStep::Targeting);
}

#[tokio::test]
async fn invalid_projection_is_rejected_before_write() {
    let h = harness();
    let id = CreateProjectHandler::new(h.repository.clone())
        .handle(new_project())
        .await
        .unwrap()
        .id;
    let calls_before = h.remote.call_count();

    let err = SimulateProjectionHandler::new(h.repository.clone())
        .handle(SimulateProjectionCommand {
            project_id: id.clone(),
            price: 10_000.0,
            cost: 15_000.0,
            frequency: 10.0,
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(h.remote.call_count(), calls_before);
    assert!(h.repository.get(&id).await.unwrap().projection().is_none());
}
