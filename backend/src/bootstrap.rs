//! Wiring of adapters into the application services from [`AppConfig`].

use secrecy::ExposeSecret;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::adapters::{
    AnthropicConfig, AnthropicProvider, FileLocalStorage, HttpRemoteConfig,
    HttpRemoteProjectClient, InMemoryLocalStorage, LlmGenerationGateway, ProjectRecordStore,
    RemoteSyncAdapter,
};
use crate::application::MarketabilityWizard;
use crate::config::{AiConfig, AppConfig, StorageBackend, StorageConfig};
use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::ProjectDocument;
use crate::ports::{
    AIError, GenerationGateway, LocalStorage, ProjectRepository, RemoteError, RemoteProjectClient,
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Remote client setup failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Generation provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("No generation provider configured")]
    NoGenerationProvider,
}

/// The wired application services.
pub struct Services {
    /// Local record store; also the update subscription source.
    pub records: Arc<ProjectRecordStore>,
    /// Present when remote mirroring is configured.
    pub sync: Option<Arc<RemoteSyncAdapter>>,
    pub repository: Arc<dyn ProjectRepository>,
    pub wizard: Arc<MarketabilityWizard>,
}

impl Services {
    /// Wires storage and remote sync from `config` around the given gateway.
    pub fn assemble(
        config: &AppConfig,
        gateway: Arc<dyn GenerationGateway>,
    ) -> Result<Self, BootstrapError> {
        let records = Arc::new(ProjectRecordStore::new(local_storage(&config.storage)));

        let sync = match config.remote.base_url.as_deref().filter(|_| config.remote.is_enabled()) {
            Some(url) => {
                let client = HttpRemoteProjectClient::new(
                    HttpRemoteConfig::new(url).with_timeout(config.remote.timeout()),
                )?;
                Some(Arc::new(Self::sync_adapter(
                    Arc::new(client),
                    Arc::clone(&records),
                    config.remote.degraded_after_failures,
                )))
            }
            None => {
                warn!("No remote project collection configured, running local-only");
                None
            }
        };

        let repository: Arc<dyn ProjectRepository> = match &sync {
            Some(sync) => Arc::clone(sync) as Arc<dyn ProjectRepository>,
            None => Arc::clone(&records) as Arc<dyn ProjectRepository>,
        };
        let wizard = Arc::new(MarketabilityWizard::new(Arc::clone(&repository), gateway));

        info!(
            storage = ?config.storage.backend,
            remote = sync.is_some(),
            "Services assembled"
        );
        Ok(Self {
            records,
            sync,
            repository,
            wizard,
        })
    }

    /// Wires everything, including the configured generation provider.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        let gateway = generation_gateway(&config.ai)?;
        Self::assemble(config, gateway)
    }

    /// Loads project `id` through the repository and makes it the open
    /// project. Later updates of it are mirrored into the current-project key.
    pub async fn open_project(&self, id: &ProjectId) -> Result<ProjectDocument, DomainError> {
        let document = self.repository.get(id).await?;
        self.records.open_project(&document).await?;
        Ok(document)
    }

    /// The open project, as last stored.
    pub async fn current_project(&self) -> Result<ProjectDocument, DomainError> {
        self.records.load_current().await
    }

    fn sync_adapter(
        remote: Arc<dyn RemoteProjectClient>,
        records: Arc<ProjectRecordStore>,
        degraded_after: u32,
    ) -> RemoteSyncAdapter {
        RemoteSyncAdapter::new(remote, records).with_degraded_after(degraded_after)
    }
}

fn local_storage(config: &StorageConfig) -> Arc<dyn LocalStorage> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryLocalStorage::new()),
        StorageBackend::File => Arc::new(FileLocalStorage::new(&config.data_dir)),
    }
}

/// Builds the LLM-backed gateway from the provider settings.
pub fn generation_gateway(config: &AiConfig) -> Result<Arc<dyn GenerationGateway>, BootstrapError> {
    let key = config
        .anthropic_api_key
        .as_ref()
        .ok_or(BootstrapError::NoGenerationProvider)?;

    let provider = AnthropicProvider::new(
        AnthropicConfig::new(key.expose_secret().clone())
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
            .with_max_retries(config.max_retries),
    )?;

    let deadline = config.timeout() * (config.max_retries + 1);
    Ok(Arc::new(
        LlmGenerationGateway::new(Arc::new(provider)).with_deadline(deadline),
    ))
}
