//! In-Memory Remote Project Client
//!
//! Test double for the remote collection. Assigns sequential string ids
//! like the hosted mock API does, can be taken offline, and can hold raw
//! records with arbitrary (even malformed) `data` blobs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{RemoteError, RemoteProjectClient, RemoteProjectPayload, RemoteProjectRecord};

/// In-memory remote collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteProjectClient {
    records: Arc<RwLock<BTreeMap<u64, RemoteProjectRecord>>>,
    next_id: Arc<AtomicU64>,
    offline: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryRemoteProjectClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose every call fails with a network error.
    pub fn offline() -> Self {
        let client = Self::default();
        client.set_offline(true);
        client
    }

    /// Takes the collection offline or back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Stores a raw record, returning its id.
    pub async fn insert_raw(&self, business_name: &str, business_type: &str, data: &str) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = RemoteProjectRecord {
            id: id.to_string(),
            business_name: business_name.to_string(),
            business_type: business_type.to_string(),
            data: data.to_string(),
        };
        self.records.write().await.insert(id, record);
        id.to_string()
    }

    /// Reads a stored record without going through the availability check.
    pub async fn record(&self, id: &str) -> Option<RemoteProjectRecord> {
        let key = id.parse::<u64>().ok()?;
        self.records.read().await.get(&key).cloned()
    }

    fn enter(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::network("remote collection offline"));
        }
        Ok(())
    }

    fn key(id: &str) -> Result<u64, RemoteError> {
        id.parse::<u64>()
            .map_err(|_| RemoteError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl RemoteProjectClient for InMemoryRemoteProjectClient {
    async fn create(&self, payload: &RemoteProjectPayload) -> Result<RemoteProjectRecord, RemoteError> {
        self.enter()?;
        let id = self
            .insert_raw(&payload.business_name, &payload.business_type, &payload.data)
            .await;
        self.record(&id)
            .await
            .ok_or_else(|| RemoteError::InvalidResponse("created record vanished".to_string()))
    }

    async fn get(&self, id: &str) -> Result<RemoteProjectRecord, RemoteError> {
        self.enter()?;
        let key = Self::key(id)?;
        self.records
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<RemoteProjectRecord>, RemoteError> {
        self.enter()?;
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &str,
        payload: &RemoteProjectPayload,
    ) -> Result<RemoteProjectRecord, RemoteError> {
        self.enter()?;
        let key = Self::key(id)?;
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&key)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        record.business_name = payload.business_name.clone();
        record.business_type = payload.business_type.clone();
        record.data = payload.data.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.enter()?;
        let key = Self::key(id)?;
        self.records
            .write()
            .await
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }
}
