use crate::config::MongoConfig;
use crate::models::Person;
use crate::services::store::{PersonStore, StoreConnector};
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-process person store for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryPersonStore {
    people: Arc<Mutex<Vec<Person>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail as if the server went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.people.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StoreError(anyhow::anyhow!(
                "person store is unreachable: connection refused"
            )));
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Person>>, AppError> {
        self.people
            .lock()
            .map_err(|_| AppError::StoreError(anyhow::anyhow!("person store lock poisoned")))
    }
}

#[async_trait]
impl PersonStore for InMemoryPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        self.check_available()?;
        Ok(self.lock()?.clone())
    }

    async fn save(&self, mut person: Person) -> Result<Person, AppError> {
        self.check_available()?;
        if person.id.is_none() {
            person.id = Some(Uuid::new_v4().to_string().into());
        }
        self.lock()?.push(person.clone());
        Ok(person)
    }
}

/// Hands out one shared [`InMemoryPersonStore`] and counts connects.
pub struct InMemoryConnector {
    store: InMemoryPersonStore,
    connects: AtomicUsize,
}

impl InMemoryConnector {
    pub fn new(store: InMemoryPersonStore) -> Self {
        Self {
            store,
            connects: AtomicUsize::new(0),
        }
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    async fn connect(&self, config: &MongoConfig) -> Result<Arc<dyn PersonStore>, AppError> {
        config.address()?;
        self.connects.fetch_add(1, Ordering::SeqCst);
        // widen the window for racing first requests
        tokio::task::yield_now().await;
        Ok(Arc::new(self.store.clone()))
    }
}
