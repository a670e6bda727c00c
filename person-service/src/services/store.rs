use crate::config::MongoConfig;
use crate::models::Person;
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::OnceCell;

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Every stored person, in store order.
    async fn find_all(&self) -> Result<Vec<Person>, AppError>;

    /// Inserts `person` and returns it as stored, including any
    /// store-assigned identifier.
    async fn save(&self, person: Person) -> Result<Person, AppError>;
}

/// Builds a store handle from connection settings.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, config: &MongoConfig) -> Result<Arc<dyn PersonStore>, AppError>;
}

/// Process-wide store handle, built on first use.
///
/// Concurrent first callers wait on a single initialisation. A failed
/// initialisation leaves the handle unset so a later request can retry.
#[derive(Clone)]
pub struct LazyPersonStore {
    config: MongoConfig,
    connector: Arc<dyn StoreConnector>,
    cell: Arc<OnceCell<Arc<dyn PersonStore>>>,
}

impl LazyPersonStore {
    pub fn new(config: MongoConfig, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            config,
            connector,
            cell: Arc::new(OnceCell::new()),
        }
    }

    pub async fn get(&self) -> Result<&Arc<dyn PersonStore>, AppError> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!(database = %self.config.database, "Initializing person store");
                self.connector.connect(&self.config).await.map_err(|e| {
                    tracing::error!("Failed to initialize person store: {}", e);
                    e
                })
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[async_trait]
impl PersonStore for LazyPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        self.get().await?.find_all().await
    }

    async fn save(&self, person: Person) -> Result<Person, AppError> {
        self.get().await?.save(person).await
    }
}
