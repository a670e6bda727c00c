use crate::config::MongoConfig;
use crate::models::Person;
use crate::services::store::{PersonStore, StoreConnector};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    options::{ClientOptions, Credential, ServerAddress},
    Client as MongoClient, Collection,
};
use service_core::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub const PERSON_COLLECTION: &str = "personer";

#[derive(Clone)]
pub struct MongoPersonStore {
    collection: Collection<Person>,
}

impl MongoPersonStore {
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        let (host, port) = config.address()?;
        tracing::info!(
            host = %host,
            port = port,
            database = %config.database,
            username = %config.username,
            "Connecting to MongoDB"
        );

        let credential = Credential::builder()
            .username(config.username.clone())
            .password(config.password().to_string())
            .source(config.database.clone())
            .build();

        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: host.clone(),
                port: Some(port),
            }])
            .credential(credential)
            .app_name("person-service".to_string())
            .build();

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client for {}:{}: {}", host, port, e);
            AppError::from(e)
        })?;
        let collection = client
            .database(&config.database)
            .collection(PERSON_COLLECTION);

        tracing::info!(database = %config.database, "MongoDB client ready");
        Ok(Self { collection })
    }
}

#[async_trait]
impl PersonStore for MongoPersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, AppError> {
        let cursor = self.collection.find(None, None).await.map_err(|e| {
            tracing::error!("Failed to query {}: {}", PERSON_COLLECTION, e);
            AppError::from(e)
        })?;

        let people: Vec<Person> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read {} cursor: {}", PERSON_COLLECTION, e);
            AppError::from(e)
        })?;

        tracing::debug!(count = people.len(), "Fetched people");
        Ok(people)
    }

    async fn save(&self, mut person: Person) -> Result<Person, AppError> {
        if person.id.is_none() {
            person.id = Some(Uuid::new_v4().to_string().into());
        }

        self.collection
            .insert_one(&person, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert into {}: {}", PERSON_COLLECTION, e);
                AppError::from(e)
            })?;

        Ok(person)
    }
}

/// Connects [`MongoPersonStore`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoConnector;

#[async_trait]
impl StoreConnector for MongoConnector {
    async fn connect(&self, config: &MongoConfig) -> Result<Arc<dyn PersonStore>, AppError> {
        let store = MongoPersonStore::connect(config).await?;
        Ok(Arc::new(store))
    }
}
