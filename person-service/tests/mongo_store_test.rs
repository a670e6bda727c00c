use person_service::config::{MongoConfig, MONGODB_SERVICE_HOST, MONGODB_SERVICE_PORT};
use person_service::models::Person;
use person_service::services::{MongoPersonStore, PersonStore};
use serde_json::json;
use service_core::config::{EnvSource, ProcessEnv};
use std::collections::HashMap;

/// Reads the process environment, pointing at localhost when no server is
/// configured.
fn test_config() -> MongoConfig {
    let mut env: HashMap<String, String> = HashMap::new();
    env.insert(MONGODB_SERVICE_HOST.to_string(), "localhost".to_string());
    env.insert(MONGODB_SERVICE_PORT.to_string(), "27017".to_string());
    for key in [
        MONGODB_SERVICE_HOST,
        MONGODB_SERVICE_PORT,
        "MONGODB_DATABASE",
        "MONGODB_USER",
        "MONGODB_PASSWORD",
    ] {
        if let Some(value) = ProcessEnv.var(key) {
            env.insert(key.to_string(), value);
        }
    }

    MongoConfig::from_env(&env, false).expect("Failed to load config")
}

#[tokio::test]
#[ignore = "Requires a running MongoDB with the configured user"]
async fn saved_person_is_found() {
    let store = MongoPersonStore::connect(&test_config())
        .await
        .expect("Failed to connect to MongoDB");

    let marker = uuid::Uuid::new_v4().to_string();
    let sent: Person =
        serde_json::from_value(json!({"fornamn": "Mona", "alder": 51, "marker": marker})).unwrap();
    let saved = store.save(sent.clone()).await.expect("save failed");
    assert!(saved.id.is_some());

    let listed = store.find_all().await.expect("find_all failed");
    let found = listed
        .iter()
        .find(|p| p.id == saved.id)
        .expect("saved person not listed");
    assert!(found.contains_fields_of(&sent));
}
