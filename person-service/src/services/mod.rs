pub mod database;
pub mod memory;
pub mod store;

pub use database::{MongoConnector, MongoPersonStore, PERSON_COLLECTION};
pub use memory::{InMemoryConnector, InMemoryPersonStore};
pub use store::{LazyPersonStore, PersonStore, StoreConnector};
