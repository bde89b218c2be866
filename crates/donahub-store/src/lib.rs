//! # donahub-store
//!
//! The entity store owns every user, material, request and notification
//! record. Collections are `DashMap`s keyed by typed id that remember the
//! order in which records were first inserted; composite writes are
//! serialized through [`EntityStore::transaction`].

pub mod collection;
pub mod record;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use collection::Collection;
pub use record::Record;
pub use seed::{DemoAccounts, seed_demo};
pub use snapshot::StoreSnapshot;
pub use store::EntityStore;
