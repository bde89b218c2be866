//! Binding between entity types and their store collection.

use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use donahub_core::types::{MaterialId, NotificationId, RequestId, UserId};
use donahub_entity::material::Material;
use donahub_entity::notification::Notification;
use donahub_entity::request::Request;
use donahub_entity::user::User;

use crate::collection::Collection;
use crate::store::EntityStore;

/// A record the [`EntityStore`] can hold.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Typed primary key.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Human-readable name used in error messages.
    const KIND: &'static str;

    /// Primary key of this record.
    fn id(&self) -> Self::Id;

    /// The collection holding records of this type.
    fn collection(store: &EntityStore) -> &Collection<Self>;
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.users
    }
}

impl Record for Material {
    type Id = MaterialId;
    const KIND: &'static str = "Material";

    fn id(&self) -> MaterialId {
        self.id
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.materials
    }
}

impl Record for Request {
    type Id = RequestId;
    const KIND: &'static str = "Request";

    fn id(&self) -> RequestId {
        self.id
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.requests
    }
}

impl Record for Notification {
    type Id = NotificationId;
    const KIND: &'static str = "Notification";

    fn id(&self) -> NotificationId {
        self.id
    }

    fn collection(store: &EntityStore) -> &Collection<Self> {
        &store.notifications
    }
}
