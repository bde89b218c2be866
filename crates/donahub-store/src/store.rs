//! The entity store.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use donahub_core::AppResult;
use donahub_core::error::AppError;
use donahub_entity::material::Material;
use donahub_entity::notification::Notification;
use donahub_entity::request::Request;
use donahub_entity::user::User;

use crate::collection::Collection;
use crate::record::Record;

/// Holds every collection of the application.
///
/// Reads go straight to the collections. Any write that depends on a prior
/// read (check then write) must run inside [`EntityStore::transaction`].
#[derive(Debug, Default)]
pub struct EntityStore {
    pub(crate) users: Collection<User>,
    pub(crate) materials: Collection<Material>,
    pub(crate) requests: Collection<Request>,
    pub(crate) notifications: Collection<Notification>,
    writer: Mutex<()>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a record or fail with `NotFound`.
    pub fn get<E: Record>(&self, id: E::Id) -> AppResult<E> {
        self.find(id)
            .ok_or_else(|| AppError::not_found(format!("{} '{id}' not found", E::KIND)))
    }

    /// Fetch a record if present.
    pub fn find<E: Record>(&self, id: E::Id) -> Option<E> {
        E::collection(self).get(&id)
    }

    /// Whether a record exists.
    pub fn contains<E: Record>(&self, id: E::Id) -> bool {
        E::collection(self).contains(&id)
    }

    /// Records matching `predicate`, in insertion order.
    pub fn list<E, F>(&self, predicate: F) -> Vec<E>
    where
        E: Record,
        F: Fn(&E) -> bool,
    {
        E::collection(self).filter(predicate)
    }

    /// Every record of a type, in insertion order.
    pub fn all<E: Record>(&self) -> Vec<E> {
        self.list(|_: &E| true)
    }

    /// Number of records matching `predicate`.
    pub fn count<E, F>(&self, predicate: F) -> usize
    where
        E: Record,
        F: Fn(&E) -> bool,
    {
        E::collection(self).count(predicate)
    }

    /// Insert a new record or replace an existing one in place.
    pub fn put<E: Record>(&self, entity: E) {
        debug!(kind = E::KIND, id = %entity.id(), "Storing record");
        E::collection(self).put(entity);
    }

    /// Remove a record or fail with `NotFound`.
    pub fn remove<E: Record>(&self, id: E::Id) -> AppResult<E> {
        let removed = E::collection(self)
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("{} '{id}' not found", E::KIND)))?;
        debug!(kind = E::KIND, %id, "Removed record");
        Ok(removed)
    }

    /// Read, modify and write back one record.
    ///
    /// The record is only written when `f` succeeds.
    pub fn update<E, T, F>(&self, id: E::Id, f: F) -> AppResult<T>
    where
        E: Record,
        F: FnOnce(&mut E) -> AppResult<T>,
    {
        let mut entity: E = self.get(id)?;
        let out = f(&mut entity)?;
        self.put(entity);
        Ok(out)
    }

    /// Run `f` as the only writer.
    ///
    /// Transactions do not nest: calling `transaction` from inside `f`
    /// deadlocks. Writes made before `f` fails are kept.
    pub fn transaction<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Self) -> AppResult<T>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        f(self)
    }

    /// Whether the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.materials.is_empty()
            && self.requests.is_empty()
            && self.notifications.is_empty()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.users.clear();
        self.materials.clear();
        self.requests.clear();
        self.notifications.clear();
    }
}
