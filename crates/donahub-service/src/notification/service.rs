//! Notification storage, delivery and read-state management.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use donahub_auth::{Permission, Principal, RbacEnforcer};
use donahub_core::AppResult;
use donahub_core::config::NotificationsConfig;
use donahub_core::error::AppError;
use donahub_core::events::DomainEvent;
use donahub_core::types::{NotificationId, UserId};
use donahub_entity::notification::{Notification, NotificationKind};
use donahub_entity::user::User;
use donahub_store::EntityStore;

use super::formatter::NotificationDraft;
use super::rules::NotificationRules;

/// Appends notifications to the store and manages their read state.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<EntityStore>,
    rules: NotificationRules,
    rbac: RbacEnforcer,
    sender: broadcast::Sender<Notification>,
    max_stored_per_user: usize,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<EntityStore>, rbac: RbacEnforcer, config: &NotificationsConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            rules: NotificationRules::new(Arc::clone(&store)),
            store,
            rbac,
            sender,
            max_stored_per_user: config.max_stored_per_user,
        }
    }

    /// Observe every notification created from now on.
    ///
    /// Receivers that fall more than the channel capacity behind lose the
    /// oldest messages.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Store an unread notification for `user_id`.
    pub fn notify(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> AppResult<Notification> {
        let notification = Notification::new(user_id, kind, title, message, payload);

        self.store.transaction(|store| {
            if !store.contains::<User>(user_id) {
                return Err(AppError::not_found(format!("User '{user_id}' not found")));
            }
            store.put(notification.clone());
            self.enforce_retention(store, user_id);
            Ok(())
        })?;

        debug!(
            notification_id = %notification.id,
            %user_id,
            kind = %notification.kind,
            "Notification created"
        );
        // No receivers is fine.
        let _ = self.sender.send(notification.clone());
        Ok(notification)
    }

    /// Store one draft.
    pub fn deliver(&self, draft: NotificationDraft) -> AppResult<Notification> {
        self.notify(
            draft.user_id,
            draft.kind,
            draft.title,
            draft.message,
            draft.payload,
        )
    }

    /// Notify everyone the rules name for `event`.
    ///
    /// A recipient that cannot be notified is logged and skipped: the state
    /// change behind the event has already happened.
    pub fn dispatch(&self, event: &DomainEvent) -> Vec<Notification> {
        let drafts = self.rules.drafts_for(event);
        debug!(event = event.name(), recipients = drafts.len(), "Dispatching event");
        drafts
            .into_iter()
            .filter_map(|draft| {
                let recipient = draft.user_id;
                self.deliver(draft)
                    .inspect_err(|e| {
                        warn!(event = event.name(), %recipient, error = %e, "Notification dropped");
                    })
                    .ok()
            })
            .collect()
    }

    /// Dispatch several events in order.
    pub fn dispatch_all(&self, events: &[DomainEvent]) -> Vec<Notification> {
        events.iter().flat_map(|e| self.dispatch(e)).collect()
    }

    /// The principal's notifications, newest first.
    pub fn list(&self, principal: &Principal) -> AppResult<Vec<Notification>> {
        self.rbac.require(principal, Permission::ReadNotifications)?;
        Ok(self.for_user(principal.user_id))
    }

    /// Notifications of `user_id`, newest first. Equal timestamps put the
    /// later insert first.
    pub fn for_user(&self, user_id: UserId) -> Vec<Notification> {
        let mut list = self.store.list(|n: &Notification| n.user_id == user_id);
        list.reverse();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Number of unread notifications of `user_id`.
    pub fn unread_count(&self, user_id: UserId) -> usize {
        self.store
            .count(|n: &Notification| n.user_id == user_id && n.is_unread())
    }

    /// Mark one notification read.
    pub fn mark_read(&self, principal: &Principal, id: NotificationId) -> AppResult<Notification> {
        self.set_read(principal, id, true)
    }

    /// Mark one notification unread.
    pub fn mark_unread(&self, principal: &Principal, id: NotificationId) -> AppResult<Notification> {
        self.set_read(principal, id, false)
    }

    /// Mark every notification of the principal read; returns how many
    /// changed.
    pub fn mark_all_read(&self, principal: &Principal) -> AppResult<usize> {
        self.rbac.require(principal, Permission::ReadNotifications)?;
        let user_id = principal.user_id;
        let changed = self.store.transaction(|store| {
            let unread = store.list(|n: &Notification| n.user_id == user_id && n.is_unread());
            let count = unread.len();
            for mut n in unread {
                n.read = true;
                store.put(n);
            }
            Ok(count)
        })?;
        info!(%user_id, changed, "Marked all notifications read");
        Ok(changed)
    }

    /// Delete one notification.
    pub fn delete(&self, principal: &Principal, id: NotificationId) -> AppResult<Notification> {
        self.rbac.require(principal, Permission::ReadNotifications)?;
        let removed = self.store.transaction(|store| {
            let n: Notification = store.get(id)?;
            ensure_owner(principal, &n)?;
            store.remove::<Notification>(id)
        })?;
        info!(notification_id = %id, user_id = %principal.user_id, "Notification deleted");
        Ok(removed)
    }

    fn set_read(
        &self,
        principal: &Principal,
        id: NotificationId,
        read: bool,
    ) -> AppResult<Notification> {
        self.rbac.require(principal, Permission::ReadNotifications)?;
        self.store.transaction(|store| {
            store.update(id, |n: &mut Notification| {
                ensure_owner(principal, n)?;
                n.read = read;
                Ok(n.clone())
            })
        })
    }

    /// Drop the oldest read, then the oldest unread, notifications of
    /// `user_id` beyond the per-user cap.
    fn enforce_retention(&self, store: &EntityStore, user_id: UserId) {
        if self.max_stored_per_user == 0 {
            return;
        }
        let mut mine = store.list(|n: &Notification| n.user_id == user_id);
        if mine.len() <= self.max_stored_per_user {
            return;
        }
        let excess = mine.len() - self.max_stored_per_user;
        // Stable sort: read before unread, then oldest first, then insertion.
        mine.sort_by(|a, b| {
            a.is_unread()
                .cmp(&b.is_unread())
                .then(a.created_at.cmp(&b.created_at))
        });
        for n in mine.into_iter().take(excess) {
            // Already holding the writer; a concurrent remove is impossible.
            let _ = store.remove::<Notification>(n.id);
        }
        debug!(%user_id, dropped = excess, "Applied notification retention");
    }
}

fn ensure_owner(principal: &Principal, n: &Notification) -> AppResult<()> {
    if n.user_id != principal.user_id {
        warn!(
            notification_id = %n.id,
            user_id = %principal.user_id,
            "Access to another user's notification"
        );
        return Err(AppError::authorization(
            "Notification belongs to another user",
        ));
    }
    Ok(())
}
