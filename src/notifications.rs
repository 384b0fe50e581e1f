//! Short-lived feedback messages raised by store operations.
//!
//! Every notification carries its own deadline. Nothing runs in the
//! background: whoever renders the list asks for it with the current time and
//! expired entries are dropped on the way out. Because the list is owned by
//! the store, tearing the store down takes every pending notification with it.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::ids::IdGenerator;
use crate::models::NotificationId;

/// How long a notification stays visible.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug)]
pub struct NotificationCenter {
    live: Vec<Notification>,
    ttl: TimeDelta,
    ids: IdGenerator,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            live: Vec::new(),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            ids: IdGenerator::default(),
        }
    }

    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NotificationId {
        let id = NotificationId::new(self.ids.next(now));
        let expires_at = now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.live.push(Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            expires_at,
        });
        id
    }

    /// Drop every notification whose own deadline has passed and return them.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(|notification| notification.is_expired(now));
        self.live = live;
        expired
    }

    /// Cancel one notification ahead of its deadline.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.live.len();
        self.live.retain(|notification| notification.id != id);
        self.live.len() != before
    }

    /// Everything pushed and not yet pruned, oldest first.
    pub fn live(&self) -> &[Notification] {
        &self.live
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + millis).unwrap()
    }

    #[test]
    fn each_notification_expires_on_its_own_deadline() {
        let mut center = NotificationCenter::default();
        let first = center.push("first", Severity::Success, at(0));
        let second = center.push("second", Severity::Error, at(1_000));

        let expired = center.expire(at(3_000));

        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, first);
        assert_eq!(center.live().len(), 1);
        assert_eq!(center.live()[0].id, second);

        assert_eq!(center.expire(at(3_999)).len(), 0);
        assert_eq!(center.expire(at(4_000)).len(), 1);
        assert!(center.live().is_empty());
    }

    #[test]
    fn ids_are_unique_within_one_millisecond() {
        let mut center = NotificationCenter::default();
        let a = center.push("a", Severity::Success, at(0));
        let b = center.push("b", Severity::Success, at(0));
        assert_ne!(a, b);
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut center = NotificationCenter::default();
        let a = center.push("a", Severity::Success, at(0));
        let b = center.push("b", Severity::Success, at(0));

        assert!(center.dismiss(a));
        assert!(!center.dismiss(a));
        assert_eq!(center.live().len(), 1);
        assert_eq!(center.live()[0].id, b);
    }

    #[test]
    fn custom_ttl_sets_the_deadline() {
        let mut center = NotificationCenter::new(Duration::from_millis(500));
        center.push("short", Severity::Success, at(0));
        assert_eq!(center.live()[0].expires_at, at(500));
    }
}
