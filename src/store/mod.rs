//! The in-memory data store: four related collections, the rules that keep
//! them consistent, and eager write-back to durable slots.
//!
//! Every mutation updates memory first and then rewrites the slot of the one
//! collection it touched. A failed write is logged and remembered; the next
//! [`DataStore::flush`] retries it. Mutations themselves never fail on I/O.

mod course_types;
mod courses;
mod lookups;
mod offerings;
mod registrations;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::db::{load_collection, save_collection, Slot, SlotStore, SqliteSlots};
use crate::error::StoreError;
use crate::ids::IdGenerator;
use crate::models::{Course, CourseType, NotificationId, Offering, Registration};
use crate::notifications::{
    Notification, NotificationCenter, Severity, DEFAULT_NOTIFICATION_TTL,
};

pub use lookups::{
    DanglingReference, IntegrityReport, UNKNOWN_COURSE, UNKNOWN_COURSE_TYPE, UNKNOWN_OFFERING,
};

/// Owns the four collections and the slot backend they are saved to.
pub struct DataStore<S: SlotStore> {
    slots: S,
    clock: Arc<dyn Clock>,
    ids: IdGenerator,
    course_types: Vec<CourseType>,
    courses: Vec<Course>,
    offerings: Vec<Offering>,
    registrations: Vec<Registration>,
    notifications: NotificationCenter,
    unsaved: BTreeSet<Slot>,
}

/// A [`DataStore::close`] that could not write every slot. The store comes
/// back intact, with the failed slots queued, so the caller can retry or keep
/// working.
#[derive(Error)]
#[error("failed to close data store: {source}")]
pub struct CloseError<S: SlotStore> {
    store: DataStore<S>,
    source: StoreError,
}

impl<S: SlotStore> CloseError<S> {
    /// The first write failure.
    pub fn error(&self) -> &StoreError {
        &self.source
    }

    pub fn into_store(self) -> DataStore<S> {
        self.store
    }

    pub fn into_parts(self) -> (DataStore<S>, StoreError) {
        (self.store, self.source)
    }
}

impl<S: SlotStore> fmt::Debug for CloseError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseError")
            .field("source", &self.source)
            .field("unsaved", &self.store.unsaved)
            .finish_non_exhaustive()
    }
}

impl DataStore<SqliteSlots> {
    /// Open (or create) the SQLite file under the configured data directory
    /// and load every collection from it.
    pub fn open_from_config(config: &StoreConfig) -> Result<Self> {
        let slots = SqliteSlots::open(&config.db_path())?;
        Ok(Self::open_with(
            slots,
            Arc::new(SystemClock),
            config.notification_ttl,
        ))
    }
}

impl<S: SlotStore> DataStore<S> {
    /// Load all four collections from `slots` using the system clock.
    pub fn open(slots: S) -> Self {
        Self::open_with(slots, Arc::new(SystemClock), DEFAULT_NOTIFICATION_TTL)
    }

    /// Load all four collections from `slots`. `clock` drives ids,
    /// registration dates and notification deadlines; `notification_ttl` is
    /// how long each notification stays live.
    pub fn open_with(slots: S, clock: Arc<dyn Clock>, notification_ttl: Duration) -> Self {
        let course_types: Vec<CourseType> = load_collection(&slots, Slot::CourseTypes);
        let courses: Vec<Course> = load_collection(&slots, Slot::Courses);
        let offerings: Vec<Offering> = load_collection(&slots, Slot::Offerings);
        let registrations: Vec<Registration> = load_collection(&slots, Slot::Registrations);

        let max_id = course_types
            .iter()
            .map(|t| t.id.get())
            .chain(courses.iter().map(|c| c.id.get()))
            .chain(offerings.iter().map(|o| o.id.get()))
            .chain(registrations.iter().map(|r| r.id.get()))
            .max()
            .unwrap_or(0);

        let store = Self {
            slots,
            clock,
            ids: IdGenerator::seeded(max_id),
            course_types,
            courses,
            offerings,
            registrations,
            notifications: NotificationCenter::new(notification_ttl),
            unsaved: BTreeSet::new(),
        };

        for dangling in store.integrity_report().dangling {
            warn!(%dangling, "dangling reference in stored data");
        }

        debug!(
            course_types = store.course_types.len(),
            courses = store.courses.len(),
            offerings = store.offerings.len(),
            registrations = store.registrations.len(),
            "data store opened"
        );

        store
    }

    /// Course types in insertion order.
    pub fn course_types(&self) -> &[CourseType] {
        &self.course_types
    }

    /// Courses in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Offerings in insertion order.
    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    /// Registrations in insertion order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Prune expired notifications and return the ones still live.
    pub fn notifications(&mut self) -> &[Notification] {
        self.expire_notifications();
        self.notifications.live()
    }

    /// Prune expired notifications and return what was removed.
    pub fn expire_notifications(&mut self) -> Vec<Notification> {
        let now = self.now();
        self.notifications.expire(now)
    }

    /// Remove one notification before its deadline. `false` if it was already
    /// gone.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Push a message through the same channel the store uses for its own
    /// outcomes.
    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationId {
        let now = self.now();
        self.notifications.push(message, severity, now)
    }

    /// Slots whose last write failed and are waiting for [`DataStore::flush`].
    pub fn unsaved_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.unsaved.iter().copied()
    }

    /// Retry every failed slot write. Stops at the first error; slots that
    /// still failed stay queued.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let pending: Vec<Slot> = self.unsaved.iter().copied().collect();
        for slot in pending {
            self.write_slot(slot)?;
            self.unsaved.remove(&slot);
        }
        Ok(())
    }

    /// Write every collection, drop pending notifications and hand the slot
    /// backend back. Every slot is attempted; if any write fails the store is
    /// returned inside the error with those slots queued for [`DataStore::flush`].
    pub fn close(mut self) -> Result<S, CloseError<S>> {
        let mut first_error = None;
        for slot in Slot::ALL {
            match self.write_slot(slot) {
                Ok(()) => {
                    self.unsaved.remove(&slot);
                }
                Err(err) => {
                    error!(%slot, error = %err, "failed to write slot on close");
                    self.unsaved.insert(slot);
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(source) = first_error {
            return Err(CloseError {
                store: self,
                source,
            });
        }

        self.notifications.clear();
        debug!("data store closed");
        Ok(self.slots)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn next_id(&mut self) -> i64 {
        let now = self.now();
        self.ids.next(now)
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.show_notification(message, Severity::Success);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.show_notification(message, Severity::Error);
    }

    /// Write one collection back after a mutation. Failures are queued for
    /// the next flush instead of being returned.
    fn persist(&mut self, slot: Slot) {
        match self.write_slot(slot) {
            Ok(()) => {
                self.unsaved.remove(&slot);
            }
            Err(err) => {
                error!(%slot, error = %err, "failed to persist slot");
                self.unsaved.insert(slot);
            }
        }
    }

    fn write_slot(&mut self, slot: Slot) -> Result<(), StoreError> {
        match slot {
            Slot::CourseTypes => save_collection(&mut self.slots, slot, &self.course_types),
            Slot::Courses => save_collection(&mut self.slots, slot, &self.courses),
            Slot::Offerings => save_collection(&mut self.slots, slot, &self.offerings),
            Slot::Registrations => save_collection(&mut self.slots, slot, &self.registrations),
        }
    }
}
