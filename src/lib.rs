//! Core library for the course administration tool: course types, courses,
//! offerings and student registrations kept in one owned [`DataStore`].
//!
//! The presentation layer opens a store, calls its add/update/delete
//! operations, reads the collections back for display and renders the live
//! notifications. Everything is persisted to durable key-value slots after each
//! mutation.
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod notifications;
pub mod store;
pub mod validation;

/// Durable slot backends.
pub use db::{MemorySlots, Slot, SlotStore, SqliteSlots};

/// Domain types and their identifiers.
pub use models::{
    Course, CourseId, CourseType, CourseTypeId, NotificationId, Offering, OfferingId,
    Registration, RegistrationId, Summary,
};

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use error::{StoreError, ValidationError};
pub use notifications::{Notification, Severity};
pub use store::{CloseError, DanglingReference, DataStore, IntegrityReport};
