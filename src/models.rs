//! Domain models that mirror the JSON slots and get passed to the presentation
//! layer. These stay plain data holders; the store owns every rule about how
//! they relate to each other.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a per-entity identifier. Each one is a distinct type over the raw
/// integer, so a `CourseId` cannot be handed to something expecting a
/// `CourseTypeId`. On disk they stay bare JSON numbers.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`CourseType`].
    CourseTypeId
);
entity_id!(
    /// Identifies a [`Course`].
    CourseId
);
entity_id!(
    /// Identifies an [`Offering`].
    OfferingId
);
entity_id!(
    /// Identifies a [`Registration`].
    RegistrationId
);
entity_id!(
    /// Identifies a live notification. The value is its creation time in
    /// milliseconds.
    NotificationId
);

/// A kind of course, e.g. "Individual" or "Group".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseType {
    pub id: CourseTypeId,
    /// Display name, unique ignoring case when entered through the forms.
    pub name: String,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A subject that can be taught, e.g. "Hindi".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Display name, unique ignoring case when entered through the forms.
    pub name: String,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A course type paired with a course. Students register against offerings,
/// never against a bare course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: OfferingId,
    /// Checked against the course types only by the caller, at selection time.
    pub course_type_id: CourseTypeId,
    /// Checked against the courses only by the caller, at selection time.
    pub course_id: CourseId,
}

/// A student signed up for one offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    /// Student name as entered.
    pub name: String,
    /// Contact address, shape-checked by the forms only.
    pub email: String,
    /// Not checked against the offerings at creation.
    pub offering_id: OfferingId,
    /// Stamped once at creation with millisecond precision. Updates carry it
    /// over untouched.
    pub registration_date: DateTime<Utc>,
}

impl Registration {
    /// `Name <email>` for list rows and log lines.
    pub fn display_contact(&self) -> String {
        if self.email.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} <{}>", self.name, self.email)
        }
    }
}

/// Collection sizes, as shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub course_types: usize,
    pub courses: usize,
    pub offerings: usize,
    pub registrations: usize,
}
