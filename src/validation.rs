//! Checks the presentation layer runs on form input before it calls the store.
//! The store trusts whatever it is given, so these are the only guard against
//! blank names, malformed emails and duplicate entries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::SlotStore;
use crate::error::ValidationError;
use crate::models::{CourseId, CourseTypeId, OfferingId};
use crate::store::DataStore;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Reject blank input. Returns the trimmed text, which is what should be
/// handed to the store.
pub fn require_name<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(trimmed)
    }
}

pub fn require_email(value: &str) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "Email" });
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(trimmed)
}

/// Full check for the course type form. `editing` is the entity being renamed,
/// if any.
pub fn check_course_type_name<'a, S: SlotStore>(
    store: &DataStore<S>,
    name: &'a str,
    editing: Option<CourseTypeId>,
) -> Result<&'a str, ValidationError> {
    let name = require_name("Course type name", name)?;
    if store.course_type_name_taken(name, editing) {
        return Err(ValidationError::Duplicate { kind: "course type" });
    }
    Ok(name)
}

pub fn check_course_name<'a, S: SlotStore>(
    store: &DataStore<S>,
    name: &'a str,
    editing: Option<CourseId>,
) -> Result<&'a str, ValidationError> {
    let name = require_name("Course name", name)?;
    if store.course_name_taken(name, editing) {
        return Err(ValidationError::Duplicate { kind: "course" });
    }
    Ok(name)
}

pub fn check_offering<S: SlotStore>(
    store: &DataStore<S>,
    course_type_id: CourseTypeId,
    course_id: CourseId,
    editing: Option<OfferingId>,
) -> Result<(), ValidationError> {
    if store.offering_exists(course_type_id, course_id, editing) {
        return Err(ValidationError::Duplicate {
            kind: "course offering",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySlots;

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            require_name("Name", "   "),
            Err(ValidationError::Empty { field: "Name" })
        );
        assert_eq!(require_name("Name", "  Asha "), Ok("Asha"));
        assert_eq!(
            ValidationError::Empty { field: "Course name" }.to_string(),
            "Course name cannot be empty!"
        );
    }

    #[test]
    fn email_shape() {
        assert_eq!(require_email("a@x.com"), Ok("a@x.com"));
        assert_eq!(require_email(""), Err(ValidationError::Empty { field: "Email" }));
        for bad in ["asha", "a@x", "a b@x.com", "@x.com", "a@@x.com"] {
            assert_eq!(require_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn duplicates_use_store_state() {
        let mut store = DataStore::open(MemorySlots::new());
        let individual = store.add_course_type("Individual");
        let hindi = store.add_course("Hindi");
        let offering = store.add_offering(individual.id, hindi.id);

        let err = check_course_type_name(&store, "individual", None).unwrap_err();
        assert_eq!(err.to_string(), "This course type already exists!");
        assert_eq!(
            check_course_type_name(&store, " Individual ", Some(individual.id)),
            Ok("Individual")
        );
        assert!(check_course_name(&store, "HINDI", None).is_err());
        assert!(check_offering(&store, individual.id, hindi.id, None).is_err());
        assert!(check_offering(&store, individual.id, hindi.id, Some(offering.id)).is_ok());
    }
}
