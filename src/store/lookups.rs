//! Read-only queries over the store. Nothing here mutates state or raises a
//! notification.

use std::fmt;

use crate::db::SlotStore;
use crate::models::{
    Course, CourseId, CourseType, CourseTypeId, Offering, OfferingId, Registration,
    RegistrationId, Summary,
};

use super::DataStore;

pub const UNKNOWN_COURSE_TYPE: &str = "Unknown Type";
pub const UNKNOWN_COURSE: &str = "Unknown Course";
pub const UNKNOWN_OFFERING: &str = "Unknown Offering";

/// A stored foreign key that points at nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DanglingReference {
    OfferingCourseType {
        offering: OfferingId,
        course_type: CourseTypeId,
    },
    OfferingCourse {
        offering: OfferingId,
        course: CourseId,
    },
    RegistrationOffering {
        registration: RegistrationId,
        offering: OfferingId,
    },
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingReference::OfferingCourseType {
                offering,
                course_type,
            } => write!(f, "offering {offering} refers to missing course type {course_type}"),
            DanglingReference::OfferingCourse { offering, course } => {
                write!(f, "offering {offering} refers to missing course {course}")
            }
            DanglingReference::RegistrationOffering {
                registration,
                offering,
            } => write!(
                f,
                "registration {registration} refers to missing offering {offering}"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
}

impl IntegrityReport {
    /// No dangling references were found.
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

impl<S: SlotStore> DataStore<S> {
    /// The course type with `id`, if present.
    pub fn course_type(&self, id: CourseTypeId) -> Option<&CourseType> {
        self.course_types.iter().find(|t| t.id == id)
    }

    /// The course with `id`, if present.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// The offering with `id`, if present.
    pub fn offering(&self, id: OfferingId) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.id == id)
    }

    /// The registration with `id`, if present.
    pub fn registration(&self, id: RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    /// Name of the course type, or [`UNKNOWN_COURSE_TYPE`].
    pub fn course_type_name(&self, id: CourseTypeId) -> &str {
        self.course_type(id)
            .map_or(UNKNOWN_COURSE_TYPE, |t| t.name.as_str())
    }

    /// Name of the course, or [`UNKNOWN_COURSE`].
    pub fn course_name(&self, id: CourseId) -> &str {
        self.course(id).map_or(UNKNOWN_COURSE, |c| c.name.as_str())
    }

    /// `"<type name> - <course name>"` for the offering, or
    /// [`UNKNOWN_OFFERING`]. Each half falls back to its own placeholder when
    /// the stored key no longer resolves.
    pub fn offering_details(&self, id: OfferingId) -> String {
        match self.offering(id) {
            Some(offering) => format!(
                "{} - {}",
                self.course_type_name(offering.course_type_id),
                self.course_name(offering.course_id)
            ),
            None => UNKNOWN_OFFERING.to_string(),
        }
    }

    /// Case-insensitive name clash check. `except` skips the entity being
    /// renamed.
    pub fn course_type_name_taken(&self, name: &str, except: Option<CourseTypeId>) -> bool {
        let wanted = name.to_lowercase();
        self.course_types
            .iter()
            .filter(|t| Some(t.id) != except)
            .any(|t| t.name.to_lowercase() == wanted)
    }

    /// Course counterpart of [`DataStore::course_type_name_taken`].
    pub fn course_name_taken(&self, name: &str, except: Option<CourseId>) -> bool {
        let wanted = name.to_lowercase();
        self.courses
            .iter()
            .filter(|c| Some(c.id) != except)
            .any(|c| c.name.to_lowercase() == wanted)
    }

    /// Whether another offering already pairs this type with this course.
    pub fn offering_exists(
        &self,
        course_type_id: CourseTypeId,
        course_id: CourseId,
        except: Option<OfferingId>,
    ) -> bool {
        self.offerings.iter().any(|o| {
            Some(o.id) != except && o.course_type_id == course_type_id && o.course_id == course_id
        })
    }

    /// Offerings of one course type, in insertion order.
    pub fn offerings_for_course_type(
        &self,
        course_type_id: CourseTypeId,
    ) -> impl Iterator<Item = &Offering> + '_ {
        self.offerings
            .iter()
            .filter(move |o| o.course_type_id == course_type_id)
    }

    /// Registrations against one offering, in insertion order.
    pub fn registrations_for_offering(
        &self,
        offering_id: OfferingId,
    ) -> impl Iterator<Item = &Registration> + '_ {
        self.registrations
            .iter()
            .filter(move |r| r.offering_id == offering_id)
    }

    /// Collection sizes for the dashboard.
    pub fn summary(&self) -> Summary {
        Summary {
            course_types: self.course_types.len(),
            courses: self.courses.len(),
            offerings: self.offerings.len(),
            registrations: self.registrations.len(),
        }
    }

    /// Foreign keys that no longer resolve. Deletes are guarded, so these only
    /// appear when the durable slots were edited from outside.
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut dangling = Vec::new();

        for offering in &self.offerings {
            if self.course_type(offering.course_type_id).is_none() {
                dangling.push(DanglingReference::OfferingCourseType {
                    offering: offering.id,
                    course_type: offering.course_type_id,
                });
            }
            if self.course(offering.course_id).is_none() {
                dangling.push(DanglingReference::OfferingCourse {
                    offering: offering.id,
                    course: offering.course_id,
                });
            }
        }

        for registration in &self.registrations {
            if self.offering(registration.offering_id).is_none() {
                dangling.push(DanglingReference::RegistrationOffering {
                    registration: registration.id,
                    offering: registration.offering_id,
                });
            }
        }

        IntegrityReport { dangling }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::store;

    #[test]
    fn names_fall_back_to_placeholders() {
        let (mut store, _clock) = store();
        let individual = store.add_course_type("Individual");
        let hindi = store.add_course("Hindi");

        assert_eq!(store.course_type_name(individual.id), "Individual");
        assert_eq!(store.course_name(hindi.id), "Hindi");
        assert_eq!(store.course_type_name(CourseTypeId::new(1)), UNKNOWN_COURSE_TYPE);
        assert_eq!(store.course_name(CourseId::new(1)), UNKNOWN_COURSE);
    }

    #[test]
    fn offering_details_joins_both_names() {
        let (mut store, _clock) = store();
        let individual = store.add_course_type("Individual");
        let hindi = store.add_course("Hindi");
        let offering = store.add_offering(individual.id, hindi.id);

        assert_eq!(store.offering_details(offering.id), "Individual - Hindi");
        assert_eq!(store.offering_details(OfferingId::new(1)), "Unknown Offering");
    }

    #[test]
    fn dangling_offering_reads_as_two_placeholders() {
        let (mut store, _clock) = store();
        let offering = store.add_offering(CourseTypeId::new(1), CourseId::new(2));

        assert_eq!(
            store.offering_details(offering.id),
            "Unknown Type - Unknown Course"
        );
        assert_eq!(store.integrity_report().dangling.len(), 2);
    }

    #[test]
    fn name_checks_ignore_case_and_the_edited_entity() {
        let (mut store, _clock) = store();
        let individual = store.add_course_type("Individual");
        let hindi = store.add_course("Hindi");

        assert!(store.course_type_name_taken("INDIVIDUAL", None));
        assert!(!store.course_type_name_taken("individual", Some(individual.id)));
        assert!(!store.course_type_name_taken("Group", None));
        assert!(store.course_name_taken("hindi", None));
        assert!(!store.course_name_taken("Hindi", Some(hindi.id)));
    }

    #[test]
    fn duplicate_offering_detection() {
        let (mut store, _clock) = store();
        let individual = store.add_course_type("Individual");
        let hindi = store.add_course("Hindi");
        let offering = store.add_offering(individual.id, hindi.id);

        assert!(store.offering_exists(individual.id, hindi.id, None));
        assert!(!store.offering_exists(individual.id, hindi.id, Some(offering.id)));
    }

    #[test]
    fn filters_and_summary() {
        let (mut store, _clock) = store();
        let individual = store.add_course_type("Individual");
        let group = store.add_course_type("Group");
        let hindi = store.add_course("Hindi");
        let solo = store.add_offering(individual.id, hindi.id);
        store.add_offering(group.id, hindi.id);
        store.add_registration("Asha", "a@x.com", solo.id);

        let for_individual: Vec<_> = store.offerings_for_course_type(individual.id).collect();
        assert_eq!(for_individual, [&solo]);
        assert_eq!(store.registrations_for_offering(solo.id).count(), 1);
        assert_eq!(
            store.summary(),
            Summary {
                course_types: 2,
                courses: 1,
                offerings: 2,
                registrations: 1,
            }
        );
        assert!(store.integrity_report().is_clean());
    }

    #[test]
    fn report_lists_orphaned_registrations() {
        let (mut store, _clock) = store();
        let registration = store.add_registration("Asha", "a@x.com", OfferingId::new(5));

        assert_eq!(
            store.integrity_report().dangling,
            vec![DanglingReference::RegistrationOffering {
                registration: registration.id,
                offering: OfferingId::new(5),
            }]
        );
    }
}
