use tracing::debug;

use crate::db::{Slot, SlotStore};
use crate::models::{CourseId, CourseTypeId, Offering, OfferingId};

use super::DataStore;

impl<S: SlotStore> DataStore<S> {
    /// Pair a course type with a course. The ids are taken as given; callers
    /// pick them from the live collections.
    pub fn add_offering(&mut self, course_type_id: CourseTypeId, course_id: CourseId) -> Offering {
        let offering = Offering {
            id: OfferingId::new(self.next_id()),
            course_type_id,
            course_id,
        };
        self.offerings.push(offering.clone());
        self.persist(Slot::Offerings);
        debug!(id = %offering.id, %course_type_id, %course_id, "offering added");
        self.notify_success("Course offering added successfully!");
        offering
    }

    /// Replace both sides of the pairing. The new ids are not checked, and an
    /// unknown offering id changes nothing; the success notification is raised
    /// either way.
    pub fn update_offering(
        &mut self,
        id: OfferingId,
        course_type_id: CourseTypeId,
        course_id: CourseId,
    ) {
        if let Some(offering) = self.offerings.iter_mut().find(|o| o.id == id) {
            offering.course_type_id = course_type_id;
            offering.course_id = course_id;
            self.persist(Slot::Offerings);
            debug!(%id, "offering updated");
        } else {
            debug!(%id, "update for unknown offering ignored");
        }
        self.notify_success("Course offering updated successfully!");
    }

    /// Remove an offering unless a registration points at it.
    pub fn delete_offering(&mut self, id: OfferingId) -> bool {
        if self.registrations.iter().any(|r| r.offering_id == id) {
            debug!(%id, "offering still referenced by a registration");
            self.notify_error("Cannot delete: This offering has student registrations!");
            return false;
        }

        self.offerings.retain(|o| o.id != id);
        self.persist(Slot::Offerings);
        debug!(%id, "offering deleted");
        self.notify_success("Course offering deleted successfully!");
        true
    }
}
