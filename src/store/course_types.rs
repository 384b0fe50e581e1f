use tracing::debug;

use crate::db::{Slot, SlotStore};
use crate::models::{CourseType, CourseTypeId};

use super::DataStore;

impl<S: SlotStore> DataStore<S> {
    /// Append a new course type. Duplicate names are the caller's concern; see
    /// [`DataStore::course_type_name_taken`].
    pub fn add_course_type(&mut self, name: impl Into<String>) -> CourseType {
        let course_type = CourseType {
            id: CourseTypeId::new(self.next_id()),
            name: name.into(),
        };
        self.course_types.push(course_type.clone());
        self.persist(Slot::CourseTypes);
        debug!(id = %course_type.id, name = %course_type.name, "course type added");
        self.notify_success(format!(
            "Course type \"{}\" added successfully!",
            course_type.name
        ));
        course_type
    }

    /// Rename a course type. An unknown id changes nothing, but the success
    /// notification is raised either way.
    pub fn update_course_type(&mut self, id: CourseTypeId, name: impl Into<String>) {
        let name = name.into();
        match self.course_types.iter_mut().find(|t| t.id == id) {
            Some(course_type) => {
                course_type.name = name;
                self.persist(Slot::CourseTypes);
                debug!(%id, "course type updated");
            }
            None => debug!(%id, "update for unknown course type ignored"),
        }
        self.notify_success("Course type updated successfully!");
    }

    /// Remove a course type unless an offering still uses it.
    pub fn delete_course_type(&mut self, id: CourseTypeId) -> bool {
        if self.offerings.iter().any(|o| o.course_type_id == id) {
            debug!(%id, "course type still referenced by an offering");
            self.notify_error("Cannot delete: This course type is used in one or more offerings!");
            return false;
        }

        self.course_types.retain(|t| t.id != id);
        self.persist(Slot::CourseTypes);
        debug!(%id, "course type deleted");
        self.notify_success("Course type deleted successfully!");
        true
    }
}
