use tracing::debug;

use crate::db::{Slot, SlotStore};
use crate::models::{Course, CourseId};

use super::DataStore;

impl<S: SlotStore> DataStore<S> {
    /// Append a new course. Duplicate names are the caller's concern; see
    /// [`DataStore::course_name_taken`].
    pub fn add_course(&mut self, name: impl Into<String>) -> Course {
        let course = Course {
            id: CourseId::new(self.next_id()),
            name: name.into(),
        };
        self.courses.push(course.clone());
        self.persist(Slot::Courses);
        debug!(id = %course.id, name = %course.name, "course added");
        self.notify_success(format!("Course \"{}\" added successfully!", course.name));
        course
    }

    /// Rename a course. An unknown id changes nothing, but the success
    /// notification is raised either way.
    pub fn update_course(&mut self, id: CourseId, name: impl Into<String>) {
        let name = name.into();
        if let Some(course) = self.courses.iter_mut().find(|c| c.id == id) {
            course.name = name;
            self.persist(Slot::Courses);
            debug!(%id, "course updated");
        } else {
            debug!(%id, "update for unknown course ignored");
        }
        self.notify_success("Course updated successfully!");
    }

    /// Remove a course unless an offering still uses it.
    pub fn delete_course(&mut self, id: CourseId) -> bool {
        if self.offerings.iter().any(|o| o.course_id == id) {
            debug!(%id, "course still referenced by an offering");
            self.notify_error("Cannot delete: This course is used in one or more offerings!");
            return false;
        }

        self.courses.retain(|c| c.id != id);
        self.persist(Slot::Courses);
        debug!(%id, "course deleted");
        self.notify_success("Course deleted successfully!");
        true
    }
}
