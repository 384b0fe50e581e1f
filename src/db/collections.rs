use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;

use super::slots::SlotStore;

/// The four durable slots, one per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    CourseTypes,
    Courses,
    Offerings,
    Registrations,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::CourseTypes,
        Slot::Courses,
        Slot::Offerings,
        Slot::Registrations,
    ];

    /// Key the collection is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Slot::CourseTypes => "courseTypes",
            Slot::Courses => "courses",
            Slot::Offerings => "offerings",
            Slot::Registrations => "registrations",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Read one collection. A slot that is absent, unreadable or not a JSON array
/// of the expected shape loads as empty; the problem is logged, not returned.
pub fn load_collection<T, S>(slots: &S, slot: Slot) -> Vec<T>
where
    T: DeserializeOwned,
    S: SlotStore + ?Sized,
{
    let raw = match slots.read(slot.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(%slot, "slot is empty, starting with no entries");
            return Vec::new();
        }
        Err(err) => {
            warn!(%slot, error = %err, "failed to read slot, starting with no entries");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => {
            let items = items.unwrap_or_default();
            debug!(%slot, count = items.len(), "loaded slot");
            items
        }
        Err(err) => {
            warn!(%slot, error = %err, "slot holds malformed JSON, starting with no entries");
            Vec::new()
        }
    }
}

/// Serialize the whole collection and overwrite its slot.
pub fn save_collection<T, S>(slots: &mut S, slot: Slot, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: SlotStore + ?Sized,
{
    let json = serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: slot.key(),
        source,
    })?;
    slots.write(slot.key(), &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemorySlots;
    use crate::models::{Course, CourseId};

    #[test]
    fn malformed_and_null_slots_load_empty() {
        let mut slots = MemorySlots::new();
        slots.insert("courses", "{not json");
        slots.insert("offerings", "null");
        slots.insert("registrations", r#"{"id":1}"#);

        assert!(load_collection::<Course, _>(&slots, Slot::Courses).is_empty());
        assert!(load_collection::<Course, _>(&slots, Slot::Offerings).is_empty());
        assert!(load_collection::<Course, _>(&slots, Slot::Registrations).is_empty());
        assert!(load_collection::<Course, _>(&slots, Slot::CourseTypes).is_empty());
    }

    #[test]
    fn save_then_load_keeps_order() {
        let mut slots = MemorySlots::new();
        let courses = vec![
            Course { id: CourseId::new(9), name: "Hindi".into() },
            Course { id: CourseId::new(2), name: "English".into() },
        ];

        save_collection(&mut slots, Slot::Courses, &courses).unwrap();

        assert_eq!(
            slots.get("courses"),
            Some(r#"[{"id":9,"name":"Hindi"},{"id":2,"name":"English"}]"#)
        );
        assert_eq!(load_collection::<Course, _>(&slots, Slot::Courses), courses);
    }
}
