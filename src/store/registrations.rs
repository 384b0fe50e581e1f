use tracing::debug;

use crate::db::{Slot, SlotStore};
use crate::models::{OfferingId, Registration, RegistrationId};

use super::DataStore;

impl<S: SlotStore> DataStore<S> {
    /// Register a student, stamping the current time as the registration date.
    pub fn add_registration(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        offering_id: OfferingId,
    ) -> Registration {
        let registration_date = self.now();
        let registration = Registration {
            id: RegistrationId::new(self.next_id()),
            name: name.into(),
            email: email.into(),
            offering_id,
            registration_date,
        };
        self.registrations.push(registration.clone());
        self.persist(Slot::Registrations);
        debug!(
            id = %registration.id,
            contact = %registration.display_contact(),
            %offering_id,
            "registration added"
        );
        self.notify_success(format!(
            "Registration for {} added successfully!",
            registration.name
        ));
        registration
    }

    /// Replace the editable fields. The id and registration date stay as they
    /// were. An unknown id changes nothing, but the success notification is
    /// raised either way.
    pub fn update_registration(
        &mut self,
        id: RegistrationId,
        name: impl Into<String>,
        email: impl Into<String>,
        offering_id: OfferingId,
    ) {
        let (name, email) = (name.into(), email.into());
        if let Some(registration) = self.registrations.iter_mut().find(|r| r.id == id) {
            registration.name = name;
            registration.email = email;
            registration.offering_id = offering_id;
            self.persist(Slot::Registrations);
            debug!(%id, "registration updated");
        } else {
            debug!(%id, "update for unknown registration ignored");
        }
        self.notify_success("Registration updated successfully!");
    }

    /// Nothing refers to a registration, so this always succeeds.
    pub fn delete_registration(&mut self, id: RegistrationId) -> bool {
        self.registrations.retain(|r| r.id != id);
        self.persist(Slot::Registrations);
        debug!(%id, "registration deleted");
        self.notify_success("Registration deleted successfully!");
        true
    }
}
