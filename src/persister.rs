use chrono::Utc;
use uuid::Uuid;

use crate::error::{FormError, RequiredField};
use crate::form::FormSnapshot;
use crate::models::EventRecord;
use crate::store::EventStore;

/// Builds a record from a snapshot. Stamps a fresh id and the current time;
/// does not validate.
pub fn collect(snapshot: &FormSnapshot) -> EventRecord {
    EventRecord {
        id: Uuid::new_v4(),
        event_name: snapshot.event_name.clone(),
        event_description: snapshot.event_description.trim().to_string(),
        start_date: snapshot.start_date.clone(),
        end_date: snapshot.end_date.clone(),
        event_image: snapshot.event_image.clone(),
        country: snapshot.country.clone(),
        city: snapshot.city.clone(),
        available_tickets: snapshot.available_tickets.clone(),
        tags: snapshot.tags.clone(),
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Presence checks only. Dates, tickets and the image path are taken as typed.
pub fn validate(record: &EventRecord) -> Result<(), FormError> {
    if record.event_name.is_empty() {
        return Err(FormError::MissingField(RequiredField::EventName));
    }
    if record.event_description.is_empty() {
        return Err(FormError::MissingField(RequiredField::EventDescription));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Persister {
    store: EventStore,
}

impl Persister {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn persist(&self, record: &EventRecord) -> Result<(), FormError> {
        let total = self.store.append(record)?;
        log::info!(
            "created event {} ({:?}); store now holds {total}",
            record.id,
            record.event_name
        );
        Ok(())
    }

    /// collect, validate, persist. A rejected record never touches the store.
    pub fn submit(&self, snapshot: &FormSnapshot) -> Result<EventRecord, FormError> {
        let record = collect(snapshot);
        validate(&record)?;
        self.persist(&record)?;
        Ok(record)
    }
}
