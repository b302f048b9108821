//! [`EventStore`] backed by the local SQLite database.

use anyhow::Result;

use crate::models::event::{validate_title, DateRange, EventId, EventRecord};
use crate::services::database::Database;
use crate::services::event::EventService;

use super::{EventStore, PersistenceError};

pub struct SqliteEventStore {
    db: Database,
}

impl SqliteEventStore {
    /// Open the database at `path` and make sure the schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let db = Database::new(path)?;
        db.initialize_schema()?;
        Ok(Self { db })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn service(&self) -> EventService<'_> {
        EventService::new(self.db.connection())
    }

    fn ensure_exists(&self, event_id: EventId) -> Result<(), PersistenceError> {
        match self.service().get(event_id)? {
            Some(_) => Ok(()),
            None => Err(PersistenceError::rejected(format!("Event {} not found", event_id))),
        }
    }
}

impl EventStore for SqliteEventStore {
    fn create_event(&mut self, title: &str, range: DateRange) -> Result<EventId, PersistenceError> {
        let title = validate_title(title).map_err(PersistenceError::rejected)?;
        let record = self.service().create(&title, range)?;
        Ok(record.id)
    }

    fn relocate_event(&mut self, event_id: EventId, range: DateRange) -> Result<(), PersistenceError> {
        self.ensure_exists(event_id)?;
        self.service().update_range(event_id, range)?;
        Ok(())
    }

    fn rename_event(&mut self, event_id: EventId, title: &str) -> Result<(), PersistenceError> {
        let title = validate_title(title).map_err(PersistenceError::rejected)?;
        self.ensure_exists(event_id)?;
        self.service().rename(event_id, &title)?;
        Ok(())
    }

    fn delete_event(&mut self, event_id: EventId) -> Result<(), PersistenceError> {
        self.ensure_exists(event_id)?;
        self.service().delete(event_id)?;
        Ok(())
    }

    fn events_between(&mut self, range: DateRange) -> Result<Vec<EventRecord>, PersistenceError> {
        Ok(self.service().find_overlapping(range)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_create_then_relocate() {
        let mut store = SqliteEventStore::in_memory().unwrap();
        let id = store
            .create_event("Review", DateRange::new(day(2), day(4)).unwrap())
            .unwrap();
        store
            .relocate_event(id, DateRange::new(day(5), day(7)).unwrap())
            .unwrap();

        let events = store.events_between(DateRange::new(day(1), day(31)).unwrap()).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].range, DateRange::new(day(5), day(7)).unwrap());
    }

    #[test]
    fn test_missing_event_is_rejected() {
        let mut store = SqliteEventStore::in_memory().unwrap();
        let range = DateRange::single(day(1));
        assert_eq!(
            store.relocate_event(EventId(42), range),
            Err(PersistenceError::rejected("Event 42 not found"))
        );
        assert!(matches!(store.delete_event(EventId(42)), Err(PersistenceError::Rejected { .. })));
        assert!(matches!(store.rename_event(EventId(42), "x"), Err(PersistenceError::Rejected { .. })));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let mut store = SqliteEventStore::in_memory().unwrap();
        assert_eq!(
            store.create_event(" ", DateRange::single(day(1))),
            Err(PersistenceError::rejected("Event title cannot be empty"))
        );
    }
}
