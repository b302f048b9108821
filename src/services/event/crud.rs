use super::EventService;
use crate::models::event::{validate_title, DateRange, EventId, EventRecord};
use anyhow::{anyhow, Context, Result};
use rusqlite::params;

impl<'a> EventService<'a> {
    /// Create a new event in the database.
    pub fn create(&self, title: &str, range: DateRange) -> Result<EventRecord> {
        let title = validate_title(title).map_err(|e| anyhow!(e))?;

        self.conn
            .execute(
                "INSERT INTO events (title, start_date, end_date) VALUES (?, ?, ?)",
                params![title, range.start(), range.end()],
            )
            .context("Failed to insert event")?;

        let id = EventId(self.conn.last_insert_rowid());
        Ok(EventRecord { id, title, range })
    }

    /// Move an event to a new date range.
    pub fn update_range(&self, id: EventId, range: DateRange) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET start_date = ?, end_date = ?, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?",
                params![range.start(), range.end(), id.0],
            )
            .context("Failed to update event dates")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Replace an event's title.
    pub fn rename(&self, id: EventId, title: &str) -> Result<()> {
        let title = validate_title(title).map_err(|e| anyhow!(e))?;
        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET title = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
                params![title, id.0],
            )
            .context("Failed to rename event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: EventId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id.0])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }
}
