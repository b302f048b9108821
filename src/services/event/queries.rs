use super::EventService;
use crate::models::event::{DateRange, EventId, EventRecord};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{self, Row};

impl<'a> EventService<'a> {
    /// Retrieve an event by ID.
    pub fn get(&self, id: EventId) -> Result<Option<EventRecord>> {
        let result = self.conn.query_row(
            "SELECT id, title, start_date, end_date FROM events WHERE id = ?",
            [id.0],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Events sharing at least one day with `range`, ordered by start date.
    pub fn find_overlapping(&self, range: DateRange) -> Result<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, start_date, end_date
             FROM events
             WHERE start_date <= ?1 AND end_date >= ?2
             ORDER BY start_date ASC, id ASC",
        )?;

        let events = stmt
            .query_map([range.end(), range.start()], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}

fn map_event_row(row: &Row<'_>) -> Result<EventRecord, rusqlite::Error> {
    let start: NaiveDate = row.get(2)?;
    let end: NaiveDate = row.get(3)?;
    let range = DateRange::new(start, end).map_err(|message| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            message.into(),
        )
    })?;

    Ok(EventRecord {
        id: EventId(row.get(0)?),
        title: row.get(1)?,
        range,
    })
}
