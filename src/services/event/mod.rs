//! Calendar event service entry point.
//! Provides SQLite-backed operations on all-day event records, split into
//! write operations (`crud`) and lookups (`queries`).

use rusqlite::Connection;

pub mod crud;
pub mod queries;

/// Service for managing calendar events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
