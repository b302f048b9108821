//! Contract with the component that stores events.
//!
//! The board never talks to storage directly: it produces [`StoreRequest`]s
//! and applies their results once they come back. [`EventStore`] is the
//! synchronous storage interface, and [`worker::PersistenceWorker`] runs it
//! off the UI thread.

use crate::models::event::{DateRange, EventId, EventRecord};

pub mod sqlite;
pub mod worker;

pub use sqlite::SqliteEventStore;
pub use worker::{Completion, PersistenceWorker, RequestId};

/// Why the store could not carry out a request.
///
/// Both kinds are shown to the user the same way; the split only keeps the
/// store's own message apart from transport or storage trouble.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// The store answered and refused the request.
    #[error("{message}")]
    Rejected { message: String },
    /// The request never got a usable answer.
    #[error("request failed: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for PersistenceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unavailable(format!("{:#}", err))
    }
}

/// Storage of event records.
#[cfg_attr(test, mockall::automock)]
pub trait EventStore: Send {
    fn create_event(&mut self, title: &str, range: DateRange) -> Result<EventId, PersistenceError>;

    fn relocate_event(&mut self, event_id: EventId, range: DateRange) -> Result<(), PersistenceError>;

    fn rename_event(&mut self, event_id: EventId, title: &str) -> Result<(), PersistenceError>;

    fn delete_event(&mut self, event_id: EventId) -> Result<(), PersistenceError>;

    /// Events overlapping `range`, ordered by start date then id.
    fn events_between(&mut self, range: DateRange) -> Result<Vec<EventRecord>, PersistenceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub title: String,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub event_id: EventId,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub event_id: EventId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub event_id: EventId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    Create(CreateRequest),
    Move(MoveRequest),
    Rename(RenameRequest),
    Delete(DeleteRequest),
    Load(LoadRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreResponse {
    Created(EventId),
    Moved,
    Renamed,
    Deleted,
    Loaded(Vec<EventRecord>),
}

impl StoreRequest {
    /// Run the request against a store.
    pub fn execute(&self, store: &mut dyn EventStore) -> Result<StoreResponse, PersistenceError> {
        match self {
            StoreRequest::Create(request) => store
                .create_event(&request.title, request.range)
                .map(StoreResponse::Created),
            StoreRequest::Move(request) => store
                .relocate_event(request.event_id, request.range)
                .map(|()| StoreResponse::Moved),
            StoreRequest::Rename(request) => store
                .rename_event(request.event_id, &request.title)
                .map(|()| StoreResponse::Renamed),
            StoreRequest::Delete(request) => store
                .delete_event(request.event_id)
                .map(|()| StoreResponse::Deleted),
            StoreRequest::Load(request) => store
                .events_between(request.range)
                .map(StoreResponse::Loaded),
        }
    }
}

impl From<CreateRequest> for StoreRequest {
    fn from(request: CreateRequest) -> Self {
        StoreRequest::Create(request)
    }
}

impl From<MoveRequest> for StoreRequest {
    fn from(request: MoveRequest) -> Self {
        StoreRequest::Move(request)
    }
}

impl From<RenameRequest> for StoreRequest {
    fn from(request: RenameRequest) -> Self {
        StoreRequest::Rename(request)
    }
}

impl From<DeleteRequest> for StoreRequest {
    fn from(request: DeleteRequest) -> Self {
        StoreRequest::Delete(request)
    }
}

impl From<LoadRequest> for StoreRequest {
    fn from(request: LoadRequest) -> Self {
        StoreRequest::Load(request)
    }
}
