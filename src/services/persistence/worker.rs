//! Runs store requests off the UI thread.
//!
//! Each submitted request gets its own blocking task on a tokio runtime, so a
//! slow store never stalls input handling. Completions are tagged with the id
//! returned by [`PersistenceWorker::submit`] and may arrive in any order;
//! nothing is coalesced or de-duplicated.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{EventStore, PersistenceError, StoreRequest, StoreResponse};

pub type RequestId = u64;

/// Result of one submitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: RequestId,
    pub request: StoreRequest,
    pub result: Result<StoreResponse, PersistenceError>,
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct PersistenceWorker {
    runtime: Runtime,
    store: Arc<Mutex<Box<dyn EventStore>>>,
    sender: UnboundedSender<Completion>,
    receiver: UnboundedReceiver<Completion>,
    next_id: RequestId,
    in_flight: usize,
    notifier: Option<Notifier>,
}

impl PersistenceWorker {
    pub fn new(store: impl EventStore + 'static) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("event-store")
            .enable_all()
            .build()
            .context("Failed to start persistence runtime")?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let store: Box<dyn EventStore> = Box::new(store);

        Ok(Self {
            runtime,
            store: Arc::new(Mutex::new(store)),
            sender,
            receiver,
            next_id: 1,
            in_flight: 0,
            notifier: None,
        })
    }

    /// Called from the worker thread after every completion, e.g. to wake
    /// the UI for a repaint.
    pub fn with_notifier(mut self, notifier: impl Fn() + Send + Sync + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn submit(&mut self, request: impl Into<StoreRequest>) -> RequestId {
        let request = request.into();
        let id = self.next_id;
        self.next_id += 1;
        self.in_flight += 1;

        log::debug!("Submitting store request {}: {:?}", id, request);

        let store = Arc::clone(&self.store);
        let sender = self.sender.clone();
        let notifier = self.notifier.clone();
        self.runtime.spawn_blocking(move || {
            let result = match store.lock() {
                Ok(mut guard) => request.execute(&mut **guard),
                Err(_) => Err(PersistenceError::Unavailable(
                    "event store is unavailable after an earlier failure".to_string(),
                )),
            };
            if let Err(err) = &result {
                log::error!("Store request {} failed: {}", id, err);
            }
            if sender.send(Completion { id, request, result }).is_err() {
                log::warn!("Dropping completion for request {}: receiver closed", id);
            }
            if let Some(notify) = notifier {
                notify();
            }
        });

        id
    }

    /// Submitted requests whose completion has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Next completion if one is ready, without blocking.
    pub fn try_recv(&mut self) -> Option<Completion> {
        let completion = self.receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    /// All completions that are ready right now.
    pub fn drain(&mut self) -> Vec<Completion> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Block until the next completion. Returns `None` when nothing is in flight.
    pub fn wait(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.runtime.block_on(self.receiver.recv())?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }
}
