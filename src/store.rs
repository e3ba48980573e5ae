use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::models::{AppointmentRecord, AppointmentStatus};

/// Immutable value of the whole collection. Records untouched by a patch are
/// shared with the previous snapshot.
pub type Snapshot = Arc<[Arc<AppointmentRecord>]>;

#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    requested: AppointmentStatus,
    in_flight: usize,
}

/// The single local appointment collection of an active dashboard view.
///
/// Writers: the fetcher (wholesale replace) and the reconciler (one-record
/// patch). Every write publishes a fresh snapshot to subscribers.
#[derive(Debug)]
pub struct AppointmentStore {
    snapshot: watch::Sender<Snapshot>,
    pending: Mutex<HashMap<String, PendingEntry>>,
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Snapshot::from(Vec::new()));
        Self {
            snapshot,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the collection verbatim: no sorting, filtering or dedup.
    pub fn replace(&self, records: Vec<AppointmentRecord>) {
        let next: Snapshot = records.into_iter().map(Arc::new).collect();
        self.snapshot.send_replace(next);
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    /// Sets `status` on the record with `id`. Returns false (and publishes
    /// nothing) when no such record is held.
    pub fn patch_status(&self, id: &str, status: AppointmentStatus) -> bool {
        self.snapshot.send_if_modified(|current| {
            if !current.iter().any(|r| r.id == id) {
                return false;
            }
            let next: Snapshot = current
                .iter()
                .map(|r| {
                    if r.id == id {
                        Arc::new(r.with_status(status))
                    } else {
                        Arc::clone(r)
                    }
                })
                .collect();
            *current = next;
            true
        })
    }

    /* -------------------------
       Pending requests (display only)
    --------------------------*/

    pub fn begin_pending(&self, id: &str, requested: AppointmentStatus) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = pending.entry(id.to_string()).or_insert(PendingEntry {
            requested,
            in_flight: 0,
        });
        entry.requested = requested;
        entry.in_flight += 1;
    }

    pub fn end_pending(&self, id: &str) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = pending.get_mut(id) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
            if entry.in_flight == 0 {
                pending.remove(id);
            }
        }
    }

    /// Most recently requested status for `id` while any request for it is unresolved.
    pub fn pending_status(&self, id: &str) -> Option<AppointmentStatus> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .map(|e| e.requested)
    }
}
