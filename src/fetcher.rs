use std::collections::HashSet;
use std::sync::{Arc, Weak};

use crate::{service::AppointmentService, session::Session, store::AppointmentStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Collection replaced with this many records.
    Loaded(usize),
    /// Fetch failed; collection left empty.
    Degraded,
    /// View was gone by the time the response arrived.
    Discarded,
    /// This activation already ran its fetch.
    Skipped,
}

/// Initial load of the appointment collection for one view activation.
#[derive(Clone)]
pub struct RecordFetcher {
    service: Arc<dyn AppointmentService>,
    session: Arc<Session>,
    store: Weak<AppointmentStore>,
}

impl RecordFetcher {
    pub fn new(
        service: Arc<dyn AppointmentService>,
        session: Arc<Session>,
        store: Weak<AppointmentStore>,
    ) -> Self {
        Self {
            service,
            session,
            store,
        }
    }

    /// One request, no retry. Any failure degrades to an empty collection.
    pub async fn load(&self) -> FetchOutcome {
        let result = self.service.list_appointments(&self.session).await;

        let Some(store) = self.store.upgrade() else {
            tracing::debug!("dashboard deactivated before appointments arrived; dropping response");
            return FetchOutcome::Discarded;
        };

        match result {
            Ok(records) => {
                warn_on_duplicate_ids(&records);
                let count = records.len();
                store.replace(records);
                tracing::info!(count, "appointments loaded");
                FetchOutcome::Loaded(count)
            }
            Err(e) => {
                store.clear();
                tracing::warn!(error = %e, "error occurred while fetching appointments");
                FetchOutcome::Degraded
            }
        }
    }
}

// The service is trusted for ordering and content; duplicates are only reported.
fn warn_on_duplicate_ids(records: &[crate::models::AppointmentRecord]) {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id.as_str()) {
            tracing::warn!(appointment_id = %r.id, "service returned duplicate appointment id");
        }
    }
}
