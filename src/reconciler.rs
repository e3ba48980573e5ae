use std::sync::{Arc, Weak};

use tracing::Instrument;
use uuid::Uuid;

use crate::{
    models::AppointmentStatus, notify::Notifier, service::AppointmentService, session::Session,
    store::AppointmentStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Service confirmed; `patched` is false when the id wasn't held locally.
    Applied { message: String, patched: bool },
    /// Service refused or the call failed; local state untouched.
    Rejected { message: String },
    /// View was gone by the time the response arrived.
    Discarded,
}

/// Apply-on-confirm status updates.
///
/// Local state is written only after the service confirms, so there is never a
/// rollback. Calls are neither queued nor deduplicated: two in-flight updates
/// for the same record resolve last-response-wins.
#[derive(Clone)]
pub struct StatusReconciler {
    service: Arc<dyn AppointmentService>,
    session: Arc<Session>,
    store: Weak<AppointmentStore>,
    notifier: Arc<dyn Notifier>,
}

impl StatusReconciler {
    pub fn new(
        service: Arc<dyn AppointmentService>,
        session: Arc<Session>,
        store: Weak<AppointmentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            session,
            store,
            notifier,
        }
    }

    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> UpdateOutcome {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "update_status",
            %request_id,
            appointment_id = %id,
            %status
        );
        self.reconcile(id, status).instrument(span).await
    }

    async fn reconcile(&self, id: &str, status: AppointmentStatus) -> UpdateOutcome {
        // no strong handle may be held across the await, or deactivation could not drop the store
        if let Some(store) = self.store.upgrade() {
            store.begin_pending(id, status);
        }

        let result = self.service.update_status(&self.session, id, status).await;

        let Some(store) = self.store.upgrade() else {
            tracing::debug!("dashboard deactivated before the update resolved; dropping response");
            return UpdateOutcome::Discarded;
        };
        store.end_pending(id);

        match result {
            Ok(message) => {
                let patched = store.patch_status(id, status);
                if !patched {
                    tracing::debug!("confirmed appointment is not in the local collection");
                }
                tracing::info!(patched, "appointment status updated");
                self.notifier.success(&message);
                UpdateOutcome::Applied { message, patched }
            }
            Err(e) => {
                tracing::warn!(error = %e, "appointment status update failed");
                let message = e.user_message();
                self.notifier.error(&message);
                UpdateOutcome::Rejected { message }
            }
        }
    }
}
