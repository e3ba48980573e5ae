use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::{
    error::DashboardError,
    fetcher::{FetchOutcome, RecordFetcher},
    models::{AppointmentStatus, Identity},
    notify::Notifier,
    reconciler::{StatusReconciler, UpdateOutcome},
    service::AppointmentService,
    session::{Gate, Session, gate},
    store::{AppointmentStore, Snapshot},
};

/// One activation of the appointments dashboard.
///
/// Owns the local collection. Dropping the view discards it; fetches and
/// updates still in flight then resolve to `Discarded`.
pub struct DashboardView {
    session: Arc<Session>,
    store: Arc<AppointmentStore>,
    fetcher: RecordFetcher,
    reconciler: StatusReconciler,
    fetched: AtomicBool,
}

impl DashboardView {
    pub fn activate(
        session: Arc<Session>,
        service: Arc<dyn AppointmentService>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, DashboardError> {
        if let Gate::Redirect(to) = gate(&session) {
            tracing::info!(redirect = to, "dashboard requires sign-in");
            return Err(DashboardError::Unauthenticated);
        }

        let store = Arc::new(AppointmentStore::new());
        let fetcher = RecordFetcher::new(
            Arc::clone(&service),
            Arc::clone(&session),
            Arc::downgrade(&store),
        );
        let reconciler = StatusReconciler::new(
            service,
            Arc::clone(&session),
            Arc::downgrade(&store),
            notifier,
        );

        Ok(Self {
            session,
            store,
            fetcher,
            reconciler,
            fetched: AtomicBool::new(false),
        })
    }

    /// Runs the initial fetch. Only the first call per activation hits the service.
    pub async fn load(&self) -> FetchOutcome {
        if self.fetched.swap(true, Ordering::SeqCst) {
            return FetchOutcome::Skipped;
        }
        self.fetcher.load().await
    }

    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> UpdateOutcome {
        self.reconciler.update_status(id, status).await
    }

    /// Detached handle for issuing updates from elsewhere (e.g. a row widget).
    pub fn reconciler(&self) -> StatusReconciler {
        self.reconciler.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    pub fn pending_status(&self, id: &str) -> Option<AppointmentStatus> {
        self.store.pending_status(id)
    }

    pub fn admin(&self) -> Option<&Identity> {
        self.session.current_user()
    }

    pub fn deactivate(self) {
        tracing::debug!(records = self.store.len(), "dashboard deactivated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationLog;
    use crate::store::tests::record;
    use crate::testing::{Reply, ScriptedService};

    fn activate(service: &Arc<ScriptedService>) -> DashboardView {
        DashboardView::activate(
            Arc::new(Session::authenticated("tok", None)),
            service.clone(),
            Arc::new(NotificationLog::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_anonymous_session_cannot_activate() {
        let res = DashboardView::activate(
            Arc::new(Session::anonymous()),
            Arc::new(ScriptedService::new()),
            Arc::new(NotificationLog::new()),
        );
        assert!(matches!(res, Err(DashboardError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_load_runs_once_per_activation() {
        let service = Arc::new(ScriptedService::new());
        service.push_list(Reply::Ready(Ok(vec![record(
            "a",
            AppointmentStatus::Pending,
        )])));
        let view = activate(&service);

        assert_eq!(view.load().await, FetchOutcome::Loaded(1));
        assert_eq!(view.load().await, FetchOutcome::Skipped);
        assert_eq!(service.list_calls(), 1);
        assert_eq!(view.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_reactivation_fetches_fresh() {
        let service = Arc::new(ScriptedService::new());
        service.push_list(Reply::Ready(Ok(vec![record(
            "a",
            AppointmentStatus::Pending,
        )])));
        service.push_list(Reply::Ready(Ok(vec![
            record("a", AppointmentStatus::Accepted),
            record("b", AppointmentStatus::Pending),
        ])));

        let first = activate(&service);
        first.load().await;
        first.update_status("a", AppointmentStatus::Rejected).await;
        first.deactivate();

        let second = activate(&service);
        assert_eq!(second.snapshot().len(), 0);
        assert_eq!(second.load().await, FetchOutcome::Loaded(2));
        assert_eq!(second.snapshot()[0].status, AppointmentStatus::Accepted);
        assert_eq!(service.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_each_snapshot() {
        let service = Arc::new(ScriptedService::new());
        service.push_list(Reply::Ready(Ok(vec![
            record("a", AppointmentStatus::Pending),
            record("b", AppointmentStatus::Pending),
        ])));
        let view = activate(&service);
        let mut rx = view.subscribe();

        view.load().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 2);

        view.update_status("b", AppointmentStatus::Accepted).await;
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen[1].status, AppointmentStatus::Accepted);
        assert!(Arc::ptr_eq(&seen, &view.snapshot()));

        view.update_status("z", AppointmentStatus::Rejected).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_detached_reconciler_survives_view_drop() {
        let service = Arc::new(ScriptedService::new());
        let view = activate(&service);
        view.load().await;
        let reconciler = view.reconciler();
        view.deactivate();

        let outcome = reconciler
            .update_status("a", AppointmentStatus::Accepted)
            .await;
        assert_eq!(outcome, UpdateOutcome::Discarded);
    }
}
