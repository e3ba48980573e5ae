//! Scripted in-memory service for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    error::DashboardError,
    models::{AppointmentRecord, AppointmentStatus, MessageRecord},
    service::AppointmentService,
    session::Session,
};

pub(crate) type Res<T> = Result<T, DashboardError>;

pub(crate) enum Reply<T> {
    Ready(Res<T>),
    Deferred(oneshot::Receiver<Res<T>>),
}

impl<T> Reply<T> {
    pub(crate) fn deferred() -> (oneshot::Sender<Res<T>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Reply::Deferred(rx))
    }

    async fn resolve(self) -> Res<T> {
        match self {
            Reply::Ready(r) => r,
            Reply::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DashboardError::Network("reply dropped".into()))),
        }
    }
}

#[derive(Default)]
pub(crate) struct ScriptedService {
    lists: Mutex<VecDeque<Reply<Vec<AppointmentRecord>>>>,
    updates: Mutex<VecDeque<Reply<String>>>,
    messages: Mutex<VecDeque<Reply<Vec<MessageRecord>>>>,
    pub(crate) update_calls: Mutex<Vec<(String, AppointmentStatus)>>,
    pub(crate) list_calls: Mutex<usize>,
}

impl ScriptedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_list(&self, reply: Reply<Vec<AppointmentRecord>>) {
        self.lists.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_update(&self, reply: Reply<String>) {
        self.updates.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_messages(&self, reply: Reply<Vec<MessageRecord>>) {
        self.messages.lock().unwrap().push_back(reply);
    }

    pub(crate) fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub(crate) fn update_calls(&self) -> Vec<(String, AppointmentStatus)> {
        self.update_calls.lock().unwrap().clone()
    }
}

pub(crate) fn service_error(status: u16, message: Option<&str>) -> DashboardError {
    DashboardError::Service {
        status,
        message: message.map(str::to_string),
    }
}

#[async_trait]
impl AppointmentService for ScriptedService {
    async fn list_appointments(&self, _session: &Session) -> Res<Vec<AppointmentRecord>> {
        *self.list_calls.lock().unwrap() += 1;
        let reply = self.lists.lock().unwrap().pop_front();
        match reply {
            Some(r) => r.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn update_status(
        &self,
        _session: &Session,
        id: &str,
        status: AppointmentStatus,
    ) -> Res<String> {
        self.update_calls
            .lock()
            .unwrap()
            .push((id.to_string(), status));
        let reply = self.updates.lock().unwrap().pop_front();
        match reply {
            Some(r) => r.resolve().await,
            None => Ok("Status Updated!".to_string()),
        }
    }

    async fn list_messages(&self, _session: &Session) -> Res<Vec<MessageRecord>> {
        let reply = self.messages.lock().unwrap().pop_front();
        match reply {
            Some(r) => r.resolve().await,
            None => Ok(Vec::new()),
        }
    }
}
