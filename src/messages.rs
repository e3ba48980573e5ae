use crate::{
    error::DashboardError,
    models::MessageRecord,
    notify::Notifier,
    service::AppointmentService,
    session::{Gate, Session, gate},
};

pub const FETCH_MESSAGES_FAILURE: &str = "Error occurred fetching messages";

/// Read-only list of contact messages. Fetched once, never mutated.
#[derive(Debug, Default)]
pub struct MessageView {
    messages: Vec<MessageRecord>,
}

impl MessageView {
    pub async fn activate(
        session: &Session,
        service: &dyn AppointmentService,
        notifier: &dyn Notifier,
    ) -> Result<Self, DashboardError> {
        if let Gate::Redirect(to) = gate(session) {
            tracing::info!(redirect = to, "messages require sign-in");
            return Err(DashboardError::Unauthenticated);
        }

        let messages = match service.list_messages(session).await {
            Ok(messages) => {
                tracing::info!(count = messages.len(), "messages loaded");
                messages
            }
            Err(e) => {
                tracing::warn!(error = %e, "error occurred fetching messages");
                notifier.error(FETCH_MESSAGES_FAILURE);
                Vec::new()
            }
        };

        Ok(Self { messages })
    }

    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }
}
