use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::DashboardError,
    models::{
        AppointmentRecord, AppointmentStatus, AppointmentsResponse, ErrorBody, MessageRecord,
        MessagesResponse, UpdateStatusRequest, UpdateStatusResponse,
    },
    session::Session,
};

pub const LIST_APPOINTMENTS_PATH: &str = "/api/v1/appointment/getall";
pub const UPDATE_APPOINTMENT_PATH: &str = "/api/v1/appointment/update";
pub const LIST_MESSAGES_PATH: &str = "/api/v1/message/getall";

/// Confirmation shown when a successful update carries no message of its own.
pub const GENERIC_UPDATE_SUCCESS: &str = "Status updated";

/// Remote appointment service. One call per user action; implementations never retry.
#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn list_appointments(
        &self,
        session: &Session,
    ) -> Result<Vec<AppointmentRecord>, DashboardError>;

    /// Returns the service's confirmation message.
    async fn update_status(
        &self,
        session: &Session,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<String, DashboardError>;

    async fn list_messages(&self, session: &Session)
    -> Result<Vec<MessageRecord>, DashboardError>;
}

#[derive(Clone)]
pub struct HttpAppointmentService {
    client: Client,
    base_url: String,
}

impl HttpAppointmentService {
    pub fn new(cfg: &Config) -> Result<Self, DashboardError> {
        let client = Client::builder().timeout(cfg.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, DashboardError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| DashboardError::Network(format!("invalid service url: {e}")))
    }

    fn request(
        &self,
        session: &Session,
        method: Method,
        url: Url,
    ) -> Result<RequestBuilder, DashboardError> {
        let Some(token) = session.access_token() else {
            return Err(DashboardError::Unauthenticated);
        };
        Ok(self.client.request(method, url).bearer_auth(token))
    }
}

#[async_trait]
impl AppointmentService for HttpAppointmentService {
    async fn list_appointments(
        &self,
        session: &Session,
    ) -> Result<Vec<AppointmentRecord>, DashboardError> {
        let url = self.endpoint(LIST_APPOINTMENTS_PATH)?;
        let res: AppointmentsResponse =
            request_json(self.request(session, Method::GET, url)?).await?;
        Ok(res.appointments)
    }

    async fn update_status(
        &self,
        session: &Session,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<String, DashboardError> {
        let mut url = self.endpoint(UPDATE_APPOINTMENT_PATH)?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::Network("service url cannot carry a path".into()))?
            .push(id);

        let builder = self
            .request(session, Method::PUT, url)?
            .json(&UpdateStatusRequest { status });
        // any 2xx is a confirmation; the body only supplies the toast text
        let body = send_checked(builder).await?;
        let message = serde_json::from_str::<UpdateStatusResponse>(&body)
            .ok()
            .and_then(|r| r.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_UPDATE_SUCCESS.to_string());
        Ok(message)
    }

    async fn list_messages(
        &self,
        session: &Session,
    ) -> Result<Vec<MessageRecord>, DashboardError> {
        let url = self.endpoint(LIST_MESSAGES_PATH)?;
        let res: MessagesResponse = request_json(self.request(session, Method::GET, url)?).await?;
        Ok(res.messages)
    }
}

async fn request_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, DashboardError> {
    let body = send_checked(builder).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Sends the request and returns the body of a 2xx response.
async fn send_checked(builder: RequestBuilder) -> Result<String, DashboardError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // error bodies are best-effort; a broken one must not mask the failure itself
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        return Err(DashboardError::Service {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}
