use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/* -------------------------
   Appointment status
--------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Rejected,
}

impl AppointmentStatus {
    /// Every selectable target, in the order the selector offers them.
    /// The service decides which transitions are legal, so all three are always offered.
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Accepted,
        AppointmentStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Accepted => "Accepted",
            AppointmentStatus::Rejected => "Rejected",
        }
    }

    pub fn style_class(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "value-pending",
            AppointmentStatus::Accepted => "value-accepted",
            AppointmentStatus::Rejected => "value-rejected",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown status '{}' (expected Pending, Accepted or Rejected)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AppointmentStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/* -------------------------
   Records
--------------------------*/

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRef {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One appointment request as returned by the service.
///
/// Fields this layer does not interpret (email, phone, address, ids of the
/// linked doctor/patient, ...) are kept in `extra` so the record stays equal
/// to what was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub appointment_date: String,
    pub department: String,
    pub doctor: DoctorRef,
    pub status: AppointmentStatus,
    #[serde(rename = "hasVisited", default)]
    pub has_visited: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Width of `YYYY-MM-DDTHH:MM`.
const DISPLAY_DATE_WIDTH: usize = 16;

impl AppointmentRecord {
    pub fn patient_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn doctor_name(&self) -> String {
        format!("{} {}", self.doctor.first_name, self.doctor.last_name)
    }

    /// Date and time to the minute; the stored string is truncated, never reformatted.
    pub fn display_date(&self) -> &str {
        match self.appointment_date.char_indices().nth(DISPLAY_DATE_WIDTH) {
            Some((idx, _)) => &self.appointment_date[..idx],
            None => &self.appointment_date,
        }
    }

    /// Copy of this record with only `status` replaced.
    pub fn with_status(&self, status: AppointmentStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Signed-in admin, shown in the greeting banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/* -------------------------
   Wire DTOs
--------------------------*/

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Success body. Only `message` is read, and only for the toast text.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure body. `message` is optional because a broken service may omit it.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
