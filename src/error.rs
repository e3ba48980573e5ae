use thiserror::Error;

/// Shown when a failed update carries no usable message of its own.
pub const GENERIC_UPDATE_FAILURE: &str = "Failed to update appointment status";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("network error: {0}")]
    Network(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Service {
        status: u16,
        message: Option<String>,
    },

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl DashboardError {
    /// Text for a user-facing notification: the service's own message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Service {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_UPDATE_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_service_text() {
        let err = DashboardError::Service {
            status: 400,
            message: Some("Update failed".into()),
        };
        assert_eq!(err.user_message(), "Update failed");
    }

    #[test]
    fn test_user_message_falls_back() {
        let blank = DashboardError::Service {
            status: 500,
            message: Some("   ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_UPDATE_FAILURE);

        let missing = DashboardError::Service {
            status: 502,
            message: None,
        };
        assert_eq!(missing.user_message(), GENERIC_UPDATE_FAILURE);

        let net = DashboardError::Network("connection refused".into());
        assert_eq!(net.user_message(), GENERIC_UPDATE_FAILURE);

        let decode: DashboardError = serde_json::from_str::<crate::models::ErrorBody>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(decode, DashboardError::Malformed(_)));
        assert_eq!(decode.user_message(), GENERIC_UPDATE_FAILURE);
    }
}
