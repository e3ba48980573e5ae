use std::env;
use std::time::Duration;

use crate::models::Identity;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub admin: Option<Identity>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = env::var("DASHBOARD_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:4000".to_string())
            .trim_end_matches('/')
            .to_string();
        let access_token = env::var("DASHBOARD_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let admin = match (
            env::var("DASHBOARD_ADMIN_FIRST_NAME"),
            env::var("DASHBOARD_ADMIN_LAST_NAME"),
        ) {
            (Ok(first_name), Ok(last_name)) => Some(Identity {
                first_name,
                last_name,
                email: env::var("DASHBOARD_ADMIN_EMAIL").ok(),
            }),
            _ => None,
        };
        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        Ok(Self {
            api_url,
            access_token,
            admin,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
