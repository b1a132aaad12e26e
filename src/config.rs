use std::env;
use std::time::Duration;

/// Fixed Posti location service endpoint (GET only).
pub const LOCATION_SERVICE_API_ENDPOINT: &str = "https://locationservice.posti.com/location";

/// Configuration for [`LocationClient`](crate::LocationClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Location service URL
    pub endpoint: String,
    /// Whole-request timeout; `None` leaves it to the transport default
    pub timeout: Option<Duration>,
    /// Custom User-Agent header
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: LOCATION_SERVICE_API_ENDPOINT.to_string(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// - `POSTI_LOCATION_ENDPOINT` overrides the endpoint
    /// - `POSTI_TIMEOUT_SECS` sets the request timeout
    /// - `POSTI_USER_AGENT` sets the User-Agent header
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: env::var("POSTI_LOCATION_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.endpoint),
            timeout: env::var("POSTI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
            user_agent: env::var("POSTI_USER_AGENT").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
