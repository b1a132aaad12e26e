use reqwest::{Client, header};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::locations::{LocationQuery, Locations};

/// Client for the Posti location service.
///
/// Holds no per-call state, so clones can be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http_client: Client,
    endpoint: String,
}

impl LocationClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut http_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        if let Some(ref user_agent) = config.user_agent {
            http_builder = http_builder.user_agent(user_agent);
        }

        let http_client = http_builder.build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up locations matching `query`.
    ///
    /// Issues a single GET; a non-2xx status is returned as an error without
    /// retrying.
    pub async fn get_locations(&self, query: &LocationQuery) -> Result<Locations> {
        let params = query.to_query_pairs();
        tracing::debug!(endpoint = %self.endpoint, ?params, "Querying locations");

        let mut request = self
            .http_client
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json");
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let locations = Locations::from_response(serde_json::from_str(&body)?)?;

        tracing::debug!(count = locations.len(), "Received locations");
        Ok(locations)
    }
}

/// Look up locations with a default client.
pub async fn get_locations(query: &LocationQuery) -> Result<Locations> {
    LocationClient::new()?.get_locations(query).await
}
