//! HTTP implementation of the `MetadataService` port (EC2-style endpoint).

use std::time::Duration;

use crate::application::ports::MetadataService;
use crate::domain::config::MetadataConfig;
use crate::domain::error::NetworkLookupError;

/// Blocking client for `<endpoint>/<key>` lookups. One attempt per call.
pub struct Ec2MetadataClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl Ec2MetadataClient {
    #[must_use]
    pub fn new(config: &MetadataConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("nodeup/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl MetadataService for Ec2MetadataClient {
    fn get_metadata(&self, key: &str) -> Result<String, NetworkLookupError> {
        let fail = |reason: String| NetworkLookupError {
            key: key.to_string(),
            reason,
        };
        let url = format!("{}/{key}", self.endpoint);
        tracing::debug!(%url, "querying instance metadata");

        match self.agent.get(&url).call() {
            Ok(resp) => resp
                .into_string()
                .map(|body| body.trim().to_string())
                .map_err(|e| fail(format!("reading response: {e}"))),
            Err(ureq::Error::Status(code, _)) => Err(fail(format!("HTTP {code}"))),
            Err(e) => Err(fail(e.to_string())),
        }
    }
}
