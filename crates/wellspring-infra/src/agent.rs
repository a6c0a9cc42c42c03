//! HttpAgentTransport -- concrete [`AgentTransport`] over reqwest.
//!
//! POSTs a candidate request body to the configured agent deployment URL
//! with bearer authentication. The transport reports status and body text
//! only; acceptance logic (2xx + JSON body) belongs to the negotiator.

use std::time::Duration;

use serde_json::Value;

use wellspring_core::negotiate::{AgentTransport, TransportError, TransportReply};

/// HTTP transport for the agent endpoint.
#[derive(Debug, Clone)]
pub struct HttpAgentTransport {
    client: reqwest::Client,
    agent_url: String,
}

impl HttpAgentTransport {
    /// Create a transport for the given deployment URL with a per-request
    /// timeout in seconds.
    pub fn new(agent_url: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        HttpAgentTransport { client, agent_url }
    }

    /// The deployment URL turns are POSTed to.
    pub fn agent_url(&self) -> &str {
        &self.agent_url
    }
}

impl AgentTransport for HttpAgentTransport {
    async fn post(&self, bearer: &str, body: &Value) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(&self.agent_url)
            .bearer_auth(bearer)
            .header("accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(TransportReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_stores_agent_url() {
        let transport =
            HttpAgentTransport::new("http://localhost:9000/ai_service".to_string(), 30);
        assert_eq!(transport.agent_url(), "http://localhost:9000/ai_service");
    }
}
