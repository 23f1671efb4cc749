//! Cloudflare credential verification.
//!
//! Logins are checked by calling the provider's `/user` endpoint with the
//! operator's global key. Verification is fail-closed: any transport or
//! decoding failure counts as an invalid credential, and the response to the
//! operator never says whether the email or the key was wrong.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

use crate::api::APP_USER_AGENT;

pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid,
    Invalid,
}

/// Collaborator checking an identity/secret pair against the provider.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identity: &str, secret: &SecretString) -> VerifyOutcome;
}

/// Envelope every Cloudflare v4 response is wrapped in. Only the `success`
/// flag matters for verification.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
}

pub struct CloudflareVerifier {
    client: Client,
    base_url: String,
}

impl CloudflareVerifier {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(CF_API_BASE.to_string())
    }

    pub(crate) fn with_base_url(base_url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl CredentialVerifier for CloudflareVerifier {
    async fn verify(&self, identity: &str, secret: &SecretString) -> VerifyOutcome {
        let url = format!("{}/user", self.base_url);

        let response = match self
            .client
            .get(&url)
            .header("X-Auth-Email", identity)
            .header("X-Auth-Key", secret.expose_secret())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!("Credential verification transport failure: {err}");
                return VerifyOutcome::Invalid;
            }
        };

        let status = response.status();
        let envelope = match response.json::<ApiEnvelope>().await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!("Credential verification returned an undecodable body: {err}");
                return VerifyOutcome::Invalid;
            }
        };

        if status.is_success() && envelope.success {
            VerifyOutcome::Valid
        } else {
            debug!(%status, "provider rejected credentials");
            VerifyOutcome::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_success_flag() {
        let body = r#"{"success": true, "errors": [], "messages": [], "result": {"id": "abc"}}"#;
        let envelope: ApiEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.success);

        let body = r#"{"success": false, "errors": [{"code": 9103, "message": "Unknown X-Auth-Key or X-Auth-Email"}]}"#;
        let envelope: ApiEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
    }

    #[tokio::test]
    async fn transport_failure_is_fail_closed() {
        // Nothing listens on this port; the request must fail and the
        // verifier must treat that as an invalid credential.
        let verifier =
            CloudflareVerifier::with_base_url("http://127.0.0.1:9/client/v4".to_string()).unwrap();
        let outcome = verifier
            .verify(
                "operator@example.com",
                &SecretString::from("key".to_string()),
            )
            .await;
        assert_eq!(outcome, VerifyOutcome::Invalid);
    }
}
