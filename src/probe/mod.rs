//! Delegation-mode probe for zone hostnames.
//!
//! A zone onboarded through the provider's partial (CNAME) setup resolves
//! `<hostname>.cdn.cloudflare.net` to the provider's anycast edge; a fully
//! delegated zone does not. The prober asks the provider's authoritative
//! resolvers directly, one endpoint at a time, and calls an address family
//! "present" only when at least two distinct addresses come back; a single
//! answer is not enough evidence of anycast provisioning.
//!
//! The probe only ever annotates a page. Timeouts, transport faults, and
//! empty answers all degrade to "absent" and are logged, never surfaced.

use async_trait::async_trait;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

mod resolver;

pub use resolver::HickoryExchange;

/// Parent suffix of the provider's anycast edge.
const PARENT_SUFFIX: &str = "cdn.cloudflare.net";

/// Provider authoritative resolvers, tried strictly in order.
const DEFAULT_RESOLVERS: [&str; 2] = ["173.245.59.31:53", "[2400:cb00:2049:1::adf5:3b1f]:53"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

#[derive(Clone, Debug, Error)]
pub enum ProbeError {
    #[error("query timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
}

/// One DNS exchange against a single resolver endpoint.
///
/// Implementations return every address of the requested family found in the
/// answer section; an empty vector is a successful-but-empty response.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn query(
        &self,
        server: SocketAddr,
        target: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ProbeError>;
}

/// Classification of a hostname's delegation mode.
///
/// A family is listed only when it was observed with two or more distinct
/// addresses; otherwise it is omitted entirely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Vec<String>>,
}

pub struct ModeProber {
    servers: Vec<SocketAddr>,
    exchange: Arc<dyn DnsExchange>,
}

impl ModeProber {
    /// Build a prober over the default provider resolver endpoints.
    #[must_use]
    pub fn new(exchange: Arc<dyn DnsExchange>) -> Self {
        Self {
            servers: default_resolvers(),
            exchange,
        }
    }

    /// Classify how `hostname` is delegated at the provider edge.
    ///
    /// A and AAAA are probed independently end-to-end; neither family's
    /// outcome influences the other, and no failure escapes.
    pub async fn classify(&self, hostname: &str) -> ProbeResult {
        let target = format!("{}.{PARENT_SUFFIX}.", hostname.trim_end_matches('.'));

        let ipv4 = self.query_family(&target, AddressFamily::V4).await;
        let ipv6 = self.query_family(&target, AddressFamily::V6).await;

        ProbeResult {
            ipv4: (ipv4.len() >= 2).then_some(ipv4),
            ipv6: (ipv6.len() >= 2).then_some(ipv6),
        }
    }

    /// Walk the resolver list in order and return the distinct addresses from
    /// the first endpoint that answers with at least one record.
    async fn query_family(&self, target: &str, family: AddressFamily) -> Vec<String> {
        for server in &self.servers {
            match self.exchange.query(*server, target, family).await {
                Ok(addrs) if !addrs.is_empty() => {
                    let mut distinct: Vec<String> = Vec::new();
                    for addr in addrs {
                        let addr = addr.to_string();
                        if !distinct.contains(&addr) {
                            distinct.push(addr);
                        }
                    }
                    return distinct;
                }
                Ok(_) => {
                    debug!(%server, target, ?family, "resolver returned no answers");
                }
                Err(err) => {
                    debug!(%server, target, ?family, error = %err, "resolver query failed");
                }
            }
        }
        Vec::new()
    }
}

fn default_resolvers() -> Vec<SocketAddr> {
    DEFAULT_RESOLVERS
        .iter()
        .filter_map(|addr| addr.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    struct ScriptedExchange {
        responses: HashMap<(SocketAddr, AddressFamily), Result<Vec<IpAddr>, ProbeError>>,
        queried: Mutex<Vec<String>>,
    }

    impl ScriptedExchange {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                queried: Mutex::new(Vec::new()),
            }
        }

        fn answer(
            mut self,
            server: SocketAddr,
            family: AddressFamily,
            response: Result<Vec<IpAddr>, ProbeError>,
        ) -> Self {
            self.responses.insert((server, family), response);
            self
        }
    }

    #[async_trait]
    impl DnsExchange for ScriptedExchange {
        async fn query(
            &self,
            server: SocketAddr,
            target: &str,
            family: AddressFamily,
        ) -> Result<Vec<IpAddr>, ProbeError> {
            self.queried.lock().await.push(target.to_string());
            self.responses
                .get(&(server, family))
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn servers() -> Vec<SocketAddr> {
        default_resolvers()
    }

    fn v4(addr: &str) -> IpAddr {
        addr.parse().unwrap()
    }

    fn prober(exchange: ScriptedExchange) -> ModeProber {
        ModeProber::new(Arc::new(exchange))
    }

    #[tokio::test]
    async fn two_answers_mark_family_present_one_does_not() {
        let [primary, _] = [servers()[0], servers()[1]];
        let exchange = ScriptedExchange::new()
            .answer(
                primary,
                AddressFamily::V4,
                Ok(vec![v4("203.0.113.10"), v4("203.0.113.11")]),
            )
            .answer(
                primary,
                AddressFamily::V6,
                Ok(vec!["2001:db8::1".parse().unwrap()]),
            );

        let result = prober(exchange).classify("app.example.com").await;

        assert_eq!(
            result.ipv4,
            Some(vec!["203.0.113.10".to_string(), "203.0.113.11".to_string()])
        );
        assert_eq!(result.ipv6, None);
    }

    #[tokio::test]
    async fn timeout_falls_through_to_next_resolver() {
        let [primary, secondary] = [servers()[0], servers()[1]];
        let exchange = ScriptedExchange::new()
            .answer(primary, AddressFamily::V4, Err(ProbeError::Timeout))
            .answer(
                secondary,
                AddressFamily::V4,
                Ok(vec![
                    v4("203.0.113.10"),
                    v4("203.0.113.11"),
                    v4("203.0.113.12"),
                ]),
            );

        let result = prober(exchange).classify("app.example.com").await;

        assert_eq!(
            result.ipv4,
            Some(vec![
                "203.0.113.10".to_string(),
                "203.0.113.11".to_string(),
                "203.0.113.12".to_string(),
            ])
        );
        assert_eq!(result.ipv6, None);
    }

    #[tokio::test]
    async fn empty_answer_falls_through_transport_error_degrades_silently() {
        let [primary, secondary] = [servers()[0], servers()[1]];
        let exchange = ScriptedExchange::new()
            .answer(primary, AddressFamily::V4, Ok(Vec::new()))
            .answer(
                secondary,
                AddressFamily::V4,
                Ok(vec![v4("203.0.113.10"), v4("203.0.113.11")]),
            )
            .answer(
                primary,
                AddressFamily::V6,
                Err(ProbeError::Transport("connection refused".to_string())),
            )
            .answer(
                secondary,
                AddressFamily::V6,
                Err(ProbeError::Transport("connection refused".to_string())),
            );

        let result = prober(exchange).classify("app.example.com").await;

        assert!(result.ipv4.is_some());
        assert_eq!(result.ipv6, None);
    }

    #[tokio::test]
    async fn first_resolver_with_answers_wins() {
        let [primary, secondary] = [servers()[0], servers()[1]];
        let exchange = ScriptedExchange::new()
            .answer(
                primary,
                AddressFamily::V4,
                Ok(vec![v4("203.0.113.10"), v4("203.0.113.11")]),
            )
            .answer(
                secondary,
                AddressFamily::V4,
                Ok(vec![v4("198.51.100.1"), v4("198.51.100.2")]),
            );

        let result = prober(exchange).classify("app.example.com").await;

        assert_eq!(
            result.ipv4,
            Some(vec!["203.0.113.10".to_string(), "203.0.113.11".to_string()])
        );
    }

    #[tokio::test]
    async fn duplicate_addresses_count_once() {
        let primary = servers()[0];
        let exchange = ScriptedExchange::new().answer(
            primary,
            AddressFamily::V4,
            Ok(vec![v4("203.0.113.10"), v4("203.0.113.10")]),
        );

        let result = prober(exchange).classify("app.example.com").await;

        assert_eq!(result.ipv4, None);
        assert_eq!(result.ipv6, None);
    }

    #[tokio::test]
    async fn query_targets_the_provider_edge_suffix() {
        let exchange = ScriptedExchange::new();
        let prober = ModeProber::new(Arc::new(exchange));

        let result = prober.classify("app.example.com").await;
        assert_eq!(result, ProbeResult::default());
    }

    #[tokio::test]
    async fn classify_builds_fully_qualified_target() {
        let exchange = Arc::new(ScriptedExchange::new());
        let prober = ModeProber {
            servers: servers(),
            exchange: exchange.clone(),
        };

        prober.classify("app.example.com").await;

        let queried = exchange.queried.lock().await;
        assert!(!queried.is_empty());
        assert!(queried
            .iter()
            .all(|target| target == "app.example.com.cdn.cloudflare.net."));
    }
}
