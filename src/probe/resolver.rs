//! DNS transport over hickory-resolver.
//!
//! Each query builds a one-shot resolver pinned to a single upstream
//! endpoint, so fallback order stays entirely with the prober. Queries are
//! bounded by a hard 2-second timeout on top of the resolver's own.

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::Resolver;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::{AddressFamily, DnsExchange, ProbeError};

/// Fixed per-attempt query timeout.
const QUERY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, Default)]
pub struct HickoryExchange;

impl HickoryExchange {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DnsExchange for HickoryExchange {
    async fn query(
        &self,
        server: SocketAddr,
        target: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, ProbeError> {
        let name_server = NameServerConfig::new(server, Protocol::Udp);
        let config = ResolverConfig::from_parts(None, vec![], vec![name_server]);

        let mut opts = ResolverOpts::default();
        opts.timeout = QUERY_TIMEOUT;
        opts.attempts = 0;
        opts.cache_size = 0;

        let resolver = Resolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();

        let record_type = match family {
            AddressFamily::V4 => RecordType::A,
            AddressFamily::V6 => RecordType::AAAA,
        };

        let lookup = tokio::time::timeout(QUERY_TIMEOUT, resolver.lookup(target, record_type))
            .await
            .map_err(|_| ProbeError::Timeout)?;

        match lookup {
            Ok(lookup) => Ok(lookup
                .record_iter()
                .filter_map(|record| match record.data() {
                    RData::A(a) => Some(IpAddr::V4(a.0)),
                    RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
                    _ => None,
                })
                .collect()),
            Err(err) => {
                // NXDOMAIN and empty answers are a successful "nothing here",
                // letting the prober fall through to the next endpoint.
                if err.is_no_records_found() {
                    Ok(Vec::new())
                } else {
                    Err(ProbeError::Transport(err.to_string()))
                }
            }
        }
    }
}
