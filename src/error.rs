//! Error types.

use std::time::Duration;
use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible ddnsd error states.
///
/// Configuration variants are only produced at startup. The remaining variants are produced
/// by an [`Exchange`][crate::exchange::Exchange] and surface to HTTP clients as a
/// [`Outcome::TransportFailure`][crate::update::Outcome::TransportFailure].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the configured `Zone` is empty or not fully qualified (trailing dot).
    #[error("zone is not a fully qualified name: \"{0}\"")]
    ZoneNotFQDN(String),

    /// Returned when the configured HTTP access `Token` is empty. An empty token would
    /// authorize requests that omit the `token` parameter entirely.
    #[error("token must not be empty")]
    EmptyToken,

    /// Returned when the configured TSIG `Secret` isn't valid standard BASE64.
    #[error("TSIG secret is not valid base64: {0}")]
    InvalidSecret(#[from] base64::DecodeError),

    /// Returned when the configured `Listen` value can't be parsed as a socket address.
    #[error("invalid listen address: \"{0}\"")]
    InvalidListenAddr(String),

    /// Returned when the configured `Nameserver` doesn't resolve to any socket address.
    #[error("nameserver \"{0}\" did not resolve to any address")]
    NameserverUnresolved(String),

    /// Returned when an update is attempted with an address that can't be carried by an
    /// `A` record, i.e. an unparseable IP literal or an IPv6 address.
    #[error("address \"{0}\" can not be encoded as an A record")]
    UnencodableAddress(String),

    /// Returned when the nameserver did not answer within the configured `DnsTimeout`.
    #[error("DNS exchange timed out after {0:?}")]
    Timeout(Duration),

    /// Returned when the HTTP server can't be started.
    #[error("HTTP server error: {0}")]
    HTTP(#[from] hyper::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred: {0}")]
    IO(#[from] std::io::Error),

    /// Returned when the YAML configuration can't be deserialized.
    #[error("invalid YAML: {0}")]
    InvalidYAML(#[from] serde_yaml::Error),

    /// Returned for DNS protocol errors, e.g. an unparseable name.
    #[error("DNS error: {0}")]
    DNSError(#[from] ProtoError),
}

impl Error {
    /// The error followed by each cause not already part of its message.
    #[must_use]
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !report.contains(&cause_text) {
                report = format!("{report}: {cause_text}");
            }
            source = cause.source();
        }
        report
    }
}
