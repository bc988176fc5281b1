use crate::error::Error;
use base64::engine::general_purpose;
use base64::Engine;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use trust_dns_client::rr::Name;
use trust_dns_proto::rr::dnssec::rdata::tsig::TsigAlgorithm;

pub type SharedConfig = Arc<Config>;

/// TSIG key name historically used for every update. Kept as the default so existing
/// nameserver key definitions keep working.
pub const DEFAULT_KEY_NAME: &str = "axfr.";

const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub listen: String,
    #[serde(default)]
    pub base_url: String,
    pub zone: String,
    pub nameserver: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    pub token: String,
    pub secret: String,
    #[serde(default = "default_key_name")]
    pub key_name: String,
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub transport: Transport,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_http_timeout")]
    pub http_timeout: Duration,
}

/// HMAC algorithm used to sign updates.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    HmacMd5,
    HmacSha1,
    HmacSha224,
    #[default]
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl From<Algorithm> for TsigAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::HmacMd5 => TsigAlgorithm::HmacMd5,
            Algorithm::HmacSha1 => TsigAlgorithm::HmacSha1,
            Algorithm::HmacSha224 => TsigAlgorithm::HmacSha224,
            Algorithm::HmacSha256 => TsigAlgorithm::HmacSha256,
            Algorithm::HmacSha384 => TsigAlgorithm::HmacSha384,
            Algorithm::HmacSha512 => TsigAlgorithm::HmacSha512,
        }
    }
}

/// Transport used for the exchange with the nameserver.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Udp,
    Tcp,
}

fn default_key_name() -> String {
    DEFAULT_KEY_NAME.to_string()
}

fn default_dns_timeout() -> Duration {
    DEFAULT_DNS_TIMEOUT
}

fn default_http_timeout() -> Duration {
    DEFAULT_HTTP_TIMEOUT
}

impl Config {
    /// Load and validate a YAML (or JSON) configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be read, [`Error::InvalidYAML`] if it can't be
    /// deserialized, or any of the validation errors described by [`Config::validate`].
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_yaml::from_reader(reader)?;
        conf.validate()?;
        Ok(conf)
    }

    /// Check the invariants every request relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZoneNotFQDN`], [`Error::EmptyToken`], [`Error::InvalidSecret`],
    /// [`Error::DNSError`] for an invalid `KeyName`, or [`Error::InvalidListenAddr`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.zone.is_empty() || !self.zone.ends_with('.') {
            return Err(Error::ZoneNotFQDN(self.zone.clone()));
        }
        if self.token.is_empty() {
            return Err(Error::EmptyToken);
        }
        self.tsig_key()?;
        self.key_name()?;
        self.listen_addr()?;
        Ok(())
    }

    /// The socket address to serve HTTP on. A bare `:port` binds all IPv4 interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidListenAddr`] when `Listen` isn't a socket address.
    pub fn listen_addr(&self) -> Result<SocketAddr, Error> {
        let listen = match self.listen.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => self.listen.clone(),
        };
        SocketAddr::from_str(&listen).map_err(|_| Error::InvalidListenAddr(self.listen.clone()))
    }

    /// Path the update handler is served on, `BaseUrl` followed by `/dns/`.
    #[must_use]
    pub fn route_path(&self) -> String {
        format!("{}/dns/", self.base_path())
    }

    /// Path the health check is served on.
    #[must_use]
    pub fn healthcheck_path(&self) -> String {
        format!("{}/healthcheck", self.base_path())
    }

    fn base_path(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match base {
            "" => String::new(),
            b if b.starts_with('/') => b.to_string(),
            b => format!("/{b}"),
        }
    }

    /// The decoded TSIG secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecret`] when `Secret` isn't standard BASE64.
    pub fn tsig_key(&self) -> Result<Vec<u8>, Error> {
        Ok(general_purpose::STANDARD.decode(self.secret.trim())?)
    }

    /// The TSIG key name updates are signed under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DNSError`] when `KeyName` isn't a valid DNS name.
    pub fn key_name(&self) -> Result<Name, Error> {
        Ok(Name::from_str(&self.key_name)?)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let conf: Config = serde_yaml::from_str(s)?;
        conf.validate()?;
        Ok(conf)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const EXAMPLE: &str = r#"
Listen: ":8080"
Nameserver: a.ns.example.com:53
TTL: 3600
Zone: home.example.com.
Token: test
Secret: c2VjcmV0LWtleS1tYXRlcmlhbA==
"#;

    pub(crate) fn example() -> Config {
        Config::from_str(EXAMPLE).unwrap()
    }

    #[test]
    fn loads_historical_keys_with_defaults() {
        let conf = example();
        assert_eq!(conf.zone, "home.example.com.");
        assert_eq!(conf.nameserver, "a.ns.example.com:53");
        assert_eq!(conf.ttl, 3600);
        assert_eq!(conf.token, "test");
        assert_eq!(conf.key_name, DEFAULT_KEY_NAME);
        assert_eq!(conf.algorithm, Algorithm::HmacSha256);
        assert_eq!(conf.transport, Transport::Udp);
        assert_eq!(conf.dns_timeout, Duration::from_secs(5));
        assert_eq!(conf.http_timeout, Duration::from_secs(30));
        assert_eq!(conf.tsig_key().unwrap(), b"secret-key-material");
    }

    #[test]
    fn loads_optional_keys() {
        let conf = Config::from_str(&format!(
            "{EXAMPLE}KeyName: ddns-key.\nAlgorithm: hmac-sha512\nTransport: tcp\nDnsTimeout: 2\nBaseUrl: /api/\n"
        ))
        .unwrap();
        assert_eq!(conf.key_name().unwrap(), Name::from_str("ddns-key.").unwrap());
        assert_eq!(conf.algorithm, Algorithm::HmacSha512);
        assert_eq!(conf.transport, Transport::Tcp);
        assert_eq!(conf.dns_timeout, Duration::from_secs(2));
        assert_eq!(conf.route_path(), "/api/dns/");
        assert_eq!(conf.healthcheck_path(), "/api/healthcheck");
    }

    #[test]
    fn route_path_without_base_url() {
        assert_eq!(example().route_path(), "/dns/");
    }

    #[test]
    fn listen_addr_accepts_bare_port() {
        let conf = example();
        assert_eq!(
            conf.listen_addr().unwrap(),
            SocketAddr::from_str("0.0.0.0:8080").unwrap()
        );
    }

    #[test]
    fn listen_addr_accepts_full_address() {
        let mut conf = example();
        conf.listen = "[::1]:8053".to_string();
        assert_eq!(
            conf.listen_addr().unwrap(),
            SocketAddr::from_str("[::1]:8053").unwrap()
        );
        conf.listen = "localhost".to_string();
        assert!(matches!(conf.listen_addr(), Err(Error::InvalidListenAddr(_))));
    }

    #[test]
    fn rejects_relative_zone() {
        let err = Config::from_str(&EXAMPLE.replace("home.example.com.", "home.example.com"))
            .unwrap_err();
        assert!(matches!(err, Error::ZoneNotFQDN(_)));
    }

    #[test]
    fn rejects_empty_token() {
        let err = Config::from_str(&EXAMPLE.replace("Token: test", "Token: \"\"")).unwrap_err();
        assert!(matches!(err, Error::EmptyToken));
    }

    #[test]
    fn rejects_invalid_secret() {
        let err = Config::from_str(&EXAMPLE.replace("c2VjcmV0LWtleS1tYXRlcmlhbA==", "not base64!"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSecret(_)));
    }

    #[test]
    fn rejects_missing_fields() {
        let err = Config::from_str("Listen: \":8080\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidYAML(_)));
    }

    #[test]
    fn accepts_json() {
        let conf = Config::from_str(
            r#"{"Listen": "127.0.0.1:8080", "Nameserver": "127.0.0.1:53", "TTL": 60,
                "Zone": "dyn.example.org.", "Token": "t", "Secret": "AAAA"}"#,
        )
        .unwrap();
        assert_eq!(conf.zone, "dyn.example.org.");
        assert_eq!(conf.ttl, 60);
    }
}
