use crate::config::Config;
use crate::update::outcome::{Outcome, Reason};
use std::net::IpAddr;
use url::form_urlencoded;

const HOSTNAME_MIN_LEN: usize = 2;
const HOSTNAME_MAX_LEN: usize = 100;

/// The query parameters of one update call. Absent parameters are treated like empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub ip: Option<String>,
    pub hostname: Option<String>,
    pub token: Option<String>,
}

/// An authorized request with its hostname qualified against the configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpdate {
    pub fqdn: String,
    /// `None` when `raw_ip` didn't parse. Encoding the update fails later for such an address.
    pub address: Option<IpAddr>,
    pub raw_ip: String,
}

impl UpdateRequest {
    /// Read the parameters from a raw query string.
    ///
    /// Both `&` and `;` separate parameters, so the legacy router form
    /// `ip=<ip>;hostname=<name>&token=<token>` works. When a key repeats the first value
    /// is used; parsing never fails.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut request = UpdateRequest::default();
        for segment in query.split(';') {
            for (key, value) in form_urlencoded::parse(segment.as_bytes()) {
                let slot = match key.as_ref() {
                    "ip" => &mut request.ip,
                    "hostname" => &mut request.hostname,
                    "token" => &mut request.token,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(value.into_owned());
                }
            }
        }
        request
    }

    /// Authorize and validate the request.
    ///
    /// Checks run in a fixed order: token, presence of `hostname` and `ip`, hostname syntax.
    /// The IP literal is parsed but a parse failure is not a rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Outcome::AuthDenied`] or [`Outcome::BadRequest`] describing the first failed
    /// check.
    pub fn validate(&self, config: &Config) -> Result<ValidUpdate, Outcome> {
        let token = self.token.as_deref().unwrap_or_default();
        if !token_matches(token, &config.token) {
            return Err(Outcome::AuthDenied);
        }

        let hostname = self.hostname.as_deref().unwrap_or_default();
        let raw_ip = self.ip.as_deref().unwrap_or_default();
        if hostname.is_empty() || raw_ip.is_empty() {
            return Err(Outcome::BadRequest(Reason::MandatoryFieldsNotSet));
        }

        if !valid_hostname(hostname) {
            return Err(Outcome::BadRequest(Reason::InvalidHostname));
        }

        Ok(ValidUpdate {
            fqdn: qualify(hostname, &config.zone),
            address: raw_ip.parse().ok(),
            raw_ip: raw_ip.to_string(),
        })
    }
}

/// Lowercase letters, digits, `.` and `-`, between 2 and 100 characters. Uppercase is
/// rejected rather than folded.
#[must_use]
pub fn valid_hostname(hostname: &str) -> bool {
    (HOSTNAME_MIN_LEN..=HOSTNAME_MAX_LEN).contains(&hostname.len())
        && hostname
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-'))
}

/// Append `.zone` unless the hostname already ends with the zone.
///
/// This is a plain string suffix test, so a name like `nothome.example.com.` counts as
/// inside the zone `home.example.com.`.
#[must_use]
pub fn qualify(hostname: &str, zone: &str) -> String {
    if hostname.ends_with(zone) {
        hostname.to_string()
    } else {
        format!("{hostname}.{zone}")
    }
}

// Runs over the whole token regardless of where the first difference is.
fn token_matches(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
