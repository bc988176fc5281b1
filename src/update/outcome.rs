use std::fmt;
use trust_dns_client::op::ResponseCode;

/// Why a request was rejected before anything was sent to the nameserver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    MandatoryFieldsNotSet,
    InvalidHostname,
}

/// The terminal result of one update request. Every variant maps to exactly one HTTP
/// status and body, see [`crate::api`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    AuthDenied,
    BadRequest(Reason),
    /// The exchange with the nameserver failed, carries the error text.
    TransportFailure(String),
    /// The nameserver answered with a non-success response code.
    ProtocolFailure(ResponseCode),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::MandatoryFieldsNotSet => f.write_str("Mandatory fields not set"),
            Reason::InvalidHostname => f.write_str("Invalid Hostname"),
        }
    }
}

impl Outcome {
    /// The plain text response body.
    #[must_use]
    pub fn body(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("OK"),
            Outcome::AuthDenied => f.write_str("Not Authorized"),
            Outcome::BadRequest(reason) => write!(f, "{reason}"),
            Outcome::TransportFailure(err) => f.write_str(err),
            Outcome::ProtocolFailure(code) => write!(
                f,
                "Something went wrong\nDNS update failed. Server replied: {code}"
            ),
        }
    }
}
