//! The request to DNS UPDATE pipeline.
//!
//! Every request runs the same steps: [validate][UpdateRequest::validate] the query
//! parameters, [build][UpdateTransaction::build] a transaction that replaces the `A` RRset
//! of the requested name, hand it to an [`Exchange`], then [translate] the result into an
//! [`Outcome`].
//!
//! E.g. with config:
//! ```yaml
//! Zone: home.example.com.
//! TTL: 3600
//! Token: test
//! ```
//!
//! The request `?hostname=dev1&ip=10.0.0.5&token=test` deletes every `A` record of
//! `dev1.home.example.com.` and inserts `dev1.home.example.com. 3600 IN A 10.0.0.5` in a
//! single UPDATE message for the zone `home.example.com.`.
//!
//! Nothing is shared between requests except the read-only config. Two concurrent updates
//! for the same name race at the nameserver and the last one applied wins.

pub mod outcome;
pub mod request;
pub mod transaction;

use crate::config::Config;
use crate::error::Error;
use crate::exchange::Exchange;
pub use outcome::{Outcome, Reason};
pub use request::{UpdateRequest, ValidUpdate};
pub use transaction::{ARecord, Operation, UpdateTransaction};
use tracing::{debug, info, warn};
use trust_dns_client::op::ResponseCode;

/// Run one update request to completion.
pub async fn handle(
    config: &Config,
    exchange: &(dyn Exchange + Send + Sync),
    request: &UpdateRequest,
) -> Outcome {
    let update = match request.validate(config) {
        Ok(update) => update,
        Err(outcome) => {
            debug!("rejected update for {:?}: {outcome}", request.hostname);
            return outcome;
        }
    };

    info!("Request for {} -> {}", update.fqdn, update.raw_ip);
    let transaction = UpdateTransaction::build(&update, config);
    let outcome = translate(exchange.exchange(&transaction).await);
    match &outcome {
        Outcome::Success => info!("updated {}", update.fqdn),
        other => warn!("update for {} failed: {other}", update.fqdn),
    }
    outcome
}

/// Map the result of an exchange to an [`Outcome`]. A transport error never looks at a
/// reply.
#[must_use]
pub fn translate(result: Result<ResponseCode, Error>) -> Outcome {
    match result {
        Err(err) => Outcome::TransportFailure(err.report()),
        Ok(ResponseCode::NoError) => Outcome::Success,
        Ok(code) => Outcome::ProtocolFailure(code),
    }
}
