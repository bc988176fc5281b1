//! Delivery of update transactions to the authoritative nameserver.
//!
//! [`Exchange`] is the single seam between the update pipeline and the network. The
//! production implementation is [`tsig::TsigExchange`], which signs each update with TSIG
//! and sends it over UDP or TCP.

use crate::error::Error;
use crate::update::UpdateTransaction;
use std::sync::Arc;
use trust_dns_client::op::ResponseCode;

pub mod tsig;

#[allow(clippy::module_name_repetitions)]
pub use tsig::TsigExchange;

/// `DynExchange` is a type alias for an [`Exchange`] shared by all concurrent requests.
#[allow(clippy::module_name_repetitions)]
pub type DynExchange = Arc<dyn Exchange + Send + Sync>;

/// An async trait describing one round trip of a DNS UPDATE.
#[async_trait::async_trait]
pub trait Exchange {
    /// Send the transaction and return the response code of the nameserver's reply.
    ///
    /// `Err` means no usable reply was received: the transaction could not be encoded or
    /// signed, the nameserver could not be reached, or it did not answer in time.
    async fn exchange(&self, transaction: &UpdateTransaction) -> Result<ResponseCode, Error>;
}
