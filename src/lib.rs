//! ddnsd
//!
//! A small bridge between HTTP and [RFC-2136][RFC-2136] dynamic DNS updates.
//!
//! Routers, DHCP clients and IoT devices that can only issue simple HTTP requests call the
//! [`/dns/` endpoint][crate::api] with a hostname, an IP address and a shared token. ddnsd
//! validates the request and replaces the `A` record of that hostname in the configured zone
//! with a [TSIG][RFC-8945] signed UPDATE sent to the zone's authoritative nameserver.
//!
//! Example config:
//!
//! ```yaml
//! Listen: ":8080"
//! Nameserver: a.ns.example.com:53
//! TTL: 3600
//! Zone: home.example.com.
//! Token: test
//! Secret: BASE64SECRET
//! ```
//!
//! [RFC-2136]: https://www.rfc-editor.org/rfc/rfc2136
//! [RFC-8945]: https://www.rfc-editor.org/rfc/rfc8945
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod exchange;
pub mod update;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use exchange::{DynExchange, Exchange, TsigExchange};
pub use update::{Outcome, UpdateRequest, UpdateTransaction};
