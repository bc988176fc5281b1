//! HTTP API for dynamic DNS updates.
//!
//! # API Endpoints
//!
//! Both paths are prefixed with [`Config::base_url`][`crate::config::Config::base_url`].
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!
//! ## `/dns/` (GET)
//!
//!   Expects the query parameters `hostname`, `ip` and `token`, e.g.
//!
//!   ```text
//!   /dns/?hostname=dev1&ip=10.0.0.5&token=test
//!   ```
//!
//!   `hostname` is either a name relative to [`Config::zone`][`crate::config::Config::zone`]
//!   or an FQDN ending with it. It must be 2 to 100 characters of `a-z`, `0-9`, `.` and `-`.
//!   `token` must equal [`Config::token`][`crate::config::Config::token`].
//!
//!   The `A` record of the qualified name is replaced by one pointing at `ip`, see
//!   [`crate::update`]. Responses are plain text:
//!
//!   | Condition                   | Status | Body                                        |
//!   |-----------------------------|--------|---------------------------------------------|
//!   | wrong or missing `token`    | 403    | `Not Authorized`                            |
//!   | missing `hostname` or `ip`  | 400    | `Mandatory fields not set`                  |
//!   | invalid `hostname`          | 400    | `Invalid Hostname`                          |
//!   | nameserver unreachable      | 424    | the error                                   |
//!   | nameserver refused update   | 400    | `Something went wrong` and the server reply |
//!   | record replaced             | 200    | `OK`                                        |
//!
//!   Any path below `/dns/` is handled the same way.

mod api_error;
mod routes;
pub mod server;

pub use server::{new, serve};
