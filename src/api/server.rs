use crate::api::routes;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::exchange::DynExchange;
use std::future::Future;
use std::net::TcpListener;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub exchange: DynExchange,
}

/// Bind the configured `Listen` address and return the server future.
///
/// # Errors
///
/// Returns [`Error::InvalidListenAddr`] or [`Error::IO`] if the address can't be bound.
pub fn new(
    config: SharedConfig,
    exchange: DynExchange,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let listener = TcpListener::bind(config.listen_addr()?)?;
    serve(listener, config, exchange)
}

/// Serve the API on an already bound listener.
///
/// # Errors
///
/// Returns [`Error::HTTP`] if the listener can't be used by the HTTP server.
pub fn serve(
    listener: TcpListener,
    config: SharedConfig,
    exchange: DynExchange,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    Ok(axum::Server::from_tcp(listener)?
        .serve(routes::new(AppState { config, exchange }).into_make_service()))
}
