//! TSIG signed DNS UPDATE client.
use crate::config::{Config, Transport};
use crate::error::Error;
use crate::exchange::Exchange;
use crate::update::UpdateTransaction;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream, UdpSocket};
use trust_dns_client::op::{Message, ResponseCode};
use trust_dns_client::rr::dnssec::tsig::TSigner;
use trust_dns_client::rr::Name;
use trust_dns_proto::rr::dnssec::rdata::tsig::TsigAlgorithm;
use trust_dns_proto::serialize::binary::BinEncodable;

/// Allowed clock skew between us and the nameserver, in seconds.
const TSIG_FUDGE_SECS: u16 = 300;

const MAX_UDP_REPLY_LEN: usize = 4096;

/// Sends each transaction to the configured nameserver, signed with the configured TSIG key.
///
/// A new socket is opened per transaction. `DnsTimeout` bounds the whole exchange,
/// including name resolution of the nameserver.
///
/// Replies must carry a valid TSIG, with one exception: a rejection (any response code
/// other than `NOERROR`) is reported as such even when unsigned, since nameservers answer
/// `BADKEY` and `BADSIG` failures without a signature.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TsigExchange {
    nameserver: String,
    transport: Transport,
    timeout: Duration,
    key: Vec<u8>,
    key_name: Name,
    algorithm: TsigAlgorithm,
}

impl TsigExchange {
    /// Create an exchange from the nameserver and TSIG settings of a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecret`] or [`Error::DNSError`] if the key material is invalid.
    pub fn try_from_config(config: &Config) -> Result<Self, Error> {
        let exchange = TsigExchange {
            nameserver: config.nameserver.clone(),
            transport: config.transport,
            timeout: config.dns_timeout,
            key: config.tsig_key()?,
            key_name: config.key_name()?,
            algorithm: config.algorithm.into(),
        };
        exchange.signer()?;
        Ok(exchange)
    }

    fn signer(&self) -> Result<TSigner, Error> {
        Ok(TSigner::new(
            self.key.clone(),
            self.algorithm.clone(),
            self.key_name.clone(),
            TSIG_FUDGE_SECS,
        )?)
    }

    async fn resolve(&self) -> Result<SocketAddr, Error> {
        lookup_host(&self.nameserver)
            .await?
            .next()
            .ok_or_else(|| Error::NameserverUnresolved(self.nameserver.clone()))
    }

    async fn send(&self, mut message: Message) -> Result<ResponseCode, Error> {
        let server = self.resolve().await?;
        let id: u16 = rand::random();
        message.set_id(id);
        let mut verifier = message.finalize(&self.signer()?, unix_now())?;
        let request = message.to_vec()?;

        tracing::debug!("sending update {id} to {server} over {:?}", self.transport);
        let reply = match self.transport {
            Transport::Udp => exchange_udp(server, &request, id).await?,
            Transport::Tcp => exchange_tcp(server, &request).await?,
        };

        let code = Message::from_vec(&reply)?.response_code();
        let verified = match verifier.as_mut() {
            Some(verify) => verify(&reply).map(|_| ()),
            None => Ok(()),
        };
        match verified {
            Ok(()) => Ok(code),
            Err(err) if code != ResponseCode::NoError => {
                tracing::debug!("unauthenticated {code} reply from {server}: {err}");
                Ok(code)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn unix_now() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    u32::try_from(secs).unwrap_or(u32::MAX)
}

async fn exchange_udp(server: SocketAddr, request: &[u8], id: u16) -> Result<Vec<u8>, Error> {
    let local: SocketAddr = match server {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(local).await?;
    socket.connect(server).await?;
    socket.send(request).await?;

    let mut buf = vec![0; MAX_UDP_REPLY_LEN];
    loop {
        let len = socket.recv(&mut buf).await?;
        // Datagrams for other message IDs are dropped.
        if len >= 2 && u16::from_be_bytes([buf[0], buf[1]]) == id {
            buf.truncate(len);
            return Ok(buf);
        }
    }
}

async fn exchange_tcp(server: SocketAddr, request: &[u8]) -> Result<Vec<u8>, Error> {
    let len = u16::try_from(request.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "update message too large"))?;
    let mut stream = TcpStream::connect(server).await?;
    stream.write_all(&len.to_be_bytes()).await?;
    stream.write_all(request).await?;
    stream.flush().await?;

    let reply_len = stream.read_u16().await?;
    let mut reply = vec![0; usize::from(reply_len)];
    stream.read_exact(&mut reply).await?;
    Ok(reply)
}

#[async_trait::async_trait]
impl Exchange for TsigExchange {
    async fn exchange(&self, transaction: &UpdateTransaction) -> Result<ResponseCode, Error> {
        let message = transaction.to_message()?;
        match tokio::time::timeout(self.timeout, self.send(message)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(self.timeout)),
        }
    }
}
