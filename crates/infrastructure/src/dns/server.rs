use super::response::{ResponseBuilder, EDNS_PAYLOAD};
use clusterset_dns_application::ports::Handler;
use clusterset_dns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const MAX_UDP_PAYLOAD: usize = EDNS_PAYLOAD as usize;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// UDP and TCP front end for a handler chain.
pub struct DnsServer {
    chain: Arc<dyn Handler>,
    udp: Arc<UdpSocket>,
    tcp: TcpListener,
}

impl DnsServer {
    /// Binds both transports. With port 0 the TCP listener takes the port
    /// the UDP socket received.
    pub async fn bind(chain: Arc<dyn Handler>, addr: SocketAddr) -> Result<Self, DomainError> {
        let udp = create_udp_socket(addr)?;
        let tcp = TcpListener::bind(udp.local_addr()?).await?;
        info!(bind_address = %udp.local_addr()?, "DNS server listening");
        Ok(Self {
            chain,
            udp: Arc::new(udp),
            tcp,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.udp.local_addr()?)
    }

    pub async fn serve(self, shutdown: CancellationToken) {
        let udp = tokio::spawn(run_udp(self.udp, self.chain.clone(), shutdown.clone()));
        let tcp = tokio::spawn(run_tcp(self.tcp, self.chain, shutdown.clone()));
        shutdown.cancelled().await;
        let _ = tokio::join!(udp, tcp);
        info!("DNS server stopped");
    }
}

/// Transport a query arrived on; decides how large the reply may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Udp,
    Tcp,
}

impl Transport {
    /// UDP replies stay within 512 bytes, or the payload size the client
    /// advertised over EDNS capped at our own.
    fn reply_limit(self, request: &Message) -> usize {
        match self {
            Transport::Udp => request.max_payload().min(EDNS_PAYLOAD) as usize,
            Transport::Tcp => u16::MAX as usize,
        }
    }
}

/// Decodes, dispatches and encodes one query. Returns `None` when nothing
/// should be sent back.
pub async fn handle_wire_query(
    chain: &dyn Handler,
    query: &[u8],
    transport: Transport,
) -> Option<Vec<u8>> {
    let request = match Message::from_vec(query) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Undecodable DNS message");
            return format_error(query);
        }
    };
    if request.message_type() != MessageType::Query {
        return None;
    }

    let response = match chain.serve_dns(&request).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Query handling failed");
            ResponseBuilder::error(&request, ResponseCode::ServFail)
        }
    };

    let bytes = match ResponseBuilder::encode(&response) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to encode response");
            return ResponseBuilder::encode(&ResponseBuilder::error(
                &request,
                ResponseCode::ServFail,
            ))
            .ok();
        }
    };

    let limit = transport.reply_limit(&request);
    if bytes.len() <= limit {
        return Some(bytes);
    }
    debug!(
        size = bytes.len(),
        limit,
        transport = ?transport,
        "Reply exceeds transport limit, truncating"
    );
    ResponseBuilder::encode(&response.truncate()).ok()
}

fn format_error(query: &[u8]) -> Option<Vec<u8>> {
    if query.len() < 2 {
        return None;
    }
    let id = u16::from_be_bytes([query[0], query[1]]);
    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_response_code(ResponseCode::FormErr);
    ResponseBuilder::encode(&response).ok()
}

fn create_udp_socket(addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(UdpSocket::from_std(socket.into())?)
}

async fn run_udp(socket: Arc<UdpSocket>, chain: Arc<dyn Handler>, shutdown: CancellationToken) {
    let mut buf = [0u8; MAX_UDP_PAYLOAD];
    loop {
        let (len, from) = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let query: Arc<[u8]> = Arc::from(&buf[..len]);
        let socket = socket.clone();
        let chain = chain.clone();
        tokio::spawn(async move {
            let Some(response) = handle_wire_query(chain.as_ref(), &query, Transport::Udp).await
            else {
                return;
            };
            if let Err(e) = socket.send_to(&response, from).await {
                warn!(client = %from, error = %e, "UDP send error");
            }
        });
    }
}

async fn run_tcp(listener: TcpListener, chain: Arc<dyn Handler>, shutdown: CancellationToken) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            },
        };

        let chain = chain.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                result = serve_tcp_connection(stream, chain) => {
                    if let Err(e) = result {
                        debug!(client = %peer, error = %e, "TCP connection closed");
                    }
                }
            }
        });
    }
}

async fn serve_tcp_connection(
    mut stream: TcpStream,
    chain: Arc<dyn Handler>,
) -> Result<(), DomainError> {
    loop {
        let mut len_buf = [0u8; 2];
        match tokio::time::timeout(TCP_IDLE_TIMEOUT, stream.read_exact(&mut len_buf)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Ok(()),
        }
        let len = u16::from_be_bytes(len_buf) as usize;
        let mut query = vec![0u8; len];
        stream.read_exact(&mut query).await?;

        let Some(response) = handle_wire_query(chain.as_ref(), &query, Transport::Tcp).await
        else {
            continue;
        };
        let Ok(response_len) = u16::try_from(response.len()) else {
            warn!(size = response.len(), "TCP response too large");
            continue;
        };
        stream.write_all(&response_len.to_be_bytes()).await?;
        stream.write_all(&response).await?;
    }
}
