//! TCP transport

use std::io::{self, Read, Write};
use std::mem;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use bytes::BytesMut;
use tracing::{debug, trace, warn};
use uhppote_core::constants::MAX_CHUNK_SIZE;
use uhppote_core::LogSink;

use crate::{endpoint::Endpoint, error::*, Transport};

/// Observable connection state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Opens byte streams to an endpoint
///
/// [`TcpConnector`] is the real thing; tests plug in scripted streams.
pub trait Connector: Send {
    type Stream: Read + Write + Send;

    fn connect(&mut self, endpoint: &Endpoint) -> io::Result<Self::Stream>;
}

/// Blocking TCP connector
///
/// Timeouts default to none, leaving the socket's own behaviour in place.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&mut self, endpoint: &Endpoint) -> io::Result<TcpStream> {
        let target = (endpoint.host().as_str(), endpoint.port().get());

        let stream = match self.connect_timeout {
            None => TcpStream::connect(target)?,
            Some(timeout) => {
                let addr = target.to_socket_addrs()?.next().ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("No addresses found for {}", endpoint),
                    )
                })?;
                TcpStream::connect_timeout(&addr, timeout)?
            }
        };

        // Frames are small and strictly request/response
        stream.set_nodelay(true)?;
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;

        Ok(stream)
    }
}

enum Link<S> {
    Disconnected,
    Connecting,
    Connected(S),
}

/// TCP transport for UHPPOTE controllers
///
/// # Examples
///
/// ```no_run
/// use uhppote_transport::{Endpoint, TcpTransport, Transport};
///
/// let endpoint = Endpoint::parse("192.168.1.100", 60000)?;
/// let mut transport = TcpTransport::new(endpoint);
///
/// transport.connect(3)?;
/// transport.send(&[0x17, 0x20, 0, 0])?;
/// let reply = transport.receive(64)?;
/// transport.close();
/// # Ok::<(), uhppote_transport::Error>(())
/// ```
pub struct TcpTransport<C: Connector = TcpConnector> {
    endpoint: Endpoint,
    connector: C,
    link: Link<C::Stream>,
    sink: LogSink,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_connector(endpoint, TcpConnector::default())
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connector.connect_timeout = Some(timeout);
        self
    }

    /// Set read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.connector.read_timeout = Some(timeout);
        self
    }

    /// Set write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.connector.write_timeout = Some(timeout);
        self
    }
}

impl<C: Connector> TcpTransport<C> {
    /// Create a transport that opens streams through `connector`
    pub fn with_connector(endpoint: Endpoint, connector: C) -> Self {
        Self {
            endpoint,
            connector,
            link: Link::Disconnected,
            sink: LogSink::discard(),
        }
    }

    /// Send this transport's log events to `sink`
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> ConnectionState {
        match self.link {
            Link::Disconnected => ConnectionState::Disconnected,
            Link::Connecting => ConnectionState::Connecting,
            Link::Connected(_) => ConnectionState::Connected,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn stream(&mut self) -> Result<&mut C::Stream> {
        match &mut self.link {
            Link::Connected(stream) => Ok(stream),
            _ => Err(Error::NotConnected),
        }
    }

    fn connect_inner(&mut self, max_attempts: u32) -> Result<()> {
        if max_attempts == 0 {
            return Err(Error::InvalidAttempts(max_attempts));
        }

        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        debug!("Connecting to {}...", self.endpoint);
        self.link = Link::Connecting;

        let mut last_error = None;

        for attempt in 1..=max_attempts {
            debug!(attempt, "Connection attempt");

            match self.connector.connect(&self.endpoint) {
                Ok(stream) => {
                    self.link = Link::Connected(stream);
                    debug!("Connected to {}", self.endpoint);
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        "Connection attempt #{} to {} unsuccessful: {}",
                        attempt, self.endpoint, e
                    );
                    last_error = Some(e);
                }
            }
        }

        self.link = Link::Disconnected;

        Err(Error::ConnectFailed {
            endpoint: self.endpoint.to_string(),
            attempts: max_attempts,
            source: last_error.unwrap_or_else(|| io::Error::other("no connection attempt made")),
        })
    }

    fn send_inner(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let stream = self.stream()?;

        debug!("Sending message of {} bytes", data.len());
        trace!("{}", hex::encode(data));

        let mut sent = 0;
        while sent < data.len() {
            match stream.write(&data[sent..]) {
                Ok(0) => {
                    return Err(Error::ConnectionBroken {
                        sent,
                        expected: data.len(),
                    });
                }
                Ok(n) => {
                    trace!("{} bytes sent in chunk", n);
                    sent += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        stream.flush()?;

        debug!("Send complete ({} bytes)", sent);
        Ok(())
    }

    fn receive_inner(&mut self, size: usize) -> Result<BytesMut> {
        let size = validate_receive_size(size)?;
        let stream = self.stream()?;

        debug!("Listening for message of {} bytes", size);

        let mut buf = BytesMut::with_capacity(size);
        let mut chunk = [0u8; MAX_CHUNK_SIZE];

        while buf.len() < size {
            let want = (size - buf.len()).min(MAX_CHUNK_SIZE);

            match stream.read(&mut chunk[..want]) {
                Ok(0) => {
                    return Err(Error::UnexpectedEof {
                        received: buf.len(),
                        expected: size,
                    });
                }
                Ok(n) => {
                    trace!("{} bytes received in chunk", n);
                    buf.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        trace!("{}", hex::encode(&buf));
        Ok(buf)
    }
}

impl<C: Connector> Transport for TcpTransport<C> {
    fn connect(&mut self, max_attempts: u32) -> Result<()> {
        let sink = self.sink.clone();
        sink.in_scope(|| self.connect_inner(max_attempts))
    }

    fn close(&mut self) {
        let sink = self.sink.clone();
        sink.in_scope(|| {
            if let Link::Connected(stream) = mem::replace(&mut self.link, Link::Disconnected) {
                debug!("Closing connection to {}", self.endpoint);
                drop(stream);
            }
        });
    }

    fn is_connected(&self) -> bool {
        matches!(self.link, Link::Connected(_))
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        let sink = self.sink.clone();
        sink.in_scope(|| self.send_inner(data))
    }

    fn receive(&mut self, size: usize) -> Result<BytesMut> {
        let sink = self.sink.clone();
        sink.in_scope(|| self.receive_inner(size))
    }

    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn set_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = endpoint;
    }
}

impl<C: Connector> Drop for TcpTransport<C> {
    fn drop(&mut self) {
        if self.is_connected() {
            self.sink.in_scope(|| warn!("TCP transport dropped while still connected"));
        }
    }
}

/// Check a receive size: positive and a multiple of 8
pub fn validate_receive_size(size: usize) -> Result<usize> {
    if size == 0 || size % 8 != 0 {
        return Err(Error::InvalidReceiveSize(size.to_string()));
    }
    Ok(size)
}

/// Coerce a numeric string to a receive size
pub fn parse_receive_size(input: &str) -> Result<usize> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidReceiveSize(input.to_string()));
    }

    let size = input
        .parse::<usize>()
        .map_err(|_| Error::InvalidReceiveSize(input.to_string()))?;
    validate_receive_size(size)
}
