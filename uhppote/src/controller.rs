//! High-level controller interface

use tracing::{debug, trace, warn};

use uhppote_core::constants::DEFAULT_CONNECT_ATTEMPTS;
use uhppote_core::{Frame, Function, LogSink, SerialNumber, DEFAULT_PORT, FRAME_SIZE};
use uhppote_transport::{Endpoint, Host, Port, TcpTransport, Transport};
use uhppote_types::ControllerStatus;

use crate::error::Result;

/// UHPPOTE access control board
///
/// Each request opens a fresh connection, sends one frame, reads the 64-byte
/// reply and closes the connection again, whether or not the exchange
/// succeeded.
///
/// # Examples
///
/// ```no_run
/// use uhppote::{Controller, SerialNumber};
///
/// fn main() -> uhppote::Result<()> {
///     let serial = SerialNumber::new(423187757)?;
///     let mut controller = Controller::new("192.168.1.100", serial)?
///         .with_connect_attempts(5)?;
///
///     let status = controller.status()?;
///     println!("last event: {}", status.last_index());
///     Ok(())
/// }
/// ```
pub struct Controller<T: Transport = TcpTransport> {
    transport: T,
    serial: SerialNumber,
    connect_attempts: u32,
    sink: LogSink,
}

impl Controller {
    /// Create a controller reached over TCP at `host` on the default port
    pub fn new(host: &str, serial: SerialNumber) -> Result<Self> {
        let endpoint = Endpoint::parse(host, DEFAULT_PORT)?;
        Ok(Self::with_transport(TcpTransport::new(endpoint), serial))
    }
}

impl<T: Transport> Controller<T> {
    /// Create a controller over an existing transport
    pub fn with_transport(transport: T, serial: SerialNumber) -> Self {
        Self {
            transport,
            serial,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            sink: LogSink::discard(),
        }
    }

    /// Set how many times each request tries to connect (default: 3)
    pub fn with_connect_attempts(mut self, attempts: u32) -> Result<Self> {
        if attempts == 0 {
            return Err(uhppote_transport::Error::InvalidAttempts(attempts).into());
        }
        self.connect_attempts = attempts;
        Ok(self)
    }

    /// Send this controller's log events to `sink`
    ///
    /// Only affects events emitted by the controller itself; give the
    /// transport its own sink when building it.
    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn serial_number(&self) -> &SerialNumber {
        &self.serial
    }

    pub fn host(&self) -> &Host {
        self.transport.endpoint().host()
    }

    pub fn port(&self) -> Port {
        self.transport.endpoint().port()
    }

    pub fn set_host(&mut self, host: Host) {
        let mut endpoint = self.transport.endpoint().clone();
        endpoint.set_host(host);
        self.transport.set_endpoint(endpoint);
    }

    pub fn set_port(&mut self, port: Port) {
        let mut endpoint = self.transport.endpoint().clone();
        endpoint.set_port(port);
        self.transport.set_endpoint(endpoint);
    }

    pub fn connect_attempts(&self) -> u32 {
        self.connect_attempts
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request/response cycle
    ///
    /// Builds a frame for `function` carrying `payload` (preceded by the
    /// serial number when `include_serial` is set), exchanges it with the
    /// board and returns the reply once it matches the request.
    ///
    /// # Errors
    ///
    /// - Validation: bad function code or oversized payload
    /// - Connection: every connect attempt failed
    /// - Transmission: the connection broke mid-exchange
    /// - Protocol: the reply does not match the request
    pub fn execute(&mut self, function: u8, payload: &[u8], include_serial: bool) -> Result<Frame> {
        let sink = self.sink.clone();
        sink.in_scope(|| self.execute_inner(function, payload, include_serial))
    }

    /// Read the board's current status
    pub fn status(&mut self) -> Result<ControllerStatus> {
        let function = Function::DeviceStatus;
        let response = self.execute(function.into(), &[], function.sends_serial())?;
        Ok(ControllerStatus::new(response)?)
    }

    fn execute_inner(&mut self, function: u8, payload: &[u8], include_serial: bool) -> Result<Frame> {
        let request = Frame::build(function, &self.serial, payload, include_serial)?;

        debug!(
            "{} -> {} (serial {})",
            function_name(function),
            self.transport.endpoint(),
            self.serial
        );
        trace!("request: {}", request.to_hex());

        let response = self.exchange(&request).inspect_err(|e| {
            warn!("{} failed: {}", function_name(function), e);
        })?;

        trace!("response: {}", response.to_hex());

        let expected_serial = include_serial.then_some(&self.serial);
        if let Err(e) = response.validate_response(function, expected_serial) {
            warn!("rejected response to {}: {}", function_name(function), e);
            return Err(e.into());
        }

        Ok(response)
    }

    fn exchange(&mut self, request: &Frame) -> Result<Frame> {
        let mut link = Link::open(&mut self.transport, self.connect_attempts)?;
        link.transport.send(request.as_bytes())?;
        let reply = link.transport.receive(FRAME_SIZE)?;
        Ok(Frame::from_bytes(reply.freeze())?)
    }
}

/// Open connection that is closed when dropped
struct Link<'a, T: Transport> {
    transport: &'a mut T,
}

impl<'a, T: Transport> Link<'a, T> {
    fn open(transport: &'a mut T, attempts: u32) -> uhppote_transport::Result<Self> {
        let mut link = Self { transport };
        link.transport.connect(attempts)?;
        Ok(link)
    }
}

impl<T: Transport> Drop for Link<'_, T> {
    fn drop(&mut self) {
        self.transport.close();
    }
}

fn function_name(code: u8) -> String {
    match Function::try_from(code) {
        Ok(function) => function.to_string(),
        Err(_) => format!("0x{:02x}", code),
    }
}
