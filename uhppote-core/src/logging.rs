//! Log sinks handed to components at construction
//!
//! Nothing in this workspace logs through the process-wide dispatcher on its
//! own. Each transport and controller owns a [`LogSink`] and runs its work
//! inside [`LogSink::in_scope`], so its `tracing` events reach that sink only.
//! The default sink discards everything.

use std::io::Write;
use std::sync::Mutex;

use tracing::{Dispatch, Level, Subscriber};

/// Destination for a component's log events
#[derive(Debug, Clone)]
pub struct LogSink {
    dispatch: Dispatch,
}

impl LogSink {
    /// Route events to an existing subscriber
    ///
    /// ```
    /// use uhppote_core::LogSink;
    ///
    /// let sink = LogSink::new(tracing_subscriber::fmt().finish());
    /// sink.in_scope(|| tracing::info!("hello"));
    /// ```
    pub fn new<S>(subscriber: S) -> Self
    where
        S: Subscriber + Send + Sync + 'static,
    {
        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Format events as plain text lines into any byte sink
    pub fn writer<W>(writer: W, level: Level) -> Self
    where
        W: Write + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(writer))
            .with_max_level(level)
            .with_ansi(false)
            .finish();

        Self::new(subscriber)
    }

    /// Drop every event
    pub fn discard() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Run `f` with this sink as the active dispatcher
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::discard()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_receives_events() {
        let captured = Captured::default();
        let sink = LogSink::writer(captured.clone(), Level::DEBUG);

        sink.in_scope(|| tracing::debug!(port = 60000, "opening socket"));

        let text = captured.text();
        assert!(text.contains("opening socket"));
        assert!(text.contains("port=60000"));
    }

    #[test]
    fn test_writer_sink_respects_level() {
        let captured = Captured::default();
        let sink = LogSink::writer(captured.clone(), Level::INFO);

        sink.in_scope(|| tracing::trace!("too quiet"));

        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_events_outside_scope_are_not_captured() {
        let captured = Captured::default();
        let _sink = LogSink::writer(captured.clone(), Level::TRACE);

        tracing::warn!("nobody listening");

        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_codec_stays_off_the_ambient_dispatcher() {
        let captured = Captured::default();
        let ambient = tracing_subscriber::fmt()
            .with_writer(Mutex::new(captured.clone()))
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(ambient, || {
            let serial: crate::SerialNumber = "112233445".parse().unwrap();
            crate::SerialNumber::parse(crate::SerialInput::Bytes(&[0x06, 0xb0, 0x8b, 0xe5]))
                .unwrap();
            crate::SerialNumber::parse(crate::SerialInput::Integer(-1)).unwrap_err();

            let frame = crate::Frame::request(crate::Function::DeviceStatus, &serial).unwrap();
            frame.validate_response(0x20, Some(&serial)).unwrap();
        });

        assert!(captured.text().is_empty(), "{}", captured.text());
    }

    #[test]
    fn test_discard_returns_value() {
        let sink = LogSink::default();
        let value = sink.in_scope(|| {
            tracing::info!("dropped");
            42
        });
        assert_eq!(value, 42);
    }
}
