//! TCP transport: one long-lived client connection to the consumer.

use std::io::Write;
use std::net::{Shutdown, TcpStream};

use anyhow::Context;
use tracing::{debug, info};

use super::{Framing, RecordSink};
use crate::error::{Result, TrackError};

/// Sink writing records to a connected TCP stream.
///
/// Opened once with [`TcpSink::connect`] and closed once with
/// [`RecordSink::close`] or on drop.
pub struct TcpSink {
    stream: Option<TcpStream>,
    peer: String,
    framing: Framing,
    /// Reused frame buffer.
    buffer: Vec<u8>,
    records_sent: u64,
}

impl TcpSink {
    /// Connect to the consumer at `address` (e.g. "localhost:9999").
    pub fn connect(address: &str, framing: Framing) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address)
            .with_context(|| format!("Failed to connect to record consumer at {}", address))?;
        stream.set_nodelay(true)?;

        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| address.to_string());
        info!("Connected to record consumer at {} ({:?} framing)", peer, framing);

        Ok(Self {
            stream: Some(stream),
            peer,
            framing,
            buffer: Vec::with_capacity(128),
            records_sent: 0,
        })
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn records_sent(&self) -> u64 {
        self.records_sent
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

impl RecordSink for TcpSink {
    fn send(&mut self, record: &[u8]) -> Result<usize> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| TrackError::Transport(format!("connection to {} is closed", self.peer)))?;

        self.buffer.clear();
        self.framing.encode_into(record, &mut self.buffer);
        stream.write_all(&self.buffer)?;

        self.records_sent += 1;
        Ok(record.len())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            shutdown_stream(stream)?;
            info!(
                "Closed connection to {} after {} records",
                self.peer, self.records_sent
            );
        }
        Ok(())
    }
}

impl Drop for TcpSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            debug!("Error closing connection to {}: {}", self.peer, e);
        }
    }
}

fn shutdown_stream(mut stream: TcpStream) -> std::io::Result<()> {
    stream.flush()?;
    match stream.shutdown(Shutdown::Both) {
        // Peer already gone
        Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_sends_framed_records() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let consumer = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = String::new();
            conn.read_to_string(&mut received).unwrap();
            received
        });

        let mut sink = TcpSink::connect(&address, Framing::Newline).unwrap();
        assert_eq!(sink.send(b"3,1.000,0.000,0.000,0.000,0.000,0.000").unwrap(), 37);
        sink.send(b"4,0.000,0.000,0.000,0.000,0.000,0.000").unwrap();
        assert_eq!(sink.records_sent(), 2);
        sink.close().unwrap();

        let received = consumer.join().unwrap();
        assert_eq!(
            received,
            "3,1.000,0.000,0.000,0.000,0.000,0.000\n4,0.000,0.000,0.000,0.000,0.000,0.000\n"
        );
    }

    #[test]
    fn test_send_after_close_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let mut sink = TcpSink::connect(&address, Framing::Raw).unwrap();
        let _conn = listener.accept().unwrap();
        sink.close().unwrap();
        assert!(!sink.is_open());

        let err = sink.send(b"1,0,0,0,0,0,0").unwrap_err();
        assert!(matches!(err, TrackError::Transport(_)));
        // Closing twice is a no-op
        sink.close().unwrap();
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port with nothing listening
        let address = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };
        assert!(TcpSink::connect(&address, Framing::Raw).is_err());
    }
}
