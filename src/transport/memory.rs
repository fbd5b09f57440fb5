//! In-memory sink for tests and offline runs.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::RecordSink;
use crate::error::{Result, TrackError};

/// Sink that keeps every accepted record in memory.
///
/// Clones share state, so a test can hand one clone to the tracker and
/// inspect the other. Individual send attempts can be made to fail.
#[derive(Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySinkInner>>,
}

#[derive(Default)]
struct MemorySinkInner {
    records: Vec<Vec<u8>>,
    /// Send attempts seen so far, failed ones included.
    attempts: usize,
    /// Zero-based attempt indices that are rejected.
    fail_attempts: HashSet<usize>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that rejects the given zero-based send attempts.
    pub fn failing_on(attempts: impl IntoIterator<Item = usize>) -> Self {
        let sink = Self::new();
        sink.inner.lock().fail_attempts = attempts.into_iter().collect();
        sink
    }

    /// Accepted records, in send order.
    pub fn records(&self) -> Vec<Vec<u8>> {
        self.inner.lock().records.clone()
    }

    /// Accepted records decoded as UTF-8 (lossy).
    pub fn records_as_strings(&self) -> Vec<String> {
        self.inner
            .lock()
            .records
            .iter()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }

    pub fn attempts(&self) -> usize {
        self.inner.lock().attempts
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl RecordSink for MemorySink {
    fn send(&mut self, record: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock();
        let attempt = inner.attempts;
        inner.attempts += 1;

        if inner.closed {
            return Err(TrackError::Transport("memory sink is closed".into()));
        }
        if inner.fail_attempts.contains(&attempt) {
            return Err(TrackError::Transport(format!("send attempt {} rejected", attempt)));
        }

        inner.records.push(record.to_vec());
        Ok(record.len())
    }

    fn close(&mut self) -> Result<()> {
        self.inner.lock().closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_shared_between_clones() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer.send(b"a").unwrap();
        writer.send(b"bc").unwrap();
        assert_eq!(sink.records_as_strings(), vec!["a", "bc"]);
        assert_eq!(sink.attempts(), 2);
    }

    #[test]
    fn test_failing_attempts() {
        let mut sink = MemorySink::failing_on([1]);
        assert!(sink.send(b"first").is_ok());
        assert!(matches!(sink.send(b"second"), Err(TrackError::Transport(_))));
        assert!(sink.send(b"third").is_ok());
        assert_eq!(sink.records_as_strings(), vec!["first", "third"]);
        assert_eq!(sink.attempts(), 3);
    }

    #[test]
    fn test_closed_sink_rejects() {
        let mut sink = MemorySink::new();
        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(sink.send(b"late").is_err());
        assert!(sink.records().is_empty());
    }
}
