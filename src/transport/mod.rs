//! Transport boundary for serialized delta records.
//!
//! The tracker hands each record to a [`RecordSink`] as one byte buffer. How
//! records are framed on the wire is decided by the sink.

use serde::Deserialize;

use crate::error::Result;

mod memory;
mod tcp;

pub use memory::MemorySink;
pub use tcp::TcpSink;

/// How a sink separates consecutive records on a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Record bytes as-is.
    #[default]
    Raw,
    /// Record followed by `\n`.
    Newline,
    /// 4-byte big-endian length, then the record.
    LengthPrefixed,
}

impl Framing {
    /// Append one framed record to `buffer`.
    pub fn encode_into(self, record: &[u8], buffer: &mut Vec<u8>) {
        match self {
            Framing::Raw => buffer.extend_from_slice(record),
            Framing::Newline => {
                buffer.extend_from_slice(record);
                buffer.push(b'\n');
            }
            Framing::LengthPrefixed => {
                buffer.extend_from_slice(&(record.len() as u32).to_be_bytes());
                buffer.extend_from_slice(record);
            }
        }
    }
}

/// Consumer of serialized records.
pub trait RecordSink: Send {
    /// Deliver one record. Returns the number of record bytes accepted.
    fn send(&mut self, record: &[u8]) -> Result<usize>;

    /// Release the underlying connection. Further sends fail.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing() {
        let mut buf = Vec::new();
        Framing::Raw.encode_into(b"1,2", &mut buf);
        assert_eq!(buf, b"1,2");

        buf.clear();
        Framing::Newline.encode_into(b"1,2", &mut buf);
        assert_eq!(buf, b"1,2\n");

        buf.clear();
        Framing::LengthPrefixed.encode_into(b"1,2", &mut buf);
        assert_eq!(buf, [0, 0, 0, 3, b'1', b',', b'2']);
    }

    #[test]
    fn test_framing_from_yaml() {
        let framing: Framing = serde_yaml::from_str("length_prefixed").unwrap();
        assert_eq!(framing, Framing::LengthPrefixed);
    }
}
