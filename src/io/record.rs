//! Wire format for pose-delta records.
//!
//! ```text
//! identifier,dx,dy,dz,dyaw,dpitch,droll
//! 7,0.010,-0.002,0.000,0.015,0.000,-0.003
//! ```
//!
//! Plain comma-separated ASCII, no trailing delimiter, no line terminator.
//! Framing, if any, belongs to the sink.

use std::fmt;
use std::str::FromStr;

use crate::tracking::TagId;
use crate::tracking::pose::PoseDelta;

/// Decimal places used when the formatter carries no precision.
pub const DEFAULT_PRECISION: usize = 3;

const FIELD_COUNT: usize = 7;

/// One serialized delta: identifier and six components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaRecord {
    pub id: TagId,
    /// dx, dy, dz, dyaw, dpitch, droll.
    pub values: [f64; 6],
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordParseError {
    #[error("expected 7 fields, got {0}")]
    FieldCount(usize),
    #[error("invalid identifier {0:?}")]
    Identifier(String),
    #[error("invalid value {value:?} in field {field}")]
    Value { field: usize, value: String },
}

impl DeltaRecord {
    /// Encode with `precision` decimal places.
    pub fn to_bytes(&self, precision: usize) -> Vec<u8> {
        format!("{:.*}", precision, self).into_bytes()
    }
}

impl From<&PoseDelta> for DeltaRecord {
    fn from(delta: &PoseDelta) -> Self {
        Self {
            id: delta.id,
            values: delta.components(),
        }
    }
}

/// Writes a fixed-point value, printing `-0.000` as `0.000`.
fn write_fixed(f: &mut fmt::Formatter<'_>, value: f64, precision: usize) -> fmt::Result {
    let text = format!("{:.*}", precision, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => f.write_str(rest),
        _ => f.write_str(&text),
    }
}

impl fmt::Display for DeltaRecord {
    /// `{}` uses three decimals; `{:.N}` uses N.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(f, "{}", self.id.0)?;
        for value in self.values {
            f.write_str(",")?;
            write_fixed(f, value, precision)?;
        }
        Ok(())
    }
}

impl FromStr for DeltaRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordParseError::FieldCount(fields.len()));
        }

        let id = fields[0]
            .trim()
            .parse::<i32>()
            .map_err(|_| RecordParseError::Identifier(fields[0].to_string()))?;

        let mut values = [0.0; 6];
        for (i, (slot, field)) in values.iter_mut().zip(&fields[1..]).enumerate() {
            *slot = field.trim().parse().map_err(|_| RecordParseError::Value {
                field: i + 1,
                value: field.to_string(),
            })?;
        }

        Ok(Self {
            id: TagId(id),
            values,
        })
    }
}
