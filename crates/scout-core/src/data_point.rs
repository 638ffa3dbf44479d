//! Recorded data points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A data point field that does not fit in the single byte the wire format gives it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} must be between 0 and 255, got {value}")]
pub struct FieldOutOfRange {
    /// Which field was rejected (`type`, `value` or `time`).
    pub field: &'static str,
    /// The rejected value.
    pub value: i64,
}

/// A single recorded fact: an event of some kind, a parameter, and the tick it happened at.
///
/// Type and value codes are opaque to the ledger. Two points with the same
/// triple are equal and both may be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDataPoint")]
pub struct DataPoint {
    /// The kind of event.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Auxiliary magnitude; its meaning depends on `kind`.
    pub value: u8,
    /// Tick at which the point was recorded.
    pub time: u8,
}

impl DataPoint {
    #[must_use]
    pub const fn new(kind: u8, value: u8, time: u8) -> Self {
        Self { kind, value, time }
    }

    /// Builds a data point from wider integers, rejecting anything outside a byte.
    pub fn try_new(kind: i64, value: i64, time: i64) -> Result<Self, FieldOutOfRange> {
        Ok(Self {
            kind: byte("type", kind)?,
            value: byte("value", value)?,
            time: byte("time", time)?,
        })
    }

    /// The `type, value, time` bytes in wire order.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.kind, self.value, self.time]
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl TryFrom<(i64, i64, i64)> for DataPoint {
    type Error = FieldOutOfRange;

    fn try_from((kind, value, time): (i64, i64, i64)) -> Result<Self, Self::Error> {
        Self::try_new(kind, value, time)
    }
}

fn byte(field: &'static str, value: i64) -> Result<u8, FieldOutOfRange> {
    u8::try_from(value).map_err(|_| FieldOutOfRange { field, value })
}

/// Unchecked shape used to route deserialization through [`DataPoint::try_new`].
#[derive(Deserialize)]
struct RawDataPoint {
    #[serde(rename = "type")]
    kind: i64,
    value: i64,
    time: i64,
}

impl TryFrom<RawDataPoint> for DataPoint {
    type Error = FieldOutOfRange;

    fn try_from(raw: RawDataPoint) -> Result<Self, Self::Error> {
        Self::try_new(raw.kind, raw.value, raw.time)
    }
}
