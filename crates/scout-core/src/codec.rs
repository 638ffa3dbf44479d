//! Wire format for finished entries.
//!
//! An entry travels as one colon-delimited line:
//!
//! ```text
//! <match>:<subject>:<operator>:<board>:<hex start>:<undo count>:<base64 points>:<comments>
//! ```
//!
//! Points are flattened into `type, value, time` byte triples and encoded
//! with the standard padded base64 alphabet. The operator and comments are
//! reduced to `[A-Za-z0-9 ]` (anything else becomes `_`) and comments are
//! cut to their first 64 characters, so neither can contain the delimiter.

use std::num::ParseIntError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::cursor::TimeCursor;
use crate::data_point::DataPoint;
use crate::ledger::{Entry, EntryIdentity, Ledger};
use crate::station::{Board, UnknownBoard};

/// Field delimiter.
pub const DELIMITER: char = ':';

/// Number of delimited fields in an encoded entry.
pub const FIELD_COUNT: usize = 8;

/// Comments longer than this many characters are truncated.
pub const MAX_COMMENT_CHARS: usize = 64;

/// Errors from [`encode`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// An identity field that goes on the wire unsanitized contains the delimiter.
    #[error("{field} must not contain ':', got {value:?}")]
    DelimiterInId { field: &'static str, value: String },
}

/// Errors from [`decode`]. A failed decode never yields a partial entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input did not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid hex timestamp: {value:?}")]
    Timestamp {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid undo count: {value:?}")]
    UndoCount {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(transparent)]
    Board(#[from] UnknownBoard),

    #[error("invalid base64 data point payload")]
    Base64(#[from] base64::DecodeError),

    /// The payload decoded to a byte count that cannot be split into triples.
    #[error("data point payload has {len} bytes, which is not a multiple of 3")]
    TripleLength { len: usize },
}

/// Renders a ledger's full state, pending points included.
///
/// Fails if the match or subject id contains the delimiter, since the result
/// could not be decoded.
pub fn encode<C: TimeCursor>(ledger: &Ledger<C>) -> Result<String, EncodeError> {
    encode_parts(
        ledger.identity(),
        ledger.undo_count(),
        ledger.data_points(),
        ledger.comments(),
    )
}

pub(crate) fn encode_parts(
    identity: &EntryIdentity,
    undo_count: u32,
    data_points: &[DataPoint],
    comments: &str,
) -> Result<String, EncodeError> {
    check_id("match id", &identity.match_id)?;
    check_id("subject id", &identity.subject_id)?;

    let fields = [
        identity.match_id.clone(),
        identity.subject_id.clone(),
        sanitize_operator(&identity.operator_id),
        identity.station.name().to_string(),
        format!("{:x}", identity.start_timestamp),
        undo_count.to_string(),
        encode_data_points(data_points),
        sanitize_comments(comments),
    ];
    Ok(fields.join(&DELIMITER.to_string()))
}

fn check_id(field: &'static str, value: &str) -> Result<(), EncodeError> {
    if value.contains(DELIMITER) {
        return Err(EncodeError::DelimiterInId {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Base64 of the `type, value, time` triples, in sequence order.
pub fn encode_data_points(data_points: &[DataPoint]) -> String {
    let bytes: Vec<u8> = data_points.iter().flat_map(|p| p.to_bytes()).collect();
    STANDARD.encode(bytes)
}

pub fn decode_data_points(payload: &str) -> Result<Vec<DataPoint>, DecodeError> {
    let bytes = STANDARD.decode(payload)?;
    if bytes.len() % 3 != 0 {
        return Err(DecodeError::TripleLength { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(3)
        .map(|triple| DataPoint::from_bytes([triple[0], triple[1], triple[2]]))
        .collect())
}

/// Parses an encoded entry.
///
/// Identity fields and the undo count come back exactly; the operator and
/// comments come back in their sanitized form.
pub fn decode(encoded: &str) -> Result<Entry, DecodeError> {
    let fields: Vec<&str> = encoded.trim_end_matches(['\r', '\n']).split(DELIMITER).collect();
    let &[
        match_id,
        subject_id,
        operator_id,
        station,
        start_timestamp,
        undo_count,
        data_points,
        comments,
    ] = fields.as_slice()
    else {
        return Err(DecodeError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let start_timestamp =
        u32::from_str_radix(start_timestamp, 16).map_err(|source| DecodeError::Timestamp {
            value: start_timestamp.to_string(),
            source,
        })?;
    let undo_count = undo_count
        .parse::<u32>()
        .map_err(|source| DecodeError::UndoCount {
            value: undo_count.to_string(),
            source,
        })?;
    let station: Board = station.parse()?;
    let data_points = decode_data_points(data_points)?;

    Ok(Entry {
        identity: EntryIdentity {
            match_id: match_id.to_string(),
            subject_id: subject_id.to_string(),
            operator_id: operator_id.to_string(),
            station,
            start_timestamp,
        },
        undo_count,
        data_points,
        comments: comments.to_string(),
    })
}

/// First 64 characters, with everything outside `[A-Za-z0-9 ]` replaced by `_`.
pub fn sanitize_comments(comments: &str) -> String {
    comments
        .chars()
        .take(MAX_COMMENT_CHARS)
        .map(replace_disallowed)
        .collect()
}

/// Replaces everything outside `[A-Za-z0-9 ]` with `_`. No length cap.
pub fn sanitize_operator(operator: &str) -> String {
    operator.chars().map(replace_disallowed).collect()
}

const fn replace_disallowed(c: char) -> char {
    if c.is_ascii_alphanumeric() || c == ' ' {
        c
    } else {
        '_'
    }
}
