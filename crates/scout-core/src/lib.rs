//! Core domain logic for match scouting.
//!
//! This crate contains:
//! - Ledger: the time-ordered record of one scout's observations for one match
//! - Codec: the colon-delimited wire format entries are exported in
//! - Clock and cursors: the session-relative time sources the ledger reads
//! - Boards and operator names: the identity pieces attached to an entry

pub mod clock;
pub mod codec;
pub mod cursor;
mod data_point;
mod ledger;
pub mod operator;
pub mod station;

pub use clock::{DEFAULT_TIMER_LIMIT, SessionClock, TickGate};
pub use codec::{DecodeError, EncodeError, decode, encode};
pub use cursor::{FixedCursor, SharedCursor, TimeCursor};
pub use data_point::{DataPoint, FieldOutOfRange};
pub use ledger::{Entry, EntryIdentity, Ledger};
pub use operator::is_valid_operator_name;
pub use station::{Alliance, Board, UnknownBoard};
