//! The per-match event ledger.
//!
//! A [`Ledger`] holds the data points recorded by one operator watching one
//! subject during one match. Points are kept in the order of the ticks they
//! were recorded at, and every query is relative to the cursor:
//!
//! - the *committed prefix* holds points with `time <= now`
//! - the *pending suffix* holds points recorded later than the cursor's
//!   current position, which happens when the cursor is scrubbed backwards
//!
//! New points are inserted at the boundary between the two, undo removes the
//! newest committed point, and counts only see the committed prefix. The
//! cursor is read fresh on every call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{self, EncodeError};
use crate::cursor::{FixedCursor, TimeCursor};
use crate::data_point::DataPoint;
use crate::station::Board;

/// Who recorded an entry, of what, and when the session started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryIdentity {
    /// Match identifier, e.g. `Q12`.
    pub match_id: String,
    /// The subject being observed (a team number).
    pub subject_id: String,
    /// The operator (scout) recording the entry.
    pub operator_id: String,
    /// The board the operator is sitting at.
    pub station: Board,
    /// Wall-clock session start, in unix seconds.
    pub start_timestamp: u32,
}

/// A plain copy of a ledger's state, as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub identity: EntryIdentity,
    /// Number of points removed by undo.
    pub undo_count: u32,
    /// Every stored point, committed and pending.
    pub data_points: Vec<DataPoint>,
    pub comments: String,
}

impl Entry {
    /// Renders the entry in the colon-delimited wire format.
    pub fn encode(&self) -> Result<String, EncodeError> {
        codec::encode_parts(
            &self.identity,
            self.undo_count,
            &self.data_points,
            &self.comments,
        )
    }
}

/// Ordered store of data points with an undo counter and free-text comments.
///
/// Untimed ledgers never consult their cursor: every point is committed and
/// new points are appended.
pub struct Ledger<C = FixedCursor> {
    identity: EntryIdentity,
    cursor: C,
    timed: bool,
    data_points: Vec<DataPoint>,
    undo_count: u32,
    comments: String,
}

impl<C> fmt::Debug for Ledger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("identity", &self.identity)
            .field("timed", &self.timed)
            .field("data_points", &self.data_points)
            .field("undo_count", &self.undo_count)
            .field("comments", &self.comments)
            .finish_non_exhaustive()
    }
}

impl Ledger<FixedCursor> {
    /// Creates a ledger that always operates at the end of its sequence.
    #[must_use]
    pub fn untimed(identity: EntryIdentity) -> Self {
        Self::with_timing(identity, FixedCursor::default(), false)
    }
}

impl<C: TimeCursor> Ledger<C> {
    /// Creates an empty, timed ledger reading ticks from `cursor`.
    pub fn new(identity: EntryIdentity, cursor: C) -> Self {
        Self::with_timing(identity, cursor, true)
    }

    /// Creates an empty ledger; when `timed` is false the cursor is never read.
    pub fn with_timing(identity: EntryIdentity, cursor: C, timed: bool) -> Self {
        Self {
            identity,
            cursor,
            timed,
            data_points: Vec::new(),
            undo_count: 0,
            comments: String::new(),
        }
    }

    /// Rebuilds a ledger from a decoded entry.
    pub fn restore(entry: Entry, cursor: C, timed: bool) -> Self {
        Self {
            identity: entry.identity,
            cursor,
            timed,
            data_points: entry.data_points,
            undo_count: entry.undo_count,
            comments: entry.comments,
        }
    }

    /// The current tick, or `None` for untimed ledgers.
    fn now(&self) -> Option<u8> {
        if !self.timed {
            return None;
        }
        let now = self.cursor.now();
        tracing::trace!(now, "read cursor");
        Some(now)
    }

    /// Number of points in the committed prefix.
    pub fn cursor_index(&self) -> usize {
        match self.now() {
            None => self.data_points.len(),
            Some(now) => self
                .data_points
                .iter()
                .take_while(|point| point.time <= now)
                .count(),
        }
    }

    fn committed(&self) -> &[DataPoint] {
        &self.data_points[..self.cursor_index()]
    }

    /// Inserts `point` at the cursor index.
    ///
    /// Callers should stamp points with the current tick (see [`Self::record`]);
    /// the sequence stays sorted by time only if they do.
    pub fn add(&mut self, point: DataPoint) {
        let index = self.cursor_index();
        tracing::debug!(?point, index, "add data point");
        self.data_points.insert(index, point);
    }

    /// Stamps a point with the current tick and adds it.
    ///
    /// Untimed ledgers stamp tick 0.
    pub fn record(&mut self, kind: u8, value: u8) -> DataPoint {
        let point = DataPoint::new(kind, value, self.now().unwrap_or_default());
        self.add(point);
        point
    }

    /// Removes the newest committed point.
    ///
    /// Returns `None` without touching the counter when the committed prefix
    /// is empty. Pending points are never removed.
    pub fn undo(&mut self) -> Option<DataPoint> {
        let index = self.cursor_index();
        if index == 0 {
            tracing::debug!("nothing to undo");
            return None;
        }
        let removed = self.data_points.remove(index - 1);
        self.undo_count = self.undo_count.saturating_add(1);
        tracing::debug!(point = ?removed, undo_count = self.undo_count, "undo data point");
        Some(removed)
    }

    /// Number of committed points of `kind`.
    pub fn count(&self, kind: u8) -> usize {
        self.committed().iter().filter(|p| p.kind == kind).count()
    }

    /// The latest committed point of `kind`.
    pub fn last_value(&self, kind: u8) -> Option<DataPoint> {
        self.committed().iter().rev().find(|p| p.kind == kind).copied()
    }

    /// Whether a point of `kind` is stored at exactly the current tick.
    ///
    /// Looks at the whole sequence, pending points included. Always false for
    /// untimed ledgers.
    pub fn is_active_now(&self, kind: u8) -> bool {
        self.now().is_some_and(|now| {
            self.data_points
                .iter()
                .any(|p| p.kind == kind && p.time == now)
        })
    }

    pub fn identity(&self) -> &EntryIdentity {
        &self.identity
    }

    /// Every stored point, committed and pending, in order.
    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    pub const fn undo_count(&self) -> u32 {
        self.undo_count
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Replaces the comments. Length and charset are only enforced when encoding.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    pub const fn is_timed(&self) -> bool {
        self.timed
    }

    pub fn snapshot(&self) -> Entry {
        Entry {
            identity: self.identity.clone(),
            undo_count: self.undo_count,
            data_points: self.data_points.clone(),
            comments: self.comments.clone(),
        }
    }

    /// Renders the ledger in the colon-delimited wire format.
    pub fn encode(&self) -> Result<String, EncodeError> {
        codec::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cursor::SharedCursor;

    const PICKUP: u8 = 1;
    const PLACE: u8 = 2;

    fn identity() -> EntryIdentity {
        EntryIdentity {
            match_id: "Q12".to_string(),
            subject_id: "254".to_string(),
            operator_id: "Jane D".to_string(),
            station: Board::R1,
            start_timestamp: 0,
        }
    }

    fn timed() -> (Ledger<SharedCursor>, SharedCursor) {
        let cursor = SharedCursor::new(0);
        (Ledger::new(identity(), cursor.clone()), cursor)
    }

    fn times(ledger: &Ledger<SharedCursor>) -> Vec<u8> {
        ledger.data_points().iter().map(|p| p.time).collect()
    }

    #[test]
    fn new_ledger_is_empty() {
        let (ledger, _) = timed();
        assert!(ledger.data_points().is_empty());
        assert_eq!(ledger.undo_count(), 0);
        assert_eq!(ledger.comments(), "");
        assert!(ledger.is_timed());
    }

    #[test]
    fn adds_with_advancing_cursor_stay_sorted() {
        let (mut ledger, cursor) = timed();
        for tick in [0, 2, 2, 5, 9, 9, 30] {
            cursor.set(tick);
            ledger.record(PICKUP, 0);
            assert!(ledger.data_points().is_sorted_by_key(|p| p.time));
        }
        assert_eq!(times(&ledger), vec![0, 2, 2, 5, 9, 9, 30]);
    }

    #[test]
    fn add_after_scrub_inserts_before_pending() {
        let (mut ledger, cursor) = timed();
        cursor.set(3);
        ledger.record(PICKUP, 0);
        cursor.set(8);
        ledger.record(PLACE, 0);

        cursor.set(5);
        ledger.record(PICKUP, 1);

        assert_eq!(times(&ledger), vec![3, 5, 8]);
        assert_eq!(ledger.cursor_index(), 2);
    }

    #[test]
    fn undo_removes_newest_committed_point() {
        let (mut ledger, cursor) = timed();
        for (tick, kind) in [(1, PICKUP), (2, PLACE), (3, PICKUP)] {
            cursor.set(tick);
            ledger.record(kind, 0);
        }

        let removed = ledger.undo();

        assert_eq!(removed, Some(DataPoint::new(PICKUP, 0, 3)));
        assert_eq!(ledger.undo_count(), 1);
        assert_eq!(times(&ledger), vec![1, 2]);
    }

    #[test]
    fn undo_never_removes_pending_points() {
        let (mut ledger, cursor) = timed();
        for tick in [3, 5, 7] {
            cursor.set(tick);
            ledger.record(PICKUP, tick);
        }

        cursor.set(5);
        let removed = ledger.undo();

        assert_eq!(removed, Some(DataPoint::new(PICKUP, 5, 5)));
        assert_eq!(times(&ledger), vec![3, 7]);
    }

    #[test]
    fn undo_with_only_pending_points_is_noop() {
        let (mut ledger, cursor) = timed();
        cursor.set(10);
        ledger.record(PICKUP, 0);

        cursor.set(4);
        assert_eq!(ledger.undo(), None);
        assert_eq!(ledger.undo_count(), 0);
        assert_eq!(ledger.data_points().len(), 1);
    }

    #[test]
    fn undo_on_empty_ledger_is_noop() {
        let (mut ledger, _) = timed();
        assert_eq!(ledger.undo(), None);
        assert_eq!(ledger.undo_count(), 0);
    }

    #[test]
    fn undo_counter_tracks_each_removal() {
        let (mut ledger, cursor) = timed();
        for tick in 1..=4 {
            cursor.set(tick);
            ledger.record(PICKUP, 0);
        }
        ledger.undo();
        ledger.undo();
        ledger.undo();
        ledger.undo();
        ledger.undo();
        assert_eq!(ledger.undo_count(), 4);
        assert!(ledger.data_points().is_empty());
    }

    #[test]
    fn count_ignores_pending_points() {
        let cursor = FixedCursor(5);
        let mut ledger = Ledger::new(identity(), cursor);
        for tick in [3, 5] {
            ledger.add(DataPoint::new(PICKUP, 0, tick));
        }
        // A point from later in the match, appended past the committed prefix.
        ledger.data_points.push(DataPoint::new(PICKUP, 0, 7));

        assert_eq!(ledger.count(PICKUP), 2);
        assert_eq!(ledger.count(PLACE), 0);
    }

    #[test]
    fn count_follows_cursor_scrubbing() {
        let (mut ledger, cursor) = timed();
        for tick in [3, 5, 7] {
            cursor.set(tick);
            ledger.record(PICKUP, 0);
        }

        cursor.set(5);
        assert_eq!(ledger.count(PICKUP), 2);
        cursor.set(2);
        assert_eq!(ledger.count(PICKUP), 0);
        cursor.set(100);
        assert_eq!(ledger.count(PICKUP), 3);
    }

    #[test]
    fn last_value_is_latest_committed_of_kind() {
        let (mut ledger, cursor) = timed();
        let inputs = [(1, PICKUP, 10), (2, PLACE, 20), (3, PICKUP, 30), (6, PICKUP, 60)];
        for (tick, kind, value) in inputs {
            cursor.set(tick);
            ledger.record(kind, value);
        }

        cursor.set(4);
        assert_eq!(ledger.last_value(PICKUP), Some(DataPoint::new(PICKUP, 30, 3)));
        assert_eq!(ledger.last_value(PLACE), Some(DataPoint::new(PLACE, 20, 2)));
        assert_eq!(ledger.last_value(99), None);

        cursor.set(0);
        assert_eq!(ledger.last_value(PICKUP), None);
    }

    #[test]
    fn is_active_now_matches_exact_tick() {
        let (mut ledger, cursor) = timed();
        cursor.set(4);
        ledger.record(PICKUP, 0);
        cursor.set(9);
        ledger.record(PLACE, 0);

        cursor.set(4);
        assert!(ledger.is_active_now(PICKUP));
        assert!(!ledger.is_active_now(PLACE));

        cursor.set(5);
        assert!(!ledger.is_active_now(PICKUP));
    }

    #[test]
    fn is_active_now_sees_pending_points() {
        let cursor = FixedCursor(7);
        let mut ledger = Ledger::new(identity(), cursor);
        ledger.data_points.push(DataPoint::new(PLACE, 0, 3));
        ledger.data_points.push(DataPoint::new(PLACE, 0, 7));
        ledger.data_points.push(DataPoint::new(PICKUP, 0, 7));

        assert!(ledger.is_active_now(PICKUP));
        assert!(ledger.is_active_now(PLACE));
    }

    #[test]
    fn untimed_ledger_appends_and_undoes_last() {
        let mut ledger = Ledger::untimed(identity());
        ledger.add(DataPoint::new(PICKUP, 0, 9));
        ledger.add(DataPoint::new(PLACE, 0, 1));

        assert!(!ledger.is_timed());
        assert_eq!(ledger.cursor_index(), 2);
        assert_eq!(ledger.count(PICKUP), 1);
        assert_eq!(ledger.last_value(PLACE), Some(DataPoint::new(PLACE, 0, 1)));
        assert!(!ledger.is_active_now(PLACE));

        assert_eq!(ledger.undo(), Some(DataPoint::new(PLACE, 0, 1)));
        assert_eq!(ledger.undo_count(), 1);
    }

    #[test]
    fn untimed_ledger_never_reads_cursor() {
        let cursor = || -> u8 { panic!("cursor read") };
        let mut ledger = Ledger::with_timing(identity(), cursor, false);
        ledger.record(PICKUP, 2);
        assert_eq!(ledger.count(PICKUP), 1);
        assert_eq!(ledger.undo(), Some(DataPoint::new(PICKUP, 2, 0)));
    }

    #[test]
    fn restore_preserves_snapshot() {
        let (mut ledger, cursor) = timed();
        cursor.set(2);
        ledger.record(PICKUP, 1);
        cursor.set(3);
        ledger.record(PLACE, 1);
        ledger.undo();
        ledger.set_comments("fast");

        let restored = Ledger::restore(ledger.snapshot(), FixedCursor(3), true);

        assert_eq!(restored.snapshot(), ledger.snapshot());
        assert_eq!(restored.count(PICKUP), 1);
    }
}
