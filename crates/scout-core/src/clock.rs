//! Wall-clock driven session timing.

use chrono::Utc;

use crate::cursor::TimeCursor;

/// Length of a standard match, in ticks.
pub const DEFAULT_TIMER_LIMIT: u8 = 150;

/// Maps wall-clock seconds onto session ticks.
///
/// Ticks wrap at `limit + 1`, so a clock left running past the end of a
/// match starts over at zero rather than running off the end of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    start: i64,
    limit: u8,
}

impl SessionClock {
    /// Creates a clock for a session that started at `start` (unix seconds).
    #[must_use]
    pub const fn new(start: i64, limit: u8) -> Self {
        Self { start, limit }
    }

    /// Creates a clock for a session starting now.
    #[must_use]
    pub fn starting_now(limit: u8) -> Self {
        Self::new(Utc::now().timestamp(), limit)
    }

    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    #[must_use]
    pub const fn limit(&self) -> u8 {
        self.limit
    }

    /// The tick corresponding to `unix_seconds`.
    #[must_use]
    pub fn relative_at(&self, unix_seconds: i64) -> u8 {
        let elapsed = unix_seconds.saturating_sub(self.start).max(0);
        let tick = elapsed % (i64::from(self.limit) + 1);
        u8::try_from(tick).unwrap_or(self.limit)
    }

    #[must_use]
    pub fn relative_now(&self) -> u8 {
        self.relative_at(Utc::now().timestamp())
    }

    /// Whether `tick` is within one tick of the wall clock at `unix_seconds`.
    ///
    /// A scrubbed cursor that is this close is considered back in sync.
    #[must_use]
    pub fn is_near(&self, tick: u8, unix_seconds: i64) -> bool {
        self.relative_at(unix_seconds).abs_diff(tick) <= 1
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::starting_now(DEFAULT_TIMER_LIMIT)
    }
}

impl TimeCursor for SessionClock {
    fn now(&self) -> u8 {
        self.relative_now()
    }
}

/// Enforces the one-event-per-tick input convention.
///
/// The ledger accepts any number of points per tick; callers that want the
/// convention check the gate before recording and mark it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickGate {
    limit: u8,
    last_recorded: Option<u8>,
}

impl TickGate {
    #[must_use]
    pub const fn new(limit: u8) -> Self {
        Self {
            limit,
            last_recorded: None,
        }
    }

    /// True if nothing has been recorded at `tick` yet and the match has not ended.
    #[must_use]
    pub fn is_recordable(&self, tick: u8) -> bool {
        tick <= self.limit && self.last_recorded != Some(tick)
    }

    pub const fn mark(&mut self, tick: u8) {
        self.last_recorded = Some(tick);
    }
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_LIMIT)
    }
}
