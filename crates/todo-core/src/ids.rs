//! Task id allocation.
//!
//! Ids come from an [`IdSource`]. The default [`ClockIds`] hands out
//! wall-clock milliseconds but never repeats or goes backwards: two tasks
//! created within the same millisecond get `t` and `t + 1`.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// Anything that can hand out fresh task ids.
pub trait IdSource {
    fn next_id(&mut self) -> TaskId;
}

/// Which [`IdSource`] a screen should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Timestamp-derived ids, bumped to stay strictly increasing.
    #[default]
    Clock,
    /// 1, 2, 3, ...
    Sequence,
}

impl IdStrategy {
    #[must_use]
    pub fn source(self) -> Box<dyn IdSource> {
        match self {
            Self::Clock => Box::new(ClockIds::system()),
            Self::Sequence => Box::new(SequenceIds::default()),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Sequence => "sequence",
        }
    }
}

fn system_time_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Millisecond timestamps, made strictly monotonic.
pub struct ClockIds {
    last: u64,
    now: fn() -> u64,
}

impl ClockIds {
    #[must_use]
    pub fn system() -> Self {
        Self::with_clock(system_time_ms)
    }

    /// Use a custom clock (tests pin time with this).
    #[must_use]
    pub fn with_clock(now: fn() -> u64) -> Self {
        Self { last: 0, now }
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> TaskId {
        let next = std::cmp::max((self.now)(), self.last + 1);
        self.last = next;
        TaskId::new(next)
    }
}

/// Plain counter starting at 1.
#[derive(Debug, Default)]
pub struct SequenceIds {
    last: u64,
}

impl IdSource for SequenceIds {
    fn next_id(&mut self) -> TaskId {
        self.last += 1;
        TaskId::new(self.last)
    }
}
