//! Progress counters for progress-bar components.

use serde::{Deserialize, Serialize};

/// A `partial / total` pair that is valid by construction.
///
/// Deserialization goes through [`ProgressCounter::new`], so invalid pairs
/// are rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProgressCounter")]
pub struct ProgressCounter {
    partial: u32,
    total: u32,
}

impl ProgressCounter {
    /// Zero progress out of one step.
    pub const INITIAL: ProgressCounter = ProgressCounter {
        partial: 0,
        total: 1,
    };

    /// Creates a counter, or `None` if `partial > total` or `total == 0`.
    pub fn new(partial: u32, total: u32) -> Option<Self> {
        if total == 0 || partial > total {
            return None;
        }
        Some(Self { partial, total })
    }

    pub fn partial(&self) -> u32 {
        self.partial
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Completed fraction in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.partial as f32 / self.total as f32
    }

    /// Steps left until completion.
    pub fn remaining(&self) -> u32 {
        self.total - self.partial
    }

    /// Advances by `steps`, or returns `None` if that would exceed the total.
    pub fn advanced(&self, steps: u32) -> Option<Self> {
        Self::new(self.partial.checked_add(steps)?, self.total)
    }
}

#[derive(Deserialize)]
struct RawProgressCounter {
    partial: u32,
    total: u32,
}

impl TryFrom<RawProgressCounter> for ProgressCounter {
    type Error = String;

    fn try_from(raw: RawProgressCounter) -> Result<Self, Self::Error> {
        Self::new(raw.partial, raw.total).ok_or_else(|| {
            format!(
                "invalid progress {}/{}: total must be positive and at least partial",
                raw.partial, raw.total
            )
        })
    }
}

impl Default for ProgressCounter {
    fn default() -> Self {
        Self::INITIAL
    }
}
