//! The election window: when votes are accepted.

use ballotbox_types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

pub const SECS_PER_HOUR: u64 = 3600;

/// `(start, end)` bounds of the voting period, both exclusive.
///
/// The default window is `(0, 0)`, which is never open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionWindow {
    start: Timestamp,
    end: Timestamp,
}

impl ElectionWindow {
    /// Replace the window with `(now, now + duration_hours)`.
    ///
    /// Rejects a zero duration and one that overflows the clock, so that
    /// `start < end` always holds once configured.
    pub fn configure(&mut self, duration_hours: u64, now: Timestamp) -> Result<(), ElectionError> {
        let end = duration_hours
            .checked_mul(SECS_PER_HOUR)
            .filter(|&secs| secs > 0)
            .and_then(|secs| now.checked_add_secs(secs))
            .ok_or(ElectionError::InvalidDuration(duration_hours))?;
        self.start = now;
        self.end = end;
        Ok(())
    }

    /// True iff `start < now < end`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.start < now && now < self.end
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn is_configured(&self) -> bool {
        self.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn unconfigured_window_is_always_closed() {
        let window = ElectionWindow::default();
        assert_eq!(window.start(), Timestamp::EPOCH);
        assert_eq!(window.end(), Timestamp::EPOCH);
        assert!(!window.is_configured());
        for now in [0, 1, 1_000_000, u64::MAX] {
            assert!(!window.is_open(ts(now)));
        }
    }

    #[test]
    fn bounds_are_exclusive() {
        let mut window = ElectionWindow::default();
        window.configure(1, ts(1000)).unwrap();
        assert_eq!(window.start(), ts(1000));
        assert_eq!(window.end(), ts(4600));
        assert!(!window.is_open(ts(1000)));
        assert!(window.is_open(ts(1001)));
        assert!(window.is_open(ts(4599)));
        assert!(!window.is_open(ts(4600)));
        assert!(!window.is_open(ts(999)));
    }

    #[test]
    fn reconfigure_replaces_both_ends() {
        let mut window = ElectionWindow::default();
        window.configure(1, ts(1000)).unwrap();
        window.configure(2, ts(10_000)).unwrap();
        assert_eq!(window.start(), ts(10_000));
        assert_eq!(window.end(), ts(10_000 + 7200));
        assert!(!window.is_open(ts(2000)));
    }

    #[test]
    fn zero_duration_is_rejected_and_keeps_window() {
        let mut window = ElectionWindow::default();
        window.configure(1, ts(1000)).unwrap();
        assert_eq!(
            window.configure(0, ts(2000)),
            Err(ElectionError::InvalidDuration(0))
        );
        assert_eq!(window.start(), ts(1000));
    }

    #[test]
    fn overflowing_duration_is_rejected() {
        let mut window = ElectionWindow::default();
        assert!(window.configure(u64::MAX, ts(1)).is_err());
        assert!(window.configure(1, ts(u64::MAX - 10)).is_err());
        assert!(!window.is_configured());
    }
}
