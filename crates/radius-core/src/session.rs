//! Per-session row limit.

use serde::Serialize;

/// Initial row limit of the feed dashboard.
pub const FEED_INITIAL_LIMIT: u32 = 800;

/// Initial row limit of the probe dashboard.
pub const PROBE_INITIAL_LIMIT: u32 = 50;

/// Rows added by one "load more".
pub const LOAD_MORE_STEP: u32 = 300;

/// The current maximum row count requested by one session.
///
/// The limit only ever grows: [`load_more`](Self::load_more) is the only
/// mutator and it saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionLimit {
    current: u32,
    step: u32,
}

impl SessionLimit {
    pub fn new(initial: u32, step: u32) -> Self {
        Self {
            current: initial,
            step,
        }
    }

    /// Limit for a fresh feed session.
    pub fn feed() -> Self {
        Self::new(FEED_INITIAL_LIMIT, LOAD_MORE_STEP)
    }

    /// Limit for a fresh probe session.
    pub fn probe() -> Self {
        Self::new(PROBE_INITIAL_LIMIT, LOAD_MORE_STEP)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Raise the limit by one step and return the new value.
    pub fn load_more(&mut self) -> u32 {
        self.current = self.current.saturating_add(self.step);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(SessionLimit::feed().current(), 800);
        assert_eq!(SessionLimit::probe().current(), 50);
        assert_eq!(SessionLimit::feed().step(), 300);
    }

    #[test]
    fn n_loads_add_n_steps() {
        for n in 0..20u32 {
            let mut limit = SessionLimit::feed();
            for _ in 0..n {
                limit.load_more();
            }
            assert_eq!(limit.current(), 800 + n * 300);
        }
    }

    #[test]
    fn never_decreases() {
        let mut limit = SessionLimit::new(u32::MAX - 10, 300);
        let before = limit.current();
        assert_eq!(limit.load_more(), u32::MAX);
        assert!(limit.current() >= before);
        assert_eq!(limit.load_more(), u32::MAX);
    }
}
