//! Fixed-rate frame scheduler for the terminal loop.

use std::time::{Duration, Instant};

use polytension_core::{FrameHandle, FrameScheduler};

/// Schedules at most one frame at a time, one interval after the request.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    last_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_id: 0,
            pending: None,
        }
    }

    /// Time left until the pending frame is due, if one is scheduled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Take the pending frame if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    fn schedule_at(&mut self, deadline: Instant) -> FrameHandle {
        self.last_id += 1;
        let handle = FrameHandle(self.last_id);
        self.pending = Some((handle, deadline));
        handle
    }
}

impl FrameScheduler for FrameClock {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        self.schedule_at(Instant::now() + self.interval)
    }

    fn cancel_scheduled_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_handles_increase() {
        let mut clock = FrameClock::new(INTERVAL);
        assert_eq!(clock.schedule_next_frame(), FrameHandle(1));
        assert_eq!(clock.schedule_next_frame(), FrameHandle(2));
    }

    #[test]
    fn test_frame_due_after_interval() {
        let mut clock = FrameClock::new(INTERVAL);
        let start = Instant::now();
        let handle = clock.schedule_at(start + INTERVAL);

        assert_eq!(clock.take_due(start), None);
        assert_eq!(clock.time_until_due(start), Some(INTERVAL));
        assert_eq!(clock.take_due(start + INTERVAL), Some(handle));
        assert_eq!(clock.take_due(start + INTERVAL), None);
        assert_eq!(clock.time_until_due(start), None);
    }

    #[test]
    fn test_cancel_pending() {
        let mut clock = FrameClock::new(INTERVAL);
        let handle = clock.schedule_next_frame();
        clock.cancel_scheduled_frame(handle);
        assert_eq!(clock.time_until_due(Instant::now()), None);
    }

    #[test]
    fn test_cancel_stale_handle_keeps_pending() {
        let mut clock = FrameClock::new(INTERVAL);
        let stale = clock.schedule_next_frame();
        clock.schedule_next_frame();
        clock.cancel_scheduled_frame(stale);
        assert!(clock.time_until_due(Instant::now()).is_some());
    }
}
