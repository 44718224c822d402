//! Frame-driven session that owns the current tessellation.

use crate::engine::Tessellation;
use crate::paint::DrawingContext;
use crate::seed::{SeedLocation, get_and_save_seed};

/// Handle of a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host service that delivers one frame per display refresh.
///
/// When a scheduled frame is due, the host calls [`Session::frame`] with its
/// handle.
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle;
    fn cancel_scheduled_frame(&mut self, handle: FrameHandle);
}

/// One animated tessellation and its pending frame.
#[derive(Debug, Default)]
pub struct Session {
    tessellation: Option<Tessellation>,
    pending: Option<FrameHandle>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tessellation(&self) -> Option<&Tessellation> {
        self.tessellation.as_ref()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Drop the current run and cancel its next frame.
    pub fn reset<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_scheduled_frame(handle);
        }
        self.tessellation = None;
    }

    /// Start a new run from the location's seed and schedule its first frame.
    ///
    /// With `force_new_seed`, a fresh timestamp seed replaces the location's.
    /// Returns the seed in use.
    pub fn run<S: FrameScheduler + ?Sized>(
        &mut self,
        location: &mut SeedLocation,
        force_new_seed: bool,
        scheduler: &mut S,
    ) -> String {
        self.reset(scheduler);
        let seed = get_and_save_seed(location, force_new_seed);
        tracing::info!(%seed, %location, "starting run");
        self.tessellation = Some(Tessellation::generate(&seed));
        self.pending = Some(scheduler.schedule_next_frame());
        seed
    }

    /// Advance and draw one frame, then schedule the next.
    ///
    /// Returns `false` without drawing when `handle` is not the pending frame.
    pub fn frame<C, S>(&mut self, handle: FrameHandle, ctx: &mut C, scheduler: &mut S) -> bool
    where
        C: DrawingContext + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            tracing::trace!(?handle, "ignoring stale frame");
            return false;
        }
        let Some(tessellation) = self.tessellation.as_mut() else {
            self.pending = None;
            return false;
        };

        tessellation.morph();
        tessellation.paint(ctx);
        self.pending = Some(scheduler.schedule_next_frame());
        tracing::trace!(?handle, "frame drawn");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::FillStyle;

    #[derive(Debug, Default)]
    struct MockScheduler {
        next: u64,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for MockScheduler {
        fn schedule_next_frame(&mut self) -> FrameHandle {
            self.next += 1;
            FrameHandle(self.next)
        }

        fn cancel_scheduled_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    #[derive(Debug, Default)]
    struct CountingContext {
        fills: usize,
        clears: usize,
    }

    impl DrawingContext for CountingContext {
        fn width(&self) -> u32 {
            64
        }
        fn height(&self) -> u32 {
            32
        }
        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
            self.clears += 1;
        }
        fn set_fill_style(&mut self, _style: FillStyle) {}
        fn begin_path(&mut self) {}
        fn move_to(&mut self, _x: f64, _y: f64) {}
        fn line_to(&mut self, _x: f64, _y: f64) {}
        fn close_path(&mut self) {}
        fn fill(&mut self) {
            self.fills += 1;
        }
    }

    fn location(input: &str) -> SeedLocation {
        SeedLocation::parse(input).unwrap()
    }

    #[test]
    fn test_run_uses_location_seed() {
        let mut session = Session::new();
        let mut scheduler = MockScheduler::default();
        let mut loc = location("https://example.com/?s=test");

        let seed = session.run(&mut loc, false, &mut scheduler);

        assert_eq!(seed, "test");
        assert_eq!(session.tessellation().unwrap().shapes().len(), 128);
        assert_eq!(session.pending_frame(), Some(FrameHandle(1)));
    }

    #[test]
    fn test_rerun_cancels_pending_frame() {
        let mut session = Session::new();
        let mut scheduler = MockScheduler::default();
        let mut loc = location("https://example.com/?s=test");

        session.run(&mut loc, false, &mut scheduler);
        let seed = session.run(&mut loc, true, &mut scheduler);

        assert_eq!(scheduler.cancelled, [FrameHandle(1)]);
        assert_eq!(session.pending_frame(), Some(FrameHandle(2)));
        assert_eq!(loc.seed(), Some(seed.clone()));
        assert_eq!(session.tessellation().unwrap().seed(), seed);
    }

    #[test]
    fn test_frame_draws_and_reschedules() {
        let mut session = Session::new();
        let mut scheduler = MockScheduler::default();
        let mut ctx = CountingContext::default();
        let mut loc = location("https://example.com/?s=test");
        session.run(&mut loc, false, &mut scheduler);

        assert!(session.frame(FrameHandle(1), &mut ctx, &mut scheduler));
        assert_eq!(ctx.clears, 1);
        assert_eq!(ctx.fills, 128);
        assert_eq!(session.pending_frame(), Some(FrameHandle(2)));
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut session = Session::new();
        let mut scheduler = MockScheduler::default();
        let mut ctx = CountingContext::default();
        let mut loc = location("https://example.com/?s=test");
        session.run(&mut loc, false, &mut scheduler);
        session.run(&mut loc, false, &mut scheduler);

        assert!(!session.frame(FrameHandle(1), &mut ctx, &mut scheduler));
        assert_eq!(ctx.clears, 0);
        assert!(session.frame(FrameHandle(2), &mut ctx, &mut scheduler));
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut scheduler = MockScheduler::default();
        let mut ctx = CountingContext::default();
        let mut a = Session::new();
        let mut b = Session::new();
        let mut loc_a = location("https://example.com/?s=abc");
        let mut loc_b = location("https://example.com/?s=abc");
        a.run(&mut loc_a, false, &mut scheduler);
        b.run(&mut loc_b, false, &mut scheduler);

        for _ in 0..3 {
            let ha = a.pending_frame().unwrap();
            let hb = b.pending_frame().unwrap();
            a.frame(ha, &mut ctx, &mut scheduler);
            b.frame(hb, &mut ctx, &mut scheduler);
        }

        let pa: Vec<_> = a.tessellation().unwrap().points().iter().copied().collect();
        let pb: Vec<_> = b.tessellation().unwrap().points().iter().copied().collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut session = Session::new();
        let mut scheduler = MockScheduler::default();
        let mut loc = location("https://example.com/?s=test");
        session.run(&mut loc, false, &mut scheduler);

        session.reset(&mut scheduler);

        assert!(session.tessellation().is_none());
        assert_eq!(session.pending_frame(), None);
        assert_eq!(scheduler.cancelled, [FrameHandle(1)]);
    }
}
