use std::time::{Duration, Instant};

/// One step of a running timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// 0.0 at the first frame, 1.0 at the last
    pub progress: f32,
    pub finished: bool,
}

/// Frame clock for a single animation.
///
/// The clock starts at the first frame delivered after [`Timeline::start`],
/// so time spent between starting and the loop's next tick is not skipped.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    duration: Duration,
    started_at: Option<Instant>,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) from the beginning.
    pub fn start(&mut self, duration: Duration) {
        self.duration = duration;
        self.started_at = None;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.started_at = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Frame for `now`, `None` when not playing. The frame that reaches
    /// the end stops the timeline.
    pub fn frame(&mut self, now: Instant) -> Option<Frame> {
        if !self.playing {
            return None;
        }
        let started = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let finished = progress >= 1.0;
        if finished {
            self.stop();
        }
        Some(Frame { progress, finished })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_on_first_frame() {
        let t0 = Instant::now();
        let mut timeline = Timeline::new();
        assert_eq!(timeline.frame(t0), None);

        timeline.start(Duration::from_millis(100));
        let first = timeline.frame(t0 + Duration::from_millis(30)).unwrap();
        assert_eq!(first.progress, 0.0);
        let mid = timeline.frame(t0 + Duration::from_millis(80)).unwrap();
        assert!((mid.progress - 0.5).abs() < 1e-4);
        assert!(!mid.finished);
        let last = timeline.frame(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(last, Frame { progress: 1.0, finished: true });
        assert!(!timeline.is_playing());
    }

    #[test]
    fn zero_length_finishes_immediately() {
        let mut timeline = Timeline::new();
        timeline.start(Duration::ZERO);
        let frame = timeline.frame(Instant::now()).unwrap();
        assert!(frame.finished);
    }
}
