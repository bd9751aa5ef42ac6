//! Animatable scalar values.

use std::f32::consts::PI;

/// A value animating from `from` towards `to`; `current` is the last
/// interpolated value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub from: f32,
    pub to: f32,
    pub current: f32,
}

impl Range {
    pub const fn new(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            current: value,
        }
    }

    /// Retarget. The value currently shown becomes the new start so
    /// interrupted animations continue without a jump.
    pub fn set(&mut self, to: f32) {
        self.from = self.current;
        self.to = to;
    }

    pub fn is_settled(&self) -> bool {
        self.from == self.to
    }

    pub fn interpolate(&mut self, progress: f32) {
        self.current = lerp(self.from, self.to, progress);
    }

    /// Cosine ease-in-out, used for positional zooms.
    pub fn interpolate_eased(&mut self, progress: f32) {
        let eased = if progress >= 1.0 {
            1.0
        } else {
            (1.0 - (progress.max(0.0) * PI).cos()) / 2.0
        };
        self.current = lerp(self.from, self.to, eased);
    }

    /// Land on the target and make it the new resting point.
    pub fn settle(&mut self) {
        self.current = self.to;
        self.from = self.to;
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    if t <= 0.0 {
        from
    } else if t >= 1.0 {
        to
    } else {
        from + (to - from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let mut r = Range::new(0.3);
        r.set(17.9);
        r.interpolate(0.0);
        assert_eq!(r.current, 0.3);
        r.interpolate(1.0);
        assert_eq!(r.current, 17.9);

        r.set(0.0);
        r.interpolate_eased(0.0);
        assert_eq!(r.current, 17.9);
        r.interpolate_eased(1.0);
        assert_eq!(r.current, 0.0);
    }

    #[test]
    fn monotonic_for_monotonic_progress() {
        for eased in [false, true] {
            let mut r = Range::new(1.0);
            r.set(0.65);
            let mut last = r.current;
            for step in 0..=60 {
                let p = step as f32 / 60.0;
                if eased {
                    r.interpolate_eased(p);
                } else {
                    r.interpolate(p);
                }
                assert!(r.current <= last, "not monotonic at {p}: {} > {last}", r.current);
                assert!(r.current >= 0.65 && r.current <= 1.0);
                last = r.current;
            }
        }
    }

    #[test]
    fn retarget_keeps_current_as_start() {
        let mut r = Range::new(0.0);
        r.set(10.0);
        r.interpolate(0.5);
        r.set(2.0);
        assert_eq!(r.from, 5.0);
        assert_eq!(r.to, 2.0);
        assert_eq!(r.current, 5.0);
        assert!(!r.is_settled());
        r.settle();
        assert!(r.is_settled());
        assert_eq!(r.current, 2.0);
    }
}
