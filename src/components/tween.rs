//! Position tween driven by explicit ticks.
//!
//! [`SpawnTween`] carries everything a one-shot move needs (start, end,
//! elapsed, duration) and is advanced by whoever owns it calling
//! [`SpawnTween::tick`] with the frame delta. The final tick lands exactly on
//! `to`, with no interpolation residue.

use raylib::prelude::Vector2;

/// Linearly interpolate between two 2D vectors.
pub fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Linear, play-once move from `from` to `to` over `duration` seconds.
#[derive(Clone, Copy, Debug)]
pub struct SpawnTween {
    pub from: Vector2,
    pub to: Vector2,
    pub duration: f32,
    pub elapsed: f32,
}

impl SpawnTween {
    pub fn new(from: Vector2, to: Vector2, duration: f32) -> Self {
        SpawnTween {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn tick(&mut self, dt: f32) -> Vector2 {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            self.elapsed = self.duration.max(0.0);
            return self.to;
        }
        lerp_v2(self.from, self.to, self.elapsed / self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2 { x, y }
    }

    #[test]
    fn test_tween_new() {
        let tw = SpawnTween::new(v(0.0, 0.0), v(10.0, 20.0), 2.0);
        assert!(approx_eq(tw.elapsed, 0.0));
        assert!(!tw.is_finished());
    }

    #[test]
    fn test_tween_midpoint() {
        let mut tw = SpawnTween::new(v(0.0, 0.0), v(10.0, -20.0), 1.0);
        let p = tw.tick(0.5);
        assert!(approx_eq(p.x, 5.0));
        assert!(approx_eq(p.y, -10.0));
        assert!(!tw.is_finished());
    }

    #[test]
    fn test_tween_lands_exactly_on_target() {
        // Thirds of a tenth need not sum to exactly 0.1 in f32.
        let to = v(0.3, -1.7);
        let mut tw = SpawnTween::new(v(-2.0, 4.0), to, 0.1);
        let mut last = tw.from;
        let mut ticks = 0;
        while !tw.is_finished() {
            last = tw.tick(0.1 / 3.0);
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!((last.x, last.y), (to.x, to.y));
    }

    #[test]
    fn test_tween_overshooting_tick_is_clamped() {
        let mut tw = SpawnTween::new(v(0.0, 0.0), v(1.0, 1.0), 0.1);
        let p = tw.tick(5.0);
        assert_eq!((p.x, p.y), (1.0, 1.0));
        assert!(approx_eq(tw.elapsed, 0.1));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tw = SpawnTween::new(v(0.0, 0.0), v(3.0, 3.0), 0.0);
        let p = tw.tick(0.0);
        assert!(tw.is_finished());
        assert_eq!((p.x, p.y), (3.0, 3.0));
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut tw = SpawnTween::new(v(0.0, 0.0), v(1.0, 0.0), 1.0);
        tw.tick(0.25);
        tw.tick(-1.0);
        assert!(approx_eq(tw.elapsed, 0.25));
    }
}
