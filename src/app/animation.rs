// SPDX-License-Identifier: GPL-3.0-only

//! Frame-driven animations
//!
//! Both animations are advanced from the animation tick subscription and
//! report whether they still need ticks.

use crate::constants::{animation, timing};
use std::time::{Duration, Instant};

/// Largest integration step; keeps stiff springs stable on slow frames
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Distance and speed below which a spring snaps to its target
const SETTLE_EPSILON: f32 = 0.01;

/// Damped spring on a single value (unit mass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping_ratio: f32,
}

impl Spring {
    pub fn new(value: f32, stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping_ratio,
        }
    }

    /// Soft, non-bouncing spring used by the viewer rotation
    pub fn rotation() -> Self {
        Self::new(
            0.0,
            animation::ROTATION_SPRING_STIFFNESS,
            animation::ROTATION_SPRING_DAMPING_RATIO,
        )
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() || dt <= 0.0 {
            return;
        }

        let damping = 2.0 * self.damping_ratio * self.stiffness.sqrt();
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let accel = -self.stiffness * (self.value - self.target) - damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if (self.value - self.target).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_EPSILON
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Time-based interpolation with ease-in-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Progress in `[0, 1]` at `now`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let t = ease_in_out(self.progress(now));
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Cubic ease-in-out
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Rotation of the in-flight capture icon
///
/// Follows the camera state's toggle: toggled means a full turn, untoggled
/// means upright. A new animation version restarts the turn from wherever
/// the icon currently is.
#[derive(Debug, Clone, Default)]
pub struct IconSpin {
    tween: Option<Tween>,
    angle: f32,
    version: u64,
}

impl IconSpin {
    /// Start a turn if `version` changed since the last sync
    pub fn sync(&mut self, toggled: bool, version: u64, now: Instant) {
        if version == self.version {
            return;
        }
        self.version = version;
        self.angle = self.angle_at(now);
        let target = if toggled {
            animation::CAPTURE_ICON_TURN_DEGREES
        } else {
            0.0
        };
        self.tween = Some(Tween::new(
            self.angle,
            target,
            now,
            timing::CAPTURE_ICON_ROTATION,
        ));
    }

    /// Angle in degrees at `now`
    pub fn angle_at(&self, now: Instant) -> f32 {
        self.tween.map_or(self.angle, |tween| tween.value_at(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|tween| !tween.is_finished(now))
    }

    /// Drop a finished tween, keeping its end angle
    pub fn tick(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            if tween.is_finished(now) {
                self.angle = tween.value_at(now);
                self.tween = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_without_overshoot() {
        let mut spring = Spring::rotation();
        spring.set_target(90.0);

        let mut max = 0.0f32;
        for _ in 0..240 {
            spring.step(1.0 / 60.0);
            max = max.max(spring.value());
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 90.0);
        assert!(max <= 90.0 + SETTLE_EPSILON);
    }

    #[test]
    fn test_spring_large_step_is_stable() {
        let mut spring = Spring::rotation();
        spring.set_target(180.0);
        spring.step(0.5);
        assert!(spring.value() > 0.0 && spring.value() <= 180.0 + SETTLE_EPSILON);
    }

    #[test]
    fn test_tween_endpoints() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 360.0, start, Duration::from_millis(1000));
        assert_eq!(tween.value_at(start), 0.0);
        assert!((tween.value_at(start + Duration::from_millis(500)) - 180.0).abs() < 0.01);
        assert_eq!(tween.value_at(start + Duration::from_secs(2)), 360.0);
        assert!(tween.is_finished(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_icon_spin_restarts_on_new_version() {
        let start = Instant::now();
        let mut spin = IconSpin::default();

        spin.sync(true, 1, start);
        assert!(spin.is_animating(start));
        spin.sync(true, 1, start + Duration::from_millis(100));

        let later = start + Duration::from_secs(2);
        spin.tick(later);
        assert_eq!(spin.angle_at(later), 360.0);
        assert!(!spin.is_animating(later));

        spin.sync(false, 2, later);
        let done = later + Duration::from_secs(2);
        assert_eq!(spin.angle_at(done), 0.0);
    }
}
