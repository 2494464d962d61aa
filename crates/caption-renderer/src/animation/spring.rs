//! Frame-stepped spring physics
//!
//! The spring is integrated from rest one frame at a time with a closed-form
//! step, so a value at frame `n` depends only on `n`, the frame rate and the
//! configuration. Preview and export therefore agree bit for bit.

/// Largest time step taken in one integration step, in milliseconds
const MAX_STEP_MS: f64 = 64.0;

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Damping coefficient
    pub damping: f64,
    /// Spring stiffness
    pub stiffness: f64,
    /// Attached mass
    pub mass: f64,
    /// Starting value
    pub from: f64,
    /// Resting value
    pub to: f64,
}

/// Configuration shared by every word entrance
pub const ENTRANCE_SPRING: SpringConfig = SpringConfig {
    damping: 100.0,
    stiffness: 100.0,
    mass: 1.0,
    from: 0.0,
    to: 1.0,
};

impl Default for SpringConfig {
    fn default() -> Self {
        ENTRANCE_SPRING
    }
}

#[derive(Debug, Clone, Copy)]
struct SpringState {
    position: f64,
    velocity: f64,
    last_ms: f64,
}

impl SpringConfig {
    /// Spring value at `frame`, no clamping. Negative frames return `from`.
    pub fn value_at(&self, frame: f64, fps: f64) -> f64 {
        let frame = frame.max(0.0);
        let whole_frames = frame.floor();
        let remainder = frame - whole_frames;

        let mut state = SpringState {
            position: self.from,
            velocity: 0.0,
            last_ms: 0.0,
        };

        let last = whole_frames as u64;
        for step in 0..=last {
            let mut t = step as f64;
            if step == last {
                t += remainder;
            }
            state = self.advance(state, t / fps * 1000.0);
        }
        state.position
    }

    fn advance(&self, state: SpringState, now_ms: f64) -> SpringState {
        let delta_ms = (now_ms - state.last_ms).min(MAX_STEP_MS);
        let t = delta_ms / 1000.0;

        let v0 = -state.velocity;
        let x0 = self.to - state.position;
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());
        let omega0 = (self.stiffness / self.mass).sqrt();

        let (position, velocity) = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let sin = (omega1 * t).sin();
            let cos = (omega1 * t).cos();
            let position = self.to
                - envelope * ((v0 + zeta * omega0 * x0) / omega1 * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope
                * (sin * (v0 + zeta * omega0 * x0) / omega1 + x0 * cos)
                - envelope * (cos * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin);
            (position, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = self.to - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        };

        SpringState {
            position,
            velocity,
            last_ms: now_ms,
        }
    }
}

/// Entrance progress for a word `frame` frames after its animation start
pub fn spring(frame: f64, fps: f64) -> f64 {
    ENTRANCE_SPRING.value_at(frame, fps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest() {
        assert_eq!(spring(0.0, 30.0), 0.0);
        assert_eq!(spring(-12.0, 30.0), 0.0);
    }

    #[test]
    fn settles_at_target() {
        let late = spring(120.0, 30.0);
        assert!((late - 1.0).abs() < 1e-6, "{late}");
    }

    #[test]
    fn heavily_damped_rise_is_monotonic() {
        let mut previous = spring(0.0, 30.0);
        for frame in 1..90 {
            let value = spring(f64::from(frame), 30.0);
            assert!(value >= previous - 1e-12, "frame {frame}: {value} < {previous}");
            assert!(value <= 1.0 + 1e-9);
            previous = value;
        }
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let bouncy = SpringConfig {
            damping: 5.0,
            ..ENTRANCE_SPRING
        };
        let peak = (0..60)
            .map(|frame| bouncy.value_at(f64::from(frame), 30.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn fractional_frames_fall_between_neighbours() {
        let a = spring(3.0, 30.0);
        let b = spring(3.5, 30.0);
        let c = spring(4.0, 30.0);
        assert!(a < b && b < c);
    }

    #[test]
    fn deterministic() {
        assert_eq!(spring(17.0, 29.97).to_bits(), spring(17.0, 29.97).to_bits());
    }
}
