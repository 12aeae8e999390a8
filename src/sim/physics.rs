//! Body integration
//!
//! Semi-implicit Euler under constant gravity, plus the idle bob used while
//! waiting for the first flap.

use super::state::Body;
use crate::tuning::Tuning;

/// Display tilt for a vertical velocity; monotonic and clamped
#[inline]
pub fn rotation_for(tuning: &Tuning, velocity: f32) -> f32 {
    (velocity / tuning.rotation_velocity_scale).clamp(tuning.min_rotation, tuning.max_rotation)
}

/// Advance the body by `dt` seconds under the tuned gravity
pub fn integrate(body: &mut Body, tuning: &Tuning, dt: f32) {
    body.velocity += tuning.gravity * dt;
    body.rotation = rotation_for(tuning, body.velocity);
    body.y += body.velocity * dt;
}

/// Place the body on its idle bob for the given ready-state time.
///
/// Position is a pure function of `idle_time`; velocity is pinned at zero so
/// nothing carries into the first flap.
pub fn idle_bob(body: &mut Body, tuning: &Tuning, idle_time: f32) {
    let t_ms = idle_time * 1000.0;
    let bob = (t_ms / tuning.idle_bob_period_ms).sin() * tuning.idle_bob_amplitude;
    body.y = tuning.rest_y() + bob;
    body.velocity = 0.0;
    body.rotation = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{IDLE_BOB_AMPLITUDE, MAX_ROTATION, MIN_ROTATION};

    #[test]
    fn test_integrate_falls() {
        let tuning = Tuning::default();
        let mut body = Body::new(&tuning);
        let y0 = body.y;
        integrate(&mut body, &tuning, 0.1);
        assert!((body.velocity - 120.0).abs() < 1e-4);
        // Position uses the updated velocity
        assert!((body.y - (y0 + 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_clamped_and_monotonic() {
        let tuning = Tuning::default();
        assert_eq!(rotation_for(&tuning, -10_000.0), MIN_ROTATION);
        assert_eq!(rotation_for(&tuning, 10_000.0), MAX_ROTATION);
        assert_eq!(rotation_for(&tuning, 0.0), 0.0);

        let mut prev = f32::NEG_INFINITY;
        for v in (-1000..=1000).step_by(25) {
            let r = rotation_for(&tuning, v as f32);
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_idle_bob_bounded() {
        let tuning = Tuning::default();
        let mut body = Body::new(&tuning);
        body.velocity = 99.0;
        for i in 0..500 {
            idle_bob(&mut body, &tuning, i as f32 * 0.013);
            assert!((body.y - tuning.rest_y()).abs() <= IDLE_BOB_AMPLITUDE + 1e-4);
            assert_eq!(body.velocity, 0.0);
            assert_eq!(body.rotation, 0.0);
        }
    }

    #[test]
    fn test_tuned_bob_and_tilt() {
        let tuning = Tuning {
            idle_bob_amplitude: 2.0,
            max_rotation: 0.1,
            ..Default::default()
        };
        let mut body = Body::new(&tuning);
        for i in 0..200 {
            idle_bob(&mut body, &tuning, i as f32 * 0.017);
            assert!((body.y - tuning.rest_y()).abs() <= 2.0 + 1e-4);
        }
        assert_eq!(rotation_for(&tuning, 400.0), 0.1);
    }
}
