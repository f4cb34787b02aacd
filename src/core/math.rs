// Math utilities and helper functions

use glam::Vec2;

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Step `current` toward `target` by at most `max_step`, landing exactly on
/// the target once it is within reach
pub fn move_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + delta.signum() * max_step
    }
}

/// Velocity vector for a speed and a heading in degrees
/// (0 = +x, 90 = +y, counter-clockwise)
pub fn motion_vector(speed: f32, angle_degrees: f32) -> Vec2 {
    Vec2::from_angle(angle_degrees.to_radians()) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_move_towards_partial_step() {
        assert_eq!(move_towards(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_towards(10.0, 0.0, 3.0), 7.0);
    }

    #[test]
    fn test_move_towards_snaps_to_target() {
        assert_eq!(move_towards(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_towards(10.0, 10.0, 3.0), 10.0);
    }

    #[test]
    fn test_motion_vector_headings() {
        let right = motion_vector(200.0, 0.0);
        assert_abs_diff_eq!(right.x, 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(right.y, 0.0, epsilon = 1e-3);

        let left = motion_vector(200.0, 180.0);
        assert_abs_diff_eq!(left.x, -200.0, epsilon = 1e-3);

        let down = motion_vector(700.0, 270.0);
        assert_abs_diff_eq!(down.y, -700.0, epsilon = 1e-3);
    }
}
