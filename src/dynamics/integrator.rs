use crate::math::Vec2;

use super::rigid_body::RigidBody;

/// Drag is scaled by this factor per second of simulated time
const DRAG_RATE: f32 = 10.0;

/// Displacement produced by one integration step, to be written to the
/// owning entity's transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub translation: Vec2,
    pub rotation: f32,
}

impl Motion {
    pub const ZERO: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Returns true if the motion moves nothing
    pub fn is_zero(&self) -> bool {
        self.translation == Vec2::ZERO && self.rotation == 0.0
    }
}

/// Speed limits applied after each integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub max_speed: f32,
    pub max_angular_speed: f32,
}

/// Semi-implicit Euler step for one body.
///
/// Only enabled, awake, dynamic bodies move; everything else returns
/// [`Motion::ZERO`]. Accumulated force and torque are consumed.
pub fn integrate(body: &mut RigidBody, gravity: Vec2, dt: f32, limits: SpeedLimits) -> Motion {
    if !body.is_simulated() || dt <= 0.0 {
        return Motion::ZERO;
    }

    if body.use_gravity {
        body.accumulate_force(gravity * body.gravity_scale * body.mass());
    }

    // Linear
    let acceleration = body.force() * body.inverse_mass();
    let mut velocity = body.velocity() + acceleration * dt;
    velocity *= damping(body.drag(), dt);
    velocity = velocity.clamp_length(limits.max_speed);

    // Angular; torque is scaled by inverse mass, there is no inertia tensor
    let mut angular_velocity = body.angular_velocity() + body.torque() * body.inverse_mass() * dt;
    angular_velocity *= damping(body.angular_drag(), dt);
    angular_velocity = angular_velocity.clamp(-limits.max_angular_speed, limits.max_angular_speed);

    body.set_motion(velocity, angular_velocity);
    body.clear_forces();

    Motion {
        translation: velocity * dt,
        rotation: angular_velocity * dt,
    }
}

#[inline]
fn damping(drag: f32, dt: f32) -> f32 {
    (1.0 - drag * dt * DRAG_RATE).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::RigidBodyDesc;
    use crate::entity::EntityHandle;

    const LIMITS: SpeedLimits = SpeedLimits {
        max_speed: 2000.0,
        max_angular_speed: 50.0,
    };
    const DT: f32 = 1.0 / 60.0;

    fn body(desc: RigidBodyDesc) -> RigidBody {
        RigidBody::new(EntityHandle::new(0, 0), &desc)
    }

    #[test]
    fn test_gravity_integration() {
        let mut b = body(RigidBodyDesc::dynamic().with_mass(3.0));
        let motion = integrate(&mut b, Vec2::new(0.0, 600.0), DT, LIMITS);

        assert!((b.velocity().y - 10.0).abs() < 1e-4);
        assert!((motion.translation.y - 10.0 * DT).abs() < 1e-5);
        assert_eq!(b.force(), Vec2::ZERO);
    }

    #[test]
    fn test_gravity_scale_and_toggle() {
        let mut half = body(RigidBodyDesc::dynamic().with_gravity_scale(0.5));
        integrate(&mut half, Vec2::new(0.0, 600.0), DT, LIMITS);
        assert!((half.velocity().y - 5.0).abs() < 1e-4);

        let mut off = body(RigidBodyDesc::dynamic().with_gravity(false));
        let motion = integrate(&mut off, Vec2::new(0.0, 600.0), DT, LIMITS);
        assert!(motion.is_zero());
    }

    #[test]
    fn test_drag_damps_velocity() {
        let mut b = body(
            RigidBodyDesc::dynamic()
                .with_gravity(false)
                .with_drag(0.6)
                .with_velocity(Vec2::new(100.0, 0.0)),
        );
        integrate(&mut b, Vec2::ZERO, DT, LIMITS);
        // 1 - 0.6 * (1/60) * 10 = 0.9
        assert!((b.velocity().x - 90.0).abs() < 1e-3);

        // Drag can stop a body but never reverse it
        let mut b = body(
            RigidBodyDesc::dynamic()
                .with_gravity(false)
                .with_drag(1.0)
                .with_velocity(Vec2::new(100.0, 0.0)),
        );
        integrate(&mut b, Vec2::ZERO, 0.5, LIMITS);
        assert_eq!(b.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut b = body(RigidBodyDesc::dynamic().with_gravity(false));
        b.add_impulse(Vec2::new(1.0e6, 0.0));
        let motion = integrate(&mut b, Vec2::ZERO, DT, LIMITS);

        assert!((b.velocity().length() - LIMITS.max_speed).abs() < 1e-2);
        assert!((motion.translation.x - LIMITS.max_speed * DT).abs() < 1e-3);
    }

    #[test]
    fn test_torque_uses_inverse_mass() {
        let mut b = body(
            RigidBodyDesc::dynamic()
                .with_gravity(false)
                .with_mass(2.0)
                .with_angular_drag(0.0),
        );
        b.add_torque(120.0);
        let motion = integrate(&mut b, Vec2::ZERO, DT, LIMITS);

        assert!((b.angular_velocity() - 1.0).abs() < 1e-4);
        assert!((motion.rotation - DT).abs() < 1e-5);
        assert_eq!(b.torque(), 0.0);
    }

    #[test]
    fn test_non_dynamic_or_sleeping_bodies_do_not_move() {
        let mut fixed = body(RigidBodyDesc::fixed());
        assert!(integrate(&mut fixed, Vec2::new(0.0, 980.0), DT, LIMITS).is_zero());

        let mut kinematic = body(RigidBodyDesc::kinematic());
        kinematic.set_velocity(Vec2::X);
        assert!(integrate(&mut kinematic, Vec2::new(0.0, 980.0), DT, LIMITS).is_zero());
        assert_eq!(kinematic.velocity(), Vec2::X);

        let mut sleeping = body(RigidBodyDesc::dynamic());
        sleeping.sleep();
        assert!(integrate(&mut sleeping, Vec2::new(0.0, 980.0), DT, LIMITS).is_zero());
        assert!(sleeping.is_sleeping());

        let mut disabled = body(RigidBodyDesc::dynamic().with_enabled(false));
        assert!(integrate(&mut disabled, Vec2::new(0.0, 980.0), DT, LIMITS).is_zero());
    }

    #[test]
    fn test_gravity_does_not_reset_sleep_timer() {
        let mut resting = body(RigidBodyDesc::dynamic());
        let mut last_timer = 0.0;
        for _ in 0..20 {
            integrate(&mut resting, Vec2::new(0.0, 980.0), DT, LIMITS);
            // Contact cancels what gravity added
            resting.set_motion(Vec2::ZERO, 0.0);
            resting.update_sleep(DT, 5.0, 0.1, 0.5);
            assert!(resting.sleep_timer() > last_timer);
            last_timer = resting.sleep_timer();
        }

        for _ in 0..20 {
            integrate(&mut resting, Vec2::new(0.0, 980.0), DT, LIMITS);
            resting.set_motion(Vec2::ZERO, 0.0);
            resting.update_sleep(DT, 5.0, 0.1, 0.5);
        }
        assert!(resting.is_sleeping());
        assert_eq!(resting.velocity(), Vec2::ZERO);
        assert!(integrate(&mut resting, Vec2::new(0.0, 980.0), DT, LIMITS).is_zero());
        assert!(resting.is_sleeping());
    }
}
