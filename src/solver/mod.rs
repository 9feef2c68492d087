mod resolver;

pub use resolver::{
    resolve, resolve_friction, resolve_impulse, resolve_position, ContactSide, FRICTION_EPSILON,
};

/// Configuration for the contact solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Number of velocity solver iterations.
    ///
    /// Kept for configuration compatibility; the impulse pass runs once per
    /// pair and does not read it.
    pub velocity_iterations: usize,
    /// Number of position solver iterations
    pub position_iterations: usize,
    /// Fraction of the penetration beyond `slop` removed per iteration (0-1)
    pub correction_percent: f32,
    /// Allowed penetration slop
    pub slop: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            velocity_iterations: 8,
            position_iterations: 8,
            correction_percent: 0.8,
            slop: 0.05,
        }
    }
}

impl SolverConfig {
    /// Returns a copy with every field clamped into its valid range
    pub fn sanitized(&self) -> Self {
        Self {
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
            correction_percent: crate::math::utils::clamp01(self.correction_percent),
            slop: if self.slop.is_finite() {
                self.slop.max(0.0)
            } else {
                0.0
            },
        }
    }
}
