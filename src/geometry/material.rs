use crate::math::utils::{at_least, clamp01};

/// Smallest density a material can hold
pub const MIN_DENSITY: f32 = 1e-4;

/// Surface properties of a shape: friction, restitution and density.
///
/// Every value is clamped when written, so a `Material` is always valid.
/// It is a plain value; shapes that should "share" a material each hold a copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    friction: f32,
    restitution: f32,
    density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.4,
            restitution: 0.0,
            density: 1.0,
        }
    }
}

impl Material {
    /// Creates a material, clamping friction and restitution into [0, 1]
    /// and density to at least [`MIN_DENSITY`].
    pub fn new(friction: f32, restitution: f32, density: f32) -> Self {
        Self {
            friction: clamp01(friction),
            restitution: clamp01(restitution),
            density: at_least(density, MIN_DENSITY),
        }
    }

    /// A frictionless material that keeps `restitution` of the impact speed
    pub fn bouncy(restitution: f32) -> Self {
        Self::new(0.0, restitution, 1.0)
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn set_friction(&mut self, friction: f32) {
        self.friction = clamp01(friction);
    }

    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = clamp01(restitution);
    }

    pub fn set_density(&mut self, density: f32) {
        self.density = at_least(density, MIN_DENSITY);
    }

    /// Sets friction (builder style)
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.set_friction(friction);
        self
    }

    /// Sets restitution (builder style)
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.set_restitution(restitution);
        self
    }

    /// Sets density (builder style)
    pub fn with_density(mut self, density: f32) -> Self {
        self.set_density(density);
        self
    }

    /// Geometric mean of two friction coefficients
    #[inline]
    pub fn combined_friction(&self, other: &Material) -> f32 {
        (self.friction * other.friction).sqrt()
    }

    /// The less bouncy of two restitutions
    #[inline]
    pub fn combined_restitution(&self, other: &Material) -> f32 {
        self.restitution.min(other.restitution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_clamped() {
        let m = Material::new(1.5, -0.2, -3.0);
        assert_eq!(m.friction(), 1.0);
        assert_eq!(m.restitution(), 0.0);
        assert_eq!(m.density(), MIN_DENSITY);

        let mut m = Material::default();
        m.set_restitution(2.0);
        m.set_friction(f32::NAN);
        assert_eq!(m.restitution(), 1.0);
        assert_eq!(m.friction(), 0.0);
    }

    #[test]
    fn test_combine_rules() {
        let a = Material::new(0.25, 0.9, 1.0);
        let b = Material::new(1.0, 0.3, 1.0);
        assert!((a.combined_friction(&b) - 0.5).abs() < 1e-6);
        assert_eq!(a.combined_restitution(&b), 0.3);
    }
}
