//! How spheres look: flat colors, and materials lit by a point light.

use crate::math::{FreeCoordinate, Rgb, Vector3};

/// The surface of a [`Sphere`](crate::scene::Sphere).
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Appearance {
    /// A single color, unaffected by lighting.
    Flat(Rgb),
    /// Lit by the scene's [`Light`] using the Phong reflection model.
    Shaded(Material),
}

impl Appearance {
    /// The color to use when no lighting is available: the flat color, or the material's
    /// diffuse color.
    #[inline]
    pub fn base_color(&self) -> Rgb {
        match self {
            Appearance::Flat(color) => *color,
            Appearance::Shaded(material) => material.diffuse,
        }
    }
}

impl From<Rgb> for Appearance {
    #[inline]
    fn from(color: Rgb) -> Self {
        Appearance::Flat(color)
    }
}

impl From<Material> for Appearance {
    #[inline]
    fn from(material: Material) -> Self {
        Appearance::Shaded(material)
    }
}

/// Reflectance coefficients for the Phong reflection model.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Fraction of the light's ambient color reflected regardless of geometry.
    pub ambient: Rgb,
    /// Lambertian reflectance.
    pub diffuse: Rgb,
    /// Reflectance of the specular highlight.
    pub specular: Rgb,
    /// Phong exponent; larger values give smaller, sharper highlights.
    pub shininess: f32,
}

impl Material {
    /// A material with no highlight, whose ambient response is a fifth of its diffuse color.
    #[inline]
    pub fn matte(color: Rgb) -> Self {
        Self {
            ambient: color * 0.2,
            diffuse: color,
            specular: Rgb::ZERO,
            shininess: 1.0,
        }
    }

    /// A material with a white highlight of the given `shininess`.
    #[inline]
    pub fn glossy(color: Rgb, shininess: f32) -> Self {
        Self {
            specular: Rgb::from_luminance(0.6),
            shininess,
            ..Self::matte(color)
        }
    }

    /// Computes the color reflected toward `eye` from `point` on a surface with the given
    /// unit `normal`, lit by `light`. All positions must be in the same coordinate system.
    ///
    /// The result is clamped to the nominal range.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn illuminate(
        &self,
        light: &Light,
        point: Vector3<FreeCoordinate>,
        normal: Vector3<FreeCoordinate>,
        eye: Vector3<FreeCoordinate>,
    ) -> Rgb {
        let to_light = (light.position - point).norm();
        let lambert = normal.dot(to_light);

        let mut color = self.ambient * light.ambient;
        if lambert > 0.0 {
            color += self.diffuse * light.color * lambert as f32;

            let reflected = normal * (2.0 * lambert) - to_light;
            let to_eye = (eye - point).norm();
            let highlight = reflected.dot(to_eye).max(0.0).powf(f64::from(self.shininess));
            color += self.specular * light.color * highlight as f32;
        }
        color.clamp()
    }
}

/// A point light source.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Position of the light in world coordinates.
    pub position: Vector3<FreeCoordinate>,
    /// Color and intensity of the light reaching surfaces that face it.
    pub color: Rgb,
    /// Color and intensity of light reaching every surface.
    pub ambient: Rgb,
}
