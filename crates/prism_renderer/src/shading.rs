//! Recursive Whitted shading.
//!
//! Diffuse surfaces get Blinn-Phong local illumination from the point light
//! with a hard shadow test. Mirrors and dielectrics recurse along the
//! reflected and refracted directions until the depth budget runs out.

use crate::{HitRecord, Hittable, Material, MaterialArena, PointLight, Ray};
use prism_core::{FresnelModel, ShadingConfig};
use prism_math::optics::{fresnel, reflect, refract, schlick};
use prism_math::{Color, Interval, UnitVec3, Vec3};

/// Read-only state shared by every shading call of a render.
#[derive(Clone, Copy)]
pub struct ShadeContext<'a> {
    pub world: &'a dyn Hittable,
    pub materials: &'a MaterialArena,
    pub light: &'a PointLight,
    pub config: &'a ShadingConfig,
}

impl<'a> ShadeContext<'a> {
    /// Fraction of light reflected at the surface for the configured model.
    fn reflectance(&self, incident: UnitVec3, normal: UnitVec3, ior: f32) -> f32 {
        match self.config.fresnel {
            FresnelModel::Exact => fresnel(incident, normal, ior),
            FresnelModel::Schlick => schlick(incident, normal, ior),
        }
    }

    /// Range used for reflection, refraction and shadow rays.
    fn secondary_range(&self) -> Interval {
        Interval::from_min(self.config.epsilon)
    }
}

/// Color seen along `ray` restricted to `ray_t`.
///
/// `depth` is the remaining recursion budget; at zero the background is
/// returned without any intersection test.
pub fn ray_color(ray: &Ray, ray_t: Interval, depth: u32, ctx: &ShadeContext) -> Color {
    if depth == 0 {
        return ctx.config.background;
    }

    let Some(rec) = ctx.world.hit(ray, ray_t) else {
        return ctx.config.background;
    };
    let Some(incident) = UnitVec3::new(ray.direction()) else {
        return ctx.config.background;
    };

    match *ctx.materials.get(rec.material) {
        Material::Mirror { reflectance } => {
            let weight = ctx.reflectance(incident, rec.normal, ctx.config.mirror_ior);
            let reflected = reflected_ray(ray, incident, &rec);
            reflectance * weight * ray_color(&reflected, ctx.secondary_range(), depth - 1, ctx)
        }
        Material::Dielectric { ior } => shade_dielectric(ray, incident, &rec, ior, depth, ctx),
        Material::Diffuse {
            kd,
            ks,
            specular_exponent,
            texture,
        } => {
            let kd = ctx.materials.diffuse_color(kd, texture, rec.u, rec.v);
            shade_diffuse(ray, incident, &rec, kd, ks, specular_exponent, ctx)
        }
    }
}

fn reflected_ray(ray: &Ray, incident: UnitVec3, rec: &HitRecord) -> Ray {
    Ray::new(rec.point, reflect(incident.get(), rec.normal), ray.time())
}

fn shade_dielectric(
    ray: &Ray,
    incident: UnitVec3,
    rec: &HitRecord,
    ior: f32,
    depth: u32,
    ctx: &ShadeContext,
) -> Color {
    let reflected = reflected_ray(ray, incident, rec);
    let reflected_color = ray_color(&reflected, ctx.secondary_range(), depth - 1, ctx);

    let Some(direction) = refract(incident, rec.normal, ior) else {
        // Total internal reflection
        return reflected_color;
    };

    let refracted = Ray::new(rec.point, direction.get(), ray.time());
    let refracted_color = ray_color(&refracted, ctx.secondary_range(), depth - 1, ctx);

    let r = ctx.reflectance(incident, rec.normal, ior);
    r * reflected_color + (1.0 - r) * refracted_color
}

/// Ambient, plus diffuse and specular when the light is visible.
fn shade_diffuse(
    ray: &Ray,
    incident: UnitVec3,
    rec: &HitRecord,
    kd: Color,
    ks: Color,
    specular_exponent: f32,
    ctx: &ShadeContext,
) -> Color {
    let intensity = ctx.light.intensity;
    let ambient = ctx.config.ambient_strength * intensity * kd;

    // Back faces of single-sided surfaces keep the outward normal and end
    // up unlit
    let normal = if rec.double_sided && incident.dot(*rec.normal) > 0.0 {
        -rec.normal
    } else {
        rec.normal
    };

    let to_light = ctx.light.position - rec.point;
    let light_distance = to_light.length();
    let Some(light_dir) = UnitVec3::new(to_light) else {
        return ambient;
    };

    let shadow_ray = Ray::new(rec.point, light_dir.get(), ray.time());
    let shadow_range = ctx.secondary_range().with_max(light_distance);
    if ctx.world.hit(&shadow_ray, shadow_range).is_some() {
        return ambient;
    }

    let n_dot_l = normal.dot(*light_dir);
    if n_dot_l <= 0.0 {
        return ambient;
    }

    let diffuse = intensity * n_dot_l * kd;
    let specular = match UnitVec3::new(light_dir.get() - incident.get()) {
        Some(half) => intensity * normal.dot(*half).max(0.0).powf(specular_exponent) * ks,
        None => Vec3::ZERO,
    };

    ambient + diffuse + specular
}
