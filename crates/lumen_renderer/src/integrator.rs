//! Radiance estimation for camera rays.
//!
//! Direct light is sampled explicitly; indirect and caustic light come from
//! photon density estimates. Glass is followed with an explicit work stack
//! instead of recursion.

use std::f32::consts::PI;

use lumen_math::{Color, Ray, Vec3};
use lumen_scene::{Scene, Surface, SurfaceId};
use rand::RngCore;

use crate::config::RenderConfig;
use crate::hittable::{closest_hit, surface_normal};
use crate::kdtree::PhotonIndex;
use crate::material::{face_forward, lambertian_brdf, reflected_ray, transmitted_ray, Ior};
use crate::sampling::{offset_ray_origin, sample_light_point};

/// Radiance returned for camera rays that hit the light directly.
pub const EMITTER_RADIANCE: Color = Color::ONE;

/// How photon estimates are weighted for one camera-ray sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gather {
    /// Gather once with weight 1.
    Single,
    /// Gather once on behalf of every sample of the pixel.
    Scaled(u32),
    /// Direct light only; another sample already gathered.
    Skip,
}

impl Gather {
    /// Gathering mode for sample `index` of a pixel taking `spp` samples.
    ///
    /// By default only the first sample gathers, scaled up so the pixel
    /// average keeps the right magnitude.
    pub fn for_sample(index: u32, spp: u32, each_sample: bool) -> Self {
        match (each_sample, index) {
            (true, _) => Gather::Single,
            (false, 0) => Gather::Scaled(spp),
            (false, _) => Gather::Skip,
        }
    }

    /// Weight applied to photon estimates.
    pub fn weight(self) -> f32 {
        match self {
            Gather::Single => 1.0,
            Gather::Scaled(spp) => spp as f32,
            Gather::Skip => 0.0,
        }
    }
}

/// Pending piece of a camera path: a ray, the weight of its contribution,
/// whether it travels inside glass and how many specular events led to it.
#[derive(Debug, Clone, Copy)]
struct Branch {
    ray: Ray,
    weight: f32,
    inside: bool,
    depth: u32,
}

/// Photon density estimate at `point` on `surface`.
///
/// Sums the power of the `k` nearest photons on the same surface over the
/// disc they cover. Returns zero when no photon matches.
pub fn density_estimate(
    index: &PhotonIndex<'_>,
    point: Vec3,
    surface: SurfaceId,
    k: usize,
    brdf: Color,
) -> Color {
    let neighbors = index.locate(point, k, surface);
    let radius = match neighbors.radius() {
        Some(r) if r > 0.0 => r,
        _ => return Color::ZERO,
    };

    let photons = index.photons();
    let flux: Color = neighbors.iter().map(|n| photons[n.photon].power).sum();
    flux * brdf / (PI * radius * radius)
}

/// Shading context: the scene plus both photon indices.
pub struct Integrator<'a> {
    scene: &'a Scene,
    diffuse: PhotonIndex<'a>,
    caustic: PhotonIndex<'a>,
    k_neighbors: usize,
    max_depth: u32,
    specular_reflectance: f32,
    ior: Ior,
}

impl<'a> Integrator<'a> {
    pub fn new(
        scene: &'a Scene,
        diffuse: PhotonIndex<'a>,
        caustic: PhotonIndex<'a>,
        config: &RenderConfig,
    ) -> Self {
        Self {
            scene,
            diffuse,
            caustic,
            k_neighbors: config.k_neighbors,
            max_depth: config.max_specular_depth,
            specular_reflectance: config.specular_reflectance,
            ior: config.ior(),
        }
    }

    /// Radiance arriving along `ray`.
    pub fn shade(&self, ray: Ray, gather: Gather, rng: &mut dyn RngCore) -> Color {
        let mut radiance = Color::ZERO;
        let mut stack = vec![Branch {
            ray,
            weight: 1.0,
            inside: false,
            depth: 0,
        }];

        while let Some(branch) = stack.pop() {
            if branch.depth > self.max_depth {
                continue;
            }
            let Some(hit) = closest_hit(&branch.ray, &self.scene.primitives) else {
                continue;
            };
            if self.scene.is_emitter(hit.primitive) {
                radiance += branch.weight * EMITTER_RADIANCE;
                continue;
            }

            let point = branch.ray.at(hit.t);
            let normal = surface_normal(self.scene, hit.primitive, point);
            let surface_id = self.scene.primitives[hit.primitive].surface;

            match *self.scene.surface_of(hit.primitive) {
                Surface::Dielectric { .. } => {
                    let direction = branch.ray.direction;
                    if !branch.inside && self.specular_reflectance > 0.0 {
                        stack.push(Branch {
                            ray: reflected_ray(point, direction, normal),
                            weight: branch.weight * self.specular_reflectance,
                            inside: false,
                            depth: branch.depth + 1,
                        });
                    }
                    let (ray, crossed) = transmitted_ray(point, direction, normal, &self.ior);
                    stack.push(Branch {
                        ray,
                        weight: branch.weight,
                        inside: branch.inside != crossed,
                        depth: branch.depth + 1,
                    });
                }
                Surface::Lambertian { albedo, .. } => {
                    let (facing, _) = face_forward(normal, branch.ray.direction);
                    let origin = offset_ray_origin(point, facing);
                    radiance += branch.weight
                        * self.diffuse_radiance(origin, facing, surface_id, albedo, gather, rng);
                }
            }
        }

        radiance
    }

    /// Outgoing radiance at a diffuse point, `normal` facing the viewer.
    fn diffuse_radiance(
        &self,
        point: Vec3,
        normal: Vec3,
        surface: SurfaceId,
        albedo: Color,
        gather: Gather,
        rng: &mut dyn RngCore,
    ) -> Color {
        let brdf = lambertian_brdf(albedo);
        let mut radiance = self.direct(point, normal, brdf, rng);

        let weight = gather.weight();
        if weight > 0.0 {
            let indirect = density_estimate(&self.diffuse, point, surface, self.k_neighbors, brdf);
            let caustic = density_estimate(&self.caustic, point, surface, self.k_neighbors, brdf);
            radiance += weight * (indirect + caustic);
        }
        radiance
    }

    /// One-sample estimate of direct light from the area light.
    pub fn direct(&self, point: Vec3, normal: Vec3, brdf: Color, rng: &mut dyn RngCore) -> Color {
        let light = &self.scene.light;
        let target = sample_light_point(light, rng);
        let shadow = Ray::towards(point, target);

        match closest_hit(&shadow, &self.scene.primitives) {
            Some(hit) if self.scene.is_emitter(hit.primitive) => {}
            _ => return Color::ZERO,
        }

        let cos_light = -shadow.direction.dot(light.normal);
        if cos_light <= 0.0 {
            return Color::ZERO;
        }
        let cos_surface = shadow.direction.dot(normal).max(0.0);
        let pdf = point.distance_squared(target) / (light.area() * cos_light);

        brdf * light.radiance() * cos_surface / pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photon::Photon;
    use crate::test_scenes::{self, FLOOR};
    use crate::transport::PhotonTracer;
    use lumen_math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn no_photons<'a>() -> PhotonIndex<'a> {
        PhotonIndex::build(&[])
    }

    /// Irradiance at `point` (normal +Z) from a cosine emitter, by midpoint
    /// quadrature over the light rectangle.
    fn irradiance_from_light(scene: &Scene, point: Vec3) -> f32 {
        let light = scene.light;
        let radiance = light.power / (PI * light.area());
        let n = 200;
        let cell = Vec2::new(light.size.x / n as f32, light.size.y / n as f32);
        let mut irradiance = 0.0;
        for i in 0..n {
            for j in 0..n {
                let u = (i as f32 + 0.5) / n as f32;
                let v = (j as f32 + 0.5) / n as f32;
                let d = light.point_at(u, v) - point;
                let r2 = d.length_squared();
                let dir = d / r2.sqrt();
                let cos_surface = dir.z;
                let cos_light = -dir.dot(light.normal);
                irradiance += radiance * cos_surface * cos_light / r2 * cell.x * cell.y;
            }
        }
        irradiance
    }

    #[test]
    fn test_gather_modes() {
        assert_eq!(Gather::for_sample(0, 16, false), Gather::Scaled(16));
        assert_eq!(Gather::for_sample(3, 16, false), Gather::Skip);
        assert_eq!(Gather::for_sample(0, 16, true), Gather::Single);
        assert_eq!(Gather::for_sample(7, 16, true), Gather::Single);
        assert_eq!(Gather::Scaled(16).weight(), 16.0);
        assert_eq!(Gather::Single.weight(), 1.0);
        assert_eq!(Gather::Skip.weight(), 0.0);
    }

    #[test]
    fn test_density_estimate_on_uniform_grid() {
        // 1 photon of power 1 per unit area gives flux density 1.
        let mut photons = Vec::new();
        for i in -20..=20 {
            for j in -20..=20 {
                photons.push(Photon {
                    position: Vec3::new(i as f32 * 0.1, j as f32 * 0.1, 0.0),
                    direction: Vec3::Z,
                    power: Color::splat(0.01),
                    surface: FLOOR,
                });
            }
        }
        let index = PhotonIndex::build(&photons);
        let estimate = density_estimate(&index, Vec3::new(0.05, 0.05, 0.0), FLOOR, 200, Color::ONE);
        assert!((estimate.x - 1.0).abs() < 0.15, "estimate {}", estimate.x);

        // Photons on another surface are invisible.
        let other = density_estimate(&index, Vec3::ZERO, FLOOR + 1, 200, Color::ONE);
        assert_eq!(other, Color::ZERO);
    }

    #[test]
    fn test_miss_is_black_and_light_is_white() {
        let scene = test_scenes::glass_over_floor();
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, no_photons(), no_photons(), &config);
        let mut rng = StdRng::seed_from_u64(42);

        let up = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        assert_eq!(integrator.shade(up, Gather::Single, &mut rng), Color::ZERO);

        let at_light = Ray::new(Vec3::new(0.01, 0.03, 0.9), Vec3::Z);
        assert_eq!(integrator.shade(at_light, Gather::Single, &mut rng), EMITTER_RADIANCE);
    }

    #[test]
    fn test_direct_light_matches_quadrature() {
        let scene = test_scenes::glass_over_floor();
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, no_photons(), no_photons(), &config);
        let mut rng = StdRng::seed_from_u64(42);

        // Off to the side so the sphere does not shadow the point.
        let point = Vec3::new(0.6, 0.0, 0.0);
        let brdf = lambertian_brdf(Color::splat(0.8));
        let samples = 20_000;
        let mut sum = Color::ZERO;
        for _ in 0..samples {
            sum += integrator.direct(point + Vec3::Z * 1e-3, Vec3::Z, brdf, &mut rng);
        }
        let estimate = sum.x / samples as f32;

        // `direct` spreads power over area only, so it sees pi times the
        // radiance of a cosine emitter of the same power.
        let expected = brdf.x * PI * irradiance_from_light(&scene, point);
        assert!((estimate - expected).abs() < 0.05 * expected, "{estimate} vs {expected}");
    }

    #[test]
    fn test_point_behind_glass_sphere_is_shadowed() {
        let scene = test_scenes::glass_over_floor();
        let config = RenderConfig::default();
        let integrator = Integrator::new(&scene, no_photons(), no_photons(), &config);
        let mut rng = StdRng::seed_from_u64(42);

        let brdf = lambertian_brdf(Color::ONE);
        for _ in 0..100 {
            let direct = integrator.direct(Vec3::new(0.0, 0.0, 1e-3), Vec3::Z, brdf, &mut rng);
            assert_eq!(direct, Color::ZERO);
        }
    }

    /// Straight down onto the top of the sphere in `glass_over_floor`. The
    /// mirror ray goes back up into the light; the refracted ray lands on
    /// the floor in the sphere's shadow.
    fn onto_glass() -> Ray {
        Ray::new(Vec3::new(0.001, 0.003, 0.8), -Vec3::Z)
    }

    fn shade_glass(config: &RenderConfig) -> Color {
        let scene = test_scenes::glass_over_floor();
        let integrator = Integrator::new(&scene, no_photons(), no_photons(), config);
        let mut rng = StdRng::seed_from_u64(42);
        integrator.shade(onto_glass(), Gather::Single, &mut rng)
    }

    #[test]
    fn test_glass_adds_weighted_mirror_branch() {
        let shade = |specular_reflectance| {
            shade_glass(&RenderConfig {
                specular_reflectance,
                ..RenderConfig::default()
            })
        };

        let without = shade(0.0);
        assert_eq!(without, Color::ZERO);
        for reflectance in [0.05, 0.5] {
            let with = shade(reflectance);
            let expected = reflectance * EMITTER_RADIANCE;
            assert!((with - without - expected).abs().max_element() < 1e-6, "{with}");
        }
    }

    #[test]
    fn test_glass_reflects_only_on_entry() {
        // A mirror branch at the exit would send a second full-weight ray
        // up through the sphere into the light.
        let radiance = shade_glass(&RenderConfig {
            specular_reflectance: 1.0,
            ..RenderConfig::default()
        });
        assert!((radiance - EMITTER_RADIANCE).abs().max_element() < 1e-6, "{radiance}");
    }

    #[test]
    fn test_specular_depth_cap() {
        let capped = |max_specular_depth| {
            shade_glass(&RenderConfig {
                max_specular_depth,
                ..RenderConfig::default()
            })
        };
        assert_eq!(capped(0), Color::ZERO);
        // One event is enough for the entry reflection to reach the light.
        assert!((capped(1).x - 0.05).abs() < 1e-6);

        // Diffuse surfaces seen directly are shaded even without specular
        // events.
        let scene = test_scenes::glass_over_floor();
        let config = RenderConfig {
            max_specular_depth: 0,
            ..RenderConfig::default()
        };
        let integrator = Integrator::new(&scene, no_photons(), no_photons(), &config);
        let mut rng = StdRng::seed_from_u64(42);
        let beside = Ray::new(Vec3::new(0.6, 0.03, 0.5), -Vec3::Z);
        assert!(integrator.shade(beside, Gather::Single, &mut rng).x > 0.0);
    }

    #[test]
    fn test_skip_gather_ignores_photons() {
        let scene = test_scenes::floor_under_light(0.8, 0.5);
        let config = RenderConfig {
            photon_count: 5000,
            store_direct_photons: true,
            k_neighbors: 50,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let (maps, _) = PhotonTracer::new(&scene, &config).trace_photons(&mut rng);
        let integrator = Integrator::new(
            &scene,
            PhotonIndex::build(&maps.diffuse),
            PhotonIndex::build(&maps.caustic),
            &config,
        );

        // The light is not geometry in this scene, so direct light is black
        // and only photons contribute.
        let down = Ray::new(Vec3::new(0.01, 0.03, 0.25), -Vec3::Z);
        assert_eq!(integrator.shade(down, Gather::Skip, &mut rng), Color::ZERO);
        let single = integrator.shade(down, Gather::Single, &mut rng);
        let scaled = integrator.shade(down, Gather::Scaled(4), &mut rng);
        assert!(single.x > 0.0);
        assert!((scaled.x - 4.0 * single.x).abs() < 1e-4 * scaled.x);
    }

    #[test]
    fn test_floor_estimate_matches_analytic_irradiance() {
        let albedo = 0.8;
        let scene = test_scenes::floor_under_light(albedo, 0.5);
        let config = RenderConfig {
            photon_count: 200_000,
            k_neighbors: 800,
            store_direct_photons: true,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let (maps, _) = PhotonTracer::new(&scene, &config).trace_photons(&mut rng);
        let index = PhotonIndex::build(&maps.diffuse);

        let point = Vec3::ZERO;
        let brdf = lambertian_brdf(Color::splat(albedo));
        let estimate = density_estimate(&index, point, FLOOR, config.k_neighbors, brdf);
        let expected = albedo / PI * irradiance_from_light(&scene, point);
        assert!((estimate.x - expected).abs() < 0.1 * expected, "{} vs {expected}", estimate.x);
    }

    #[test]
    fn test_glass_refraction_reaches_floor() {
        let scene = test_scenes::glass_over_floor();
        let config = RenderConfig {
            photon_count: 20_000,
            k_neighbors: 50,
            specular_reflectance: 0.0,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let (maps, _) = PhotonTracer::new(&scene, &config).trace_photons(&mut rng);
        let integrator = Integrator::new(
            &scene,
            PhotonIndex::build(&maps.diffuse),
            PhotonIndex::build(&maps.caustic),
            &config,
        );

        // Straight down through the centre of the sphere onto the caustic.
        let down = Ray::new(Vec3::new(0.01, 0.03, 0.8), -Vec3::Z);
        let radiance = integrator.shade(down, Gather::Single, &mut rng);
        assert!(radiance.x > 0.0);
    }
}
