//! Photon transport: shoots photons from the light and records where they
//! land on diffuse surfaces.

use lumen_math::{Color, Ray};
use lumen_scene::{Scene, Surface};
use rand::RngCore;

use crate::config::RenderConfig;
use crate::hittable::{closest_hit, surface_normal};
use crate::material::{face_forward, transmitted_ray, Ior};
use crate::photon::{total_power, Photon, PhotonMaps, Store};
use crate::sampling::{gen_f32, offset_ray_origin, sample_cosine_direction, sample_light_point};

/// Counters collected while tracing photons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Photons emitted from the light
    pub emitted: usize,
    /// Photons recorded in the diffuse map
    pub stored_diffuse: usize,
    /// Photons recorded in the caustic map
    pub stored_caustic: usize,
    /// Paths that left the scene
    pub escaped: usize,
    /// Paths terminated by Russian roulette
    pub absorbed: usize,
    /// Paths cut off by the bounce cap
    pub truncated: usize,
}

/// How a photon path ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    Escaped,
    Absorbed,
    Truncated,
}

/// Per-path state while a photon is in flight.
struct PathState {
    ray: Ray,
    power: Color,
    has_diffused: bool,
    has_caustic_bounced: bool,
}

/// Photon tracer over one scene.
pub struct PhotonTracer<'a> {
    scene: &'a Scene,
    photon_count: usize,
    max_bounces: u32,
    store_direct: bool,
    ior: Ior,
}

impl<'a> PhotonTracer<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            photon_count: config.photon_count,
            max_bounces: config.max_photon_bounces,
            store_direct: config.store_direct_photons,
            ior: config.ior(),
        }
    }

    /// Sample one photon leaving the light: its ray and its power.
    ///
    /// Positions are uniform over the rectangle, directions cosine-weighted
    /// about the light normal, and the light's power is split evenly over
    /// all photons.
    pub fn emit(&self, rng: &mut dyn RngCore) -> (Ray, Color) {
        let light = &self.scene.light;
        let position = sample_light_point(light, rng);
        let direction = sample_cosine_direction(light.normal, rng);
        let origin = offset_ray_origin(position, light.normal);
        let power = Color::splat(light.power / self.photon_count as f32);
        (Ray::new(origin, direction), power)
    }

    /// Emit and trace every photon, filling both photon maps.
    pub fn trace_photons(&self, rng: &mut dyn RngCore) -> (PhotonMaps, TransportStats) {
        let mut maps = PhotonMaps::default();
        let mut stats = TransportStats::default();

        for i in 0..self.photon_count {
            if i > 0 && i % 100_000 == 0 {
                log::debug!("Traced {}/{} photons", i, self.photon_count);
            }

            let (ray, power) = self.emit(rng);
            stats.emitted += 1;
            match self.trace_path(ray, power, &mut maps, rng) {
                PathEnd::Escaped => stats.escaped += 1,
                PathEnd::Absorbed => stats.absorbed += 1,
                PathEnd::Truncated => stats.truncated += 1,
            }
        }

        stats.stored_diffuse = maps.diffuse.len();
        stats.stored_caustic = maps.caustic.len();
        log::info!(
            "Traced {} photons: {} diffuse, {} caustic stored \
             ({} escaped, {} absorbed, {} truncated)",
            stats.emitted,
            stats.stored_diffuse,
            stats.stored_caustic,
            stats.escaped,
            stats.absorbed,
            stats.truncated
        );
        log::debug!(
            "Stored power: {} diffuse, {} caustic",
            total_power(&maps.diffuse),
            total_power(&maps.caustic)
        );

        (maps, stats)
    }

    /// Follow a single photon until it escapes, is absorbed or runs out of
    /// bounces, recording it on every diffuse surface it lands on.
    pub fn trace_path(
        &self,
        ray: Ray,
        power: Color,
        maps: &mut PhotonMaps,
        rng: &mut dyn RngCore,
    ) -> PathEnd {
        let mut path = PathState {
            ray,
            power,
            has_diffused: false,
            has_caustic_bounced: false,
        };

        for _ in 0..self.max_bounces {
            let Some(hit) = closest_hit(&path.ray, &self.scene.primitives) else {
                return PathEnd::Escaped;
            };
            let point = path.ray.at(hit.t);
            let normal = surface_normal(self.scene, hit.primitive, point);
            let surface_id = self.scene.primitives[hit.primitive].surface;

            match *self.scene.surface_of(hit.primitive) {
                Surface::Lambertian { albedo, .. } => {
                    let store = Store::classify(
                        path.has_diffused,
                        path.has_caustic_bounced,
                        self.store_direct,
                    );
                    if let Some(store) = store {
                        maps.record(
                            store,
                            Photon {
                                position: point,
                                direction: -path.ray.direction,
                                power: path.power,
                                surface: surface_id,
                            },
                        );
                    }

                    let survival = albedo.element_sum() / 3.0;
                    if gen_f32(rng) >= survival {
                        return PathEnd::Absorbed;
                    }

                    let (facing, _) = face_forward(normal, path.ray.direction);
                    let direction = sample_cosine_direction(facing, rng);
                    path.ray = Ray::new(offset_ray_origin(point, facing), direction);
                    path.power *= albedo / survival;
                    path.has_diffused = true;
                }
                Surface::Dielectric { .. } => {
                    let (ray, _) = transmitted_ray(point, path.ray.direction, normal, &self.ior);
                    path.ray = ray;
                    path.has_caustic_bounced = true;
                }
            }
        }

        PathEnd::Truncated
    }
}
