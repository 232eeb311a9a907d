//! Small analytic scenes shared by the transport and integrator tests.

use lumen_math::{Color, Vec2, Vec3};
use lumen_scene::{Camera, Primitive, RectLight, Scene, Surface};

pub const FLOOR: usize = 0;
pub const CEILING: usize = 1;
pub const LIGHT: usize = 2;
pub const GLASS: usize = 3;

const HALF_EXTENT: f32 = 100.0;

/// Axis-aligned square of half-size `HALF_EXTENT` in the plane z = `z`.
fn plane(z: f32, surface: usize) -> [Primitive; 2] {
    let a = Vec3::new(-HALF_EXTENT, -HALF_EXTENT, z);
    let b = Vec3::new(HALF_EXTENT, -HALF_EXTENT, z);
    let c = Vec3::new(HALF_EXTENT, HALF_EXTENT, z);
    let d = Vec3::new(-HALF_EXTENT, HALF_EXTENT, z);
    [
        Primitive::triangle(a, b, c, surface),
        Primitive::triangle(a, c, d, surface),
    ]
}

/// A 0.16 x 0.16 light of unit power centred above the origin at `height`,
/// facing down.
pub fn small_light(height: f32) -> RectLight {
    RectLight {
        corner: Vec3::new(-0.08, -0.08, height),
        size: Vec2::new(0.16, 0.16),
        normal: -Vec3::Z,
        power: 1.0,
        surface: LIGHT,
    }
}

fn surfaces(floor_albedo: f32, ceiling_albedo: f32) -> Vec<Surface> {
    vec![
        Surface::Lambertian {
            normal: Vec3::Z,
            albedo: Color::splat(floor_albedo),
        },
        Surface::Lambertian {
            normal: -Vec3::Z,
            albedo: Color::splat(ceiling_albedo),
        },
        Surface::Lambertian {
            normal: -Vec3::Z,
            albedo: Color::ONE,
        },
        Surface::Dielectric {
            normal: Vec3::ZERO,
            albedo: Color::ONE,
        },
    ]
}

/// Camera at the origin side looking straight down at the floor.
fn camera(height: f32) -> Camera {
    Camera {
        position: Vec3::new(0.0, 0.0, height),
        bottom_left: Vec3::new(-0.5, -0.5, height - 0.5),
        right: Vec3::X,
        up: Vec3::Y,
        width: 8,
        height: 8,
    }
}

/// An unbounded floor under a small light. The light is not part of the
/// geometry, so every bounced photon escapes.
pub fn floor_under_light(albedo: f32, light_height: f32) -> Scene {
    Scene {
        primitives: plane(0.0, FLOOR).to_vec(),
        surfaces: surfaces(albedo, 0.0),
        light: small_light(light_height),
        camera: camera(light_height * 0.5),
    }
}

/// Floor at z = 0 and ceiling at z = 1 with the light in between. The light
/// is not part of the geometry, so photons bounce between the two planes.
pub fn parallel_planes(albedo: f32) -> Scene {
    let mut primitives = plane(0.0, FLOOR).to_vec();
    primitives.extend(plane(1.0, CEILING));
    Scene {
        primitives,
        surfaces: surfaces(albedo, albedo),
        light: small_light(0.5),
        camera: camera(0.4),
    }
}

/// A floor under a glass sphere under a light. The light's own triangles
/// are part of the geometry, as in a real scene.
pub fn glass_over_floor() -> Scene {
    let light = small_light(1.0);
    let mut primitives = plane(0.0, FLOOR).to_vec();
    primitives.push(Primitive::sphere(Vec3::new(0.0, 0.0, 0.4), 0.2, GLASS));
    primitives.extend(light.primitives());
    Scene {
        primitives,
        surfaces: surfaces(0.8, 0.0),
        light,
        camera: Camera {
            position: Vec3::new(0.0, -1.5, 0.5),
            bottom_left: Vec3::new(-0.5, -1.0, 0.0),
            right: Vec3::X,
            up: Vec3::Z,
            width: 8,
            height: 8,
        },
    }
}
