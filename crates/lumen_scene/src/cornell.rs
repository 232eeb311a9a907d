//! The built-in scene: a Cornell box lit by a small ceiling light, with two
//! glass spheres that focus caustics onto the floor.

use lumen_math::{Color, Vec2, Vec3};

use crate::{Camera, Primitive, RectLight, Scene, Surface};

/// Surface ids of the built-in scene.
pub mod surfaces {
    use crate::SurfaceId;

    pub const LIGHT: SurfaceId = 0;
    pub const BACK: SurfaceId = 1;
    pub const FLOOR: SurfaceId = 2;
    pub const LEFT: SurfaceId = 3;
    pub const RIGHT: SurfaceId = 4;
    pub const CEILING: SurfaceId = 5;
    pub const GLASS: SurfaceId = 6;
}

const WHITE: Color = Color::new(0.874, 0.874, 0.875);
const BLUE: Color = Color::new(0.0, 0.2117, 0.3765);
const YELLOW: Color = Color::new(0.996, 0.7373, 0.0667);

// Box corners. The box spans x in [0, 0.556], y in [-0.5592, 0], z in [0, 0.5488].
const X0: f32 = 0.000_000_133;
const X1: f32 = 0.555_999_935;
const Y0: f32 = -0.559_199_989;
const Y1: f32 = -0.000_000_119;
const Z0: f32 = 0.000_000_040;
const Z1: f32 = 0.548_799_932;

impl Scene {
    /// Build the built-in Cornell box scene at 1024x1024.
    pub fn cornell_box() -> Self {
        let light = RectLight {
            corner: Vec3::new(0.195, -0.355, 0.545),
            size: Vec2::new(0.16, 0.16),
            normal: -Vec3::Z,
            power: 1.0,
            surface: surfaces::LIGHT,
        };

        let surfaces = vec![
            Surface::Lambertian {
                normal: -Vec3::Z,
                albedo: WHITE,
            },
            Surface::Lambertian {
                normal: Vec3::Y,
                albedo: WHITE,
            },
            Surface::Lambertian {
                normal: Vec3::Z,
                albedo: WHITE,
            },
            Surface::Lambertian {
                normal: -Vec3::X,
                albedo: BLUE,
            },
            Surface::Lambertian {
                normal: Vec3::X,
                albedo: YELLOW,
            },
            Surface::Lambertian {
                normal: -Vec3::Z,
                albedo: WHITE,
            },
            Surface::Dielectric {
                normal: Vec3::ZERO,
                albedo: Color::ONE,
            },
        ];

        let quad = |a: Vec3, b: Vec3, c: Vec3, d: Vec3, surface| {
            [
                Primitive::triangle(a, b, c, surface),
                Primitive::triangle(a, c, d, surface),
            ]
        };

        let mut primitives = vec![
            Primitive::sphere(Vec3::new(0.128, -0.177, 0.16), 0.1, surfaces::GLASS),
            Primitive::sphere(Vec3::new(0.42, -0.3, 0.35), 0.1, surfaces::GLASS),
        ];
        primitives.extend(light.primitives());
        primitives.extend(quad(
            Vec3::new(X0, Y0, Z1),
            Vec3::new(X1, Y0, Z1),
            Vec3::new(X1, Y0, Z0),
            Vec3::new(X0, Y0, Z0),
            surfaces::BACK,
        ));
        primitives.extend(quad(
            Vec3::new(X0, Y0, Z0),
            Vec3::new(X1, Y0, Z0),
            Vec3::new(X1, Y1, Z0),
            Vec3::new(X0, Y1, Z0),
            surfaces::FLOOR,
        ));
        primitives.extend(quad(
            Vec3::new(X1, Y1, Z1),
            Vec3::new(X1, Y1, Z0),
            Vec3::new(X1, Y0, Z0),
            Vec3::new(X1, Y0, Z1),
            surfaces::LEFT,
        ));
        primitives.extend(quad(
            Vec3::new(X0, Y0, Z0),
            Vec3::new(X0, Y1, Z0),
            Vec3::new(X0, Y1, Z1),
            Vec3::new(X0, Y0, Z1),
            surfaces::RIGHT,
        ));
        primitives.extend(quad(
            Vec3::new(X0, Y1, Z1),
            Vec3::new(X1, Y1, Z1),
            Vec3::new(X1, Y0, Z1),
            Vec3::new(X0, Y0, Z1),
            surfaces::CEILING,
        ));

        let camera = Camera {
            position: Vec3::new(0.278, 0.8, 0.2744),
            bottom_left: Vec3::new(0.558_156, 0.0, -0.005_756_02),
            right: Vec3::new(-0.560_312, 0.0, 0.0),
            up: Vec3::new(0.0, 0.0, 0.560_312),
            width: 1024,
            height: 1024,
        };

        Scene {
            primitives,
            surfaces,
            light,
            camera,
        }
    }
}
