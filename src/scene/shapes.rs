//! Procedural geometry for the primitive shapes the scene is assembled from.
//!
//! Every shape is an indexed triangle list with position, normal and texture coordinates,
//! built at unit size so the per-draw model matrix alone decides its final extent:
//!
//! - plane: [-1, 1] in X and Z at y = 0, facing +Y
//! - box: unit cube centered on the origin
//! - cylinder, tapered cylinder, cone: base circle of radius 1 on y = 0, height 1
//! - sphere: radius 1 around the origin
//! - torus: ring of radius 1 in the XY plane
//! - prism: triangular cross-section in XY, extruded over z in [-0.5, 0.5]
//! - pyramid3: triangular base on y = -0.5, apex at y = 0.5

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::abs::Vertex;

const SLICES: u32 = 36;
const SPHERE_STACKS: u32 = 18;
const TORUS_RING_SEGMENTS: u32 = 36;
const TORUS_TUBE_SEGMENTS: u32 = 18;
pub const TORUS_TUBE_RADIUS: f32 = 0.2;
const TAPERED_TOP_RADIUS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
    Sphere,
    Torus,
    Prism,
    Pyramid3,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Plane,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Torus,
        ShapeKind::TaperedCylinder,
        ShapeKind::Sphere,
        ShapeKind::Pyramid3,
        ShapeKind::Prism,
        ShapeKind::Box,
    ];

    /// Generates the geometry for this shape.
    pub fn build(self) -> ShapeData {
        match self {
            ShapeKind::Plane => plane(),
            ShapeKind::Box => cube(),
            ShapeKind::Cylinder => frustum(1.0, 1.0, SLICES, true),
            ShapeKind::TaperedCylinder => frustum(1.0, TAPERED_TOP_RADIUS, SLICES, true),
            ShapeKind::Cone => frustum(1.0, 0.0, SLICES, false),
            ShapeKind::Sphere => sphere(SLICES, SPHERE_STACKS),
            ShapeKind::Torus => torus(
                1.0,
                TORUS_TUBE_RADIUS,
                TORUS_RING_SEGMENTS,
                TORUS_TUBE_SEGMENTS,
            ),
            ShapeKind::Prism => prism(),
            ShapeKind::Pyramid3 => pyramid3(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ShapeVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex for ShapeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ShapeVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Normal attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, size_of::<Vec3>() as i32);

            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                (2 * size_of::<Vec3>()) as i32,
            );
        }
    }
}

/// CPU-side shape geometry ready for upload.
#[derive(Clone, Debug, Default)]
pub struct ShapeData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl ShapeData {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex {
            position,
            normal,
            uv,
        });
        index
    }

    /// Adds a flat convex polygon given counter-clockwise (seen from the front) corners.
    fn push_polygon(&mut self, corners: &[(Vec3, Vec2)]) {
        let [(a, _), (b, _), (c, _), ..] = corners else {
            return;
        };
        let normal = (*b - *a).cross(*c - *a).normalize();
        let base = self.vertices.len() as u32;
        for &(position, uv) in corners {
            self.push_vertex(position, normal, uv);
        }
        for i in 1..corners.len() as u32 - 1 {
            self.indices.extend([base, base + i, base + i + 1]);
        }
    }

    /// Adds the quad `center ± u ± v`; the face points along `u × v`.
    fn push_quad(&mut self, center: Vec3, u: Vec3, v: Vec3) {
        self.push_polygon(&[
            (center - u - v, Vec2::new(0.0, 0.0)),
            (center + u - v, Vec2::new(1.0, 0.0)),
            (center + u + v, Vec2::new(1.0, 1.0)),
            (center - u + v, Vec2::new(0.0, 1.0)),
        ]);
    }

    /// Adds a fan-shaped disc at height `y` facing up or down.
    fn push_disc(&mut self, y: f32, radius: f32, slices: u32, facing_up: bool) {
        let normal = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        for j in 0..=slices {
            let theta = j as f32 / slices as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.push_vertex(
                Vec3::new(radius * cos, y, radius * sin),
                normal,
                Vec2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
            );
        }
        for j in 0..slices {
            let (a, b) = (center + 1 + j, center + 2 + j);
            if facing_up {
                self.indices.extend([center, b, a]);
            } else {
                self.indices.extend([center, a, b]);
            }
        }
    }
}

fn plane() -> ShapeData {
    let mut data = ShapeData::default();
    data.push_quad(Vec3::ZERO, Vec3::Z, Vec3::X);
    data
}

fn cube() -> ShapeData {
    let mut data = ShapeData::default();
    // (normal, u, v) with u × v = normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    for (normal, u, v) in faces {
        data.push_quad(normal * 0.5, u * 0.5, v * 0.5);
    }
    data
}

/// A truncated cone of height 1 standing on y = 0. A zero top radius makes a cone.
fn frustum(bottom_radius: f32, top_radius: f32, slices: u32, cap_top: bool) -> ShapeData {
    let mut data = ShapeData::default();
    let slope = bottom_radius - top_radius;

    for j in 0..=slices {
        let u = j as f32 / slices as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = Vec3::new(cos, slope, sin).normalize();
        data.push_vertex(
            Vec3::new(bottom_radius * cos, 0.0, bottom_radius * sin),
            normal,
            Vec2::new(u, 0.0),
        );
        data.push_vertex(
            Vec3::new(top_radius * cos, 1.0, top_radius * sin),
            normal,
            Vec2::new(u, 1.0),
        );
    }
    for j in 0..slices {
        let b = 2 * j;
        data.indices.extend([b, b + 1, b + 3, b, b + 3, b + 2]);
    }

    data.push_disc(0.0, bottom_radius, slices, false);
    if cap_top && top_radius > 0.0 {
        data.push_disc(1.0, top_radius, slices, true);
    }
    data
}

fn sphere(slices: u32, stacks: u32) -> ShapeData {
    let mut data = ShapeData::default();
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let phi = PI / 2.0 - v * PI;
        let (y, ring) = phi.sin_cos();
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let position = Vec3::new(ring * cos, y, ring * sin);
            data.push_vertex(position, position.normalize_or_zero(), Vec2::new(u, 1.0 - v));
        }
    }
    let row = slices + 1;
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            if i != 0 {
                data.indices.extend([a, a + 1, b]);
            }
            if i != stacks - 1 {
                data.indices.extend([a + 1, b + 1, b]);
            }
        }
    }
    data
}

fn torus(major: f32, minor: f32, ring_segments: u32, tube_segments: u32) -> ShapeData {
    let mut data = ShapeData::default();
    for i in 0..=ring_segments {
        let u = i as f32 / ring_segments as f32;
        let (sin_t, cos_t) = (u * TAU).sin_cos();
        for j in 0..=tube_segments {
            let v = j as f32 / tube_segments as f32;
            let (sin_p, cos_p) = (v * TAU).sin_cos();
            let normal = Vec3::new(cos_p * cos_t, cos_p * sin_t, sin_p);
            let center = Vec3::new(major * cos_t, major * sin_t, 0.0);
            data.push_vertex(center + normal * minor, normal, Vec2::new(u, v));
        }
    }
    let row = tube_segments + 1;
    for i in 0..ring_segments {
        for j in 0..tube_segments {
            let a = i * row + j;
            let b = a + row;
            data.indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    data
}

fn prism() -> ShapeData {
    let mut data = ShapeData::default();
    let profile = [
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.0, 0.5),
    ];
    let front = profile.map(|p| p.extend(0.5));
    let back = profile.map(|p| p.extend(-0.5));
    let uv = |p: Vec2| p + Vec2::splat(0.5);

    data.push_polygon(&[
        (front[0], uv(profile[0])),
        (front[1], uv(profile[1])),
        (front[2], uv(profile[2])),
    ]);
    data.push_polygon(&[
        (back[0], uv(profile[0])),
        (back[2], uv(profile[2])),
        (back[1], uv(profile[1])),
    ]);
    for i in 0..3 {
        let j = (i + 1) % 3;
        data.push_polygon(&[
            (back[i], Vec2::new(0.0, 0.0)),
            (back[j], Vec2::new(1.0, 0.0)),
            (front[j], Vec2::new(1.0, 1.0)),
            (front[i], Vec2::new(0.0, 1.0)),
        ]);
    }
    data
}

fn pyramid3() -> ShapeData {
    let mut data = ShapeData::default();
    let base = [
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.0, -0.5, -0.5),
    ];
    let apex = Vec3::new(0.0, 0.5, 0.0);

    data.push_polygon(&[
        (base[0], Vec2::new(0.0, 0.0)),
        (base[2], Vec2::new(0.5, 1.0)),
        (base[1], Vec2::new(1.0, 0.0)),
    ]);
    for i in 0..3 {
        let j = (i + 1) % 3;
        data.push_polygon(&[
            (base[i], Vec2::new(0.0, 0.0)),
            (base[j], Vec2::new(1.0, 0.0)),
            (apex, Vec2::new(0.5, 1.0)),
        ]);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn centroid(data: &ShapeData) -> Vec3 {
        data.vertices.iter().map(|v| v.position).sum::<Vec3>() / data.vertices.len() as f32
    }

    fn assert_well_formed(data: &ShapeData) {
        assert!(!data.indices.is_empty());
        assert_eq!(data.indices.len() % 3, 0);
        assert!(
            data.indices
                .iter()
                .all(|&i| (i as usize) < data.vertices.len())
        );
        for v in &data.vertices {
            assert!((v.normal.length() - 1.0).abs() < EPS, "{v:?}");
        }
    }

    /// Flat-shaded convex shapes: every face normal points away from the center.
    fn assert_faces_outward(data: &ShapeData) {
        let center = centroid(data);
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| data.vertices[tri[k] as usize].position);
            let face = (b - a).cross(c - a);
            let mid = (a + b + c) / 3.0;
            assert!(face.dot(mid - center) > 0.0, "inward face {tri:?}");
        }
    }

    #[test]
    fn test_every_shape_is_well_formed() {
        for kind in ShapeKind::ALL {
            assert_well_formed(&kind.build());
        }
    }

    #[test]
    fn test_plane() {
        let data = ShapeKind::Plane.build();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.indices.len(), 6);
        for v in &data.vertices {
            assert_eq!(v.position.y, 0.0);
            assert_eq!(v.position.x.abs(), 1.0);
            assert_eq!(v.position.z.abs(), 1.0);
            assert_eq!(v.normal, Vec3::Y);
        }
    }

    #[test]
    fn test_box() {
        let data = ShapeKind::Box.build();
        // 6 faces * 4 corners, 6 faces * 2 triangles * 3 indices
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        for v in &data.vertices {
            assert_eq!(v.position.abs(), Vec3::splat(0.5));
            assert!(v.normal.dot(v.position) > 0.0);
        }
        assert_faces_outward(&data);
    }

    #[test]
    fn test_prism_and_pyramid_faces_point_outward() {
        let prism = ShapeKind::Prism.build();
        assert_eq!(prism.vertices.len(), 3 + 3 + 3 * 4);
        assert_eq!(prism.indices.len(), 3 + 3 + 3 * 6);
        assert_faces_outward(&prism);

        let pyramid = ShapeKind::Pyramid3.build();
        assert_eq!(pyramid.vertices.len(), 12);
        assert_eq!(pyramid.indices.len(), 12);
        assert_faces_outward(&pyramid);
    }

    #[test]
    fn test_cylinder_dimensions() {
        let data = ShapeKind::Cylinder.build();
        for v in &data.vertices {
            assert!(v.position.y >= 0.0 && v.position.y <= 1.0);
            assert!(v.position.with_y(0.0).length() <= 1.0 + EPS);
        }
        // side ring normals are horizontal
        let side = &data.vertices[..2 * (SLICES as usize + 1)];
        assert!(side.iter().all(|v| v.normal.y.abs() < EPS));
    }

    #[test]
    fn test_tapered_cylinder_narrows() {
        let data = ShapeKind::TaperedCylinder.build();
        let top = data
            .vertices
            .iter()
            .filter(|v| v.position.y == 1.0)
            .map(|v| v.position.with_y(0.0).length())
            .fold(0.0f32, f32::max);
        assert!((top - TAPERED_TOP_RADIUS).abs() < EPS);
        // side normals lean upwards
        assert!(data.vertices[0].normal.y > 0.0);
    }

    #[test]
    fn test_cone_has_no_top_cap() {
        let cone = ShapeKind::Cone.build();
        let cylinder = ShapeKind::Cylinder.build();
        assert!(cone.indices.len() < cylinder.indices.len());
        assert!(cone.vertices.iter().all(|v| v.normal != Vec3::Y));
    }

    #[test]
    fn test_sphere_radius_and_normals() {
        let data = ShapeKind::Sphere.build();
        for v in &data.vertices {
            assert!((v.position.length() - 1.0).abs() < EPS);
        }
        // poles contribute one triangle per slice, other stacks two
        let expected = (SLICES * 2 + SLICES * 2 * (SPHERE_STACKS - 2)) * 3;
        assert_eq!(data.indices.len(), expected as usize);
    }

    #[test]
    fn test_torus_tube_distance() {
        let data = ShapeKind::Torus.build();
        for v in &data.vertices {
            let ring_point = v.position.with_z(0.0).normalize();
            let distance = (v.position - ring_point).length();
            assert!((distance - TORUS_TUBE_RADIUS).abs() < EPS);
        }
        assert_eq!(
            data.indices.len(),
            (TORUS_RING_SEGMENTS * TORUS_TUBE_SEGMENTS * 6) as usize
        );
    }
}
