//! The table-top still life: a wine bottle, a pear, a cheese wedge and a wine glass.

use glam::{Vec2, Vec3, Vec4};

use super::shapes::ShapeKind;

/// Texture files loaded for the scene, relative to the configured texture directory.
pub const SCENE_TEXTURES: [(&str, &str); 5] = [
    ("black_back.jpg", "glass"),
    ("Gold_Metal.jpg", "top"),
    ("Wood_Table.jpg", "table"),
    ("swiss_cheese.jpg", "cheese"),
    ("pear.jpg", "pear"),
];

/// One draw call: a shape with its transform and shading state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePart {
    pub name: &'static str,
    pub scale: Vec3,
    /// Degrees about X, Y and Z, applied in that order.
    pub rotation: Vec3,
    pub position: Vec3,
    pub color: Vec4,
    /// Parts without a texture are drawn in their flat color.
    pub texture: Option<&'static str>,
    pub material: &'static str,
    pub uv_scale: Vec2,
    pub shape: ShapeKind,
}

const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
const GLASS_TINT: Vec4 = Vec4::new(0.8, 0.8, 0.9, 0.5);

pub const STILL_LIFE: [ScenePart; 14] = [
    ScenePart {
        name: "table",
        scale: Vec3::new(45.0, 5.0, 20.0),
        rotation: Vec3::ZERO,
        position: Vec3::new(0.0, -15.0, 0.0),
        color: WHITE,
        texture: Some("table"),
        material: "wood",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Plane,
    },
    ScenePart {
        name: "bottle body",
        scale: Vec3::new(2.5, 12.25, 2.0),
        rotation: Vec3::new(-10.0, 0.0, 0.0),
        position: Vec3::new(0.0, -8.0, 0.0),
        color: WHITE,
        texture: Some("glass"),
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Cylinder,
    },
    ScenePart {
        name: "bottle shoulder",
        scale: Vec3::new(2.1, 1.5, 0.0),
        rotation: Vec3::ZERO,
        position: Vec3::new(0.0, 4.5, 0.0),
        color: RED,
        texture: Some("glass"),
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Sphere,
    },
    ScenePart {
        name: "bottle neck base",
        scale: Vec3::new(1.25, 3.25, 0.0),
        rotation: Vec3::ZERO,
        position: Vec3::new(0.0, 4.8, 0.0),
        color: RED,
        texture: Some("glass"),
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::TaperedCylinder,
    },
    ScenePart {
        name: "bottle neck",
        scale: Vec3::new(0.67, 2.5, 0.0),
        rotation: Vec3::new(-10.0, 0.0, 0.0),
        position: Vec3::new(0.0, 8.0, 0.0),
        color: Vec4::new(2.0, 2.0, 0.0, 2.0),
        texture: Some("top"),
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Cylinder,
    },
    ScenePart {
        name: "bottle ridge",
        scale: Vec3::new(0.75, 0.6, 0.0),
        rotation: Vec3::ZERO,
        position: Vec3::new(0.0, 9.0, 0.0),
        color: Vec4::new(2.0, 1.0, 1.0, 2.0),
        texture: Some("top"),
        material: "gold",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Cylinder,
    },
    ScenePart {
        name: "bottle mouth",
        scale: Vec3::new(0.74, 0.75, 0.0),
        rotation: Vec3::new(90.0, 0.0, 0.0),
        position: Vec3::new(0.0, 9.93, 0.0),
        color: RED,
        texture: Some("gold"),
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Cylinder,
    },
    ScenePart {
        name: "pear base",
        scale: Vec3::new(1.75, 2.0, 2.0),
        rotation: Vec3::ZERO,
        position: Vec3::new(-3.5, -4.2, 2.5),
        color: GREEN,
        texture: Some("pear"),
        material: "plastic",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Sphere,
    },
    ScenePart {
        name: "pear middle",
        scale: Vec3::new(1.72, 4.0, 2.0),
        rotation: Vec3::new(0.0, 0.0, -30.0),
        position: Vec3::new(-3.6, -4.2, 2.5),
        color: GREEN,
        texture: Some("pear"),
        material: "plastic",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::TaperedCylinder,
    },
    ScenePart {
        name: "pear stem",
        scale: Vec3::new(-0.1, 1.75, 0.0),
        rotation: Vec3::new(0.0, 1.0, -30.0),
        position: Vec3::new(-1.75, -1.0, 2.0),
        color: Vec4::new(0.36, 0.25, 0.20, 1.0),
        texture: None,
        material: "wood",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Cylinder,
    },
    ScenePart {
        name: "cheese wedge",
        scale: Vec3::new(4.5, 3.75, 3.0),
        rotation: Vec3::new(45.0, 15.0, -75.0),
        position: Vec3::new(4.6, -5.75, 0.9),
        color: Vec4::new(1.0, 1.0, 0.0, 1.0),
        texture: Some("cheese"),
        material: "plastic",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Prism,
    },
    ScenePart {
        name: "wine glass base",
        scale: Vec3::new(0.25, 2.65, 1.0),
        rotation: Vec3::new(65.0, 60.0, 0.0),
        position: Vec3::new(3.0, -7.75, 3.0),
        color: GLASS_TINT,
        texture: None,
        // no material: keeps whatever the previous part set
        material: "",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Sphere,
    },
    ScenePart {
        name: "wine glass stem",
        scale: Vec3::new(-0.3, 6.45, 0.0),
        rotation: Vec3::new(0.0, 0.0, 3.5),
        position: Vec3::new(3.3, -8.0, 3.0),
        color: GLASS_TINT,
        texture: None,
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::TaperedCylinder,
    },
    ScenePart {
        name: "wine glass bowl",
        scale: Vec3::new(1.95, 1.75, 8.6),
        rotation: Vec3::new(90.0, 0.0, 0.0),
        position: Vec3::new(2.75, 0.75, 3.0),
        color: Vec4::new(0.8, 0.8, 0.9, 0.25),
        texture: None,
        material: "glass",
        uv_scale: Vec2::ONE,
        shape: ShapeKind::Torus,
    },
];
