//! First-person camera driven by mouse look, scroll zoom and key movement.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

pub const MAX_PITCH: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 90.0;

/// Directions the camera can be moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Degrees; -90 looks down -Z.
    pub yaw: f32,
    /// Degrees, always within [-89, 89].
    pub pitch: f32,
    /// Perspective field of view in degrees, always within [1, 90].
    pub zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    last_cursor: Option<(f32, f32)>,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            front: Vec3::from_array(config.front),
            up: Vec3::from_array(config.up),
            yaw: -90.0,
            pitch: 0.0,
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            last_cursor: None,
        }
    }

    /// Handles an absolute cursor position.
    ///
    /// The first position only seeds the tracker. After that the offset since the previous
    /// position turns the camera, with screen y flipped so moving the mouse up looks up.
    pub fn process_mouse_position(&mut self, x: f32, y: f32) {
        let (last_x, last_y) = self.last_cursor.unwrap_or((x, y));
        self.last_cursor = Some((x, y));
        self.process_mouse_movement(x - last_x, last_y - y);
    }

    /// Turns the camera by raw offsets, `y_offset` positive meaning up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.front = front_from_angles(self.yaw, self.pitch);
    }

    /// Scrolling widens or narrows the field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom + y_offset * self.mouse_sensitivity).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Moves the camera `movement_speed * delta_time` units in `direction`.
    pub fn process_keyboard(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        let offset = match direction {
            Movement::Forward => self.front,
            Movement::Backward => -self.front,
            Movement::Left => -self.right(),
            Movement::Right => self.right(),
            Movement::Up => self.up,
            Movement::Down => -self.up,
        };
        self.position += offset * velocity;
    }

    /// Unit vector pointing to the camera's right.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

/// Spherical to Cartesian conversion of yaw/pitch in degrees.
pub fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}
