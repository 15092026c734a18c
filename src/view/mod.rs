//! Viewing of the scene: the display window, camera control and projection.

pub mod camera;

use glam::Mat4;
use glow::HasContext;
use sdl2::{event::Event, keyboard::Keycode};

use crate::{
    abs::{App, UniformSink},
    config::Config,
    input::KeyboardState,
};
use camera::{Camera, Movement};

pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";
pub const VIEW_POSITION_UNIFORM: &str = "viewPosition";

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;
/// Half the visible height of the orthographic view volume.
const ORTHO_HALF_HEIGHT: f32 = 10.0;

const MOVEMENT_KEYS: [(Keycode, Movement); 6] = [
    (Keycode::W, Movement::Forward),
    (Keycode::A, Movement::Backward),
    (Keycode::S, Movement::Left),
    (Keycode::D, Movement::Right),
    (Keycode::Q, Movement::Up),
    (Keycode::E, Movement::Down),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Owns the camera and turns input into view and projection matrices.
pub struct ViewManager {
    pub camera: Camera,
    pub projection: Projection,
    width: u32,
    height: u32,
}

impl ViewManager {
    pub fn new(config: &Config) -> Self {
        Self {
            camera: Camera::new(&config.camera),
            projection: Projection::Perspective,
            width: config.window.width,
            height: config.window.height,
        }
    }

    /// Opens the display window with a normal cursor and alpha blending enabled.
    pub fn create_display_window(&self, config: &Config) -> Result<App, String> {
        let app = App::new(&config.window.title, self.width, self.height)
            .map_err(|e| format!("failed to create display window: {e}"))?;
        app.sdl.mouse().set_relative_mouse_mode(false);
        app.sdl.mouse().show_cursor(true);
        unsafe {
            app.gl.enable(glow::BLEND);
            app.gl
                .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            app.gl.enable(glow::DEPTH_TEST);
            app.gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
        Ok(app)
    }

    /// Feeds mouse, scroll and resize events to the camera. Keys arrive through
    /// [`KeyboardState`] instead.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::MouseMotion { x, y, .. } => {
                log::trace!("{x}:{y}");
                self.camera.process_mouse_position(*x as f32, *y as f32);
            }
            Event::MouseWheel { x, y, .. } => {
                log::trace!("{x} : {y}");
                self.camera.process_mouse_scroll(*y as f32);
            }
            Event::Window {
                win_event: sdl2::event::WindowEvent::Resized(width, height),
                ..
            } => self.resize(*width as u32, *height as u32),
            _ => {}
        }
    }

    /// `P` switches to perspective, `O` to orthographic.
    pub fn handle_key_press(&mut self, keycode: Keycode) {
        let projection = match keycode {
            Keycode::P => Projection::Perspective,
            Keycode::O => Projection::Orthographic,
            _ => return,
        };
        if projection != self.projection {
            log::debug!("switching to {projection:?} projection");
        }
        self.projection = projection;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Applies this frame's projection key presses and held movement keys.
    /// Returns `false` once Escape asks the window to close.
    pub fn process_keyboard_events(&mut self, keyboard: &KeyboardState, delta_time: f32) -> bool {
        if keyboard.is_down(Keycode::Escape) {
            return false;
        }
        for key in [Keycode::P, Keycode::O] {
            if keyboard.was_pressed(key) {
                self.handle_key_press(key);
            }
        }
        for (key, movement) in MOVEMENT_KEYS {
            if keyboard.is_down(key) {
                self.camera.process_keyboard(movement, delta_time);
            }
        }
        true
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.aspect_ratio();
        match self.projection {
            Projection::Perspective => Mat4::perspective_rh_gl(
                self.camera.zoom.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            Projection::Orthographic => Mat4::orthographic_rh_gl(
                -aspect * ORTHO_HALF_HEIGHT,
                aspect * ORTHO_HALF_HEIGHT,
                -ORTHO_HALF_HEIGHT,
                ORTHO_HALF_HEIGHT,
                NEAR_PLANE,
                FAR_PLANE,
            ),
        }
    }

    /// Processes queued keyboard input and pushes the view, projection and camera position.
    /// Returns `false` when the window should close.
    pub fn prepare_scene_view<S: UniformSink>(
        &mut self,
        sink: &mut S,
        keyboard: &KeyboardState,
        delta_time: f32,
    ) -> bool {
        if !self.process_keyboard_events(keyboard, delta_time) {
            return false;
        }
        sink.set(VIEW_UNIFORM, self.camera.view_matrix());
        sink.set(PROJECTION_UNIFORM, self.projection_matrix());
        sink.set(VIEW_POSITION_UNIFORM, self.camera.position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::{UniformValue, shader::tests::RecordingSink};
    use glam::Vec3;
    use sdl2::{
        event::WindowEvent,
        mouse::{MouseState, MouseWheelDirection},
    };

    fn manager() -> ViewManager {
        ViewManager::new(&Config::default())
    }

    #[test]
    fn test_projection_toggle() {
        let mut view = manager();
        assert_eq!(view.projection, Projection::Perspective);
        view.handle_key_press(Keycode::O);
        assert_eq!(view.projection, Projection::Orthographic);
        view.handle_key_press(Keycode::X);
        assert_eq!(view.projection, Projection::Orthographic);
        view.handle_key_press(Keycode::P);
        assert_eq!(view.projection, Projection::Perspective);
    }

    #[test]
    fn test_projection_matrices() {
        let mut view = manager();
        let expected =
            Mat4::perspective_rh_gl(80f32.to_radians(), 1000.0 / 800.0, 0.1, 100.0);
        assert_eq!(view.projection_matrix(), expected);

        view.handle_key_press(Keycode::O);
        let ortho = view.projection_matrix();
        // The right edge of the volume maps to clip x = 1.
        let edge = ortho.project_point3(Vec3::new(1.25 * 10.0, 10.0, -1.0));
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_escape_requests_close() {
        let mut view = manager();
        let mut sink = RecordingSink::default();
        let mut keyboard = KeyboardState::default();
        assert!(view.prepare_scene_view(&mut sink, &keyboard, 0.016));
        keyboard.press(Keycode::Escape);
        assert!(!view.prepare_scene_view(&mut sink, &keyboard, 0.016));
    }

    #[test]
    fn test_prepare_scene_view_pushes_uniforms() {
        let mut view = manager();
        let mut sink = RecordingSink::default();
        let mut keyboard = KeyboardState::default();
        keyboard.press(Keycode::Q);
        assert!(view.prepare_scene_view(&mut sink, &keyboard, 0.5));

        let position = Vec3::new(0.0, 10.0, 20.0);
        assert_eq!(view.camera.position, position);
        assert_eq!(
            sink.last(VIEW_POSITION_UNIFORM),
            Some(UniformValue::Vec3(position))
        );
        assert_eq!(
            sink.last(VIEW_UNIFORM),
            Some(UniformValue::Mat4(view.camera.view_matrix()))
        );
        assert_eq!(
            sink.last(PROJECTION_UNIFORM),
            Some(UniformValue::Mat4(view.projection_matrix()))
        );
    }

    #[test]
    fn test_projection_keys_act_on_press_only() {
        let mut view = manager();
        let mut keyboard = KeyboardState::default();
        keyboard.press(Keycode::O);
        assert!(view.process_keyboard_events(&keyboard, 0.016));
        assert_eq!(view.projection, Projection::Orthographic);

        // Held P pressed in an earlier frame does not switch back.
        keyboard.begin_frame();
        keyboard.release(Keycode::O);
        keyboard.press(Keycode::P);
        keyboard.begin_frame();
        assert!(view.process_keyboard_events(&keyboard, 0.016));
        assert_eq!(view.projection, Projection::Orthographic);
    }

    #[test]
    fn test_movement_key_layout() {
        let expected = [
            (Keycode::W, Vec3::new(0.0, 0.0, -1.0)),
            (Keycode::A, Vec3::new(0.0, 0.0, 1.0)),
            (Keycode::S, Vec3::new(-1.0, 0.0, 0.0)),
            (Keycode::D, Vec3::new(1.0, 0.0, 0.0)),
            (Keycode::Q, Vec3::new(0.0, 1.0, 0.0)),
            (Keycode::E, Vec3::new(0.0, -1.0, 0.0)),
        ];
        for (key, direction) in expected {
            let mut view = manager();
            view.camera.front = Vec3::NEG_Z;
            let start = view.camera.position;
            let mut keyboard = KeyboardState::default();
            keyboard.press(key);
            // 10 units per second for 0.1s
            assert!(view.process_keyboard_events(&keyboard, 0.1));
            let moved = view.camera.position - start;
            assert!((moved - direction).length() < 1e-5, "{key:?} moved {moved}");
        }
    }

    #[test]
    fn test_events_drive_camera() {
        let mut view = manager();
        let motion = |x, y| Event::MouseMotion {
            timestamp: 0,
            window_id: 0,
            which: 0,
            mousestate: MouseState::from_sdl_state(0),
            x,
            y,
            xrel: 0,
            yrel: 0,
        };
        view.handle_event(&motion(100, 100));
        assert_eq!(view.camera.yaw, -90.0);
        view.handle_event(&motion(120, 90));
        assert!((view.camera.yaw - -88.0).abs() < 1e-5);
        assert!((view.camera.pitch - 1.0).abs() < 1e-5);

        view.handle_event(&Event::MouseWheel {
            timestamp: 0,
            window_id: 0,
            which: 0,
            x: 0,
            y: -50,
            direction: MouseWheelDirection::Normal,
            precise_x: 0.0,
            precise_y: -50.0,
            mouse_x: 120,
            mouse_y: 90,
        });
        assert!((view.camera.zoom - 75.0).abs() < 1e-5);

        view.handle_event(&Event::Window {
            timestamp: 0,
            window_id: 0,
            win_event: WindowEvent::Resized(600, 300),
        });
        assert_eq!(view.aspect_ratio(), 2.0);

        view.handle_event(&Event::Quit { timestamp: 0 });
        assert_eq!(view.projection, Projection::Perspective);
        assert!((view.camera.zoom - 75.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_ignores_zero() {
        let mut view = manager();
        view.resize(0, 600);
        assert_eq!(view.aspect_ratio(), 1.25);
        view.resize(800, 800);
        assert_eq!(view.aspect_ratio(), 1.0);
    }
}
