use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Instant};

use glow::HasContext;
use sdl2::event::{Event, WindowEvent};

use crate::{
    abs::{Shader, ShaderProgram},
    config::Config,
    input::KeyboardState,
    scene::SceneManager,
    view::ViewManager,
};

mod abs;
mod config;
mod input;
mod logging;
mod scene;
mod view;

macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        build_program(
            &$gl,
            include_str!(concat!("shaders/", stringify!($name), "/vertex_shader.glsl")),
            include_str!(concat!("shaders/", stringify!($name), "/fragment_shader.glsl")),
        )
    };
}

fn build_program(
    gl: &Arc<glow::Context>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram, String> {
    let vert = Shader::new(gl, glow::VERTEX_SHADER, vertex_source)
        .map_err(|e| format!("vertex shader: {e}"))?;
    let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment_source)
        .map_err(|e| format!("fragment shader: {e}"))?;
    ShaderProgram::new(gl, &[&vert, &frag]).map_err(|e| format!("shader program: {e}"))
}

fn main() -> ExitCode {
    let config_arg = std::env::args().nth(1).map(PathBuf::from);
    let loaded = Config::load(config_arg.as_deref());
    let config = loaded
        .as_ref()
        .map(|(config, _)| config.clone())
        .unwrap_or_default();

    let level = logging::resolve_level(
        &config.log_level,
        std::env::var("RUST_LOG").ok().as_deref(),
    );
    let log_file = config.log_to_file.then(logging::log_file_path).flatten();
    match logging::setup_logger(level, log_file.as_deref()) {
        Ok(targets) => {
            if let Some(path) = targets.file {
                log::debug!("logging to {}", path.display());
            }
        }
        Err(e) => eprintln!("failed to set up logging: {e}"),
    }

    match loaded {
        Ok((_, Some(path))) => log::info!("using config {}", path.display()),
        Ok((_, None)) => log::info!("no config file found, using defaults"),
        Err(e) => {
            log::error!("invalid config: {e}");
            return ExitCode::FAILURE;
        }
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let mut view_manager = ViewManager::new(config);
    let mut app = view_manager.create_display_window(config)?;

    let mut shader_program = shader_program!(scene, app.gl)?;
    shader_program.use_program();

    let mut scene_manager = SceneManager::new(&app.gl, &config.texture_dir);
    scene_manager.prepare_scene(&mut shader_program)?;

    let mut keyboard_state = KeyboardState::default();
    let mut last_frame_time = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        keyboard_state.begin_frame();
        for event in app.event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'running;
            }
            if let Event::Window {
                win_event: WindowEvent::Resized(width, height),
                ..
            } = event
            {
                unsafe {
                    app.gl.viewport(0, 0, width, height);
                }
            }
            keyboard_state.handle_event(&event);
            view_manager.handle_event(&event);
        }

        unsafe {
            app.gl.clear_color(0.0, 0.0, 0.0, 1.0);
            app.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        shader_program.use_program();
        if !view_manager.prepare_scene_view(&mut shader_program, &keyboard_state, delta_time) {
            break 'running;
        }
        scene_manager.render_scene(&mut shader_program);

        app.window.gl_swap_window();
    }

    log::info!("window closed");
    Ok(())
}
