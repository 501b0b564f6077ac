use std::{path::PathBuf, process::ExitCode};

use glow::HasContext;
use meshlight_core::{SceneConfig, ScreenshotCounter, ppm};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use crate::{
    abs::App,
    input::KeyboardState,
    render::{LitRenderer, RenderModel},
};

mod abs;
mod input;
mod logger;
mod render;

fn main() -> ExitCode {
    if let Err(e) = logger::init() {
        eprintln!("Failed to set up logging: {}", e);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene from {}", path);
            SceneConfig::load(&path)?
        }
        None => SceneConfig::default(),
    };

    let loaded = render::model::load_models(&config.meshes);

    let mut app = App::new(&config.window.title, config.window.width, config.window.height)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.depth_func(glow::LESS);
        if config.cull_faces {
            app.gl.enable(glow::CULL_FACE);
            app.gl.cull_face(glow::BACK);
            app.gl.front_face(glow::CCW);
        }
        if config.wireframe {
            app.gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
        }
    }

    let renderer = LitRenderer::new(&app.gl)?;
    let models = loaded
        .iter()
        .map(|loaded| RenderModel::upload(&app.gl, loaded))
        .collect::<Result<Vec<_>, _>>()?;
    drop(loaded);
    if models.is_empty() {
        log::warn!("No models loaded, only the background will be drawn");
    }
    for model in &models {
        log::info!("Drawing {}", model.name);
    }

    let (mut width, mut height) = app.drawable_size();
    unsafe {
        app.gl.viewport(0, 0, width as i32, height as i32);
    }
    renderer.set_camera(&config.camera, width, height);
    renderer.set_point_light(&config.point_light);
    renderer.set_spot_lights(&config.spot_lights);

    let mut orbit = config.orbit;
    let mut keyboard = KeyboardState::default();
    let mut screenshots = ScreenshotCounter::new();
    let clear = config.clear_color;

    'running: loop {
        keyboard.begin_frame();
        for event in app.event_pump.poll_iter() {
            keyboard.handle_event(&event);
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(..) | WindowEvent::SizeChanged(..),
                    ..
                } => {
                    (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    renderer.set_camera(&config.camera, width, height);
                }
                _ => {}
            }
        }

        if keyboard.was_pressed(Keycode::Escape) {
            break 'running;
        }

        unsafe {
            app.gl.clear_color(clear.x, clear.y, clear.z, 1.0);
            app.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        renderer.set_point_light_position(orbit.advance());
        renderer.draw(&models);

        // Read back before the swap, while the back buffer still holds this frame.
        if keyboard.was_pressed(Keycode::P) {
            match capture(&app, &mut screenshots, &config.screenshot_prefix) {
                Ok(path) => log::info!("Finished capturing window to {}", path.display()),
                Err(e) => log::error!("Screenshot failed: {}", e),
            }
        }

        app.window.gl_swap_window();
    }

    log::info!("Shutting down");
    Ok(())
}

/// Dumps the current back buffer to the next screenshot file.
fn capture(app: &App, counter: &mut ScreenshotCounter, prefix: &str) -> Result<PathBuf, String> {
    log::info!("Capturing window {}", counter.peek());
    let (width, height) = app.drawable_size();
    let pixels = abs::read_framebuffer(&app.gl, width, height);
    let path = counter.next_path(prefix);
    ppm::save_ppm(&path, width, height, &pixels)?;
    Ok(path)
}
