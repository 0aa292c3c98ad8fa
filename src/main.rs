use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, error, info};
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager};
use engine::renderer::{DrawList, Renderer};
use game::characters::MarioInput;
use game::{Level, LevelTextures};

const MARIO_TEXTURE: &str = "Mario/Mario0.png";
const BLOCKS_TEXTURE: &str = "Blocks.png";

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 300;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GameConfig::from_env()?;
    info!("Starting {}...", config.window_title);

    // Missing textures fall back to tinted placeholders
    let mut assets = AssetManager::new(&config.asset_root);
    let textures = LevelTextures {
        mario: assets.try_load_texture(MARIO_TEXTURE),
        blocks: assets.try_load_texture(BLOCKS_TEXTURE),
    };
    let mut level = Level::load(&assets, &config.level, textures)
        .with_context(|| format!("Failed to build level {}", config.level))?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let (width, height) = config.window_size;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.window_title)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    renderer.upload_textures(&assets);

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut draw_list = DrawList::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    renderer.set_scale_factor(scale_factor);
                }
                WindowEvent::Focused(false) => {
                    input.reset();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let action = input.process_keyboard_event(&event);
                    if event.state == ElementState::Pressed && !event.repeat {
                        match action {
                            Some(Action::Pause) => game_loop.toggle_pause(),
                            Some(Action::Quit) => {
                                info!("Quit requested, shutting down...");
                                elwt.exit();
                            }
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    draw_list.clear();
                    level.render(&mut draw_list);
                    if let Err(err) = renderer.render(&draw_list) {
                        error!("Render failed: {:#}", err);
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let steps = game_loop.begin_frame();

                if steps > 0 {
                    let mario_input = MarioInput::from_actions(input.state());
                    level.advance(steps, game_loop.fixed_timestep(), mario_input);
                }
                if steps > 0 || game_loop.is_paused() {
                    input.update();
                }
                if game_loop.frame_count() % FPS_LOG_INTERVAL == 0 {
                    debug!(
                        "{:.1} FPS, {} updates so far",
                        game_loop.fps(),
                        game_loop.update_count()
                    );
                }

                let focus_x = level.mario().bounds().center().x;
                renderer.camera_mut().follow(focus_x, level.width());

                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
