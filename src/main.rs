use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use pinata_brawl::engine::audio::LogAudio;
use pinata_brawl::engine::game_loop::GameLoop;
use pinata_brawl::engine::input::InputManager;
use pinata_brawl::engine::renderer::TraceSurface;
use pinata_brawl::engine::skeleton::SkeletonLibrary;
use pinata_brawl::game::characters::standard_library;
use pinata_brawl::game::scoreboard::LogDisplay;
use pinata_brawl::game::{MatchConfig, MatchDirector};

/// Start a match with a fresh seed
fn new_match(config: &MatchConfig, library: &SkeletonLibrary) -> Result<MatchDirector> {
    let config = MatchConfig {
        seed: rand::random(),
        ..config.clone()
    };
    let director =
        MatchDirector::new(config, library, Box::new(LogAudio), Box::new(LogDisplay))?;
    Ok(director)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Pinata Brawl...");

    let library = standard_library();
    let mut config = MatchConfig::default();
    let mut director = new_match(&config, &library)?;
    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();
    let mut surface = TraceSurface::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Pinata Brawl")
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.view_width as u32,
            config.view_height as u32,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} ticks, best score {}",
                    game_loop.tick_count(),
                    director.high_score()
                );
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                info!("Window resized to {:?}", physical_size);
                config.view_width = physical_size.width as f32;
                config.view_height = physical_size.height as f32;
                director.resize(config.view_width, config.view_height);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                if focused {
                    game_loop.resume();
                } else {
                    input.reset();
                    game_loop.pause();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let ticks = game_loop.begin_frame();
                for _ in 0..ticks {
                    director.tick(&input, game_loop.fixed_timestep());
                }
                director.draw(&mut surface, game_loop.render_delta_time());

                if director.is_over() {
                    info!(
                        "Final score {}, best {}",
                        director.score(),
                        director.high_score()
                    );
                    match new_match(&config, &library) {
                        Ok(next) => director = next,
                        Err(e) => {
                            error!("Could not start a new match: {e:#}");
                            elwt.exit();
                        }
                    }
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
