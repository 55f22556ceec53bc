//! gridrig main entry point.
//!
//! A grid board with an orthographic camera rig and a draggable item spawner,
//! written in Rust using:
//! - **raylib** for windowing, drawing and input
//! - **bevy_ecs** for the entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and the optional layout JSON
//! 2. Open the raylib window and build the ECS world
//! 3. Each frame: update time, poll input, run the schedule, render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --layout assets/layouts/default.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use clap::Parser;
use gridrig::game::{build_schedule, build_world};
use gridrig::resources::gameconfig::GameConfig;
use gridrig::resources::gridlayout::GridLayoutData;
use gridrig::resources::screensize::ScreenSize;
use gridrig::systems::input::poll_input;
use gridrig::systems::render::render_frame;
use gridrig::systems::time::update_world_time;
use log::{error, info, warn};

/// Camera and spawner rigs on a grid board.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON grid layout. Without it an open board of the configured size is used.
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,
}

fn load_layout(path: Option<&Path>, config: &GameConfig) -> GridLayoutData {
    let open = || GridLayoutData::open(config.grid_width as usize, config.grid_height as usize);
    let Some(path) = path else {
        return open();
    };
    match GridLayoutData::load_from_file(&path.to_string_lossy()) {
        Ok(layout) => {
            info!("Loaded layout {}", path.display());
            layout
        }
        Err(e) => {
            error!("Failed to load layout {}: {}", path.display(), e);
            open()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    let layout = load_layout(cli.layout.as_deref(), &config);

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("gridrig");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + schedule ---------------
    let screen = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    let mut world = match build_world(config, &layout, screen) {
        Ok(world) => world,
        Err(e) => {
            error!("Cannot build the board: {}", e);
            std::process::exit(1);
        }
    };
    let mut update = build_schedule();

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);
        poll_input(&mut world, &rl);

        update.run(&mut world);

        {
            let mut d = rl.begin_drawing(&thread);
            render_frame(&mut world, &mut d);
        }

        world.clear_trackers(); // Clear changed components for next frame
    }
    info!("Bye");
}
