//! Headless runs of the falling-circle demos and the two games

use std::collections::BTreeMap;

use clap::Args;
use glam::Vec2;

use raster_arcade::Settings;
use raster_arcade::consts::SIM_DT;
use raster_arcade::raster::{Canvas, Rgb};
use raster_arcade::renderer::{dxball_scene, eggs_scene, falling_scene};
use raster_arcade::sim::dxball::{self, DxState, SCREEN_H, SCREEN_W, Screen};
use raster_arcade::sim::eggs::{self, EggScreen, EggState};
use raster_arcade::sim::{DropDemo, FallingCircle, StackDemo};

use super::{Output, parse_point};

/// Software canvas side for the egg game
const EGGS_CANVAS: u32 = 600;

#[derive(Debug, Args)]
pub struct FallingArgs {
    /// Spawn a circle here (bottom-left origin); repeatable
    #[arg(long = "click", value_parser = parse_point)]
    pub clicks: Vec<Vec2>,
    /// Animation frames to run after the clicks
    #[arg(long, default_value_t = 120)]
    pub frames: u32,
}

pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn paint(list: &raster_arcade::renderer::DrawList, w: u32, h: u32) -> Canvas {
    let mut canvas = Canvas::new(w, h, Rgb::BLACK);
    canvas.paint(list);
    canvas
}

fn falling_canvas(circles: &[FallingCircle], size: Vec2) -> Canvas {
    paint(&falling_scene(circles, size), size.x as u32, size.y as u32)
}

pub fn drop(args: &FallingArgs, out: &Output) -> raster_arcade::Result<()> {
    let mut demo = DropDemo::new();
    for &at in &args.clicks {
        demo.click(at);
    }
    for _ in 0..args.frames {
        demo.step();
    }
    println!("{} circles after {} frames", demo.circles.len(), args.frames);
    out.emit(&falling_canvas(&demo.circles, demo.size()))
}

pub fn stack(args: &FallingArgs, out: &Output) -> raster_arcade::Result<()> {
    let mut demo = StackDemo::new();
    for &at in &args.clicks {
        demo.click(at);
    }
    for _ in 0..args.frames {
        demo.step();
    }
    println!(
        "{} of {} circles settled after {} frames",
        demo.settled_count(),
        demo.circles.len(),
        args.frames
    );
    out.emit(&falling_canvas(&demo.circles, demo.size()))
}

pub fn eggs(seconds: f32, seed: u64, settings: &Settings, out: &Output) -> raster_arcade::Result<()> {
    log::info!("Catch the Eggs, seed {seed}");
    let mut state = EggState::new(seed);
    settings.configure_eggs(&mut state);
    state.start_game();

    let input = eggs::TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let frames = (seconds.max(0.0) / SIM_DT).ceil() as u32;
    for _ in 0..frames {
        eggs::tick(&mut state, &input, SIM_DT);
        if state.screen == EggScreen::GameOver {
            break;
        }
    }

    for line in state.hud() {
        println!("{line}");
    }
    println!("Bombs caught: {}", state.bombs_caught);
    if state.screen == EggScreen::GameOver {
        println!("{}", state.game_over_reason().message());
    }
    out.emit(&paint(&eggs_scene(&state), EGGS_CANVAS, EGGS_CANVAS))
}

pub fn dxball(
    level: u32,
    runs: u32,
    max_frames: u32,
    seed: u64,
    settings: &Settings,
    out: &Output,
) -> raster_arcade::Result<()> {
    if !(1..=dxball::MAX_LEVELS).contains(&level) {
        return Err(raster_arcade::Error::InvalidArgument(format!(
            "level must be 1 to {}, got {level}",
            dxball::MAX_LEVELS
        )));
    }
    log::info!("DX-Ball, seed {seed}, level {level}, {runs} run(s)");

    let mut state = DxState::new(seed);
    settings.configure_dxball(&mut state);
    let input = dxball::TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut cues = BTreeMap::new();

    for run in 1..=runs {
        state.start_run(level);
        let mut frames = 0;
        while frames < max_frames && state.screen == Screen::Play {
            dxball::tick(&mut state, &input, SIM_DT);
            for cue in state.drain_events() {
                *cues.entry(cue.name()).or_insert(0u32) += 1;
            }
            frames += 1;
        }
        match state.screen {
            Screen::Win => println!("Run {run}: cleared all levels with {} points", state.score),
            Screen::GameOver => println!(
                "Run {run}: game over on level {} with {} points",
                state.level, state.score
            ),
            _ => println!(
                "Run {run}: stopped after {frames} frames on level {} with {} points",
                state.level, state.score
            ),
        }
    }

    for (name, count) in &cues {
        log::info!("Sound cue {name}: {count}");
    }
    println!("{}", state.history.best_line());
    for row in state.history.rows() {
        println!("{row}");
    }
    out.emit(&paint(&dxball_scene(&state), SCREEN_W as u32, SCREEN_H as u32))
}
