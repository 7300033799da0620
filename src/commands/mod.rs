//! Native command line front end

mod games;
mod lab;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::Vec2;

use raster_arcade::Settings;
use raster_arcade::raster::Canvas;
use raster_arcade::settings::QualityPreset;

#[derive(Debug, Parser)]
#[command(name = "raster-arcade")]
#[command(version)]
#[command(about = "Raster graphics labs, falling-circle demos and two arcade games", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Write the final frame as a PNG instead of printing ASCII art
    #[arg(long, global = true)]
    pub png: Option<PathBuf>,
    /// Columns of the ASCII output
    #[arg(long, global = true)]
    pub ascii_width: Option<u32>,
    /// Settings file (JSON); missing files fall back to defaults
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
    /// Seed for the games
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Effects quality: low, medium or high
    #[arg(long, global = true, value_parser = parse_quality)]
    pub quality: Option<QualityPreset>,
    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rasterization labs, exams and assignments
    Lab {
        #[command(subcommand)]
        lab: lab::Lab,
    },
    /// Trace and draw the monument figure
    Monument {
        #[arg(long, default_value_t = 760)]
        width: i32,
        #[arg(long, default_value_t = 500)]
        height: i32,
        /// Segments per leg
        #[arg(long, default_value_t = 9)]
        segments: i32,
    },
    /// Circles fall to the floor and overlap
    Drop(games::FallingArgs),
    /// Circles fall and stack on each other
    Stack(games::FallingArgs),
    /// Let the AI play Catch the Eggs
    Eggs {
        /// Seconds of play to simulate
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
    },
    /// Let the AI play DX-Ball
    Dxball {
        /// Starting level (1 to 5)
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Runs to play back to back
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Frame cap per run
        #[arg(long, default_value_t = 120 * 300)]
        max_frames: u32,
    },
}

pub(crate) fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(Vec2::new(parse(x)?, parse(y)?))
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality '{s}'"))
}

/// Where a finished canvas goes
pub(crate) struct Output {
    png: Option<PathBuf>,
    ascii_width: u32,
}

impl Output {
    pub(crate) fn emit(&self, canvas: &Canvas) -> raster_arcade::Result<()> {
        match &self.png {
            Some(path) => canvas.save_png(path),
            None => {
                print!("{}", canvas.to_ascii(self.ascii_width));
                Ok(())
            }
        }
    }
}

/// Loaded settings with command line overrides applied
fn settings_for(cli: &Cli) -> raster_arcade::Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(width) = cli.ascii_width {
        settings.ascii_width = width;
    }
    if let Some(quality) = cli.quality {
        settings.quality = quality;
    }
    Ok(settings)
}

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = settings_for(&cli)?;
    let out = Output {
        png: cli.png.clone(),
        ascii_width: settings.ascii_width,
    };
    let seed = settings.seed.unwrap_or_else(games::clock_seed);

    match cli.command {
        Command::Lab { lab } => lab::run(lab, &out)?,
        Command::Monument {
            width,
            height,
            segments,
        } => {
            let params = raster_arcade::monument::MonumentParams {
                width,
                height,
                segments,
            };
            out.emit(&raster_arcade::monument::render_monument(&params)?)?;
        }
        Command::Drop(args) => games::drop(&args, &out)?,
        Command::Stack(args) => games::stack(&args, &out)?,
        Command::Eggs { seconds } => games::eggs(seconds, seed, &settings, &out)?,
        Command::Dxball {
            level,
            runs,
            max_frames,
        } => games::dxball(level, runs, max_frames, seed, &settings, &out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10, 20.5"), Ok(Vec2::new(10.0, 20.5)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_dxball() {
        let cli = Cli::parse_from([
            "raster-arcade",
            "dxball",
            "--level",
            "3",
            "--runs",
            "2",
            "--seed",
            "9",
            "--quality",
            "high",
        ]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.quality, Some(QualityPreset::High));
        assert!(matches!(
            cli.command,
            Command::Dxball {
                level: 3,
                runs: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from(["raster-arcade", "--ascii-width", "40", "eggs", "--seconds", "5"]);
        let settings = settings_for(&cli).expect("settings");
        assert_eq!(settings.ascii_width, 40);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
