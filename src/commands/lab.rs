//! `lab` subcommands

use clap::{Subcommand, ValueEnum};
use glam::{IVec2, Vec2};

use raster_arcade::labs::{
    ClickOutcome, ClipKey, ClipTool, Figure, FloodFillExam, LineWizard, TransformDemo,
    WizardOutcome, bold_line_scene, dotted_circle_scene, hsv_scene, rainbow_scene,
};
use raster_arcade::raster::TransformOp;

use super::{Output, parse_point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FigureArg {
    Triangle,
    House,
}

impl From<FigureArg> for Figure {
    fn from(arg: FigureArg) -> Self {
        match arg {
            FigureArg::Triangle => Figure::Triangle,
            FigureArg::House => Figure::House,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Lab {
    /// Dotted midpoint circle
    DottedCircle {
        #[arg(long, default_value = "320,240", value_parser = parse_point)]
        center: Vec2,
        #[arg(long, default_value_t = 150)]
        radius: i32,
    },
    /// Concentric rainbow circles
    Rainbow {
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Three pixel wide Bresenham line
    BoldLine {
        #[arg(long, default_value = "50,80", value_parser = parse_point)]
        from: Vec2,
        #[arg(long, default_value = "450,400", value_parser = parse_point)]
        to: Vec2,
    },
    /// One hundred HSV gradient rings
    HsvCircles,
    /// Figure transforms with undo and redo
    Transform {
        #[arg(long, value_enum, default_value_t = FigureArg::Triangle)]
        figure: FigureArg,
        /// Menu entries to apply in order: cw, ccw, half, double, move, undo, redo, reset
        #[arg(value_parser = parse_op)]
        ops: Vec<TransformOp>,
    },
    /// Flood fill exam: fill regions by clicking them
    FloodFill {
        /// Click positions (bottom-left origin)
        #[arg(long = "click", value_parser = parse_point)]
        clicks: Vec<Vec2>,
    },
    /// Bresenham input wizard
    Wizard {
        /// Values typed at each step, each followed by Enter
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Liang-Barsky clipping tool
    Clip {
        /// Clicks as x,y (bottom-left origin) or the keys enter, space and reset
        actions: Vec<String>,
    },
}

fn to_ivec(p: Vec2) -> IVec2 {
    p.round().as_ivec2()
}

fn parse_op(s: &str) -> Result<TransformOp, String> {
    TransformOp::from_str(s).ok_or_else(|| format!("unknown transform '{s}'"))
}

pub fn run(lab: Lab, out: &Output) -> raster_arcade::Result<()> {
    let canvas = match lab {
        Lab::DottedCircle { center, radius } => dotted_circle_scene(to_ivec(center), radius),
        Lab::Rainbow { count } => rainbow_scene(count),
        Lab::BoldLine { from, to } => bold_line_scene(to_ivec(from), to_ivec(to)),
        Lab::HsvCircles => hsv_scene(),
        Lab::Transform { figure, ops } => {
            let mut demo = TransformDemo::new(figure.into());
            for op in ops {
                demo.apply(op);
            }
            println!("Total changes: {}", demo.total_changes());
            demo.render()
        }
        Lab::FloodFill { clicks } => {
            let mut exam = FloodFillExam::new();
            for at in clicks {
                match exam.click(to_ivec(at)) {
                    ClickOutcome::Filled(report) => println!("Filled {} pixels", report.filled),
                    ClickOutcome::Boundary => println!("({}, {}) is on a boundary", at.x, at.y),
                    ClickOutcome::OutOfBounds => println!("({}, {}) is off the canvas", at.x, at.y),
                }
            }
            exam.into_canvas()
        }
        Lab::Wizard { values } => {
            let mut wizard = LineWizard::new();
            for value in &values {
                for outcome in wizard.type_str(&format!("{value}\n")) {
                    if let WizardOutcome::Rejected(why) = outcome {
                        println!("Rejected {value:?}: {why:?}");
                    }
                }
            }
            if !wizard.is_drawing() {
                let (heading, hint) = wizard.prompt();
                println!("{heading}\n{hint}");
            }
            println!("{}", wizard.status());
            wizard.render()
        }
        Lab::Clip { actions } => {
            let mut tool = ClipTool::new();
            for action in &actions {
                match parse_point(action) {
                    Ok(p) => tool.click(p),
                    Err(_) => match clip_key(action) {
                        Some(key) => tool.key(key),
                        None => {
                            return Err(raster_arcade::Error::InvalidArgument(format!(
                                "unknown clip action '{action}'"
                            )));
                        }
                    },
                }
            }
            println!("{}", tool.prompt());
            for label in tool.labels() {
                println!("{label}");
            }
            tool.render()
        }
    };
    out.emit(&canvas)
}

fn clip_key(s: &str) -> Option<ClipKey> {
    match s.to_lowercase().as_str() {
        "enter" => Some(ClipKey::Enter),
        "space" => Some(ClipKey::Space),
        "reset" | "r" => Some(ClipKey::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keys() {
        assert_eq!(clip_key("ENTER"), Some(ClipKey::Enter));
        assert_eq!(clip_key("r"), Some(ClipKey::Reset));
        assert_eq!(clip_key("jump"), None);
    }

    #[test]
    fn test_parse_op_aliases() {
        assert_eq!(parse_op("cw"), Ok(TransformOp::RotateClockwise));
        assert!(parse_op("spin").is_err());
    }
}
