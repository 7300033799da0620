//! Transformed figure with an undo/redo menu
//!
//! Two figures share the same pivot and menu: a single triangle and a small
//! house built from a roof, a wall and a door.

use glam::Vec2;

use crate::raster::{Canvas, Rgb, TransformOp, Transformer};

pub const TRANSFORM_SIZE: u32 = 800;
/// Rotation and scale pivot shared by both figures
pub const PIVOT: Vec2 = Vec2::new(225.0, 175.0);

/// A filled polygon part of a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub points: Vec<Vec2>,
    pub color: Rgb,
}

/// Which figure the demo draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Figure {
    Triangle,
    House,
}

impl Figure {
    pub fn parts(&self) -> Vec<Part> {
        match self {
            Figure::Triangle => vec![Part {
                points: vec![
                    Vec2::new(150.0, 150.0),
                    Vec2::new(300.0, 150.0),
                    Vec2::new(225.0, 225.0),
                ],
                color: Rgb::MAGENTA,
            }],
            Figure::House => vec![
                Part {
                    points: vec![
                        Vec2::new(115.0, 200.0),
                        Vec2::new(310.0, 200.0),
                        Vec2::new(212.5, 300.0),
                    ],
                    color: Rgb::new(0.2, 1.0, 0.0),
                },
                Part {
                    points: vec![
                        Vec2::new(125.0, 100.0),
                        Vec2::new(300.0, 100.0),
                        Vec2::new(300.0, 200.0),
                        Vec2::new(125.0, 200.0),
                    ],
                    color: Rgb::new(0.0, 0.2, 0.8),
                },
                Part {
                    points: vec![
                        Vec2::new(200.0, 105.0),
                        Vec2::new(224.0, 105.0),
                        Vec2::new(224.0, 140.0),
                        Vec2::new(200.0, 140.0),
                    ],
                    color: Rgb::YELLOW,
                },
            ],
        }
    }

    /// Offset applied by the translate menu entry
    pub fn translate_step(&self) -> Vec2 {
        match self {
            Figure::Triangle => Vec2::new(180.0, 220.0),
            Figure::House => Vec2::new(100.0, 100.0),
        }
    }
}

/// A figure, its transform and the menu history
#[derive(Debug, Clone)]
pub struct TransformDemo {
    pub figure: Figure,
    pub transformer: Transformer,
}

impl TransformDemo {
    pub fn new(figure: Figure) -> Self {
        Self {
            figure,
            transformer: Transformer::new(figure.translate_step()),
        }
    }

    pub fn apply(&mut self, op: TransformOp) {
        self.transformer.apply(op);
    }

    pub fn total_changes(&self) -> u32 {
        self.transformer.total_changes
    }

    /// Figure parts with the current transform applied
    pub fn transformed_parts(&self) -> Vec<Part> {
        let m = self.transformer.current.matrix(PIVOT);
        self.figure
            .parts()
            .into_iter()
            .map(|part| Part {
                points: part.points.iter().map(|p| m.transform_point2(*p)).collect(),
                color: part.color,
            })
            .collect()
    }

    /// Render on a black 800x800 canvas
    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(TRANSFORM_SIZE, TRANSFORM_SIZE, Rgb::BLACK);
        for part in self.transformed_parts() {
            match part.points.as_slice() {
                [a, b, c] => canvas.fill_triangle(*a, *b, *c, part.color, 1.0),
                [a, b, c, d] => canvas.fill_quad([*a, *b, *c, *d], part.color, 1.0),
                _ => {}
            }
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_render_matches_triangle() {
        let demo = TransformDemo::new(Figure::Triangle);
        let canvas = demo.render();
        assert_eq!(canvas.get_pixel(225, 170), Some(Rgb::MAGENTA));
        assert_eq!(canvas.get_pixel(400, 400), Some(Rgb::BLACK));
    }

    #[test]
    fn test_translate_moves_figure() {
        let mut demo = TransformDemo::new(Figure::Triangle);
        demo.apply(TransformOp::Translate);
        let canvas = demo.render();
        assert_eq!(canvas.get_pixel(225, 170), Some(Rgb::BLACK));
        assert_eq!(canvas.get_pixel(405, 390), Some(Rgb::MAGENTA));
    }

    #[test]
    fn test_house_door_drawn_over_wall() {
        let demo = TransformDemo::new(Figure::House);
        let canvas = demo.render();
        assert_eq!(canvas.get_pixel(210, 120), Some(Rgb::YELLOW));
        assert_eq!(canvas.get_pixel(150, 150), Some(Rgb::new(0.0, 0.2, 0.8)));
        assert_eq!(canvas.get_pixel(212, 250), Some(Rgb::new(0.2, 1.0, 0.0)));
    }

    #[test]
    fn test_scale_half_shrinks_about_pivot() {
        let mut demo = TransformDemo::new(Figure::House);
        demo.apply(TransformOp::ScaleHalf);
        let parts = demo.transformed_parts();
        // Wall corner (125, 100) moves halfway to the pivot
        assert!(parts[1].points[0].distance(Vec2::new(175.0, 137.5)) < 1e-3);
        assert_eq!(demo.total_changes(), 1);
    }
}
