//! Falling circle toys
//!
//! Clicks spawn circles that fall under a per-frame gravity. The drop demo
//! lets them pile through each other on the floor; the stack demo settles
//! each circle on the first resting circle it touches, shoving smaller ones
//! aside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::raster::{PASTEL_31, Rgb};

/// Gravity in pixels per frame squared
pub const GRAVITY: f32 = 0.5;
/// Horizontal shove applied to a smaller resting circle
pub const PUSH_FORCE: f32 = 2.0;
/// Radii cycled through by successive clicks
pub const RADII: [f32; 7] = [15.0, 20.0, 25.0, 18.0, 22.0, 28.0, 16.0];
/// Wall-clock length of one animation frame
pub const FRAME_SECS: f32 = 0.016;

pub const DROP_SIZE: Vec2 = Vec2::new(800.0, 600.0);
pub const STACK_SIZE: Vec2 = Vec2::new(1000.0, 750.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingCircle {
    pub pos: Vec2,
    pub radius: f32,
    pub vy: f32,
    pub color: Rgb,
    pub settled: bool,
}

impl FallingCircle {
    /// Circle for the `n`th click at `pos`
    pub fn for_click(n: usize, pos: Vec2) -> Self {
        Self {
            pos,
            radius: RADII[n % RADII.len()],
            vy: 0.0,
            color: PASTEL_31[n % PASTEL_31.len()],
            settled: false,
        }
    }
}

/// Circles bounce to a stop on the floor and overlap freely
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropDemo {
    pub circles: Vec<FallingCircle>,
    clicks: usize,
}

impl DropDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Vec2 {
        DROP_SIZE
    }

    pub fn click(&mut self, pos: Vec2) {
        self.circles.push(FallingCircle::for_click(self.clicks, pos));
        self.clicks += 1;
    }

    /// Advance one animation frame
    pub fn step(&mut self) {
        for c in &mut self.circles {
            c.vy -= GRAVITY;
            c.pos.y += c.vy;
            if c.pos.y - c.radius < 0.0 {
                c.pos.y = c.radius;
                c.vy = 0.0;
            }
        }
    }
}

/// Circles come to rest on the floor or on top of each other
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StackDemo {
    pub circles: Vec<FallingCircle>,
    clicks: usize,
}

impl StackDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Vec2 {
        STACK_SIZE
    }

    pub fn click(&mut self, pos: Vec2) {
        self.circles.push(FallingCircle::for_click(self.clicks, pos));
        self.clicks += 1;
    }

    pub fn settled_count(&self) -> usize {
        self.circles.iter().filter(|c| c.settled).count()
    }

    /// Advance one animation frame
    ///
    /// Circles are processed in insertion order, so one that settles this
    /// frame can already catch a later one.
    pub fn step(&mut self) {
        for i in 0..self.circles.len() {
            if self.circles[i].settled {
                continue;
            }
            self.circles[i].vy -= GRAVITY;
            let falling = self.circles[i];
            let next_y = falling.pos.y + falling.vy;

            let landed_on = (0..self.circles.len()).find(|&j| {
                let other = &self.circles[j];
                j != i
                    && other.settled
                    && Vec2::new(falling.pos.x, next_y).distance(other.pos)
                        < falling.radius + other.radius
            });

            if let Some(j) = landed_on {
                if falling.radius > self.circles[j].radius {
                    push_aside(&mut self.circles[j], falling.pos.x);
                }
                let other = self.circles[j];
                let c = &mut self.circles[i];
                c.pos.y = other.pos.y + other.radius + c.radius;
                c.vy = 0.0;
                c.settled = true;
                log::debug!("Circle {i} settled on circle {j}");
            } else {
                let c = &mut self.circles[i];
                if next_y - c.radius <= 0.0 {
                    c.pos.y = c.radius;
                    c.vy = 0.0;
                    c.settled = true;
                } else {
                    c.pos.y = next_y;
                }
            }
        }
    }
}

fn push_aside(other: &mut FallingCircle, from_x: f32) {
    let dir = if other.pos.x - from_x >= 0.0 { 1.0 } else { -1.0 };
    other.pos.x += dir * PUSH_FORCE;
    if other.pos.x - other.radius < 0.0 {
        other.pos.x = other.radius;
    } else if other.pos.x + other.radius > STACK_SIZE.x {
        other.pos.x = STACK_SIZE.x - other.radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_cycles_radius_and_color() {
        let mut demo = DropDemo::new();
        for i in 0..8 {
            demo.click(Vec2::new(100.0 + i as f32 * 50.0, 300.0));
        }
        assert_eq!(demo.circles[0].radius, 15.0);
        assert_eq!(demo.circles[7].radius, 15.0);
        assert_eq!(demo.circles[1].color, PASTEL_31[1]);
    }

    #[test]
    fn test_drop_rests_on_floor() {
        let mut demo = DropDemo::new();
        demo.click(Vec2::new(400.0, 500.0));
        for _ in 0..200 {
            demo.step();
        }
        assert_eq!(demo.circles[0].pos.y, 15.0);
        assert_eq!(demo.circles[0].vy, 0.0);
    }

    #[test]
    fn test_drop_integrates_velocity_first() {
        let mut demo = DropDemo::new();
        demo.click(Vec2::new(400.0, 500.0));
        demo.step();
        demo.step();
        // vy: -0.5 then -1.0
        assert!((demo.circles[0].pos.y - 498.5).abs() < 1e-4);
    }

    #[test]
    fn test_stack_settles_on_top() {
        let mut demo = StackDemo::new();
        demo.click(Vec2::new(500.0, 300.0));
        for _ in 0..100 {
            demo.step();
        }
        assert!(demo.circles[0].settled);
        assert_eq!(demo.circles[0].pos.y, 15.0);

        // Second circle (radius 20) lands on the first
        demo.click(Vec2::new(505.0, 400.0));
        for _ in 0..100 {
            demo.step();
        }
        let top = demo.circles[1];
        assert!(top.settled);
        assert_eq!(top.pos.y, 15.0 + 15.0 + 20.0);
        // The larger circle shoved the smaller one away from it
        assert_eq!(demo.circles[0].pos.x, 498.0);
        assert_eq!(demo.settled_count(), 2);
    }

    #[test]
    fn test_smaller_circle_does_not_push() {
        let mut demo = StackDemo::new();
        // Radii 15, 20 and 25 spread across the floor
        demo.click(Vec2::new(100.0, 200.0));
        demo.click(Vec2::new(300.0, 200.0));
        demo.click(Vec2::new(500.0, 200.0));
        for _ in 0..100 {
            demo.step();
        }
        // Radius 18 falls onto the radius 25 circle
        demo.click(Vec2::new(500.0, 400.0));
        for _ in 0..100 {
            demo.step();
        }
        assert_eq!(demo.circles[2].pos.x, 500.0);
        assert_eq!(demo.circles[3].pos.y, 25.0 + 25.0 + 18.0);
    }

    #[test]
    fn test_push_clamps_to_wall() {
        let mut c = FallingCircle::for_click(0, Vec2::new(986.0, 15.0));
        c.settled = true;
        push_aside(&mut c, 900.0);
        assert_eq!(c.pos.x, 1000.0 - 15.0);
    }
}
