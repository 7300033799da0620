//! Scene builders: game state in, draw list out

use glam::Vec2;

use super::draw_list::DrawList;
use super::vertex::colors;
use crate::raster::Rgb;
use crate::sim::dxball::state::{LEVEL_BUTTON_SIZE, level_button_center, menu_row_y};
use crate::sim::dxball::{DxState, MAX_LEVELS, SCREEN_H, SCREEN_W, Screen};
use crate::sim::eggs::state::{MENU_BUTTON_HALF, WORLD_MAX, WORLD_MIN};
use crate::sim::eggs::{EggKind, EggScreen, EggState, MenuItem};
use crate::sim::FallingCircle;

/// Segments for the falling-circle demos
pub const FALLING_SEGMENTS: u32 = 50;

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

fn lighten(c: Rgb, amount: f32) -> Rgb {
    c.blend_over(Rgb::WHITE, 1.0 - amount)
}

// --- DX-Ball ---

pub fn dxball_scene(state: &DxState) -> DrawList {
    let extent = Vec2::new(SCREEN_W, SCREEN_H);
    let mut list = DrawList::new(extent, colors::DX_BACKGROUND);

    // Vertical gradient in 14 bands
    const BANDS: usize = 14;
    let band_h = SCREEN_H / BANDS as f32;
    for i in 0..BANDS {
        let t = i as f32 / (BANDS - 1) as f32;
        list.rect(
            Vec2::new(SCREEN_W / 2.0, (i as f32 + 0.5) * band_h),
            Vec2::new(SCREEN_W / 2.0, band_h / 2.0 + 0.5),
            lerp_color(colors::DX_BACKGROUND, colors::DX_BACKGROUND_TOP, t),
        );
    }

    match state.screen {
        Screen::Menu => {
            for i in 0..state.menu_items().len() {
                let color = if i == state.menu_index {
                    colors::BUTTON_SELECTED
                } else {
                    colors::BUTTON
                };
                list.rect(
                    Vec2::new(SCREEN_W / 2.0, menu_row_y(i) + 8.0),
                    Vec2::new(110.0, 15.0),
                    color,
                );
            }
        }
        Screen::LevelSelect => {
            for i in 0..MAX_LEVELS {
                let level = i + 1;
                let color = if level == state.level {
                    colors::BUTTON_SELECTED
                } else {
                    colors::BUTTON
                };
                list.rect(level_button_center(i), LEVEL_BUTTON_SIZE * 0.5, color);
            }
        }
        Screen::Help | Screen::HighScores => {
            list.rect(
                extent * 0.5,
                Vec2::new(SCREEN_W * 0.4, SCREEN_H * 0.4),
                colors::OVERLAY,
            );
        }
        Screen::Play | Screen::Pause | Screen::Win | Screen::GameOver => {
            dxball_playfield(state, &mut list);
            if state.screen != Screen::Play {
                list.overlay(colors::OVERLAY);
            }
        }
    }

    list
}

fn dxball_playfield(state: &DxState, list: &mut DrawList) {
    for brick in state.bricks.iter().filter(|b| b.alive) {
        let half = brick.half_extents();
        list.rect(brick.center, half, brick.color.with_alpha(1.0));
        // Top highlight strip, brighter for bricks that take several hits
        let shine = if brick.indestructible() {
            0.15
        } else if brick.hp > 1 {
            0.5
        } else {
            0.3
        };
        list.rect(
            brick.center + Vec2::new(0.0, half.y - 2.0),
            Vec2::new(half.x, 2.0),
            lighten(brick.color, shine).with_alpha(1.0),
        );
    }

    // Newest trail point first
    let ball = &state.ball;
    let trail_color = if ball.fireball {
        colors::FIREBALL
    } else {
        colors::BALL
    };
    let n = state.trail.len().max(1) as f32;
    for (i, p) in state.trail.iter().enumerate() {
        let fade = 1.0 - i as f32 / n;
        let mut c = trail_color;
        c[3] = 0.5 * fade;
        list.circle_with(*p, ball.radius * (0.4 + 0.6 * fade), c, 16);
    }

    let paddle = &state.paddle;
    let paddle_color = if paddle.shooting {
        colors::PADDLE_SHOOTING
    } else {
        colors::PADDLE
    };
    list.rect(paddle.pos, paddle.half_extents(), paddle_color);
    if paddle.shooting {
        // Gun barrels on both ends
        for side in [-1.0, 1.0] {
            let x = paddle.pos.x + side * (paddle.w / 2.0 - 6.0);
            list.rect(
                Vec2::new(x, paddle.pos.y + paddle.h / 2.0 + 4.0),
                Vec2::new(3.0, 4.0),
                colors::BULLET,
            );
        }
    }

    if ball.fireball {
        list.ring(ball.pos, ball.radius, ball.radius * 1.6, [1.0, 0.6, 0.1, 0.35]);
    }
    list.circle(
        ball.pos,
        ball.radius,
        if ball.fireball { colors::FIREBALL } else { colors::BALL },
    );
    if ball.through {
        list.ring(ball.pos, ball.radius * 1.1, ball.radius * 1.4, [0.3, 0.9, 0.9, 0.8]);
    }

    for perk in &state.perks {
        let color = perk.kind.color();
        // Pulsing glow
        let pulse = 0.5 + 0.5 * (state.elapsed * 6.0 + perk.id as f32).sin();
        list.ring(
            perk.pos,
            perk.size * 0.6,
            perk.size * (0.8 + 0.2 * pulse),
            color.with_alpha(0.35),
        );
        list.rect(perk.pos, Vec2::splat(perk.size * 0.5), color.with_alpha(1.0));
    }

    for bullet in &state.bullets {
        list.rect(bullet.pos, bullet.size * 0.5, colors::BULLET);
    }

    // Spare lives along the bottom edge
    for i in 0..state.lives.max(0) {
        list.circle_with(
            Vec2::new(16.0 + i as f32 * 16.0, 12.0),
            5.0,
            colors::BALL,
            12,
        );
    }
}

// --- Catch the eggs ---

pub fn eggs_scene(state: &EggState) -> DrawList {
    let size = WORLD_MAX - WORLD_MIN;
    let mut list = DrawList::new(Vec2::splat(size), colors::SKY).with_origin(Vec2::splat(WORLD_MIN));
    let o = state.shake_offset();

    eggs_backdrop(state, &mut list, o);

    // Crossbar the chicken walks on
    let bar_y = state.chicken.y - 0.07;
    list.line(
        Vec2::new(WORLD_MIN, bar_y) + o,
        Vec2::new(WORLD_MAX, bar_y) + o,
        0.02,
        colors::WOOD,
    );

    // Chicken
    let c = Vec2::new(state.chicken.x, state.chicken.y + state.chicken.bob) + o;
    let facing = if state.chicken.vx >= 0.0 { 1.0 } else { -1.0 };
    list.circle(c, 0.06, colors::CHICKEN);
    list.circle(c + Vec2::new(0.05 * facing, 0.05), 0.035, colors::CHICKEN);
    list.triangle(
        c + Vec2::new(0.08 * facing, 0.06),
        c + Vec2::new(0.08 * facing, 0.04),
        c + Vec2::new(0.11 * facing, 0.05),
        colors::BEAK,
    );
    list.circle_with(c + Vec2::new(0.05 * facing, 0.09), 0.012, [0.9, 0.1, 0.1, 1.0], 10);
    list.circle_with(c + Vec2::new(0.06 * facing, 0.055), 0.006, [0.0, 0.0, 0.0, 1.0], 8);

    for obj in &state.objects {
        let p = obj.pos + o;
        let shell = obj.kind.shell_color().with_alpha(1.0);
        if obj.kind == EggKind::Bomb {
            list.circle(p, obj.radius, shell);
            let tip = Vec2::from_angle(obj.rot.to_radians()).rotate(Vec2::Y) * obj.radius * 1.6;
            list.line(p, p + tip, 0.006, colors::WOOD);
            list.circle_with(p + tip, 0.01, [1.0, 0.5, 0.0, 1.0], 8);
        } else {
            // Egg: a tall body plus a narrower cap
            list.circle(p, obj.radius, shell);
            list.circle(p + Vec2::new(0.0, obj.radius * 0.5), obj.radius * 0.8, shell);
            list.circle_with(
                p + Vec2::new(-obj.radius * 0.3, obj.radius * 0.6),
                obj.radius * 0.2,
                [1.0, 1.0, 1.0, 0.6],
                10,
            );
        }
    }

    // Basket: trapezoid body and a rim
    let b = &state.basket;
    let top = b.y + b.h / 2.0;
    let bottom = b.y - b.h / 2.0;
    let inset = b.half_w * 0.2;
    let bl = Vec2::new(b.x - b.half_w + inset, bottom) + o;
    let br = Vec2::new(b.x + b.half_w - inset, bottom) + o;
    let tr = Vec2::new(b.x + b.half_w, top) + o;
    let tl = Vec2::new(b.x - b.half_w, top) + o;
    list.triangle(bl, br, tr, colors::BASKET);
    list.triangle(bl, tr, tl, colors::BASKET);
    list.line(tl, tr, 0.02, colors::WOOD);
    for i in 1..4 {
        let y = bottom + b.h * i as f32 / 4.0;
        list.line(
            Vec2::new(b.x - b.half_w * 0.9, y) + o,
            Vec2::new(b.x + b.half_w * 0.9, y) + o,
            0.005,
            colors::WOOD,
        );
    }

    for p in &state.particles {
        list.circle_with(p.pos + o, p.size, p.color.with_alpha(p.alpha), 8);
    }

    match state.screen {
        EggScreen::Menu => {
            list.overlay([1.0, 1.0, 1.0, 0.35]);
            for (i, item) in MenuItem::ALL.iter().enumerate() {
                let enabled = *item != MenuItem::Resume || state.can_resume;
                let mut color = if i == state.menu_index {
                    colors::BUTTON_SELECTED
                } else {
                    colors::BUTTON
                };
                if !enabled {
                    color[3] = 0.4;
                }
                list.rect(item.button_center(), MENU_BUTTON_HALF, color);
            }
        }
        EggScreen::Paused | EggScreen::Help => list.overlay(colors::OVERLAY),
        EggScreen::GameOver => {
            list.overlay(colors::OVERLAY);
            // Menu (left) and Restart (right) click halves
            list.rect(Vec2::new(-0.3, -0.3), MENU_BUTTON_HALF * 0.6, colors::BUTTON);
            list.rect(Vec2::new(0.3, -0.3), MENU_BUTTON_HALF * 0.6, colors::BUTTON_SELECTED);
        }
        EggScreen::Playing => {
            // Wind gauge in the top-left corner
            let s = state.wind.strength();
            if s > 0.01 {
                let dir = state.wind.force.signum();
                let start = Vec2::new(-0.85, 0.9);
                list.line(
                    start,
                    start + Vec2::new(0.2 * s * dir, 0.0),
                    0.015,
                    [1.0, 1.0, 1.0, 0.8],
                );
            }
        }
    }

    list
}

fn eggs_backdrop(state: &EggState, list: &mut DrawList, o: Vec2) {
    // Sun with a soft halo
    let sun = Vec2::new(0.75, 0.8) + o;
    list.ring(sun, 0.1, 0.14, [1.0, 0.95, 0.5, 0.35]);
    list.circle(sun, 0.1, colors::SUN);

    for cloud in &state.clouds {
        let p = cloud.pos + o;
        let s = cloud.scale;
        list.circle(p, 0.06 * s, colors::CLOUD);
        list.circle(p + Vec2::new(0.06 * s, 0.02 * s), 0.05 * s, colors::CLOUD);
        list.circle(p + Vec2::new(-0.06 * s, 0.01 * s), 0.045 * s, colors::CLOUD);
    }

    // Rolling hills
    list.circle_with(Vec2::new(-0.6, -1.3) + o, 0.9, colors::HILL, 48);
    list.circle_with(Vec2::new(0.5, -1.4) + o, 1.0, colors::HILL, 48);

    // House on the left
    let h = Vec2::new(-0.7, -0.55) + o;
    list.rect(h, Vec2::new(0.14, 0.12), colors::WALL);
    list.triangle(
        h + Vec2::new(-0.18, 0.12),
        h + Vec2::new(0.18, 0.12),
        h + Vec2::new(0.0, 0.3),
        colors::ROOF,
    );
    list.rect(h + Vec2::new(0.0, -0.05), Vec2::new(0.035, 0.07), colors::WOOD);

    // Haystacks on the right
    for x in [0.55, 0.78] {
        let base = Vec2::new(x, -0.68) + o;
        list.triangle(
            base + Vec2::new(-0.1, 0.0),
            base + Vec2::new(0.1, 0.0),
            base + Vec2::new(0.0, 0.16),
            colors::HAY,
        );
    }

    // Grass strip and flowers
    list.rect_between(
        Vec2::new(WORLD_MIN, WORLD_MIN) + o,
        Vec2::new(WORLD_MAX, -0.7) + o,
        colors::GRASS,
    );
    for f in &state.flowers {
        let p = f.pos + o;
        list.line(p - Vec2::new(0.0, 0.04 * f.scale), p, 0.006, [0.1, 0.4, 0.1, 1.0]);
        list.circle_with(p, 0.018 * f.scale, f.color.with_alpha(1.0), 10);
        list.circle_with(p, 0.007 * f.scale, [1.0, 0.9, 0.2, 1.0], 8);
    }
}

// --- Falling circles ---

pub fn falling_scene(circles: &[FallingCircle], size: Vec2) -> DrawList {
    let mut list = DrawList::new(size, colors::FALLING_BG);
    for c in circles {
        list.circle_with(c.pos, c.radius, c.color.with_alpha(1.0), FALLING_SEGMENTS);
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::Shape;
    use crate::sim::{DropDemo, StackDemo};

    #[test]
    fn test_dxball_menu_has_one_button_per_item() {
        let state = DxState::new(1);
        let list = dxball_scene(&state);
        let buttons = list
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Rect { half_size, .. } if *half_size == Vec2::new(110.0, 15.0)))
            .count();
        assert_eq!(buttons, state.menu_items().len());
        assert_eq!(list.extent, Vec2::new(SCREEN_W, SCREEN_H));
    }

    #[test]
    fn test_dxball_play_draws_every_live_brick() {
        let mut state = DxState::new(1);
        state.start_run(1);
        let alive = state.bricks.iter().filter(|b| b.alive).count();
        let full = dxball_scene(&state).len();
        state.bricks[0].alive = false;
        assert_eq!(alive, 112);
        // Body plus highlight per brick
        assert_eq!(full - dxball_scene(&state).len(), 2);
    }

    #[test]
    fn test_eggs_scene_uses_world_space() {
        let state = EggState::new(3);
        let list = eggs_scene(&state);
        assert_eq!(list.origin, Vec2::splat(-1.0));
        assert_eq!(list.extent, Vec2::splat(2.0));
        assert!(!list.is_empty());
    }

    #[test]
    fn test_eggs_menu_buttons_follow_selection() {
        let mut state = EggState::new(3);
        state.menu_index = 2;
        let list = eggs_scene(&state);
        let selected: Vec<Vec2> = list
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { center, color, .. } if *color == colors::BUTTON_SELECTED => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![MenuItem::Help.button_center()]);
    }

    #[test]
    fn test_falling_scene_one_circle_each() {
        let mut demo = DropDemo::new();
        demo.click(Vec2::new(100.0, 500.0));
        demo.click(Vec2::new(300.0, 400.0));
        let list = falling_scene(&demo.circles, demo.size());
        assert_eq!(list.len(), 2);
        assert!(matches!(list.shapes[0], Shape::Circle { segments: FALLING_SEGMENTS, .. }));

        let stack = StackDemo::new();
        assert!(falling_scene(&stack.circles, stack.size()).is_empty());
    }
}
