//! DX-Ball tick: screen input and the play update
//!
//! Collisions run in a fixed order each frame: walls, paddle, bricks, then
//! perks and bullets. A lost life ends the frame early.

use glam::Vec2;

use super::state::*;
use crate::sim::collision::{aabb_overlap, circle_aabb, normalize_or_x, point_in_rect};

/// Input for a single frame
///
/// `left_held`/`right_held` mirror the arrow keys' current state; the other
/// flags are one-shot presses.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Pointer x in scene pixels when it moved this frame
    pub pointer_x: Option<f32>,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub enter: bool,
    pub escape: bool,
    /// `P`
    pub pause: bool,
    /// Space
    pub launch: bool,
    /// `F` or right click
    pub fire: bool,
    /// Left click in scene pixels, y up
    pub click: Option<Vec2>,
    /// AI plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Reset everything except the held arrows and the AI toggle
    pub fn clear_one_shots(&mut self) {
        *self = Self {
            left_held: self.left_held,
            right_held: self.right_held,
            idle_mode: self.idle_mode,
            ..Default::default()
        };
    }
}

/// Advance one frame
pub fn tick(state: &mut DxState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.elapsed += dt;

    let mut input = input.clone();
    if input.idle_mode && state.screen == Screen::Play {
        drive_idle(state, &mut input, dt);
    }

    handle_input(state, &input);

    if state.screen == Screen::Play {
        state.play_time += dt;
        update(state, &input, dt);
        update_trail(state);
    }
}

fn handle_input(state: &mut DxState, input: &TickInput) {
    match state.screen {
        Screen::Menu => {
            let count = state.menu_items().len();
            if input.up {
                state.menu_index = (state.menu_index + count - 1) % count;
            }
            if input.down {
                state.menu_index = (state.menu_index + 1) % count;
            }
            if let Some(at) = input.click {
                let hit = (0..count).find(|&i| {
                    let row = menu_row_y(i);
                    (at.x - SCREEN_W / 2.0).abs() < 100.0 && at.y > row && at.y < row + 25.0
                });
                if let Some(i) = hit {
                    state.menu_index = i;
                    activate(state, i);
                    return;
                }
            }
            if input.enter {
                let index = state.menu_index % count;
                activate(state, index);
            }
            if input.escape {
                state.exit_requested = true;
            }
        }
        Screen::LevelSelect => {
            if input.left {
                state.level = state.level.saturating_sub(1).clamp(1, MAX_LEVELS);
            }
            if input.right {
                state.level = (state.level + 1).clamp(1, MAX_LEVELS);
            }
            if let Some(at) = input.click {
                let hit = (0..MAX_LEVELS)
                    .find(|&i| point_in_rect(at, level_button_center(i), LEVEL_BUTTON_SIZE / 2.0));
                if let Some(i) = hit {
                    state.level = i + 1;
                    state.start_level();
                    return;
                }
            }
            if input.enter {
                state.start_level();
            } else if input.escape {
                state.screen = Screen::Menu;
            }
        }
        Screen::Help | Screen::HighScores => {
            if input.enter || input.escape {
                state.screen = Screen::Menu;
            }
        }
        Screen::Win | Screen::GameOver => {
            if input.enter {
                state.screen = Screen::Menu;
            }
        }
        Screen::Play => {
            if input.escape || input.pause {
                state.screen = Screen::Pause;
                state.can_resume = true;
                return;
            }
            if input.launch {
                state.launch(Vec2::new(0.2, 1.0));
            }
            if input.click.is_some() {
                state.launch(Vec2::Y);
            }
            if input.fire {
                state.fire_bullet();
            }
        }
        Screen::Pause => {
            if input.escape || input.pause {
                state.screen = Screen::Play;
            }
        }
    }
}

fn activate(state: &mut DxState, index: usize) {
    let Some(&entry) = state.menu_items().get(index) else {
        return;
    };
    match entry {
        MenuEntry::Resume => state.screen = Screen::Play,
        MenuEntry::Start => state.new_game(),
        MenuEntry::HighScores => state.screen = Screen::HighScores,
        MenuEntry::Help => state.screen = Screen::Help,
        MenuEntry::Exit => state.exit_requested = true,
    }
}

/// Fill in AI input for one frame
fn drive_idle(state: &DxState, input: &mut TickInput, dt: f32) {
    let ball = &state.ball;
    let paddle = &state.paddle;

    if ball.stuck {
        input.launch = true;
    }
    if paddle.shooting && state.bullets.len() < 2 {
        input.fire = true;
    }

    let target = if !ball.stuck && ball.vel.y < 0.0 {
        // Aim slightly off centre so the rebound angle varies
        let offset = (state.elapsed * 0.7).sin() * paddle.w * 0.3;
        predict_landing_x(ball, paddle.pos.y + paddle.h / 2.0) + offset
    } else if let Some(perk) = state
        .perks
        .iter()
        .filter(|p| p.kind.is_beneficial())
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        perk.pos.x
    } else {
        ball.pos.x
    };

    let max_step = paddle.speed * dt;
    input.pointer_x = Some(paddle.pos.x + (target - paddle.pos.x).clamp(-max_step, max_step));
}

/// Where a descending ball crosses `y`, folding off the side walls
fn predict_landing_x(ball: &Ball, y: f32) -> f32 {
    let frames = (ball.pos.y - ball.radius - y) / -ball.vel.y;
    let lo = ball.radius;
    let span = SCREEN_W - 2.0 * ball.radius;
    let raw = ball.pos.x + ball.vel.x * frames.max(0.0) - lo;
    let folded = raw.rem_euclid(2.0 * span);
    lo + if folded > span { 2.0 * span - folded } else { folded }
}

/// Reflect the ball direction off `normal`, keeping its current speed
fn reflect_ball(ball: &mut Ball, normal: Vec2) {
    let speed = ball.vel.length();
    if speed < 1e-6 {
        return;
    }
    let dir = ball.vel / speed;
    let r = dir - normal * (2.0 * dir.dot(normal));
    ball.vel = normalize_or_x(r) * ball.speed;
}

/// One hit on a breakable brick
fn damage_brick(state: &mut DxState, index: usize) {
    let brick = &mut state.bricks[index];
    let before = brick.hp;
    brick.hp -= 1;
    let score = brick.score;
    let destroyed = before > 0 && brick.hp <= 0;
    if destroyed {
        brick.alive = false;
    }
    let (center, indestructible) = (brick.center, brick.indestructible());

    state.score += score;
    state.cue(SoundCue::Brick);
    if destroyed {
        state.maybe_spawn_perk(center, indestructible);
    }
}

fn update(state: &mut DxState, input: &TickInput, dt: f32) {
    state.global_speed_gain += dt * SPEED_GAIN_RATE;
    state.ball.speed += dt * BALL_ACCEL;
    update_timers(state, dt);

    let paddle = &mut state.paddle;
    let mut vx = 0.0;
    if input.left_held {
        vx -= paddle.speed;
    }
    if input.right_held {
        vx += paddle.speed;
    }
    paddle.pos.x += vx * dt;
    if let Some(x) = input.pointer_x {
        paddle.pos.x = x;
    }
    paddle.clamp_x();

    if state.ball.stuck {
        state.ball.pos = state.paddle.rest_point(state.ball.radius);
    } else if !update_ball(state, dt) {
        return;
    }

    if !update_perks(state, dt) {
        return;
    }
    update_bullets(state, dt);

    if state.breakable_left() == 0 {
        if state.level < MAX_LEVELS {
            state.level += 1;
            state.load_level(state.level);
            state.reset_ball();
            log::debug!("Advanced to level {}", state.level);
        } else {
            state.win();
        }
    }
}

fn update_timers(state: &mut DxState, dt: f32) {
    let ball = &mut state.ball;
    if ball.through {
        ball.through_timer -= dt;
        if ball.through_timer <= 0.0 {
            ball.through = false;
        }
    }
    if ball.fireball {
        ball.fireball_timer -= dt;
        if ball.fireball_timer <= 0.0 {
            ball.fireball = false;
        }
    }

    let paddle = &mut state.paddle;
    if paddle.width_timer > 0.0 {
        paddle.width_timer -= dt;
        if paddle.width_timer <= 0.0 {
            paddle.width_timer = 0.0;
            paddle.w = PADDLE_W;
        }
    }
    if paddle.shooting {
        paddle.shooting_timer -= dt;
        if paddle.shooting_timer <= 0.0 {
            paddle.shooting = false;
        }
    }
}

/// Move the free ball and resolve its collisions; false when a life was lost
fn update_ball(state: &mut DxState, dt: f32) -> bool {
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    let mut wall_hits = 0;
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs();
        wall_hits += 1;
    }
    if ball.pos.x + ball.radius > SCREEN_W {
        ball.pos.x = SCREEN_W - ball.radius;
        ball.vel.x = -ball.vel.x.abs();
        wall_hits += 1;
    }
    if ball.pos.y + ball.radius > SCREEN_H {
        ball.pos.y = SCREEN_H - ball.radius;
        ball.vel.y = -ball.vel.y.abs();
        wall_hits += 1;
    }
    for _ in 0..wall_hits {
        state.cue(SoundCue::Wall);
    }

    if state.ball.pos.y - state.ball.radius < 0.0 {
        state.lose_life();
        return false;
    }

    let paddle = &state.paddle;
    let ball = &mut state.ball;
    let hit = circle_aabb(ball.pos, ball.radius, paddle.pos, paddle.half_extents());
    if hit.hit {
        ball.pos += hit.push_out();
        let rel = ((ball.pos.x - paddle.pos.x) / (paddle.w / 2.0)).clamp(-1.0, 1.0);
        ball.vel = normalize_or_x(Vec2::new(rel, 1.2)) * ball.speed;
        ball.vel.y = ball.vel.y.abs();
        state.cue(SoundCue::Paddle);
    }

    for i in 0..state.bricks.len() {
        let brick = &state.bricks[i];
        if !brick.alive {
            continue;
        }
        let hit = circle_aabb(
            state.ball.pos,
            state.ball.radius,
            brick.center,
            brick.half_extents(),
        );
        if !hit.hit {
            continue;
        }

        if brick.indestructible() {
            state.ball.pos += hit.push_out();
            reflect_ball(&mut state.ball, hit.normal);
            state.cue(SoundCue::Wall);
            continue;
        }

        damage_brick(state, i);
        if !(state.ball.through || state.ball.fireball) {
            state.ball.pos += hit.push_out();
            reflect_ball(&mut state.ball, hit.normal);
        }
    }
    true
}

/// Move perks and apply the caught ones; false when one ended the game
fn update_perks(state: &mut DxState, dt: f32) -> bool {
    let mut i = 0;
    while i < state.perks.len() {
        let perk = &mut state.perks[i];
        perk.pos += perk.vel * dt;
        if perk.pos.y < PERK_FLOOR {
            state.perks.remove(i);
            continue;
        }

        let caught = aabb_overlap(
            perk.pos,
            Vec2::splat(perk.size / 2.0),
            state.paddle.pos,
            state.paddle.half_extents(),
        );
        if caught {
            let kind = perk.kind;
            state.perks.remove(i);
            state.apply_perk(kind);
            if state.lives <= 0 {
                return false;
            }
            continue;
        }
        i += 1;
    }
    true
}

fn update_bullets(state: &mut DxState, dt: f32) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = &mut state.bullets[i];
        bullet.pos += bullet.vel * dt;
        if bullet.pos.y > BULLET_CEILING {
            state.bullets.remove(i);
            continue;
        }

        let pos = bullet.pos;
        let target = state
            .bricks
            .iter()
            .position(|b| b.alive && point_in_rect(pos, b.center, b.half_extents()));
        match target {
            Some(j) => {
                state.bullets.remove(i);
                if state.bricks[j].indestructible() {
                    state.cue(SoundCue::Wall);
                } else {
                    damage_brick(state, j);
                }
            }
            None => i += 1,
        }
    }
}

fn update_trail(state: &mut DxState) {
    if state.ball.through || state.ball.fireball {
        state.trail.insert(0, state.ball.pos);
        state.trail.truncate(state.trail_len);
    } else {
        state.trail.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dxball::levels::build_bricks;

    const DT: f32 = 1.0 / 120.0;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn playing(level: u32) -> DxState {
        let mut state = DxState::new(4242);
        state.start_run(level);
        state
    }

    #[test]
    fn test_clear_one_shots_keeps_held_keys() {
        let mut input = TickInput {
            left_held: true,
            right_held: true,
            pointer_x: Some(300.0),
            enter: true,
            fire: true,
            click: Some(Vec2::new(1.0, 2.0)),
            idle_mode: true,
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(input.left_held && input.right_held && input.idle_mode);
        assert_eq!(input.pointer_x, None);
        assert_eq!(input.click, None);
        assert!(!input.enter && !input.fire);
    }

    #[test]
    fn test_held_arrow_moves_paddle_after_mouse_move() {
        let mut state = playing(1);
        let mut input = TickInput {
            pointer_x: Some(300.0),
            right_held: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        input.clear_one_shots();
        let after_mouse = state.paddle.pos.x;

        for _ in 0..120 {
            tick(&mut state, &input, DT);
            input.clear_one_shots();
        }
        assert!(state.paddle.pos.x > after_mouse + 1.0);
    }

    #[test]
    fn test_menu_to_level_select_to_play() {
        let mut state = DxState::new(1);
        tick(&mut state, &press(|i| i.enter = true), DT);
        assert_eq!(state.screen, Screen::LevelSelect);

        tick(&mut state, &press(|i| i.right = true), DT);
        tick(&mut state, &press(|i| i.right = true), DT);
        assert_eq!(state.level, 3);
        tick(&mut state, &press(|i| i.left = true), DT);
        tick(&mut state, &press(|i| i.left = true), DT);
        tick(&mut state, &press(|i| i.left = true), DT);
        assert_eq!(state.level, 1);

        tick(&mut state, &press(|i| i.enter = true), DT);
        assert_eq!(state.screen, Screen::Play);
        assert_eq!(state.bricks.len(), 112);
    }

    #[test]
    fn test_level_button_click_starts_level() {
        let mut state = DxState::new(1);
        state.new_game();
        let at = level_button_center(3);
        tick(&mut state, &press(|i| i.click = Some(at)), DT);
        assert_eq!(state.level, 4);
        assert_eq!(state.screen, Screen::Play);
    }

    #[test]
    fn test_menu_click_and_wrap() {
        let mut state = DxState::new(1);
        tick(&mut state, &press(|i| i.up = true), DT);
        assert_eq!(state.menu_index, 3);
        // Row 1 is High Scores without a resumable game
        let at = Vec2::new(450.0, menu_row_y(1) + 10.0);
        tick(&mut state, &press(|i| i.click = Some(at)), DT);
        assert_eq!(state.screen, Screen::HighScores);
        tick(&mut state, &press(|i| i.escape = true), DT);
        assert_eq!(state.screen, Screen::Menu);
        tick(&mut state, &press(|i| i.escape = true), DT);
        assert!(state.exit_requested);
    }

    #[test]
    fn test_pause_enables_resume() {
        let mut state = playing(1);
        tick(&mut state, &press(|i| i.pause = true), DT);
        assert_eq!(state.screen, Screen::Pause);
        assert!(state.can_resume);
        assert_eq!(state.menu_items()[0], MenuEntry::Resume);
        let time = state.play_time;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.play_time, time);
        tick(&mut state, &press(|i| i.escape = true), DT);
        assert_eq!(state.screen, Screen::Play);
    }

    #[test]
    fn test_stuck_ball_follows_paddle() {
        let mut state = playing(1);
        tick(&mut state, &press(|i| i.pointer_x = Some(200.0)), DT);
        assert_eq!(state.paddle.pos.x, 200.0);
        assert_eq!(state.ball.pos.x, 200.0);
        tick(&mut state, &press(|i| i.pointer_x = Some(-50.0)), DT);
        assert_eq!(state.paddle.pos.x, 66.0);
    }

    #[test]
    fn test_held_keys_move_paddle() {
        let mut state = playing(1);
        tick(&mut state, &press(|i| i.right_held = true), 0.02);
        assert!((state.paddle.pos.x - (450.0 + 630.0 * 0.02)).abs() < 1e-3);
    }

    #[test]
    fn test_launch_directions() {
        let mut state = playing(1);
        tick(&mut state, &press(|i| i.launch = true), DT);
        assert!(!state.ball.stuck);
        assert!(state.ball.vel.x > 0.0 && state.ball.vel.y > 0.0);
        assert!((state.ball.vel.length() - state.ball.speed).abs() < 1.0);

        let mut state = playing(1);
        tick(&mut state, &press(|i| i.click = Some(Vec2::new(10.0, 10.0))), DT);
        assert_eq!(state.ball.vel.x, 0.0);
    }

    #[test]
    fn test_ball_bounces_off_walls() {
        let mut state = playing(1);
        state.bricks.clear();
        state.bricks.extend(build_bricks(1).into_iter().take(1));
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(5.0, 300.0);
        state.ball.vel = Vec2::new(-300.0, 10.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.ball.pos.x, 9.0);
        assert!(state.ball.vel.x > 0.0);
        assert!(state.drain_events().contains(&SoundCue::Wall));
    }

    #[test]
    fn test_paddle_rebound_angle() {
        let mut state = playing(1);
        state.ball.stuck = false;
        // Just above the right half of the paddle, moving down
        state.ball.pos = Vec2::new(480.0, 64.0);
        state.ball.vel = Vec2::new(0.0, -300.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.ball.vel.y > 0.0);
        assert!(state.ball.vel.x > 0.0);
        assert!(state.drain_events().contains(&SoundCue::Paddle));
    }

    /// Free ball just under `brick`, moving up
    fn aim_below(state: &mut DxState, brick: usize) {
        let target = state.bricks[brick].center;
        state.ball.stuck = false;
        state.ball.pos = target - Vec2::new(0.0, 11.0 + 9.0 - 1.0);
        state.ball.vel = Vec2::new(0.0, 300.0);
    }

    #[test]
    fn test_ball_breaks_brick_and_reflects() {
        let mut state = playing(1);
        // Bottom right brick, nothing below it
        let last = state.bricks.len() - 1;
        aim_below(&mut state, last);
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.bricks[last].alive);
        assert_eq!(state.score, 120);
        assert!(state.ball.vel.y < 0.0);
        assert!(state.drain_events().contains(&SoundCue::Brick));
    }

    #[test]
    fn test_fireball_passes_through() {
        let mut state = playing(1);
        state.apply_perk(PerkKind::Fireball);
        let last = state.bricks.len() - 1;
        aim_below(&mut state, last);
        tick(&mut state, &TickInput::default(), DT);
        assert!(!state.bricks[last].alive);
        assert!(state.ball.vel.y > 0.0);
        assert_eq!(state.trail.len(), 1);
    }

    #[test]
    fn test_indestructible_brick_only_reflects() {
        let mut state = playing(4);
        let index = state
            .bricks
            .iter()
            .position(|b| b.indestructible())
            .expect("star core");
        // The centre column is empty, so come in from the right side
        let brick = state.bricks[index].clone();
        state.ball.stuck = false;
        state.ball.pos = brick.center + Vec2::new(brick.size.x / 2.0 + 8.0, 0.0);
        state.ball.vel = Vec2::new(-300.0, 0.0);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.bricks[index].alive);
        assert_eq!(state.score, 0);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_ball_below_floor_costs_life() {
        let mut state = playing(1);
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(300.0, 10.0);
        state.ball.vel = Vec2::new(0.0, -300.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 2);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_last_life_records_run() {
        let mut state = playing(1);
        state.lives = 1;
        state.score = 70;
        state.ball.stuck = false;
        state.ball.pos = Vec2::new(300.0, 10.0);
        state.ball.vel = Vec2::new(0.0, -300.0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.history.runs.len(), 1);
        tick(&mut state, &press(|i| i.enter = true), DT);
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.menu_items()[0], MenuEntry::Start);
    }

    #[test]
    fn test_perk_caught_by_paddle() {
        let mut state = playing(1);
        let id = state.next_entity_id();
        state.perks.push(Perk {
            id,
            pos: Vec2::new(450.0, 60.0),
            vel: Vec2::new(0.0, -PERK_SPEED),
            size: PERK_SIZE,
            kind: PerkKind::ShootingPaddle,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.perks.is_empty());
        assert!(state.paddle.shooting);

        tick(&mut state, &press(|i| i.fire = true), DT);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.drain_events().contains(&SoundCue::Pew));
    }

    #[test]
    fn test_missed_perk_falls_away() {
        let mut state = playing(1);
        let id = state.next_entity_id();
        state.perks.push(Perk {
            id,
            pos: Vec2::new(50.0, -29.0),
            vel: Vec2::new(0.0, -PERK_SPEED),
            size: PERK_SIZE,
            kind: PerkKind::ExtraLife,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.perks.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_bullet_damages_first_brick() {
        let mut state = playing(2);
        let brick = state.bricks[0].clone();
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: brick.center - Vec2::new(0.0, 12.0),
            vel: Vec2::new(0.0, BULLET_SPEED),
            size: BULLET_SIZE,
        });
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.bullets.is_empty());
        assert_eq!(state.bricks[0].hp, brick.hp - 1);
        assert_eq!(state.score, brick.score);
    }

    #[test]
    fn test_clearing_level_advances() {
        let mut state = playing(1);
        let last = state.bricks.len() - 1;
        for b in state.bricks.iter_mut().take(last) {
            b.alive = false;
        }
        aim_below(&mut state, last);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.level, 2);
        assert_eq!(state.bricks.len(), 56);
        assert!(state.ball.stuck);
        assert!(state.global_speed_gain >= LEVEL_SPEED_STEP);
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let mut state = playing(5);
        for b in state.bricks.iter_mut() {
            if !b.indestructible() {
                b.alive = false;
            }
        }
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.screen, Screen::Win);
        assert!(!state.can_resume);
        assert_eq!(state.history.runs.len(), 1);
    }

    #[test]
    fn test_width_timer_restores_paddle() {
        let mut state = playing(1);
        state.apply_perk(PerkKind::WidePaddle);
        state.paddle.width_timer = 0.005;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.paddle.w, PADDLE_W);
    }

    #[test]
    fn test_predict_landing_folds_off_wall() {
        let ball = Ball {
            pos: Vec2::new(850.0, 200.0),
            vel: Vec2::new(300.0, -300.0),
            stuck: false,
            ..Default::default()
        };
        let x = predict_landing_x(&ball, 56.0);
        assert!(x > 9.0 && x < 891.0);
        assert!((x - (891.0 - (850.0 + 135.0 - 891.0))).abs() < 1e-3);
    }

    #[test]
    fn test_idle_ai_scores() {
        let mut state = playing(1);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(120 * 30) {
            tick(&mut state, &input, DT);
            if state.screen != Screen::Play {
                break;
            }
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        let inputs = [
            TickInput {
                pointer_x: Some(300.0),
                ..Default::default()
            },
            TickInput {
                launch: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..500 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.perks.len(), state2.perks.len());
        assert_eq!(state1.ball.pos, state2.ball.pos);
    }
}
