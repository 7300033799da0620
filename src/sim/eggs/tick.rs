//! Egg catch tick: input handling and the per-frame update

use glam::Vec2;

use super::state::*;
use crate::sim::collision::{circle_aabb, point_in_rect};

/// Input for a single frame
///
/// Key presses are one-shot flags; `pointer_x` is the mouse position in world
/// units when it moved this frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub pointer_x: Option<f32>,
    /// Left click in world coordinates
    pub click: Option<Vec2>,
    pub up: bool,
    pub down: bool,
    pub enter: bool,
    pub escape: bool,
    /// Space: pause toggle
    pub pause: bool,
    /// `S`: restart from the game over screen
    pub restart: bool,
    /// AI steers the basket
    pub idle_mode: bool,
}

impl TickInput {
    /// Reset every press, keeping only the AI toggle
    pub fn clear_one_shots(&mut self) {
        *self = Self {
            idle_mode: self.idle_mode,
            ..Default::default()
        };
    }
}

/// Advance one frame
pub fn tick(state: &mut EggState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.elapsed += dt;

    let mut input = input.clone();
    if input.idle_mode && state.screen == EggScreen::Playing {
        input.pointer_x = Some(idle_target(state, dt));
    }

    handle_keys(state, &input);
    if let Some(at) = input.click {
        handle_click(state, at);
    }

    if state.screen == EggScreen::Playing {
        if input.left {
            state.basket.set_x(state.basket.x - BASKET_STEP);
        }
        if input.right {
            state.basket.set_x(state.basket.x + BASKET_STEP);
        }
        if let Some(x) = input.pointer_x {
            state.basket.set_x(x);
        }
        update(state, dt);
    }
}

fn handle_keys(state: &mut EggState, input: &TickInput) {
    if input.escape {
        match state.screen {
            EggScreen::Playing | EggScreen::Paused => state.screen = EggScreen::Menu,
            _ => state.exit_requested = true,
        }
        return;
    }

    if input.pause {
        match state.screen {
            EggScreen::Playing => state.screen = EggScreen::Paused,
            EggScreen::Paused => state.screen = EggScreen::Playing,
            _ => {}
        }
    }

    if input.restart && state.screen == EggScreen::GameOver {
        state.start_game();
    }

    if state.screen == EggScreen::Menu {
        let n = MenuItem::ALL.len();
        if input.up {
            state.menu_index = (state.menu_index + n - 1) % n;
        }
        if input.down {
            state.menu_index = (state.menu_index + 1) % n;
        }
    }

    if input.enter {
        match state.screen {
            EggScreen::Menu => {
                let item = state.selected_item();
                activate(state, item);
            }
            EggScreen::Help | EggScreen::GameOver => state.screen = EggScreen::Menu,
            _ => {}
        }
    }
}

fn activate(state: &mut EggState, item: MenuItem) {
    match item {
        MenuItem::Start => state.start_game(),
        MenuItem::Resume => {
            if state.can_resume {
                state.screen = EggScreen::Playing;
            }
        }
        MenuItem::Help => state.screen = EggScreen::Help,
        MenuItem::Exit => state.exit_requested = true,
    }
}

fn handle_click(state: &mut EggState, at: Vec2) {
    match state.screen {
        EggScreen::Menu => {
            if let Some(item) = MenuItem::ALL
                .into_iter()
                .find(|item| point_in_rect(at, item.button_center(), MENU_BUTTON_HALF))
            {
                activate(state, item);
            }
        }
        EggScreen::GameOver => {
            if at.x < 0.0 {
                state.screen = EggScreen::Menu;
            } else {
                state.start_game();
            }
        }
        EggScreen::Help => state.screen = EggScreen::Menu,
        EggScreen::Playing | EggScreen::Paused => {}
    }
}

/// Basket x the AI heads for: under the lowest egg, away from bombs
fn idle_target(state: &EggState, dt: f32) -> f32 {
    let basket = state.basket;
    let lowest_egg = state
        .objects
        .iter()
        .filter(|o| o.kind != EggKind::Bomb)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut target = lowest_egg.map_or(state.chicken.x, |o| o.pos.x);

    // Bombs about to land near the target push it aside
    for bomb in state.objects.iter().filter(|o| o.kind == EggKind::Bomb) {
        let close = bomb.pos.y - basket.y < 0.35;
        let overlap = (bomb.pos.x - target).abs() < basket.half_w + bomb.radius;
        if close && overlap {
            let side = if target >= bomb.pos.x { 1.0 } else { -1.0 };
            target = bomb.pos.x + side * (basket.half_w + bomb.radius + 0.02);
        }
    }

    let max_step = 1.6 * dt;
    basket.x + (target - basket.x).clamp(-max_step, max_step)
}

/// Gameplay update, only while playing
fn update(state: &mut EggState, dt: f32) {
    let chicken = &mut state.chicken;
    chicken.x += chicken.vx * dt;
    if chicken.x > CHICKEN_LIMIT {
        chicken.x = CHICKEN_LIMIT;
        chicken.vx = -chicken.vx;
    }
    if chicken.x < -CHICKEN_LIMIT {
        chicken.x = -CHICKEN_LIMIT;
        chicken.vx = -chicken.vx;
    }
    chicken.bob = 0.01 * (state.elapsed * 8.0).sin();

    update_clouds(state, dt);

    state.wind.timer += dt;
    if state.wind.timer >= state.wind.every {
        state.wind.force = frand(&mut state.rng, -MAX_WIND, MAX_WIND);
        state.wind.every = frand(&mut state.rng, 3.0, 6.0);
        state.wind.timer = 0.0;
        log::debug!("Wind now {:.2}", state.wind.force);
    }

    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_every {
        state.spawn_object();
        state.spawn_timer = 0.0;
        state.spawn_every = (state.spawn_every - SPAWN_SPEEDUP).max(MIN_SPAWN_EVERY);
    }

    update_objects(state, dt);

    for p in &mut state.particles {
        p.pos += p.vel * dt;
        p.vel.y -= PARTICLE_GRAVITY * dt;
        p.life -= dt;
        p.alpha = (p.life / p.max_life).max(0.0);
    }
    state.particles.retain(|p| p.life > 0.0);

    for t in &mut state.float_texts {
        t.pos.y += t.vy * dt;
        t.life -= dt;
    }
    state.float_texts.retain(|t| t.life > 0.0);

    if state.shake > 0.0 {
        state.shake = (state.shake - dt * SHAKE_DECAY).max(0.0);
    }

    state.second_timer += dt;
    if state.second_timer >= 1.0 {
        state.time_left -= 1;
        state.second_timer = 0.0;
        if state.time_left <= 0 {
            state.end_game();
        }
    }
}

fn update_clouds(state: &mut EggState, dt: f32) {
    for i in 0..state.clouds.len() {
        let cloud = &mut state.clouds[i];
        cloud.pos.x += cloud.speed * dt;
        if cloud.pos.x > WORLD_MAX + cloud.scale * 0.15 {
            cloud.pos.x = WORLD_MIN - cloud.scale * 0.15;
            let y = frand(&mut state.rng, 0.5, WORLD_MAX - 0.1);
            let scale = frand(&mut state.rng, 0.5, 1.2);
            let speed = frand(&mut state.rng, 0.02, 0.08);
            let cloud = &mut state.clouds[i];
            cloud.pos.y = y;
            cloud.scale = scale;
            cloud.speed = speed;
        }
    }
}

fn update_objects(state: &mut EggState, dt: f32) {
    let drift = state.wind.force * WIND_DAMPING * dt;
    let basket = state.basket;
    let mut caught = Vec::new();

    state.objects.retain_mut(|o| {
        o.pos.x += drift;
        o.pos.y += o.vy * dt;
        o.rot += o.rot_speed * dt;

        if circle_aabb(o.pos, o.radius, basket.center(), basket.half_extents()).hit {
            caught.push((o.kind, o.pos));
            return false;
        }
        o.pos.y >= MISS_LINE
    });

    for (kind, pos) in caught {
        let (count, color) = kind.burst();
        let (label, label_color) = kind.label();
        state.burst(pos, count, color);
        state.float_text(pos, label, label_color);

        if kind == EggKind::Bomb {
            state.bombs_caught += 1;
            state.lives -= 1;
            state.shake = BOMB_SHAKE;
            log::debug!("Bomb caught ({} of {MAX_BOMBS})", state.bombs_caught);
            if state.bombs_caught >= MAX_BOMBS && state.screen == EggScreen::Playing {
                state.end_game();
            }
        } else {
            state.score += kind.points();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing(seed: u64) -> EggState {
        let mut state = EggState::new(seed);
        tick(
            &mut state,
            &TickInput {
                enter: true,
                ..Default::default()
            },
            DT,
        );
        state
    }

    #[test]
    fn test_arrows_move_basket_after_mouse_move() {
        let mut state = playing(7);
        let mut input = TickInput {
            pointer_x: Some(-0.5),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        input.clear_one_shots();
        assert_eq!(input.pointer_x, None);
        assert!((state.basket.x + 0.5).abs() < 1e-4);

        input.right = true;
        tick(&mut state, &input, DT);
        input.clear_one_shots();
        assert!(!input.right);
        assert!((state.basket.x - (-0.5 + BASKET_STEP)).abs() < 1e-4);
    }

    fn drop_on_basket(state: &mut EggState, kind: EggKind) {
        let id = state.next_entity_id();
        state.objects.push(FallingObject {
            id,
            kind,
            pos: Vec2::new(state.basket.x, state.basket.y + 0.1),
            vy: 0.0,
            radius: kind.radius(),
            rot: 0.0,
            rot_speed: 0.0,
        });
    }

    #[test]
    fn test_menu_enter_starts_game() {
        let state = playing(1);
        assert_eq!(state.screen, EggScreen::Playing);
        assert_eq!(state.time_left, GAME_SECONDS);
        assert!(state.can_resume);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut state = EggState::new(1);
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up, DT);
        assert_eq!(state.selected_item(), MenuItem::Exit);
        let down = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &down, DT);
        tick(&mut state, &down, DT);
        assert_eq!(state.selected_item(), MenuItem::Resume);
    }

    #[test]
    fn test_resume_needs_a_game() {
        let mut state = EggState::new(1);
        state.menu_index = 1;
        tick(
            &mut state,
            &TickInput {
                enter: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Menu);

        let mut state = playing(1);
        tick(
            &mut state,
            &TickInput {
                escape: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Menu);
        state.menu_index = 1;
        tick(
            &mut state,
            &TickInput {
                enter: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Playing);
    }

    #[test]
    fn test_menu_click_opens_help() {
        let mut state = EggState::new(1);
        let click = TickInput {
            click: Some(Vec2::new(0.2, -0.09)),
            ..Default::default()
        };
        tick(&mut state, &click, DT);
        assert_eq!(state.screen, EggScreen::Help);
        // Any click leaves help
        tick(&mut state, &click, DT);
        assert_eq!(state.screen, EggScreen::Menu);
    }

    #[test]
    fn test_pause_toggle_freezes_clock() {
        let mut state = playing(2);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.screen, EggScreen::Paused);
        let chicken_x = state.chicken.x;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.chicken.x, chicken_x);
        assert_eq!(state.time_left, GAME_SECONDS);
        tick(&mut state, &pause, DT);
        assert_eq!(state.screen, EggScreen::Playing);
    }

    #[test]
    fn test_escape_outside_game_exits() {
        let mut state = EggState::new(1);
        tick(
            &mut state,
            &TickInput {
                escape: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.exit_requested);
    }

    #[test]
    fn test_catch_scores_and_bursts() {
        let mut state = playing(4);
        drop_on_basket(&mut state, EggKind::Golden);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, 10);
        assert!(state.objects.is_empty());
        assert_eq!(state.particles.len(), 20);
        assert_eq!(state.float_texts[0].text, "+10");
    }

    #[test]
    fn test_three_bombs_end_game() {
        let mut state = playing(5);
        for _ in 0..3 {
            drop_on_basket(&mut state, EggKind::Bomb);
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.screen, EggScreen::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.game_over_reason(), GameOverReason::Bombs);
        assert!(state.shake > 0.0);
    }

    #[test]
    fn test_countdown_ends_game() {
        let mut state = playing(6);
        state.score = 42;
        // Keep the basket out of the way so nothing changes the score
        state.basket.set_x(-1.0);
        state.time_left = 1;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), 0.03);
        }
        assert_eq!(state.screen, EggScreen::GameOver);
        assert_eq!(state.game_over_reason(), GameOverReason::TimeUp);
        assert!(state.high_score >= 42);
    }

    #[test]
    fn test_game_over_click_halves() {
        let mut state = playing(7);
        state.end_game();
        tick(
            &mut state,
            &TickInput {
                click: Some(Vec2::new(0.5, 0.0)),
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Playing);

        state.end_game();
        tick(
            &mut state,
            &TickInput {
                click: Some(Vec2::new(-0.5, 0.0)),
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Menu);
    }

    #[test]
    fn test_restart_key_on_game_over() {
        let mut state = playing(8);
        state.score = 9;
        state.end_game();
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.screen, EggScreen::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 9);
    }

    #[test]
    fn test_spawn_interval_shrinks() {
        let mut state = playing(9);
        state.basket.set_x(-1.0);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 0.03);
        }
        assert!(state.spawn_every < START_SPAWN_EVERY);
        assert!(state.spawn_every >= MIN_SPAWN_EVERY);
    }

    #[test]
    fn test_wind_changes_after_four_seconds() {
        let mut state = playing(10);
        state.basket.set_x(-1.0);
        for _ in 0..140 {
            tick(&mut state, &TickInput::default(), 0.03);
        }
        assert!(state.wind.force.abs() <= MAX_WIND);
        assert!(state.wind.every >= 3.0 && state.wind.every <= 6.0);
        assert_ne!(state.wind.every, FIRST_WIND_CHANGE);
    }

    #[test]
    fn test_arrow_keys_move_basket() {
        let mut state = playing(11);
        tick(
            &mut state,
            &TickInput {
                right: true,
                ..Default::default()
            },
            DT,
        );
        assert!((state.basket.x - BASKET_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_idle_ai_catches_eggs() {
        let mut state = playing(12);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, 0.03);
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        let inputs = [
            TickInput {
                pointer_x: Some(0.3),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.objects.len(), state2.objects.len());
        assert_eq!(state1.basket.x, state2.basket.x);
        assert_eq!(state1.wind.force, state2.wind.force);
    }
}
