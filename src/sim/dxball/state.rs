//! DX-Ball state and entities
//!
//! Scene coordinates are pixels on a 900×700 board with y pointing up.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::levels::build_bricks;
use crate::highscores::RunHistory;
use crate::raster::Rgb;

pub const SCREEN_W: f32 = 900.0;
pub const SCREEN_H: f32 = 700.0;

pub const MAX_LEVELS: u32 = 5;
pub const MAX_LIVES: i32 = 5;
pub const START_LIVES: i32 = 3;
/// Longest frame the update accepts
pub const MAX_FRAME_DT: f32 = 0.03;

pub const PADDLE_Y: f32 = 48.0;
pub const PADDLE_W: f32 = 120.0;
pub const PADDLE_H: f32 = 16.0;
pub const PADDLE_SPEED: f32 = 630.0;
/// Gap kept between the paddle and the side walls
pub const PADDLE_MARGIN: f32 = 6.0;
pub const MAX_PADDLE_W: f32 = 320.0;
pub const MIN_PADDLE_W: f32 = 60.0;

pub const BALL_RADIUS: f32 = 9.0;
pub const BASE_BALL_SPEED: f32 = 320.0;
/// Extra base speed per level above the first
pub const LEVEL_SPEED_STEP: f32 = 35.0;
/// Per-second growth of the base speed during play
pub const SPEED_GAIN_RATE: f32 = 2.0;
/// Per-second growth of the live ball speed
pub const BALL_ACCEL: f32 = 4.0;

/// Ball trail points at full quality
pub const TRAIL_LENGTH: usize = 12;

pub const INDESTRUCTIBLE_HP: i32 = 999;

pub const PERK_CHANCE: f32 = 0.22;
pub const PERK_SPEED: f32 = 150.0;
pub const PERK_SIZE: f32 = 18.0;
/// Perks below this line are gone
pub const PERK_FLOOR: f32 = -30.0;

pub const BULLET_SPEED: f32 = 640.0;
pub const BULLET_SIZE: Vec2 = Vec2::new(4.0, 10.0);
/// Bullets above this line are gone
pub const BULLET_CEILING: f32 = SCREEN_H + 20.0;

/// Level picker button layout
pub const LEVEL_BUTTON_SIZE: Vec2 = Vec2::new(150.0, 40.0);
pub const LEVEL_BUTTON_SPACING: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    LevelSelect,
    Play,
    Pause,
    Help,
    HighScores,
    Win,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuEntry {
    Resume,
    Start,
    HighScores,
    Help,
    Exit,
}

impl MenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Resume => "Resume",
            MenuEntry::Start => "Start",
            MenuEntry::HighScores => "High Scores",
            MenuEntry::Help => "Help",
            MenuEntry::Exit => "Exit",
        }
    }
}

/// Baseline y of menu row `i`; the clickable band is 25 px tall above it
pub fn menu_row_y(i: usize) -> f32 {
    SCREEN_H / 2.0 + 60.0 - i as f32 * 40.0
}

/// Centre of level button `i` (0-based)
pub fn level_button_center(i: u32) -> Vec2 {
    Vec2::new(
        SCREEN_W / 2.0 + (i as f32 - 2.0) * (LEVEL_BUTTON_SIZE.x + LEVEL_BUTTON_SPACING),
        SCREEN_H / 2.0 + 50.0,
    )
}

/// Sound cues, drained by the frontend each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Paddle,
    Wall,
    Brick,
    Lose,
    Pew,
    ExtraLife,
    Speed,
    Wide,
    Shrink,
    Through,
    Fireball,
    Shoot,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Paddle => "paddle",
            SoundCue::Wall => "wall",
            SoundCue::Brick => "brick",
            SoundCue::Lose => "lose",
            SoundCue::Pew => "pew",
            SoundCue::ExtraLife => "extra_life",
            SoundCue::Speed => "speed",
            SoundCue::Wide => "wide",
            SoundCue::Shrink => "shrink",
            SoundCue::Through => "through",
            SoundCue::Fireball => "fireball",
            SoundCue::Shoot => "shoot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerkKind {
    ExtraLife,
    SpeedUp,
    WidePaddle,
    ShrinkPaddle,
    ThroughBall,
    Fireball,
    ShootingPaddle,
    InstantDeath,
}

impl PerkKind {
    /// Map a uniform roll in [0, 1) to a kind
    pub fn from_roll(roll: f32) -> Self {
        const TABLE: [(f32, PerkKind); 7] = [
            (0.18, PerkKind::ExtraLife),
            (0.36, PerkKind::SpeedUp),
            (0.52, PerkKind::WidePaddle),
            (0.66, PerkKind::ShrinkPaddle),
            (0.78, PerkKind::ThroughBall),
            (0.90, PerkKind::Fireball),
            (0.96, PerkKind::ShootingPaddle),
        ];
        TABLE
            .iter()
            .find(|(limit, _)| roll < *limit)
            .map_or(PerkKind::InstantDeath, |&(_, kind)| kind)
    }

    /// Worth catching on purpose
    pub fn is_beneficial(self) -> bool {
        !matches!(
            self,
            PerkKind::ShrinkPaddle | PerkKind::InstantDeath | PerkKind::SpeedUp
        )
    }

    pub fn color(self) -> Rgb {
        match self {
            PerkKind::ExtraLife => Rgb::new(0.2, 0.9, 0.3),
            PerkKind::SpeedUp => Rgb::new(1.0, 0.6, 0.1),
            PerkKind::WidePaddle => Rgb::new(0.2, 0.6, 1.0),
            PerkKind::ShrinkPaddle => Rgb::new(0.6, 0.3, 0.9),
            PerkKind::ThroughBall => Rgb::new(0.3, 0.9, 0.9),
            PerkKind::Fireball => Rgb::new(1.0, 0.3, 0.1),
            PerkKind::ShootingPaddle => Rgb::new(0.9, 0.9, 0.2),
            PerkKind::InstantDeath => Rgb::new(0.15, 0.15, 0.15),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Riding on the paddle, waiting for launch
    pub stuck: bool,
    pub through: bool,
    pub through_timer: f32,
    pub fireball: bool,
    pub fireball_timer: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::Y,
            speed: BASE_BALL_SPEED,
            radius: BALL_RADIUS,
            stuck: true,
            through: false,
            through_timer: 0.0,
            fireball: false,
            fireball_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub width_timer: f32,
    pub shooting: bool,
    pub shooting_timer: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_W / 2.0, PADDLE_Y),
            w: PADDLE_W,
            h: PADDLE_H,
            speed: PADDLE_SPEED,
            width_timer: 0.0,
            shooting: false,
            shooting_timer: 0.0,
        }
    }
}

impl Paddle {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    /// Keep the paddle between the side walls
    pub fn clamp_x(&mut self) {
        let half = self.w / 2.0 + PADDLE_MARGIN;
        self.pos.x = self.pos.x.clamp(half, SCREEN_W - half);
    }

    /// Where a stuck ball sits
    pub fn rest_point(&self, radius: f32) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + self.h / 2.0 + radius + 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub center: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub hp: i32,
    pub color: Rgb,
    pub score: u32,
}

impl Brick {
    pub fn indestructible(&self) -> bool {
        self.hp == INDESTRUCTIBLE_HP
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perk {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: PerkKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete DX-Ball state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DxState {
    pub seed: u64,
    #[serde(skip, default = "fresh_rng")]
    pub(crate) rng: Pcg32,
    pub screen: Screen,
    /// Selected or current level, 1 to [`MAX_LEVELS`]
    pub level: u32,
    pub lives: i32,
    pub score: u32,
    /// Seconds spent in play this run
    pub play_time: f32,
    /// Seconds since creation, drives the animated background
    pub elapsed: f32,
    pub can_resume: bool,
    pub menu_index: usize,
    pub exit_requested: bool,
    /// Base speed bonus that grows with level and play time
    pub global_speed_gain: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Sorted by id
    pub bricks: Vec<Brick>,
    /// Sorted by id
    pub perks: Vec<Perk>,
    /// Sorted by id
    pub bullets: Vec<Bullet>,
    /// Ball positions, newest first
    #[serde(skip)]
    pub trail: Vec<Vec2>,
    pub trail_len: usize,
    pub history: RunHistory,
    #[serde(skip)]
    pub events: Vec<SoundCue>,
    next_id: u32,
}

impl DxState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Menu,
            level: 1,
            lives: START_LIVES,
            score: 0,
            play_time: 0.0,
            elapsed: 0.0,
            can_resume: false,
            menu_index: 0,
            exit_requested: false,
            global_speed_gain: 0.0,
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks: Vec::new(),
            perks: Vec::new(),
            bullets: Vec::new(),
            trail: Vec::with_capacity(TRAIL_LENGTH),
            trail_len: TRAIL_LENGTH,
            history: RunHistory::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_ball();
        state
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn normalize_order(&mut self) {
        self.bricks.sort_by_key(|b| b.id);
        self.perks.sort_by_key(|p| p.id);
        self.bullets.sort_by_key(|b| b.id);
    }

    pub(crate) fn cue(&mut self, cue: SoundCue) {
        self.events.push(cue);
    }

    /// Take the sound cues emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.events)
    }

    pub fn menu_items(&self) -> Vec<MenuEntry> {
        let mut items = Vec::with_capacity(5);
        if self.can_resume {
            items.push(MenuEntry::Resume);
        }
        items.extend([
            MenuEntry::Start,
            MenuEntry::HighScores,
            MenuEntry::Help,
            MenuEntry::Exit,
        ]);
        items
    }

    /// Fresh run: reset score, lives and paddle, then pick a level
    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.global_speed_gain = 0.0;
        self.perks.clear();
        self.bullets.clear();
        self.trail.clear();
        self.paddle = Paddle::default();
        self.ball = Ball::default();
        self.reset_ball();
        self.screen = Screen::LevelSelect;
        self.can_resume = false;
        log::info!("New DX-Ball game");
    }

    /// Build the selected level and start playing it
    pub fn start_level(&mut self) {
        self.load_level(self.level);
        self.screen = Screen::Play;
        self.play_time = 0.0;
        log::info!("Playing level {}", self.level);
    }

    /// New game straight into `level`, skipping the menus
    pub fn start_run(&mut self, level: u32) {
        self.new_game();
        self.level = level.clamp(1, MAX_LEVELS);
        self.start_level();
    }

    pub(crate) fn load_level(&mut self, level: u32) {
        self.bricks = build_bricks(level);
        self.global_speed_gain = (level as f32 - 1.0) * LEVEL_SPEED_STEP;
        self.ball.speed = BASE_BALL_SPEED + self.global_speed_gain;
    }

    /// Put the ball back on the paddle with effects cleared
    pub fn reset_ball(&mut self) {
        let ball = &mut self.ball;
        ball.stuck = true;
        ball.through = false;
        ball.through_timer = 0.0;
        ball.fireball = false;
        ball.fireball_timer = 0.0;
        ball.speed = BASE_BALL_SPEED + self.global_speed_gain;
        ball.pos = self.paddle.rest_point(ball.radius);
        ball.vel = Vec2::Y;
    }

    /// Release a stuck ball along `dir`
    pub fn launch(&mut self, dir: Vec2) {
        if self.ball.stuck {
            self.ball.stuck = false;
            self.ball.vel = dir.normalize_or(Vec2::Y) * self.ball.speed;
        }
    }

    pub fn lose_life(&mut self) {
        self.lives = (self.lives - 1).max(0);
        self.cue(SoundCue::Lose);
        if self.lives == 0 {
            self.game_over();
        } else {
            self.paddle.pos.x = SCREEN_W / 2.0;
            self.paddle.w = PADDLE_W;
            self.paddle.width_timer = 0.0;
            self.paddle.shooting = false;
            self.paddle.shooting_timer = 0.0;
            self.reset_ball();
            log::debug!("Life lost, {} left", self.lives);
        }
    }

    pub(crate) fn game_over(&mut self) {
        self.lives = 0;
        self.screen = Screen::GameOver;
        self.can_resume = false;
        self.history.record(self.play_time, self.score);
        log::info!("Game over on level {} with {} pts", self.level, self.score);
    }

    pub(crate) fn win(&mut self) {
        self.screen = Screen::Win;
        self.can_resume = false;
        self.history.record(self.play_time, self.score);
        log::info!("All levels cleared with {} pts", self.score);
    }

    /// Roll for a perk where a brick broke
    pub(crate) fn maybe_spawn_perk(&mut self, at: Vec2, indestructible: bool) {
        if indestructible || self.rng.random::<f32>() >= PERK_CHANCE {
            return;
        }
        let kind = PerkKind::from_roll(self.rng.random::<f32>());
        let id = self.next_entity_id();
        self.perks.push(Perk {
            id,
            pos: at,
            vel: Vec2::new(0.0, -PERK_SPEED),
            size: PERK_SIZE,
            kind,
        });
        log::debug!("Perk {kind:?} dropped");
    }

    pub fn apply_perk(&mut self, kind: PerkKind) {
        log::debug!("Perk {kind:?} caught");
        match kind {
            PerkKind::ExtraLife => {
                self.lives = (self.lives + 1).min(MAX_LIVES);
                self.cue(SoundCue::ExtraLife);
            }
            PerkKind::SpeedUp => {
                self.ball.speed *= 1.18;
                self.cue(SoundCue::Speed);
            }
            PerkKind::WidePaddle => {
                self.paddle.w = (self.paddle.w * 1.35).min(MAX_PADDLE_W);
                self.paddle.width_timer = 14.0;
                self.cue(SoundCue::Wide);
            }
            PerkKind::ShrinkPaddle => {
                self.paddle.w = (self.paddle.w * 0.7).max(MIN_PADDLE_W);
                self.paddle.width_timer = 12.0;
                self.cue(SoundCue::Shrink);
            }
            PerkKind::ThroughBall => {
                self.ball.through = true;
                self.ball.through_timer = 10.0;
                self.cue(SoundCue::Through);
            }
            PerkKind::Fireball => {
                self.ball.fireball = true;
                self.ball.fireball_timer = 8.0;
                self.ball.through = true;
                self.ball.through_timer = self.ball.through_timer.max(8.0);
                self.cue(SoundCue::Fireball);
            }
            PerkKind::ShootingPaddle => {
                self.paddle.shooting = true;
                self.paddle.shooting_timer = 12.0;
                self.cue(SoundCue::Shoot);
            }
            PerkKind::InstantDeath => self.game_over(),
        }
    }

    /// Fire from the paddle if it can shoot
    pub fn fire_bullet(&mut self) {
        if !self.paddle.shooting {
            return;
        }
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos: Vec2::new(self.paddle.pos.x, self.paddle.pos.y + self.paddle.h / 2.0 + 8.0),
            vel: Vec2::new(0.0, BULLET_SPEED),
            size: BULLET_SIZE,
        });
        self.cue(SoundCue::Pew);
    }

    /// Bricks that still have to break to clear the level
    pub fn breakable_left(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.alive && !b.indestructible())
            .count()
    }

    /// HUD text lines
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Lives: {}", self.lives),
            format!("Level: {}", self.level),
            format!("Time: {:.1}s", self.play_time),
        ];
        if self.ball.through {
            lines.push(format!("Through: {}s", self.ball.through_timer.ceil() as i32));
        }
        if self.ball.fireball {
            lines.push(format!("Fireball: {}s", self.ball.fireball_timer.ceil() as i32));
        }
        if self.paddle.shooting {
            lines.push(format!("Shooting: {}s", self.paddle.shooting_timer.ceil() as i32));
        }
        lines
    }
}
