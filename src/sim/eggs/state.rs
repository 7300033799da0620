//! Catch the Eggs state
//!
//! The world is the square [-1, 1]² with y pointing up. Everything the tick
//! mutates lives in [`EggState`], including the seeded RNG, so two states
//! built from the same seed replay identically.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::raster::Rgb;

pub const WORLD_MIN: f32 = -1.0;
pub const WORLD_MAX: f32 = 1.0;

/// Seconds on the clock at the start of a game
pub const GAME_SECONDS: i32 = 60;
pub const START_LIVES: i32 = 3;
/// Caught bombs that end the game
pub const MAX_BOMBS: u32 = 3;
/// Longest frame the update accepts
pub const MAX_FRAME_DT: f32 = 0.033;

pub const START_SPAWN_EVERY: f32 = 0.65;
pub const MIN_SPAWN_EVERY: f32 = 0.35;
pub const SPAWN_SPEEDUP: f32 = 0.0025;

pub const MAX_WIND: f32 = 0.5;
pub const FIRST_WIND_CHANGE: f32 = 4.0;
/// Objects feel this share of the wind
pub const WIND_DAMPING: f32 = 0.8;

/// One arrow press moves the basket this far
pub const BASKET_STEP: f32 = 0.08;
pub const CHICKEN_LIMIT: f32 = 0.82;
/// Objects below this line are dropped
pub const MISS_LINE: f32 = WORLD_MIN - 0.25;

pub const PARTICLE_GRAVITY: f32 = 1.6;
pub const FLOAT_TEXT_LIFE: f32 = 1.1;
pub const FLOAT_TEXT_RISE: f32 = 0.35;
pub const BOMB_SHAKE: f32 = 0.12;
pub const SHAKE_DECAY: f32 = 0.7;

/// Default particle cap (the quality preset may lower it)
pub const MAX_PARTICLES: usize = 256;

pub const CLOUD_COUNT: usize = 5;
pub const FLOWER_COUNT: usize = 20;

/// Menu button geometry: centre x is 0, one row per item
pub const MENU_BUTTON_HALF: Vec2 = Vec2::new(0.36, 0.07);
pub const MENU_BUTTON_Y: [f32; 4] = [0.15, 0.03, -0.09, -0.21];

/// Uniform float in [lo, hi)
pub(crate) fn frand(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggScreen {
    Menu,
    Help,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Start,
    Resume,
    Help,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [MenuItem::Start, MenuItem::Resume, MenuItem::Help, MenuItem::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Resume => "Resume",
            MenuItem::Help => "Help",
            MenuItem::Exit => "Exit",
        }
    }

    /// Centre of this item's button
    pub fn button_center(self) -> Vec2 {
        let row = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Vec2::new(0.0, MENU_BUTTON_Y[row])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    TimeUp,
    Bombs,
    Other,
}

impl GameOverReason {
    pub fn message(self) -> String {
        match self {
            GameOverReason::TimeUp => "Time is up!".to_string(),
            GameOverReason::Bombs => format!("Caught {MAX_BOMBS} Bombs!"),
            GameOverReason::Other => "Game Over!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EggKind {
    Normal,
    Blue,
    Golden,
    Bomb,
}

impl EggKind {
    /// Map a roll in [0, 100) to a kind
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..5 => EggKind::Golden,
            5..15 => EggKind::Blue,
            15..30 => EggKind::Bomb,
            _ => EggKind::Normal,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EggKind::Golden => 0.045,
            EggKind::Bomb => 0.032,
            EggKind::Normal | EggKind::Blue => 0.038,
        }
    }

    /// Points for catching it (bombs score nothing)
    pub fn points(self) -> u32 {
        match self {
            EggKind::Normal => 1,
            EggKind::Blue => 5,
            EggKind::Golden => 10,
            EggKind::Bomb => 0,
        }
    }

    pub fn shell_color(self) -> Rgb {
        match self {
            EggKind::Normal => Rgb::new(1.0, 1.0, 0.94),
            EggKind::Blue => Rgb::new(0.45, 0.65, 1.0),
            EggKind::Golden => Rgb::new(1.0, 0.84, 0.0),
            EggKind::Bomb => Rgb::new(0.1, 0.1, 0.1),
        }
    }

    /// Particle burst on catch: count and color
    pub fn burst(self) -> (usize, Rgb) {
        match self {
            EggKind::Normal => (12, Rgb::new(1.0, 1.0, 0.9)),
            EggKind::Blue => (16, Rgb::new(0.4, 0.6, 1.0)),
            EggKind::Golden => (20, Rgb::new(1.0, 0.84, 0.0)),
            EggKind::Bomb => (30, Rgb::RED),
        }
    }

    /// Float text on catch
    pub fn label(self) -> (&'static str, Rgb) {
        match self {
            EggKind::Normal => ("+1", Rgb::new(0.0, 0.6, 0.0)),
            EggKind::Blue => ("+5", Rgb::new(0.1, 0.45, 1.0)),
            EggKind::Golden => ("+10", Rgb::new(0.95, 0.7, 0.0)),
            EggKind::Bomb => ("BOMB!", Rgb::new(0.8, 0.2, 0.1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub x: f32,
    pub y: f32,
    pub half_w: f32,
    pub h: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: -0.8,
            half_w: 0.16,
            h: 0.09,
        }
    }
}

impl Basket {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_w, self.h)
    }

    /// Move to `x`, keeping the basket inside the world
    pub fn set_x(&mut self, x: f32) {
        self.x = x.clamp(WORLD_MIN + self.half_w, WORLD_MAX - self.half_w);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chicken {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    /// Vertical bob offset, visual only
    pub bob: f32,
}

impl Default for Chicken {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.70,
            vx: 0.45,
            bob: 0.0,
        }
    }
}

/// An egg or bomb dropped by the chicken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub kind: EggKind,
    pub pos: Vec2,
    pub vy: f32,
    pub radius: f32,
    /// Spin in degrees
    pub rot: f32,
    pub rot_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub alpha: f32,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatText {
    pub pos: Vec2,
    pub vy: f32,
    pub life: f32,
    pub text: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub scale: f32,
    pub speed: f32,
}

impl Cloud {
    fn random(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                frand(rng, WORLD_MIN, WORLD_MAX),
                frand(rng, 0.5, WORLD_MAX - 0.1),
            ),
            scale: frand(rng, 0.5, 1.2),
            speed: frand(rng, 0.02, 0.08),
        }
    }
}

/// Decorative flower along the bottom edge, placed once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    pub pos: Vec2,
    pub scale: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Horizontal push in world units per second
    pub force: f32,
    pub timer: f32,
    /// Seconds until the next change
    pub every: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            force: 0.0,
            timer: 0.0,
            every: FIRST_WIND_CHANGE,
        }
    }
}

impl Wind {
    /// Strength in [0, 1]
    pub fn strength(&self) -> f32 {
        self.force.abs() / MAX_WIND
    }
}

fn fresh_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete egg catch state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EggState {
    pub seed: u64,
    #[serde(skip, default = "fresh_rng")]
    pub(crate) rng: Pcg32,
    pub screen: EggScreen,
    /// Highlighted menu row
    pub menu_index: usize,
    /// A game was started and has not ended, so Resume is allowed
    pub can_resume: bool,
    /// Exit was chosen; the frontend should close
    pub exit_requested: bool,
    pub basket: Basket,
    pub chicken: Chicken,
    /// Sorted by id
    pub objects: Vec<FallingObject>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub float_texts: Vec<FloatText>,
    pub clouds: Vec<Cloud>,
    pub flowers: Vec<Flower>,
    pub wind: Wind,
    pub score: u32,
    /// Best score this session
    pub high_score: u32,
    pub time_left: i32,
    /// Time accumulated toward the next countdown second
    pub second_timer: f32,
    pub lives: i32,
    pub bombs_caught: u32,
    pub spawn_timer: f32,
    pub spawn_every: f32,
    pub shake: f32,
    /// Seconds since the state was created
    pub elapsed: f32,
    pub max_particles: usize,
    next_id: u32,
}

impl EggState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..CLOUD_COUNT).map(|_| Cloud::random(&mut rng)).collect();
        let flowers = (0..FLOWER_COUNT)
            .map(|_| Flower {
                pos: Vec2::new(frand(&mut rng, -0.95, 0.95), frand(&mut rng, -0.9, -0.8)),
                scale: frand(&mut rng, 0.8, 1.2),
                color: Rgb::new(
                    frand(&mut rng, 0.7, 1.0),
                    frand(&mut rng, 0.2, 0.8),
                    frand(&mut rng, 0.7, 1.0),
                ),
            })
            .collect();

        Self {
            seed,
            rng,
            screen: EggScreen::Menu,
            menu_index: 0,
            can_resume: false,
            exit_requested: false,
            basket: Basket::default(),
            chicken: Chicken::default(),
            objects: Vec::new(),
            particles: Vec::new(),
            float_texts: Vec::new(),
            clouds,
            flowers,
            wind: Wind::default(),
            score: 0,
            high_score: 0,
            time_left: GAME_SECONDS,
            second_timer: 0.0,
            lives: START_LIVES,
            bombs_caught: 0,
            spawn_timer: 0.0,
            spawn_every: START_SPAWN_EVERY,
            shake: 0.0,
            elapsed: 0.0,
            max_particles: MAX_PARTICLES,
            next_id: 1,
        }
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn normalize_order(&mut self) {
        self.objects.sort_by_key(|o| o.id);
    }

    /// Reset the round and start playing
    pub fn start_game(&mut self) {
        self.objects.clear();
        self.particles.clear();
        self.float_texts.clear();
        self.score = 0;
        self.time_left = GAME_SECONDS;
        self.second_timer = 0.0;
        self.lives = START_LIVES;
        self.bombs_caught = 0;
        self.spawn_timer = 0.0;
        self.spawn_every = START_SPAWN_EVERY;
        self.basket = Basket::default();
        self.chicken = Chicken::default();
        self.wind = Wind::default();
        self.shake = 0.0;
        self.clouds = (0..CLOUD_COUNT).map(|_| Cloud::random(&mut self.rng)).collect();
        self.screen = EggScreen::Playing;
        self.can_resume = true;
        log::info!("Egg catch started");
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_index % MenuItem::ALL.len()]
    }

    /// Why the last game ended
    pub fn game_over_reason(&self) -> GameOverReason {
        if self.time_left <= 0 {
            GameOverReason::TimeUp
        } else if self.bombs_caught >= MAX_BOMBS {
            GameOverReason::Bombs
        } else {
            GameOverReason::Other
        }
    }

    pub(crate) fn end_game(&mut self) {
        self.screen = EggScreen::GameOver;
        self.can_resume = false;
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "Egg catch over ({:?}): score {} best {}",
            self.game_over_reason(),
            self.score,
            self.high_score
        );
    }

    /// Drop a new object under the chicken
    pub(crate) fn spawn_object(&mut self) {
        let kind = EggKind::from_roll(self.rng.random_range(0..100));
        let id = self.next_entity_id();
        let object = FallingObject {
            id,
            kind,
            pos: Vec2::new(
                self.chicken.x + frand(&mut self.rng, -0.05, 0.05),
                self.chicken.y - 0.06,
            ),
            vy: -frand(&mut self.rng, 0.45, 0.65),
            radius: kind.radius(),
            rot: 0.0,
            rot_speed: frand(&mut self.rng, -120.0, 120.0),
        };
        self.objects.push(object);
    }

    pub(crate) fn burst(&mut self, at: Vec2, count: usize, color: Rgb) {
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let angle = frand(&mut self.rng, 0.0, std::f32::consts::TAU);
            let speed = frand(&mut self.rng, 0.6, 1.6);
            let life = frand(&mut self.rng, 0.35, 0.75);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                alpha: 1.0,
                life,
                max_life: life,
                size: frand(&mut self.rng, 0.008, 0.02),
            });
        }
    }

    pub(crate) fn float_text(&mut self, at: Vec2, text: &str, color: Rgb) {
        self.float_texts.push(FloatText {
            pos: at,
            vy: FLOAT_TEXT_RISE,
            life: FLOAT_TEXT_LIFE,
            text: text.to_string(),
            color,
        });
    }

    /// Visual shake offset for this frame
    pub fn shake_offset(&self) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let t = self.elapsed * 60.0;
        Vec2::new(t.sin(), (t * 1.3).cos()) * self.shake * 0.015
    }

    /// HUD strings: score, time, lives
    pub fn hud(&self) -> [String; 3] {
        [
            format!("Score: {}", self.score),
            format!("Time: {}", self.time_left),
            format!("Lives: {}", self.lives),
        ]
    }
}
