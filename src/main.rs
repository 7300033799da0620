//! Raster Arcade entry point
//!
//! Native builds are a command line tool; the browser build runs one of the
//! games on a WebGPU canvas.

#[cfg(not(target_arch = "wasm32"))]
mod commands;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use raster_arcade::Settings;
    use raster_arcade::audio::AudioManager;
    use raster_arcade::consts::*;
    use raster_arcade::renderer::{DrawList, RenderState, dxball_scene, eggs_scene, falling_scene};
    use raster_arcade::sim::falling::FRAME_SECS;
    use raster_arcade::sim::{DropDemo, StackDemo, dxball, eggs};

    /// Which program the page runs, chosen by the URL hash
    enum Mode {
        DxBall {
            state: dxball::DxState,
            input: dxball::TickInput,
        },
        Eggs {
            state: eggs::EggState,
            input: eggs::TickInput,
        },
        Drop(DropDemo),
        Stack(StackDemo),
    }

    impl Mode {
        fn from_hash(hash: &str, seed: u64, settings: &Settings) -> Self {
            match hash.trim_start_matches('#') {
                "eggs" => {
                    let mut state = eggs::EggState::new(seed);
                    settings.configure_eggs(&mut state);
                    Mode::Eggs {
                        state,
                        input: eggs::TickInput {
                            idle_mode: settings.idle_mode,
                            ..Default::default()
                        },
                    }
                }
                "drop" => Mode::Drop(DropDemo::new()),
                "stack" => Mode::Stack(StackDemo::new()),
                _ => {
                    let mut state = dxball::DxState::new(seed);
                    settings.configure_dxball(&mut state);
                    Mode::DxBall {
                        state,
                        input: dxball::TickInput {
                            idle_mode: settings.idle_mode,
                            ..Default::default()
                        },
                    }
                }
            }
        }

        fn scene(&self) -> DrawList {
            match self {
                Mode::DxBall { state, .. } => dxball_scene(state),
                Mode::Eggs { state, .. } => eggs_scene(state),
                Mode::Drop(demo) => falling_scene(&demo.circles, demo.size()),
                Mode::Stack(demo) => falling_scene(&demo.circles, demo.size()),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        mode: Mode,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(mode: Mode, settings: Settings) -> Self {
            Self {
                mode,
                render_state: None,
                audio: AudioManager::from_settings(&settings),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_TIME);
            self.accumulator += dt;

            let step = match self.mode {
                Mode::Drop(_) | Mode::Stack(_) => FRAME_SECS,
                _ => SIM_DT,
            };

            let mut substeps = 0;
            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                match &mut self.mode {
                    Mode::DxBall { state, input } => {
                        dxball::tick(state, input, step);
                        self.audio.play_all(&state.drain_events());
                        input.clear_one_shots();
                    }
                    Mode::Eggs { state, input } => {
                        eggs::tick(state, input, step);
                        input.clear_one_shots();
                    }
                    Mode::Drop(demo) => demo.step(),
                    Mode::Stack(demo) => demo.step(),
                }
                self.accumulator -= step;
                substeps += 1;
            }
        }

        fn render(&mut self) {
            let scene = self.mode.scene();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Pointer position in scene coordinates
        fn to_scene(&self, x: f32, y: f32) -> Option<Vec2> {
            let render_state = self.render_state.as_ref()?;
            Some(render_state.pointer_to_scene(&self.mode.scene(), x, y))
        }

        fn hud_lines(&self) -> Vec<String> {
            match &self.mode {
                Mode::DxBall { state, .. } => state.hud_lines(),
                Mode::Eggs { state, .. } => state.hud().to_vec(),
                Mode::Drop(demo) => vec![format!("Circles: {}", demo.circles.len())],
                Mode::Stack(demo) => vec![
                    format!("Circles: {}", demo.circles.len()),
                    format!("Settled: {}", demo.settled_count()),
                ],
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.hud_lines().join("  ")));
            }
            if let Mode::DxBall { state, .. } = &self.mode {
                if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                    el.set_text_content(Some(&state.history.best_line()));
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Raster Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let hash = window.location().hash().unwrap_or_default();
        let mode = Mode::from_hash(&hash, seed, &settings);
        let game = Rc::new(RefCell::new(Game::new(mode, settings)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Raster Arcade running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Mouse move steers the paddle or basket
        {
            let game = game.clone();
            let dpr = window.device_pixel_ratio() as f32;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let Some(p) = g.to_scene(event.offset_x() as f32 * dpr, event.offset_y() as f32 * dpr) else {
                    return;
                };
                match &mut g.mode {
                    Mode::DxBall { input, .. } => input.pointer_x = Some(p.x),
                    Mode::Eggs { input, .. } => input.pointer_x = Some(p.x),
                    Mode::Drop(_) | Mode::Stack(_) => {}
                }
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Clicks: menus, launching and spawning circles
        {
            let game = game.clone();
            let dpr = window.device_pixel_ratio() as f32;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let Some(p) = g.to_scene(event.offset_x() as f32 * dpr, event.offset_y() as f32 * dpr) else {
                    return;
                };
                match &mut g.mode {
                    Mode::DxBall { input, .. } => {
                        input.click = Some(p);
                        input.launch = true;
                        input.fire = true;
                    }
                    Mode::Eggs { input, .. } => input.click = Some(p),
                    Mode::Drop(demo) => demo.click(p),
                    Mode::Stack(demo) => demo.click(p),
                }
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "m" || key == "M" {
                    let muted = g.audio.toggle_mute();
                    g.settings.muted = muted;
                    g.settings.save();
                    log::info!("Muted: {muted}");
                    return;
                }
                match &mut g.mode {
                    Mode::DxBall { input, .. } => match key.as_str() {
                        "ArrowLeft" => {
                            input.left = true;
                            input.left_held = true;
                        }
                        "ArrowRight" => {
                            input.right = true;
                            input.right_held = true;
                        }
                        "ArrowUp" => input.up = true,
                        "ArrowDown" => input.down = true,
                        "Enter" => input.enter = true,
                        "Escape" => input.escape = true,
                        " " => {
                            input.launch = true;
                            input.fire = true;
                        }
                        "p" | "P" => input.pause = true,
                        "i" | "I" => {
                            input.idle_mode = !input.idle_mode;
                            log::info!("Idle mode: {}", input.idle_mode);
                        }
                        _ => {}
                    },
                    Mode::Eggs { input, .. } => match key.as_str() {
                        "ArrowLeft" | "a" | "A" => input.left = true,
                        "ArrowRight" | "d" | "D" => input.right = true,
                        "ArrowUp" => input.up = true,
                        "ArrowDown" => input.down = true,
                        "Enter" => input.enter = true,
                        "Escape" => input.escape = true,
                        " " => input.pause = true,
                        "s" | "S" => input.restart = true,
                        "i" | "I" => {
                            input.idle_mode = !input.idle_mode;
                            log::info!("Idle mode: {}", input.idle_mode);
                        }
                        _ => {}
                    },
                    Mode::Drop(_) | Mode::Stack(_) => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up releases held paddle keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Mode::DxBall { input, .. } = &mut g.mode {
                    match event.key().as_str() {
                        "ArrowLeft" => input.left_held = false,
                        "ArrowRight" => input.right_held = false,
                        _ => {}
                    }
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    let cli = commands::Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("Raster Arcade (native) starting...");

    commands::run(cli)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
