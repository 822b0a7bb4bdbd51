//! Pounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        PageTransitionEvent, TouchEvent,
    };

    use pounce::audio::{AudioSink, SoundEffect, WebAudio};
    use pounce::catalog::next_toy;
    use pounce::platform::web::{AnimationLoop, listen};
    use pounce::platform::{Command, client_to_canvas};
    use pounce::renderer::{Frame, GpuError, RenderState};
    use pounce::sim::Viewport;
    use pounce::{FrameDriver, ScoreBoard, Settings};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<WebAudio, ScoreBoard>,
        render_state: Option<RenderState>,
        settings: Settings,
        canvas: HtmlCanvasElement,
        overlay: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        animation: Option<AnimationLoop>,
        // Last values written to the HUD
        shown: (u32, u32),
    }

    impl Game {
        fn render(&mut self, frame: &Frame) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(frame) {
                Ok(()) => {}
                Err(GpuError::Frame(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    render_state.reconfigure();
                }
                Err(GpuError::Frame(wgpu::SurfaceError::OutOfMemory)) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {e}"),
            }
        }

        /// Emoji critters are text, painted on the 2D overlay
        fn draw_glyphs(&self, frame: &Frame) {
            let Some((overlay, ctx)) = &self.overlay else {
                return;
            };
            let ratio = self
                .render_state
                .as_ref()
                .map_or(1.0, |r| r.pixel_ratio as f64);
            let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            ctx.clear_rect(0.0, 0.0, overlay.width() as f64, overlay.height() as f64);
            if frame.glyphs.is_empty() {
                return;
            }
            let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            for glyph in &frame.glyphs {
                ctx.save();
                let _ = ctx.translate(glyph.pos.x as f64, glyph.pos.y as f64);
                let _ = ctx.scale(glyph.scale.x as f64, glyph.scale.y as f64);
                ctx.set_font(&format!("{}px serif", glyph.size));
                let _ = ctx.fill_text(&glyph.text, 0.0, 0.0);
                ctx.restore();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let board = self.driver.score();
            let current = (board.score, board.multiplier);
            if current == self.shown {
                return;
            }
            self.shown = current;
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&board.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-multiplier") {
                el.set_text_content(Some(&format!("x{}", board.multiplier)));
                let class = if board.multiplier > 1 { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }
        }

        fn update_toy_label(&self, document: &Document) {
            if let Some(el) = document.query_selector("#hud-toy .hud-value").ok().flatten() {
                let toy = self.driver.toy();
                el.set_text_content(Some(&format!("{} {}", toy.emoji, toy.name)));
            }
            if let Some(el) = document.get_element_by_id("pause-menu") {
                let class = if self.driver.is_playing() { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
        }

        fn tap(&mut self, points: &[Vec2]) {
            self.driver.audio().resume();
            if !self.driver.is_playing() {
                self.driver.audio_mut().play(SoundEffect::UiStart);
                self.driver.set_playing(true);
                return;
            }
            let caught = self.driver.interact_many(points);
            if caught > 0 {
                log::debug!("Caught {caught}, score {}", self.driver.score().score);
            }
        }

        fn command(&mut self, command: Command) {
            self.driver.audio().resume();
            match command {
                Command::TogglePlay => {
                    self.driver.audio_mut().play(SoundEffect::UiToggle);
                    self.driver.toggle_playing();
                }
                Command::SetCount(count) => {
                    self.driver.audio_mut().play(SoundEffect::UiClick);
                    self.driver.set_toy_count(count);
                    self.settings.toy_count = self.driver.toy_count();
                    self.settings.save();
                }
                Command::NextToy => {
                    self.driver.audio_mut().play(SoundEffect::UiClick);
                    let toy = next_toy(&self.driver.toy().id);
                    self.settings.selected_toy = toy.id.clone();
                    self.driver.select_toy(toy);
                    self.settings.save();
                }
                Command::ResetScore => {
                    self.driver.audio_mut().play(SoundEffect::UiClick);
                    self.driver.score_mut().reset();
                }
            }
        }

        /// Match canvas backing stores to the CSS size
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let css_w = self.canvas.client_width().max(1);
            let css_h = self.canvas.client_height().max(1);
            let width = (css_w as f64 * dpr) as u32;
            let height = (css_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some((overlay, _)) = &self.overlay {
                overlay.set_width(width);
                overlay.set_height(height);
            }
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.pixel_ratio = dpr as f32;
                render_state.resize(width, height);
            }
            self.driver.resize(css_w as f32, css_h as f32);
        }

        fn pause_for(&mut self, reason: &str) {
            if self.settings.auto_pause && self.driver.is_playing() {
                self.driver.set_playing(false);
                log::info!("Auto-paused ({reason})");
            }
        }
    }

    fn canvas_by_id(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Pounce starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = canvas_by_id(&document, "canvas") else {
            log::error!("No #canvas element");
            return;
        };
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let overlay = canvas_by_id(&document, "overlay").and_then(|c| {
            let ctx = c.get_context("2d").ok()??.dyn_into::<CanvasRenderingContext2d>().ok()?;
            Some((c, ctx))
        });

        let settings = Settings::load();
        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let seed = js_sys::Date::now() as u64;
        let mut driver = FrameDriver::new(
            settings.toy(),
            settings.toy_count,
            viewport,
            seed,
            WebAudio::new(settings.volume),
            ScoreBoard::new(),
        );
        driver.set_render_options(settings.render_options());

        let game = Rc::new(RefCell::new(Game {
            driver,
            render_state: None,
            settings,
            canvas: canvas.clone(),
            overlay,
            animation: None,
            shown: (u32::MAX, 0),
        }));
        game.borrow_mut().fit_to_window();

        let pixel_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()) as f32;
        match RenderState::from_canvas(canvas.clone(), pixel_ratio).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("WebGPU unavailable: {e}");
                if let Some(el) = document.get_element_by_id("no-webgpu") {
                    let _ = el.set_attribute("class", "");
                }
                return;
            }
        }

        game.borrow().update_toy_label(&document);
        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(&document, game.clone());
        setup_teardown(game.clone());

        start_loop(&game, &document);

        log::info!("Pounce running!");
    }

    /// (Re)start the frame loop; a running loop is replaced
    fn start_loop(game: &Rc<RefCell<Game>>, document: &Document) {
        let frame_game = game.clone();
        let frame_doc = document.clone();
        let animation = AnimationLoop::start(move |_time| {
            let mut g = frame_game.borrow_mut();
            let was_playing = g.driver.is_playing();
            let frame = g.driver.frame();
            g.render(&frame);
            g.draw_glyphs(&frame);
            g.update_hud(&frame_doc);
            if was_playing != g.driver.is_playing() {
                g.update_toy_label(&frame_doc);
            }
        });
        game.borrow_mut().animation = animation;
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let target = canvas.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let point = client_to_canvas(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                );
                game.borrow_mut().tap(&[point]);
            });
        }

        {
            let game = game.clone();
            let target = canvas.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                let rect = target.get_bounding_client_rect();
                let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
                let touches = event.changed_touches();
                let points: Vec<Vec2> = (0..touches.length())
                    .filter_map(|i| touches.get(i))
                    .map(|t| client_to_canvas(Vec2::new(t.client_x() as f32, t.client_y() as f32), origin))
                    .collect();
                game.borrow_mut().tap(&points);
            });
        }

        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let Some(command) = Command::from_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.command(command);
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    g.update_toy_label(&document);
                }
            });
        }

        listen(&window, "resize", move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let doc = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().pause_for("tab hidden");
                }
            });
        }

        let Some(window) = web_sys::window() else { return };
        listen(&window, "blur", move |_event: web_sys::FocusEvent| {
            game.borrow_mut().pause_for("window blur");
        });
    }

    /// Leaving the page stops the loop and silences audio. A page restored
    /// from the back/forward cache gets a fresh loop and comes back paused.
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            listen(&window, "pagehide", move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.animation = None;
                g.driver.teardown();
            });
        }

        listen(&window, "pageshow", move |event: PageTransitionEvent| {
            if !event.persisted() || game.borrow().animation.is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            log::info!("Restored from page cache");
            game.borrow().update_toy_label(&document);
            start_loop(&game, &document);
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless session: scripted taps against the real simulation
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use pounce::audio::NullAudio;
    use pounce::sim::Viewport;
    use pounce::{FrameDriver, ScoreBoard, Settings};

    env_logger::init();
    log::info!("Pounce (native) starting...");
    log::info!("Rendering requires the web build - running a headless session");

    let settings = Settings::load();
    let mut driver = FrameDriver::new(
        settings.toy(),
        3,
        Viewport::new(800.0, 600.0),
        42,
        NullAudio::new(settings.volume),
        ScoreBoard::new(),
    );
    driver.set_playing(true);

    for tick in 1..=600u32 {
        driver.step();
        if tick % 40 == 0 {
            // Alternate between a tap on a critter and a tap in an empty corner
            let point = if tick % 80 == 0 {
                driver.world().entities[0].pos
            } else {
                Vec2::new(2.0, 2.0)
            };
            if let Some(outcome) = driver.interact(point) {
                log::info!(
                    "tick {tick}: caught {} startled {} -> score {} (x{})",
                    outcome.caught,
                    outcome.startled,
                    driver.score().score,
                    driver.score().multiplier
                );
            }
        }
    }
    driver.teardown();

    println!(
        "\n{} x{}: score {}, {} sounds played",
        driver.toy().name,
        driver.toy_count(),
        driver.score().score,
        driver.audio().played.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}
