//! Flappy Royale entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use flappy_royale::Tuning;
    use flappy_royale::renderer::{self, Quad, css_color};
    use flappy_royale::sim::{FrameClock, GameEvent, Phase, Run, TickInput, tick};
    use flappy_royale::submit::FetchSink;

    /// Game instance holding all state
    struct Game {
        run: Run,
        clock: FrameClock,
        sink: FetchSink,
        ctx: CanvasRenderingContext2d,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
        /// Set on teardown; no further frames are scheduled
        stopped: bool,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                run: Run::new(seed, Tuning::default()),
                clock: FrameClock::new(),
                sink: FetchSink::new(FetchSink::DEFAULT_ENDPOINT),
                ctx,
                frame_handle: None,
                stopped: false,
            }
        }

        /// Run one simulation step for this frame
        fn update(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            let events = tick(&mut self.run, &TickInput::default(), dt, &mut self.sink);
            for event in events {
                if let GameEvent::GameOver { score, .. } = event {
                    show_game_over(score);
                }
            }
        }

        fn paint_quad(&self, quad: &Quad) -> Result<(), JsValue> {
            let ctx = &self.ctx;
            ctx.set_fill_style_str(&css_color(quad.color));
            if quad.rotation == 0.0 {
                ctx.fill_rect(
                    quad.pos.x as f64,
                    quad.pos.y as f64,
                    quad.size.x as f64,
                    quad.size.y as f64,
                );
                return Ok(());
            }
            let center = quad.center();
            ctx.save();
            ctx.translate(center.x as f64, center.y as f64)?;
            ctx.rotate(quad.rotation as f64)?;
            ctx.fill_rect(
                -quad.size.x as f64 / 2.0,
                -quad.size.y as f64 / 2.0,
                quad.size.x as f64,
                quad.size.y as f64,
            );
            ctx.restore();
            Ok(())
        }

        fn render(&self) -> Result<(), JsValue> {
            let snapshot = self.run.snapshot();
            for quad in renderer::project(&snapshot, &self.run.tuning) {
                self.paint_quad(&quad)?;
            }

            let ctx = &self.ctx;
            let center_x = self.run.tuning.world_width as f64 / 2.0;
            ctx.set_text_align("center");
            ctx.set_fill_style_str("white");
            ctx.set_stroke_style_str("black");
            ctx.set_line_width(2.0);

            match snapshot.phase {
                Phase::Ready => {
                    ctx.set_font("bold 28px sans-serif");
                    ctx.stroke_text("Tap to flap", center_x, 150.0)?;
                    ctx.fill_text("Tap to flap", center_x, 150.0)?;
                }
                Phase::Playing | Phase::Over => {
                    let score = snapshot.score.to_string();
                    ctx.set_font("bold 48px sans-serif");
                    ctx.stroke_text(&score, center_x, 80.0)?;
                    ctx.fill_text(&score, center_x, 80.0)?;
                }
            }
            if snapshot.phase == Phase::Over {
                ctx.set_font("bold 36px sans-serif");
                ctx.stroke_text("Game Over", center_x, 200.0)?;
                ctx.fill_text("Game Over", center_x, 200.0)?;
            }
            Ok(())
        }

        /// Stop the loop for good
        fn teardown(&mut self) {
            self.stopped = true;
            if let (Some(handle), Some(window)) = (self.frame_handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
            log::info!("Run {} torn down", self.run.seed);
        }
    }

    fn show_game_over(score: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Flappy Royale starting...");

        if let Err(e) = start() {
            log::error!("Failed to start game: {:?}", e);
        }
    }

    fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        canvas.set_width(tuning.world_width as u32);
        canvas.set_height(tuning.world_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!("Run initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone())?;
        setup_teardown(game.clone())?;

        request_animation_frame(game);

        log::info!("Flappy Royale running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Space: swallow keydown so the page doesn't scroll, flap on keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    game.borrow_mut().run.flap();
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse and touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().run.flap();
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::TouchEvent| {
                game.borrow_mut().run.flap();
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().teardown();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle_owner = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => handle_owner.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if g.stopped {
                return;
            }

            g.update(time);
            if let Err(e) = g.render() {
                log::warn!("Render error: {:?}", e);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Result;
    use clap::Parser;

    use flappy_royale::sim::{GameEvent, Run, TickInput, tick};
    use flappy_royale::{LogSink, ScoreSink, Tuning};
    use flappy_royale::tournament::{self, DailyBest, Recorded};

    /// Headless flappy royale run driven by an autopilot
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// Run seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum frames to simulate at 60 fps
        #[arg(long, default_value_t = 36_000)]
        frames: u32,

        /// JSON tuning override
        #[arg(long)]
        config: Option<PathBuf>,

        /// Player name recorded on the daily board
        #[arg(long, default_value = "local")]
        player: String,
    }

    const FRAME_DT: f32 = 1.0 / 60.0;

    /// Flap whenever the body sinks below the next gap's lower edge
    fn autopilot(run: &Run) -> bool {
        let body = &run.body;
        let target = run
            .obstacles
            .iter()
            .find(|o| o.right() > body.x)
            .map(|o| o.gap_bottom() - body.height - 10.0)
            .unwrap_or_else(|| run.tuning.rest_y() + 40.0);
        body.velocity >= 0.0 && body.y > target
    }

    pub fn main() -> Result<()> {
        env_logger::init();
        let args = Args::parse();
        log::info!("Flappy Royale (native) starting...");

        let tuning = match &args.config {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        let seed = args.seed.unwrap_or(now_ms as u64);
        let period = tournament::tournament_id(now_ms);

        let mut board = DailyBest::new();
        let mut run = Run::new(seed, tuning);
        log::info!("Run initialized with seed: {}", seed);

        let mut log_sink = LogSink {
            player: args.player.clone(),
        };
        let mut sink = |score: u32| {
            log_sink.submit(score);
            match board.record(&period, &args.player, score) {
                Recorded::NewBest => {
                    log::info!("New best for {} in {}: {}", args.player, period, score)
                }
                Recorded::NotHigher { best } => {
                    log::info!("Score {} not higher than best {}", score, best)
                }
            }
        };

        // First input starts the run
        tick(&mut run, &TickInput { flap: true }, FRAME_DT, &mut sink);
        for frame in 0..args.frames {
            let input = TickInput {
                flap: autopilot(&run),
            };
            for event in tick(&mut run, &input, FRAME_DT, &mut sink) {
                match event {
                    GameEvent::DifficultyRaised { speed, gap } => {
                        log::info!("Frame {}: speed {} gap {}", frame, speed, gap)
                    }
                    GameEvent::GameOver { score, verdict } => {
                        log::info!("Frame {}: {:?}, final score {}", frame, verdict, score)
                    }
                    _ => {}
                }
            }
            if run.is_over() {
                break;
            }
        }

        if !run.is_over() {
            log::info!("Stopped after {} frames with score {}", args.frames, run.score());
        }
        println!(
            "seed {} score {} (resets in {})",
            seed,
            run.final_score().unwrap_or(run.score()),
            tournament::format_countdown(tournament::time_until_reset(now_ms))
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}
