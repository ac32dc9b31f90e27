//! Flappy entry point
//!
//! Browser builds run the game on a WebGPU canvas. Native builds run a
//! headless demo session driven by the autopilot and print a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::audio::AudioManager;
    use flappy::platform::{
        AudioPort, Color, Cue, FrameClock, FrameGate, InputPort, Key, RawEvent, RenderPort,
        Sprite,
    };
    use flappy::renderer::pipeline::viewport_to_playfield;
    use flappy::renderer::{QuadCanvas, RenderState};
    use flappy::{Game, GameConfig, LoopControl};

    /// Browser host: canvas tessellation, Web Audio, queued DOM events
    struct WebPlatform {
        canvas: QuadCanvas,
        audio: AudioManager,
        events: Vec<RawEvent>,
    }

    impl RenderPort for WebPlatform {
        fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.canvas.draw_rect(pos, size, color);
        }

        fn draw_image(&mut self, sprite: Sprite, pos: Vec2) {
            self.canvas.draw_image(sprite, pos);
        }

        fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
            self.canvas.draw_line(from, to, width, color);
        }

        fn draw_text(&mut self, text: &str, pos: Vec2) {
            self.canvas.draw_text(text, pos);
        }

        fn present_frame(&mut self) {
            self.canvas.present_frame();
        }
    }

    impl AudioPort for WebPlatform {
        fn play_sound(&mut self, cue: Cue, volume: f32) {
            self.audio.play_sound(cue, volume);
        }

        fn stop_sound(&mut self, cue: Cue) {
            self.audio.stop_sound(cue);
        }
    }

    impl InputPort for WebPlatform {
        fn poll_events(&mut self) -> Vec<RawEvent> {
            std::mem::take(&mut self.events)
        }
    }

    impl FrameClock for WebPlatform {
        // requestAnimationFrame paces the loop
        fn wait_for_next_frame(&mut self, _target_fps: u32) {}
    }

    /// Game instance plus everything the browser loop needs
    struct WebGame {
        game: Game,
        platform: WebPlatform,
        render_state: Option<RenderState>,
        playfield: Vec2,
        gate: FrameGate,
        stopped: bool,
    }

    impl WebGame {
        fn push(&mut self, event: RawEvent) {
            self.platform.events.push(event);
        }

        /// Pointer position in playfield pixels
        fn to_playfield(&self, canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
            let rect = canvas.get_bounding_client_rect();
            let pos = Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            );
            let viewport = Vec2::new(rect.width() as f32, rect.height() as f32);
            viewport_to_playfield(pos, self.playfield, viewport)
        }

        /// Step one fixed frame if it is due, then draw it
        fn update(&mut self, time: f64) {
            let frame_ms = self.game.config().frame_secs() * 1000.0;
            if !self.gate.should_step(time, frame_ms) {
                return;
            }

            if self.game.step_frame(&mut self.platform) == LoopControl::Quit {
                self.stopped = true;
            }
            if let Some(vertices) = self.platform.canvas.take_frame() {
                self.render(&vertices);
            }
        }

        fn render(&mut self, vertices: &[flappy::renderer::Vertex]) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(vertices) {
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
    }

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy starting...");

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        document.set_title("Flappy");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = GameConfig::default();
        let playfield = Vec2::new(config.playfield_width, config.playfield_height);

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width().max(1) as f64) * dpr) as u32;
        let height = ((canvas.client_height().max(1) as f64) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config.clone(), seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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

        let render_state = RenderState::new(surface, &adapter, width, height, playfield)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let web_game = Rc::new(RefCell::new(WebGame {
            platform: WebPlatform {
                canvas: QuadCanvas::new(config.clone()),
                audio: AudioManager::new(config.flap_cue_max_ms),
                events: Vec::new(),
            },
            game,
            render_state: Some(render_state),
            playfield,
            gate: FrameGate::new(),
            stopped: false,
        }));

        setup_input_handlers(&canvas, web_game.clone())?;
        request_animation_frame(web_game);

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        let window = window()?;

        // Keyboard: space flaps, escape quits
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.platform.audio.resume();
                let raw = match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        RawEvent::KeyDown(Key::Space)
                    }
                    "Escape" => RawEvent::Quit,
                    _ => RawEvent::KeyDown(Key::Other),
                };
                g.push(raw);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = if event.key() == " " { Key::Space } else { Key::Other };
                game.borrow_mut().push(RawEvent::KeyUp(key));
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_playfield(&canvas_clone, event.client_x(), event.client_y());
                g.push(RawEvent::PointerMoved(pos));
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.platform.audio.resume();
                let pos = g.to_playfield(&canvas_clone, event.client_x(), event.client_y());
                g.push(RawEvent::PointerMoved(pos));
                g.push(RawEvent::PointerPressed);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch: a tap presses the button on the start screen and flaps in play
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.platform.audio.resume();
                if let Some(touch) = event.touches().get(0) {
                    let pos = g.to_playfield(&canvas_clone, touch.client_x(), touch.client_y());
                    g.push(RawEvent::PointerMoved(pos));
                    g.push(RawEvent::PointerPressed);
                }
                g.push(RawEvent::KeyDown(Key::Space));
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().push(RawEvent::KeyUp(Key::Space));
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Ok(window) = window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if g.stopped {
                let summary = g.game.summary();
                log::info!(
                    "Flappy stopped after {} frames, high score {}",
                    summary.frames,
                    summary.high_score
                );
                return;
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Flappy failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use flappy::autopilot::Autopilot;
    use flappy::platform::{FrameClock, HeadlessPlatform, RawEvent};
    use flappy::{Game, GameConfig, LoopControl};

    /// Headless demo: the autopilot plays a few sessions and the run summary is printed as JSON
    #[derive(Parser, Debug, Clone, PartialEq, Eq)]
    #[command(name = "flappy")]
    pub struct Options {
        /// Obstacle generator seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Sessions the autopilot plays before quitting
        #[arg(long, default_value_t = 3)]
        pub sessions: u32,
        /// Quit after this many frames even if sessions remain
        #[arg(long, default_value_t = 100_000)]
        pub max_frames: u64,
        /// Run at 60 fps wall-clock instead of as fast as possible
        #[arg(long)]
        pub paced: bool,
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    pub fn run(opts: Options) -> Result<(), Box<dyn Error>> {
        let seed = opts.seed.unwrap_or_else(time_seed);
        let mut game = Game::new(GameConfig::default(), seed)?;
        let mut platform = if opts.paced {
            HeadlessPlatform::paced()
        } else {
            HeadlessPlatform::new()
        };
        let mut pilot = Autopilot::new(opts.sessions);

        loop {
            let mut events = pilot.next_events(game.state(), game.config());
            if game.state().frame + 1 >= opts.max_frames {
                log::warn!("Frame limit {} reached", opts.max_frames);
                events.push(RawEvent::Quit);
            }
            platform.push_frame(events);
            if game.step_frame(&mut platform) == LoopControl::Quit {
                break;
            }
            platform.wait_for_next_frame(game.config().target_fps);
        }

        let summary = game.summary();
        log::info!(
            "Played {} sessions over {} frames",
            summary.sessions,
            summary.frames
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy (native) starting headless demo...");

    use clap::Parser;

    let opts = native::Options::parse();
    if let Err(e) = native::run(opts) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
