//! Rescue My Valentine entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList};

    use rescue_valentine::Settings;
    use rescue_valentine::consts::*;
    use rescue_valentine::hud::{Banner, Overlay, Panel};
    use rescue_valentine::platform::{InputAdapter, Viewport, action_for_code};
    use rescue_valentine::renderer::{Controls, RenderState, Scene};
    use rescue_valentine::sim::{Game, tick};

    /// Everything the page callbacks share
    struct App {
        game: Game,
        input: InputAdapter,
        viewport: Viewport,
        settings: Settings,
        scene: Scene,
        touch_device: bool,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last overlay pushed to the DOM
        shown: Option<Overlay>,
    }

    impl App {
        fn new(seed: u64, settings: Settings, viewport: Viewport, touch_device: bool) -> Self {
            let mut game = Game::new(seed);
            game.visible = viewport.visible;
            Self {
                game,
                input: InputAdapter::new(),
                viewport,
                settings,
                scene: Scene::new(),
                touch_device,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown: None,
            }
        }

        /// Recompute the layout after the canvas changed size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()) as f32;
            self.viewport = Viewport::compute(
                canvas.client_width() as f32,
                canvas.client_height() as f32,
                dpr,
            );
            let width = self.viewport.canvas_w as u32;
            let height = self.viewport.canvas_h as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            self.game.visible = self.viewport.visible;
            self.input.refresh_touch(&self.viewport);
            log::debug!(
                "Viewport {}x{} ({:?}, scale {:.2})",
                width,
                height,
                self.viewport.orientation,
                self.viewport.scale
            );
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.snapshot();
                tick(&mut self.game, &input);
                self.input.clear_edges();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop backlog the substep cap could not absorb
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT);
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59000.0 / elapsed).round() as u32;
                }
            }
        }

        fn controls(&self) -> Controls {
            Controls {
                visible: self.settings.touch_controls.visible(self.touch_device),
                pressed: self.input.touch_hits(),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let controls = self.controls();
            if let Some(ref mut render_state) = self.render_state {
                let frame = self
                    .scene
                    .build(&self.game, &self.settings, &self.viewport, &controls);
                match render_state.render(&frame, &self.viewport) {
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

        /// Update text overlays in DOM
        fn update_overlay(&mut self, document: &Document) {
            if self.settings.show_fps {
                set_text(document, "#hud-fps .hud-value", &self.fps.to_string());
            }

            let overlay = Overlay::from_game(&self.game);
            if self.shown.as_ref() == Some(&overlay) {
                return;
            }

            let changed_panel = self.shown.as_ref().map(|o| o.panel) != Some(overlay.panel);
            if changed_panel {
                for panel in Panel::ALL {
                    set_shown(document, panel.element_id(), panel == overlay.panel);
                }
            }

            match overlay.panel {
                Panel::Title => set_shown(document, "title-prompt", overlay.prompt_on),
                Panel::Hud => {
                    set_text(document, "#hud-rescued .hud-value", &overlay.rescued);
                    set_text(document, "#hud-key .hud-value", &overlay.key_label);
                    if let Some(el) = document.query_selector("#hud-key").ok().flatten() {
                        let _ = el.set_attribute("style", &format!("color: {}", overlay.key_color));
                    }
                    show_banner(document, "rescue-message", overlay.rescue.as_ref());
                    show_banner(document, "wrong-key", overlay.wrong_key.as_ref());
                }
                Panel::Room | Panel::Proposal => {}
                Panel::Win => {
                    set_shown(document, "win-prompt", overlay.prompt_on);
                    if changed_panel {
                        for (i, name) in overlay.roster.iter().enumerate() {
                            set_text(document, &format!("#roster-{}", i), name);
                        }
                    }
                }
            }

            self.shown = Some(overlay);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_shown(document: &Document, id: &str, shown: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !shown);
        }
    }

    fn show_banner(document: &Document, id: &str, banner: Option<&Banner>) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        if let Some(banner) = banner {
            el.set_text_content(Some(&banner.text));
            let _ = el.set_attribute("style", &format!("opacity: {:.2}", banner.opacity));
        }
        let _ = el.class_list().toggle_with_force("hidden", banner.is_none());
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rescue My Valentine starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        set_shown(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load(&canvas);
        let touch_device = window.navigator().max_touch_points() > 0;
        log::info!(
            "Touch controls: {} (touch device: {})",
            settings.touch_controls.as_str(),
            touch_device
        );
        if settings.show_fps {
            set_shown(&document, "hud-fps", true);
        }

        let dpr = window.device_pixel_ratio() as f32;
        let viewport = Viewport::compute(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
            dpr,
        );
        let width = viewport.canvas_w as u32;
        let height = viewport.canvas_h as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, settings, viewport, touch_device)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_keyboard(app.clone());
        setup_pointer(&canvas, app.clone());
        setup_resize(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Rescue My Valentine running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                // Arrows and space would scroll the page
                if action_for_code(&code).is_some() {
                    event.prevent_default();
                }
                app.borrow_mut().input.key_down(&code, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// (identifier, canvas-relative CSS position) for each touch in the list
    fn touch_points(list: &TouchList, canvas: &HtmlCanvasElement) -> Vec<(i32, Vec2)> {
        let rect = canvas.get_bounding_client_rect();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|touch| {
                let pos = Vec2::new(
                    touch.client_x() as f32 - rect.left() as f32,
                    touch.client_y() as f32 - rect.top() as f32,
                );
                (touch.identifier(), pos)
            })
            .collect()
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                a.input.mouse_down(&a.viewport, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let points = touch_points(&event.changed_touches(), &canvas_clone);
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.input.touch_start(&a.viewport, &points);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let points = touch_points(&event.touches(), &canvas_clone);
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.input.touch_move(&a.viewport, &points);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let ended: Vec<i32> = touch_points(&event.changed_touches(), &canvas_clone)
                    .into_iter()
                    .map(|(id, _)| id)
                    .collect();
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.input.touch_end(&a.viewport, &ended);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch cancel
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().input.touch_cancel();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_overlay(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rescue My Valentine (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    demo::run(std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(1));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted session: walk right, hop regularly, report progress
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rescue_valentine::Settings;
    use rescue_valentine::platform::Viewport;
    use rescue_valentine::renderer::{Controls, Scene};
    use rescue_valentine::sim::{Game, GameMode, TickInput, tick};

    const DEMO_TICKS: u64 = 60 * 60;

    pub fn run(seed: u64) {
        let mut game = Game::new(seed);
        let viewport = Viewport::compute(960.0, 540.0, 1.0);
        game.visible = viewport.visible;

        // Any input leaves the title screen
        tick(
            &mut game,
            &TickInput {
                interact: true,
                ..TickInput::default()
            },
        );

        let mut mode = game.mode.name();
        let mut rescued = 0;
        let mut best_x = 0.0f32;
        for t in 0..DEMO_TICKS {
            let input = TickInput {
                right: true,
                jump: t % 40 < 12,
                jump_pressed: t % 40 == 0,
                ..TickInput::default()
            };
            tick(&mut game, &input);

            let progress = &game.session.progress;
            if progress.rescued_count() != rescued {
                rescued = progress.rescued_count();
                log::info!("tick {}: {} rescued", t, rescued);
            }
            if game.mode.name() != mode {
                mode = game.mode.name();
                log::info!("tick {}: mode -> {}", t, mode);
            }
            best_x = best_x.max(game.session.player.pos.x);
            if !matches!(game.mode, GameMode::Playing) {
                break;
            }
        }

        let frame = Scene::new().build(&game, &Settings::load(), &viewport, &Controls::default());
        log::info!(
            "Demo finished in {} mode: furthest x {:.0}, {} keys, {} triangles in the last frame",
            game.mode.name(),
            best_x,
            game.session.progress.keys_collected.iter().filter(|&&k| k).count(),
            frame.vertex_count() / 3
        );
        println!(
            "mode={} furthest_x={:.0} rescued={}",
            game.mode.name(),
            best_x,
            game.session.progress.rescued_count()
        );
    }
}
