use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::canvas::Canvas2d;
use crate::{build_scene, BackdropConfig, DVec2, FrameInput, Scene, Variant};

/// Everything one mounted backdrop owns between frames.
struct Stage {
    canvas: HtmlCanvasElement,
    surface: Canvas2d,
    scene: Box<dyn Scene>,
    rng: SmallRng,
    pointer: Option<DVec2>,
}

impl Stage {
    fn frame(&mut self, now_ms: f64) {
        let input = FrameInput {
            now_ms,
            pointer: self.pointer,
        };
        self.scene.frame(&input, &mut self.rng);
        self.scene.render(&mut self.surface);
    }

    fn fit_to_window(&mut self) {
        let (width, height) = viewport_size();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.scene.resize(width, height, &mut self.rng);
        log::info!("{} resized to {width}x{height}", self.scene.name());
    }
}

fn viewport_size() -> (f64, f64) {
    let Some(window) = window() else {
        return (0.0, 0.0);
    };
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(window.inner_width()), read(window.inner_height()))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

fn seed_rng(config: &BackdropConfig) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64),
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Running {
    stage: Rc<RefCell<Stage>>,
    alive: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: FrameSlot,
    on_resize: Closure<dyn FnMut()>,
    on_pointer: Closure<dyn FnMut(MouseEvent)>,
    on_click: Closure<dyn FnMut()>,
}

/// Handle to a mounted backdrop. Stopping (or freeing it from JS) cancels
/// the pending frame and removes every listener.
#[wasm_bindgen]
pub struct Backdrop {
    running: Option<Running>,
}

#[wasm_bindgen]
impl Backdrop {
    /// `false` once stopped, or when the canvas had no 2-D context.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.is_some()
    }

    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        running.alive.set(false);

        if let Some(window) = window() {
            if let Some(id) = running.frame_id.take() {
                window.cancel_animation_frame(id).ok();
            }
            window
                .remove_event_listener_with_callback("resize", running.on_resize.as_ref().unchecked_ref())
                .ok();
            if let Some(document) = window.document() {
                document
                    .remove_event_listener_with_callback("click", running.on_click.as_ref().unchecked_ref())
                    .ok();
            }
        }
        let stage = running.stage.borrow();
        stage
            .canvas
            .remove_event_listener_with_callback("mousemove", running.on_pointer.as_ref().unchecked_ref())
            .ok();
        log::info!("{} unmounted", stage.scene.name());
        drop(stage);

        // Breaks the frame closure's reference to itself.
        running.frame.borrow_mut().take();
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Mounts `variant` full-window on `canvas` and starts the frame loop.
pub fn mount(canvas: HtmlCanvasElement, variant: Variant, config: BackdropConfig) -> Result<Backdrop, JsValue> {
    log::set_max_level(config.level_filter()?);

    let Some(context) = canvas.get_context("2d")? else {
        log::warn!("2d canvas context unavailable; {variant} backdrop disabled");
        return Ok(Backdrop { running: None });
    };
    let context: CanvasRenderingContext2d = context.dyn_into()?;

    let mut rng = seed_rng(&config);
    let (width, height) = viewport_size();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let scene = build_scene(variant, &config, width, height, &mut rng)?;
    log::info!("{} mounted at {width}x{height}", scene.name());

    let stage = Rc::new(RefCell::new(Stage {
        canvas: canvas.clone(),
        surface: Canvas2d::new(context),
        scene,
        rng,
        pointer: None,
    }));
    let alive = Rc::new(Cell::new(true));
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // Resize rebuilds the scene for the new viewport
    let on_resize = {
        let stage = stage.clone();
        let alive = alive.clone();
        Closure::wrap(Box::new(move || {
            if alive.get() {
                stage.borrow_mut().fit_to_window();
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

    // Pointer in canvas-local coordinates
    let on_pointer = {
        let stage = stage.clone();
        let alive = alive.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            if !alive.get() {
                return;
            }
            let mut stage = stage.borrow_mut();
            let rect = stage.canvas.get_bounding_client_rect();
            stage.pointer = Some(DVec2::new(
                f64::from(event.client_x()) - rect.left(),
                f64::from(event.client_y()) - rect.top(),
            ));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;

    let on_click = {
        let stage = stage.clone();
        let alive = alive.clone();
        Closure::wrap(Box::new(move || {
            if alive.get() {
                stage.borrow_mut().scene.click(now_ms());
            }
        }) as Box<dyn FnMut()>)
    };
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

    // Animation loop
    // `frame` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let frame: FrameSlot = Rc::new(RefCell::new(None));
    let frame_id = Rc::new(Cell::new(None));
    {
        let next = frame.clone();
        let stage = stage.clone();
        let alive = alive.clone();
        let frame_id = frame_id.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !alive.get() {
                return;
            }
            stage.borrow_mut().frame(now);

            // schedule next
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = next.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(err) => log::warn!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let first = window.request_animation_frame(
        frame
            .borrow()
            .as_ref()
            .ok_or("frame callback missing")?
            .as_ref()
            .unchecked_ref(),
    )?;
    frame_id.set(Some(first));

    Ok(Backdrop {
        running: Some(Running {
            stage,
            alive,
            frame_id,
            frame,
            on_resize,
            on_pointer,
            on_click,
        }),
    })
}
