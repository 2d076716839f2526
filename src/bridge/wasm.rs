//! Browser worker facade
//!
//! The worker script forwards `onmessage` payloads here:
//!
//! ```js
//! const worker = new BoidWorker();
//! onmessage = ({ data }) => {
//!   if (data.type === "init") worker.init(data.canvas, JSON.stringify({ ...data, canvas: undefined }));
//!   else worker.post_message(JSON.stringify(data));
//! };
//! ```
//!
//! Ticks re-schedule themselves with the worker's `setTimeout`, so the loop keeps
//! going until the worker is terminated.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{DedicatedWorkerGlobalScope, ImageData, OffscreenCanvas, OffscreenCanvasRenderingContext2d, WorkerGlobalScope};

use crate::simulation::{now_ms, FrameBuffer, PerfStats, RenderSurface};

use super::clock::FrameClock;
use super::host::{MessagePort, SimulationHost};
use super::protocol::{Envelope, InboundMessage, OutboundMessage};

/// Transferred OffscreenCanvas, drawn with `putImageData`
pub struct CanvasSurface {
    canvas: OffscreenCanvas,
    context: OffscreenCanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: OffscreenCanvas) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<OffscreenCanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }
}

impl RenderSurface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(frame.pixels()), frame.width(), frame.height())
            .map_err(|e| format!("ImageData: {:?}", e))?;
        self.context
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| format!("putImageData: {:?}", e))
    }
}

/// Posts telemetry back to the page; silent outside a dedicated worker
pub struct ScopePort {
    scope: Option<DedicatedWorkerGlobalScope>,
}

impl ScopePort {
    pub fn new() -> Self {
        Self { scope: js_sys::global().dyn_into::<DedicatedWorkerGlobalScope>().ok() }
    }
}

impl Default for ScopePort {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagePort for ScopePort {
    fn post(&mut self, message: OutboundMessage) -> Result<(), String> {
        let Some(scope) = &self.scope else {
            return Ok(());
        };
        let json = message.to_json()?;
        let value = js_sys::JSON::parse(&json).map_err(|e| format!("{:?}", e))?;
        scope.post_message(&value).map_err(|e| format!("postMessage: {:?}", e))
    }
}

struct WorkerInner {
    host: SimulationHost<CanvasSurface, ScopePort>,
    clock: FrameClock,
    running: bool,
}

#[wasm_bindgen]
pub struct BoidWorker {
    inner: Rc<RefCell<WorkerInner>>,
}

#[wasm_bindgen]
impl BoidWorker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(WorkerInner {
                host: SimulationHost::new(ScopePort::new()),
                clock: FrameClock::new(now_ms()),
                running: false,
            })),
        }
    }

    /// Bind the transferred canvas, build the flock and start ticking
    pub fn init(&self, canvas: OffscreenCanvas, message_json: &str) -> Result<(), JsValue> {
        let message = InboundMessage::from_json(message_json).map_err(|e| JsValue::from_str(&e))?;
        if !matches!(message, InboundMessage::Init(_)) {
            return Err(JsValue::from_str("init expects an init message"));
        }
        let surface = CanvasSurface::new(canvas)?;
        self.inner
            .borrow_mut()
            .host
            .handle(Envelope::with_transfer(message, surface))
            .map_err(|e| JsValue::from_str(&e))?;
        self.start()
    }

    /// Any message after init. Unknown kinds are ignored; malformed ones are
    /// logged and reported without stopping the loop.
    pub fn post_message(&self, json: &str) -> Result<(), JsValue> {
        let message = match InboundMessage::from_json(json) {
            Ok(message) => message,
            Err(e) => {
                console_warn!("dropping malformed message: {}", e);
                return Err(JsValue::from_str(&e));
            }
        };
        let kind = message.kind();
        let result = self.inner.borrow_mut().host.handle(Envelope::message(message));
        result.map_err(|e| {
            console_warn!("{} failed: {}", kind, e);
            JsValue::from_str(&e)
        })
    }

    /// Start the tick loop (no-op when already running or not initialized)
    pub fn start(&self) -> Result<(), JsValue> {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.running || !inner.host.is_initialized() {
                return Ok(());
            }
            inner.running = true;
            inner.clock = FrameClock::new(now_ms());
        }
        schedule(Rc::clone(&self.inner), 0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn particle_count(&self) -> u32 {
        self.inner.borrow().host.simulation().map_or(0, |s| s.particle_count() as u32)
    }

    pub fn frame(&self) -> u32 {
        self.inner.borrow().host.simulation().map_or(0, |s| s.frame() as u32)
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.inner.borrow().host.simulation().map(|s| s.get_perf_stats()).unwrap_or_default()
    }
}

impl Default for BoidWorker {
    fn default() -> Self {
        Self::new()
    }
}

fn schedule(inner: Rc<RefCell<WorkerInner>>, delay_ms: f64) -> Result<(), JsValue> {
    let scope: WorkerGlobalScope = js_sys::global().dyn_into()?;
    let callback = Closure::once_into_js(move || run_tick(inner));
    scope.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms.round() as i32)?;
    Ok(())
}

fn run_tick(inner: Rc<RefCell<WorkerInner>>) {
    let delay = {
        let mut guard = inner.borrow_mut();
        if let Err(e) = guard.host.tick() {
            console_warn!("tick failed: {}", e);
        }
        let now = now_ms();
        guard.clock.advance(now);
        guard.clock.delay_ms(now)
    };
    if let Err(e) = schedule(inner, delay) {
        console_warn!("failed to schedule tick: {:?}", e);
    }
}
