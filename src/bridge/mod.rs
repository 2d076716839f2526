//! RenderBridge - everything between the page and the simulation
//!
//! - protocol.rs: typed inbound/outbound messages (JSON, tagged by `type`)
//! - host.rs: the Uninitialized -> Initialized -> Running state machine
//! - clock.rs: fixed-rate tick deadlines
//! - worker.rs: native thread host (tests, tools)
//! - wasm.rs: browser dedicated-worker host

pub mod clock;
pub mod host;
pub mod protocol;

#[cfg(not(target_arch = "wasm32"))]
pub mod worker;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use clock::{FrameClock, TICK_INTERVAL_MS};
pub use host::{BridgeState, MessagePort, SimulationHost};
pub use protocol::{Envelope, InboundMessage, InitParams, OutboundMessage};

#[cfg(not(target_arch = "wasm32"))]
pub use worker::{spawn_worker, WorkerHandle, OUTBOX_CAPACITY};

#[cfg(target_arch = "wasm32")]
pub use wasm::{BoidWorker, CanvasSurface};
