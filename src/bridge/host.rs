//! SimulationHost - the simulation side of the bridge
//!
//! Owns the render surface (after `init`), the `SimulationState`, and the outbound
//! port. Hosts (thread loop, worker `setTimeout` loop) feed it envelopes in send
//! order and call `tick()` on their own schedule.

use std::sync::mpsc::{SyncSender, TrySendError};

use crate::simulation::{PerfTimer, RenderSurface, SimulationState};

use super::protocol::{Envelope, InboundMessage, OutboundMessage};

/// Where outbound telemetry goes
pub trait MessagePort {
    fn post(&mut self, message: OutboundMessage) -> Result<(), String>;
}

/// Bounded outbox: telemetry is dropped while the reader is behind
impl MessagePort for SyncSender<OutboundMessage> {
    fn post(&mut self, message: OutboundMessage) -> Result<(), String> {
        match self.try_send(message) {
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err("outbound channel closed".to_string()),
        }
    }
}

/// Collects messages in memory (tests)
impl MessagePort for Vec<OutboundMessage> {
    fn post(&mut self, message: OutboundMessage) -> Result<(), String> {
        self.push(message);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeState {
    /// Waiting for `init`; everything else is dropped
    Uninitialized,
    /// Surface bound and flock built, no tick yet
    Initialized,
    /// Ticking; stays here until the context is torn down
    Running,
}

pub struct SimulationHost<S, P> {
    state: BridgeState,
    simulation: Option<SimulationState>,
    surface: Option<S>,
    port: P,
}

impl<S: RenderSurface, P: MessagePort> SimulationHost<S, P> {
    pub fn new(port: P) -> Self {
        Self {
            state: BridgeState::Uninitialized,
            simulation: None,
            surface: None,
            port,
        }
    }

    #[inline]
    pub fn state(&self) -> BridgeState {
        self.state
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state != BridgeState::Uninitialized
    }

    pub fn simulation(&self) -> Option<&SimulationState> {
        self.simulation.as_ref()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Apply one inbound message.
    ///
    /// Errors leave the host in its previous state; callers log them and keep
    /// ticking.
    pub fn handle(&mut self, envelope: Envelope<S>) -> Result<(), String> {
        let Envelope { message, transfer } = envelope;

        if let InboundMessage::Init(params) = message {
            if self.simulation.is_some() {
                console_warn!("ignoring second init");
                return Ok(());
            }
            let mut surface = transfer.ok_or_else(|| "init without a render surface".to_string())?;
            let simulation = SimulationState::new(params)?;

            let fb = simulation.framebuffer();
            surface.resize(fb.width(), fb.height());
            self.surface = Some(surface);
            self.simulation = Some(simulation);
            self.state = BridgeState::Initialized;
            return Ok(());
        }

        let (simulation, surface) = match (self.simulation.as_mut(), self.surface.as_mut()) {
            (Some(sim), Some(surface)) => (sim, surface),
            _ => {
                console_warn!("ignoring {} before init", message.kind());
                return Ok(());
            }
        };

        match message {
            InboundMessage::Init(_) => {}
            InboundMessage::Resize(params) => {
                let outcome = simulation.resize(params)?;
                let fb = simulation.framebuffer();
                surface.resize(fb.width(), fb.height());
                console_log!(
                    "resize {}x{}: {:?}",
                    simulation.width(),
                    simulation.height(),
                    outcome
                );
            }
            InboundMessage::Retarget(params) => {
                simulation.retarget(&params.target_points)?;
            }
            InboundMessage::Pointer(p) => simulation.set_pointer(p.x, p.y),
            InboundMessage::Hover(params) => simulation.hover(params),
            InboundMessage::Theme(params) => simulation.set_theme(params.is_dark),
            InboundMessage::Perf(params) => {
                simulation.enable_perf_metrics(params.enabled);
                if params.enabled {
                    simulation.enable_perf_detailed_metrics(params.detailed);
                }
            }
            InboundMessage::Unknown => {
                console_warn!("ignoring unknown message");
            }
        }
        Ok(())
    }

    /// Step, draw, present, report. Returns the tick duration in ms, or `None`
    /// before `init`.
    pub fn tick(&mut self) -> Result<Option<f64>, String> {
        let (simulation, surface) = match (self.simulation.as_mut(), self.surface.as_mut()) {
            (Some(sim), Some(surface)) => (sim, surface),
            _ => return Ok(None),
        };

        let timer = PerfTimer::start();
        simulation.step();
        simulation.render();
        surface.present(simulation.framebuffer())?;
        let duration = timer.elapsed_ms();
        self.state = BridgeState::Running;

        self.port.post(OutboundMessage::FrameTime { duration })?;
        if simulation.perf_detailed() {
            self.port.post(OutboundMessage::PerfStats(simulation.get_perf_stats()))?;
        }
        Ok(Some(duration))
    }
}
