//! Native worker: one OS thread per flock
//!
//! Mirrors the browser worker. The thread owns the `SimulationHost`, receives
//! envelopes over an ordered channel, handles at most one per wakeup, and ticks
//! whenever the frame deadline passes. Dropping the handle tears the thread down
//! without draining the inbox.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::simulation::RenderSurface;

use super::clock::FrameClock;
use super::host::SimulationHost;
use super::protocol::{Envelope, InboundMessage, InitParams, OutboundMessage};

/// Outbound messages held for a reader that is not draining; newer telemetry is
/// dropped once this many are queued
pub const OUTBOX_CAPACITY: usize = 64;

/// Control side of a running worker
pub struct WorkerHandle<S> {
    sender: Option<Sender<Envelope<S>>>,
    receiver: Receiver<OutboundMessage>,
    alive: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

/// Start a simulation thread. It idles until an `init` carrying a surface arrives.
pub fn spawn_worker<S>() -> Result<WorkerHandle<S>, String>
where
    S: RenderSurface + Send + 'static,
{
    let (inbox_tx, inbox_rx) = mpsc::channel::<Envelope<S>>();
    let (outbox_tx, outbox_rx) = mpsc::sync_channel::<OutboundMessage>(OUTBOX_CAPACITY);
    let alive = Arc::new(AtomicBool::new(true));

    let thread_alive = Arc::clone(&alive);
    let thread = thread::Builder::new()
        .name("murmur-sim".to_string())
        .spawn(move || run_loop(inbox_rx, outbox_tx, thread_alive))
        .map_err(|e| format!("failed to spawn simulation thread: {}", e))?;

    Ok(WorkerHandle {
        sender: Some(inbox_tx),
        receiver: outbox_rx,
        alive,
        thread: Some(thread),
    })
}

impl<S> WorkerHandle<S> {
    /// Queue a message; order is preserved
    pub fn post(&self, message: InboundMessage) -> Result<(), String> {
        self.send(Envelope::message(message))
    }

    /// Parse and queue a JSON message
    pub fn post_json(&self, json: &str) -> Result<(), String> {
        self.post(InboundMessage::from_json(json)?)
    }

    /// Transfer `surface` to the worker together with the `init` message
    pub fn init(&self, params: InitParams, surface: S) -> Result<(), String> {
        self.send(Envelope::with_transfer(InboundMessage::Init(params), surface))
    }

    fn send(&self, envelope: Envelope<S>) -> Result<(), String> {
        match &self.sender {
            Some(sender) => sender.send(envelope).map_err(|_| "simulation thread is gone".to_string()),
            None => Err("worker terminated".to_string()),
        }
    }

    pub fn try_recv(&self) -> Option<OutboundMessage> {
        self.receiver.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<OutboundMessage> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Stop the thread and wait for it; queued messages are discarded
    pub fn terminate(mut self) {
        self.shutdown();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                console_warn!("simulation thread panicked");
            }
        }
    }

    fn shutdown(&mut self) {
        self.alive.store(false, Ordering::Release);
        self.sender = None;
    }
}

impl<S> Drop for WorkerHandle<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop<S: RenderSurface>(
    inbox: Receiver<Envelope<S>>,
    outbox: SyncSender<OutboundMessage>,
    alive: Arc<AtomicBool>,
) {
    let epoch = Instant::now();
    let now_ms = || epoch.elapsed().as_secs_f64() * 1000.0;

    let mut host = SimulationHost::new(outbox);
    let mut clock = FrameClock::new(now_ms());

    while alive.load(Ordering::Acquire) {
        if host.is_initialized() {
            if clock.is_due(now_ms()) {
                if let Err(e) = host.tick() {
                    console_warn!("tick failed: {}", e);
                }
                clock.advance(now_ms());
                continue;
            }

            let wait = Duration::from_secs_f64(clock.delay_ms(now_ms()) / 1000.0);
            match inbox.recv_timeout(wait) {
                Ok(envelope) => dispatch(&mut host, envelope),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            // Nothing to tick yet: block for the init
            match inbox.recv() {
                Ok(envelope) => {
                    dispatch(&mut host, envelope);
                    if host.is_initialized() {
                        clock = FrameClock::new(now_ms());
                    }
                }
                Err(_) => break,
            }
        }
    }
}

fn dispatch<S: RenderSurface>(host: &mut SimulationHost<S, SyncSender<OutboundMessage>>, envelope: Envelope<S>) {
    let kind = envelope.message.kind();
    if let Err(e) = host.handle(envelope) {
        console_warn!("{} failed: {}", kind, e);
    }
}
