//! Actuator link
//!
//! Force commands travel to the actuator firmware as compact delimited
//! frames rather than JSON; at 100 Hz the framing overhead matters on
//! the serial side. `ActuatorLink` abstracts the transport so the
//! session loop and tests run against [`NoOpLink`] without hardware.

use async_trait::async_trait;
use lathesim_core::error::{BridgeError, Result};
use lathesim_sim::ForceCommand;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

use crate::status::StatusUpdate;

/// A force command in its wire form, `F:<x>,<z>,<hz>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceFrame {
    /// Radial force in newtons, positive away from the centerline
    pub force_x: f64,
    /// Axial force in newtons, positive away from the chuck
    pub force_z: f64,
    /// Cutting vibration frequency in hertz
    pub vibration_hz: f64,
}

impl ForceFrame {
    /// Encode to the wire format with three decimal places
    pub fn encode(&self) -> String {
        format!(
            "F:{:.3},{:.3},{:.3}",
            self.force_x, self.force_z, self.vibration_hz
        )
    }

    /// Parse a frame, returning `None` for anything that is not a
    /// well-formed force frame
    pub fn parse(input: &str) -> Option<Self> {
        let body = input.trim().strip_prefix("F:")?;
        let mut parts = body.split(',');
        let force_x = parts.next()?.parse().ok()?;
        let force_z = parts.next()?.parse().ok()?;
        let vibration_hz = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            force_x,
            force_z,
            vibration_hz,
        })
    }
}

impl From<&ForceCommand> for ForceFrame {
    fn from(cmd: &ForceCommand) -> Self {
        Self {
            force_x: cmd.force_x,
            force_z: cmd.force_z,
            vibration_hz: cmd.vibration_hz,
        }
    }
}

/// Rate limiter for outbound force frames
///
/// The synthesis loop may run faster than the serial link can absorb;
/// frames beyond the configured rate are dropped, not queued. Dropping
/// is correct here because every frame supersedes the previous one.
#[derive(Debug)]
pub struct SendThrottle {
    min_interval: Duration,
    last_send: Option<Instant>,
}

impl SendThrottle {
    /// A throttle admitting at most `rate_hz` frames per second
    pub fn new(rate_hz: f64) -> Self {
        Self {
            min_interval: Duration::from_secs_f64(1.0 / rate_hz.max(1.0)),
            last_send: None,
        }
    }

    /// Whether a frame may be sent at `now`; admission updates the clock
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last_send {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_send = Some(now);
                true
            }
        }
    }
}

impl Default for SendThrottle {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Transport to the actuator side
#[async_trait]
pub trait ActuatorLink: Send + Sync {
    /// Send one force frame
    async fn send_force(&self, frame: ForceFrame) -> Result<()>;

    /// Poll for a pending status update, if the transport has one
    async fn poll_status(&self) -> Result<Option<StatusUpdate>>;

    /// Whether the transport is currently usable
    fn is_connected(&self) -> bool;
}

/// A link that records sends and replays injected statuses
///
/// Used headless and in tests; the session loop runs unmodified on it.
#[derive(Debug, Default)]
pub struct NoOpLink {
    sent: Arc<Mutex<Vec<ForceFrame>>>,
    pending_status: Arc<Mutex<Vec<StatusUpdate>>>,
}

impl NoOpLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames sent so far, oldest first
    pub fn sent_frames(&self) -> Vec<ForceFrame> {
        self.sent.lock().clone()
    }

    /// Queue a status update for the next `poll_status` call
    pub fn inject_status(&self, status: StatusUpdate) {
        self.pending_status.lock().push(status);
    }
}

#[async_trait]
impl ActuatorLink for NoOpLink {
    async fn send_force(&self, frame: ForceFrame) -> Result<()> {
        trace!(?frame, "force frame (no-op link)");
        self.sent.lock().push(frame);
        Ok(())
    }

    async fn poll_status(&self) -> Result<Option<StatusUpdate>> {
        let mut pending = self.pending_status.lock();
        if pending.is_empty() {
            Ok(None)
        } else {
            Ok(Some(pending.remove(0)))
        }
    }

    fn is_connected(&self) -> bool {
        true
    }
}

/// A link placeholder for a configured but absent transport
///
/// Every operation fails with [`BridgeError::NotConnected`]; the caller
/// decides whether that is fatal.
#[derive(Debug, Default)]
pub struct DisconnectedLink;

#[async_trait]
impl ActuatorLink for DisconnectedLink {
    async fn send_force(&self, _frame: ForceFrame) -> Result<()> {
        Err(BridgeError::NotConnected.into())
    }

    async fn poll_status(&self) -> Result<Option<StatusUpdate>> {
        Err(BridgeError::NotConnected.into())
    }

    fn is_connected(&self) -> bool {
        false
    }
}
