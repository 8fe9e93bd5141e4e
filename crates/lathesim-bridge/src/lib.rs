//! # LatheSim Bridge
//!
//! Control-plane message layer: the JSON command vocabulary spoken by
//! the GUI, the status updates published back, and the transport
//! abstraction carrying force frames to the actuator firmware.

pub mod commands;
pub mod link;
pub mod status;

pub use commands::{apply_to_session, GuiCommand, MotorAction};
pub use link::{ActuatorLink, DisconnectedLink, ForceFrame, NoOpLink, SendThrottle};
pub use status::StatusUpdate;
