//! # LatheSim Engine
//!
//! Cutting mechanics and haptic force synthesis for the lathe trainer.
//! The engine is single-threaded and step-driven: one call to
//! [`LatheSession::step`] per rendered frame runs the full pipeline -
//! handle angle to tool displacement, collision detection and material
//! removal against the stock profile, and force/vibration synthesis for
//! the handle motor. The crash detector observes the same collision
//! facts and can short-circuit everything.

pub mod collision;
pub mod config;
pub mod crash;
pub mod force;
pub mod session;
pub mod stock;
pub mod tool;
pub mod tracker;

pub use collision::{CollisionEngine, EngagementResult};
pub use config::{ForceConfig, HardSurfaceConfig, KarnoppConfig, ProfileWindow, SimConfig, TexturedConfig};
pub use crash::{CrashDetector, CrashState};
pub use force::{
    ForceCommand, ForceSynthesizer, FrictionState, HardSurfaceState, KarnoppState, RenderMode,
    TexturedState,
};
pub use session::{LatheSession, StepInput, StepOutput};
pub use stock::StockModel;
pub use tool::ToolGeometry;
pub use tracker::{RelativePositionTracker, ToolState};
