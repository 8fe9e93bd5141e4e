//! # LatheSim
//!
//! A haptic lathe training simulator. A motorized handle wheel stands
//! in for the carriage and cross-slide handwheels of a manual lathe;
//! this crate simulates the workpiece and synthesizes the resisting
//! forces the trainee feels while cutting.
//!
//! ## Architecture
//!
//! LatheSim is organized as a workspace with multiple crates:
//!
//! 1. **lathesim-core** - Shared types, units, error handling
//! 2. **lathesim-sim** - Stock model, collision engine, force synthesis
//! 3. **lathesim-bridge** - GUI command vocabulary and actuator link
//! 4. **lathesim-settings** - Configuration persistence
//! 5. **lathesim** - Main binary running the 60 Hz session loop

pub use lathesim_core::{Axis, Error, MachineState, Result, SkillLevel, TrainingMode};
pub use lathesim_sim::{
    CrashState, ForceCommand, ForceConfig, LatheSession, RenderMode, SimConfig, StepInput,
    StepOutput, ToolGeometry,
};

pub use lathesim_bridge::{
    apply_to_session, ActuatorLink, ForceFrame, GuiCommand, NoOpLink, SendThrottle, StatusUpdate,
};

pub use lathesim_settings::{LatheConfig, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
