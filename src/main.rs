use std::time::{Duration, Instant};

use lathesim::{
    init_logging, ActuatorLink, ForceFrame, LatheSession, NoOpLink, RenderMode, SendThrottle,
    SettingsManager, StepInput, ToolGeometry, BUILD_DATE, VERSION,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!(version = VERSION, build = BUILD_DATE, "LatheSim starting");

    let settings = SettingsManager::load_or_default();
    let config = settings.config();

    let mut session = LatheSession::new(
        config.simulation.clone(),
        config.force.clone(),
        ToolGeometry::default(),
        RenderMode::VirtualWall,
    )?;

    let link = NoOpLink::new();
    let mut throttle = SendThrottle::new(config.connection.force_rate_hz);

    let step_dt = Duration::from_secs_f64(config.simulation.step_dt());
    let mut ticker = tokio::time::interval(step_dt);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!(
        rate_hz = config.simulation.step_rate_hz,
        "session loop running"
    );

    loop {
        ticker.tick().await;

        let handle_angle_deg = match link.poll_status().await {
            Ok(Some(status)) => {
                if status.emergency_stop {
                    session.emergency_stop();
                }
                status.handle_wheel_position
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "status poll failed");
                None
            }
        };

        let output = session.step(StepInput { handle_angle_deg });

        if throttle.admit(Instant::now()) {
            if let Err(e) = link.send_force(ForceFrame::from(&output.force)).await {
                warn!(error = %e, "force send failed");
            }
        }
    }
}
