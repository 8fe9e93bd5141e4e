//! Driving a live session through the GUI command vocabulary, the way
//! the runtime loop does.

use lathesim_bridge::{apply_to_session, ActuatorLink, ForceFrame, GuiCommand, NoOpLink};
use lathesim_core::Axis;
use lathesim_sim::{ForceConfig, LatheSession, RenderMode, SimConfig, StepInput, ToolGeometry};
use std::str::FromStr;

fn session() -> LatheSession {
    LatheSession::new(
        SimConfig::default(),
        ForceConfig::default(),
        ToolGeometry::default(),
        RenderMode::VirtualWall,
    )
    .unwrap()
}

#[test]
fn set_parameters_reaches_machine_state() {
    let mut s = session();
    let cmd =
        GuiCommand::parse(r#"{"type": "set_parameters", "spindle_rpm": 500.0, "feed_rate": 2.0}"#)
            .unwrap();
    apply_to_session(&cmd, &mut s);
    assert_eq!(s.machine().spindle_rpm, 500.0);
    assert_eq!(s.machine().feed_rate, 2.0);
}

#[test]
fn emergency_stop_zeroes_force_until_cleared() {
    let mut s = session();
    apply_to_session(&GuiCommand::EmergencyStop, &mut s);
    assert!(s.is_emergency_stopped());

    let out = s.step(StepInput {
        handle_angle_deg: Some(90.0),
    });
    assert_eq!(out.force.magnitude(), 0.0);

    s.clear_emergency_stop();
    assert!(!s.is_emergency_stopped());
}

#[test]
fn axis_select_switches_handle_mapping() {
    let mut s = session();
    let start = *s.tool_state();

    // Radial axis selected: positive handle motion feeds toward center
    apply_to_session(
        &GuiCommand::AxisSelect {
            axis: "x".to_string(),
        },
        &mut s,
    );
    s.step(StepInput {
        handle_angle_deg: Some(0.0),
    });
    s.step(StepInput {
        handle_angle_deg: Some(90.0),
    });
    let after = *s.tool_state();
    assert!(after.x < start.x);
    assert_eq!(after.z, start.z);
    assert_eq!(after.active_axis, Axis::from_str("x").unwrap());
}

#[test]
fn reset_restores_parked_tool_and_full_stock() {
    let mut s = session();
    s.set_parameters(500.0, 2.0);
    s.step(StepInput {
        handle_angle_deg: Some(0.0),
    });
    s.step(StepInput {
        handle_angle_deg: Some(180.0),
    });

    apply_to_session(&GuiCommand::Reset, &mut s);
    let snapshot = s.stock_snapshot();
    assert!(snapshot.iter().all(|&r| (r - 0.625).abs() < 1e-12));
    assert!((s.stock_length() - 4.5).abs() < 1e-12);
}

#[tokio::test]
async fn force_output_flows_to_link() {
    let mut s = session();
    let link = NoOpLink::new();

    let out = s.step(StepInput {
        handle_angle_deg: Some(0.0),
    });
    link.send_force(ForceFrame::from(&out.force)).await.unwrap();

    let sent = link.sent_frames();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].force_x, out.force.force_x);
}
