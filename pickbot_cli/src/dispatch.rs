//! Command implementations: config mapping, transport assembly, dispatch.

use eyre::WrapErr;
use pickbot_config::Config;
use pickbot_core::error::DispatchError;
use pickbot_core::{
    Calibration, SlotId, compile_program, resolve_pick_coordinate, resolve_shipment_coordinate,
};
use pickbot_net::{ControllerEndpoint, TcpTransport};
use std::str::FromStr;
use std::time::Duration;

fn parse_slot(raw: i64) -> eyre::Result<SlotId> {
    SlotId::new(raw).map_err(eyre::Report::new)
}

fn parse_endpoint(cfg: &Config, host_override: Option<&str>) -> eyre::Result<ControllerEndpoint> {
    let host = host_override.unwrap_or(&cfg.controller.host);
    ControllerEndpoint::from_str(host).map_err(|e| {
        eyre::Report::new(DispatchError::invalid_input(format!(
            "controller host {host:?}: {e}"
        )))
    })
}

fn compile_text(cal: &Calibration, slot: SlotId) -> eyre::Result<String> {
    let pick = resolve_pick_coordinate(slot, cal);
    let ship = resolve_shipment_coordinate(cal);
    Ok(compile_program(pick, ship, cal)?.into_text())
}

pub fn run_dispatch(
    cfg: &Config,
    slot_raw: i64,
    host_override: Option<&str>,
    print_program: bool,
) -> eyre::Result<()> {
    let slot = parse_slot(slot_raw)?;
    let endpoint = parse_endpoint(cfg, host_override)?;
    let cal = Calibration::from(cfg);

    if print_program {
        print!("{}", compile_text(&cal, slot)?);
    }

    // Blocks here if another dispatch to this controller is in flight.
    let transport = TcpTransport::open(
        endpoint,
        Duration::from_millis(cfg.controller.connect_timeout_ms),
        Duration::from_millis(cfg.controller.write_timeout_ms),
    );

    tracing::info!(%slot, %endpoint, "dispatch start");
    let rx = pickbot_core::runner::spawn_dispatch(slot, cal, transport);
    let outcome = rx
        .recv()
        .wrap_err("dispatch worker terminated without reporting")?;
    outcome?;
    tracing::info!(%slot, %endpoint, "dispatch complete");
    println!("dispatched slot {slot} to {endpoint}");
    Ok(())
}

pub fn run_preview(cfg: &Config, slot_raw: i64) -> eyre::Result<()> {
    let slot = parse_slot(slot_raw)?;
    let cal = Calibration::from(cfg);
    print!("{}", compile_text(&cal, slot)?);
    Ok(())
}

/// Offline health check: the host must parse and a reference program for
/// slot 1 must compile from the loaded calibration. No sockets are opened.
pub fn run_self_check(cfg: &Config) -> eyre::Result<()> {
    let endpoint = parse_endpoint(cfg, None)?;
    let cal = Calibration::from(cfg);
    let text = compile_text(&cal, parse_slot(1)?)?;
    tracing::info!(%endpoint, bytes = text.len(), "reference program compiled");
    println!("self-check ok");
    Ok(())
}
