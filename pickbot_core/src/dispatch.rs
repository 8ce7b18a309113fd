//! The strictly ordered two-channel dispatch.
//!
//! The controller requires brakes released before it will execute motion, so
//! the control send must complete before the program send begins. Neither
//! send waits for a controller-side outcome: success means bytes were
//! written, the controller itself is a black box.

use crate::calibration::Calibration;
use crate::error::{DispatchError, Result};
use crate::grid::{SlotId, resolve_pick_coordinate, resolve_shipment_coordinate};
use crate::script::compile_program;
use pickbot_traits::{Channel, Transport};

/// Literal command accepted by the control channel; the transport appends
/// the newline terminator.
pub const BRAKE_RELEASE: &str = "brake release";

/// Resolve, compile, and deliver the pick-to-shipment program for one slot.
///
/// Error mapping is stage-exact: a control-channel failure surfaces as
/// `Network { channel: Control }` and the program channel is never attempted;
/// a program-channel failure after a successful control send surfaces as
/// `PartialDispatch` because the controller is left with brakes released and
/// no program running. No retries at this level.
pub fn dispatch_slot<T: Transport>(
    slot: SlotId,
    cal: &Calibration,
    transport: &mut T,
) -> Result<()> {
    cal.validate()?;
    let pick = resolve_pick_coordinate(slot, cal);
    let ship = resolve_shipment_coordinate(cal);
    let program = compile_program(pick, ship, cal)?;

    tracing::info!(%slot, pick_x = pick.x, pick_y = pick.y, "dispatch start");

    transport
        .send(Channel::Control, BRAKE_RELEASE)
        .map_err(|e| DispatchError::Network {
            channel: Channel::Control,
            msg: describe_transport_error(&*e),
        })?;
    tracing::debug!("brake release written on control channel");

    transport
        .send(Channel::Program, program.as_str())
        .map_err(|e| DispatchError::PartialDispatch {
            msg: describe_transport_error(&*e),
        })?;
    tracing::info!(%slot, program_bytes = program.as_str().len(), "dispatch complete");

    Ok(())
}

// Prefer the typed network error's display when the TCP backend is in play;
// arbitrary transports fall back to their own Display.
fn describe_transport_error(e: &(dyn std::error::Error + 'static)) -> String {
    #[cfg(feature = "net-errors")]
    if let Some(net) = e.downcast_ref::<pickbot_net::NetError>() {
        return net.to_string();
    }
    e.to_string()
}
