//! Background execution of a dispatch.
//!
//! A dispatch is synchronous end-to-end but must not block a UI's primary
//! thread, so callers hand the work to a worker thread and receive the
//! outcome over a channel instead of awaiting it inline.

use crate::calibration::Calibration;
use crate::dispatch::dispatch_slot;
use crate::error::Result as CoreResult;
use crate::grid::SlotId;
use crossbeam_channel::Receiver;
use pickbot_traits::Transport;

/// Run `dispatch_slot` on a background thread. The calibration is a `Copy`
/// snapshot, so the caller's configuration may change freely while the
/// dispatch is in flight without affecting it.
///
/// The receiver yields exactly one message. If the worker thread panics the
/// channel disconnects, which a caller observes as `RecvError`.
pub fn spawn_dispatch<T>(slot: SlotId, cal: Calibration, mut transport: T) -> Receiver<CoreResult<()>>
where
    T: Transport + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let outcome = dispatch_slot(slot, &cal, &mut transport);
        if let Err(e) = &outcome {
            tracing::error!(error = %e, "background dispatch failed");
        }
        // Receiver may have been dropped; nothing useful to do then.
        let _ = tx.send(outcome);
    });
    rx
}
